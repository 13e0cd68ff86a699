//! In-memory fakes for the collaborator traits (testing only)
//!
//! Provides `VecReader`, `EndlessReader`, `RecordingWriter` and `RejectAt`
//! that satisfy the trait contracts without touching any files, with knobs
//! to fail at a chosen position.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

use crate::machine::Machine;
use crate::traits::*;

/// Failure injected by a fake reader or writer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FakeError {
    pub message: String,
}

impl FakeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// VecReader
// ---------------------------------------------------------------------------

/// Reader over a fixed list of machines, exhausted once the list is drained.
#[derive(Debug, Default)]
pub struct VecReader {
    machines: VecDeque<Machine>,
    fail_at: Option<(u64, FakeError)>,
    reads: u64,
}

impl VecReader {
    pub fn new(machines: Vec<Machine>) -> Self {
        Self {
            machines: machines.into(),
            fail_at: None,
            reads: 0,
        }
    }

    /// Fail the `call`-th read (1-based) instead of returning a machine.
    pub fn failing_at(mut self, call: u64, message: impl Into<String>) -> Self {
        self.fail_at = Some((call, FakeError::new(message)));
        self
    }

    /// Number of times `read` has been called.
    pub fn reads(&self) -> u64 {
        self.reads
    }
}

impl MachineReader for VecReader {
    type Error = FakeError;

    fn read(&mut self) -> Result<Option<Machine>, Self::Error> {
        self.reads += 1;
        if let Some((call, err)) = &self.fail_at {
            if *call == self.reads {
                return Err(err.clone());
            }
        }
        Ok(self.machines.pop_front())
    }
}

// ---------------------------------------------------------------------------
// EndlessReader
// ---------------------------------------------------------------------------

/// Reader that never signals end of input.
///
/// Each read yields a copy of the template with its hostname suffixed by the
/// read number. `fail_after(n)` turns read `n + 1` into an error so tests
/// can bound a batch that would otherwise never end.
#[derive(Debug)]
pub struct EndlessReader {
    template: Machine,
    fail_after: Option<u64>,
    reads: u64,
}

impl EndlessReader {
    pub fn new(template: Machine) -> Self {
        Self {
            template,
            fail_after: None,
            reads: 0,
        }
    }

    pub fn fail_after(mut self, reads: u64) -> Self {
        self.fail_after = Some(reads);
        self
    }

    pub fn reads(&self) -> u64 {
        self.reads
    }
}

impl MachineReader for EndlessReader {
    type Error = FakeError;

    fn read(&mut self) -> Result<Option<Machine>, Self::Error> {
        if self.fail_after == Some(self.reads) {
            return Err(FakeError::new(format!(
                "harness stopped after {} reads",
                self.reads
            )));
        }
        self.reads += 1;
        let mut machine = self.template.clone();
        machine.hostname = format!("{}-{}", self.template.hostname, self.reads);
        Ok(Some(machine))
    }
}

// ---------------------------------------------------------------------------
// RecordingWriter
// ---------------------------------------------------------------------------

/// Writer that keeps every machine it accepts, in order.
#[derive(Debug, Default)]
pub struct RecordingWriter {
    written: Vec<Machine>,
    fail_at: Option<(u64, FakeError)>,
    attempts: u64,
}

impl RecordingWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the `call`-th write (1-based). The machine is dropped.
    pub fn failing_at(mut self, call: u64, message: impl Into<String>) -> Self {
        self.fail_at = Some((call, FakeError::new(message)));
        self
    }

    /// Machines successfully written.
    pub fn written(&self) -> &[Machine] {
        &self.written
    }

    /// Number of times `write` has been called, including failures.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }
}

impl MachineWriter for RecordingWriter {
    type Error = FakeError;

    fn write(&mut self, machine: Machine) -> Result<(), Self::Error> {
        self.attempts += 1;
        if let Some((call, err)) = &self.fail_at {
            if *call == self.attempts {
                return Err(err.clone());
            }
        }
        self.written.push(machine);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// RejectAt
// ---------------------------------------------------------------------------

/// Rejection produced by [`RejectAt`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("machine {hostname} rejected at position {position}")]
pub struct Rejected {
    pub position: u64,
    pub hostname: String,
}

/// Validator that accepts everything except the `position`-th machine it sees (1-based).
#[derive(Debug)]
pub struct RejectAt {
    position: u64,
    seen: AtomicU64,
}

impl RejectAt {
    pub fn new(position: u64) -> Self {
        Self {
            position,
            seen: AtomicU64::new(0),
        }
    }

    /// Number of machines validated so far.
    pub fn seen(&self) -> u64 {
        self.seen.load(Ordering::SeqCst)
    }
}

impl MachineValidator for RejectAt {
    type Error = Rejected;

    fn validate(&self, machine: &Machine) -> Result<(), Self::Error> {
        let position = self.seen.fetch_add(1, Ordering::SeqCst) + 1;
        if position == self.position {
            return Err(Rejected {
                position,
                hostname: machine.hostname.clone(),
            });
        }
        Ok(())
    }
}
