//! The translation loop: read one machine, validate it, write it.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TranslateError;
use crate::obs;
use crate::traits::{MachineReader, MachineValidator, MachineWriter};

/// Outcome of a single successful step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// One machine was read, validated and written.
    Translated,
    /// The reader has no more machines. Nothing was validated or written.
    Exhausted,
}

/// Unique identifier for a batch
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BatchId(pub String);

impl BatchId {
    /// Generate a new random BatchId
    pub fn new() -> Self {
        BatchId(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for BatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Summary produced when a batch reaches end of input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateSummary {
    pub batch_id: BatchId,
    /// Machines written
    pub translated: u64,
    pub started_at: DateTime<Utc>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

/// Whole milliseconds, saturating at `u64::MAX`.
fn saturating_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Translate exactly one machine from `reader` to `writer`.
///
/// Returns `Step::Exhausted` when the reader signals end of input. Read and
/// write failures are wrapped with their stage; validation failures are
/// returned as the validator produced them.
pub fn translate<R, W, V>(
    reader: &mut R,
    writer: &mut W,
    validator: &V,
) -> Result<Step, TranslateError<V::Error>>
where
    R: MachineReader + ?Sized,
    W: MachineWriter + ?Sized,
    V: MachineValidator + ?Sized,
{
    obs::emit_read_started();
    let machine = match reader.read() {
        Ok(Some(machine)) => machine,
        Ok(None) => {
            obs::emit_exhausted();
            return Ok(Step::Exhausted);
        }
        Err(err) => {
            obs::emit_step_failed("read", None, &err);
            return Err(TranslateError::Read(Box::new(err)));
        }
    };
    obs::emit_machine_read(&machine);

    if let Err(err) = validator.validate(&machine) {
        obs::emit_step_failed("validate", Some(&machine.hostname), &err);
        return Err(TranslateError::Validation(err));
    }
    obs::emit_validated(&machine.hostname);

    // The writer consumes the machine.
    let hostname = machine.hostname.clone();
    if let Err(err) = writer.write(machine) {
        obs::emit_step_failed("write", Some(&hostname), &err);
        return Err(TranslateError::Write(Box::new(err)));
    }
    obs::emit_written(&hostname);

    Ok(Step::Translated)
}

/// Translate machines until the reader is exhausted.
///
/// Stops at the first failing step and returns its error unchanged; nothing
/// is retried or skipped. Returns `Ok` only once the reader signals end of
/// input. A reader that never does so makes this loop forever.
///
/// Pass collaborators by `&mut` to keep using them after the batch.
pub fn translate_all<R, W, V>(
    mut reader: R,
    mut writer: W,
    validator: V,
) -> Result<TranslateSummary, TranslateError<V::Error>>
where
    R: MachineReader,
    W: MachineWriter,
    V: MachineValidator,
{
    let batch_id = BatchId::new();
    let _span = obs::BatchSpan::enter(&batch_id.0);
    let started_at = Utc::now();
    let start = Instant::now();
    obs::emit_batch_started(&batch_id.0);

    let mut translated = 0u64;
    loop {
        match translate(&mut reader, &mut writer, &validator) {
            Ok(Step::Translated) => translated += 1,
            Ok(Step::Exhausted) => break,
            Err(err) => {
                obs::emit_batch_failed(&batch_id.0, translated, err.stage(), &err);
                return Err(err);
            }
        }
    }

    let duration_ms = saturating_millis(start.elapsed());
    obs::emit_batch_finished(&batch_id.0, translated, duration_ms);

    Ok(TranslateSummary {
        batch_id,
        translated,
        started_at,
        duration_ms,
    })
}
