//! Collaborator trait definitions for the translation loop
//!
//! These traits define the three capabilities the loop is built from:
//! - `MachineReader`: yields one machine at a time, `None` at end of input
//! - `MachineValidator`: gates a machine before it is written
//! - `MachineWriter`: persists a machine
//!
//! All traits are synchronous and backend-agnostic. In-memory fakes are
//! provided for testing via the `fakes` module.

use crate::machine::Machine;

// ---------------------------------------------------------------------------
// MachineReader
// ---------------------------------------------------------------------------

/// Source of machines.
///
/// Guarantees expected of implementations:
/// - `Ok(Some(machine))` yields the next machine.
/// - `Ok(None)` means the input is exhausted. The loop stops reading.
/// - `Err(_)` is a real failure, never used to signal end of input.
///
/// A reader that never returns `Ok(None)` or an error keeps
/// [`translate_all`](crate::translate_all) looping forever.
pub trait MachineReader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the next machine.
    fn read(&mut self) -> Result<Option<Machine>, Self::Error>;
}

impl<R: MachineReader + ?Sized> MachineReader for &mut R {
    type Error = R::Error;

    fn read(&mut self) -> Result<Option<Machine>, Self::Error> {
        (**self).read()
    }
}

impl<R: MachineReader + ?Sized> MachineReader for Box<R> {
    type Error = R::Error;

    fn read(&mut self) -> Result<Option<Machine>, Self::Error> {
        (**self).read()
    }
}

// ---------------------------------------------------------------------------
// MachineValidator
// ---------------------------------------------------------------------------

/// Gate applied to every machine before it is written.
///
/// The returned error reaches the caller of the loop untouched, so
/// implementations should produce descriptive, matchable errors.
pub trait MachineValidator {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Check a machine. `Ok(())` lets it through.
    fn validate(&self, machine: &Machine) -> Result<(), Self::Error>;
}

impl<V: MachineValidator + ?Sized> MachineValidator for &V {
    type Error = V::Error;

    fn validate(&self, machine: &Machine) -> Result<(), Self::Error> {
        (**self).validate(machine)
    }
}

impl<V: MachineValidator + ?Sized> MachineValidator for Box<V> {
    type Error = V::Error;

    fn validate(&self, machine: &Machine) -> Result<(), Self::Error> {
        (**self).validate(machine)
    }
}

// ---------------------------------------------------------------------------
// MachineWriter
// ---------------------------------------------------------------------------

/// Destination for validated machines. Takes ownership of each machine.
pub trait MachineWriter {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist one machine.
    fn write(&mut self, machine: Machine) -> Result<(), Self::Error>;

    /// Flush anything buffered. The loop never calls this; owners of the
    /// writer do once the batch is over.
    fn finish(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<W: MachineWriter + ?Sized> MachineWriter for &mut W {
    type Error = W::Error;

    fn write(&mut self, machine: Machine) -> Result<(), Self::Error> {
        (**self).write(machine)
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        (**self).finish()
    }
}

impl<W: MachineWriter + ?Sized> MachineWriter for Box<W> {
    type Error = W::Error;

    fn write(&mut self, machine: Machine) -> Result<(), Self::Error> {
        (**self).write(machine)
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        (**self).finish()
    }
}
