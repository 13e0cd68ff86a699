//! Hardware CSV writer.

use std::io;

use crate::error::WriteError;
use crate::format::CsvRow;
use crate::machine::Machine;
use crate::traits::MachineWriter;

/// Writes machines in the same CSV shape [`CsvReader`](crate::CsvReader) reads.
///
/// The header row is written with the first machine.
pub struct CsvWriter<W: io::Write> {
    out: csv::Writer<W>,
}

impl<W: io::Write> CsvWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: csv::Writer::from_writer(out),
        }
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W, WriteError> {
        self.out
            .into_inner()
            .map_err(|err| WriteError::Io(err.into_error()))
    }
}

impl<W: io::Write> MachineWriter for CsvWriter<W> {
    type Error = WriteError;

    fn write(&mut self, machine: Machine) -> Result<(), Self::Error> {
        self.out.serialize(CsvRow::from(&machine))?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        self.out.flush()?;
        Ok(())
    }
}
