//! Hardware CSV reader.

use std::io;

use crate::error::ReadError;
use crate::format::CsvRow;
use crate::machine::Machine;
use crate::traits::MachineReader;

/// Reads machines from a hardware CSV with a header row.
///
/// Cells are trimmed. Empty BMC and VLAN cells become `None`.
pub struct CsvReader<R: io::Read> {
    rows: csv::DeserializeRecordsIntoIter<R, CsvRow>,
    row: u64,
}

impl<R: io::Read> CsvReader<R> {
    pub fn new(source: R) -> Self {
        let rows = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source)
            .into_deserialize();
        Self { rows, row: 0 }
    }

    /// Number of data rows consumed so far.
    pub fn rows_read(&self) -> u64 {
        self.row
    }
}

impl<R: io::Read> MachineReader for CsvReader<R> {
    type Error = ReadError;

    fn read(&mut self) -> Result<Option<Machine>, Self::Error> {
        let Some(next) = self.rows.next() else {
            return Ok(None);
        };
        self.row += 1;
        let row = next.map_err(|source| ReadError::Csv {
            row: self.row,
            source,
        })?;
        row.into_machine(self.row).map(Some)
    }
}
