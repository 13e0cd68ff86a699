//! Newline-delimited JSON reader.

use std::io;

use crate::error::ReadError;
use crate::machine::Machine;
use crate::traits::MachineReader;

/// Reads one JSON machine per line. Blank lines are skipped.
pub struct JsonLinesReader<R: io::BufRead> {
    lines: io::Lines<R>,
    line: u64,
}

impl<R: io::BufRead> JsonLinesReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            lines: source.lines(),
            line: 0,
        }
    }
}

impl<R: io::BufRead> MachineReader for JsonLinesReader<R> {
    type Error = ReadError;

    fn read(&mut self) -> Result<Option<Machine>, Self::Error> {
        for next in self.lines.by_ref() {
            self.line += 1;
            let text = next.map_err(|source| ReadError::Line {
                line: self.line,
                source,
            })?;
            if text.trim().is_empty() {
                continue;
            }
            let machine = serde_json::from_str(&text).map_err(|source| ReadError::Json {
                line: self.line,
                source,
            })?;
            return Ok(Some(machine));
        }
        Ok(None)
    }
}
