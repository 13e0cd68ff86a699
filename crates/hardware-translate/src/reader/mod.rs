//! Bundled machine readers.

mod hardware_csv;
mod json_lines;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

pub use hardware_csv::CsvReader;
pub use json_lines::JsonLinesReader;

use crate::error::ReadError;
use crate::format::Format;
use crate::traits::MachineReader;

/// Boxed reader over any bundled format.
pub type DynReader = Box<dyn MachineReader<Error = ReadError>>;

/// Open `path` (or stdin for `-`) as a reader of the given format.
pub fn open_reader(path: &Path, format: Format) -> Result<DynReader, ReadError> {
    let source: Box<dyn io::BufRead> = if path.as_os_str() == "-" {
        Box::new(io::stdin().lock())
    } else {
        Box::new(BufReader::new(File::open(path)?))
    };

    Ok(match format {
        Format::Csv => Box::new(CsvReader::new(source)),
        Format::JsonLines => Box::new(JsonLinesReader::new(source)),
    })
}
