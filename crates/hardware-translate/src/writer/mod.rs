//! Bundled machine writers.

mod catalogue;
mod hardware_csv;
mod json_lines;

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

pub use catalogue::Catalogue;
pub use hardware_csv::CsvWriter;
pub use json_lines::JsonLinesWriter;

use crate::error::WriteError;
use crate::format::Format;
use crate::traits::MachineWriter;

/// Boxed writer over any bundled file format.
pub type DynWriter = Box<dyn MachineWriter<Error = WriteError>>;

/// Create `path` (or stdout for `-`) as a writer of the given format.
///
/// Output is buffered; call [`MachineWriter::finish`] after the batch.
pub fn open_writer(path: &Path, format: Format) -> Result<DynWriter, WriteError> {
    let out: Box<dyn io::Write> = if path.as_os_str() == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        Box::new(BufWriter::new(File::create(path)?))
    };

    Ok(match format {
        Format::Csv => Box::new(CsvWriter::new(out)),
        Format::JsonLines => Box::new(JsonLinesWriter::new(out)),
    })
}
