//! Resolved settings for a CLI run.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use hardware_translate::Format;

/// Path meaning stdin or stdout.
pub const STDIO: &str = "-";

/// Where to read from, where to write to, and in which formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateConfig {
    pub input: PathBuf,
    pub input_format: Format,
    pub output: PathBuf,
    pub output_format: Format,
    pub validate: bool,
}

impl TranslateConfig {
    pub fn resolve(
        input: PathBuf,
        input_format: Option<Format>,
        output: PathBuf,
        output_format: Option<Format>,
        validate: bool,
    ) -> Result<Self> {
        let input_format = resolve_format(&input, input_format)?;
        let output_format = resolve_format(&output, output_format)?;
        if same_file(&input, &output) {
            bail!(
                "input and output are the same file ({}); writing would truncate the input",
                output.display()
            );
        }
        Ok(Self {
            input,
            input_format,
            output,
            output_format,
            validate,
        })
    }
}

/// Whether both paths name one existing file. Stdio never matches.
fn same_file(input: &Path, output: &Path) -> bool {
    if input.as_os_str() == STDIO || output.as_os_str() == STDIO {
        return false;
    }
    match (std::fs::canonicalize(input), std::fs::canonicalize(output)) {
        (Ok(input), Ok(output)) => input == output,
        _ => false,
    }
}

/// An explicit format wins, then the file extension. Stdio defaults to JSON lines.
pub fn resolve_format(path: &Path, explicit: Option<Format>) -> Result<Format> {
    if let Some(format) = explicit {
        return Ok(format);
    }
    if path.as_os_str() == STDIO {
        return Ok(Format::JsonLines);
    }
    match Format::from_path(path) {
        Some(format) => Ok(format),
        None => bail!(
            "cannot infer format of {}; pass it explicitly (csv or jsonl)",
            path.display()
        ),
    }
}
