//! Error types for hardware-translate

use thiserror::Error;

/// Boxed cause carried by read and write failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Terminal failure of a translation step or batch.
///
/// Read and write causes are wrapped with the stage that failed. Validation
/// failures are carried verbatim in the validator's own error type so callers
/// can match on them directly.
#[derive(Error, Debug)]
pub enum TranslateError<V>
where
    V: std::error::Error + 'static,
{
    /// The reader failed with something other than end of input
    #[error("read: invalid hardware: {0}")]
    Read(#[source] BoxError),

    /// The validator rejected the machine
    #[error(transparent)]
    Validation(V),

    /// The writer failed to persist the machine
    #[error("write: {0}")]
    Write(#[source] BoxError),
}

impl<V> TranslateError<V>
where
    V: std::error::Error + 'static,
{
    /// Stage name used in logs ("read", "validate" or "write").
    pub fn stage(&self) -> &'static str {
        match self {
            TranslateError::Read(_) => "read",
            TranslateError::Validation(_) => "validate",
            TranslateError::Write(_) => "write",
        }
    }

    /// The validator's error, if this was a validation failure.
    pub fn as_validation(&self) -> Option<&V> {
        match self {
            TranslateError::Validation(err) => Some(err),
            _ => None,
        }
    }

    /// Consume the error, returning the validator's error if there is one.
    pub fn into_validation(self) -> Option<V> {
        match self {
            TranslateError::Validation(err) => Some(err),
            _ => None,
        }
    }
}

/// Errors produced by the bundled readers
#[derive(Error, Debug)]
pub enum ReadError {
    /// IO error opening or reading the source
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV row
    #[error("CSV row {row}: {source}")]
    Csv {
        row: u64,
        #[source]
        source: csv::Error,
    },

    /// A line could not be read (for example invalid UTF-8)
    #[error("line {line}: {source}")]
    Line {
        line: u64,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON line
    #[error("JSON line {line}: {source}")]
    Json {
        line: u64,
        #[source]
        source: serde_json::Error,
    },

    /// A cell could not be decoded into its field
    #[error("row {row}: invalid {field} {value:?}: {reason}")]
    InvalidField {
        row: u64,
        field: &'static str,
        value: String,
        reason: String,
    },
}

/// Errors produced by the bundled writers
#[derive(Error, Debug)]
pub enum WriteError {
    /// IO error writing to the destination
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding failed
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding failed
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}
