//! hardware-translate: one-machine-at-a-time hardware inventory translation
//!
//! Reads hardware inventory records (`Machine`s) from a source, validates
//! each one and writes it to a destination until the source runs dry.
//!
//! ## Key Components
//!
//! - `translate` / `translate_all`: the single step and the batch loop
//! - `MachineReader`, `MachineValidator`, `MachineWriter`: collaborator traits
//! - `CsvReader`, `JsonLinesReader`: bundled sources
//! - `CsvWriter`, `JsonLinesWriter`, `Catalogue`: bundled destinations
//! - `DefaultMachineValidator`: registered assertions plus batch uniqueness
//!
//! End of input is `Ok(None)` from a reader and never an error. Read and
//! write failures are wrapped with their stage; validation failures reach
//! the caller as the validator produced them.

mod error;
pub mod fakes;
pub mod format;
mod machine;
pub mod obs;
pub mod reader;
pub mod telemetry;
pub mod traits;
mod translate;
pub mod validator;
pub mod writer;

pub use error::{BoxError, ReadError, TranslateError, WriteError};
pub use format::Format;
pub use machine::Machine;
pub use reader::{open_reader, CsvReader, DynReader, JsonLinesReader};
pub use telemetry::init_tracing;
pub use traits::{MachineReader, MachineValidator, MachineWriter};
pub use translate::{translate, translate_all, BatchId, Step, TranslateSummary};
pub use validator::{AcceptAll, DefaultMachineValidator, ValidationError};
pub use writer::{open_writer, Catalogue, CsvWriter, DynWriter, JsonLinesWriter};

/// hardware-translate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
