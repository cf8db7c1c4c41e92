//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`NotFound`] thrown when no stored expense has the requested id.
//! - [`Export`] thrown when the CSV projection cannot be rendered.
//!
//!  [`NotFound`]: EngineError::NotFound
//!  [`Export`]: EngineError::Export
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("Expense \"{0}\" not found")]
    NotFound(String),
    #[error("Export failed: {0}")]
    Export(String),
}

impl From<csv::Error> for EngineError {
    fn from(value: csv::Error) -> Self {
        Self::Export(value.to_string())
    }
}
