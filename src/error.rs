use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
/// Errors raised while configuring or running a CSV write.
pub enum CsvError {
    /// Invalid delimiter / line terminator combination, raised by the builder.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// A required argument of a write call is missing or empty.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A field value could not be read from a record.
    #[error("Unable to read field '{field}': {reason}")]
    Access { field: String, reason: String },

    /// The sink rejected a write or a flush.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
