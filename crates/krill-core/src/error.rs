//! Error types for configuration and input handling.
//!
//! The integration itself is total and never fails; these errors only come
//! from loading, parsing and pre-checking parameters.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid value for {field}: {reason}")]
    Parse { field: String, reason: String },

    #[error("Other error: {0}")]
    Other(String),
}

impl Error {
    pub fn parse(field: impl Into<String>, reason: impl ToString) -> Self {
        Error::Parse {
            field: field.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
