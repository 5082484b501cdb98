// src/error.rs

use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a control-panel field into a number.
///
/// Any of these aborts the whole generation call before anything is drawn.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("empty value: {field}")]
    Empty { field: &'static str },

    #[error("invalid number {value:?} in {field}: {source}")]
    Invalid {
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

impl FormError {
    pub fn field(&self) -> &'static str {
        match self {
            FormError::Empty { field } | FormError::Invalid { field, .. } => field,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
