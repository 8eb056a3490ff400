//! Error types for KineLab
//!
//! The engine itself never fails: reaching the end of the track or seeing a
//! non-finite value are state transitions. These errors cover the edges of the
//! library, loading lab files and looking up problems.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to load or validate a lab configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid lab file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid value for `{field}`: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}

/// Failure to look up a problem from the fixed problem set
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("no problem with id {0}")]
    UnknownProblem(u32),
}
