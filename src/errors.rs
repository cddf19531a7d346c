// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TriggerError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Cannot access file {path:?}: {reason}")]
    AccessError { path: PathBuf, reason: String },

    #[error("Invalid regular expression: {0}")]
    PatternError(#[from] regex::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("File watch error: {0}")]
    WatchError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TriggerError {
    /// Process exit status for this error.
    ///
    /// Startup problems (bad input, unreadable file) exit with 2, like the
    /// usage path; anything that fails after the watch is running exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            TriggerError::ConfigError(_)
            | TriggerError::AccessError { .. }
            | TriggerError::PatternError(_)
            | TriggerError::TomlError(_) => 2,
            _ => 1,
        }
    }

    /// Whether `main` should print the usage line along with the error.
    pub fn wants_usage(&self) -> bool {
        matches!(
            self,
            TriggerError::ConfigError(_)
                | TriggerError::PatternError(_)
                | TriggerError::TomlError(_)
        )
    }
}

impl From<notify::Error> for TriggerError {
    fn from(err: notify::Error) -> Self {
        TriggerError::WatchError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TriggerError>;
