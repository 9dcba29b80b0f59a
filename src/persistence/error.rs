//! Errors raised while loading or saving the state document

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Reading or writing the state file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The state file exists but isn't a valid document
    #[error("state file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The version field is present but isn't a non-negative integer
    #[error("state file {path} has an invalid schema version: {value}")]
    InvalidVersion { path: PathBuf, value: String },

    /// The state file was written by a newer version
    #[error("state file uses schema version {found}, this build supports up to {supported}")]
    UnsupportedVersion { found: u64, supported: u64 },

    #[error("failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

impl PersistenceError {
    /// Whether running `allerease reset` is the way out of this error
    pub fn needs_reset(&self) -> bool {
        matches!(
            self,
            PersistenceError::Corrupt { .. }
                | PersistenceError::InvalidVersion { .. }
                | PersistenceError::UnsupportedVersion { .. }
        )
    }
}
