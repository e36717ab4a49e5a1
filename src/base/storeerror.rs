use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum StoreError {
    // Persistence Errors
    #[error("Cookie file IO failed for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: Arc<io::Error>,
    },
    #[error("Cookie data is not valid JSON: {message}")]
    InvalidData { message: String },

    // Input Errors
    #[error("Invalid domain identifier: {0:?}")]
    InvalidDomain(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl StoreError {
    /// Wrap an IO error with the file it was raised for.
    pub fn io_at(path: impl AsRef<Path>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.as_ref().to_path_buf(),
            source: Arc::new(source),
        }
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        StoreError::InvalidData {
            message: message.into(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        StoreError::InvalidConfig(message.into())
    }

    /// Whether the error came from the filesystem rather than from the data.
    pub fn is_io(&self) -> bool {
        matches!(self, StoreError::Io { .. })
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::invalid_data(err.to_string())
    }
}
