use std::path::PathBuf;

use thiserror::Error;

/// Error types for bundle extraction
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Cannot read data directory {}: {source}", path.display())]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read bundle file {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in bundle file {}: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown resource type: {0}")]
    UnknownResourceType(String),
}

impl CoreError {
    /// Create a new DataDir error
    pub fn data_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DataDir {
            path: path.into(),
            source,
        }
    }

    /// Create a new ReadFile error
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a new InvalidJson error
    pub fn invalid_json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::InvalidJson {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
