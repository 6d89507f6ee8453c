//! Error types for plugd-config

use std::path::PathBuf;

/// Result type for plugd-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or decoding configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed document syntax, or a field of the wrong type
    #[error("Failed to parse {origin}: {message}")]
    Parse { origin: String, message: String },

    /// Bad wildcard syntax in an `imports` entry
    #[error("Invalid import pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// A path could not be resolved during import resolution
    #[error("Cannot resolve path {path}: {message}")]
    Path { path: PathBuf, message: String },

    /// A plugin section does not have the shape the target expects
    #[error("Failed to decode plugin section {key:?}: {message}")]
    Decode { key: String, message: String },

    /// A document could not be read
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration violates a schema rule
    #[error("Invalid configuration: {message}")]
    Validation { message: String },
}

impl From<plugd_fs::Error> for Error {
    fn from(err: plugd_fs::Error) -> Self {
        match err {
            plugd_fs::Error::Io { path, source } => Self::Io { path, source },
            plugd_fs::Error::InvalidPattern { pattern, message } => {
                Self::InvalidPattern { pattern, message }
            }
            plugd_fs::Error::Path { path, message } => Self::Path { path, message },
        }
    }
}
