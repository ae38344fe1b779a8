//! # Bookorder Storage Errors
//!
//! Error types for resource access ([`StorageSystemError`]) and for loading
//! the registry configuration ([`ConfigError`]).
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageSystemError {
    #[error("I/O error during operation '{operation}' on path '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found at path: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Invalid path provided: '{}': {reason}", path.display())]
    InvalidPath { path: PathBuf, reason: String },
}

// Helper for creating Io errors, ensuring path is always included.
impl StorageSystemError {
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            return StorageSystemError::FileNotFound(path);
        }
        StorageSystemError::Io {
            source,
            operation: operation.into(),
            path,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration resource '{}' could not be read: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: StorageSystemError,
    },

    #[error("Unsupported configuration format: {0}")]
    UnsupportedConfigFormat(String),

    #[error("Deserialization from '{format}' failed: {source}")]
    DeserializationError {
        format: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Invalid channel definition '{channel}': {reason}")]
    InvalidChannel { channel: String, reason: String },

    #[error("Channel '{0}' is defined more than once")]
    DuplicateChannel(String),
}
