//! # Bookorder Kernel Errors
//!
//! Defines the aggregated error type for the bootstrap loader.
//!
//! Each subsystem (storage, document, channel, registry) owns its own
//! `thiserror` enum; [`Error`] wraps them so the bootstrap sequence can
//! propagate any failure with `?` up to the process boundary.
use std::path::PathBuf;
use std::result::Result as StdResult;

use thiserror::Error as ThisError;

use crate::channel::error::ChannelError;
use crate::document::error::DocumentError;
use crate::kernel::registry::RegistryError;
use crate::storage::error::{ConfigError, StorageSystemError};

/// Error type for the bookorder kernel
#[derive(Debug, ThisError)]
pub enum Error {
    /// The registry configuration could not be read or was malformed.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The requested resource does not exist in the active resource source.
    #[error("Resource not found: {}", path.display())]
    ResourceNotFound { path: PathBuf },

    /// The order document could not be parsed.
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// A channel lookup failed.
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// The channel refused the message.
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    #[error("Storage system error: {0}")]
    Storage(#[from] StorageSystemError),

    /// Error occurring during a specific kernel lifecycle phase.
    #[error("Kernel lifecycle error during {phase}: {message}")]
    KernelLifecycle {
        phase: KernelLifecyclePhase,
        message: String,
    },
}

/// Represents a specific phase in the bootstrap sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum KernelLifecyclePhase {
    #[error("Initialize")]
    Initialize,
    #[error("LoadDocument")]
    LoadDocument,
    #[error("Publish")]
    Publish,
    #[error("Shutdown")]
    Shutdown,
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl Error {
    /// Map a storage failure to `ResourceNotFound` when it is one, leaving other failures intact.
    pub fn from_storage(err: StorageSystemError) -> Self {
        match err {
            StorageSystemError::FileNotFound(path) => Error::ResourceNotFound { path },
            other => Error::Storage(other),
        }
    }

    /// The lifecycle phase this error is attributed to.
    pub fn phase(&self) -> KernelLifecyclePhase {
        match self {
            Error::Configuration(_) => KernelLifecyclePhase::Initialize,
            Error::ResourceNotFound { .. } | Error::Document(_) | Error::Storage(_) => {
                KernelLifecyclePhase::LoadDocument
            }
            Error::Registry(_) | Error::Channel(_) => KernelLifecyclePhase::Publish,
            Error::KernelLifecycle { phase, .. } => *phase,
        }
    }
}
