pub mod bundled;
pub mod config;
pub mod error;
pub mod local;
pub mod provider;

/// Re-export key types
pub use bundled::BundledResources;
pub use config::{
    ChannelDefinition, ChannelKind, ConfigFormat, LogLevel, RegistryConfig, SubscriberDefinition,
    load_registry_config,
};
pub use error::{ConfigError, StorageSystemError};
pub use local::LocalResourceProvider;
pub use provider::{ResourceProvider, StorageResult};

// Test module declaration
#[cfg(test)]
mod tests;
