use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::kernel::constants;
use crate::storage::error::ConfigError;
use crate::storage::provider::ResourceProvider;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                #[cfg(feature = "toml-config")]
                "toml" => Some(ConfigFormat::Toml),
                _ => None,
            })
    }
}

/// Kind of channel a definition creates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    /// Dispatches each message to its subscribers on the sending task
    #[default]
    Direct,
    /// Buffers messages until they are received
    Queue,
}

impl std::fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelKind::Direct => write!(f, "direct"),
            ChannelKind::Queue => write!(f, "queue"),
        }
    }
}

/// Log level for the `log` subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// A subscriber attached to a direct channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SubscriberDefinition {
    /// Logs a summary of every message it receives
    Log {
        #[serde(default)]
        level: LogLevel,
    },
}

/// One named channel in the registry configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelDefinition {
    pub name: String,
    #[serde(default)]
    pub kind: ChannelKind,
    /// Queue capacity; ignored for direct channels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,
    #[serde(default)]
    pub subscribers: Vec<SubscriberDefinition>,
}

impl ChannelDefinition {
    pub fn direct(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ChannelKind::Direct,
            capacity: None,
            subscribers: Vec::new(),
        }
    }

    pub fn queue(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            kind: ChannelKind::Queue,
            capacity: Some(capacity),
            subscribers: Vec::new(),
        }
    }

    pub fn with_subscriber(mut self, subscriber: SubscriberDefinition) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    /// Effective queue capacity
    pub fn queue_capacity(&self) -> usize {
        self.capacity.unwrap_or(constants::DEFAULT_QUEUE_CAPACITY)
    }
}

/// Registry configuration: the set of channels to create at startup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub channels: Vec<ChannelDefinition>,
}

impl RegistryConfig {
    /// Deserialize from string based on format
    pub fn deserialize(data: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        match format {
            ConfigFormat::Json => serde_json::from_str(data).map_err(|e| ConfigError::DeserializationError {
                format: "JSON".to_string(),
                source: Box::new(e),
            }),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::from_str(data).map_err(|e| ConfigError::DeserializationError {
                format: "YAML".to_string(),
                source: Box::new(e),
            }),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::from_str(data).map_err(|e| ConfigError::DeserializationError {
                format: "TOML".to_string(),
                source: Box::new(e),
            }),
        }
    }

    /// Check names are present and unique and queue capacities are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for channel in &self.channels {
            if channel.name.trim().is_empty() {
                return Err(ConfigError::InvalidChannel {
                    channel: channel.name.clone(),
                    reason: "channel name must not be empty".to_string(),
                });
            }
            if !seen.insert(channel.name.as_str()) {
                return Err(ConfigError::DuplicateChannel(channel.name.clone()));
            }
            match channel.kind {
                ChannelKind::Queue if channel.queue_capacity() == 0 => {
                    return Err(ConfigError::InvalidChannel {
                        channel: channel.name.clone(),
                        reason: "queue capacity must be greater than zero".to_string(),
                    });
                }
                ChannelKind::Queue if !channel.subscribers.is_empty() => {
                    return Err(ConfigError::InvalidChannel {
                        channel: channel.name.clone(),
                        reason: "queue channels do not take subscribers".to_string(),
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }

    pub fn channel(&self, name: &str) -> Option<&ChannelDefinition> {
        self.channels.iter().find(|c| c.name == name)
    }
}

/// Read, parse and validate the registry configuration named `name`.
pub fn load_registry_config(
    provider: &dyn ResourceProvider,
    name: &str,
) -> Result<RegistryConfig, ConfigError> {
    let path = Path::new(name);
    let format = ConfigFormat::from_path(path)
        .ok_or_else(|| ConfigError::UnsupportedConfigFormat(name.to_string()))?;

    let data = provider
        .read_to_string(path)
        .map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

    let config = RegistryConfig::deserialize(&data, format)?;
    config.validate()?;
    log::debug!(
        "Loaded registry configuration '{}' from {} provider ({} channels)",
        name,
        provider.name(),
        config.channels.len()
    );
    Ok(config)
}
