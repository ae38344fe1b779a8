use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

use crate::channel::handler::handler_from_definition;
use crate::channel::{DirectChannel, MessageChannel, QueueChannel};
use crate::storage::config::{ChannelKind, RegistryConfig};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("No channel named '{name}' is registered (available: {})", available.join(", "))]
    ChannelNotFound { name: String, available: Vec<String> },

    #[error("Channel '{name}' is a {actual}, not a {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Channel '{0}' is already registered")]
    DuplicateChannel(String),

    #[error("Registry is closed")]
    Closed,
}

/// Named channels, created from configuration or registered directly.
#[derive(Debug, Default)]
pub struct ChannelRegistry {
    channels: BTreeMap<String, Arc<dyn MessageChannel>>,
    closed: AtomicBool,
}

impl ChannelRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create one channel per definition. The configuration is expected to be validated.
    pub fn from_config(config: &RegistryConfig) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for definition in &config.channels {
            match definition.kind {
                ChannelKind::Direct => {
                    let handlers = definition.subscribers.iter().map(handler_from_definition).collect();
                    registry.register(
                        definition.name.clone(),
                        Arc::new(DirectChannel::with_subscribers(definition.name.clone(), handlers)),
                    )?;
                }
                ChannelKind::Queue => {
                    registry.register(
                        definition.name.clone(),
                        Arc::new(QueueChannel::new(definition.name.clone(), definition.queue_capacity())),
                    )?;
                }
            }
            log::debug!("Registered {} channel '{}'", definition.kind, definition.name);
        }
        Ok(registry)
    }

    /// Register a channel instance under `name`.
    pub fn register<C>(&mut self, name: impl Into<String>, channel: Arc<C>) -> Result<(), RegistryError>
    where
        C: MessageChannel + 'static,
    {
        if self.is_closed() {
            return Err(RegistryError::Closed);
        }
        let name = name.into();
        if self.channels.contains_key(&name) {
            return Err(RegistryError::DuplicateChannel(name));
        }
        self.channels.insert(name, channel);
        Ok(())
    }

    /// Resolve a channel by name as a trait object.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn MessageChannel>, RegistryError> {
        if self.is_closed() {
            return Err(RegistryError::Closed);
        }
        self.channels
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::ChannelNotFound {
                name: name.to_string(),
                available: self.names(),
            })
    }

    /// Resolve a channel by name and concrete type C.
    pub fn channel<C: MessageChannel + 'static>(&self, name: &str) -> Result<Arc<C>, RegistryError> {
        let channel = self.resolve(name)?;
        let actual = channel.type_name();
        let any: Arc<dyn Any + Send + Sync> = channel;
        Arc::downcast::<C>(any).map_err(|_| RegistryError::TypeMismatch {
            name: name.to_string(),
            expected: std::any::type_name::<C>(),
            actual,
        })
    }

    pub fn names(&self) -> Vec<String> {
        self.channels.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Stop every channel. Returns how many were stopped; later calls stop nothing.
    pub fn close(&self) -> usize {
        if self.closed.swap(true, Ordering::SeqCst) {
            return 0;
        }
        for channel in self.channels.values() {
            channel.stop();
        }
        log::debug!("Closed registry with {} channel(s)", self.channels.len());
        self.channels.len()
    }
}
