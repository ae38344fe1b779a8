pub mod direct;
pub mod error;
pub mod handler;
pub mod queue;

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use uuid::Uuid;

use crate::document::OrderDocument;
use crate::storage::config::ChannelKind;

/// Metadata assigned to a message when it is created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHeaders {
    id: Uuid,
    timestamp: u64,
    extra: BTreeMap<String, String>,
}

impl MessageHeaders {
    fn generate() -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self {
            id: Uuid::new_v4(),
            timestamp,
            extra: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Creation time in milliseconds since the Unix epoch
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.extra.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Envelope pairing a payload with its headers
#[derive(Debug, Clone, PartialEq)]
pub struct Message<T> {
    headers: MessageHeaders,
    payload: T,
}

impl<T> Message<T> {
    pub fn new(payload: T) -> Self {
        Self {
            headers: MessageHeaders::generate(),
            payload,
        }
    }

    /// Attach a custom header. `id` and `timestamp` are fixed at creation.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.extra.insert(key.into(), value.into());
        self
    }

    pub fn headers(&self) -> &MessageHeaders {
        &self.headers
    }

    pub fn id(&self) -> Uuid {
        self.headers.id
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn into_payload(self) -> T {
        self.payload
    }
}

/// The message type carried by the order channels
pub type OrderMessage = Message<OrderDocument>;

/// Outcome of a successful send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Handed synchronously to this many subscribers
    Dispatched { subscribers: usize },
    /// Buffered; `depth` is the queue length after the send
    Queued { depth: usize },
}

impl fmt::Display for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delivery::Dispatched { subscribers } => write!(f, "dispatched to {} subscriber(s)", subscribers),
            Delivery::Queued { depth } => write!(f, "queued (depth {})", depth),
        }
    }
}

/// A named destination for order messages
#[async_trait]
pub trait MessageChannel: Any + Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    fn kind(&self) -> ChannelKind;

    /// Concrete type name, reported on typed-lookup mismatches
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    async fn send(&self, message: Arc<OrderMessage>) -> error::ChannelResult<Delivery>;

    /// Stop accepting messages and release held resources. Idempotent.
    fn stop(&self);

    fn is_stopped(&self) -> bool;
}

/// Re-export important types
pub use direct::DirectChannel;
pub use error::{ChannelError, ChannelResult};
pub use handler::{LoggingHandler, MessageHandler, SubscriberId, sync_handler};
pub use queue::QueueChannel;

// Test module declaration
#[cfg(test)]
mod tests;
