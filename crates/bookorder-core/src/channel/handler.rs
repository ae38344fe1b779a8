use std::fmt;

use async_trait::async_trait;

use crate::channel::OrderMessage;
use crate::storage::config::{LogLevel, SubscriberDefinition};

/// Type for subscriber identifiers
pub type SubscriberId = u64;

/// Subscriber attached to a [`DirectChannel`](super::DirectChannel)
#[async_trait]
pub trait MessageHandler: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Handle one message; an `Err` aborts dispatch on the channel.
    async fn handle(&self, channel: &str, message: &OrderMessage) -> Result<(), String>;
}

/// Build the handler a subscriber definition describes.
pub fn handler_from_definition(definition: &SubscriberDefinition) -> Box<dyn MessageHandler> {
    match definition {
        SubscriberDefinition::Log { level } => Box::new(LoggingHandler::new(*level)),
    }
}

/// Logs a one-line summary of each message
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingHandler {
    level: LogLevel,
}

impl LoggingHandler {
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }
}

#[async_trait]
impl MessageHandler for LoggingHandler {
    fn name(&self) -> &str {
        "log"
    }

    async fn handle(&self, channel: &str, message: &OrderMessage) -> Result<(), String> {
        let root = message.payload().root();
        let level: log::Level = self.level.into();
        log::log!(
            level,
            "[{}] message {} root={} children={}",
            channel,
            message.id(),
            root.name(),
            root.elements().count()
        );
        Ok(())
    }
}

/// Handler backed by a synchronous closure
struct FnHandler<F> {
    name: String,
    f: F,
}

impl<F> fmt::Debug for FnHandler<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHandler").field("name", &self.name).finish_non_exhaustive()
    }
}

#[async_trait]
impl<F> MessageHandler for FnHandler<F>
where
    F: Fn(&OrderMessage) -> Result<(), String> + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, _channel: &str, message: &OrderMessage) -> Result<(), String> {
        (self.f)(message)
    }
}

/// Helper function to create handlers from synchronous closures
pub fn sync_handler<F>(name: impl Into<String>, f: F) -> Box<dyn MessageHandler>
where
    F: Fn(&OrderMessage) -> Result<(), String> + Send + Sync + 'static,
{
    Box::new(FnHandler { name: name.into(), f })
}
