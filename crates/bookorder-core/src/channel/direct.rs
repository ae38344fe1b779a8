use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::channel::error::{ChannelError, ChannelResult};
use crate::channel::handler::{MessageHandler, SubscriberId};
use crate::channel::{Delivery, MessageChannel, OrderMessage};
use crate::storage::config::ChannelKind;

struct Subscribers {
    handlers: Vec<(SubscriberId, Arc<dyn MessageHandler>)>,
    next_id: SubscriberId,
}

impl Subscribers {
    fn add(&mut self, handler: Box<dyn MessageHandler>) -> SubscriberId {
        let id = self.next_id;
        self.next_id += 1;
        self.handlers.push((id, Arc::from(handler)));
        id
    }
}

/// Channel that hands every message to its subscribers, in registration
/// order, before `send` returns.
pub struct DirectChannel {
    name: String,
    subscribers: Mutex<Subscribers>,
    stopped: AtomicBool,
}

impl fmt::Debug for DirectChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectChannel")
            .field("name", &self.name)
            .field("stopped", &self.stopped.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl DirectChannel {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_subscribers(name, Vec::new())
    }

    pub fn with_subscribers(name: impl Into<String>, handlers: Vec<Box<dyn MessageHandler>>) -> Self {
        let mut subscribers = Subscribers {
            handlers: Vec::with_capacity(handlers.len()),
            next_id: 1,
        };
        for handler in handlers {
            subscribers.add(handler);
        }
        Self {
            name: name.into(),
            subscribers: Mutex::new(subscribers),
            stopped: AtomicBool::new(false),
        }
    }

    pub async fn subscribe(&self, handler: Box<dyn MessageHandler>) -> SubscriberId {
        self.subscribers.lock().await.add(handler)
    }

    pub async fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut subscribers = self.subscribers.lock().await;
        let len_before = subscribers.handlers.len();
        subscribers.handlers.retain(|(h_id, _)| *h_id != id);
        subscribers.handlers.len() < len_before
    }

    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.lock().await.handlers.len()
    }
}

#[async_trait]
impl MessageChannel for DirectChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ChannelKind {
        ChannelKind::Direct
    }

    async fn send(&self, message: Arc<OrderMessage>) -> ChannelResult<Delivery> {
        if self.is_stopped() {
            return Err(ChannelError::Closed { channel: self.name.clone() });
        }

        // Dispatch from a snapshot so handlers may subscribe or unsubscribe on this channel.
        let handlers: Vec<Arc<dyn MessageHandler>> = {
            let subscribers = self.subscribers.lock().await;
            subscribers.handlers.iter().map(|(_, handler)| Arc::clone(handler)).collect()
        };
        if handlers.is_empty() {
            return Err(ChannelError::NoSubscribers { channel: self.name.clone() });
        }

        for handler in &handlers {
            handler
                .handle(&self.name, &message)
                .await
                .map_err(|reason| ChannelError::HandlerFailed {
                    channel: self.name.clone(),
                    handler: handler.name().to_string(),
                    reason,
                })?;
        }
        Ok(Delivery::Dispatched {
            subscribers: handlers.len(),
        })
    }

    fn stop(&self) {
        if !self.stopped.swap(true, Ordering::SeqCst) {
            log::debug!("Stopping direct channel '{}'", self.name);
            // Nothing dispatches once the flag is set; a contended lock just defers the drop.
            if let Ok(mut subscribers) = self.subscribers.try_lock() {
                subscribers.handlers.clear();
            }
        }
    }

    fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}
