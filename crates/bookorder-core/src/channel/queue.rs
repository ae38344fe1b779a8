use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::channel::error::{ChannelError, ChannelResult};
use crate::channel::{Delivery, MessageChannel, OrderMessage};
use crate::storage::config::ChannelKind;

/// Bounded FIFO channel; messages wait until [`QueueChannel::receive`] takes them.
#[derive(Debug)]
pub struct QueueChannel {
    name: String,
    capacity: usize,
    queue: Mutex<VecDeque<Arc<OrderMessage>>>,
    stopped: AtomicBool,
}

impl QueueChannel {
    pub fn new(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            capacity,
            queue: Mutex::new(VecDeque::new()),
            stopped: AtomicBool::new(false),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Take the oldest buffered message
    pub async fn receive(&self) -> Option<Arc<OrderMessage>> {
        self.queue.lock().await.pop_front()
    }

    pub async fn len(&self) -> usize {
        self.queue.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.queue.lock().await.is_empty()
    }
}

#[async_trait]
impl MessageChannel for QueueChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ChannelKind {
        ChannelKind::Queue
    }

    async fn send(&self, message: Arc<OrderMessage>) -> ChannelResult<Delivery> {
        if self.is_stopped() {
            return Err(ChannelError::Closed { channel: self.name.clone() });
        }

        let mut queue = self.queue.lock().await;
        if queue.len() >= self.capacity {
            return Err(ChannelError::QueueFull {
                channel: self.name.clone(),
                capacity: self.capacity,
            });
        }
        queue.push_back(message);
        Ok(Delivery::Queued { depth: queue.len() })
    }

    fn stop(&self) {
        if !self.stopped.swap(true, Ordering::SeqCst) {
            let Ok(mut queue) = self.queue.try_lock() else {
                log::warn!("Queue channel '{}' stopped while in use", self.name);
                return;
            };
            if !queue.is_empty() {
                log::warn!(
                    "Queue channel '{}' stopped with {} undelivered message(s)",
                    self.name,
                    queue.len()
                );
            }
            queue.clear();
        }
    }

    fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}
