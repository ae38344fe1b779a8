//! # Bookorder Channel Errors
//!
//! Defines [`ChannelError`], raised when a channel refuses or fails to deliver
//! a message.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Channel '{channel}' has no subscribers")]
    NoSubscribers { channel: String },

    #[error("Channel '{channel}' is full (capacity {capacity})")]
    QueueFull { channel: String, capacity: usize },

    #[error("Channel '{channel}' is closed")]
    Closed { channel: String },

    #[error("Subscriber '{handler}' on channel '{channel}' failed: {reason}")]
    HandlerFailed {
        channel: String,
        handler: String,
        reason: String,
    },
}

pub type ChannelResult<T> = std::result::Result<T, ChannelError>;
