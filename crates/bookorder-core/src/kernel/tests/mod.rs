
#[cfg(test)]
pub(crate) mod support {
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::channel::error::{ChannelError, ChannelResult};
    use crate::channel::{Delivery, MessageChannel, OrderMessage};
    use crate::storage::config::ChannelKind;

    /// Channel that counts sends and stops and remembers the last payload
    #[derive(Debug, Default)]
    pub struct RecordingChannel {
        pub fail: bool,
        pub sends: AtomicUsize,
        pub stops: AtomicUsize,
        pub last: Mutex<Option<Arc<OrderMessage>>>,
    }

    impl RecordingChannel {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub fn sends(&self) -> usize {
            self.sends.load(Ordering::SeqCst)
        }

        pub fn stops(&self) -> usize {
            self.stops.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MessageChannel for RecordingChannel {
        fn name(&self) -> &str {
            "recording"
        }

        fn kind(&self) -> ChannelKind {
            ChannelKind::Direct
        }

        async fn send(&self, message: Arc<OrderMessage>) -> ChannelResult<Delivery> {
            self.sends.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(message);
            if self.fail {
                return Err(ChannelError::HandlerFailed {
                    channel: "recording".to_string(),
                    handler: "recorder".to_string(),
                    reason: "rejected".to_string(),
                });
            }
            Ok(Delivery::Dispatched { subscribers: 1 })
        }

        fn stop(&self) {
            self.stops.fetch_add(1, Ordering::SeqCst);
        }

        fn is_stopped(&self) -> bool {
            self.stops() > 0
        }
    }
}
