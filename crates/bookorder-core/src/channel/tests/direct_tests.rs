use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, OnceLock, Weak};

use async_trait::async_trait;

use crate::channel::error::ChannelError;
use crate::channel::handler::{LoggingHandler, MessageHandler, SubscriberId, handler_from_definition, sync_handler};
use crate::channel::tests::order_message;
use crate::channel::{DirectChannel, Delivery, MessageChannel, OrderMessage};
use crate::storage::config::{ChannelKind, LogLevel, SubscriberDefinition};

#[tokio::test]
async fn test_dispatch_in_registration_order() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let first = seen.clone();
    let second = seen.clone();

    let channel = DirectChannel::new("orders");
    channel
        .subscribe(sync_handler("first", move |_| {
            first.lock().unwrap().push("first");
            Ok(())
        }))
        .await;
    channel
        .subscribe(sync_handler("second", move |_| {
            second.lock().unwrap().push("second");
            Ok(())
        }))
        .await;

    let delivery = channel.send(order_message()).await.expect("send should succeed");

    assert_eq!(delivery, Delivery::Dispatched { subscribers: 2 });
    assert_eq!(*seen.lock().unwrap(), vec!["first", "second"]);
    assert_eq!(channel.kind(), ChannelKind::Direct);
}

#[tokio::test]
async fn test_payload_reaches_subscriber_intact() {
    let root = Arc::new(Mutex::new(None));
    let root_clone = root.clone();
    let channel = DirectChannel::with_subscribers(
        "orders",
        vec![sync_handler("capture", move |message| {
            *root_clone.lock().unwrap() = Some(message.payload().root_name().local.clone());
            Ok(())
        })],
    );

    channel.send(order_message()).await.expect("send should succeed");
    assert_eq!(root.lock().unwrap().as_deref(), Some("order"));
}

#[tokio::test]
async fn test_no_subscribers_is_an_error() {
    let channel = DirectChannel::new("orders");
    match channel.send(order_message()).await {
        Err(ChannelError::NoSubscribers { channel }) => assert_eq!(channel, "orders"),
        other => panic!("Expected NoSubscribers, got {:?}", other),
    }
}

#[tokio::test]
async fn test_failing_subscriber_stops_dispatch() {
    let later_calls = Arc::new(AtomicU32::new(0));
    let later = later_calls.clone();
    let channel = DirectChannel::with_subscribers(
        "orders",
        vec![
            sync_handler("reject", |_| Err("out of stock".to_string())),
            sync_handler("later", move |_| {
                later.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
        ],
    );

    match channel.send(order_message()).await {
        Err(ChannelError::HandlerFailed { handler, reason, .. }) => {
            assert_eq!(handler, "reject");
            assert_eq!(reason, "out of stock");
        }
        other => panic!("Expected HandlerFailed, got {:?}", other),
    }
    assert_eq!(later_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unsubscribe() {
    let channel = DirectChannel::new("orders");
    let id = channel.subscribe(Box::new(LoggingHandler::default())).await;
    assert_eq!(channel.subscriber_count().await, 1);

    assert!(channel.unsubscribe(id).await);
    assert!(!channel.unsubscribe(id).await);
    assert_eq!(channel.subscriber_count().await, 0);
}

#[tokio::test]
async fn test_send_after_stop_is_rejected() {
    let channel = DirectChannel::with_subscribers("orders", vec![Box::new(LoggingHandler::default())]);
    channel.stop();
    channel.stop();

    assert!(channel.is_stopped());
    assert_eq!(channel.subscriber_count().await, 0);
    assert!(matches!(channel.send(order_message()).await, Err(ChannelError::Closed { .. })));
}

#[tokio::test]
async fn test_logging_handler_from_definition() {
    let handler = handler_from_definition(&SubscriberDefinition::Log { level: LogLevel::Debug });
    assert_eq!(handler.name(), "log");
    assert!(handler.handle("orders", &order_message()).await.is_ok());
}

// Replaces itself with a logging subscriber the first time it sees a message
#[derive(Debug)]
struct HandOffHandler {
    target: Arc<OnceLock<(Weak<DirectChannel>, SubscriberId)>>,
}

#[async_trait]
impl MessageHandler for HandOffHandler {
    fn name(&self) -> &str {
        "hand-off"
    }

    async fn handle(&self, _channel: &str, _message: &OrderMessage) -> Result<(), String> {
        let (channel, id) = self.target.get().ok_or("handler not attached")?;
        let channel = channel.upgrade().ok_or("channel dropped")?;
        channel.unsubscribe(*id).await;
        channel.subscribe(Box::new(LoggingHandler::default())).await;
        Ok(())
    }
}

#[tokio::test]
async fn test_subscriber_can_change_subscriptions_during_dispatch() {
    let target = Arc::new(OnceLock::new());
    let channel = Arc::new(DirectChannel::new("orders"));
    let id = channel
        .subscribe(Box::new(HandOffHandler { target: target.clone() }))
        .await;
    target
        .set((Arc::downgrade(&channel), id))
        .expect("target should be set once");

    let delivery = channel.send(order_message()).await.expect("send should succeed");
    assert_eq!(delivery, Delivery::Dispatched { subscribers: 1 });
    assert_eq!(channel.subscriber_count().await, 1);
    assert!(!channel.unsubscribe(id).await);

    // The replacement logger receives the next message
    let delivery = channel.send(order_message()).await.expect("second send should succeed");
    assert_eq!(delivery, Delivery::Dispatched { subscribers: 1 });
}
