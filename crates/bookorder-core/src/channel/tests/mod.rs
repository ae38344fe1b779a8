// Channel test module
#[cfg(test)]
mod direct_tests;

#[cfg(test)]
pub(crate) fn order_message() -> std::sync::Arc<crate::channel::OrderMessage> {
    let doc = crate::document::parse_str(
        r#"<o:order xmlns:o="http://www.example.org/orders"><o:orderItem/><o:orderItem/></o:order>"#,
    )
    .expect("test order should parse");
    std::sync::Arc::new(crate::channel::Message::new(doc))
}

#[cfg(test)]
mod tests {
    use crate::channel::{Delivery, Message};

    #[test]
    fn test_messages_get_distinct_ids() {
        let a = Message::new(1u32);
        let b = Message::new(1u32);
        assert_ne!(a.id(), b.id());
        assert!(a.headers().timestamp() > 0);
    }

    #[test]
    fn test_custom_headers() {
        let message = Message::new("payload")
            .with_header("source", "samples/xml/order.xml")
            .with_header("kind", "order");
        assert_eq!(message.headers().get("source"), Some("samples/xml/order.xml"));
        assert_eq!(message.headers().get("missing"), None);
        let keys: Vec<_> = message.headers().iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["kind", "source"]);
        assert_eq!(message.into_payload(), "payload");
    }

    #[test]
    fn test_delivery_display() {
        assert_eq!(Delivery::Dispatched { subscribers: 2 }.to_string(), "dispatched to 2 subscriber(s)");
        assert_eq!(Delivery::Queued { depth: 1 }.to_string(), "queued (depth 1)");
    }
}
