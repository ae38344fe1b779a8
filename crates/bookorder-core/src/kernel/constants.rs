/// Application name
pub const APP_NAME: &str = "bookorder";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Registry configuration resource loaded at startup
pub const DEFAULT_CONFIG_RESOURCE: &str = "orderProcessingSample.toml";

/// The canonical order document
pub const DEFAULT_ORDER_RESOURCE: &str = "samples/xml/order.xml";

/// Channel the order document is published to
pub const DEFAULT_CHANNEL_NAME: &str = "ordersChannel";

/// Namespace of the sample order schema
pub const ORDERS_NAMESPACE: &str = "http://www.example.org/orders";

/// Capacity of a queue channel that does not declare one
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Header recording which resource a message payload was loaded from
pub const SOURCE_HEADER: &str = "source";
