pub mod channel;
pub mod document;
pub mod kernel;
pub mod storage;

// Re-export key public types for the binary
pub use channel::{Message, MessageChannel, OrderMessage};
pub use document::OrderDocument;
pub use kernel::error::Error as KernelError;
pub use kernel::{ApplicationContext, BootstrapOptions, ChannelRegistry, RunReport};
pub use storage::{BundledResources, LocalResourceProvider, ResourceProvider};
