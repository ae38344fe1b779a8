//! # Bookorder Kernel
//!
//! The `kernel` module drives a run of the sample: it builds the channel
//! registry from configuration, loads the order document, publishes it once
//! and releases the registry.
//!
//! ## Key Responsibilities & Components:
//!
//! - **Bootstrap**: [`initialize`](bootstrap::initialize),
//!   [`load_document`](bootstrap::load_document), [`publish`](bootstrap::publish),
//!   [`shutdown`](bootstrap::shutdown) and the combined [`run`](bootstrap::run).
//!   The registry lives inside an [`ApplicationContext`](bootstrap::ApplicationContext)
//!   that is passed by reference and closes the registry on drop.
//! - **Channel Registry**: [`ChannelRegistry`](registry::ChannelRegistry) resolves
//!   channels by name, with a typed lookup that reports wrong-kind requests
//!   as [`RegistryError::TypeMismatch`](registry::RegistryError::TypeMismatch).
//! - **Core Constants**: default resource names and channel names in `constants`.
//! - **Error Handling**: the aggregated [`Error`](error::Error) and `Result` alias.
pub mod bootstrap;
pub mod constants;
pub mod error;
pub mod registry;

pub use bootstrap::{
    ApplicationContext, BootstrapOptions, PublishReceipt, RunReport, execute, initialize,
    load_document, publish, run, shutdown,
};
pub use error::{Error, KernelLifecyclePhase, Result};
pub use registry::{ChannelRegistry, RegistryError};

// Test module declaration
#[cfg(test)]
mod tests;
