use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use uuid::Uuid;

use crate::channel::{Delivery, Message, MessageChannel};
use crate::document::{OrderDocument, QName, parse_document};
use crate::kernel::constants;
use crate::kernel::error::{Error, KernelLifecyclePhase, Result};
use crate::kernel::registry::ChannelRegistry;
use crate::storage::{ResourceProvider, load_registry_config};

/// What to load and where to send it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapOptions {
    pub config: String,
    pub document: PathBuf,
    pub channel: String,
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self {
            config: constants::DEFAULT_CONFIG_RESOURCE.to_string(),
            document: PathBuf::from(constants::DEFAULT_ORDER_RESOURCE),
            channel: constants::DEFAULT_CHANNEL_NAME.to_string(),
        }
    }
}

/// Owns the channel registry for the duration of one run.
///
/// The registry is closed by [`shutdown`], or on drop if the context is
/// abandoned on an error path. It is never closed twice.
#[derive(Debug)]
pub struct ApplicationContext {
    registry: ChannelRegistry,
    published: AtomicBool,
}

impl ApplicationContext {
    pub fn new(registry: ChannelRegistry) -> Self {
        Self {
            registry,
            published: AtomicBool::new(false),
        }
    }

    pub fn registry(&self) -> &ChannelRegistry {
        &self.registry
    }

    pub fn has_published(&self) -> bool {
        self.published.load(Ordering::SeqCst)
    }
}

impl Drop for ApplicationContext {
    fn drop(&mut self) {
        let stopped = self.registry.close();
        if stopped > 0 {
            log::warn!("Application context dropped without shutdown; closed {} channel(s)", stopped);
        }
    }
}

/// Result of a successful publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    pub message_id: Uuid,
    pub channel: String,
    pub delivery: Delivery,
}

/// Summary of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub root: QName,
    pub receipt: PublishReceipt,
    pub channels_closed: usize,
}

/// Build the channel registry from the named configuration resource.
pub fn initialize(resources: &dyn ResourceProvider, config_name: &str) -> Result<ApplicationContext> {
    log::info!("Initializing {} v{}", constants::APP_NAME, constants::APP_VERSION);
    let config = load_registry_config(resources, config_name)?;
    let registry = ChannelRegistry::from_config(&config)?;
    log::info!(
        "Loaded {} channel(s) from '{}': {}",
        registry.len(),
        config_name,
        registry.names().join(", ")
    );
    Ok(ApplicationContext::new(registry))
}

/// Open `path` as a byte stream and parse it as a namespace-aware document.
pub fn load_document(resources: &dyn ResourceProvider, path: &Path) -> Result<OrderDocument> {
    let reader = resources.open_read(path).map_err(Error::from_storage)?;
    let document = parse_document(reader)?;
    log::info!(
        "Loaded order document '{}' with root {}",
        path.display(),
        document.root_name()
    );
    Ok(document)
}

/// Wrap `document` in a message and send it once to the named channel.
pub async fn publish(
    context: &ApplicationContext,
    channel_name: &str,
    document: OrderDocument,
    source: &Path,
) -> Result<PublishReceipt> {
    if context.published.swap(true, Ordering::SeqCst) {
        return Err(Error::KernelLifecycle {
            phase: KernelLifecyclePhase::Publish,
            message: "the order document has already been published".to_string(),
        });
    }

    let channel: Arc<dyn MessageChannel> = context.registry.resolve(channel_name)?;
    let message = Message::new(document)
        .with_header(constants::SOURCE_HEADER, source.display().to_string());
    let message_id = message.id();

    log::info!("Sending message {} to '{}'", message_id, channel_name);
    let delivery = channel.send(Arc::new(message)).await?;
    log::info!("Message {} {}", message_id, delivery);

    Ok(PublishReceipt {
        message_id,
        channel: channel_name.to_string(),
        delivery,
    })
}

/// Close the registry, stopping every channel. Returns the number of channels stopped.
pub fn shutdown(context: ApplicationContext) -> usize {
    log::info!("Shutting down...");
    let stopped = context.registry.close();
    log::info!("Closed {} channel(s)", stopped);
    stopped
}

/// Load, publish and shut down against an initialized context.
///
/// The context is shut down on every path; the first error is returned after that.
pub async fn execute(
    context: ApplicationContext,
    resources: &dyn ResourceProvider,
    options: &BootstrapOptions,
) -> Result<RunReport> {
    let outcome = async {
        let document = load_document(resources, &options.document)?;
        let root = document.root_name().clone();
        let receipt = publish(&context, &options.channel, document, &options.document).await?;
        Ok::<_, Error>((root, receipt))
    }
    .await;

    let channels_closed = shutdown(context);

    match outcome {
        Ok((root, receipt)) => Ok(RunReport {
            root,
            receipt,
            channels_closed,
        }),
        Err(e) => {
            log::error!("Run failed during {}: {}", e.phase(), e);
            Err(e)
        }
    }
}

/// The full sequence: initialize, load, publish, shut down.
pub async fn run(resources: &dyn ResourceProvider, options: &BootstrapOptions) -> Result<RunReport> {
    let context = initialize(resources, &options.config).inspect_err(|e| {
        log::error!("Run failed during {}: {}", e.phase(), e);
    })?;
    execute(context, resources, options).await
}
