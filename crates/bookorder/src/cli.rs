use std::path::PathBuf;

use bookorder_core::BootstrapOptions;
use bookorder_core::kernel::constants;
use clap::Parser;

/// Bookorder: load the sample book order and publish it to its channel
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Directory to read resources from instead of the bundled sample
    #[arg(long, value_name = "DIR")]
    pub resources: Option<PathBuf>,

    /// Registry configuration resource
    #[arg(long, default_value = constants::DEFAULT_CONFIG_RESOURCE)]
    pub config: String,

    /// Order document resource
    #[arg(long, default_value = constants::DEFAULT_ORDER_RESOURCE)]
    pub document: PathBuf,

    /// Channel to publish the order to
    #[arg(long, default_value = constants::DEFAULT_CHANNEL_NAME)]
    pub channel: String,
}

impl CliArgs {
    pub fn bootstrap_options(&self) -> BootstrapOptions {
        BootstrapOptions {
            config: self.config.clone(),
            document: self.document.clone(),
            channel: self.channel.clone(),
        }
    }
}
