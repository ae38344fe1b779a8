mod cli;

use std::process::ExitCode;

use bookorder_core::kernel;
use bookorder_core::{BundledResources, LocalResourceProvider, ResourceProvider};
use clap::Parser;
use log::info;

use cli::CliArgs;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    if let Err(e) = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let resources: Box<dyn ResourceProvider> = match &args.resources {
        Some(dir) => {
            info!("Reading resources from {}", dir.display());
            Box::new(LocalResourceProvider::new(dir.clone()))
        }
        None => Box::new(BundledResources::sample()),
    };

    let options = args.bootstrap_options();
    println!(
        "Publishing '{}' to '{}' ({} resources)",
        options.document.display(),
        options.channel,
        resources.name()
    );

    match kernel::run(&*resources, &options).await {
        Ok(report) => {
            println!(
                "Published message {} with root {} to '{}': {}",
                report.receipt.message_id, report.root, report.receipt.channel, report.receipt.delivery
            );
            println!("Registry closed ({} channel(s) stopped)", report.channels_closed);
            ExitCode::SUCCESS
        }
        Err(e) => {
            // Every error level already renders its source in its message.
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
