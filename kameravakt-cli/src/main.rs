//! Kameravakt entrypoint: NVR camera fleet monitoring and alerting.

use clap::Parser;

use kameravakt_telemetry::EventLogger;

mod commands;

use commands::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    EventLogger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => commands::run_monitor(args).await,
        Commands::CheckConfig(args) => commands::check_config(args).await,
    }
}
