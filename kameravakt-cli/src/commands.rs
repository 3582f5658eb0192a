use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::info;

use kameravakt_config::{ConfigError, KameravaktConfig};
use kameravakt_core::shutdown::shutdown_channel;
use kameravakt_engine::MonitorRuntime;
use kameravakt_notify::{MailNotifier, MailSettings};
use kameravakt_presence::PingProbe;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Monitor the configured cameras and hosts until interrupted
    Run(ConfigArgs),
    /// Load and validate the configuration, then exit
    CheckConfig(ConfigArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Configuration file (default: config/kameravakt.yaml + environment)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

fn load_config(args: &ConfigArgs) -> Result<KameravaktConfig, ConfigError> {
    match &args.config {
        Some(path) => KameravaktConfig::load_from_path(path),
        None => KameravaktConfig::load(),
    }
}

pub async fn run_monitor(
    args: ConfigArgs,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // The sole fatal path: without valid configuration there is nothing
    // to monitor.
    let config = load_config(&args)?;

    let notifier = Arc::new(MailNotifier::new(MailSettings {
        from: config.mail.from.clone(),
        to: config.mail.to.clone(),
        server: config.mail.server.clone(),
        port: config.mail.port,
        username: config.mail.username.clone(),
        password: config.mail.password.clone(),
    })?);

    let runtime = MonitorRuntime::new(config, notifier, Arc::new(PingProbe));
    let (handle, shutdown) = shutdown_channel();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, shutting down");
            handle.signal();
        }
    });

    runtime.run(shutdown).await;
    Ok(())
}

pub async fn check_config(
    args: ConfigArgs,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = load_config(&args)?;
    println!(
        "configuration OK: {} cameras, {} hosts, {} recipients",
        config.cameras.len(),
        config.hosts.len(),
        config.mail.to.len()
    );
    Ok(())
}
