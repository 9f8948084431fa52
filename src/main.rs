mod config;
mod model;
mod server;
mod store;
mod web;

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use config::{Config, LogConfig};
use server::Server;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Supermarket produce inventory service
#[derive(Debug, Parser)]
#[command(name = "supermarket", version)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listening address, overrides `server_addr`
    #[arg(long)]
    addr: Option<String>,

    /// Log filter directive, overrides `log.level`
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(addr) = &self.addr {
            config.server_addr = addr.clone();
        }
        if let Some(level) = &self.log_level {
            config.log.level = level.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(log: &LogConfig) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true);

    match &log.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file '{}'", path))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.init(),
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down gracefully");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = args.load_config()?;

    init_tracing(&config.log)?;

    info!("Starting supermarket produce service");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let server = Server::start(&config)
        .await
        .with_context(|| format!("failed to bind {}", config.server_addr))?;
    info!("Server listening on: {}", server.local_addr());

    server.run(shutdown_signal()).await?;

    Ok(())
}
