mod config;
mod error;
mod routes;
mod server;


use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use config::{AppConfig, LogFormat};
use ontid_common::LedgerClient;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ontid-driver",
    about = "DID resolver driver for the Ontology ledger",
    version
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!();
            eprintln!("Check the configuration file or specify one:");
            eprintln!("  ontid-driver --config <path>");
            std::process::exit(1);
        }
    };

    init_tracing(&config);

    info!("starting ontid driver, ledger={}", config.ledger.rpc_url);

    let ledger = match LedgerClient::new(
        &config.ledger.rpc_url,
        Duration::from_secs(config.ledger.request_timeout),
    ) {
        Ok(ledger) => ledger,
        Err(e) => {
            eprintln!("Error: failed to build the ledger client: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = server::run(config, Arc::new(ledger)).await {
        tracing::error!("server error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    match config.log.format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Text => subscriber.init(),
    }
}
