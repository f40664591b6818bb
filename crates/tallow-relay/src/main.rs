//! Tallow relay server

mod config;
mod error;
mod rate_limit;
mod room;
mod server;
mod websocket;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use config::RelayConfig;
use server::RelayServer;

#[derive(Parser)]
#[command(name = "tallow-relay")]
#[command(about = "Tallow relay server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the relay server
    Serve {
        /// Bind address, overrides the config file's `bind_addr`
        #[arg(short, long)]
        addr: Option<String>,

        /// Path to a TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<RelayConfig> {
    let mut cfg = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)?;
            RelayConfig::from_toml_str(&raw)?
        }
        None => RelayConfig::default(),
    };
    cfg.validate();
    Ok(cfg)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { addr, config } => {
            let mut cfg = load_config(config)?;
            if let Some(addr) = addr {
                cfg.bind_addr = addr;
            }
            RelayServer::new(cfg).run().await
        }
    }
}
