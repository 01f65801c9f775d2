//! Bedrox CLI — entry point.
//!
//! # Commands
//!
//! - `bedrox serve` — start the HTTP server (models + invoke endpoints)
//! - `bedrox models` — print the model catalog
//! - `bedrox invoke -m MODEL PROMPT` — single-shot invocation
//! - `bedrox status` — show configuration and credential status

mod helpers;
mod invoke_cmd;
mod models_cmd;
mod serve;
mod status;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use bedrox_core::config::{load_config, Config};
use bedrox_providers::{BedrockClient, EnvCredentialResolver, InferenceGateway};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// 🪨 Bedrox — Bedrock model playground server
#[derive(Parser)]
#[command(name = "bedrox", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to a config file (default: ~/.bedrox/config.json)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// List the available models
    Models,

    /// Send one prompt to a model and print the result
    Invoke {
        /// Model identifier (see `bedrox models`)
        #[arg(short, long)]
        model: String,

        /// Prompt text
        prompt: String,

        /// Path to a config file (default: ~/.bedrox/config.json)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Show configuration and credential status
    Status {
        /// Path to a config file (default: ~/.bedrox/config.json)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            config,
            logs,
        } => {
            init_logging(logs, "info");
            helpers::load_env_file(None);
            let mut config = load_config(config.as_deref());
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve::run(config).await
        }
        Commands::Models => models_cmd::run(),
        Commands::Invoke {
            model,
            prompt,
            config,
            logs,
        } => {
            init_logging(logs, "warn");
            helpers::load_env_file(None);
            let config = load_config(config.as_deref());
            invoke_cmd::run(&config, &model, &prompt).await
        }
        Commands::Status { config } => {
            helpers::load_env_file(None);
            status::run(&load_config(config.as_deref()))
        }
    }
}

/// Build the inference gateway from the loaded configuration.
pub fn build_gateway(config: &Config) -> Result<InferenceGateway> {
    let client = BedrockClient::new(&config.bedrock).context("failed to create Bedrock client")?;
    let credentials = EnvCredentialResolver::new(config.bedrock.credential_env.clone());

    Ok(InferenceGateway::new(Arc::new(client), Arc::new(credentials)))
}

/// Initialize tracing/logging.
///
/// `--logs` forces debug output for bedrox crates; otherwise `RUST_LOG` wins
/// over the per-command default.
fn init_logging(verbose: bool, default_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("bedrox=debug,bedrox_core=debug,bedrox_providers=debug,bedrox_server=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
