//! `bedrox serve` — start the HTTP server.
//!
//! Startup sequence:
//! 1. Build the Bedrock client and inference gateway
//! 2. Check the credential (warn only; the server still starts)
//! 3. Bind and serve until Ctrl+C

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::{info, warn};

use bedrox_core::catalog::MODELS;
use bedrox_core::config::Config;
use bedrox_server::AppState;

use crate::helpers;

/// Run the server with an already-resolved configuration.
pub async fn run(config: Config) -> Result<()> {
    helpers::print_banner();

    let gateway = crate::build_gateway(&config)?;

    if !gateway.credential_available() {
        warn!(
            var = %config.bedrock.credential_env,
            "Bedrock credential is not set; /api/invoke will fail until it is"
        );
        println!(
            "  {}  {} environment variable is not set!",
            "⚠".yellow(),
            config.bedrock.credential_env
        );
        println!("     Please set it in your .env file or export it in your shell.");
        println!();
    }
    let static_dir = helpers::expand_tilde(&config.server.static_dir);
    let addr = config.server.bind_addr();

    info!(
        addr = %addr,
        endpoint = %config.bedrock.endpoint_url(),
        models = MODELS.len(),
        "server starting"
    );

    println!("  Listening: http://{}", addr);
    println!("  Endpoint:  {}", config.bedrock.endpoint_url());
    println!("  Models:    {}", MODELS.len());
    println!();
    println!("  Ctrl+C to stop");
    println!();

    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received Ctrl+C, shutting down");
        }
    };

    bedrox_server::serve(&addr, AppState::new(gateway, static_dir), shutdown)
        .await
        .context("HTTP server failed")?;

    println!("  Server stopped. Goodbye!");
    Ok(())
}
