//! `bedrox status` — show configuration and credential status.

use anyhow::Result;
use colored::Colorize;

use bedrox_core::catalog::MODELS;
use bedrox_core::config::{get_config_path, Config};

/// Run the status command.
pub fn run(config: &Config) -> Result<()> {
    let config_path = get_config_path();

    println!();
    println!("{}", "🪨 Bedrox Status".cyan().bold());
    println!();

    // Config
    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_path.exists() {
            "✓".green().to_string()
        } else {
            "(not found, using defaults)".dimmed().to_string()
        }
    );

    // Server
    println!("  {:<18} {}", "Listen:".bold(), config.server.bind_addr());
    let static_dir = crate::helpers::expand_tilde(&config.server.static_dir);
    println!(
        "  {:<18} {} {}",
        "Static dir:".bold(),
        static_dir.display(),
        if static_dir.join("index.html").exists() {
            "✓".green().to_string()
        } else {
            "(index.html not found)".red().to_string()
        }
    );

    // Bedrock
    println!();
    println!("  {}", "Bedrock:".bold());
    println!("    {:<16} {}", "Region", config.bedrock.region);
    println!("    {:<16} {}", "Endpoint", config.bedrock.endpoint_url());
    println!("    {:<16} {}s", "Timeout", config.bedrock.timeout_secs);
    let credential_set = crate::build_gateway(config)?.credential_available();
    let credential_status = if credential_set {
        format!("{} (set)", "✓".green())
    } else {
        format!("{}", "✗ not set".red())
    };
    println!(
        "    {:<16} {} {}",
        "Credential",
        config.bedrock.credential_env,
        credential_status
    );

    println!();
    println!("  {:<18} {}", "Models:".bold(), MODELS.len());
    println!();

    Ok(())
}
