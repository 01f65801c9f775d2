//! Shared CLI helpers — `.env` loading, path expansion, result printing, banner.

use std::path::{Path, PathBuf};

use colored::Colorize;
use tracing::{debug, warn};

use bedrox_core::types::InvocationOutput;

/// Load `KEY=value` pairs from a `.env` file into the process environment.
///
/// With no path, `.env` is searched for in the current directory and its
/// parents. Variables already set in the environment are left untouched.
/// Returns the file that was loaded, if any.
pub fn load_env_file(path: Option<&Path>) -> Option<PathBuf> {
    let result = match path {
        Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };

    match result {
        Ok(loaded) => {
            debug!("Loaded environment from {}", loaded.display());
            Some(loaded)
        }
        Err(e) if e.not_found() => None,
        Err(e) => {
            warn!("Failed to load .env file: {}", e);
            None
        }
    }
}

/// Expand `~` at the start of a path to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_next::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs_next::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

/// Print a successful invocation to stdout.
pub fn print_output(output: &InvocationOutput) {
    println!();
    println!("{}", format!("🪨 {}", output.model_id).cyan().bold());
    if output.response.is_empty() {
        println!("{}", "(no response)".dimmed());
    } else {
        println!("{}", output.response);
    }
    println!();
    println!(
        "{}",
        format!(
            "tokens: {} in · {} out · {} total",
            output.usage.input_tokens, output.usage.output_tokens, output.usage.total_tokens
        )
        .dimmed()
    );
    println!();
}

/// Print the banner shown when the server starts.
pub fn print_banner() {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!("{}  v{}", "🪨 Bedrox".cyan().bold(), version.dimmed());
    println!();
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
