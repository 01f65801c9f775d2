//! `bedrox invoke` — single-shot invocation through the same gateway the
//! server uses.

use anyhow::{bail, Result};
use colored::Colorize;

use bedrox_core::catalog::find_model;
use bedrox_core::config::Config;

use crate::helpers;

/// Run the invoke command. Exits non-zero on any invocation failure.
pub async fn run(config: &Config, model: &str, prompt: &str) -> Result<()> {
    if find_model(model).is_none() {
        eprintln!(
            "{}",
            format!("note: '{model}' is not in the catalog, forwarding as-is").dimmed()
        );
    }

    let gateway = crate::build_gateway(config)?;

    match gateway.try_invoke(model, prompt).await {
        Ok(output) => {
            helpers::print_output(&output);
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e.client_message());
            bail!("invocation failed (status {})", e.status_code())
        }
    }
}
