//! `bedrox models` — print the model catalog.

use anyhow::Result;
use colored::Colorize;

use bedrox_core::catalog::MODELS;

/// Run the models command.
pub fn run() -> Result<()> {
    println!();
    println!("{}", "🪨 Available models".cyan().bold());
    println!();
    println!(
        "  {:<14} {:<24} {}",
        "Provider".bold(),
        "Name".bold(),
        "Model ID".bold()
    );

    for model in MODELS {
        println!(
            "  {:<14} {:<24} {}",
            model.provider,
            model.name,
            model.id.dimmed()
        );
    }

    println!();
    Ok(())
}
