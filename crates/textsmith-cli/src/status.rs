//! `textsmith status` — show configuration and provider status.

use anyhow::Result;
use colored::Colorize;

use textsmith_core::config::{get_config_path, load_config};
use textsmith_providers::registry::{FREE_PROVIDER, PROVIDERS};

use crate::helpers;

/// Run the status command.
pub async fn run() -> Result<()> {
    let config = load_config(None);
    let config_path = get_config_path();

    println!();
    println!("{}", "✎ Textsmith Status".cyan().bold());
    println!();

    print_path("Config:", &config_path);
    let store_path = helpers::expand_tilde(&config.storage.path);
    print_path("Store:", &store_path);

    println!(
        "  {:<18} ui: {} | output: {}",
        "Locale:".bold(),
        config.locale.ui,
        config.locale.output
    );
    println!(
        "  {:<18} {} | timeout: {}s | history: {}",
        "Limits:".bold(),
        format!("prompt: {} chars", config.prompts.max_prompt_length).dimmed(),
        config.dispatch.timeout_secs,
        config.history.limit,
    );

    let assistant = helpers::build_assistant(&config)?;
    let preferred = assistant.preferred_provider().await;

    println!();
    println!("  {}", "Providers:".bold());
    println!(
        "    {:<20} {}",
        FREE_PROVIDER.display_name,
        "· always available".dimmed()
    );
    for spec in PROVIDERS {
        let Some(p) = spec.provider else { continue };
        let status = match assistant.masked_credential(p).await {
            Some(masked) if preferred == Some(p) => format!("{} {} ★", "✓".green(), masked),
            Some(masked) => format!("{} {}", "✓".green(), masked),
            None => format!("{}", "· not configured".dimmed()),
        };
        println!("    {:<20} {}", spec.display_name, status);
    }

    println!();
    let route = match assistant.current_route().await {
        Ok(route) => route.label(),
        Err(e) => format!("{} {}", "✗".red(), e),
    };
    println!("  {:<18} {}", "Route:".bold(), route);
    println!();

    Ok(())
}

fn print_path(label: &str, path: &std::path::Path) {
    println!(
        "  {:<18} {} {}",
        label.bold(),
        path.display(),
        if path.exists() {
            "✓".green().to_string()
        } else {
            "(not found)".red().to_string()
        }
    );
}
