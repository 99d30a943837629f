//! `textsmith key …` and `textsmith provider …` — credentials and preference.

use anyhow::{anyhow, Result};
use clap::Subcommand;
use colored::Colorize;

use textsmith_core::config::Config;
use textsmith_core::types::{CustomEndpoint, Provider};
use textsmith_dispatch::Assistant;
use textsmith_providers::registry::list_providers;

use crate::helpers;

fn parse_provider(s: &str) -> Result<Provider, String> {
    s.parse()
}

#[derive(Subcommand)]
pub enum KeyCommands {
    /// Save an API key and make its provider the preferred one
    Set {
        /// openai, claude, gemini, cohere, groq or custom
        #[arg(value_parser = parse_provider)]
        provider: Provider,

        /// The key. Read from stdin when omitted.
        secret: Option<String>,

        /// Endpoint URL (custom provider only)
        #[arg(long)]
        endpoint: Option<String>,

        /// Model name sent to the endpoint (custom provider only)
        #[arg(long)]
        model: Option<String>,
    },

    /// Delete a stored API key
    Delete {
        #[arg(value_parser = parse_provider)]
        provider: Provider,
    },

    /// Show masked keys for every provider
    Show,

    /// Guess which provider a key belongs to
    Detect {
        /// The key. Read from stdin when omitted.
        secret: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ProviderCommands {
    /// Prefer a provider, or `none` to clear the preference
    Use {
        /// Provider tag or `none`
        provider: String,
    },
}

pub async fn dispatch_key(config: &Config, cmd: KeyCommands) -> Result<()> {
    let assistant = helpers::build_assistant(config)?;
    match cmd {
        KeyCommands::Set {
            provider,
            secret,
            endpoint,
            model,
        } => set_key(&assistant, provider, secret, endpoint, model).await,
        KeyCommands::Delete { provider } => {
            let active = assistant.delete_credential(provider).await?;
            println!("  {} deleted {} key", "✓".green(), provider.display_name());
            print_active(active);
            Ok(())
        }
        KeyCommands::Show => show_keys(&assistant).await,
        KeyCommands::Detect { secret } => {
            let secret = helpers::text_or_stdin(secret)?;
            match assistant.detect_provider(&secret) {
                Some(p) => println!("  {} {}", "→".cyan(), p.display_name()),
                None => println!("  {}", "unknown format (custom or unsupported)".dimmed()),
            }
            Ok(())
        }
    }
}

async fn set_key(
    assistant: &Assistant,
    provider: Provider,
    secret: Option<String>,
    endpoint: Option<String>,
    model: Option<String>,
) -> Result<()> {
    let secret = helpers::text_or_stdin(secret)?;
    let endpoint = match (provider, endpoint) {
        (Provider::Custom, Some(url)) => Some(CustomEndpoint { url, model }),
        (Provider::Custom, None) if assistant.vault().custom_endpoint(provider).await.is_none() => {
            return Err(anyhow!("the custom provider needs --endpoint"));
        }
        (_, Some(_)) => return Err(anyhow!("--endpoint only applies to the custom provider")),
        (_, None) => None,
    };

    let outcome = assistant.save_credential(provider, &secret, endpoint).await?;
    println!("  {} saved {} key", "✓".green(), provider.display_name());
    if let Some(detected) = outcome.detected_mismatch {
        println!(
            "  {} this key looks like a {} key; requests will be routed there",
            "!".yellow().bold(),
            detected.display_name()
        );
    }
    print_active(outcome.active);
    Ok(())
}

async fn show_keys(assistant: &Assistant) -> Result<()> {
    let preferred = assistant.preferred_provider().await;
    println!();
    for provider in list_providers() {
        let marker = if preferred == Some(provider) { "★" } else { " " };
        let status = match assistant.masked_credential(provider).await {
            Some(masked) => masked.green().to_string(),
            None => "· not set".dimmed().to_string(),
        };
        println!("  {} {:<16} {}", marker.yellow(), provider.display_name(), status);
    }
    println!();
    print_active(assistant.active_provider().await);
    Ok(())
}

pub async fn dispatch_provider(config: &Config, cmd: ProviderCommands) -> Result<()> {
    let assistant = helpers::build_assistant(config)?;
    match cmd {
        ProviderCommands::Use { provider } => {
            let requested = match provider.as_str() {
                "none" | "free" => None,
                tag => Some(tag.parse::<Provider>().map_err(|e| anyhow!(e))?),
            };
            let active = assistant.set_preferred_provider(requested).await?;
            if requested.is_some() && assistant.preferred_provider().await != requested {
                println!(
                    "  {} no key stored for {provider}; preference cleared",
                    "!".yellow().bold()
                );
            }
            print_active(active);
            Ok(())
        }
    }
}

fn print_active(active: Option<Provider>) {
    let label = active
        .map(|p| p.display_name())
        .unwrap_or(textsmith_providers::FREE_PROVIDER.display_name);
    println!("  {} {}", "Active:".bold(), label);
}
