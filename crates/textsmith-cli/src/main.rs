//! Textsmith CLI — entry point.
//!
//! # Commands
//!
//! - `textsmith process [TEXT] [-i INTENT] [-s STYLE]` — transform text (stdin when omitted)
//! - `textsmith preview [TEXT] …` — show the prompt without sending it
//! - `textsmith key set|delete|show|detect` — manage provider API keys
//! - `textsmith provider use <PROVIDER|none>` — choose the preferred provider
//! - `textsmith template show|set|reset` — inspect and override prompt templates
//! - `textsmith history list|delete|clear` — recent results
//! - `textsmith onboard` — initialize config and data directory
//! - `textsmith status` — show configuration and provider status

mod helpers;
mod history_cmd;
mod key_cmd;
mod onboard;
mod process_cmd;
mod status;
mod template_cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};

use textsmith_core::config::load_config;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// ✎ Textsmith — improve, convert or summarize text with any AI provider
#[derive(Parser)]
#[command(name = "textsmith", version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true, default_value_t = false)]
    logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform text with the active provider
    Process(process_cmd::TextArgs),

    /// Print the prompt that `process` would send
    Preview(process_cmd::TextArgs),

    /// Manage provider API keys
    Key {
        #[command(subcommand)]
        action: key_cmd::KeyCommands,
    },

    /// Choose the preferred provider
    Provider {
        #[command(subcommand)]
        action: key_cmd::ProviderCommands,
    },

    /// Inspect and override prompt templates
    Template {
        #[command(subcommand)]
        action: template_cmd::TemplateCommands,
    },

    /// Show or clear processing history
    History {
        #[command(subcommand)]
        action: history_cmd::HistoryCommands,
    },

    /// Initialize configuration and data directory
    Onboard,

    /// Show configuration and provider status
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.logs);

    match cli.command {
        Commands::Onboard => return onboard::run(),
        Commands::Status => return status::run().await,
        _ => {}
    }

    let config = load_config(None);
    match cli.command {
        Commands::Process(args) => process_cmd::process(&config, args, cli.logs).await,
        Commands::Preview(args) => process_cmd::preview(&config, args).await,
        Commands::Key { action } => key_cmd::dispatch_key(&config, action).await,
        Commands::Provider { action } => key_cmd::dispatch_provider(&config, action).await,
        Commands::Template { action } => template_cmd::dispatch(&config, action).await,
        Commands::History { action } => history_cmd::dispatch(&config, action).await,
        Commands::Onboard | Commands::Status => Ok(()),
    }
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("textsmith=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
