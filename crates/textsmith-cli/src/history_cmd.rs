//! `textsmith history …` — recent results, newest first.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use textsmith_core::config::Config;
use textsmith_core::utils::truncate_string;

use crate::helpers;

#[derive(Subcommand)]
pub enum HistoryCommands {
    /// List recent results
    List {
        /// Print full input and result text
        #[arg(short, long, default_value_t = false)]
        full: bool,
    },

    /// Delete one entry (0 = newest)
    Delete { index: usize },

    /// Delete every entry
    Clear,
}

pub async fn dispatch(config: &Config, cmd: HistoryCommands) -> Result<()> {
    let assistant = helpers::build_assistant(config)?;
    match cmd {
        HistoryCommands::List { full } => {
            let entries = assistant.history().await?;
            if entries.is_empty() {
                println!("{}", "No history yet.".dimmed());
                return Ok(());
            }
            println!();
            for (i, e) in entries.iter().enumerate() {
                println!(
                    "  {} {} {}/{} · {} · {}",
                    format!("[{i}]").cyan(),
                    e.timestamp.format("%Y-%m-%d %H:%M").to_string().dimmed(),
                    e.intent,
                    e.style,
                    e.provider_label,
                    e.output_language.as_str().dimmed()
                );
                if full {
                    println!("      {} {}", "in: ".bold(), e.input_text);
                    println!("      {} {}", "out:".bold(), e.result_text);
                } else {
                    println!("      {} {}", "in: ".bold(), truncate_string(&e.input_text, 70));
                    println!("      {} {}", "out:".bold(), truncate_string(&e.result_text, 70));
                }
            }
            println!();
        }
        HistoryCommands::Delete { index } => {
            if assistant.delete_history_entry(index).await? {
                println!("  {} deleted entry {index}", "✓".green());
            } else {
                println!("  {} no entry at {index}", "·".dimmed());
            }
        }
        HistoryCommands::Clear => {
            assistant.clear_history().await?;
            println!("  {} history cleared", "✓".green());
        }
    }
    Ok(())
}
