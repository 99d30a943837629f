//! `textsmith template …` — inspect and override prompt templates.

use anyhow::{anyhow, Result};
use clap::Subcommand;
use colored::Colorize;

use textsmith_core::config::Config;
use textsmith_core::types::{ProcessingIntent, ProcessingStyle, TemplateId};
use textsmith_prompts::TemplateOrigin;

use crate::helpers;

/// Template id (`template1`…`template6`) or `<intent>/<style>`.
fn parse_template(s: &str) -> Result<TemplateId, String> {
    if let Some((intent, style)) = s.split_once('/') {
        let intent: ProcessingIntent = intent.parse()?;
        let style: ProcessingStyle = style.parse()?;
        return Ok(TemplateId::from_parts(intent, style));
    }
    s.parse()
}

#[derive(Subcommand)]
pub enum TemplateCommands {
    /// Show one template, or list all when no id is given
    Show {
        /// template1..template6 or intent/style (e.g. improve/enhance)
        #[arg(value_parser = parse_template)]
        id: Option<TemplateId>,
    },

    /// Override a template. The body is read from stdin when omitted.
    Set {
        #[arg(value_parser = parse_template)]
        id: TemplateId,
        body: Option<String>,
    },

    /// Drop an override and go back to the default
    Reset {
        #[arg(value_parser = parse_template)]
        id: TemplateId,
    },
}

pub async fn dispatch(config: &Config, cmd: TemplateCommands) -> Result<()> {
    let assistant = helpers::build_assistant(config)?;
    match cmd {
        TemplateCommands::Show { id: Some(id) } => {
            let t = assistant.template(id).await;
            println!("{} {}", id.as_str().cyan().bold(), origin_label(&t.origin).dimmed());
            println!();
            println!("{}", t.body);
        }
        TemplateCommands::Show { id: None } => {
            println!();
            for t in assistant.templates().await {
                let first_line = t.body.lines().next().unwrap_or_default();
                println!(
                    "  {:<10} {:<10} {}",
                    t.id.as_str().cyan(),
                    origin_label(&t.origin).dimmed(),
                    textsmith_core::utils::truncate_string(first_line, 60)
                );
            }
            println!();
        }
        TemplateCommands::Set { id, body } => {
            let body = helpers::text_or_stdin(body)?;
            if body.trim().is_empty() {
                return Err(anyhow!("template body is empty; use `template reset` instead"));
            }
            assistant.set_template(id, &body).await?;
            println!("  {} {} overridden", "✓".green(), id);
        }
        TemplateCommands::Reset { id } => {
            assistant.reset_template(id).await?;
            println!("  {} {} reset to default", "✓".green(), id);
        }
    }
    Ok(())
}

fn origin_label(origin: &TemplateOrigin) -> String {
    match origin {
        TemplateOrigin::Custom => "custom".to_string(),
        TemplateOrigin::Locale(locale) => format!("default/{locale}"),
    }
}
