//! `textsmith process` / `textsmith preview` — transform selected text.

use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use tracing::info;

use textsmith_core::cancel::CancelHandle;
use textsmith_core::config::Config;
use textsmith_core::types::{ProcessingIntent, ProcessingStyle};
use textsmith_dispatch::{AssistantError, ProcessRequest};

use crate::helpers;

/// Arguments shared by `process` and `preview`.
#[derive(Args, Debug)]
pub struct TextArgs {
    /// Text to transform. Read from stdin when omitted.
    pub text: Option<String>,

    /// improve, toPrompt or summarize
    #[arg(short, long, default_value = "improve", value_parser = parse_intent)]
    pub intent: ProcessingIntent,

    /// faithful or enhance
    #[arg(short, long, default_value = "faithful", value_parser = parse_style)]
    pub style: ProcessingStyle,

    /// Title of the page the text came from
    #[arg(short, long)]
    pub title: Option<String>,

    /// Extra instructions appended to the prompt
    #[arg(long)]
    pub instructions: Option<String>,

    /// Output language (defaults to locale.output in config)
    #[arg(short, long)]
    pub language: Option<String>,
}

fn parse_intent(s: &str) -> Result<ProcessingIntent, String> {
    s.parse()
}

fn parse_style(s: &str) -> Result<ProcessingStyle, String> {
    s.parse()
}

impl TextArgs {
    fn into_request(self) -> Result<ProcessRequest> {
        let text = helpers::text_or_stdin(self.text)?;
        if text.trim().is_empty() {
            return Err(anyhow!("no text to process"));
        }
        Ok(ProcessRequest {
            intent: self.intent,
            style: self.style,
            selected_text: text,
            page_title: self.title,
            extra_instructions: self.instructions,
            output_language: self.language,
        })
    }
}

/// Render, send and print. Ctrl-C cancels the in-flight call.
pub async fn process(config: &Config, args: TextArgs, show_logs: bool) -> Result<()> {
    let assistant = helpers::build_assistant(config)?;
    let request = args.into_request()?;

    let (handle, token) = CancelHandle::new();
    if !show_logs {
        helpers::print_thinking();
    }

    let outcome = tokio::select! {
        result = assistant.process(&request, &token) => result,
        _ = tokio::signal::ctrl_c() => {
            handle.cancel();
            info!("Cancelled by user");
            if !show_logs {
                helpers::clear_thinking();
            }
            eprintln!("{}", "cancelled".yellow());
            return Ok(());
        }
    };

    if !show_logs {
        helpers::clear_thinking();
    }

    match outcome {
        Ok(out) => {
            helpers::print_result(&out.text, &out.provider_label);
            Ok(())
        }
        Err(e) => {
            let err = AssistantError::from(e);
            helpers::print_error(&err);
            Err(anyhow!("processing failed"))
        }
    }
}

/// Print the prompt `process` would send, without sending it.
pub async fn preview(config: &Config, args: TextArgs) -> Result<()> {
    let assistant = helpers::build_assistant(config)?;
    let request = args.into_request()?;
    let route = assistant
        .current_route()
        .await
        .map(|r| r.label())
        .unwrap_or_else(|e| e.to_string());

    let prompt = assistant.render_prompt_preview(&request).await;
    println!("{} {}", "Route:".bold(), route.dimmed());
    println!(
        "{} {} chars",
        "Length:".bold(),
        prompt.chars().count().to_string().dimmed()
    );
    println!();
    println!("{prompt}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: TextArgs,
    }

    #[test]
    fn parses_intent_and_style() {
        let h = Harness::parse_from(["t", "hello", "--intent", "to-prompt", "--style", "enhance"]);
        assert_eq!(h.args.intent, ProcessingIntent::ToPrompt);
        assert_eq!(h.args.style, ProcessingStyle::Enhance);
        assert_eq!(h.args.text.as_deref(), Some("hello"));
    }

    #[test]
    fn rejects_unknown_intent() {
        assert!(Harness::try_parse_from(["t", "x", "--intent", "rewrite"]).is_err());
    }

    #[test]
    fn builds_request() {
        let h = Harness::parse_from(["t", "body", "-t", "Page", "-l", "Deutsch"]);
        let req = h.args.into_request().unwrap();
        assert_eq!(req.intent, ProcessingIntent::Improve);
        assert_eq!(req.page_title.as_deref(), Some("Page"));
        assert_eq!(req.output_language.as_deref(), Some("Deutsch"));
    }
}
