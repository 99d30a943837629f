//! `textsmith onboard` — initialize configuration and data directory.
//!
//! - Creates `~/.textsmith/config.json` with defaults
//! - Creates the vault key used to obfuscate stored API keys
//! - Exports the built-in prompt catalogs under `~/.textsmith/templates/`
//!   as a starting point for `prompts.templatesDir`

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use serde_json::{json, Map, Value};

use textsmith_core::config::{load_config, save_config};
use textsmith_core::types::TemplateId;
use textsmith_core::utils::get_data_path;
use textsmith_core::vault::ObfuscationKey;
use textsmith_prompts::builtin;

/// Run the onboard command.
pub fn run() -> Result<()> {
    println!();
    println!("{}", "✎ Textsmith — Setup".cyan().bold());
    println!();

    setup(&get_data_path())?;

    println!();
    println!(
        "{}",
        "  Setup complete! Run `textsmith key set <provider> <key>` or `textsmith process`."
            .green()
    );
    println!();
    Ok(())
}

fn setup(data_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(data_dir)?;

    // 1. Config
    let config_path = data_dir.join("config.json");
    if config_path.exists() {
        println!("  {} config already exists at {}", "✓".green(), config_path.display());
    } else {
        let config = load_config(Some(config_path.as_path())); // defaults + env
        save_config(&config, Some(config_path.as_path()))?;
        println!("  {} created config at {}", "✓".green(), config_path.display());
    }

    // 2. Vault key
    let key_path = data_dir.join("vault.key");
    let existed = key_path.exists();
    ObfuscationKey::load_or_create(&key_path)?;
    if existed {
        println!("  {} vault key at {}", "✓".green(), key_path.display());
    } else {
        println!("  {} created vault key at {}", "✓".green(), key_path.display());
    }

    // 3. Starter prompt catalogs
    let templates_dir = data_dir.join("templates");
    for locale in ["en", "tr"] {
        let Some(catalog) = builtin::catalog(locale) else {
            continue;
        };
        let dir = templates_dir.join(locale);
        std::fs::create_dir_all(&dir)?;
        let content = serde_json::to_string_pretty(&catalog_json(catalog))?;
        create_template(&dir.join("prompts.json"), &content)?;
    }

    Ok(())
}

/// Catalog file layout read back by `CatalogSource`.
fn catalog_json(catalog: &builtin::BuiltinCatalog) -> Value {
    let mut map = Map::new();
    for id in TemplateId::ALL {
        map.insert(id.as_str().to_string(), json!({ "content": catalog.template(id) }));
    }
    let strings = catalog.strings();
    map.insert(
        "strings".to_string(),
        json!({
            "untitled": strings.untitled,
            "noInstructions": strings.no_instructions,
            "truncationNotice": strings.truncation_notice,
        }),
    );
    Value::Object(map)
}

/// Create a file if it doesn't exist.
fn create_template(path: &Path, content: &str) -> Result<()> {
    let name = path.display();
    if path.exists() {
        println!("  {} {} already exists", "✓".green(), name);
    } else {
        std::fs::write(path, content)?;
        println!("  {} created {}", "✓".green(), name);
    }
    Ok(())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
