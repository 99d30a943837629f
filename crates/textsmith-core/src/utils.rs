//! Utility helpers — path resolution and string handling.

use std::path::PathBuf;

/// Get the Textsmith data directory (e.g. `~/.textsmith/`).
pub fn get_data_path() -> PathBuf {
    let home = home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".textsmith")
}

/// Default key-value store file (`~/.textsmith/store.json`).
pub fn get_store_path() -> PathBuf {
    get_data_path().join("store.json")
}

/// Persisted vault key (`~/.textsmith/vault.key`).
pub fn get_vault_key_path() -> PathBuf {
    get_data_path().join("vault.key")
}

/// Truncate a string to `max_len` characters, adding "..." if truncated.
/// Unicode-safe.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// Display form of a secret: `"..."` plus its last four characters.
///
/// Secrets of four characters or fewer are not masked at all (`None`).
pub fn mask_secret(secret: &str) -> Option<String> {
    let count = secret.chars().count();
    if count <= 4 {
        return None;
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    Some(format!("...{tail}"))
}

/// Expand `~` to the home directory in a path string.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        home_dir().unwrap_or_else(|| PathBuf::from(".")).join(rest)
    } else if path == "~" {
        home_dir().unwrap_or_else(|| PathBuf::from("."))
    } else {
        PathBuf::from(path)
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| std::env::var("USERPROFILE").ok().map(PathBuf::from))
}
