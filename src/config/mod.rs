/// Configuration system for aidesk.
///
/// Layered, later layers override earlier ones:
///
/// 1. **Built-in defaults** — [`schema::AideskConfig::default()`]
/// 2. **User config file** — `~/.aidesk/config.toml`
/// 3. **Environment variables** — `AIDESK_*` (highest precedence)
///
/// A malformed config file is silently ignored so a typo never takes the
/// desk down; `aidesk config show` reveals what actually got resolved.
pub mod schema;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub use schema::AideskConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved configuration: defaults → config file → env vars.
pub fn load() -> AideskConfig {
    let mut config = load_toml_file(config_file_path()).unwrap_or_default();
    apply_env_overrides(&mut config);
    config
}

/// Load a TOML config file, `None` if absent or malformed.
fn load_toml_file(path: Option<PathBuf>) -> Option<AideskConfig> {
    let path = path?;
    let content = fs::read_to_string(&path).ok()?;
    toml::from_str(&content).ok()
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// The per-user state directory, `~/.aidesk/`.
///
/// `AIDESK_HOME` overrides the parent directory (used by tests and by
/// setups that keep dotfiles elsewhere).
pub fn desk_dir() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("AIDESK_HOME")
        && !home.is_empty()
    {
        return Some(PathBuf::from(home).join(".aidesk"));
    }
    dirs::home_dir().map(|home| home.join(".aidesk"))
}

/// Path to the user config file: `~/.aidesk/config.toml`.
pub fn config_file_path() -> Option<PathBuf> {
    desk_dir().map(|dir| dir.join("config.toml"))
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply `AIDESK_*` overrides (highest precedence layer).
///
/// - `AIDESK_ADDR` — dashboard listen address
/// - `AIDESK_OLLAMA_URL` — Ollama base URL
/// - `AIDESK_MODEL` — model name
/// - `AIDESK_TIMEOUT_MS` — Ollama request timeout
fn apply_env_overrides(config: &mut AideskConfig) {
    if let Ok(val) = std::env::var("AIDESK_ADDR")
        && !val.is_empty()
    {
        config.server.listen_addr = val;
    }
    if let Ok(val) = std::env::var("AIDESK_OLLAMA_URL")
        && !val.is_empty()
    {
        config.ollama.url = val;
    }
    if let Ok(val) = std::env::var("AIDESK_MODEL")
        && !val.is_empty()
    {
        config.ollama.model = val;
    }
    if let Ok(val) = std::env::var("AIDESK_TIMEOUT_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.ollama.timeout_ms = ms;
    }
}

// ---------------------------------------------------------------------------
// Config init / set / reset / show
// ---------------------------------------------------------------------------

/// Write the annotated default config to `~/.aidesk/config.toml`.
///
/// Refuses to overwrite an existing file unless `force` is set.
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = config_file_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.aidesk/ directory")?;
    }

    fs::write(&path, AideskConfig::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// Set a single dotted-key config value in the user config file.
///
/// Starts from the existing file (or the serialized defaults when there is
/// none), updates the one key, and writes the result back. The new value is
/// parsed to match the type of the field it replaces.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = config_file_path().context("could not determine home directory")?;

    let text = if path.exists() {
        fs::read_to_string(&path).context("failed to read config file")?
    } else {
        toml::to_string_pretty(&AideskConfig::default())
            .context("failed to serialize default config")?
    };

    let mut root: toml::Value = toml::from_str(&text).context("failed to parse config as TOML")?;
    set_toml_value(&mut root, key, value)?;

    let output = toml::to_string_pretty(&root).context("failed to serialize updated config")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(&path, output).context("failed to write config file")?;

    Ok(())
}

/// Set a value in a TOML tree using a dotted key path, preserving the type
/// of the existing field.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    if parts.is_empty() || parts.iter().any(|p| p.is_empty()) {
        anyhow::bail!("invalid config key: '{key}'");
    }

    let mut current = root;
    for &part in &parts[..parts.len() - 1] {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let leaf = parts[parts.len() - 1];
    let table = current
        .as_table_mut()
        .with_context(|| format!("'{key}' does not name a value inside a table"))?;

    let new_value = match table.get(leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(matches!(
            raw_value.to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        Some(toml::Value::Float(_)) => {
            let f: f64 = raw_value
                .parse()
                .with_context(|| format!("expected float for '{key}', got '{raw_value}'"))?;
            toml::Value::Float(f)
        }
        _ => toml::Value::String(raw_value.to_string()),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

/// Reset the user config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// The effective (fully resolved) config as TOML text.
pub fn show_effective_config() -> Result<String> {
    toml::to_string_pretty(&load()).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Wraps the `unsafe` env mutation calls (Rust 2024). Sound only because
    /// the test combining them runs its steps sequentially and no other test
    /// in this binary touches these variables.
    unsafe fn set_env(key: &str, val: &str) {
        unsafe { std::env::set_var(key, val) }
    }

    unsafe fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) }
    }

    // Env-var overrides share process state, so they live in one #[test].
    #[test]
    fn env_overrides_apply_in_order() {
        let mut config = AideskConfig::default();

        unsafe { set_env("AIDESK_MODEL", "qwen2.5:0.5b") };
        unsafe { set_env("AIDESK_ADDR", "0.0.0.0:9000") };
        unsafe { set_env("AIDESK_TIMEOUT_MS", "2500") };
        apply_env_overrides(&mut config);
        unsafe { remove_env("AIDESK_MODEL") };
        unsafe { remove_env("AIDESK_ADDR") };
        unsafe { remove_env("AIDESK_TIMEOUT_MS") };

        assert_eq!(config.ollama.model, "qwen2.5:0.5b");
        assert_eq!(config.server.listen_addr, "0.0.0.0:9000");
        assert_eq!(config.ollama.timeout_ms, 2500);

        // empty values and unparsable numbers are ignored
        let mut config = AideskConfig::default();
        unsafe { set_env("AIDESK_MODEL", "") };
        unsafe { set_env("AIDESK_TIMEOUT_MS", "soon") };
        apply_env_overrides(&mut config);
        unsafe { remove_env("AIDESK_MODEL") };
        unsafe { remove_env("AIDESK_TIMEOUT_MS") };

        assert_eq!(config.ollama.model, "mistral");
        assert_eq!(config.ollama.timeout_ms, 60_000);
    }

    #[test]
    fn set_toml_value_updates_string() {
        let mut root: toml::Value = toml::from_str(
            r#"
            [ollama]
            model = "mistral"
            "#,
        )
        .unwrap();
        set_toml_value(&mut root, "ollama.model", "llama3.2:3b").unwrap();

        let ollama = root.as_table().unwrap()["ollama"].as_table().unwrap();
        assert_eq!(ollama["model"].as_str(), Some("llama3.2:3b"));
    }

    #[test]
    fn set_toml_value_preserves_integer_type() {
        let mut root: toml::Value = toml::from_str(
            r#"
            [ollama]
            timeout_ms = 60000
            "#,
        )
        .unwrap();
        set_toml_value(&mut root, "ollama.timeout_ms", "5000").unwrap();

        let ollama = root.as_table().unwrap()["ollama"].as_table().unwrap();
        assert_eq!(ollama["timeout_ms"].as_integer(), Some(5000));
    }

    #[test]
    fn set_toml_value_rejects_integer_garbage() {
        let mut root: toml::Value = toml::from_str(
            r#"
            [ollama]
            timeout_ms = 60000
            "#,
        )
        .unwrap();
        assert!(set_toml_value(&mut root, "ollama.timeout_ms", "a while").is_err());
    }

    #[test]
    fn set_toml_value_rejects_unknown_section() {
        let mut root: toml::Value = toml::from_str("[server]\nlisten_addr = \"x\"\n").unwrap();
        assert!(set_toml_value(&mut root, "nonexistent.key", "value").is_err());
    }

    #[test]
    fn show_effective_config_is_parseable_toml() {
        let text = show_effective_config().unwrap();
        let _: AideskConfig = toml::from_str(&text).unwrap();
    }
}
