//! Configuration schema for aidesk.
//!
//! Two sections: where the dashboard listens, and how to reach Ollama.
//! Every field carries a `serde(default)` so a partial TOML file only
//! overrides what it names.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AideskConfig {
    pub server: ServerConfig,
    pub ollama: OllamaConfig,
}

impl Default for AideskConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            ollama: OllamaConfig::default(),
        }
    }
}

/// Dashboard server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the dashboard binds to.
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8787".to_string(),
        }
    }
}

/// Ollama connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    /// Base URL of the Ollama HTTP API.
    pub url: String,
    /// Model every tool endpoint generates with.
    pub model: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:11434".to_string(),
            model: "mistral".to_string(),
            timeout_ms: 60_000,
        }
    }
}

impl AideskConfig {
    /// Annotated default config, written by `aidesk config init`.
    pub fn default_toml() -> String {
        r#"# aidesk configuration
#
# Values here override the built-in defaults; AIDESK_* environment
# variables override both.

[server]
# Address the dashboard binds to.
listen_addr = "127.0.0.1:8787"

[ollama]
# Base URL of the Ollama HTTP API.
url = "http://localhost:11434"

# Model every tool endpoint generates with. Longer chat replies need a
# conversational model; `mistral` is a good default.
model = "mistral"

# Per-request timeout in milliseconds. Generation on CPU can be slow.
timeout_ms = 60000
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_local() {
        let config = AideskConfig::default();
        assert_eq!(config.server.listen_addr, "127.0.0.1:8787");
        assert_eq!(config.ollama.url, "http://localhost:11434");
        assert_eq!(config.ollama.model, "mistral");
        assert_eq!(config.ollama.timeout_ms, 60_000);
    }

    #[test]
    fn partial_toml_only_overrides_named_fields() {
        let config: AideskConfig = toml::from_str(
            r#"
            [ollama]
            model = "llama3.2:3b"
            "#,
        )
        .unwrap();
        assert_eq!(config.ollama.model, "llama3.2:3b");
        assert_eq!(config.ollama.url, "http://localhost:11434");
        assert_eq!(config.server.listen_addr, "127.0.0.1:8787");
    }

    #[test]
    fn default_toml_parses_back_to_defaults() {
        let config: AideskConfig = toml::from_str(&AideskConfig::default_toml()).unwrap();
        assert_eq!(config.server.listen_addr, "127.0.0.1:8787");
        assert_eq!(config.ollama.timeout_ms, 60_000);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = AideskConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: AideskConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.ollama.model, config.ollama.model);
        assert_eq!(back.server.listen_addr, config.server.listen_addr);
    }
}
