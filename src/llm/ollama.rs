/// Ollama HTTP API client backing every tool endpoint.
///
/// Talks to a local Ollama instance using the synchronous `ureq` client:
///
/// - **Health check**: `GET /api/tags` — is Ollama up with a model loaded?
/// - **Generate**: `POST /api/generate` with `stream: false` — run one
///   prompt to completion and return the generated text.
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::AideskConfig;

// ---------------------------------------------------------------------------
// Request / response types for the Ollama API
// ---------------------------------------------------------------------------

/// Request body for `POST /api/generate`.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Response body from `POST /api/generate` (non-streaming).
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Response body from `GET /api/tags` — lists available models.
#[derive(Debug, Deserialize)]
struct TagsResponse {
    models: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    #[allow(dead_code)]
    name: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Synchronous Ollama client.
///
/// Built once per server process from the resolved config and shared by all
/// endpoint handlers. Chat replies can take a while on small hardware, so
/// the request timeout defaults to a generous 60 s (configurable).
#[derive(Debug, Clone)]
pub struct OllamaClient {
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OllamaClient {
    /// Build a client from the resolved config.
    pub fn from_config(config: &AideskConfig) -> Self {
        Self {
            base_url: config.ollama.url.trim_end_matches('/').to_string(),
            model: config.ollama.model.clone(),
            timeout: Duration::from_millis(config.ollama.timeout_ms),
        }
    }

    /// The model name, for health output and the dashboard header.
    pub fn model_name(&self) -> &str {
        &self.model
    }

    /// Check whether Ollama is reachable and has at least one model loaded.
    ///
    /// Uses a short timeout (5 s) so health checks don't stall when Ollama
    /// is down.
    pub fn is_healthy(&self) -> bool {
        let url = rewrite_localhost(&format!("{}/api/tags", self.base_url));
        let result = ureq::get(&url).timeout(Duration::from_secs(5)).call();

        match result {
            Ok(resp) => match resp.into_json::<TagsResponse>() {
                Ok(tags) => !tags.models.is_empty(),
                Err(_) => false,
            },
            Err(_) => false,
        }
    }

    /// Run one prompt through the model and return the generated text.
    ///
    /// Empty generated text is treated as a failure — every tool promises a
    /// non-empty `result` to its panel.
    pub fn generate(&self, prompt: &str) -> Result<String> {
        let url = rewrite_localhost(&format!("{}/api/generate", self.base_url));

        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let resp = ureq::post(&url)
            .timeout(self.timeout)
            .send_json(&body)
            .context("Ollama generate request failed")?;

        let parsed: GenerateResponse = resp
            .into_json()
            .context("failed to parse Ollama generate response")?;

        if parsed.response.trim().is_empty() {
            anyhow::bail!("Ollama returned an empty response");
        }

        Ok(parsed.response)
    }
}

/// On Windows, "localhost" may resolve to IPv6 (`::1`) first and stall when
/// Ollama only binds IPv4. Use 127.0.0.1 directly.
fn rewrite_localhost(url: &str) -> String {
    url.replace("://localhost", "://127.0.0.1")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_from_default_config() {
        let config = AideskConfig::default();
        let client = OllamaClient::from_config(&config);
        assert_eq!(client.base_url, "http://localhost:11434");
        assert_eq!(client.model, "mistral");
        assert_eq!(client.timeout, Duration::from_millis(60_000));
    }

    #[test]
    fn client_strips_trailing_slash() {
        let mut config = AideskConfig::default();
        config.ollama.url = "http://localhost:11434/".to_string();
        let client = OllamaClient::from_config(&config);
        assert_eq!(client.base_url, "http://localhost:11434");
    }

    #[test]
    fn localhost_is_rewritten_to_loopback_ip() {
        assert_eq!(
            rewrite_localhost("http://localhost:11434/api/tags"),
            "http://127.0.0.1:11434/api/tags"
        );
        assert_eq!(
            rewrite_localhost("http://10.0.0.2:11434/api/tags"),
            "http://10.0.0.2:11434/api/tags"
        );
    }
}
