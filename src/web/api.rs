//! Form-encoded POST handlers for the tool endpoints.
//!
//! Each handler decodes its documented payload fields, wraps them in the
//! tool's persona prompt, runs the prompt through Ollama, and answers with
//! a JSON body of string fields. A missing field or a failed generation is
//! returned as `Err` and becomes the router's 500 JSON response.

use std::io::Cursor;

use anyhow::{Context, Result};
use serde::Serialize;
use tiny_http::{Response, StatusCode};

use crate::analytics;
use crate::config;
use crate::llm::prompts;

use super::form::FormData;
use super::{ServerCtx, content_type_json};

// ---------------------------------------------------------------------------
// JSON reply bodies
// ---------------------------------------------------------------------------

/// Reply body shared by the single-result tools.
#[derive(Serialize)]
struct ResultBody<'a> {
    result: &'a str,
}

/// Reply body of the news tool.
#[derive(Serialize)]
struct NewsBody {
    facts: String,
    summary: String,
}

/// Reply body of `GET /api/health`.
#[derive(Serialize)]
struct HealthBody {
    ollama_available: bool,
    model: String,
    config_exists: bool,
    log_exists: bool,
}

/// Build a 200 JSON response.
fn json_response<T: Serialize>(data: &T) -> Result<Response<Cursor<Vec<u8>>>> {
    let body = serde_json::to_string(data).context("failed to serialize JSON response")?;
    Ok(Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(200)))
}

// ---------------------------------------------------------------------------
// Tool handlers
// ---------------------------------------------------------------------------

/// `POST /api/chatbot` — `{message}` → `{result}`.
pub fn chatbot(ctx: &ServerCtx, body: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let form = FormData::parse(body);
    let message = form.require("message")?;

    let result = ctx.ollama.generate(&prompts::chatbot(message))?;
    json_response(&ResultBody { result: &result })
}

/// `POST /api/ai-assistant` — `{message}` → `{result}`.
pub fn ai_assistant(ctx: &ServerCtx, body: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let form = FormData::parse(body);
    let message = form.require("message")?;

    let result = ctx.ollama.generate(&prompts::assistant(message))?;
    json_response(&ResultBody { result: &result })
}

/// `POST /api/code-assist` — `{mode, query}` → `{result}`.
pub fn code_assist(ctx: &ServerCtx, body: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let form = FormData::parse(body);
    let mode = form.require("mode")?;
    let query = form.require("query")?;

    let result = ctx.ollama.generate(&prompts::code_assist(mode, query))?;
    json_response(&ResultBody { result: &result })
}

/// `POST /api/legal-analyze` — `{text}` → `{result}`.
pub fn legal_analyze(ctx: &ServerCtx, body: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let form = FormData::parse(body);
    let text = form.require("text")?;

    let result = ctx.ollama.generate(&prompts::legal_analyze(text))?;
    json_response(&ResultBody { result: &result })
}

/// `POST /api/text-summarize` — `{text}` → `{result}`.
///
/// An empty `text` is still a valid payload; the prompt goes through as-is.
pub fn text_summarize(ctx: &ServerCtx, body: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let form = FormData::parse(body);
    let text = form.require("text")?;

    let result = ctx.ollama.generate(&prompts::text_summarize(text))?;
    json_response(&ResultBody { result: &result })
}

/// `POST /api/news-summarize` — `{text}` → `{facts, summary}`.
pub fn news_summarize(ctx: &ServerCtx, body: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let form = FormData::parse(body);
    let text = form.require("text")?;

    let raw = ctx.ollama.generate(&prompts::news_summarize(text))?;
    let (facts, summary) = prompts::split_report(&raw);
    json_response(&NewsBody { facts, summary })
}

/// `POST /api/ecommerce` — `{query, price_min, price_max, rating}` → `{result}`.
pub fn ecommerce(ctx: &ServerCtx, body: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let form = FormData::parse(body);
    let query = form.require("query")?;
    let price_min = form.require("price_min")?;
    let price_max = form.require("price_max")?;
    let rating = form.require("rating")?;

    let result = ctx
        .ollama
        .generate(&prompts::ecommerce(query, price_min, price_max, rating))?;
    json_response(&ResultBody { result: &result })
}

/// `POST /api/medical` — `{symptoms}` → `{result}`.
pub fn medical(ctx: &ServerCtx, body: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let form = FormData::parse(body);
    let symptoms = form.require("symptoms")?;

    let result = ctx.ollama.generate(&prompts::medical(symptoms))?;
    json_response(&ResultBody { result: &result })
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

/// `GET /api/health` — desk health summary for the dashboard header.
pub fn health(ctx: &ServerCtx) -> Result<Response<Cursor<Vec<u8>>>> {
    let config_exists = config::config_file_path()
        .map(|p| p.exists())
        .unwrap_or(false);
    let log_exists = analytics::request_log_path()
        .map(|p| p.exists())
        .unwrap_or(false);

    let resp = HealthBody {
        ollama_available: ctx.ollama.is_healthy(),
        model: ctx.ollama.model_name().to_string(),
        config_exists,
        log_exists,
    };

    json_response(&resp)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_body_serializes_to_the_wire_shape() {
        let json = serde_json::to_string(&ResultBody { result: "hello" }).unwrap();
        assert_eq!(json, r#"{"result":"hello"}"#);
    }

    #[test]
    fn news_body_carries_both_fields() {
        let body = NewsBody {
            facts: "A.".to_string(),
            summary: "B.".to_string(),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains(r#""facts":"A.""#));
        assert!(json.contains(r#""summary":"B.""#));
    }

    #[test]
    fn health_body_serializes() {
        let body = HealthBody {
            ollama_available: true,
            model: "mistral".to_string(),
            config_exists: false,
            log_exists: true,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains(r#""ollama_available":true"#));
        assert!(json.contains(r#""model":"mistral""#));
    }
}
