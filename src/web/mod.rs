//! Embedded web dashboard and tool API for aidesk.
//!
//! A lightweight HTTP server (sync, via `tiny_http`) that serves:
//! - the single-page multi-tool dashboard (embedded in the binary)
//! - the form-encoded POST endpoints backing each tool panel
//! - a JSON health endpoint
//!
//! Launched via `aidesk serve` (default: `http://127.0.0.1:8787`). Requests
//! are handled sequentially — a local single-user desk — and every handler
//! error is converted into a 500 JSON response so the server never goes down
//! with a request.

mod api;
pub mod form;
mod frontend;

pub use form::FormData;

use std::io::Cursor;
use std::time::Instant;

use anyhow::{Context, Result};
use colored::Colorize;
use tiny_http::{Header, Method, Response, Server, StatusCode};

use crate::analytics;
use crate::config::AideskConfig;
use crate::llm::OllamaClient;

/// Shared handler state: the Ollama client every tool endpoint forwards to.
pub struct ServerCtx {
    pub ollama: OllamaClient,
}

// ---------------------------------------------------------------------------
// Server entry points
// ---------------------------------------------------------------------------

/// Start the dashboard server on the given address. Blocks.
pub fn serve(addr: &str, config: &AideskConfig) -> Result<()> {
    let server = Server::http(addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    println!("aidesk dashboard running at http://{addr}");
    println!("Press Ctrl+C to stop.\n");

    let _ = open_browser(&format!("http://{addr}"));

    let ctx = ServerCtx {
        ollama: OllamaClient::from_config(config),
    };
    run(server, ctx)
}

/// Serve requests on an already-bound listener. Blocks.
///
/// Split out from [`serve`] so tests can bind an ephemeral port themselves.
pub fn run(server: Server, ctx: ServerCtx) -> Result<()> {
    for mut request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();
        let path = url.split('?').next().unwrap_or(&url).to_string();

        // Read the body up-front for methods that carry one
        let body = if matches!(method, Method::Post | Method::Put | Method::Patch) {
            let mut buf = String::new();
            let _ = request.as_reader().read_to_string(&mut buf);
            Some(buf)
        } else {
            None
        };

        let started = Instant::now();
        let result = route(&ctx, &method, &path, body.as_deref());
        let latency_ms = started.elapsed().as_millis() as u64;
        let ok = result.is_ok();

        match result {
            Ok(resp) => {
                let _ = request.respond(resp);
            }
            Err(e) => {
                let body = serde_json::json!({ "error": e.to_string() }).to_string();
                let resp = Response::from_data(body.into_bytes())
                    .with_header(content_type_json())
                    .with_status_code(StatusCode(500));
                let _ = request.respond(resp);
            }
        }

        if method == Method::Post
            && let Some(tool) = tool_name(&path)
        {
            analytics::log_request(tool, latency_ms, ok);
        }

        // Brief access log
        let status = if ok { "ok".green() } else { "error".red() };
        println!(
            "{} {} {} {}ms {}",
            method,
            url,
            status,
            latency_ms,
            chrono::Local::now().format("%H:%M:%S").to_string().dimmed()
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Dispatch an incoming request to the matching handler.
fn route(
    ctx: &ServerCtx,
    method: &Method,
    path: &str,
    body: Option<&str>,
) -> Result<Response<Cursor<Vec<u8>>>> {
    let body = body.unwrap_or("");

    match (method, path) {
        // Frontend
        (&Method::Get, "/") | (&Method::Get, "/index.html") => Ok(serve_frontend()),

        // Tool endpoints
        (&Method::Post, "/api/chatbot") => api::chatbot(ctx, body),
        (&Method::Post, "/api/ai-assistant") => api::ai_assistant(ctx, body),
        (&Method::Post, "/api/code-assist") => api::code_assist(ctx, body),
        (&Method::Post, "/api/legal-analyze") => api::legal_analyze(ctx, body),
        (&Method::Post, "/api/text-summarize") => api::text_summarize(ctx, body),
        (&Method::Post, "/api/news-summarize") => api::news_summarize(ctx, body),
        (&Method::Post, "/api/ecommerce") => api::ecommerce(ctx, body),
        (&Method::Post, "/api/medical") => api::medical(ctx, body),

        // Health
        (&Method::Get, "/api/health") => api::health(ctx),

        // 404
        _ => Ok(not_found()),
    }
}

/// Short tool name for the request log, `None` for non-tool paths.
fn tool_name(path: &str) -> Option<&'static str> {
    match path {
        "/api/chatbot" => Some("chatbot"),
        "/api/ai-assistant" => Some("assistant"),
        "/api/code-assist" => Some("code"),
        "/api/legal-analyze" => Some("legal"),
        "/api/text-summarize" => Some("summarize"),
        "/api/news-summarize" => Some("news"),
        "/api/ecommerce" => Some("shop"),
        "/api/medical" => Some("medical"),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Serve the embedded single-page dashboard.
fn serve_frontend() -> Response<Cursor<Vec<u8>>> {
    Response::from_data(frontend::INDEX_HTML.as_bytes().to_vec())
        .with_header(content_type_html())
        .with_status_code(StatusCode(200))
}

/// 404 response.
fn not_found() -> Response<Cursor<Vec<u8>>> {
    let body = r#"{"error": "not found"}"#;
    Response::from_data(body.as_bytes().to_vec())
        .with_header(content_type_json())
        .with_status_code(StatusCode(404))
}

/// JSON content type header.
pub(crate) fn content_type_json() -> Header {
    Header::from_bytes("Content-Type", "application/json; charset=utf-8").unwrap()
}

/// HTML content type header.
fn content_type_html() -> Header {
    Header::from_bytes("Content-Type", "text/html; charset=utf-8").unwrap()
}

/// Attempt to open a URL in the system default browser.
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
