//! aidesk — a local multi-tool AI desk backed by Ollama.
//!
//! One binary, two halves:
//!
//! - **Server** (`aidesk serve`): a small synchronous HTTP server exposing
//!   eight tool endpoints (chat, code assist, legal analysis, summaries,
//!   shopping, symptom lookup). Each endpoint accepts a form-encoded POST,
//!   wraps the payload in a per-tool persona prompt, forwards it to a local
//!   Ollama instance, and answers with a JSON body of string fields. The
//!   dashboard frontend is embedded in the binary.
//! - **Client** ([`dispatch`] + [`panels`]): every tool action is the same
//!   exchange — form-encode a payload, POST it to a fixed endpoint, read
//!   string fields out of the JSON reply. [`dispatch::Dispatcher`] is that
//!   exchange, once; the panels configure it with field names and surface
//!   results in their own output state.

pub mod analytics;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod llm;
pub mod panels;
pub mod web;
