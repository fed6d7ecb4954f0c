//! Generic request/response exchange with the aidesk server.
//!
//! Every tool on the desk reduces to the same wire pattern: form-encode a
//! payload of string fields, POST it to one of a fixed set of endpoints, and
//! read string fields back out of a JSON reply. [`Dispatcher::exchange`] is
//! that pattern implemented once. The panel handlers in [`crate::panels`]
//! are configuration of this dispatcher — they differ only in which fields
//! they send and which reply fields they write into their own state.
//!
//! Failure is a single kind: transport error, non-2xx status, and an
//! unparsable reply all collapse into "exchange failed" with the endpoint
//! path attached. The dispatcher returns that as a typed `Err` and leaves it
//! to each caller to decide how to surface it — it never notifies the user
//! itself.

use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;

/// Default base URL of a locally running aidesk server.
pub const DEFAULT_SERVER: &str = "http://127.0.0.1:8787";

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

/// The fixed set of tool endpoints exposed by the aidesk server.
///
/// Endpoint identifiers are pre-defined and non-empty by construction — there
/// is no way to dispatch to an arbitrary path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Chatbot,
    Assistant,
    CodeAssist,
    LegalAnalyze,
    TextSummarize,
    NewsSummarize,
    Ecommerce,
    Medical,
}

impl Endpoint {
    /// The server path this endpoint is mounted at.
    pub fn path(self) -> &'static str {
        match self {
            Self::Chatbot => "/api/chatbot",
            Self::Assistant => "/api/ai-assistant",
            Self::CodeAssist => "/api/code-assist",
            Self::LegalAnalyze => "/api/legal-analyze",
            Self::TextSummarize => "/api/text-summarize",
            Self::NewsSummarize => "/api/news-summarize",
            Self::Ecommerce => "/api/ecommerce",
            Self::Medical => "/api/medical",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

// ---------------------------------------------------------------------------
// Payload / Reply
// ---------------------------------------------------------------------------

/// An ordered field-name → string-value mapping sent with a request.
///
/// Values are plain strings; empty strings are legal and sent as-is. No
/// nesting, no typed fields.
#[derive(Debug, Clone, Default)]
pub struct Payload {
    fields: Vec<(&'static str, String)>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. Field names are fixed per endpoint, so they are
    /// `'static` by construction.
    pub fn field(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.fields.push((name, value.into()));
        self
    }

    /// Borrow the fields in `send_form` shape.
    fn as_form(&self) -> Vec<(&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
            .collect()
    }
}

/// The string fields parsed out of a JSON reply body.
///
/// The dispatcher is permissive: it does not validate which fields an
/// endpoint returned. Callers name the fields they consume via [`Reply::field`]
/// or [`Reply::require`].
#[derive(Debug, Clone)]
pub struct Reply {
    fields: serde_json::Map<String, Value>,
}

impl Reply {
    /// Look up a string field, `None` if absent or not a string.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// Look up a string field the caller's contract says must be present.
    pub fn require(&self, name: &str) -> Result<&str> {
        self.field(name)
            .with_context(|| format!("reply is missing the `{name}` field"))
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Performs single outbound exchanges with an aidesk server.
///
/// Each [`exchange`](Self::exchange) call is independent: no retries, no
/// caching, no de-duplication of in-flight requests. Dispatching the same
/// payload twice performs two exchanges. By default no overall timeout is
/// enforced beyond what the transport provides; [`with_timeout`](Self::with_timeout)
/// opts into one.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    base_url: String,
    timeout: Option<Duration>,
}

impl Dispatcher {
    /// Build a dispatcher targeting the given server base URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    /// Enforce an overall per-exchange timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Perform one form-encoded POST exchange with the given endpoint.
    ///
    /// Success means the server answered 2xx with a JSON object body; the
    /// body's string fields are returned as a [`Reply`] without further
    /// validation. Anything else — connection failure, non-2xx status, a
    /// body that is not a JSON object — is the single "exchange failed"
    /// error kind, with no partial result.
    pub fn exchange(&self, endpoint: Endpoint, payload: &Payload) -> Result<Reply> {
        let url = format!("{}{}", self.base_url, endpoint.path());
        let form = payload.as_form();

        let mut request = ureq::post(&url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send_form(&form)
            .with_context(|| format!("exchange with {} failed", endpoint.path()))?;

        let body: Value = response
            .into_json()
            .with_context(|| format!("exchange with {} returned a malformed reply", endpoint.path()))?;

        match body {
            Value::Object(fields) => Ok(Reply { fields }),
            _ => anyhow::bail!(
                "exchange with {} returned a non-object reply",
                endpoint.path()
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_paths_are_fixed_and_non_empty() {
        let all = [
            Endpoint::Chatbot,
            Endpoint::Assistant,
            Endpoint::CodeAssist,
            Endpoint::LegalAnalyze,
            Endpoint::TextSummarize,
            Endpoint::NewsSummarize,
            Endpoint::Ecommerce,
            Endpoint::Medical,
        ];
        for endpoint in all {
            assert!(endpoint.path().starts_with("/api/"));
        }
        assert_eq!(Endpoint::Assistant.path(), "/api/ai-assistant");
    }

    #[test]
    fn payload_preserves_field_order() {
        let payload = Payload::new()
            .field("mode", "generator")
            .field("query", "sort a vec");
        let form = payload.as_form();
        assert_eq!(form, vec![("mode", "generator"), ("query", "sort a vec")]);
    }

    #[test]
    fn payload_allows_empty_values() {
        let payload = Payload::new().field("text", "");
        assert_eq!(payload.as_form(), vec![("text", "")]);
    }

    #[test]
    fn reply_field_lookup_is_permissive() {
        let body: Value =
            serde_json::from_str(r#"{"result": "ok", "extra": "ignored", "n": 3}"#).unwrap();
        let reply = Reply {
            fields: body.as_object().cloned().unwrap(),
        };
        assert_eq!(reply.field("result"), Some("ok"));
        assert_eq!(reply.field("extra"), Some("ignored"));
        // non-string values are not surfaced as fields
        assert_eq!(reply.field("n"), None);
        assert_eq!(reply.field("absent"), None);
    }

    #[test]
    fn reply_require_names_the_missing_field() {
        let reply = Reply {
            fields: serde_json::Map::new(),
        };
        let err = reply.require("result").unwrap_err();
        assert!(err.to_string().contains("`result`"));
    }

    #[test]
    fn dispatcher_strips_trailing_slash() {
        let dispatcher = Dispatcher::new("http://127.0.0.1:8787/");
        assert_eq!(dispatcher.base_url, "http://127.0.0.1:8787");
    }

    #[test]
    fn exchange_fails_on_unreachable_server() {
        // Port 9 (discard) is never an aidesk server; connection is refused
        // or times out immediately on loopback.
        let dispatcher =
            Dispatcher::new("http://127.0.0.1:9").with_timeout(Duration::from_millis(300));
        let payload = Payload::new().field("message", "hi");
        let err = dispatcher.exchange(Endpoint::Chatbot, &payload).unwrap_err();
        assert!(err.to_string().contains("/api/chatbot"));
    }
}
