//! Panel state and handlers for the desk tools.
//!
//! A panel owns its own input/output fields and pairs them with a fixed
//! endpoint — it is configuration of [`crate::dispatch::Dispatcher`], not a
//! component in its own right. The shared handler shape:
//!
//! 1. capture the input field(s),
//! 2. set the output field(s) to a "processing" placeholder,
//! 3. dispatch one exchange,
//! 4. on success overwrite the output field(s) from the reply.
//!
//! On failure the placeholder (or prior state) simply remains; the caller
//! observes the `Err` and surfaces it however it likes. Chat-style panels
//! additionally append the user's entry to their transcript before
//! dispatching and clear the draft immediately after capturing it, so a
//! failed exchange leaves the user's message in the log with no reply after
//! it.
//!
//! Panel state lives only as long as the panel value; nothing is persisted.

use anyhow::Result;

use crate::dispatch::{Dispatcher, Endpoint, Payload};

// ---------------------------------------------------------------------------
// Chat transcript
// ---------------------------------------------------------------------------

/// One entry in a chat transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEntry {
    pub text: String,
    /// `true` for the user's own messages, `false` for remote replies.
    pub from_user: bool,
}

/// Ordered message log of a chat-style panel. Starts empty and is mutated
/// only by user actions and received replies.
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<MessageEntry>,
}

impl Transcript {
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.entries.push(MessageEntry {
            text: text.into(),
            from_user: true,
        });
    }

    pub fn push_reply(&mut self, text: impl Into<String>) {
        self.entries.push(MessageEntry {
            text: text.into(),
            from_user: false,
        });
    }

    pub fn entries(&self) -> &[MessageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Chat panels (chatbot, assistant)
// ---------------------------------------------------------------------------

/// A chat-style panel: a transcript plus an input draft.
///
/// The two chat tools differ only in which endpoint they target.
#[derive(Debug)]
pub struct ChatPanel {
    endpoint: Endpoint,
    pub transcript: Transcript,
    draft: String,
}

impl ChatPanel {
    /// Panel for the companion persona.
    pub fn chatbot() -> Self {
        Self::new(Endpoint::Chatbot)
    }

    /// Panel for the professional assistant persona.
    pub fn assistant() -> Self {
        Self::new(Endpoint::Assistant)
    }

    fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            transcript: Transcript::default(),
            draft: String::new(),
        }
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Send the current draft through one exchange.
    ///
    /// An empty draft is a no-op (`Ok(None)`, no exchange) — the presence
    /// check is the only input validation chat panels do. Otherwise the
    /// draft is captured and cleared, the user entry is appended, and the
    /// exchange runs; on success the reply's `result` field is appended and
    /// returned. On failure the transcript keeps the user entry and gains
    /// nothing else.
    pub fn send(&mut self, dispatcher: &Dispatcher) -> Result<Option<String>> {
        let text = std::mem::take(&mut self.draft);
        if text.is_empty() {
            return Ok(None);
        }

        self.transcript.push_user(&text);

        let payload = Payload::new().field("message", text);
        let reply = dispatcher.exchange(self.endpoint, &payload)?;
        let answer = reply.require("result")?.to_string();

        self.transcript.push_reply(&answer);
        Ok(Some(answer))
    }
}

// ---------------------------------------------------------------------------
// Single-output text panels (legal, summarize, medical)
// ---------------------------------------------------------------------------

/// A one-input, one-output panel. The three plain-text tools are instances
/// of this struct differing only in endpoint, payload field name, and
/// placeholder text.
#[derive(Debug)]
pub struct TextPanel {
    endpoint: Endpoint,
    field: &'static str,
    placeholder: &'static str,
    output: String,
}

impl TextPanel {
    pub fn legal_analyze() -> Self {
        Self::new(Endpoint::LegalAnalyze, "text", "Analyzing document...")
    }

    pub fn text_summarize() -> Self {
        Self::new(Endpoint::TextSummarize, "text", "Summarizing...")
    }

    pub fn medical() -> Self {
        Self::new(Endpoint::Medical, "symptoms", "Consulting knowledge base...")
    }

    fn new(endpoint: Endpoint, field: &'static str, placeholder: &'static str) -> Self {
        Self {
            endpoint,
            field,
            placeholder,
            output: String::new(),
        }
    }

    pub fn placeholder(&self) -> &str {
        self.placeholder
    }

    /// The current output field: empty, the placeholder, or a result.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Run one exchange for the given input.
    ///
    /// Empty input is still sent — these panels do no input validation. On
    /// failure the output keeps the placeholder.
    pub fn run(&mut self, dispatcher: &Dispatcher, input: &str) -> Result<&str> {
        self.output = self.placeholder.to_string();

        let payload = Payload::new().field(self.field, input);
        let reply = dispatcher.exchange(self.endpoint, &payload)?;

        self.output = reply.require("result")?.to_string();
        Ok(&self.output)
    }
}

// ---------------------------------------------------------------------------
// Code assist panel
// ---------------------------------------------------------------------------

/// Operating mode of the code-assist tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeMode {
    Generator,
    Debugger,
}

impl CodeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Generator => "generator",
            Self::Debugger => "debugger",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "generator" => Some(Self::Generator),
            "debugger" => Some(Self::Debugger),
            _ => None,
        }
    }
}

/// Panel for the code-assist tool: a mode selector and a query field.
#[derive(Debug, Default)]
pub struct CodePanel {
    output: String,
}

impl CodePanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn run(&mut self, dispatcher: &Dispatcher, mode: CodeMode, query: &str) -> Result<&str> {
        self.output = "Processing code...".to_string();

        let payload = Payload::new()
            .field("mode", mode.as_str())
            .field("query", query);
        let reply = dispatcher.exchange(Endpoint::CodeAssist, &payload)?;

        self.output = reply.require("result")?.to_string();
        Ok(&self.output)
    }
}

// ---------------------------------------------------------------------------
// News panel
// ---------------------------------------------------------------------------

/// Panel for the news tool: one input, two output fields with their own
/// placeholders.
#[derive(Debug, Default)]
pub struct NewsPanel {
    facts: String,
    summary: String,
}

impl NewsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn facts(&self) -> &str {
        &self.facts
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn run(&mut self, dispatcher: &Dispatcher, text: &str) -> Result<(&str, &str)> {
        self.facts = "Extracting...".to_string();
        self.summary = "Summarizing...".to_string();

        let payload = Payload::new().field("text", text);
        let reply = dispatcher.exchange(Endpoint::NewsSummarize, &payload)?;

        let facts = reply.require("facts")?.to_string();
        let summary = reply.require("summary")?.to_string();
        self.facts = facts;
        self.summary = summary;
        Ok((&self.facts, &self.summary))
    }
}

// ---------------------------------------------------------------------------
// Shop panel
// ---------------------------------------------------------------------------

/// Input fields of the shopping tool. All values travel as plain strings,
/// price bounds and rating included.
#[derive(Debug, Clone)]
pub struct ShopQuery {
    pub query: String,
    pub price_min: String,
    pub price_max: String,
    pub rating: String,
}

/// Panel for the shopping tool.
#[derive(Debug, Default)]
pub struct ShopPanel {
    output: String,
}

impl ShopPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn run(&mut self, dispatcher: &Dispatcher, query: &ShopQuery) -> Result<&str> {
        self.output = "Finding recommendations...".to_string();

        let payload = Payload::new()
            .field("query", query.query.clone())
            .field("price_min", query.price_min.clone())
            .field("price_max", query.price_max.clone())
            .field("rating", query.rating.clone());
        let reply = dispatcher.exchange(Endpoint::Ecommerce, &payload)?;

        self.output = reply.require("result")?.to_string();
        Ok(&self.output)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
