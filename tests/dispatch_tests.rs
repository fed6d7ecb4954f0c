/// Integration tests for the request dispatcher and the panel handlers.
///
/// Unit tests for each module live in its `#[cfg(test)]` block. These tests
/// exercise the real wire path: every exchange goes through `ureq` to a stub
/// tool server bound to an ephemeral loopback port, so form encoding, status
/// handling, and reply parsing are all covered end to end.
use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use tiny_http::{Header, Response, Server, StatusCode};

use aidesk::dispatch::{Dispatcher, Endpoint, Payload};
use aidesk::panels::{ChatPanel, CodeMode, CodePanel, NewsPanel, TextPanel};
use aidesk::web::FormData;

/// One request the stub saw: method, path, and raw body.
#[derive(Debug, Clone)]
struct SeenRequest {
    method: String,
    path: String,
    body: String,
}

/// Start a stub tool server that answers every request with `status` and
/// `body`, recording what it receives. Returns the base URL and the log.
fn spawn_stub(status: u16, body: &'static str) -> (String, Arc<Mutex<Vec<SeenRequest>>>) {
    let server = Server::http("127.0.0.1:0").expect("bind stub server");
    let addr = server.server_addr().to_ip().expect("tcp listener");
    let seen = Arc::new(Mutex::new(Vec::new()));

    let log = Arc::clone(&seen);
    thread::spawn(move || {
        for mut request in server.incoming_requests() {
            let mut buf = String::new();
            let _ = request.as_reader().read_to_string(&mut buf);
            log.lock().unwrap().push(SeenRequest {
                method: request.method().to_string(),
                path: request.url().to_string(),
                body: buf,
            });

            let resp = Response::from_data(body.as_bytes().to_vec())
                .with_header(Header::from_bytes("Content-Type", "application/json").unwrap())
                .with_status_code(StatusCode(status));
            let _ = request.respond(resp);
        }
    });

    (format!("http://{addr}"), seen)
}

fn dispatcher(base_url: &str) -> Dispatcher {
    Dispatcher::new(base_url).with_timeout(Duration::from_secs(5))
}

// ---------------------------------------------------------------------------
// Chat scenario: user entry, then reply, in order
// ---------------------------------------------------------------------------

#[test]
fn chat_round_trip_appends_user_then_reply() {
    let (url, seen) = spawn_stub(200, r#"{"result": "hello"}"#);
    let mut panel = ChatPanel::chatbot();

    panel.set_draft("hi");
    let answer = panel.send(&dispatcher(&url)).unwrap();
    assert_eq!(answer.as_deref(), Some("hello"));

    let entries = panel.transcript.entries();
    assert_eq!(entries.len(), 2);
    assert!(entries[0].from_user);
    assert_eq!(entries[0].text, "hi");
    assert!(!entries[1].from_user);
    assert_eq!(entries[1].text, "hello");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, "POST");
    assert_eq!(seen[0].path, "/api/chatbot");
    let form = FormData::parse(&seen[0].body);
    assert_eq!(form.get("message"), Some("hi"));
}

#[test]
fn payload_round_trips_reserved_characters() {
    let (url, seen) = spawn_stub(200, r#"{"result": "ok"}"#);
    let mut panel = ChatPanel::assistant();

    let tricky = "plan: a+b & c=100% — done?";
    panel.set_draft(tricky);
    panel.send(&dispatcher(&url)).unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].path, "/api/ai-assistant");
    let form = FormData::parse(&seen[0].body);
    assert_eq!(form.get("message"), Some(tricky));
}

// ---------------------------------------------------------------------------
// Failure handling: no result, placeholder remains
// ---------------------------------------------------------------------------

#[test]
fn error_status_yields_no_result() {
    let (url, seen) = spawn_stub(500, r#"{"error": "model exploded"}"#);
    let mut panel = TextPanel::text_summarize();

    let err = panel.run(&dispatcher(&url), "long article").unwrap_err();
    assert!(err.to_string().contains("/api/text-summarize"));
    // the placeholder stays; the failed exchange writes nothing
    assert_eq!(panel.output(), "Summarizing...");

    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[test]
fn failed_chat_keeps_only_the_user_entry() {
    let (url, _seen) = spawn_stub(503, r#"{"error": "busy"}"#);
    let mut panel = ChatPanel::chatbot();

    panel.set_draft("anyone home?");
    assert!(panel.send(&dispatcher(&url)).is_err());

    let entries = panel.transcript.entries();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].from_user);
}

#[test]
fn reply_missing_the_result_field_is_a_failure() {
    let (url, _seen) = spawn_stub(200, r#"{"ok": true}"#);
    let mut panel = ChatPanel::chatbot();

    panel.set_draft("hi");
    let err = panel.send(&dispatcher(&url)).unwrap_err();
    assert!(err.to_string().contains("`result`"));
    assert_eq!(panel.transcript.len(), 1);
}

#[test]
fn malformed_reply_body_is_a_failure() {
    let (url, _seen) = spawn_stub(200, "<html>definitely not json</html>");
    let reply = dispatcher(&url).exchange(Endpoint::Medical, &Payload::new().field("symptoms", "cough"));
    assert!(reply.is_err());
}

// ---------------------------------------------------------------------------
// Independence of exchanges
// ---------------------------------------------------------------------------

#[test]
fn same_payload_twice_makes_two_exchanges() {
    let (url, seen) = spawn_stub(200, r#"{"result": "ok"}"#);
    let d = dispatcher(&url);
    let payload = Payload::new().field("message", "ping");

    d.exchange(Endpoint::Chatbot, &payload).unwrap();
    d.exchange(Endpoint::Chatbot, &payload).unwrap();

    assert_eq!(seen.lock().unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Empty input handling
// ---------------------------------------------------------------------------

#[test]
fn empty_text_is_still_sent() {
    let (url, seen) = spawn_stub(200, r#"{"result": "nothing to summarize"}"#);
    let mut panel = TextPanel::text_summarize();

    panel.run(&dispatcher(&url), "").unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let form = FormData::parse(&seen[0].body);
    assert_eq!(form.get("text"), Some(""));
}

#[test]
fn empty_chat_draft_never_reaches_the_wire() {
    let (url, seen) = spawn_stub(200, r#"{"result": "unused"}"#);
    let mut panel = ChatPanel::chatbot();

    let sent = panel.send(&dispatcher(&url)).unwrap();
    assert!(sent.is_none());
    assert!(seen.lock().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Multi-field panels
// ---------------------------------------------------------------------------

#[test]
fn code_panel_sends_mode_and_query() {
    let (url, seen) = spawn_stub(200, r#"{"result": "fn main() {}"}"#);
    let mut panel = CodePanel::new();

    let out = panel
        .run(&dispatcher(&url), CodeMode::Generator, "hello world in rust")
        .unwrap();
    assert_eq!(out, "fn main() {}");

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].path, "/api/code-assist");
    let form = FormData::parse(&seen[0].body);
    assert_eq!(form.get("mode"), Some("generator"));
    assert_eq!(form.get("query"), Some("hello world in rust"));
}

#[test]
fn news_panel_writes_both_output_fields() {
    let (url, _seen) = spawn_stub(200, r#"{"facts": "It rained.", "summary": "Wet day."}"#);
    let mut panel = NewsPanel::new();

    let (facts, summary) = panel.run(&dispatcher(&url), "weather report").unwrap();
    assert_eq!(facts, "It rained.");
    assert_eq!(summary, "Wet day.");
}

#[test]
fn extra_reply_fields_are_ignored() {
    let (url, _seen) = spawn_stub(
        200,
        r#"{"result": "fine", "debug": "trace", "elapsed": 12}"#,
    );
    let reply = dispatcher(&url)
        .exchange(Endpoint::LegalAnalyze, &Payload::new().field("text", "clause"))
        .unwrap();
    assert_eq!(reply.field("result"), Some("fine"));
}
