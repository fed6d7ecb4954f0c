//! Request log for the dashboard server, and aggregation for `aidesk stats`.
//!
//! One JSONL record per served tool request (`~/.aidesk/request-log.jsonl`):
//! which tool, how long, whether it succeeded. Logging is diagnostics only —
//! panel content is never written, and a logging failure is swallowed so it
//! can never fail the request being served.

use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config;

// ---------------------------------------------------------------------------
// Request log entries
// ---------------------------------------------------------------------------

/// A single entry in the request log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestLogEntry {
    pub timestamp: String,
    /// Tool name (`"chatbot"`, `"summarize"`, …).
    pub tool: String,
    pub latency_ms: u64,
    pub success: bool,
}

/// Record one served tool request. Errors are swallowed.
pub fn log_request(tool: &str, latency_ms: u64, success: bool) {
    let entry = RequestLogEntry {
        timestamp: Utc::now().to_rfc3339(),
        tool: tool.to_string(),
        latency_ms,
        success,
    };
    let _ = append_entry(&entry);
}

fn append_entry(entry: &RequestLogEntry) -> Result<()> {
    let Some(path) = request_log_path() else {
        return Ok(());
    };

    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(entry)?;
    writeln!(file, "{json}")?;

    Ok(())
}

/// Read all request log entries, skipping malformed lines. An absent or
/// unreadable file is an empty log.
pub fn read_all_entries() -> Vec<RequestLogEntry> {
    let Some(path) = request_log_path() else {
        return Vec::new();
    };

    let Ok(file) = fs::File::open(path) else {
        return Vec::new();
    };

    BufReader::new(file)
        .lines()
        .map_while(Result::ok)
        .filter_map(|line| serde_json::from_str::<RequestLogEntry>(&line).ok())
        .collect()
}

/// Path to the request log file.
pub fn request_log_path() -> Option<PathBuf> {
    config::desk_dir().map(|dir| dir.join("request-log.jsonl"))
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Per-tool aggregate for `aidesk stats`.
#[derive(Debug, Clone, Serialize)]
pub struct ToolStats {
    pub tool: String,
    pub count: usize,
    pub failures: usize,
    pub avg_latency_ms: u64,
}

/// Aggregate the request log per tool, busiest tool first.
pub fn compute_stats() -> Vec<ToolStats> {
    aggregate(&read_all_entries())
}

/// Aggregate a slice of entries per tool, busiest tool first.
pub fn aggregate(entries: &[RequestLogEntry]) -> Vec<ToolStats> {
    let mut stats: Vec<ToolStats> = Vec::new();

    for entry in entries {
        let idx = match stats.iter().position(|s| s.tool == entry.tool) {
            Some(idx) => idx,
            None => {
                stats.push(ToolStats {
                    tool: entry.tool.clone(),
                    count: 0,
                    failures: 0,
                    avg_latency_ms: 0,
                });
                stats.len() - 1
            }
        };
        let slot = &mut stats[idx];

        // avg_latency_ms doubles as a running total until the final pass
        slot.avg_latency_ms += entry.latency_ms;
        slot.count += 1;
        if !entry.success {
            slot.failures += 1;
        }
    }

    for slot in &mut stats {
        if slot.count > 0 {
            slot.avg_latency_ms /= slot.count as u64;
        }
    }

    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(tool: &str, latency_ms: u64, success: bool) -> RequestLogEntry {
        RequestLogEntry {
            timestamp: "2026-01-01T00:00:00Z".to_string(),
            tool: tool.to_string(),
            latency_ms,
            success,
        }
    }

    #[test]
    fn aggregate_groups_per_tool() {
        let entries = vec![
            entry("chatbot", 100, true),
            entry("chatbot", 300, true),
            entry("summarize", 50, false),
        ];
        let stats = aggregate(&entries);

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].tool, "chatbot");
        assert_eq!(stats[0].count, 2);
        assert_eq!(stats[0].avg_latency_ms, 200);
        assert_eq!(stats[0].failures, 0);
        assert_eq!(stats[1].tool, "summarize");
        assert_eq!(stats[1].failures, 1);
    }

    #[test]
    fn aggregate_of_empty_log_is_empty() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn busiest_tool_sorts_first() {
        let entries = vec![
            entry("medical", 10, true),
            entry("news", 10, true),
            entry("news", 10, true),
        ];
        let stats = aggregate(&entries);
        assert_eq!(stats[0].tool, "news");
    }

    #[test]
    fn log_entry_round_trips_through_json() {
        let e = entry("shop", 1234, true);
        let json = serde_json::to_string(&e).unwrap();
        let back: RequestLogEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.tool, "shop");
        assert_eq!(back.latency_ms, 1234);
        assert!(back.success);
    }
}
