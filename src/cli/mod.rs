//! CLI command implementations for the aidesk tools and diagnostics.
//!
//! Provides subcommand handlers for:
//! - `aidesk chat` / `aidesk assist` — interactive chat over a chat panel
//! - `aidesk code|legal|summarize|news|shop|medical` — one-shot tool runs
//! - `aidesk stats` — request log aggregation
//! - `aidesk health` — config, server, and Ollama checks
//! - `aidesk config show|init|set|reset` — configuration management
//!
//! Every tool command drives the same [`Dispatcher`] the dashboard frontend
//! uses; a failed exchange propagates as the command's single error.

use std::io::{BufRead, Read, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::analytics::{self, ToolStats};
use crate::config;
use crate::dispatch::Dispatcher;
use crate::llm::OllamaClient;
use crate::panels::{ChatPanel, CodeMode, CodePanel, NewsPanel, ShopPanel, ShopQuery, TextPanel};

/// Output format for `aidesk stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            _ => Self::Table,
        }
    }
}

// ---------------------------------------------------------------------------
// aidesk chat / assist
// ---------------------------------------------------------------------------

/// Interactive chat REPL over a chat-style panel.
///
/// A blank line (or EOF) ends the session. A failed exchange prints one
/// error line and the conversation continues — the transcript keeps the
/// user's message with no reply after it, same as the dashboard.
pub fn run_chat(server: &str, assistant: bool) -> Result<()> {
    let dispatcher = Dispatcher::new(server);
    let mut panel = if assistant {
        ChatPanel::assistant()
    } else {
        ChatPanel::chatbot()
    };

    let title = if assistant { "AI Assistant" } else { "Chat Bot" };
    println!("{} {}", title.bold().cyan(), "(blank line to quit)".dimmed());

    let stdin = std::io::stdin();
    loop {
        print!("{} ", "you ›".cyan().bold());
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();
        if line.is_empty() {
            break;
        }

        panel.set_draft(line);
        match panel.send(&dispatcher) {
            Ok(Some(reply)) => println!("{} {}", "desk ›".magenta().bold(), reply.trim()),
            Ok(None) => {}
            Err(e) => eprintln!("{} {e:#}", "error:".red().bold()),
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// One-shot tools
// ---------------------------------------------------------------------------

/// `aidesk code --mode <generator|debugger> <query…>`
pub fn run_code(server: &str, mode: &str, query: &str) -> Result<()> {
    let mode = CodeMode::parse(mode).context("mode must be `generator` or `debugger`")?;
    let dispatcher = Dispatcher::new(server);
    let mut panel = CodePanel::new();

    eprintln!("{}", "Processing code...".dimmed());
    let result = panel.run(&dispatcher, mode, query)?;
    println!("{}", result.trim());
    Ok(())
}

/// `aidesk legal [text…|stdin]`
pub fn run_legal(server: &str, text: &str) -> Result<()> {
    run_text_panel(TextPanel::legal_analyze(), server, text)
}

/// `aidesk summarize [text…|stdin]`
pub fn run_summarize(server: &str, text: &str) -> Result<()> {
    run_text_panel(TextPanel::text_summarize(), server, text)
}

/// `aidesk medical <symptoms…>`
pub fn run_medical(server: &str, symptoms: &str) -> Result<()> {
    run_text_panel(TextPanel::medical(), server, symptoms)
}

fn run_text_panel(mut panel: TextPanel, server: &str, input: &str) -> Result<()> {
    let dispatcher = Dispatcher::new(server);

    eprintln!("{}", panel.placeholder().dimmed());
    let result = panel.run(&dispatcher, input)?;
    println!("{}", result.trim());
    Ok(())
}

/// `aidesk news [text…|stdin]`
pub fn run_news(server: &str, text: &str) -> Result<()> {
    let dispatcher = Dispatcher::new(server);
    let mut panel = NewsPanel::new();

    eprintln!("{}", "Extracting facts and summarizing...".dimmed());
    let (facts, summary) = panel.run(&dispatcher, text)?;

    println!("{}", "Facts".bold().cyan());
    println!("{}", facts.trim());
    println!();
    println!("{}", "Summary".bold().cyan());
    println!("{}", summary.trim());
    Ok(())
}

/// `aidesk shop --query … [--min --max --rating]`
pub fn run_shop(server: &str, query: ShopQuery) -> Result<()> {
    let dispatcher = Dispatcher::new(server);
    let mut panel = ShopPanel::new();

    eprintln!("{}", "Finding recommendations...".dimmed());
    let result = panel.run(&dispatcher, &query)?;
    println!("{}", result.trim());
    Ok(())
}

/// Join positional args, or read stdin to the end when there are none.
pub fn input_or_stdin(args: &[String]) -> Result<String> {
    if args.is_empty() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read input from stdin")?;
        Ok(text)
    } else {
        Ok(args.join(" "))
    }
}

// ---------------------------------------------------------------------------
// aidesk stats
// ---------------------------------------------------------------------------

/// Show per-tool request statistics from the dashboard log.
pub fn run_stats(format: OutputFormat) -> Result<()> {
    let stats = analytics::compute_stats();

    if stats.is_empty() {
        println!(
            "{}",
            "No data yet. Serve the dashboard and run some tools to see stats.".yellow()
        );
        return Ok(());
    }

    match format {
        OutputFormat::Json => print_stats_json(&stats)?,
        OutputFormat::Table => print_stats_table(&stats),
    }

    Ok(())
}

fn print_stats_table(stats: &[ToolStats]) {
    println!("{}", "aidesk Request Report".bold().cyan());
    println!("{}", "=".repeat(48));
    println!(
        "  {:<12} {:>8} {:>9} {:>12}",
        "Tool", "Requests", "Failures", "Avg latency"
    );
    println!("  {}", "-".repeat(46));

    for (i, tool) in stats.iter().enumerate() {
        let line = format!(
            "  {:<12} {:>8} {:>9} {:>10}ms",
            tool.tool, tool.count, tool.failures, tool.avg_latency_ms
        );
        if i % 2 == 0 {
            println!("{line}");
        } else {
            println!("{}", line.dimmed());
        }
    }
}

fn print_stats_json(stats: &[ToolStats]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(stats)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// aidesk health
// ---------------------------------------------------------------------------

/// Check desk health: config file, dashboard server, Ollama, request log.
pub fn run_health(server: &str) -> Result<()> {
    println!("{}", "aidesk Health Check".bold().cyan());
    println!("{}", "=".repeat(40));

    let config_exists = config::config_file_path()
        .map(|p| p.exists())
        .unwrap_or(false);
    print_health_item(
        "Config file",
        config_exists,
        if config_exists {
            "~/.aidesk/config.toml found"
        } else {
            "not found (run `aidesk config init` to create)"
        },
    );

    let cfg = config::load();
    print_health_item("Model", true, &cfg.ollama.model);

    let server_ok = ureq::get(&format!("{}/api/health", server.trim_end_matches('/')))
        .timeout(Duration::from_secs(3))
        .call()
        .is_ok();
    print_health_item(
        "Dashboard",
        server_ok,
        &if server_ok {
            format!("reachable at {server}")
        } else {
            format!("not reachable at {server} — is `aidesk serve` running?")
        },
    );

    let ollama = OllamaClient::from_config(&cfg);
    let ollama_ok = ollama.is_healthy();
    print_health_item(
        "Ollama",
        ollama_ok,
        &if ollama_ok {
            format!("reachable at {}", cfg.ollama.url)
        } else {
            "not reachable — is Ollama running?".to_string()
        },
    );

    let log_exists = analytics::request_log_path()
        .map(|p| p.exists())
        .unwrap_or(false);
    let log_entries = if log_exists {
        analytics::read_all_entries().len()
    } else {
        0
    };
    print_health_item(
        "Request log",
        log_exists,
        &if log_exists {
            format!("{log_entries} entries")
        } else {
            "no log file yet".to_string()
        },
    );

    Ok(())
}

fn print_health_item(name: &str, ok: bool, detail: &str) {
    let status = if ok {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {:<14} {}", status, name, detail.dimmed());
}

// ---------------------------------------------------------------------------
// aidesk config show | init | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (fully resolved) configuration as TOML.
pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective aidesk Configuration".bold().cyan());
    println!("{}", "=".repeat(40));
    println!();
    println!("{toml_str}");

    let exists = config::config_file_path()
        .map(|p| p.exists())
        .unwrap_or(false);
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    if exists {
        println!("  {} {}", "✓".green(), "~/.aidesk/config.toml".dimmed());
    } else {
        println!(
            "  {} {}",
            "·".dimmed(),
            "~/.aidesk/config.toml (not found)".dimmed()
        );
    }
    println!("  {} {}", "·".dimmed(), "AIDESK_* environment variables".dimmed());

    Ok(())
}

/// Initialize a default config file at `~/.aidesk/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!("{} Config written to {}", "✓".green().bold(), path.display());
    println!("  {}", "Edit the file to point aidesk at your model.".dimmed());
    Ok(())
}

/// Set a single configuration value in the config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_parsing() {
        assert_eq!(OutputFormat::from_str_opt(None), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str_opt(Some("json")), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str_opt(Some("csv")), OutputFormat::Table);
    }

    #[test]
    fn input_joins_positional_args() {
        let args = vec!["flu".to_string(), "and".to_string(), "fever".to_string()];
        assert_eq!(input_or_stdin(&args).unwrap(), "flu and fever");
    }
}
