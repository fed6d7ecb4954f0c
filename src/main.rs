use anyhow::Result;
use clap::{Parser, Subcommand};

use aidesk::dispatch::DEFAULT_SERVER;
use aidesk::panels::ShopQuery;
use aidesk::{cli, config, web};

#[derive(Debug, Parser)]
#[command(name = "aidesk")]
#[command(about = "Local multi-tool AI desk backed by Ollama")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the dashboard server with the embedded web frontend
    Serve {
        /// Listen address (overrides config)
        #[arg(long)]
        addr: Option<String>,
    },
    /// Chat with the companion persona
    Chat {
        #[arg(long, default_value = DEFAULT_SERVER)]
        server: String,
    },
    /// Chat with the professional assistant persona
    Assist {
        #[arg(long, default_value = DEFAULT_SERVER)]
        server: String,
    },
    /// Generate or debug code
    Code {
        /// Tool mode: generator or debugger
        #[arg(long, default_value = "generator")]
        mode: String,
        #[arg(long, default_value = DEFAULT_SERVER)]
        server: String,
        /// The task description or code to debug
        #[arg(trailing_var_arg = true, required = true)]
        query: Vec<String>,
    },
    /// Analyze a legal document (argument text, or stdin when omitted)
    Legal {
        #[arg(long, default_value = DEFAULT_SERVER)]
        server: String,
        text: Vec<String>,
    },
    /// Summarize text (argument text, or stdin when omitted)
    Summarize {
        #[arg(long, default_value = DEFAULT_SERVER)]
        server: String,
        text: Vec<String>,
    },
    /// Extract the facts from news text and summarize it
    News {
        #[arg(long, default_value = DEFAULT_SERVER)]
        server: String,
        text: Vec<String>,
    },
    /// Recommend products under price and rating constraints
    Shop {
        #[arg(long)]
        query: String,
        #[arg(long, default_value = "0")]
        min: String,
        #[arg(long, default_value = "1000")]
        max: String,
        #[arg(long, default_value = "4")]
        rating: String,
        #[arg(long, default_value = DEFAULT_SERVER)]
        server: String,
    },
    /// List likely causes for a set of symptoms
    Medical {
        #[arg(long, default_value = DEFAULT_SERVER)]
        server: String,
        #[arg(required = true)]
        symptoms: Vec<String>,
    },
    /// Show request statistics from the dashboard log
    Stats {
        /// Output format: table (default) or json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Check desk health: config, dashboard server, Ollama
    Health {
        #[arg(long, default_value = DEFAULT_SERVER)]
        server: String,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the annotated default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Set a dotted config key, e.g. `ollama.model mistral`
    Set { key: String, value: String },
    /// Reset the config file to defaults
    Reset,
}

fn main() -> Result<()> {
    let app = App::parse();

    match app.command {
        Commands::Serve { addr } => {
            let cfg = config::load();
            let addr = addr.unwrap_or_else(|| cfg.server.listen_addr.clone());
            web::serve(&addr, &cfg)
        }
        Commands::Chat { server } => cli::run_chat(&server, false),
        Commands::Assist { server } => cli::run_chat(&server, true),
        Commands::Code {
            mode,
            server,
            query,
        } => cli::run_code(&server, &mode, &query.join(" ")),
        Commands::Legal { server, text } => {
            let text = cli::input_or_stdin(&text)?;
            cli::run_legal(&server, &text)
        }
        Commands::Summarize { server, text } => {
            let text = cli::input_or_stdin(&text)?;
            cli::run_summarize(&server, &text)
        }
        Commands::News { server, text } => {
            let text = cli::input_or_stdin(&text)?;
            cli::run_news(&server, &text)
        }
        Commands::Shop {
            query,
            min,
            max,
            rating,
            server,
        } => cli::run_shop(
            &server,
            ShopQuery {
                query,
                price_min: min,
                price_max: max,
                rating,
            },
        ),
        Commands::Medical { server, symptoms } => {
            cli::run_medical(&server, &symptoms.join(" "))
        }
        Commands::Stats { format } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_stats(fmt)
        }
        Commands::Health { server } => cli::run_health(&server),
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
    }
}
