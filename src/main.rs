//! Sentiment API CLI - serve the HTTP API or work with the history directly

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use sentiment_api::config::{self, SentimentConfig};
use sentiment_api::server::{self, ServeSettings};
use sentiment_api::service::{clamp_history_limit, AnalysisService};
use sentiment_api::{AnalyzeOutcome, SqliteStore, VaderScorer};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "sentiment-api")]
#[command(version)]
#[command(about = "Sentiment analysis service with SQLite-backed history")]
#[command(long_about = r#"
Scores free text with the VADER lexicon analyzer and keeps every result.

Example usage:
  sentiment-api serve --port 8000
  sentiment-api analyze --text "What a lovely day"
  sentiment-api history --limit 5
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file (default: sentiment.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Bind address
        #[arg(short, long)]
        bind: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Write a default sentiment.toml
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Score and store a single text
    Analyze {
        /// Text to analyze
        #[arg(short, long)]
        text: String,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Print the most recent analyses as JSON
    History {
        /// Maximum number of records
        #[arg(short, long)]
        limit: Option<i64>,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let file_config = config::load_config(cli.config.as_deref())?.unwrap_or_default();

    match cli.command {
        Commands::Serve { database, bind, port } => {
            let settings = ServeSettings {
                database: database.unwrap_or_else(|| file_config.database_path()),
                bind: bind.unwrap_or_else(|| file_config.bind().to_string()),
                port: port.unwrap_or_else(|| file_config.port()),
                allowed_origins: file_config.allowed_origins(),
            };
            server::start_server(settings, Arc::new(VaderScorer::new())).await?;
        }

        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(config::default_config_path);
            config::write_config(&path, &SentimentConfig::with_defaults(), force)?;
            println!("✅ Wrote config to {}", path.display());
        }

        Commands::Analyze { text, database } => {
            let service = open_service(database, &file_config)?;
            match service.analyze(&text)? {
                AnalyzeOutcome::Scored(record) => {
                    println!("{}", serde_json::to_string_pretty(&record)?);
                }
                AnalyzeOutcome::EmptyText => anyhow::bail!("Text is empty"),
            }
        }

        Commands::History { limit, database } => {
            let service = open_service(database, &file_config)?;
            let records = service.history(clamp_history_limit(limit))?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
    }

    Ok(())
}

fn open_service(database: Option<PathBuf>, file_config: &SentimentConfig) -> anyhow::Result<AnalysisService> {
    let database = database.unwrap_or_else(|| file_config.database_path());
    tracing::debug!("Using database {}", database.display());
    let store = SqliteStore::open(&database)?;
    Ok(AnalysisService::new(store, Arc::new(VaderScorer::new())))
}
