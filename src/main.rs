use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use swimstats::api::state::AppState;
use swimstats::config::AppConfig;
use swimstats::normalize::{EventClassifier, MeetNormalizer};
use swimstats::store::ResultStore;

#[derive(Parser)]
#[command(name = "swimstats")]
#[command(about = "Read-only analytics API over swim meet results")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address override
        #[arg(long)]
        host: Option<String>,

        /// Port override
        #[arg(long)]
        port: Option<u16>,
    },

    /// Debug utilities
    Debug {
        #[command(subcommand)]
        action: DebugAction,
    },
}

#[derive(Subcommand)]
enum DebugAction {
    /// Parse a race time string
    ParseTime { value: String },

    /// Normalize a meet name
    NormalizeMeet { name: String },

    /// Classify an event label
    ClassifyEvent { label: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?;

    // Initialize tracing
    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting swimstats v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Serve { host, port } => {
            let database_url = AppConfig::database_url()?;
            let store = ResultStore::connect(&database_url, &config.pool).await?;
            tracing::info!("Connected to data store");

            let state = AppState::new(store, &config);
            let app = swimstats::api::build_router(state, &config.server.cors_origins);

            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Debug { action } => match action {
            DebugAction::ParseTime { value } => {
                match swimstats::normalize::parse_race_time(&value) {
                    Some(seconds) => println!("{} -> {:.2}s", value, seconds),
                    None => println!("{} -> invalid", value),
                }
            }
            DebugAction::NormalizeMeet { name } => {
                let normalizer = MeetNormalizer::new();
                println!("{} -> {}", name, normalizer.simplify(&name));
                if normalizer.is_short_course(&name) {
                    println!("(short-course / winter meet)");
                }
            }
            DebugAction::ClassifyEvent { label } => {
                let classifier = EventClassifier::new();
                let class = classifier.classify(&label);
                let stroke = class
                    .stroke
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                let distance = class
                    .distance
                    .map(|d| format!("{}m", d))
                    .unwrap_or_else(|| "unknown".to_string());
                println!("{} -> stroke: {}, distance: {}", label, stroke, distance);
            }
        },
    }

    Ok(())
}
