mod config;
mod extract_cmd;
mod status_cmd;
mod terminal_output;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use paperforge_config::defaults::DEFAULT_PORT;
use paperforge_config::{redact, PaperForgeConfig};
use paperforge_gateway::start_server;
use paperforge_logging::init_logger;
use paperforge_understanding::build_provider;

use extract_cmd::ExtractArgs;

#[derive(Parser)]
#[command(name = "paperforge")]
#[command(about = "PaperForge: exam page to text relay")]
#[command(version)]
struct Cli {
    /// YAML config file (defaults to ./paperforge.yaml when present)
    #[arg(short, long, global = true, env = "PAPERFORGE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP relay
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,
        /// Port to bind
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Extract text from a local image with the configured provider
    Extract {
        /// Image file
        #[arg(short, long)]
        file: PathBuf,
        /// Paper section the page belongs to
        #[arg(short, long)]
        section: Option<String>,
        /// Split the text into classified question blocks
        #[arg(long)]
        segment: bool,
        /// Print JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
    /// Query a running relay's health endpoint
    Status {
        /// Base URL of the relay
        #[arg(long, env = "PAPERFORGE_URL")]
        url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let prepared = config::load(cli.config.as_deref()).await?;

    // Only the server logs at info by default; the other commands print results to stdout.
    let logging = &prepared.config.logging;
    let default_level = match cli.command {
        Commands::Serve { .. } => logging.level.clone().unwrap_or_else(|| "info".into()),
        _ => "warn".to_string(),
    };
    init_logger(
        &default_level,
        logging.dir.as_deref().map(Path::new),
        logging.json.unwrap_or(false),
    );
    prepared.log_findings();
    let mut config = prepared.config;

    match cli.command {
        Commands::Serve { host, port } => {
            if host.is_some() {
                config.server.host = host;
            }
            if port.is_some() {
                config.server.port = port;
            }
            run_server(config).await?;
        }
        Commands::Extract {
            file,
            section,
            segment,
            json,
        } => {
            let args = ExtractArgs {
                file,
                section,
                segment,
                json,
            };
            extract_cmd::run(&config, args).await?;
        }
        Commands::Status { url } => {
            let url = url.unwrap_or_else(|| {
                format!("http://127.0.0.1:{}", config.server.port.unwrap_or(DEFAULT_PORT))
            });
            status_cmd::run(&url).await?;
        }
    }

    Ok(())
}

async fn run_server(config: PaperForgeConfig) -> Result<()> {
    let redacted = redact(&serde_json::to_value(&config)?);
    info!(config = %redacted, "Starting PaperForge relay");

    let provider = build_provider(&config::provider_settings(&config))?;
    let state = Arc::new(config::gateway_state(&config, provider));

    let addr: SocketAddr = config
        .bind_addr()
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.bind_addr()))?;

    start_server(addr, state).await
}
