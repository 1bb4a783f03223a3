mod config;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use shezhen_analysis::{GeminiAnalyzer, TongueAnalyzer};
use shezhen_core::AnalysisOutcome;
use shezhen_gateway::{start_server, GatewayState};

use config::Config;

#[derive(Parser)]
#[command(name = "shezhen")]
#[command(about = "Shezhen — AI tongue-diagnosis assistant for TCM practitioners")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Shezhen HTTP server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Analyze a single tongue photo from disk
    Analyze {
        /// Path to the image file (JPEG, PNG, ...)
        file: PathBuf,
    },
    /// Show the status of a running instance
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            let config = Config {
                port: port.unwrap_or(config.port),
                ..config
            };
            run_server(config).await?;
        }
        Commands::Analyze { file } => {
            analyze_file(&config, &file).await?;
        }
        Commands::Status => {
            let client = reqwest::Client::new();
            match client
                .get(format!("http://localhost:{}/api/health", config.port))
                .send()
                .await
            {
                Ok(resp) => {
                    let body: serde_json::Value = resp.json().await?;
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                Err(_) => {
                    println!("Shezhen is not running on port {}", config.port);
                }
            }
        }
    }

    Ok(())
}

async fn run_server(config: Config) -> Result<()> {
    let api_key = config.require_api_key()?;
    let analyzer = GeminiAnalyzer::new(api_key).with_model(&config.model);

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port)
        .parse()
        .context("invalid bind address")?;

    info!(model = %config.model, "Starting Shezhen server");
    let state = GatewayState::new(Arc::new(analyzer));
    start_server(addr, state).await
}

/// One-shot analysis of an image file, printed to the terminal.
async fn analyze_file(config: &Config, file: &PathBuf) -> Result<()> {
    let api_key = config.require_api_key()?;

    let mime = shezhen_media::detect_mime_type(file);
    if !shezhen_media::is_image(mime) {
        bail!("{} is not an image file (detected {})", file.display(), mime);
    }

    let image = tokio::fs::read(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;

    info!(file = %file.display(), mime, bytes = image.len(), "Analyzing tongue photo");
    let analyzer = GeminiAnalyzer::new(api_key).with_model(&config.model);

    match analyzer.analyze(&image, mime).await? {
        AnalysisOutcome::Diagnosis(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        AnalysisOutcome::Declined(message) => {
            println!("Analisis ditolak: {message}");
        }
    }

    Ok(())
}
