//! Third Eye monitor
//!
//! Listens for sensor-node frames, keeps the rolling motion window and
//! announces the current alert.
//!
//! # Usage
//!
//! ```bash
//! # Listen on the default port (5007)
//! cargo run --release --bin third-eye
//!
//! # Feed it from the simulated sensor node
//! cargo run --release --bin sensor-node
//! ```
//!
//! # Environment Variables
//!
//! - `THIRD_EYE_CONFIG`: Path to a TOML config file (default: ./third_eye.toml)
//! - `THIRD_EYE_SPEECH_COMMAND`: External speech program (e.g. espeak)
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::info;

use third_eye::alert::AlertMonitor;
use third_eye::config::PipelineConfig;
use third_eye::presentation::ConsoleSink;
use third_eye::telemetry::{IngestorStart, TelemetryContext, TelemetryIngestor};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "third-eye")]
#[command(about = "Third Eye assistive navigation monitor")]
#[command(version)]
struct CliArgs {
    /// Path to a TOML config file (overrides THIRD_EYE_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Interface to bind (e.g. 0.0.0.0)
    #[arg(long)]
    bind: Option<String>,

    /// External speech program (e.g. espeak)
    #[arg(long, env = "THIRD_EYE_SPEECH_COMMAND")]
    speech_command: Option<String>,
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    let mut config = match &args.config {
        Some(path) => PipelineConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => PipelineConfig::load(),
    };
    if let Some(port) = args.port {
        config.receiver.port = port;
    }
    if let Some(bind) = args.bind {
        config.receiver.bind_host = bind;
    }
    if let Some(command) = args.speech_command {
        config.speech.command = Some(command);
    }
    config.validate().context("Invalid configuration")?;
    let bind_addr = config.receiver.bind_addr()?;

    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("  🦾 Third Eye - Assistive Navigation Monitor");
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!(
        "   History: {} samples/axis | Evaluate every {} ms | Obstacle < {} mm",
        config.receiver.buffer_capacity,
        config.alerts.evaluation_interval_ms,
        config.alerts.proximity_threshold_mm
    );
    match &config.speech.command {
        Some(cmd) if config.speech.enabled => info!("   Speech: {} at {} wpm", cmd, config.speech.rate_wpm),
        _ => info!("   Speech: console only"),
    }

    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("🛑 Received Ctrl+C, initiating shutdown...");
        shutdown_token.cancel();
    });

    let context = TelemetryContext::new(config.receiver.buffer_capacity);

    let ingestor = TelemetryIngestor::start(
        &context,
        bind_addr,
        config.receiver.max_datagram_bytes,
        cancel_token.clone(),
    )?;

    let monitor = AlertMonitor::new(
        context.clone(),
        &config.alerts,
        ConsoleSink::from_config(&config.speech),
    );
    monitor.run(cancel_token.clone()).await;

    if let IngestorStart::Started(handle) = ingestor {
        cancel_token.cancel();
        if let Err(e) = handle.await {
            tracing::warn!("Ingestor task ended abnormally: {}", e);
        }
    }

    let counters = context.counters().await;
    info!(
        "✓ Third Eye shutdown complete ({} frames, {} malformed, {} receive errors)",
        counters.frames_ingested, counters.decode_failures, counters.receive_errors
    );
    Ok(())
}
