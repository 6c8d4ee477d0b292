//! Simulated Sensor Node
//!
//! Generates motion / proximity frames at a fixed rate and sends a copy of
//! each to every configured monitor port. Scenarios:
//! - Normal walking (clear path)
//! - Obstacle ahead (short time-of-flight distance)
//! - Fall (violent IMU readings)
//! - Horn (vehicle horn heard)
//!
//! A new scenario is drawn at random once the current one has run for the
//! dwell duration.
//!
//! # Usage
//! ```bash
//! ./sensor-node --host 127.0.0.1 --port 5005 --port 5007
//! ./sensor-node --seed 42 --dwell-secs 2
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use third_eye::config::PipelineConfig;
use third_eye::scenario::{ScenarioGenerator, SystemClock};
use third_eye::transport::FrameSender;

/// How often a progress line is logged (frames).
const PROGRESS_LOG_EVERY: u64 = 100;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "sensor-node")]
#[command(about = "Simulated Third Eye sensor node")]
#[command(version = "1.0")]
struct Args {
    /// Path to a TOML config file (overrides THIRD_EYE_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Destination host
    #[arg(long)]
    host: Option<String>,

    /// Destination port (repeat for fan-out)
    #[arg(short, long = "port")]
    ports: Vec<u16>,

    /// Interval between frames in milliseconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=60_000))]
    interval_ms: Option<u64>,

    /// Scenario dwell duration in seconds
    #[arg(long)]
    dwell_secs: Option<f64>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,
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

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => PipelineConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => PipelineConfig::load(),
    };
    let sender_config = &mut config.sender;
    if let Some(host) = args.host {
        sender_config.host = host;
    }
    if !args.ports.is_empty() {
        sender_config.ports = args.ports;
    }
    if let Some(interval_ms) = args.interval_ms {
        sender_config.tick_interval_ms = interval_ms;
    }
    if let Some(dwell) = args.dwell_secs {
        sender_config.dwell_secs = dwell;
    }
    if args.seed.is_some() {
        sender_config.seed = args.seed;
    }
    config.validate().context("Invalid configuration")?;
    let sender_config = config.sender;

    let destinations = FrameSender::resolve(&sender_config.host, &sender_config.ports).await?;
    let mut sender = FrameSender::bind(destinations).await?;
    let mut generator =
        ScenarioGenerator::new(SystemClock, sender_config.dwell_secs, sender_config.seed);

    info!("Mock sensor node started");
    info!(
        "   Destinations: {} | Rate: {:.1} Hz | Dwell: {:.1}s",
        sender
            .destinations()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
        1000.0 / sender_config.tick_interval_ms as f64,
        sender_config.dwell_secs
    );
    if let Some(seed) = sender_config.seed {
        info!("   Random seed: {}", seed);
    }

    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("🛑 Received Ctrl+C, stopping sensor node...");
        shutdown_token.cancel();
    });

    let mut interval = tokio::time::interval(Duration::from_millis(sender_config.tick_interval_ms));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel_token.cancelled() => break,
            _ = interval.tick() => {}
        }

        let frame = generator.tick();
        let report = sender.send(&frame).await?;
        debug!(
            scenario = generator.state().scenario.name(),
            proximity_mm = frame.proximity_mm,
            delivered = report.delivered,
            "Frame sent"
        );

        if generator.frames_generated() % PROGRESS_LOG_EVERY == 0 {
            info!(
                "Frames: {} | Scenario: {} | Send failures: {}",
                sender.frames_sent(),
                generator.state().scenario.name(),
                sender.send_failures()
            );
        }
    }

    info!(
        "✓ Sensor node stopped after {} frames ({} scenario draws)",
        sender.frames_sent(),
        generator.redraws()
    );
    Ok(())
}
