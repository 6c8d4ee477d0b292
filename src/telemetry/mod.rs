//! Telemetry ingestion and shared state
//!
//! - `buffer`: per-axis rolling history
//! - `state`: [`TelemetryContext`], the single shared state handle
//! - `ingestor`: the background receive loop that writes into it

pub mod buffer;
pub mod ingestor;
pub mod state;

pub use buffer::{MotionHistory, RollingBuffer};
pub use ingestor::{IngestorStart, TelemetryIngestor};
pub use state::{IngestCounters, Readings, TelemetryContext, TelemetryState};
