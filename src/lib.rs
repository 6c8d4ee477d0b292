//! Third Eye: assistive navigation telemetry
//!
//! A simulated sensor node streams motion and proximity frames over UDP; the
//! monitor ingests them into a rolling window and derives a prioritized,
//! debounced alert for display and speech.
//!
//! ## Architecture
//!
//! - **Scenario Generator**: time-driven normal/obstacle/fall/horn frames
//! - **Frame Transport**: JSON over best-effort UDP, fan-out on send
//! - **Telemetry Ingestor**: background receive loop into shared state
//! - **Alert Engine**: priority ladder, evaluation cadence, speech debounce
//! - **Presentation Sink**: display and speech boundary

pub mod alert;
pub mod config;
pub mod presentation;
pub mod scenario;
pub mod telemetry;
pub mod transport;
pub mod types;

pub use config::PipelineConfig;

pub use types::{AlertLabel, Axis, Frame, Motion, RawAlert, Severity};

pub use alert::{decide, AlertMonitor, AlertPolicy};
pub use scenario::{Scenario, ScenarioGenerator};
pub use telemetry::{IngestorStart, TelemetryContext, TelemetryIngestor};
pub use transport::{FrameReceiver, FrameSender, TransportError};
