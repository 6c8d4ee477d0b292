//! Presentation Sink
//!
//! Boundary to whatever shows and vocalizes alerts. The monitor depends only
//! on [`PresentationSink`]; how a sink renders or speaks is its own business.

mod console;

pub use console::{ConsoleSink, SpeechCommand};

use async_trait::async_trait;
use thiserror::Error;

use crate::telemetry::MotionHistory;
use crate::types::{AlertLabel, Severity};

#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("Failed to spawn speech command '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Speech command '{program}' exited with {status}")]
    Failed { program: String, status: String },
}

/// What the display shows on one UI tick.
#[derive(Debug, Clone, Copy)]
pub struct DisplayView<'a> {
    pub label: AlertLabel,
    pub severity: Severity,
    pub distance_mm: u32,
    pub recent_motion: &'a MotionHistory,
}

#[async_trait]
pub trait PresentationSink: Send {
    /// Refresh the visual display. Called on every UI tick.
    fn display(&mut self, view: &DisplayView<'_>);

    /// Vocalize a message. The monitor waits for this to finish.
    async fn speak(&mut self, message: &str) -> Result<(), SpeechError>;
}
