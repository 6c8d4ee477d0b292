//! Shared telemetry state and the context handle that owns it.
//!
//! The context is constructed once by the process entry point and cloned into
//! the ingestion task and the polling task. Every read and write goes through
//! the same lock, held for a single update or copy only.

use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::buffer::MotionHistory;
use crate::config::defaults::INITIAL_PROXIMITY_MM;
use crate::types::{Frame, RawAlert};

// ============================================================================
// State
// ============================================================================

/// Ingestion outcome counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestCounters {
    pub frames_ingested: u64,
    pub decode_failures: u64,
    pub receive_errors: u64,
}

/// Latest scalar readings plus the motion history.
#[derive(Debug, Clone)]
pub struct TelemetryState {
    pub motion: MotionHistory,
    pub raw_alert: RawAlert,
    pub proximity_mm: u32,
    /// Sender timestamp of the most recent frame
    pub last_frame_timestamp: Option<f64>,
    pub counters: IngestCounters,
}

impl TelemetryState {
    pub fn new(buffer_capacity: usize) -> Self {
        Self {
            motion: MotionHistory::new(buffer_capacity),
            raw_alert: RawAlert::Clear,
            proximity_mm: INITIAL_PROXIMITY_MM,
            last_frame_timestamp: None,
            counters: IngestCounters::default(),
        }
    }

    /// Overwrite the latest readings and advance all six motion buffers.
    pub fn apply(&mut self, frame: &Frame) {
        self.raw_alert = frame.raw_alert.clone();
        self.proximity_mm = frame.proximity_mm;
        self.last_frame_timestamp = Some(frame.timestamp);
        self.motion.push(&frame.motion);
        self.counters.frames_ingested += 1;
    }
}

/// The two values alert evaluation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readings {
    pub raw_alert: RawAlert,
    pub proximity_mm: u32,
}

// ============================================================================
// Context
// ============================================================================

/// Cloneable handle to the process-wide telemetry state.
#[derive(Debug, Clone)]
pub struct TelemetryContext {
    state: Arc<RwLock<TelemetryState>>,
    ingestor_claimed: Arc<AtomicBool>,
}

impl TelemetryContext {
    pub fn new(buffer_capacity: usize) -> Self {
        Self {
            state: Arc::new(RwLock::new(TelemetryState::new(buffer_capacity))),
            ingestor_claimed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Apply one decoded frame. Readers see either none or all of it.
    pub async fn ingest(&self, frame: &Frame) {
        self.state.write().await.apply(frame);
    }

    pub async fn record_decode_failure(&self) {
        self.state.write().await.counters.decode_failures += 1;
    }

    pub async fn record_receive_error(&self) {
        self.state.write().await.counters.receive_errors += 1;
    }

    pub async fn readings(&self) -> Readings {
        let state = self.state.read().await;
        Readings {
            raw_alert: state.raw_alert.clone(),
            proximity_mm: state.proximity_mm,
        }
    }

    /// Copy of the full state, taken under the lock.
    pub async fn snapshot(&self) -> TelemetryState {
        self.state.read().await.clone()
    }

    pub async fn counters(&self) -> IngestCounters {
        self.state.read().await.counters
    }

    /// Claim the single ingestor slot. Returns false if already claimed.
    pub(crate) fn try_claim_ingestor(&self) -> bool {
        self.ingestor_claimed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub(crate) fn release_ingestor(&self) {
        self.ingestor_claimed.store(false, Ordering::Release);
    }

    pub fn ingestor_running(&self) -> bool {
        self.ingestor_claimed.load(Ordering::Acquire)
    }
}
