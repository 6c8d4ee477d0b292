//! Time sources for the scenario generator

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Wall-clock reading in floating-point seconds.
pub trait Clock: Send + Sync {
    fn now(&self) -> f64;
}

/// Seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        chrono::Utc::now().timestamp_micros() as f64 / 1_000_000.0
    }
}

/// Hand-driven clock for tests and replays.
///
/// Stored as whole microseconds so repeated advances do not drift.
#[derive(Debug, Default)]
pub struct ManualClock {
    micros: AtomicU64,
}

impl ManualClock {
    pub fn new(start_secs: f64) -> Self {
        Self {
            micros: AtomicU64::new(secs_to_micros(start_secs)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let delta = u64::try_from(by.as_micros()).unwrap_or(u64::MAX);
        self.micros.fetch_add(delta, Ordering::SeqCst);
    }

    pub fn set(&self, secs: f64) {
        self.micros.store(secs_to_micros(secs), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.micros.load(Ordering::SeqCst) as f64 / 1_000_000.0
    }
}

fn secs_to_micros(secs: f64) -> u64 {
    (secs.max(0.0) * 1_000_000.0).round() as u64
}
