//! Foreground alert loop.
//!
//! On every UI tick the monitor refreshes the display from whatever the last
//! completed ingestion left behind. Alert evaluation runs on its own slower
//! cadence, and speech fires only when the evaluated label changes.

use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::debounce::{EvaluationCadence, SpeechDebouncer};
use super::ladder::AlertPolicy;
use crate::config::AlertConfig;
use crate::presentation::{DisplayView, PresentationSink};
use crate::telemetry::TelemetryContext;
use crate::types::AlertLabel;

pub struct AlertMonitor<S: PresentationSink> {
    context: TelemetryContext,
    policy: AlertPolicy,
    cadence: EvaluationCadence,
    debouncer: SpeechDebouncer,
    sink: S,
    ui_tick: Duration,
    label: AlertLabel,
    evaluations: u64,
}

impl<S: PresentationSink> AlertMonitor<S> {
    pub fn new(context: TelemetryContext, config: &AlertConfig, sink: S) -> Self {
        Self {
            context,
            policy: AlertPolicy::new(config.proximity_threshold_mm),
            cadence: EvaluationCadence::new(config.evaluation_interval()),
            debouncer: SpeechDebouncer::new(),
            sink,
            ui_tick: config.ui_tick(),
            label: AlertLabel::KeepWalking,
            evaluations: 0,
        }
    }

    /// Label from the most recent evaluation.
    pub const fn label(&self) -> AlertLabel {
        self.label
    }

    pub const fn evaluations(&self) -> u64 {
        self.evaluations
    }

    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// One UI tick at time `now`.
    pub async fn step(&mut self, now: Instant) {
        if self.cadence.is_due(now) {
            self.cadence.record(now);
            self.evaluate().await;
        }

        let snapshot = self.context.snapshot().await;
        self.sink.display(&DisplayView {
            label: self.label,
            severity: self.label.severity(),
            distance_mm: snapshot.proximity_mm,
            recent_motion: &snapshot.motion,
        });
    }

    async fn evaluate(&mut self) {
        // Lock is released before speaking
        let readings = self.context.readings().await;
        self.label = self.policy.decide(&readings);
        self.evaluations += 1;

        if self.debouncer.should_speak(self.label) {
            if let Err(e) = self.sink.speak(self.label.text()).await {
                warn!("[AlertMonitor] Speech failed: {}", e);
            }
        }
    }

    /// Tick until cancelled.
    pub async fn run(mut self, cancel_token: CancellationToken) {
        let mut interval = tokio::time::interval(self.ui_tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    info!("[AlertMonitor] Shutdown signal received");
                    break;
                }
                tick = interval.tick() => {
                    self.step(tick.into_std()).await;
                }
            }
        }

        info!(
            evaluations = self.evaluations,
            last_label = %self.label,
            "[AlertMonitor] Stopped"
        );
    }
}
