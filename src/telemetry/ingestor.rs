//! Telemetry Ingestor
//!
//! Owns the single long-lived receive loop. Every decoded frame is applied to
//! the shared state in one write scope; decode and receive errors are logged
//! and counted, never fatal.

use std::net::SocketAddr;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::state::TelemetryContext;
use crate::transport::{FrameReceiver, TransportError};

/// Result of asking for an ingestor.
#[derive(Debug)]
pub enum IngestorStart {
    /// A new listener task is running.
    Started(JoinHandle<()>),
    /// A listener already owns this context or the endpoint; nothing was started.
    AlreadyRunning,
}

impl IngestorStart {
    pub const fn is_started(&self) -> bool {
        matches!(self, Self::Started(_))
    }
}

pub struct TelemetryIngestor {
    receiver: FrameReceiver,
    context: TelemetryContext,
    cancel_token: CancellationToken,
}

impl TelemetryIngestor {
    /// Bind `addr` and spawn the receive loop, at most once per context.
    ///
    /// Calling this again while a loop is alive returns
    /// [`IngestorStart::AlreadyRunning`]. So does finding the port owned by
    /// some other listener. Other bind failures are returned as errors.
    pub fn start(
        context: &TelemetryContext,
        addr: SocketAddr,
        max_datagram_bytes: usize,
        cancel_token: CancellationToken,
    ) -> Result<IngestorStart, TransportError> {
        if !context.try_claim_ingestor() {
            debug!("[Ingestor] Already running for this context");
            return Ok(IngestorStart::AlreadyRunning);
        }

        let receiver = match FrameReceiver::bind(addr, max_datagram_bytes) {
            Ok(receiver) => receiver,
            Err(TransportError::BindConflict(addr)) => {
                context.release_ingestor();
                warn!(
                    "Port {} is busy. Assuming a listener is already running.",
                    addr.port()
                );
                return Ok(IngestorStart::AlreadyRunning);
            }
            Err(e) => {
                context.release_ingestor();
                return Err(e);
            }
        };

        info!("📡 Listening on {}...", receiver.local_addr());
        let ingestor = Self {
            receiver,
            context: context.clone(),
            cancel_token,
        };
        Ok(IngestorStart::Started(tokio::spawn(ingestor.run())))
    }

    /// Receive until cancelled.
    async fn run(mut self) {
        loop {
            let result = tokio::select! {
                _ = self.cancel_token.cancelled() => {
                    info!("[Ingestor] Shutdown signal received");
                    break;
                }
                result = self.receiver.recv() => result,
            };

            match result {
                Ok(frame) => self.context.ingest(&frame).await,
                Err(e @ TransportError::Decode(_)) => {
                    warn!("[Ingestor] Dropping datagram: {}", e);
                    self.context.record_decode_failure().await;
                }
                Err(e) => {
                    warn!("[Ingestor] {}", e);
                    self.context.record_receive_error().await;
                }
            }
        }

        let counters = self.context.counters().await;
        info!(
            frames = counters.frames_ingested,
            decode_failures = counters.decode_failures,
            receive_errors = counters.receive_errors,
            "[Ingestor] Stopped"
        );
        self.context.release_ingestor();
    }
}
