//! Frame Transport
//!
//! Best-effort datagram delivery of telemetry frames:
//! - `codec`: self-describing JSON encoding of a [`Frame`](crate::types::Frame)
//! - `udp`: fan-out sender and single-endpoint receiver
//!
//! No acknowledgment, retry, or ordering. A lost frame is replaced by the
//! next periodic one.

pub mod codec;
pub mod udp;

pub use codec::{decode, encode};
pub use udp::{FrameReceiver, FrameSender, SendReport};

use std::net::SocketAddr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    /// Another listener already owns the endpoint.
    #[error("Endpoint {0} is already bound by another listener")]
    BindConflict(SocketAddr),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to resolve {host}:{port}: {message}")]
    Resolve {
        host: String,
        port: u16,
        message: String,
    },

    #[error("Malformed frame: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Failed to encode frame: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Receive failed: {0}")]
    Receive(#[source] std::io::Error),

    #[error("Send to {addr} failed: {source}")]
    Send {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

impl TransportError {
    /// Errors the receive loop absorbs and moves past.
    pub const fn is_per_datagram(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::Receive(_))
    }
}
