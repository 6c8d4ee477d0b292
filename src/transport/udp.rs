//! UDP frame sender and receiver.

use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

use super::{codec, TransportError};
use crate::types::Frame;

// ============================================================================
// Sender
// ============================================================================

/// Outcome of one fan-out send.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SendReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Sends an independent copy of every frame to each destination.
pub struct FrameSender {
    socket: UdpSocket,
    destinations: Vec<SocketAddr>,
    frames_sent: u64,
    send_failures: u64,
}

impl FrameSender {
    /// Bind an ephemeral local socket targeting the given destinations.
    pub async fn bind(destinations: Vec<SocketAddr>) -> Result<Self, TransportError> {
        let local: SocketAddr = match destinations.first() {
            Some(SocketAddr::V6(_)) => SocketAddr::from(([0u16; 8], 0)),
            _ => SocketAddr::from(([0, 0, 0, 0], 0)),
        };
        let socket = UdpSocket::bind(local)
            .await
            .map_err(|source| TransportError::Bind { addr: local, source })?;

        Ok(Self {
            socket,
            destinations,
            frames_sent: 0,
            send_failures: 0,
        })
    }

    /// Resolve `host` once per port.
    pub async fn resolve(host: &str, ports: &[u16]) -> Result<Vec<SocketAddr>, TransportError> {
        let mut addrs = Vec::with_capacity(ports.len());
        for &port in ports {
            let resolved = tokio::net::lookup_host((host, port))
                .await
                .map_err(|e| TransportError::Resolve {
                    host: host.to_string(),
                    port,
                    message: e.to_string(),
                })?
                .next()
                .ok_or_else(|| TransportError::Resolve {
                    host: host.to_string(),
                    port,
                    message: "no addresses returned".to_string(),
                })?;
            addrs.push(resolved);
        }
        Ok(addrs)
    }

    pub fn destinations(&self) -> &[SocketAddr] {
        &self.destinations
    }

    pub const fn frames_sent(&self) -> u64 {
        self.frames_sent
    }

    pub const fn send_failures(&self) -> u64 {
        self.send_failures
    }

    /// Fire-and-forget delivery. A failed destination is logged and skipped;
    /// only an encoding failure aborts the send.
    pub async fn send(&mut self, frame: &Frame) -> Result<SendReport, TransportError> {
        let payload = codec::encode(frame)?;
        let mut report = SendReport::default();

        for &addr in &self.destinations {
            match self.socket.send_to(&payload, addr).await {
                Ok(_) => report.delivered += 1,
                Err(source) => {
                    report.failed += 1;
                    warn!("[FrameSender] {}", TransportError::Send { addr, source });
                }
            }
        }

        self.frames_sent += 1;
        self.send_failures += report.failed as u64;
        Ok(report)
    }
}

// ============================================================================
// Receiver
// ============================================================================

/// Listens on one bound endpoint and yields decoded frames.
#[derive(Debug)]
pub struct FrameReceiver {
    socket: UdpSocket,
    recv_buf: Vec<u8>,
    local_addr: SocketAddr,
}

impl FrameReceiver {
    /// Bind the listen endpoint.
    ///
    /// `SO_REUSEADDR` is left off so that a second listener on the same port
    /// fails with [`TransportError::BindConflict`] instead of silently sharing
    /// the datagrams. Must be called from within a Tokio runtime.
    pub fn bind(addr: SocketAddr, max_datagram_bytes: usize) -> Result<Self, TransportError> {
        let bind_err = |source: std::io::Error| {
            if source.kind() == std::io::ErrorKind::AddrInUse {
                TransportError::BindConflict(addr)
            } else {
                TransportError::Bind { addr, source }
            }
        };

        let socket = Socket::new(Domain::for_address(addr), Type::DGRAM, Some(Protocol::UDP))
            .map_err(bind_err)?;
        socket.set_nonblocking(true).map_err(bind_err)?;
        socket.bind(&addr.into()).map_err(bind_err)?;

        let socket = UdpSocket::from_std(socket.into()).map_err(bind_err)?;
        let local_addr = socket.local_addr().map_err(bind_err)?;
        debug!(%local_addr, "[FrameReceiver] Bound");

        Ok(Self {
            socket,
            recv_buf: vec![0u8; max_datagram_bytes],
            local_addr,
        })
    }

    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Wait for the next datagram and decode it.
    ///
    /// Each call consumes exactly one datagram. Payloads larger than the
    /// receive buffer are truncated and fail to decode.
    pub async fn recv(&mut self) -> Result<Frame, TransportError> {
        let (len, _peer) = self
            .socket
            .recv_from(&mut self.recv_buf)
            .await
            .map_err(TransportError::Receive)?;
        codec::decode(&self.recv_buf[..len])
    }
}
