//! RIC transport abstraction
//!
//! The agent talks to the RIC through a [`RicTransport`] obtained from a
//! [`RicConnector`]. The production implementation runs E2AP over an SCTP
//! association; tests substitute an in-memory RIC.

pub mod ric_connection;

use std::net::SocketAddr;

use bytes::Bytes;
use thiserror::Error;

use e2node_common::E2AgentConfig;
use e2node_sctp::{SctpConfig, SctpError, SctpNotification};

pub use ric_connection::{SctpRicConnector, SctpRicTransport};

/// Transport errors
#[derive(Debug, Error)]
pub enum TransportError {
    /// SCTP association error
    #[error("SCTP error: {0}")]
    Sctp(#[from] SctpError),

    /// Connect sequence failed before an association was available
    #[error("Connect to {addr} failed: {reason}")]
    ConnectFailed { addr: SocketAddr, reason: String },

    /// No association towards the RIC
    #[error("Not connected to RIC")]
    NotConnected,

    /// The association was closed
    #[error("Association closed")]
    Closed,
}

/// Addresses and SCTP options of one connect attempt
#[derive(Debug, Clone)]
pub struct RicConnectParams {
    pub local_address: SocketAddr,
    pub remote_address: SocketAddr,
    pub sctp: SctpConfig,
}

impl RicConnectParams {
    pub fn from_config(config: &E2AgentConfig) -> Self {
        Self {
            local_address: SocketAddr::new(config.ric_bind_ip, config.ric_bind_port),
            remote_address: SocketAddr::new(config.ric_ip, config.ric_port),
            sctp: SctpConfig::from(&config.sctp),
        }
    }
}

/// Inbound transport event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// One complete E2AP message
    Data { stream: u16, payload: Bytes },
    /// Peer-status notification
    Notification(SctpNotification),
    /// The peer closed the association
    Closed,
}

/// Establishes associations towards the RIC.
#[async_trait::async_trait]
pub trait RicConnector: Send + Sync {
    /// Runs the full connect sequence (socket, options, bind, connect).
    async fn connect(
        &self,
        params: &RicConnectParams,
    ) -> Result<Box<dyn RicTransport>, TransportError>;
}

/// An established association towards the RIC.
#[async_trait::async_trait]
pub trait RicTransport: Send {
    /// Sends one encoded E2AP message on `stream`.
    async fn send(&mut self, stream: u16, payload: &[u8]) -> Result<(), TransportError>;

    /// Returns the next pending inbound event without blocking.
    async fn poll_event(&mut self) -> Result<Option<TransportEvent>, TransportError>;

    /// Shuts the association down. Idempotent.
    async fn close(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::IpAddr;

    #[test]
    fn test_connect_params_from_config() {
        let mut config = E2AgentConfig::new("10.1.2.3".parse().unwrap());
        config.ric_port = 36423;
        config.ric_bind_ip = "10.1.2.4".parse::<IpAddr>().unwrap();
        config.ric_bind_port = 36500;
        config.sctp.num_streams = 4;

        let params = RicConnectParams::from_config(&config);
        assert_eq!(params.remote_address, "10.1.2.3:36423".parse().unwrap());
        assert_eq!(params.local_address, "10.1.2.4:36500".parse().unwrap());
        assert_eq!(params.sctp.max_outbound_streams, 4);
        assert_eq!(params.sctp.max_inbound_streams, 4);
    }

    #[test]
    fn test_transport_error_display() {
        let err = TransportError::ConnectFailed {
            addr: "127.0.0.1:36422".parse().unwrap(),
            reason: "refused".into(),
        };
        assert_eq!(err.to_string(), "Connect to 127.0.0.1:36422 failed: refused");

        let err: TransportError = SctpError::AssociationClosed.into();
        assert!(matches!(err, TransportError::Sctp(_)));
    }
}
