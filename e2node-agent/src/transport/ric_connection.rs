//! SCTP-backed RIC transport

use tracing::{debug, info, warn};

use e2node_sctp::{SctpAssociation, SctpError, SctpEvent};

use super::{RicConnectParams, RicConnector, RicTransport, TransportError, TransportEvent};

/// Connects to the RIC over SCTP
#[derive(Debug, Default, Clone, Copy)]
pub struct SctpRicConnector;

#[async_trait::async_trait]
impl RicConnector for SctpRicConnector {
    async fn connect(
        &self,
        params: &RicConnectParams,
    ) -> Result<Box<dyn RicTransport>, TransportError> {
        let association = SctpAssociation::connect_with_local(
            params.local_address,
            params.remote_address,
            params.sctp.clone(),
        )
        .await
        .map_err(|e| TransportError::ConnectFailed {
            addr: params.remote_address,
            reason: e.to_string(),
        })?;

        info!(
            "SCTP association {} -> {} established",
            association.local_addr(),
            association.remote_addr()
        );
        Ok(Box::new(SctpRicTransport::new(association)))
    }
}

/// E2AP transport over an established SCTP association
pub struct SctpRicTransport {
    association: SctpAssociation,
    closed: bool,
}

impl SctpRicTransport {
    pub fn new(association: SctpAssociation) -> Self {
        Self {
            association,
            closed: false,
        }
    }
}

#[async_trait::async_trait]
impl RicTransport for SctpRicTransport {
    async fn send(&mut self, stream: u16, payload: &[u8]) -> Result<(), TransportError> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        self.association.send(stream, payload).await?;
        Ok(())
    }

    async fn poll_event(&mut self) -> Result<Option<TransportEvent>, TransportError> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        match self.association.poll().await {
            Ok(Some(SctpEvent::DataReceived(msg))) if msg.data.is_empty() => {
                debug!("Zero-length read on stream {}", msg.stream_id);
                Ok(Some(TransportEvent::Closed))
            }
            Ok(Some(SctpEvent::DataReceived(msg))) => Ok(Some(TransportEvent::Data {
                stream: msg.stream_id,
                payload: msg.data,
            })),
            Ok(Some(SctpEvent::Notification(notification))) => {
                Ok(Some(TransportEvent::Notification(notification)))
            }
            Ok(None) => Ok(None),
            Err(SctpError::AssociationClosed) => Ok(Some(TransportEvent::Closed)),
            Err(e) => Err(e.into()),
        }
    }

    async fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(e) = self.association.shutdown().await {
            warn!("Failed to shut down SCTP association: {}", e);
            self.association.close();
        }
    }
}
