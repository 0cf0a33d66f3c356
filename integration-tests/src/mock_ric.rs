//! Mock near-RT RIC for integration testing
//!
//! The mock plugs into the agent as its [`RicConnector`]. Every association
//! it hands out is an in-memory [`RicTransport`]: PDUs sent by the agent are
//! decoded and recorded, and PDUs injected by the test are encoded and queued
//! for the agent to poll. E2 Setup and agent-initiated Reset are answered
//! automatically according to the [`MockRicConfig`].

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info};

use e2node_agent::{RicConnectParams, RicConnector, RicTransport, TransportError, TransportEvent};
use e2node_common::Plmn;
use e2node_e2ap::ies::{Cause, GlobalRicId, RanFunctionIdItem, TimeToWait};
use e2node_e2ap::procedures::{E2SetupResponse, ResetResponse, TransactionFailure};
use e2node_e2ap::{
    decode_e2ap_pdu, encode_e2ap_pdu, E2apPdu, InitiatingMessage, UnsuccessfulOutcome,
};
use e2node_sctp::SctpNotification;

/// Mock RIC errors
#[derive(Debug, Error)]
pub enum MockRicError {
    #[error("No association towards the agent")]
    NotConnected,
    #[error("E2AP encoding error: {0}")]
    Encoding(String),
}

/// How the mock answers an E2 Setup Request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupBehavior {
    /// E2 Setup Response accepting every RAN function
    Accept,
    /// E2 Setup Failure with the given cause
    Reject {
        cause: Cause,
        time_to_wait: Option<TimeToWait>,
    },
    /// No answer at all
    Ignore,
}

/// Events emitted by the mock RIC
#[derive(Debug, Clone)]
pub enum MockRicEvent {
    /// The agent opened association number `attempt`
    Connected { attempt: u32 },
    /// A connect attempt was refused
    ConnectRefused { attempt: u32 },
    /// The agent sent a PDU
    Received(E2apPdu),
    /// The agent closed the association
    Closed,
}

/// Mock RIC configuration
#[derive(Debug, Clone)]
pub struct MockRicConfig {
    /// Global RIC ID returned in E2 Setup Response
    pub ric_id: GlobalRicId,
    /// Answer to E2 Setup Requests
    pub setup_behavior: SetupBehavior,
    /// Number of connect attempts to refuse before accepting
    pub refuse_connects: u32,
    /// Answer agent-initiated Reset Requests
    pub auto_reset_response: bool,
}

impl Default for MockRicConfig {
    fn default() -> Self {
        Self {
            ric_id: GlobalRicId {
                plmn: Plmn::new(1, 1, false),
                ric_id: 0x00abc,
            },
            setup_behavior: SetupBehavior::Accept,
            refuse_connects: 0,
            auto_reset_response: true,
        }
    }
}

/// Mock RIC state
struct MockRicState {
    config: MockRicConfig,
    connect_attempts: u32,
    association_id: u32,
    /// Queue of the current association towards the agent
    association: Option<mpsc::UnboundedSender<TransportEvent>>,
    received: Vec<E2apPdu>,
}

/// Mock RIC for integration testing
#[derive(Clone)]
pub struct MockRic {
    state: Arc<Mutex<MockRicState>>,
    event_tx: mpsc::UnboundedSender<MockRicEvent>,
    event_rx: Arc<Mutex<mpsc::UnboundedReceiver<MockRicEvent>>>,
}

impl MockRic {
    /// Create a new mock RIC with default configuration
    pub fn new() -> Self {
        Self::with_config(MockRicConfig::default())
    }

    /// Create a new mock RIC with custom configuration
    pub fn with_config(config: MockRicConfig) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            state: Arc::new(Mutex::new(MockRicState {
                config,
                connect_attempts: 0,
                association_id: 0,
                association: None,
                received: Vec::new(),
            })),
            event_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub async fn set_setup_behavior(&self, behavior: SetupBehavior) {
        self.state.lock().await.config.setup_behavior = behavior;
    }

    pub async fn connect_attempts(&self) -> u32 {
        self.state.lock().await.connect_attempts
    }

    pub async fn is_connected(&self) -> bool {
        self.state.lock().await.association.is_some()
    }

    /// All PDUs received so far
    pub async fn received(&self) -> Vec<E2apPdu> {
        self.state.lock().await.received.clone()
    }

    /// Sends `pdu` to the agent on the current association.
    pub async fn inject(&self, pdu: E2apPdu) -> Result<(), MockRicError> {
        let bytes = encode_e2ap_pdu(&pdu).map_err(|e| MockRicError::Encoding(e.to_string()))?;
        self.push(TransportEvent::Data {
            stream: 0,
            payload: Bytes::from(bytes),
        })
        .await
    }

    /// Delivers an SCTP notification to the agent.
    pub async fn notify(&self, notification: SctpNotification) -> Result<(), MockRicError> {
        self.push(TransportEvent::Notification(notification)).await
    }

    /// Drops the current association from the RIC side.
    pub async fn close_association(&self) -> Result<(), MockRicError> {
        let mut state = self.state.lock().await;
        let tx = state.association.take().ok_or(MockRicError::NotConnected)?;
        tx.send(TransportEvent::Closed)
            .map_err(|_| MockRicError::NotConnected)
    }

    async fn push(&self, event: TransportEvent) -> Result<(), MockRicError> {
        let state = self.state.lock().await;
        let tx = state.association.as_ref().ok_or(MockRicError::NotConnected)?;
        tx.send(event).map_err(|_| MockRicError::NotConnected)
    }

    /// Waits for the next event.
    pub async fn next_event(&self, timeout: Duration) -> Option<MockRicEvent> {
        let mut rx = self.event_rx.lock().await;
        tokio::time::timeout(timeout, rx.recv()).await.ok().flatten()
    }

    /// Waits for a received PDU matching `predicate`, skipping other events.
    pub async fn wait_for_pdu<F>(&self, timeout: Duration, mut predicate: F) -> Option<E2apPdu>
    where
        F: FnMut(&E2apPdu) -> bool,
    {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            match self.next_event(remaining).await? {
                MockRicEvent::Received(pdu) if predicate(&pdu) => return Some(pdu),
                other => debug!("Mock RIC skipping {:?}", other),
            }
        }
    }

    /// Waits until `count` RIC Indications were received.
    pub async fn wait_for_indications(
        &self,
        count: usize,
        timeout: Duration,
    ) -> Vec<e2node_e2ap::procedures::RicIndication> {
        let mut indications = Vec::with_capacity(count);
        while indications.len() < count {
            match self
                .wait_for_pdu(timeout, |pdu| {
                    matches!(
                        pdu,
                        E2apPdu::InitiatingMessage(InitiatingMessage::RicIndication(_))
                    )
                })
                .await
            {
                Some(E2apPdu::InitiatingMessage(InitiatingMessage::RicIndication(ind))) => {
                    indications.push(ind)
                }
                _ => break,
            }
        }
        indications
    }

    /// Builds the automatic answer to a PDU sent by the agent.
    fn auto_response(config: &MockRicConfig, pdu: &E2apPdu) -> Option<E2apPdu> {
        match pdu {
            E2apPdu::InitiatingMessage(InitiatingMessage::E2SetupRequest(request)) => {
                match config.setup_behavior {
                    SetupBehavior::Accept => Some(
                        E2SetupResponse {
                            transaction_id: request.transaction_id,
                            global_ric_id: config.ric_id,
                            accepted: request
                                .ran_functions
                                .iter()
                                .map(|f| RanFunctionIdItem {
                                    ran_function_id: f.ran_function_id,
                                    revision: f.revision,
                                })
                                .collect(),
                            rejected: Vec::new(),
                            component_config_ack: Vec::new(),
                        }
                        .into(),
                    ),
                    SetupBehavior::Reject {
                        cause,
                        time_to_wait,
                    } => Some(E2apPdu::UnsuccessfulOutcome(
                        UnsuccessfulOutcome::E2SetupFailure(TransactionFailure {
                            transaction_id: request.transaction_id,
                            cause,
                            time_to_wait,
                        }),
                    )),
                    SetupBehavior::Ignore => None,
                }
            }
            E2apPdu::InitiatingMessage(InitiatingMessage::ResetRequest(request))
                if config.auto_reset_response =>
            {
                Some(
                    ResetResponse {
                        transaction_id: request.transaction_id,
                    }
                    .into(),
                )
            }
            _ => None,
        }
    }
}

impl Default for MockRic {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl RicConnector for MockRic {
    async fn connect(
        &self,
        params: &RicConnectParams,
    ) -> Result<Box<dyn RicTransport>, TransportError> {
        let mut state = self.state.lock().await;
        state.connect_attempts += 1;
        let attempt = state.connect_attempts;

        if attempt <= state.config.refuse_connects {
            let _ = self.event_tx.send(MockRicEvent::ConnectRefused { attempt });
            return Err(TransportError::ConnectFailed {
                addr: params.remote_address,
                reason: "connection refused by mock RIC".to_string(),
            });
        }

        let (tx, rx) = mpsc::unbounded_channel();
        state.association_id += 1;
        state.association = Some(tx.clone());
        info!("Mock RIC accepted association {}", state.association_id);
        let _ = self.event_tx.send(MockRicEvent::Connected { attempt });

        Ok(Box::new(MockRicTransport {
            ric: self.clone(),
            association_id: state.association_id,
            inbound: rx,
            inbound_tx: tx,
            closed: false,
        }))
    }
}

/// Agent side of one mock association
pub struct MockRicTransport {
    ric: MockRic,
    association_id: u32,
    inbound: mpsc::UnboundedReceiver<TransportEvent>,
    inbound_tx: mpsc::UnboundedSender<TransportEvent>,
    closed: bool,
}

#[async_trait::async_trait]
impl RicTransport for MockRicTransport {
    async fn send(&mut self, _stream: u16, data: &[u8]) -> Result<(), TransportError> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        let pdu = match decode_e2ap_pdu(data) {
            Ok(pdu) => pdu,
            Err(e) => {
                debug!("Mock RIC failed to decode PDU: {}", e);
                return Ok(());
            }
        };

        let mut state = self.ric.state.lock().await;
        state.received.push(pdu.clone());
        if let Some(response) = MockRic::auto_response(&state.config, &pdu) {
            if let Ok(bytes) = encode_e2ap_pdu(&response) {
                let _ = self.inbound_tx.send(TransportEvent::Data {
                    stream: 0,
                    payload: Bytes::from(bytes),
                });
            }
        }
        let _ = self.ric.event_tx.send(MockRicEvent::Received(pdu));
        Ok(())
    }

    async fn poll_event(&mut self) -> Result<Option<TransportEvent>, TransportError> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        match self.inbound.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::error::TryRecvError::Empty) => Ok(None),
            Err(mpsc::error::TryRecvError::Disconnected) => Ok(Some(TransportEvent::Closed)),
        }
    }

    async fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        let mut state = self.ric.state.lock().await;
        if state.association_id == self.association_id {
            state.association = None;
        }
        let _ = self.ric.event_tx.send(MockRicEvent::Closed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use e2node_e2ap::procedures::ResetRequest;

    #[test]
    fn test_auto_reset_response() {
        let config = MockRicConfig::default();
        let request: E2apPdu = ResetRequest {
            transaction_id: 4,
            cause: Cause::default(),
        }
        .into();
        assert_eq!(
            MockRic::auto_response(&config, &request),
            Some(ResetResponse { transaction_id: 4 }.into())
        );
    }

    #[tokio::test]
    async fn test_inject_without_association() {
        let ric = MockRic::new();
        assert!(!ric.is_connected().await);
        let pdu: E2apPdu = ResetResponse { transaction_id: 1 }.into();
        assert!(matches!(
            ric.inject(pdu).await,
            Err(MockRicError::NotConnected)
        ));
    }
}
