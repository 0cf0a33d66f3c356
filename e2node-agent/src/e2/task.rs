//! E2 Agent Task Implementation
//!
//! The E2 agent task owns the association towards the near-RT RIC and every
//! piece of E2 state: the setup procedure, the RAN function table, the
//! active RIC subscriptions and the reset transaction.
//!
//! # Message Flow
//!
//! ```text
//! RIC <--SCTP--> RicTransport <--poll/send--> E2AgentTask <--queue-- timers, connect, app
//! ```
//!
//! Connection lifecycle:
//!
//! ```text
//! Disconnected -> Connecting -> SetupPending -> Established
//!       ^              |             |              |
//!       +--------------+-------------+--------------+  (failure / association loss)
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use e2node_common::{log_e2ap_message, Direction, E2AgentConfig};
use e2node_e2ap::ies::{
    Cause, CauseRicRequest, E2NodeComponentConfigAdditionItem, E2NodeComponentId,
    E2NodeComponentInterfaceType, GlobalE2NodeGnbId, GlobalE2NodeId, GlobalRicId, GnbId,
};
use e2node_e2ap::procedures::{
    E2SetupFailure, E2SetupRequest, E2SetupResponse, ErrorIndication, ResetRequest,
    RicSubscriptionDeleteFailure, RicSubscriptionDeleteRequest, RicSubscriptionFailure,
    RicSubscriptionRequest,
};
use e2node_e2ap::{
    decode_e2ap_pdu, encode_e2ap_pdu, E2apPdu, InitiatingMessage, SuccessfulOutcome,
    UnsuccessfulOutcome,
};
use e2node_sctp::SctpNotification;

use crate::app::{validate_e2_agent_config, ConfigValidationError, E2AgentStatus, StatusReceiver};
use crate::e2::setup_procedure::{Launch, SetupOutcome, SetupProcedure, SetupState, Verdict};
use crate::e2::{
    E2ConnectionState, RanFunctionTable, ResetProcedure, RicSubscription, SubscriptionKey,
};
use crate::tasks::{E2AgentMessage, Task, TaskHandle, TaskMessage, TimerId};
use crate::timer::TaskTimer;
use crate::transport::{
    RicConnectParams, RicConnector, RicTransport, TransportError, TransportEvent,
};

/// SCTP stream carrying all E2AP traffic
pub const E2AP_STREAM_ID: u16 = 0;

/// Transport poll interval in milliseconds
const POLL_INTERVAL_MS: u64 = 10;

/// Upper bound of inbound events handled per poll tick
const MAX_EVENTS_PER_POLL: usize = 64;

/// Fatal outcomes of the E2 agent task
#[derive(Debug, Error)]
pub enum E2AgentError {
    /// The configuration was rejected at construction
    #[error("Invalid E2 agent configuration: {0}")]
    InvalidConfig(#[from] ConfigValidationError),

    /// `max_ric_setup_retries` consecutive retries failed
    #[error("E2 Setup failed after {attempts} attempts")]
    SetupRetriesExhausted { attempts: u32 },

    /// The E2 Setup Request could not be written to a fresh association
    #[error("Failed to send E2 Setup Request")]
    SetupSendFailed,
}

/// E2 agent task
pub struct E2AgentTask {
    config: Arc<E2AgentConfig>,
    handle: TaskHandle<E2AgentMessage>,
    connector: Arc<dyn RicConnector>,
    connect_params: RicConnectParams,
    transport: Option<Box<dyn RicTransport>>,
    state: E2ConnectionState,
    running: bool,
    setup: SetupProcedure,
    reconnect_timer: TaskTimer,
    setup_timer: TaskTimer,
    ran_functions: RanFunctionTable,
    subscriptions: HashMap<SubscriptionKey, RicSubscription>,
    reset: ResetProcedure,
    transaction_id: u8,
    global_ric_id: Option<GlobalRicId>,
    status_tx: watch::Sender<E2AgentStatus>,
    fatal: Option<E2AgentError>,
}

impl E2AgentTask {
    /// Creates the agent after validating `config`.
    ///
    /// `handle` must feed the queue later passed to [`Task::run`]; timers
    /// and the background connect post their results through it.
    pub fn new(
        config: E2AgentConfig,
        ran_functions: RanFunctionTable,
        connector: Arc<dyn RicConnector>,
        handle: TaskHandle<E2AgentMessage>,
    ) -> Result<Self, E2AgentError> {
        validate_e2_agent_config(&config)?;

        let reconnect_interval = Duration::from_secs(u64::from(config.ric_connect_timer));
        let setup_timeout = Duration::from_millis(config.setup_timeout_ms);
        let (status_tx, _) = watch::channel(E2AgentStatus::new());

        Ok(Self {
            connect_params: RicConnectParams::from_config(&config),
            setup: SetupProcedure::new(config.setup_retry_limit(), reconnect_interval),
            reconnect_timer: TaskTimer::new(
                TimerId::RicConnect,
                reconnect_interval,
                handle.clone(),
            ),
            setup_timer: TaskTimer::new(TimerId::SetupTimeout, setup_timeout, handle.clone()),
            config: Arc::new(config),
            handle,
            connector,
            transport: None,
            state: E2ConnectionState::Disconnected,
            running: false,
            ran_functions,
            subscriptions: HashMap::new(),
            reset: ResetProcedure::new(),
            transaction_id: 0,
            global_ric_id: None,
            status_tx,
            fatal: None,
        })
    }

    /// Subscribes to status snapshots.
    pub fn status_receiver(&self) -> StatusReceiver {
        self.status_tx.subscribe()
    }

    pub fn state(&self) -> E2ConnectionState {
        self.state
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    // ========================================================================
    // Connection lifecycle
    // ========================================================================

    /// Launches the setup procedure unless it is already running.
    async fn start_ric_connection(&mut self) {
        match self.setup.launch(self.running, self.transport.is_some()) {
            Launch::Refused => {
                debug!("RIC connection already in progress ({})", self.setup.state());
            }
            Launch::Finished(outcome) => self.finish_setup(outcome).await,
            Launch::Connect => {
                self.set_state(E2ConnectionState::Connecting);
                info!(
                    "Connecting to RIC at {} (attempt {})",
                    self.connect_params.remote_address,
                    self.setup.attempts()
                );

                let connector = Arc::clone(&self.connector);
                let params = self.connect_params.clone();
                let handle = self.handle.clone();
                tokio::spawn(async move {
                    let result = connector.connect(&params).await;
                    if handle
                        .send(E2AgentMessage::ConnectResult(result))
                        .await
                        .is_err()
                    {
                        debug!("E2 agent gone before RIC connect completed");
                    }
                });
            }
        }
    }

    async fn handle_connect_result(
        &mut self,
        result: Result<Box<dyn RicTransport>, TransportError>,
    ) {
        if self.setup.state() != SetupState::AwaitingConnect {
            warn!("Ignoring connect result in setup state {}", self.setup.state());
            if let Ok(mut transport) = result {
                transport.close().await;
            }
            return;
        }

        match result {
            Ok(transport) => {
                info!("Connected to RIC at {}", self.connect_params.remote_address);
                self.transport = Some(transport);
                self.setup_timer.start();
                if self.send_setup_request().await {
                    self.set_state(E2ConnectionState::SetupPending);
                } else {
                    error!("Failed to send E2 Setup Request");
                    self.running = false;
                    self.finish_setup(SetupOutcome::Error).await;
                }
            }
            Err(e) => {
                error!("Failed to connect to RIC: {}", e);
                self.finish_setup(SetupOutcome::Error).await;
            }
        }
    }

    async fn send_setup_request(&mut self) -> bool {
        let transaction_id = self.next_transaction_id();
        let request = self.build_setup_request(transaction_id);
        info!(
            "Sending E2 Setup Request (transaction {}, {} RAN function(s))",
            transaction_id,
            request.ran_functions.len()
        );
        if !self.send(&request.into()).await {
            return false;
        }
        self.setup.on_setup_sent(transaction_id);
        true
    }

    fn build_setup_request(&self, transaction_id: u8) -> E2SetupRequest {
        let node = &self.config.node;
        E2SetupRequest {
            transaction_id,
            global_e2_node_id: GlobalE2NodeId::Gnb(GlobalE2NodeGnbId {
                plmn: node.plmn,
                gnb_id: GnbId {
                    value: node.gnb_id,
                    length: node.gnb_id_length,
                },
                gnb_cu_up_id: node.gnb_cu_up_id,
                gnb_du_id: node.gnb_du_id,
            }),
            ran_functions: self.ran_functions.setup_items(),
            component_config_addition: node
                .amf_name
                .iter()
                .map(|amf_name| E2NodeComponentConfigAdditionItem {
                    interface_type: E2NodeComponentInterfaceType::Ng,
                    component_id: E2NodeComponentId::Ng {
                        amf_name: amf_name.clone(),
                    },
                    request_part: Vec::new(),
                    response_part: Vec::new(),
                })
                .collect(),
        }
    }

    /// Ends the running setup attempt and acts on the verdict.
    async fn finish_setup(&mut self, outcome: SetupOutcome) {
        self.setup_timer.stop();

        let verdict = self.setup.finish(outcome);
        if !self.running {
            error!("E2 agent stopped running during setup, not reconnecting");
            self.close_transport().await;
            self.set_state(E2ConnectionState::Disconnected);
            self.fatal = Some(E2AgentError::SetupSendFailed);
            self.publish_status();
            return;
        }

        match verdict {
            Verdict::Established => {
                self.set_state(E2ConnectionState::Established);
                info!("E2 Setup procedure successful");
            }
            Verdict::Retry { delay } => {
                warn!("E2 Setup procedure failed, reconnecting in {:?}", delay);
                self.close_transport().await;
                self.set_state(E2ConnectionState::Disconnected);
                self.reconnect_timer.start_with(delay);
            }
            Verdict::RetriesExhausted { attempts } => {
                error!("E2 Setup failed after {} attempts, giving up", attempts);
                self.close_transport().await;
                self.set_state(E2ConnectionState::Disconnected);
                self.fatal = Some(E2AgentError::SetupRetriesExhausted { attempts });
            }
        }
        self.publish_status();
    }

    async fn handle_timer(&mut self, timer: TimerId, generation: u64) {
        match timer {
            TimerId::RicConnect => {
                if self.reconnect_timer.on_expired(generation) {
                    self.start_ric_connection().await;
                }
            }
            TimerId::SetupTimeout => {
                if self.setup_timer.on_expired(generation) && self.setup.is_busy() {
                    warn!("E2 Setup timed out ({})", self.setup.state());
                    self.finish_setup(SetupOutcome::Error).await;
                }
            }
            TimerId::SubscriptionReport(key) => self.handle_report_timer(key, generation).await,
        }
    }

    async fn on_association_lost(&mut self) {
        self.close_transport().await;
        self.set_state(E2ConnectionState::Disconnected);
        if self.setup.is_busy() {
            debug!("Setup procedure running, leaving recovery to it");
        } else {
            self.start_ric_connection().await;
        }
    }

    async fn close_transport(&mut self) {
        if let Some(mut transport) = self.transport.take() {
            transport.close().await;
        }
    }

    // ========================================================================
    // Inbound traffic
    // ========================================================================

    async fn poll_transport(&mut self) {
        for _ in 0..MAX_EVENTS_PER_POLL {
            let Some(transport) = self.transport.as_mut() else {
                return;
            };
            let event = transport.poll_event().await;
            match event {
                Ok(None) => return,
                Ok(Some(TransportEvent::Data { stream, payload })) => {
                    debug!("Received {} bytes on stream {}", payload.len(), stream);
                    self.handle_pdu(&payload).await;
                }
                Ok(Some(TransportEvent::Notification(notification))) => {
                    if self.handle_notification(notification).await {
                        return;
                    }
                }
                Ok(Some(TransportEvent::Closed)) => {
                    warn!("RIC closed the association");
                    self.on_association_lost().await;
                    return;
                }
                Err(e) => {
                    error!("Failed to receive from RIC: {}", e);
                    self.on_association_lost().await;
                    return;
                }
            }
        }
    }

    /// Returns true if the association was lost.
    async fn handle_notification(&mut self, notification: SctpNotification) -> bool {
        match notification {
            SctpNotification::AssociationChange { up: true } => {
                info!("SCTP notification: {}", notification);
                false
            }
            SctpNotification::Shutdown
            | SctpNotification::PeerAddressUnreachable
            | SctpNotification::RemoteError(_)
            | SctpNotification::AssociationChange { up: false } => {
                warn!("SCTP notification: {}, association lost", notification);
                self.on_association_lost().await;
                true
            }
        }
    }

    async fn handle_pdu(&mut self, bytes: &[u8]) {
        let pdu = match decode_e2ap_pdu(bytes) {
            Ok(pdu) => pdu,
            Err(e) => {
                error!("Failed to decode E2AP PDU: {}", e);
                return;
            }
        };
        log_e2ap_message(Direction::Rx, pdu.name(), bytes);

        match pdu {
            E2apPdu::InitiatingMessage(msg) => self.handle_initiating_message(msg).await,
            E2apPdu::SuccessfulOutcome(msg) => self.handle_successful_outcome(msg).await,
            E2apPdu::UnsuccessfulOutcome(msg) => self.handle_unsuccessful_outcome(msg).await,
        }
    }

    async fn handle_initiating_message(&mut self, msg: InitiatingMessage) {
        let name = msg.name();
        match msg {
            InitiatingMessage::RicSubscriptionRequest(request) => {
                self.handle_subscription_request(request).await
            }
            InitiatingMessage::RicSubscriptionDeleteRequest(request) => {
                self.handle_subscription_delete_request(request).await
            }
            InitiatingMessage::ResetRequest(request) => self.handle_reset_request(request),
            InitiatingMessage::ErrorIndication(indication) => {
                self.handle_error_indication(&indication)
            }
            InitiatingMessage::RicControlRequest(_)
            | InitiatingMessage::E2ConnectionUpdate(_)
            | InitiatingMessage::E2RemovalRequest(_) => {
                info!("{} received, not handled", name);
            }
            _ => warn!("Unexpected initiating message {}, dropped", name),
        }
    }

    /// Error Indications are never answered.
    fn handle_error_indication(&self, indication: &ErrorIndication) {
        let cause = indication
            .cause
            .map_or_else(|| "none".to_string(), |c| format!("{c:?}"));
        match indication.request_id {
            Some(request_id) => warn!(
                "Error Indication from RIC for request {:?} (RAN function {:?}): cause {}",
                request_id, indication.ran_function_id, cause
            ),
            None => warn!(
                "Error Indication from RIC (transaction {:?}): cause {}",
                indication.transaction_id, cause
            ),
        }
    }

    async fn handle_successful_outcome(&mut self, msg: SuccessfulOutcome) {
        let name = msg.name();
        match msg {
            SuccessfulOutcome::E2SetupResponse(response) => {
                self.handle_setup_response(response).await
            }
            SuccessfulOutcome::ResetResponse(response) => {
                self.reset.process_reset_response(&response);
            }
            SuccessfulOutcome::RicControlAcknowledge(_)
            | SuccessfulOutcome::RicServiceUpdateAcknowledge(_)
            | SuccessfulOutcome::E2NodeConfigurationUpdateAcknowledge(_)
            | SuccessfulOutcome::E2RemovalResponse(_) => {
                info!("{} received, not handled", name);
            }
            _ => warn!("Unexpected successful outcome {}, dropped", name),
        }
    }

    async fn handle_unsuccessful_outcome(&mut self, msg: UnsuccessfulOutcome) {
        let name = msg.name();
        match msg {
            UnsuccessfulOutcome::E2SetupFailure(failure) => {
                self.handle_setup_failure(failure).await
            }
            UnsuccessfulOutcome::E2NodeConfigurationUpdateFailure(failure)
            | UnsuccessfulOutcome::RicServiceUpdateFailure(failure)
            | UnsuccessfulOutcome::E2RemovalFailure(failure) => {
                warn!(
                    "{} received: cause {}, time to wait {:?}",
                    name, failure.cause, failure.time_to_wait
                );
            }
            _ => warn!("Unexpected unsuccessful outcome {}, dropped", name),
        }
    }

    async fn handle_setup_response(&mut self, response: E2SetupResponse) {
        if !self.setup.matches_transaction(response.transaction_id) {
            warn!(
                "E2 Setup Response with unexpected transaction {}, dropped",
                response.transaction_id
            );
            return;
        }

        info!("E2 Setup Response from RIC {}", response.global_ric_id);
        for item in &response.accepted {
            info!("RAN function {} accepted", item.ran_function_id);
        }
        for item in &response.rejected {
            warn!(
                "RAN function {} rejected: {}",
                item.ran_function_id, item.cause
            );
        }
        for ack in &response.component_config_ack {
            debug!(
                "Component {:?} configuration {:?}",
                ack.component_id, ack.outcome
            );
        }

        self.global_ric_id = Some(response.global_ric_id);
        self.finish_setup(SetupOutcome::Success).await;
    }

    async fn handle_setup_failure(&mut self, failure: E2SetupFailure) {
        if !self.setup.matches_transaction(failure.transaction_id) {
            warn!(
                "E2 Setup Failure with unexpected transaction {}, dropped",
                failure.transaction_id
            );
            return;
        }

        warn!(
            "E2 Setup Failure: cause {}, time to wait {:?}",
            failure.cause, failure.time_to_wait
        );
        self.setup.record_time_to_wait(failure.time_to_wait);
        self.finish_setup(SetupOutcome::Error).await;
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    async fn handle_subscription_request(&mut self, request: RicSubscriptionRequest) {
        let key = SubscriptionKey::from(request.request_id);
        info!(
            "RIC Subscription Request {} for RAN function {} ({} action(s))",
            key,
            request.ran_function_id,
            request.details.actions.len()
        );

        if self.subscriptions.contains_key(&key) {
            warn!("Subscription {} already exists", key);
            let failure = RicSubscriptionFailure {
                request_id: request.request_id,
                ran_function_id: request.ran_function_id,
                cause: Cause::RicRequest(CauseRicRequest::DuplicateAction),
            };
            self.send(&failure.into()).await;
            return;
        }

        let mut subscription = RicSubscription::new(
            &request,
            &mut self.ran_functions,
            self.handle.clone(),
            self.config.report_period_override_ms,
        );
        if let Some(failure) = subscription.failure_message() {
            self.send(&failure.into()).await;
            return;
        }

        let response = subscription.start();
        if self.send(&response.into()).await {
            self.subscriptions.insert(key, subscription);
        } else {
            subscription.release(&mut self.ran_functions);
        }
        self.publish_status();
    }

    async fn handle_subscription_delete_request(&mut self, request: RicSubscriptionDeleteRequest) {
        let key = SubscriptionKey::from(request.request_id);
        info!("RIC Subscription Delete Request {}", key);

        let pdu = match self.subscriptions.remove(&key) {
            Some(mut subscription) => subscription.delete(&mut self.ran_functions),
            None => {
                warn!("Subscription {} not found", key);
                RicSubscriptionDeleteFailure {
                    request_id: request.request_id,
                    ran_function_id: request.ran_function_id,
                    cause: Cause::RicRequest(CauseRicRequest::RequestIdUnknown),
                }
                .into()
            }
        };
        self.send(&pdu).await;
        self.publish_status();
    }

    async fn handle_report_timer(&mut self, key: SubscriptionKey, generation: u64) {
        let Some(subscription) = self.subscriptions.get_mut(&key) else {
            debug!("Report timer of deleted subscription {}", key);
            return;
        };
        let indications = subscription.on_report_timer(generation, &mut self.ran_functions);
        if indications.is_empty() {
            return;
        }
        if self.state != E2ConnectionState::Established {
            debug!(
                "Skipping {} indication(s) of {} while {}",
                indications.len(),
                key,
                self.state
            );
            return;
        }
        for indication in indications {
            self.send(&indication.into()).await;
        }
    }

    fn delete_all_subscriptions(&mut self) {
        if self.subscriptions.is_empty() {
            return;
        }
        info!("Deleting {} subscription(s)", self.subscriptions.len());
        for (_, mut subscription) in self.subscriptions.drain() {
            subscription.release(&mut self.ran_functions);
        }
        self.publish_status();
    }

    // ========================================================================
    // Reset
    // ========================================================================

    fn handle_reset_request(&mut self, request: ResetRequest) {
        let transaction_id = self.reset.process_reset_request(&request);
        self.delete_all_subscriptions();
        let response = self.reset.generate_reset_response(transaction_id);
        if !self.queue_send(response.into()) {
            error!("Failed to queue Reset Response");
        }
    }

    async fn trigger_reset(&mut self, cause: Cause) {
        if self.state != E2ConnectionState::Established {
            warn!("Cannot reset E2 connection while {}", self.state);
            return;
        }
        let transaction_id = self.next_transaction_id();
        let request = self.reset.generate_reset_request(transaction_id, cause);
        info!("Sending Reset Request (transaction {}, cause {})", transaction_id, cause);
        self.delete_all_subscriptions();
        self.send(&request.into()).await;
    }

    // ========================================================================
    // Outbound traffic
    // ========================================================================

    /// Encodes and sends `pdu` on the E2AP stream.
    ///
    /// Returns false if not connected, encoding fails or the send fails.
    pub async fn send(&mut self, pdu: &E2apPdu) -> bool {
        let name = pdu.name();
        let Some(transport) = self.transport.as_mut() else {
            warn!("Cannot send {}: not connected to RIC", name);
            return false;
        };
        let bytes = match encode_e2ap_pdu(pdu) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("Failed to encode {}: {}", name, e);
                return false;
            }
        };
        log_e2ap_message(Direction::Tx, name, &bytes);
        if let Err(e) = transport.send(E2AP_STREAM_ID, &bytes).await {
            error!("Failed to send {}: {}", name, e);
            return false;
        }
        true
    }

    /// Queues `pdu` to be sent from the task loop.
    pub fn queue_send(&self, pdu: E2apPdu) -> bool {
        match self.handle.try_send(E2AgentMessage::SendPdu(pdu)) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to queue PDU: {}", e);
                false
            }
        }
    }

    fn next_transaction_id(&mut self) -> u8 {
        let id = self.transaction_id;
        self.transaction_id = self.transaction_id.wrapping_add(1);
        id
    }

    // ========================================================================
    // State and status
    // ========================================================================

    fn set_state(&mut self, state: E2ConnectionState) {
        if self.state != state {
            info!("E2 state changed: {} -> {}", self.state, state);
            self.state = state;
            self.publish_status();
        }
    }

    fn publish_status(&self) {
        self.status_tx.send_replace(E2AgentStatus {
            state: self.state,
            global_ric_id: self.global_ric_id.map(|id| id.to_string()),
            setup_attempts: self.setup.attempts(),
            active_subscriptions: self.subscriptions.len(),
        });
    }

    async fn handle_message(&mut self, msg: E2AgentMessage) {
        match msg {
            E2AgentMessage::ConnectResult(result) => self.handle_connect_result(result).await,
            E2AgentMessage::TimerExpired { timer, generation } => {
                self.handle_timer(timer, generation).await
            }
            E2AgentMessage::SendPdu(pdu) => {
                self.send(&pdu).await;
            }
            E2AgentMessage::TriggerReset { cause } => self.trigger_reset(cause).await,
        }
    }

    async fn teardown(&mut self) {
        self.running = false;
        self.reconnect_timer.stop();
        self.setup_timer.stop();
        self.delete_all_subscriptions();
        self.close_transport().await;
        self.set_state(E2ConnectionState::Disconnected);
    }
}

#[async_trait::async_trait]
impl Task for E2AgentTask {
    type Message = E2AgentMessage;
    type Error = E2AgentError;

    async fn run(
        &mut self,
        mut rx: mpsc::Receiver<TaskMessage<Self::Message>>,
    ) -> Result<(), Self::Error> {
        info!("E2 agent task started");
        self.running = true;
        self.publish_status();
        self.start_ric_connection().await;

        let mut poll_tick = tokio::time::interval(Duration::from_millis(POLL_INTERVAL_MS));
        poll_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let result = loop {
            tokio::select! {
                msg = rx.recv() => {
                    match msg {
                        Some(TaskMessage::Message(msg)) => self.handle_message(msg).await,
                        Some(TaskMessage::Shutdown) => {
                            info!("E2 agent task received shutdown signal");
                            break Ok(());
                        }
                        None => {
                            info!("E2 agent task channel closed");
                            break Ok(());
                        }
                    }
                }

                _ = poll_tick.tick(), if self.transport.is_some() => {
                    self.poll_transport().await;
                }
            }

            if let Some(err) = self.fatal.take() {
                break Err(err);
            }
        };

        self.teardown().await;
        info!("E2 agent task stopped");
        result
    }
}
