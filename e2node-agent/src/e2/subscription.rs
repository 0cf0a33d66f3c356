//! RIC subscriptions
//!
//! A [`RicSubscription`] is built from a RIC Subscription Request by running
//! it through the owning service model. Construction never fails outright:
//! a request that cannot be honoured yields an uninitialized subscription
//! whose [`RicSubscription::failure_message`] is sent back to the RIC.
//!
//! An initialized subscription owns a reporting [`TaskTimer`]; every expiry
//! produces one RIC Indication per admitted action and re-arms the timer.

use std::fmt;
use std::time::Duration;

use tracing::{debug, info, warn};

use e2node_e2ap::ies::{
    Cause, CauseRicRequest, CauseRicService, RicActionAdmittedItem, RicActionNotAdmittedItem,
    RicActionType, RicIndicationType, RicRequestId,
};
use e2node_e2ap::procedures::{
    RicIndication, RicSubscriptionDeleteFailure, RicSubscriptionDeleteResponse,
    RicSubscriptionFailure, RicSubscriptionRequest, RicSubscriptionResponse,
};
use e2node_e2ap::E2apPdu;

use crate::e2::RanFunctionTable;
use crate::tasks::{E2AgentMessage, TaskHandle, TimerId};
use crate::timer::TaskTimer;

/// Subscription identity (RIC requestor id, RIC instance id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionKey {
    pub requestor_id: u16,
    pub instance_id: u16,
}

impl SubscriptionKey {
    pub const fn new(requestor_id: u16, instance_id: u16) -> Self {
        Self {
            requestor_id,
            instance_id,
        }
    }
}

impl From<RicRequestId> for SubscriptionKey {
    fn from(id: RicRequestId) -> Self {
        Self::new(id.requestor_id, id.instance_id)
    }
}

impl From<SubscriptionKey> for RicRequestId {
    fn from(key: SubscriptionKey) -> Self {
        RicRequestId::new(key.requestor_id, key.instance_id)
    }
}

impl fmt::Display for SubscriptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.requestor_id, self.instance_id)
    }
}

/// An action accepted by the service model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmittedAction {
    pub action_id: u8,
    pub action_type: RicActionType,
    /// Id the service model registered the action under
    pub local_action_id: u32,
}

/// A RIC subscription
#[derive(Debug)]
pub struct RicSubscription {
    key: SubscriptionKey,
    ran_function_id: u16,
    admitted: Vec<AdmittedAction>,
    not_admitted: Vec<RicActionNotAdmittedItem>,
    report_period_ms: u32,
    timer: TaskTimer,
    failure_cause: Option<Cause>,
    next_sn: u16,
}

impl RicSubscription {
    /// Validates `request` against the RAN function table.
    ///
    /// `period_override_ms`, when set, replaces the reporting period decoded
    /// from the event trigger.
    pub fn new(
        request: &RicSubscriptionRequest,
        ran_functions: &mut RanFunctionTable,
        handle: TaskHandle<E2AgentMessage>,
        period_override_ms: Option<u32>,
    ) -> Self {
        let key = SubscriptionKey::from(request.request_id);
        let mut subscription = Self {
            key,
            ran_function_id: request.ran_function_id,
            admitted: Vec::new(),
            not_admitted: Vec::new(),
            report_period_ms: 0,
            timer: TaskTimer::new(TimerId::SubscriptionReport(key), Duration::ZERO, handle),
            failure_cause: None,
            next_sn: 0,
        };
        if let Err(cause) = subscription.admit(request, ran_functions, period_override_ms) {
            subscription.failure_cause = Some(cause);
        }
        subscription
    }

    fn admit(
        &mut self,
        request: &RicSubscriptionRequest,
        ran_functions: &mut RanFunctionTable,
        period_override_ms: Option<u32>,
    ) -> Result<(), Cause> {
        let Some(descriptor) = ran_functions.get_mut(request.ran_function_id) else {
            warn!(
                "Subscription {}: RAN function {} not found",
                self.key, request.ran_function_id
            );
            return Err(Cause::RicRequest(CauseRicRequest::RanFunctionIdInvalid));
        };
        let Some(model) = descriptor.service_model.as_mut() else {
            warn!(
                "Subscription {}: RAN function {} has no service model",
                self.key, request.ran_function_id
            );
            return Err(Cause::RicService(CauseRicService::RanFunctionNotSupported));
        };

        let trigger = model
            .process_event_trigger_definition(&request.details.event_trigger_definition)
            .map_err(|e| {
                warn!("Subscription {}: invalid event trigger: {}", self.key, e);
                Cause::RicRequest(CauseRicRequest::Unspecified)
            })?;
        self.report_period_ms = period_override_ms.unwrap_or_else(|| trigger.report_period_ms());

        for action in &request.details.actions {
            match model.process_action_definition(action) {
                Ok(local_action_id) => self.admitted.push(AdmittedAction {
                    action_id: action.action_id,
                    action_type: action.action_type,
                    local_action_id,
                }),
                Err(e) => {
                    info!(
                        "Subscription {}: action {} not admitted: {}",
                        self.key, action.action_id, e
                    );
                    self.not_admitted.push(RicActionNotAdmittedItem {
                        action_id: action.action_id,
                        cause: Cause::RicRequest(CauseRicRequest::ActionNotSupported),
                    });
                }
            }
        }

        if self.admitted.is_empty() {
            warn!("Subscription {}: no action admitted", self.key);
            return Err(Cause::RicRequest(CauseRicRequest::ActionNotSupported));
        }
        Ok(())
    }

    pub fn key(&self) -> SubscriptionKey {
        self.key
    }

    pub fn ran_function_id(&self) -> u16 {
        self.ran_function_id
    }

    pub fn admitted(&self) -> &[AdmittedAction] {
        &self.admitted
    }

    pub fn not_admitted(&self) -> &[RicActionNotAdmittedItem] {
        &self.not_admitted
    }

    /// Reporting period in milliseconds; 0 disables periodic reporting
    pub fn report_period_ms(&self) -> u32 {
        self.report_period_ms
    }

    /// True if at least one action was admitted
    pub fn is_initialized(&self) -> bool {
        self.failure_cause.is_none()
    }

    pub fn is_reporting(&self) -> bool {
        self.timer.is_running()
    }

    /// RIC Subscription Failure for a subscription that was not initialized
    pub fn failure_message(&self) -> Option<RicSubscriptionFailure> {
        self.failure_cause.map(|cause| RicSubscriptionFailure {
            request_id: self.key.into(),
            ran_function_id: self.ran_function_id,
            cause,
        })
    }

    /// Starts reporting and returns the RIC Subscription Response.
    pub fn start(&mut self) -> RicSubscriptionResponse {
        if self.report_period_ms > 0 {
            self.timer
                .set_interval(Duration::from_millis(u64::from(self.report_period_ms)));
            self.timer.start();
        }
        info!(
            "Subscription {} started: {} action(s) admitted, {} rejected, period {} ms",
            self.key,
            self.admitted.len(),
            self.not_admitted.len(),
            self.report_period_ms
        );

        RicSubscriptionResponse {
            request_id: self.key.into(),
            ran_function_id: self.ran_function_id,
            admitted: self
                .admitted
                .iter()
                .map(|a| RicActionAdmittedItem {
                    action_id: a.action_id,
                })
                .collect(),
            not_admitted: self.not_admitted.clone(),
        }
    }

    /// Handles a reporting timer expiry.
    ///
    /// Returns the indications to send; stale expiries yield none. The timer
    /// is re-armed after a valid expiry.
    pub fn on_report_timer(
        &mut self,
        generation: u64,
        ran_functions: &mut RanFunctionTable,
    ) -> Vec<RicIndication> {
        if !self.timer.on_expired(generation) {
            return Vec::new();
        }

        let mut indications = Vec::with_capacity(self.admitted.len());
        match ran_functions
            .get_mut(self.ran_function_id)
            .and_then(|d| d.service_model.as_mut())
        {
            Some(model) => {
                for action in &self.admitted {
                    match model.generate_indication_content(action.local_action_id) {
                        Ok(content) => {
                            let sn = self.next_sn;
                            self.next_sn = self.next_sn.wrapping_add(1);
                            indications.push(RicIndication {
                                request_id: self.key.into(),
                                ran_function_id: self.ran_function_id,
                                action_id: action.action_id,
                                sn: Some(sn),
                                indication_type: RicIndicationType::Report,
                                header: content.header,
                                message: content.message,
                                call_process_id: None,
                            });
                        }
                        Err(e) => warn!(
                            "Subscription {}: no indication for action {}: {}",
                            self.key, action.action_id, e
                        ),
                    }
                }
            }
            None => warn!(
                "Subscription {}: RAN function {} vanished",
                self.key, self.ran_function_id
            ),
        }

        self.timer.start();
        indications
    }

    /// Stops reporting and releases admitted actions.
    ///
    /// Returns false if the service model is no longer available.
    pub fn release(&mut self, ran_functions: &mut RanFunctionTable) -> bool {
        self.timer.stop();

        let Some(model) = ran_functions
            .get_mut(self.ran_function_id)
            .and_then(|d| d.service_model.as_mut())
        else {
            return false;
        };
        for action in self.admitted.drain(..) {
            if !model.remove_action_definition(action.local_action_id) {
                debug!(
                    "Subscription {}: action {} already released",
                    self.key, action.action_id
                );
            }
        }
        true
    }

    /// Releases the subscription and builds the answer to a delete request.
    pub fn delete(&mut self, ran_functions: &mut RanFunctionTable) -> E2apPdu {
        if self.release(ran_functions) {
            info!("Subscription {} deleted", self.key);
            RicSubscriptionDeleteResponse {
                request_id: self.key.into(),
                ran_function_id: self.ran_function_id,
            }
            .into()
        } else {
            warn!("Subscription {} deleted without service model", self.key);
            RicSubscriptionDeleteFailure {
                request_id: self.key.into(),
                ran_function_id: self.ran_function_id,
                cause: Cause::RicService(CauseRicService::RanFunctionNotSupported),
            }
            .into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::{task_channel, TaskMessage};
    use e2node_e2ap::ies::RicActionToBeSetupItem;
    use e2node_e2ap::procedures::RicSubscriptionDetails;
    use e2node_e2sm::kpm::codec::{
        self, ActionDefinition, ActionDefinitionFormat1, EventTriggerDefinition, LabelKind,
        MeasurementInfoItem, MeasurementLabel, MeasurementType,
    };
    use e2node_e2sm::{
        EventTrigger, IndicationContent, KpmServiceModel, ServiceModel, ServiceModelError,
    };
    use tokio::sync::mpsc;

    const FUNCTION_ID: u16 = 0;

    /// Model whose event trigger never asks for periodic reports
    struct OnDemandModel;

    impl ServiceModel for OnDemandModel {
        fn short_name(&self) -> &str {
            "ON-DEMAND"
        }

        fn oid(&self) -> &str {
            "1.3.6.1.4.1.53148.1.0.0.0"
        }

        fn description(&self) -> &str {
            "on-demand"
        }

        fn revision(&self) -> u16 {
            0
        }

        fn generate_ran_function_description(&self) -> Result<Vec<u8>, ServiceModelError> {
            Ok(Vec::new())
        }

        fn process_event_trigger_definition(
            &self,
            _definition: &[u8],
        ) -> Result<EventTrigger, ServiceModelError> {
            Ok(EventTrigger::PeriodicReport { period_ms: 0 })
        }

        fn process_action_definition(
            &mut self,
            _action: &RicActionToBeSetupItem,
        ) -> Result<u32, ServiceModelError> {
            Ok(1)
        }

        fn remove_action_definition(&mut self, local_action_id: u32) -> bool {
            local_action_id == 1
        }

        fn generate_indication_content(
            &mut self,
            local_action_id: u32,
        ) -> Result<IndicationContent, ServiceModelError> {
            Err(ServiceModelError::UnknownAction(local_action_id))
        }
    }

    fn kpm_table() -> RanFunctionTable {
        let mut table = RanFunctionTable::new();
        table.register(FUNCTION_ID, Box::new(KpmServiceModel::new()));
        table
    }

    fn action(action_id: u8, measurement: &str) -> RicActionToBeSetupItem {
        let definition = ActionDefinition {
            style_type: 1,
            format1: ActionDefinitionFormat1 {
                measurements: vec![MeasurementInfoItem {
                    measurement: MeasurementType::Name(measurement.to_string()),
                    labels: vec![MeasurementLabel::new(LabelKind::NoLabel)],
                }],
                granularity_period_ms: 1000,
                cell_global_id: None,
            },
        };
        RicActionToBeSetupItem {
            action_id,
            action_type: RicActionType::Report,
            definition: codec::encode(&definition).unwrap(),
            subsequent_action: None,
        }
    }

    fn request(
        ran_function_id: u16,
        period_ms: u32,
        actions: Vec<RicActionToBeSetupItem>,
    ) -> RicSubscriptionRequest {
        RicSubscriptionRequest {
            request_id: RicRequestId::new(1024, 7),
            ran_function_id,
            details: RicSubscriptionDetails {
                event_trigger_definition: codec::encode(&EventTriggerDefinition {
                    report_period_ms: period_ms,
                })
                .unwrap(),
                actions,
            },
        }
    }

    fn expect_report_timer(msg: Option<TaskMessage<E2AgentMessage>>) -> u64 {
        match msg {
            Some(TaskMessage::Message(E2AgentMessage::TimerExpired {
                timer: TimerId::SubscriptionReport(_),
                generation,
            })) => generation,
            other => panic!("expected report timer, got {other:?}"),
        }
    }

    fn channel() -> (TaskHandle<E2AgentMessage>, mpsc::Receiver<TaskMessage<E2AgentMessage>>) {
        task_channel(16)
    }

    #[tokio::test]
    async fn test_unknown_ran_function() {
        let (handle, _rx) = channel();
        let mut table = kpm_table();
        let req = request(5, 1000, vec![action(1, "test")]);
        let sub = RicSubscription::new(&req, &mut table, handle, None);

        assert!(!sub.is_initialized());
        let failure = sub.failure_message().unwrap();
        assert_eq!(failure.request_id, RicRequestId::new(1024, 7));
        assert_eq!(failure.ran_function_id, 5);
        assert_eq!(
            failure.cause,
            Cause::RicRequest(CauseRicRequest::RanFunctionIdInvalid)
        );
    }

    #[tokio::test]
    async fn test_function_without_model() {
        let (handle, _rx) = channel();
        let mut table = RanFunctionTable::new();
        table.insert(crate::e2::RanFunctionDescriptor::without_model(3, 0, "1.2.3", "X"));
        let req = request(3, 1000, vec![action(1, "test")]);
        let sub = RicSubscription::new(&req, &mut table, handle, None);

        assert_eq!(
            sub.failure_message().unwrap().cause,
            Cause::RicService(CauseRicService::RanFunctionNotSupported)
        );
    }

    #[tokio::test]
    async fn test_invalid_event_trigger() {
        let (handle, _rx) = channel();
        let mut table = kpm_table();
        let mut req = request(FUNCTION_ID, 1000, vec![action(1, "test")]);
        req.details.event_trigger_definition = vec![0xFF];
        let sub = RicSubscription::new(&req, &mut table, handle, None);

        assert_eq!(
            sub.failure_message().unwrap().cause,
            Cause::RicRequest(CauseRicRequest::Unspecified)
        );
    }

    #[tokio::test]
    async fn test_no_admitted_action() {
        let (handle, _rx) = channel();
        let mut table = kpm_table();
        let sub = RicSubscription::new(
            &request(FUNCTION_ID, 1000, vec![action(1, "DRB.UEThpDl")]),
            &mut table,
            handle,
            None,
        );

        assert!(!sub.is_initialized());
        assert!(!sub.is_reporting());
        assert_eq!(sub.not_admitted().len(), 1);
        assert_eq!(
            sub.failure_message().unwrap().cause,
            Cause::RicRequest(CauseRicRequest::ActionNotSupported)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_partial_admission_and_reporting() {
        let (handle, mut rx) = channel();
        let mut table = kpm_table();
        let mut sub = RicSubscription::new(
            &request(
                FUNCTION_ID,
                1000,
                vec![action(1, "RRU.PrbTotDl"), action(2, "unknown"), action(3, "test")],
            ),
            &mut table,
            handle,
            None,
        );
        assert!(sub.is_initialized());
        assert!(sub.failure_message().is_none());

        let response = sub.start();
        assert_eq!(response.admitted.len(), 2);
        assert_eq!(response.not_admitted.len(), 1);
        assert_eq!(response.not_admitted[0].action_id, 2);
        assert!(sub.is_reporting());

        let generation = expect_report_timer(rx.recv().await);
        let indications = sub.on_report_timer(generation, &mut table);
        assert_eq!(indications.len(), 2);
        assert_eq!(indications[0].action_id, 1);
        assert_eq!(indications[0].sn, Some(0));
        assert_eq!(indications[1].action_id, 3);
        assert_eq!(indications[1].sn, Some(1));
        assert_eq!(indications[0].indication_type, RicIndicationType::Report);

        // Re-armed
        assert!(sub.is_reporting());
        let generation = expect_report_timer(rx.recv().await);
        assert_eq!(sub.on_report_timer(generation, &mut table).len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_period_does_not_report() {
        let (handle, mut rx) = channel();
        let mut table = RanFunctionTable::new();
        table.register(FUNCTION_ID, Box::new(OnDemandModel));
        let mut sub = RicSubscription::new(
            &request(FUNCTION_ID, 1000, vec![action(1, "test")]),
            &mut table,
            handle,
            None,
        );
        assert!(sub.failure_message().is_none());
        assert_eq!(sub.report_period_ms(), 0);
        assert_eq!(sub.admitted().len(), 1);

        sub.start();
        assert!(!sub.is_reporting());
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_period_override() {
        let (handle, _rx) = channel();
        let mut table = kpm_table();
        let sub = RicSubscription::new(
            &request(FUNCTION_ID, 1000, vec![action(1, "test")]),
            &mut table,
            handle,
            Some(250),
        );
        assert_eq!(sub.report_period_ms(), 250);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequence_number_wraps() {
        let (handle, mut rx) = channel();
        let mut table = kpm_table();
        let mut sub = RicSubscription::new(
            &request(FUNCTION_ID, 10, vec![action(1, "test")]),
            &mut table,
            handle,
            None,
        );
        sub.next_sn = u16::MAX;
        sub.start();

        let generation = expect_report_timer(rx.recv().await);
        assert_eq!(sub.on_report_timer(generation, &mut table)[0].sn, Some(u16::MAX));
        let generation = expect_report_timer(rx.recv().await);
        assert_eq!(sub.on_report_timer(generation, &mut table)[0].sn, Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_stops_timer_and_releases_actions() {
        let (handle, mut rx) = channel();
        let mut table = kpm_table();
        let mut sub = RicSubscription::new(
            &request(FUNCTION_ID, 100, vec![action(1, "test")]),
            &mut table,
            handle,
            None,
        );
        sub.start();

        let pdu = sub.delete(&mut table);
        assert!(matches!(
            pdu,
            E2apPdu::SuccessfulOutcome(
                e2node_e2ap::SuccessfulOutcome::RicSubscriptionDeleteResponse(_)
            )
        ));
        assert!(!sub.is_reporting());
        assert!(sub.admitted().is_empty());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_delete_without_model() {
        let (handle, _rx) = channel();
        let mut table = kpm_table();
        let mut sub = RicSubscription::new(
            &request(FUNCTION_ID, 1000, vec![action(1, "test")]),
            &mut table,
            handle,
            None,
        );
        let mut empty = RanFunctionTable::new();
        let pdu = sub.delete(&mut empty);
        assert!(matches!(
            pdu,
            E2apPdu::UnsuccessfulOutcome(
                e2node_e2ap::UnsuccessfulOutcome::RicSubscriptionDeleteFailure(_)
            )
        ));
    }

    #[test]
    fn test_subscription_key() {
        let key = SubscriptionKey::from(RicRequestId::new(10, 20));
        assert_eq!(key, SubscriptionKey::new(10, 20));
        assert_eq!(key.to_string(), "10/20");
        assert_eq!(RicRequestId::from(key), RicRequestId::new(10, 20));
    }
}
