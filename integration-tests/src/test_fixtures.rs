//! Common test fixtures
//!
//! [`AgentHarness`] runs an [`E2AgentTask`] wired to a [`MockRic`] and
//! offers the helpers the scenario tests share.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use e2node_agent::{
    task_channel, E2AgentError, E2AgentMessage, E2AgentTask, E2ConnectionState,
    RanFunctionTable, StatusReceiver, Task, TaskHandle,
};
use e2node_common::{E2AgentConfig, Plmn};
use e2node_e2ap::ies::{RicActionToBeSetupItem, RicActionType, RicRequestId};
use e2node_e2ap::procedures::{
    RicSubscriptionDeleteRequest, RicSubscriptionDetails, RicSubscriptionRequest,
};
use e2node_e2sm::kpm::codec::{
    self, ActionDefinition, ActionDefinitionFormat1, EventTriggerDefinition, LabelKind,
    MeasurementInfoItem, MeasurementLabel, MeasurementType,
};
use e2node_e2sm::KpmServiceModel;

use crate::mock_ric::{MockRic, MockRicConfig};
use crate::test_utils::{wait_for_condition, TestResult, DEFAULT_POLL_INTERVAL};

/// RAN function id the KPM model is registered under in tests
pub const TEST_KPM_RAN_FUNCTION_ID: u16 = 2;

/// gNB ID advertised in tests
pub const TEST_GNB_ID: u32 = 411;

/// Agent configuration pointing at the mock RIC.
pub fn test_agent_config() -> E2AgentConfig {
    let mut config = E2AgentConfig::new("127.0.0.1".parse().expect("valid address"));
    config.ric_connect_timer = 1;
    config.setup_timeout_ms = 2000;
    config.kpm_ran_function_id = TEST_KPM_RAN_FUNCTION_ID;
    config.node.plmn = Plmn::new(1, 1, false);
    config.node.gnb_id = TEST_GNB_ID;
    config
}

/// KPM REPORT action measuring `measurements`.
pub fn kpm_action(action_id: u8, measurements: &[&str]) -> RicActionToBeSetupItem {
    let definition = ActionDefinition {
        style_type: 1,
        format1: ActionDefinitionFormat1 {
            measurements: measurements
                .iter()
                .map(|name| MeasurementInfoItem {
                    measurement: MeasurementType::Name((*name).to_string()),
                    labels: vec![MeasurementLabel::new(LabelKind::NoLabel)],
                })
                .collect(),
            granularity_period_ms: 1000,
            cell_global_id: None,
        },
    };
    RicActionToBeSetupItem {
        action_id,
        action_type: RicActionType::Report,
        definition: codec::encode(&definition).expect("action definition encodes"),
        subsequent_action: None,
    }
}

/// RIC Subscription Request reporting every `period_ms`.
pub fn subscription_request(
    request_id: RicRequestId,
    ran_function_id: u16,
    period_ms: u32,
    actions: Vec<RicActionToBeSetupItem>,
) -> RicSubscriptionRequest {
    RicSubscriptionRequest {
        request_id,
        ran_function_id,
        details: RicSubscriptionDetails {
            event_trigger_definition: codec::encode(&EventTriggerDefinition {
                report_period_ms: period_ms,
            })
            .expect("event trigger encodes"),
            actions,
        },
    }
}

pub fn subscription_delete_request(
    request_id: RicRequestId,
    ran_function_id: u16,
) -> RicSubscriptionDeleteRequest {
    RicSubscriptionDeleteRequest {
        request_id,
        ran_function_id,
    }
}

/// Running agent wired to a mock RIC
pub struct AgentHarness {
    pub ric: MockRic,
    pub handle: TaskHandle<E2AgentMessage>,
    pub status: StatusReceiver,
    join: Option<JoinHandle<Result<(), E2AgentError>>>,
}

impl AgentHarness {
    /// Starts an agent with the default mock RIC.
    pub fn start(config: E2AgentConfig) -> Self {
        Self::start_with_ric(config, MockRicConfig::default())
    }

    pub fn start_with_ric(config: E2AgentConfig, ric_config: MockRicConfig) -> Self {
        let ric = MockRic::with_config(ric_config);
        let mut ran_functions = RanFunctionTable::new();
        ran_functions.register(config.kpm_ran_function_id, Box::new(KpmServiceModel::new()));

        let (handle, rx) = task_channel(64);
        let mut task = E2AgentTask::new(config, ran_functions, Arc::new(ric.clone()), handle.clone())
            .expect("valid agent configuration");
        let status = task.status_receiver();
        let join = tokio::spawn(async move { task.run(rx).await });

        Self {
            ric,
            handle,
            status,
            join: Some(join),
        }
    }

    pub fn state(&self) -> E2ConnectionState {
        self.status.borrow().state
    }

    pub fn active_subscriptions(&self) -> usize {
        self.status.borrow().active_subscriptions
    }

    /// Waits until the agent reports `state`.
    pub async fn wait_for_state(&self, state: E2ConnectionState, timeout: Duration) -> TestResult {
        wait_for_condition(
            || async { self.state() == state },
            timeout,
            DEFAULT_POLL_INTERVAL,
        )
        .await
    }

    /// Waits for the agent task to terminate.
    pub async fn join(&mut self, timeout: Duration) -> Option<Result<(), E2AgentError>> {
        let join = self.join.take()?;
        match tokio::time::timeout(timeout, join).await {
            Ok(Ok(result)) => Some(result),
            _ => None,
        }
    }

    /// Requests shutdown and waits for the task to stop.
    pub async fn shutdown(mut self) -> Option<Result<(), E2AgentError>> {
        let _ = self.handle.shutdown().await;
        self.join(Duration::from_secs(5)).await
    }
}
