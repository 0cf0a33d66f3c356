//! E2 Setup scenarios

use std::time::Duration;

use e2node_agent::{E2AgentError, E2ConnectionState};
use e2node_e2ap::ies::{Cause, CauseMisc, GlobalE2NodeId, TimeToWait};
use e2node_e2ap::{E2apPdu, InitiatingMessage};
use e2node_e2sm::kpm::KPM_OID;

use crate::mock_ric::{MockRicConfig, MockRicEvent, SetupBehavior};
use crate::test_fixtures::{test_agent_config, AgentHarness, TEST_GNB_ID, TEST_KPM_RAN_FUNCTION_ID};
use crate::test_utils::{init_test_logging, DEFAULT_TEST_TIMEOUT};

fn is_setup_request(pdu: &E2apPdu) -> bool {
    matches!(
        pdu,
        E2apPdu::InitiatingMessage(InitiatingMessage::E2SetupRequest(_))
    )
}

#[tokio::test(start_paused = true)]
async fn test_setup_success() {
    init_test_logging();
    let harness = AgentHarness::start(test_agent_config());

    let pdu = harness
        .ric
        .wait_for_pdu(DEFAULT_TEST_TIMEOUT, is_setup_request)
        .await
        .expect("E2 Setup Request");
    let E2apPdu::InitiatingMessage(InitiatingMessage::E2SetupRequest(request)) = pdu else {
        unreachable!()
    };
    let GlobalE2NodeId::Gnb(gnb) = &request.global_e2_node_id;
    assert_eq!(gnb.gnb_id.value, TEST_GNB_ID);
    assert_eq!(gnb.gnb_id.length, 22);
    assert_eq!(request.ran_functions.len(), 1);
    assert_eq!(
        request.ran_functions[0].ran_function_id,
        TEST_KPM_RAN_FUNCTION_ID
    );
    assert_eq!(request.ran_functions[0].oid, KPM_OID);

    harness
        .wait_for_state(E2ConnectionState::Established, DEFAULT_TEST_TIMEOUT)
        .await
        .expect("established");
    {
        let status = harness.status.borrow();
        assert_eq!(status.setup_attempts, 0);
        assert!(status.global_ric_id.is_some());
    }
    assert_eq!(harness.ric.connect_attempts().await, 1);

    assert!(matches!(harness.shutdown().await, Some(Ok(()))));
}

#[tokio::test(start_paused = true)]
async fn test_setup_failure_then_success() {
    init_test_logging();
    let harness = AgentHarness::start_with_ric(
        test_agent_config(),
        MockRicConfig {
            setup_behavior: SetupBehavior::Reject {
                cause: Cause::Misc(CauseMisc::ControlProcessingOverload),
                time_to_wait: Some(TimeToWait::V5s),
            },
            ..MockRicConfig::default()
        },
    );

    harness
        .ric
        .wait_for_pdu(DEFAULT_TEST_TIMEOUT, is_setup_request)
        .await
        .expect("first E2 Setup Request");
    harness
        .wait_for_state(E2ConnectionState::Disconnected, DEFAULT_TEST_TIMEOUT)
        .await
        .expect("disconnected after failure");
    harness.ric.set_setup_behavior(SetupBehavior::Accept).await;

    // TimeToWait (5 s) outweighs the 1 s reconnect timer
    let before = tokio::time::Instant::now();
    harness
        .wait_for_state(E2ConnectionState::Established, Duration::from_secs(30))
        .await
        .expect("established on retry");
    assert!(before.elapsed() >= Duration::from_secs(4));
    assert_eq!(harness.ric.connect_attempts().await, 2);

    harness.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_retries_exhausted_terminates_agent() {
    init_test_logging();
    let mut config = test_agent_config();
    config.max_ric_setup_retries = 2;
    let mut harness = AgentHarness::start_with_ric(
        config,
        MockRicConfig {
            refuse_connects: u32::MAX,
            ..MockRicConfig::default()
        },
    );

    let result = harness.join(Duration::from_secs(60)).await;
    assert!(matches!(
        result,
        Some(Err(E2AgentError::SetupRetriesExhausted { attempts: 3 }))
    ));
    assert_eq!(harness.ric.connect_attempts().await, 3);
}

#[tokio::test(start_paused = true)]
async fn test_unanswered_setup_times_out() {
    init_test_logging();
    let harness = AgentHarness::start_with_ric(
        test_agent_config(),
        MockRicConfig {
            setup_behavior: SetupBehavior::Ignore,
            ..MockRicConfig::default()
        },
    );

    harness
        .wait_for_state(E2ConnectionState::SetupPending, DEFAULT_TEST_TIMEOUT)
        .await
        .expect("setup pending");
    harness.ric.set_setup_behavior(SetupBehavior::Accept).await;

    // 2 s setup timeout, then the association is dropped and retried
    let mut closed = false;
    while let Some(event) = harness.ric.next_event(Duration::from_secs(10)).await {
        if matches!(event, MockRicEvent::Closed) {
            closed = true;
            break;
        }
    }
    assert!(closed);

    harness
        .wait_for_state(E2ConnectionState::Established, DEFAULT_TEST_TIMEOUT)
        .await
        .expect("established after timeout");
    assert_eq!(harness.ric.connect_attempts().await, 2);

    harness.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_refused_connect_is_retried() {
    init_test_logging();
    let harness = AgentHarness::start_with_ric(
        test_agent_config(),
        MockRicConfig {
            refuse_connects: 2,
            ..MockRicConfig::default()
        },
    );

    harness
        .wait_for_state(E2ConnectionState::Established, Duration::from_secs(30))
        .await
        .expect("established on third attempt");
    assert_eq!(harness.ric.connect_attempts().await, 3);

    harness.shutdown().await;
}
