//! RIC Subscription scenarios

use std::time::Duration;

use e2node_agent::E2ConnectionState;
use e2node_e2ap::ies::{Cause, CauseRicRequest, RicIndicationType, RicRequestId};
use e2node_e2ap::{E2apPdu, SuccessfulOutcome, UnsuccessfulOutcome};
use e2node_e2sm::kpm::codec::{self, IndicationMessage};

use crate::test_fixtures::{
    kpm_action, subscription_delete_request, subscription_request, test_agent_config,
    AgentHarness, TEST_KPM_RAN_FUNCTION_ID,
};
use crate::test_utils::{init_test_logging, DEFAULT_TEST_TIMEOUT};

async fn established_agent() -> AgentHarness {
    init_test_logging();
    let harness = AgentHarness::start(test_agent_config());
    harness
        .wait_for_state(E2ConnectionState::Established, DEFAULT_TEST_TIMEOUT)
        .await
        .expect("established");
    harness
}

fn is_successful(pdu: &E2apPdu) -> bool {
    matches!(pdu, E2apPdu::SuccessfulOutcome(_))
}

fn is_unsuccessful(pdu: &E2apPdu) -> bool {
    matches!(pdu, E2apPdu::UnsuccessfulOutcome(_))
}

#[tokio::test(start_paused = true)]
async fn test_subscription_reports_periodically() {
    let harness = established_agent().await;
    let request_id = RicRequestId::new(100, 1);

    harness
        .ric
        .inject(
            subscription_request(
                request_id,
                TEST_KPM_RAN_FUNCTION_ID,
                1000,
                vec![
                    kpm_action(1, &["RRU.PrbTotDl", "RRU.PrbTotUl"]),
                    kpm_action(2, &["DRB.UEThpDl"]),
                ],
            )
            .into(),
        )
        .await
        .unwrap();

    let pdu = harness
        .ric
        .wait_for_pdu(DEFAULT_TEST_TIMEOUT, is_successful)
        .await
        .expect("subscription response");
    let E2apPdu::SuccessfulOutcome(SuccessfulOutcome::RicSubscriptionResponse(response)) = pdu
    else {
        panic!("Expected RICsubscriptionResponse, got {:?}", pdu);
    };
    assert_eq!(response.request_id, request_id);
    assert_eq!(response.admitted.len(), 1);
    assert_eq!(response.admitted[0].action_id, 1);
    assert_eq!(response.not_admitted.len(), 1);
    assert_eq!(response.not_admitted[0].action_id, 2);
    assert_eq!(
        response.not_admitted[0].cause,
        Cause::RicRequest(CauseRicRequest::ActionNotSupported)
    );
    assert_eq!(harness.active_subscriptions(), 1);

    let indications = harness
        .ric
        .wait_for_indications(3, Duration::from_secs(5))
        .await;
    assert_eq!(indications.len(), 3);
    for (i, indication) in indications.iter().enumerate() {
        assert_eq!(indication.request_id, request_id);
        assert_eq!(indication.ran_function_id, TEST_KPM_RAN_FUNCTION_ID);
        assert_eq!(indication.action_id, 1);
        assert_eq!(indication.indication_type, RicIndicationType::Report);
        assert_eq!(indication.sn, Some(i as u16));

        let message: IndicationMessage = codec::decode(&indication.message).unwrap();
        assert_eq!(message.info.len(), 2);
    }

    harness.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_subscription_delete_stops_reporting() {
    let harness = established_agent().await;
    let request_id = RicRequestId::new(100, 2);

    harness
        .ric
        .inject(
            subscription_request(
                request_id,
                TEST_KPM_RAN_FUNCTION_ID,
                500,
                vec![kpm_action(1, &["RRU.PrbTotDl"])],
            )
            .into(),
        )
        .await
        .unwrap();
    assert_eq!(
        harness
            .ric
            .wait_for_indications(1, Duration::from_secs(5))
            .await
            .len(),
        1
    );

    harness
        .ric
        .inject(subscription_delete_request(request_id, TEST_KPM_RAN_FUNCTION_ID).into())
        .await
        .unwrap();
    let pdu = harness
        .ric
        .wait_for_pdu(DEFAULT_TEST_TIMEOUT, |pdu| {
            matches!(
                pdu,
                E2apPdu::SuccessfulOutcome(SuccessfulOutcome::RicSubscriptionDeleteResponse(_))
            )
        })
        .await;
    assert!(pdu.is_some());
    assert_eq!(harness.active_subscriptions(), 0);

    // No further indications after the delete
    let late = harness
        .ric
        .wait_for_indications(1, Duration::from_secs(3))
        .await;
    assert!(late.is_empty());

    harness.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_delete_served_under_fast_reporting() {
    let harness = established_agent().await;
    let request_id = RicRequestId::new(100, 3);

    harness
        .ric
        .inject(
            subscription_request(
                request_id,
                TEST_KPM_RAN_FUNCTION_ID,
                2,
                vec![kpm_action(1, &["RRU.PrbTotDl"])],
            )
            .into(),
        )
        .await
        .unwrap();
    assert_eq!(
        harness
            .ric
            .wait_for_indications(5, Duration::from_secs(1))
            .await
            .len(),
        5
    );

    harness
        .ric
        .inject(subscription_delete_request(request_id, TEST_KPM_RAN_FUNCTION_ID).into())
        .await
        .unwrap();
    let pdu = harness
        .ric
        .wait_for_pdu(Duration::from_secs(3), |pdu| {
            matches!(
                pdu,
                E2apPdu::SuccessfulOutcome(SuccessfulOutcome::RicSubscriptionDeleteResponse(_))
            )
        })
        .await;
    assert!(pdu.is_some());
    assert_eq!(harness.active_subscriptions(), 0);

    harness.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_subscription_to_unknown_ran_function() {
    let harness = established_agent().await;
    let request_id = RicRequestId::new(7, 7);

    harness
        .ric
        .inject(
            subscription_request(request_id, 99, 1000, vec![kpm_action(1, &["RRU.PrbTotDl"])])
                .into(),
        )
        .await
        .unwrap();

    let pdu = harness
        .ric
        .wait_for_pdu(DEFAULT_TEST_TIMEOUT, is_unsuccessful)
        .await
        .expect("subscription failure");
    let E2apPdu::UnsuccessfulOutcome(UnsuccessfulOutcome::RicSubscriptionFailure(failure)) = pdu
    else {
        panic!("Expected RICsubscriptionFailure, got {:?}", pdu);
    };
    assert_eq!(failure.request_id, request_id);
    assert_eq!(failure.ran_function_id, 99);
    assert_eq!(
        failure.cause,
        Cause::RicRequest(CauseRicRequest::RanFunctionIdInvalid)
    );
    assert_eq!(harness.active_subscriptions(), 0);

    harness.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_subscription_without_supported_actions() {
    let harness = established_agent().await;

    harness
        .ric
        .inject(
            subscription_request(
                RicRequestId::new(7, 8),
                TEST_KPM_RAN_FUNCTION_ID,
                1000,
                vec![kpm_action(1, &["DRB.UEThpDl"])],
            )
            .into(),
        )
        .await
        .unwrap();

    let pdu = harness
        .ric
        .wait_for_pdu(DEFAULT_TEST_TIMEOUT, is_unsuccessful)
        .await;
    assert!(matches!(
        pdu,
        Some(E2apPdu::UnsuccessfulOutcome(
            UnsuccessfulOutcome::RicSubscriptionFailure(ref f)
        )) if f.cause == Cause::RicRequest(CauseRicRequest::ActionNotSupported)
    ));

    harness.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_duplicate_subscription_rejected() {
    let harness = established_agent().await;
    let request_id = RicRequestId::new(3, 3);
    let request = subscription_request(
        request_id,
        TEST_KPM_RAN_FUNCTION_ID,
        1000,
        vec![kpm_action(1, &["RRU.PrbTotDl"])],
    );

    harness.ric.inject(request.clone().into()).await.unwrap();
    harness
        .ric
        .wait_for_pdu(DEFAULT_TEST_TIMEOUT, is_successful)
        .await
        .expect("subscription response");

    harness.ric.inject(request.into()).await.unwrap();
    let pdu = harness
        .ric
        .wait_for_pdu(DEFAULT_TEST_TIMEOUT, is_unsuccessful)
        .await;
    assert!(matches!(
        pdu,
        Some(E2apPdu::UnsuccessfulOutcome(
            UnsuccessfulOutcome::RicSubscriptionFailure(ref f)
        )) if f.cause == Cause::RicRequest(CauseRicRequest::DuplicateAction)
    ));
    assert_eq!(harness.active_subscriptions(), 1);

    harness.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_delete_unknown_subscription() {
    let harness = established_agent().await;
    let request_id = RicRequestId::new(5, 5);

    harness
        .ric
        .inject(subscription_delete_request(request_id, TEST_KPM_RAN_FUNCTION_ID).into())
        .await
        .unwrap();

    let pdu = harness
        .ric
        .wait_for_pdu(DEFAULT_TEST_TIMEOUT, is_unsuccessful)
        .await;
    assert!(matches!(
        pdu,
        Some(E2apPdu::UnsuccessfulOutcome(
            UnsuccessfulOutcome::RicSubscriptionDeleteFailure(ref f)
        )) if f.request_id == request_id
            && f.cause == Cause::RicRequest(CauseRicRequest::RequestIdUnknown)
    ));

    harness.shutdown().await;
}
