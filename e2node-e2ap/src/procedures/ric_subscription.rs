//! RIC Subscription Procedure
//!
//! The RIC installs an event trigger and a list of actions on a RAN function.
//! The E2 node answers with a RIC Subscription Response listing admitted and
//! not-admitted actions, or a RIC Subscription Failure.

use crate::codec::{
    decode_ie_list, encode_ie_list, find_ie, mandatory_ie, IeContainer, ProtocolIe, Result,
};
use crate::ids::*;
use crate::ies::{
    AperCodec, Cause, Criticality, RicActionAdmittedItem, RicActionNotAdmittedItem,
    RicActionToBeSetupItem, RicRequestId,
};
use crate::per::{self, PerDecoder, PerEncoder, SizeRange};

use super::{decode_ran_function_id, ran_function_id_ie};

/// maxofRICactionID
const ACTION_TO_BE_SETUP_LIST_SIZE: SizeRange = SizeRange::new(1, 16);
const ACTION_ADMITTED_LIST_SIZE: SizeRange = SizeRange::new(1, 16);
const ACTION_NOT_ADMITTED_LIST_SIZE: SizeRange = SizeRange::new(0, 16);

/// RICsubscriptionDetails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RicSubscriptionDetails {
    pub event_trigger_definition: Vec<u8>,
    pub actions: Vec<RicActionToBeSetupItem>,
}

impl AperCodec for RicSubscriptionDetails {
    fn aper_encode(&self, enc: &mut PerEncoder) -> per::Result<()> {
        enc.put_sequence_preamble(true, &[]);
        enc.put_octet_string(&self.event_trigger_definition)?;
        encode_ie_list(
            enc,
            ID_RIC_ACTION_TO_BE_SETUP_ITEM,
            Criticality::Ignore,
            &self.actions,
            ACTION_TO_BE_SETUP_LIST_SIZE,
        )
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> per::Result<Self> {
        dec.get_sequence_preamble(true, 0)?;
        Ok(Self {
            event_trigger_definition: dec.get_octet_string()?,
            actions: decode_ie_list(
                dec,
                ID_RIC_ACTION_TO_BE_SETUP_ITEM,
                ACTION_TO_BE_SETUP_LIST_SIZE,
            )?,
        })
    }
}

// ============================================================================
// RIC Subscription Request
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct RicSubscriptionRequest {
    pub request_id: RicRequestId,
    pub ran_function_id: u16,
    pub details: RicSubscriptionDetails,
}

impl IeContainer for RicSubscriptionRequest {
    fn encode_ies(&self) -> Result<Vec<ProtocolIe>> {
        Ok(vec![
            ProtocolIe::new(ID_RIC_REQUEST_ID, Criticality::Reject, &self.request_id)?,
            ran_function_id_ie(self.ran_function_id)?,
            ProtocolIe::new(ID_RIC_SUBSCRIPTION_DETAILS, Criticality::Reject, &self.details)?,
        ])
    }

    fn decode_ies(ies: &[ProtocolIe]) -> Result<Self> {
        Ok(Self {
            request_id: mandatory_ie(ies, ID_RIC_REQUEST_ID, "RICrequestID")?.decode_value()?,
            ran_function_id: decode_ran_function_id(mandatory_ie(
                ies,
                ID_RAN_FUNCTION_ID,
                "RANfunctionID",
            )?)?,
            details: mandatory_ie(ies, ID_RIC_SUBSCRIPTION_DETAILS, "RICsubscriptionDetails")?
                .decode_value()?,
        })
    }
}

// ============================================================================
// RIC Subscription Response
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct RicSubscriptionResponse {
    pub request_id: RicRequestId,
    pub ran_function_id: u16,
    pub admitted: Vec<RicActionAdmittedItem>,
    pub not_admitted: Vec<RicActionNotAdmittedItem>,
}

impl IeContainer for RicSubscriptionResponse {
    fn encode_ies(&self) -> Result<Vec<ProtocolIe>> {
        let mut ies = vec![
            ProtocolIe::new(ID_RIC_REQUEST_ID, Criticality::Reject, &self.request_id)?,
            ran_function_id_ie(self.ran_function_id)?,
            ProtocolIe::build(ID_RIC_ACTIONS_ADMITTED, Criticality::Reject, |enc| {
                encode_ie_list(
                    enc,
                    ID_RIC_ACTION_ADMITTED_ITEM,
                    Criticality::Ignore,
                    &self.admitted,
                    ACTION_ADMITTED_LIST_SIZE,
                )
            })?,
        ];
        if !self.not_admitted.is_empty() {
            ies.push(ProtocolIe::build(
                ID_RIC_ACTIONS_NOT_ADMITTED,
                Criticality::Reject,
                |enc| {
                    encode_ie_list(
                        enc,
                        ID_RIC_ACTION_NOT_ADMITTED_ITEM,
                        Criticality::Ignore,
                        &self.not_admitted,
                        ACTION_NOT_ADMITTED_LIST_SIZE,
                    )
                },
            )?);
        }
        Ok(ies)
    }

    fn decode_ies(ies: &[ProtocolIe]) -> Result<Self> {
        let not_admitted = match find_ie(ies, ID_RIC_ACTIONS_NOT_ADMITTED) {
            Some(ie) => ie.parse(|dec| {
                decode_ie_list(
                    dec,
                    ID_RIC_ACTION_NOT_ADMITTED_ITEM,
                    ACTION_NOT_ADMITTED_LIST_SIZE,
                )
            })?,
            None => Vec::new(),
        };
        Ok(Self {
            request_id: mandatory_ie(ies, ID_RIC_REQUEST_ID, "RICrequestID")?.decode_value()?,
            ran_function_id: decode_ran_function_id(mandatory_ie(
                ies,
                ID_RAN_FUNCTION_ID,
                "RANfunctionID",
            )?)?,
            admitted: mandatory_ie(ies, ID_RIC_ACTIONS_ADMITTED, "RICactions-Admitted")?
                .parse(|dec| {
                    decode_ie_list(dec, ID_RIC_ACTION_ADMITTED_ITEM, ACTION_ADMITTED_LIST_SIZE)
                })?,
            not_admitted,
        })
    }
}

// ============================================================================
// RIC Subscription Failure
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct RicSubscriptionFailure {
    pub request_id: RicRequestId,
    pub ran_function_id: u16,
    pub cause: Cause,
}

impl IeContainer for RicSubscriptionFailure {
    fn encode_ies(&self) -> Result<Vec<ProtocolIe>> {
        Ok(vec![
            ProtocolIe::new(ID_RIC_REQUEST_ID, Criticality::Reject, &self.request_id)?,
            ran_function_id_ie(self.ran_function_id)?,
            ProtocolIe::new(ID_CAUSE, Criticality::Reject, &self.cause)?,
        ])
    }

    fn decode_ies(ies: &[ProtocolIe]) -> Result<Self> {
        Ok(Self {
            request_id: mandatory_ie(ies, ID_RIC_REQUEST_ID, "RICrequestID")?.decode_value()?,
            ran_function_id: decode_ran_function_id(mandatory_ie(
                ies,
                ID_RAN_FUNCTION_ID,
                "RANfunctionID",
            )?)?,
            cause: mandatory_ie(ies, ID_CAUSE, "Cause")?.decode_value()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{
        decode_e2ap_pdu, encode_e2ap_pdu, E2apPdu, InitiatingMessage, SuccessfulOutcome,
    };
    use crate::ies::{CauseRicRequest, RicActionType};

    fn create_test_request() -> RicSubscriptionRequest {
        RicSubscriptionRequest {
            request_id: RicRequestId::new(123, 1),
            ran_function_id: 0,
            details: RicSubscriptionDetails {
                event_trigger_definition: vec![0x00, 0x03, 0xE7],
                actions: vec![
                    RicActionToBeSetupItem {
                        action_id: 1,
                        action_type: RicActionType::Report,
                        definition: vec![0x00, 0x01],
                        subsequent_action: None,
                    },
                    RicActionToBeSetupItem {
                        action_id: 2,
                        action_type: RicActionType::Policy,
                        definition: Vec::new(),
                        subsequent_action: None,
                    },
                ],
            },
        }
    }

    #[test]
    fn test_subscription_request() {
        let request = create_test_request();
        let bytes = encode_e2ap_pdu(&E2apPdu::from(request.clone())).unwrap();
        assert_eq!(&bytes[..3], &[0x00, 0x08, 0x00]);

        match decode_e2ap_pdu(&bytes).unwrap() {
            E2apPdu::InitiatingMessage(InitiatingMessage::RicSubscriptionRequest(decoded)) => {
                assert_eq!(decoded, request);
            }
            other => panic!("Expected RicSubscriptionRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_subscription_request_without_actions() {
        let mut request = create_test_request();
        request.details.actions.clear();
        // The action list has a lower bound of one item
        assert!(encode_e2ap_pdu(&E2apPdu::from(request)).is_err());
    }

    #[test]
    fn test_subscription_response() {
        let response = RicSubscriptionResponse {
            request_id: RicRequestId::new(123, 1),
            ran_function_id: 0,
            admitted: vec![RicActionAdmittedItem { action_id: 1 }],
            not_admitted: vec![RicActionNotAdmittedItem {
                action_id: 2,
                cause: Cause::RicRequest(CauseRicRequest::ActionNotSupported),
            }],
        };
        let bytes = encode_e2ap_pdu(&E2apPdu::from(response.clone())).unwrap();
        match decode_e2ap_pdu(&bytes).unwrap() {
            E2apPdu::SuccessfulOutcome(SuccessfulOutcome::RicSubscriptionResponse(decoded)) => {
                assert_eq!(decoded, response);
            }
            other => panic!("Expected RicSubscriptionResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_subscription_failure() {
        let failure = RicSubscriptionFailure {
            request_id: RicRequestId::new(7, 0),
            ran_function_id: 4,
            cause: Cause::RicRequest(CauseRicRequest::RanFunctionIdInvalid),
        };
        let ies = failure.encode_ies().unwrap();
        assert_eq!(ies.len(), 3);
        assert_eq!(RicSubscriptionFailure::decode_ies(&ies).unwrap(), failure);
    }
}
