//! E2 Setup Procedure
//!
//! The E2 node opens the E2 interface by sending an E2 Setup Request listing
//! its RAN functions. The RIC answers with an E2 Setup Response carrying its
//! Global RIC ID and the accepted/rejected functions, or an E2 Setup Failure.

use crate::codec::{
    decode_ie_list, encode_ie_list, find_ie, mandatory_ie, IeContainer, ProtocolIe, Result,
};
use crate::ids::*;
use crate::ies::{
    AperCodec, Criticality, E2NodeComponentConfigAdditionAckItem,
    E2NodeComponentConfigAdditionItem, GlobalE2NodeId, GlobalRicId, RanFunctionIdCauseItem,
    RanFunctionIdItem, RanFunctionItem,
};
use crate::per::SizeRange;

use super::{decode_transaction_id, transaction_id_ie, TransactionFailure};

/// maxofRANfunctionID
const RAN_FUNCTION_LIST_SIZE: SizeRange = SizeRange::new(1, 256);
/// maxofE2nodeComponents
const COMPONENT_LIST_SIZE: SizeRange = SizeRange::new(1, 1024);

/// E2 Setup Failure shares the transaction failure layout.
pub type E2SetupFailure = TransactionFailure;

// ============================================================================
// E2 Setup Request
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct E2SetupRequest {
    pub transaction_id: u8,
    pub global_e2_node_id: GlobalE2NodeId,
    pub ran_functions: Vec<RanFunctionItem>,
    /// Omitted from the message when empty
    pub component_config_addition: Vec<E2NodeComponentConfigAdditionItem>,
}

impl IeContainer for E2SetupRequest {
    fn encode_ies(&self) -> Result<Vec<ProtocolIe>> {
        let mut ies = vec![
            transaction_id_ie(self.transaction_id)?,
            ProtocolIe::new(
                ID_GLOBAL_E2_NODE_ID,
                Criticality::Reject,
                &self.global_e2_node_id,
            )?,
        ];

        if !self.ran_functions.is_empty() {
            ies.push(ProtocolIe::build(
                ID_RAN_FUNCTIONS_ADDED,
                Criticality::Reject,
                |enc| {
                    encode_ie_list(
                        enc,
                        ID_RAN_FUNCTION_ITEM,
                        Criticality::Ignore,
                        &self.ran_functions,
                        RAN_FUNCTION_LIST_SIZE,
                    )
                },
            )?);
        }

        if !self.component_config_addition.is_empty() {
            ies.push(ProtocolIe::build(
                ID_E2_NODE_COMPONENT_CONFIG_ADDITION,
                Criticality::Reject,
                |enc| {
                    encode_ie_list(
                        enc,
                        ID_E2_NODE_COMPONENT_CONFIG_ADDITION_ITEM,
                        Criticality::Reject,
                        &self.component_config_addition,
                        COMPONENT_LIST_SIZE,
                    )
                },
            )?);
        }

        Ok(ies)
    }

    fn decode_ies(ies: &[ProtocolIe]) -> Result<Self> {
        let transaction_id =
            decode_transaction_id(mandatory_ie(ies, ID_TRANSACTION_ID, "TransactionID")?)?;
        let global_e2_node_id = mandatory_ie(ies, ID_GLOBAL_E2_NODE_ID, "GlobalE2node-ID")?
            .decode_value::<GlobalE2NodeId>()?;

        let ran_functions = match find_ie(ies, ID_RAN_FUNCTIONS_ADDED) {
            Some(ie) => ie.parse(|dec| {
                decode_ie_list(dec, ID_RAN_FUNCTION_ITEM, RAN_FUNCTION_LIST_SIZE)
            })?,
            None => Vec::new(),
        };

        let component_config_addition = match find_ie(ies, ID_E2_NODE_COMPONENT_CONFIG_ADDITION)
        {
            Some(ie) => ie.parse(|dec| {
                decode_ie_list(
                    dec,
                    ID_E2_NODE_COMPONENT_CONFIG_ADDITION_ITEM,
                    COMPONENT_LIST_SIZE,
                )
            })?,
            None => Vec::new(),
        };

        Ok(Self {
            transaction_id,
            global_e2_node_id,
            ran_functions,
            component_config_addition,
        })
    }
}

// ============================================================================
// E2 Setup Response
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct E2SetupResponse {
    pub transaction_id: u8,
    pub global_ric_id: GlobalRicId,
    pub accepted: Vec<RanFunctionIdItem>,
    pub rejected: Vec<RanFunctionIdCauseItem>,
    pub component_config_ack: Vec<E2NodeComponentConfigAdditionAckItem>,
}

impl E2SetupResponse {
    /// Returns true if the RIC accepted the given RAN function.
    pub fn is_accepted(&self, ran_function_id: u16) -> bool {
        self.accepted
            .iter()
            .any(|item| item.ran_function_id == ran_function_id)
    }
}

impl IeContainer for E2SetupResponse {
    fn encode_ies(&self) -> Result<Vec<ProtocolIe>> {
        let mut ies = vec![
            transaction_id_ie(self.transaction_id)?,
            ProtocolIe::new(ID_GLOBAL_RIC_ID, Criticality::Reject, &self.global_ric_id)?,
        ];

        if !self.accepted.is_empty() {
            ies.push(ProtocolIe::build(
                ID_RAN_FUNCTIONS_ACCEPTED,
                Criticality::Reject,
                |enc| {
                    encode_ie_list(
                        enc,
                        ID_RAN_FUNCTION_ID_ITEM,
                        Criticality::Ignore,
                        &self.accepted,
                        RAN_FUNCTION_LIST_SIZE,
                    )
                },
            )?);
        }

        if !self.rejected.is_empty() {
            ies.push(ProtocolIe::build(
                ID_RAN_FUNCTIONS_REJECTED,
                Criticality::Reject,
                |enc| {
                    encode_ie_list(
                        enc,
                        ID_RAN_FUNCTION_IE_CAUSE_ITEM,
                        Criticality::Ignore,
                        &self.rejected,
                        RAN_FUNCTION_LIST_SIZE,
                    )
                },
            )?);
        }

        if !self.component_config_ack.is_empty() {
            ies.push(ProtocolIe::build(
                ID_E2_NODE_COMPONENT_CONFIG_ADDITION_ACK,
                Criticality::Reject,
                |enc| {
                    encode_ie_list(
                        enc,
                        ID_E2_NODE_COMPONENT_CONFIG_ADDITION_ACK_ITEM,
                        Criticality::Reject,
                        &self.component_config_ack,
                        COMPONENT_LIST_SIZE,
                    )
                },
            )?);
        }

        Ok(ies)
    }

    fn decode_ies(ies: &[ProtocolIe]) -> Result<Self> {
        let transaction_id =
            decode_transaction_id(mandatory_ie(ies, ID_TRANSACTION_ID, "TransactionID")?)?;
        let global_ric_id = mandatory_ie(ies, ID_GLOBAL_RIC_ID, "GlobalRIC-ID")?
            .decode_value::<GlobalRicId>()?;

        let accepted = decode_optional_list(ies, ID_RAN_FUNCTIONS_ACCEPTED, |ie| {
            ie.parse(|dec| decode_ie_list(dec, ID_RAN_FUNCTION_ID_ITEM, RAN_FUNCTION_LIST_SIZE))
        })?;
        let rejected = decode_optional_list(ies, ID_RAN_FUNCTIONS_REJECTED, |ie| {
            ie.parse(|dec| {
                decode_ie_list(dec, ID_RAN_FUNCTION_IE_CAUSE_ITEM, RAN_FUNCTION_LIST_SIZE)
            })
        })?;
        let component_config_ack =
            decode_optional_list(ies, ID_E2_NODE_COMPONENT_CONFIG_ADDITION_ACK, |ie| {
                ie.parse(|dec| {
                    decode_ie_list(
                        dec,
                        ID_E2_NODE_COMPONENT_CONFIG_ADDITION_ACK_ITEM,
                        COMPONENT_LIST_SIZE,
                    )
                })
            })?;

        Ok(Self {
            transaction_id,
            global_ric_id,
            accepted,
            rejected,
            component_config_ack,
        })
    }
}

fn decode_optional_list<T: AperCodec>(
    ies: &[ProtocolIe],
    id: u16,
    f: impl FnOnce(&ProtocolIe) -> crate::per::Result<Vec<T>>,
) -> Result<Vec<T>> {
    match find_ie(ies, id) {
        Some(ie) => Ok(f(ie)?),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_e2ap_pdu, encode_e2ap_pdu, E2apPdu, SuccessfulOutcome, UnsuccessfulOutcome};
    use crate::ies::{
        Cause, CauseMisc, CauseRicService, ComponentUpdateOutcome, E2NodeComponentId,
        E2NodeComponentInterfaceType, GlobalE2NodeGnbId, GnbId, TimeToWait,
    };
    use e2node_common::Plmn;

    fn create_test_setup_request() -> E2SetupRequest {
        E2SetupRequest {
            transaction_id: 1,
            global_e2_node_id: GlobalE2NodeId::Gnb(GlobalE2NodeGnbId {
                plmn: Plmn::new(1, 1, false),
                gnb_id: GnbId {
                    value: 411,
                    length: 22,
                },
                gnb_cu_up_id: None,
                gnb_du_id: None,
            }),
            ran_functions: vec![RanFunctionItem {
                ran_function_id: 0,
                definition: vec![0x20, 0xC0, 0x4F, 0x52],
                revision: 0,
                oid: "1.3.6.1.4.1.53148.1.2.2.2".to_string(),
            }],
            component_config_addition: Vec::new(),
        }
    }

    #[test]
    fn test_setup_request_encoding() {
        let request = create_test_setup_request();
        let bytes = encode_e2ap_pdu(&E2apPdu::from(request.clone())).unwrap();

        // initiatingMessage, procedureCode 1, reject
        assert_eq!(&bytes[..3], &[0x00, 0x01, 0x00]);
        // ext, 3 IEs, TransactionID (49) reject, length 2, value 1
        assert_eq!(&bytes[4..13], &[0x00, 0x00, 0x03, 0x00, 0x31, 0x00, 0x02, 0x00, 0x01]);

        match decode_e2ap_pdu(&bytes).unwrap() {
            E2apPdu::InitiatingMessage(crate::codec::InitiatingMessage::E2SetupRequest(decoded)) => {
                assert_eq!(decoded, request);
            }
            other => panic!("Expected E2SetupRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_setup_request_with_component() {
        let mut request = create_test_setup_request();
        request.component_config_addition = vec![E2NodeComponentConfigAdditionItem {
            interface_type: E2NodeComponentInterfaceType::Ng,
            component_id: E2NodeComponentId::Ng {
                amf_name: "amf1".to_string(),
            },
            request_part: vec![0x00],
            response_part: vec![0x00],
        }];

        let ies = request.encode_ies().unwrap();
        assert_eq!(ies.len(), 4);
        assert_eq!(E2SetupRequest::decode_ies(&ies).unwrap(), request);
    }

    #[test]
    fn test_setup_response() {
        let response = E2SetupResponse {
            transaction_id: 1,
            global_ric_id: GlobalRicId {
                plmn: Plmn::new(1, 1, false),
                ric_id: 0x12345,
            },
            accepted: vec![RanFunctionIdItem {
                ran_function_id: 0,
                revision: 0,
            }],
            rejected: vec![RanFunctionIdCauseItem {
                ran_function_id: 3,
                cause: Cause::RicService(CauseRicService::RanFunctionNotSupported),
            }],
            component_config_ack: vec![E2NodeComponentConfigAdditionAckItem {
                interface_type: E2NodeComponentInterfaceType::Ng,
                component_id: E2NodeComponentId::Ng {
                    amf_name: "amf1".to_string(),
                },
                outcome: ComponentUpdateOutcome::Success,
                failure_cause: None,
            }],
        };

        let bytes = encode_e2ap_pdu(&E2apPdu::from(response.clone())).unwrap();
        match decode_e2ap_pdu(&bytes).unwrap() {
            E2apPdu::SuccessfulOutcome(SuccessfulOutcome::E2SetupResponse(decoded)) => {
                assert!(decoded.is_accepted(0));
                assert!(!decoded.is_accepted(3));
                assert_eq!(decoded, response);
            }
            other => panic!("Expected E2SetupResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_setup_failure() {
        let failure = E2SetupFailure {
            transaction_id: 1,
            cause: Cause::Misc(CauseMisc::Unspecified),
            time_to_wait: Some(TimeToWait::V5s),
        };
        let pdu = E2apPdu::UnsuccessfulOutcome(UnsuccessfulOutcome::E2SetupFailure(failure.clone()));

        let bytes = encode_e2ap_pdu(&pdu).unwrap();
        assert_eq!(bytes[0], 0x40);
        assert_eq!(decode_e2ap_pdu(&bytes).unwrap(), pdu);
    }

    #[test]
    fn test_setup_response_missing_ric_id() {
        let ies = vec![transaction_id_ie(1).unwrap()];
        let result = E2SetupResponse::decode_ies(&ies);
        assert!(matches!(
            result,
            Err(crate::codec::E2apCodecError::MissingMandatoryIe("GlobalRIC-ID"))
        ));
    }
}
