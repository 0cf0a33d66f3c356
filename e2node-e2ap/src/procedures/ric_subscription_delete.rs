//! RIC Subscription Delete Procedure

use crate::codec::{mandatory_ie, IeContainer, ProtocolIe, Result};
use crate::ids::{ID_CAUSE, ID_RAN_FUNCTION_ID, ID_RIC_REQUEST_ID};
use crate::ies::{Cause, Criticality, RicRequestId};

use super::{decode_ran_function_id, ran_function_id_ie};

fn encode_subscription_ids(
    request_id: &RicRequestId,
    ran_function_id: u16,
) -> Result<Vec<ProtocolIe>> {
    Ok(vec![
        ProtocolIe::new(ID_RIC_REQUEST_ID, Criticality::Reject, request_id)?,
        ran_function_id_ie(ran_function_id)?,
    ])
}

fn decode_subscription_ids(ies: &[ProtocolIe]) -> Result<(RicRequestId, u16)> {
    let request_id = mandatory_ie(ies, ID_RIC_REQUEST_ID, "RICrequestID")?.decode_value()?;
    let ran_function_id =
        decode_ran_function_id(mandatory_ie(ies, ID_RAN_FUNCTION_ID, "RANfunctionID")?)?;
    Ok((request_id, ran_function_id))
}

#[derive(Debug, Clone, PartialEq)]
pub struct RicSubscriptionDeleteRequest {
    pub request_id: RicRequestId,
    pub ran_function_id: u16,
}

impl IeContainer for RicSubscriptionDeleteRequest {
    fn encode_ies(&self) -> Result<Vec<ProtocolIe>> {
        encode_subscription_ids(&self.request_id, self.ran_function_id)
    }

    fn decode_ies(ies: &[ProtocolIe]) -> Result<Self> {
        let (request_id, ran_function_id) = decode_subscription_ids(ies)?;
        Ok(Self {
            request_id,
            ran_function_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RicSubscriptionDeleteResponse {
    pub request_id: RicRequestId,
    pub ran_function_id: u16,
}

impl IeContainer for RicSubscriptionDeleteResponse {
    fn encode_ies(&self) -> Result<Vec<ProtocolIe>> {
        encode_subscription_ids(&self.request_id, self.ran_function_id)
    }

    fn decode_ies(ies: &[ProtocolIe]) -> Result<Self> {
        let (request_id, ran_function_id) = decode_subscription_ids(ies)?;
        Ok(Self {
            request_id,
            ran_function_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RicSubscriptionDeleteFailure {
    pub request_id: RicRequestId,
    pub ran_function_id: u16,
    pub cause: Cause,
}

impl IeContainer for RicSubscriptionDeleteFailure {
    fn encode_ies(&self) -> Result<Vec<ProtocolIe>> {
        let mut ies = encode_subscription_ids(&self.request_id, self.ran_function_id)?;
        ies.push(ProtocolIe::new(ID_CAUSE, Criticality::Ignore, &self.cause)?);
        Ok(ies)
    }

    fn decode_ies(ies: &[ProtocolIe]) -> Result<Self> {
        let (request_id, ran_function_id) = decode_subscription_ids(ies)?;
        Ok(Self {
            request_id,
            ran_function_id,
            cause: mandatory_ie(ies, ID_CAUSE, "Cause")?.decode_value()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_e2ap_pdu, encode_e2ap_pdu, E2apPdu, UnsuccessfulOutcome};
    use crate::ies::CauseRicRequest;

    #[test]
    fn test_delete_request_encoding() {
        let request = RicSubscriptionDeleteRequest {
            request_id: RicRequestId::new(123, 1),
            ran_function_id: 0,
        };
        let bytes = encode_e2ap_pdu(&E2apPdu::from(request.clone())).unwrap();
        // initiatingMessage, procedureCode 9, reject, value of 18 octets
        assert_eq!(&bytes[..4], &[0x00, 0x09, 0x00, 0x12]);
        assert_eq!(bytes.len(), 4 + 0x12);
        assert_eq!(decode_e2ap_pdu(&bytes).unwrap(), E2apPdu::from(request));
    }

    #[test]
    fn test_delete_failure() {
        let failure = RicSubscriptionDeleteFailure {
            request_id: RicRequestId::new(1, 2),
            ran_function_id: 0,
            cause: Cause::RicRequest(CauseRicRequest::RequestIdUnknown),
        };
        let bytes = encode_e2ap_pdu(&E2apPdu::from(failure.clone())).unwrap();
        match decode_e2ap_pdu(&bytes).unwrap() {
            E2apPdu::UnsuccessfulOutcome(UnsuccessfulOutcome::RicSubscriptionDeleteFailure(
                decoded,
            )) => assert_eq!(decoded, failure),
            other => panic!("Expected RicSubscriptionDeleteFailure, got {:?}", other),
        }
    }
}
