//! Error Indication
//!
//! Reports a protocol error that cannot be signalled through a failure
//! message. Every IE is optional.

use crate::codec::{find_ie, IeContainer, ProtocolIe, Result};
use crate::ids::*;
use crate::ies::{Cause, Criticality, RicRequestId};

use super::{decode_ran_function_id, decode_transaction_id, ran_function_id_ie, transaction_id_ie};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorIndication {
    pub transaction_id: Option<u8>,
    pub request_id: Option<RicRequestId>,
    pub ran_function_id: Option<u16>,
    pub cause: Option<Cause>,
}

impl IeContainer for ErrorIndication {
    fn encode_ies(&self) -> Result<Vec<ProtocolIe>> {
        let mut ies = Vec::new();
        if let Some(tid) = self.transaction_id {
            ies.push(transaction_id_ie(tid)?);
        }
        if let Some(request_id) = &self.request_id {
            ies.push(ProtocolIe::new(
                ID_RIC_REQUEST_ID,
                Criticality::Reject,
                request_id,
            )?);
        }
        if let Some(ran_function_id) = self.ran_function_id {
            ies.push(ran_function_id_ie(ran_function_id)?);
        }
        if let Some(cause) = &self.cause {
            ies.push(ProtocolIe::new(ID_CAUSE, Criticality::Ignore, cause)?);
        }
        Ok(ies)
    }

    fn decode_ies(ies: &[ProtocolIe]) -> Result<Self> {
        let mut indication = ErrorIndication::default();
        if let Some(ie) = find_ie(ies, ID_TRANSACTION_ID) {
            indication.transaction_id = Some(decode_transaction_id(ie)?);
        }
        if let Some(ie) = find_ie(ies, ID_RIC_REQUEST_ID) {
            indication.request_id = Some(ie.decode_value()?);
        }
        if let Some(ie) = find_ie(ies, ID_RAN_FUNCTION_ID) {
            indication.ran_function_id = Some(decode_ran_function_id(ie)?);
        }
        if let Some(ie) = find_ie(ies, ID_CAUSE) {
            indication.cause = Some(ie.decode_value()?);
        }
        Ok(indication)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_e2ap_pdu, encode_e2ap_pdu, E2apPdu};
    use crate::ies::CauseProtocol;

    #[test]
    fn test_error_indication() {
        let indication = ErrorIndication {
            transaction_id: None,
            request_id: Some(RicRequestId::new(10, 0)),
            ran_function_id: Some(0),
            cause: Some(Cause::Protocol(CauseProtocol::TransferSyntaxError)),
        };
        let bytes = encode_e2ap_pdu(&E2apPdu::from(indication.clone())).unwrap();
        assert_eq!(&bytes[..3], &[0x00, 0x02, 0x40]);
        assert_eq!(decode_e2ap_pdu(&bytes).unwrap(), E2apPdu::from(indication));
    }

    #[test]
    fn test_empty_error_indication() {
        let ies = ErrorIndication::default().encode_ies().unwrap();
        assert!(ies.is_empty());
        assert_eq!(
            ErrorIndication::decode_ies(&ies).unwrap(),
            ErrorIndication::default()
        );
    }
}
