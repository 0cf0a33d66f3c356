//! Reset Procedure
//!
//! Either side may reset the E2 interface. The receiver removes all RIC
//! subscriptions and answers with a Reset Response echoing the transaction id.

use crate::codec::{mandatory_ie, IeContainer, ProtocolIe, Result};
use crate::ids::{ID_CAUSE, ID_TRANSACTION_ID};
use crate::ies::{Cause, Criticality};

use super::{decode_transaction_id, transaction_id_ie};

#[derive(Debug, Clone, PartialEq)]
pub struct ResetRequest {
    pub transaction_id: u8,
    pub cause: Cause,
}

impl IeContainer for ResetRequest {
    fn encode_ies(&self) -> Result<Vec<ProtocolIe>> {
        Ok(vec![
            transaction_id_ie(self.transaction_id)?,
            ProtocolIe::new(ID_CAUSE, Criticality::Ignore, &self.cause)?,
        ])
    }

    fn decode_ies(ies: &[ProtocolIe]) -> Result<Self> {
        Ok(Self {
            transaction_id: decode_transaction_id(mandatory_ie(
                ies,
                ID_TRANSACTION_ID,
                "TransactionID",
            )?)?,
            cause: mandatory_ie(ies, ID_CAUSE, "Cause")?.decode_value()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResetResponse {
    pub transaction_id: u8,
}

impl IeContainer for ResetResponse {
    fn encode_ies(&self) -> Result<Vec<ProtocolIe>> {
        Ok(vec![transaction_id_ie(self.transaction_id)?])
    }

    fn decode_ies(ies: &[ProtocolIe]) -> Result<Self> {
        Ok(Self {
            transaction_id: decode_transaction_id(mandatory_ie(
                ies,
                ID_TRANSACTION_ID,
                "TransactionID",
            )?)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_e2ap_pdu, encode_e2ap_pdu, E2apPdu};
    use crate::ies::CauseMisc;

    #[test]
    fn test_reset_response_bytes() {
        let response = ResetResponse { transaction_id: 5 };
        let bytes = encode_e2ap_pdu(&E2apPdu::from(response.clone())).unwrap();
        assert_eq!(
            bytes,
            vec![
                0x20, 0x03, 0x00, 0x09, // successfulOutcome, Reset, reject, length
                0x00, 0x00, 0x01, // one IE
                0x00, 0x31, 0x00, 0x02, 0x00, 0x05, // TransactionID = 5
            ]
        );
        assert_eq!(decode_e2ap_pdu(&bytes).unwrap(), E2apPdu::from(response));
    }

    #[test]
    fn test_reset_request() {
        let request = ResetRequest {
            transaction_id: 0,
            cause: Cause::Misc(CauseMisc::OmIntervention),
        };
        let bytes = encode_e2ap_pdu(&E2apPdu::from(request.clone())).unwrap();
        assert_eq!(&bytes[..3], &[0x00, 0x03, 0x00]);
        assert_eq!(decode_e2ap_pdu(&bytes).unwrap(), E2apPdu::from(request));
    }
}
