//! Failure messages of the global (transaction-based) procedures
//!
//! E2 Setup Failure, E2 Node Configuration Update Failure, RIC Service Update
//! Failure and E2 Removal Failure all carry a TransactionID, a Cause and an
//! optional TimeToWait.

use crate::codec::{find_ie, mandatory_ie, IeContainer, ProtocolIe, Result};
use crate::ids::{ID_CAUSE, ID_TIME_TO_WAIT, ID_TRANSACTION_ID};
use crate::ies::{Cause, Criticality, TimeToWait};

use super::{decode_transaction_id, transaction_id_ie};

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFailure {
    pub transaction_id: u8,
    pub cause: Cause,
    pub time_to_wait: Option<TimeToWait>,
}

impl IeContainer for TransactionFailure {
    fn encode_ies(&self) -> Result<Vec<ProtocolIe>> {
        let mut ies = vec![
            transaction_id_ie(self.transaction_id)?,
            ProtocolIe::new(ID_CAUSE, Criticality::Ignore, &self.cause)?,
        ];
        if let Some(ttw) = &self.time_to_wait {
            ies.push(ProtocolIe::new(ID_TIME_TO_WAIT, Criticality::Ignore, ttw)?);
        }
        Ok(ies)
    }

    fn decode_ies(ies: &[ProtocolIe]) -> Result<Self> {
        let time_to_wait = match find_ie(ies, ID_TIME_TO_WAIT) {
            Some(ie) => Some(ie.decode_value::<TimeToWait>()?),
            None => None,
        };
        Ok(Self {
            transaction_id: decode_transaction_id(mandatory_ie(
                ies,
                ID_TRANSACTION_ID,
                "TransactionID",
            )?)?,
            cause: mandatory_ie(ies, ID_CAUSE, "Cause")?.decode_value()?,
            time_to_wait,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_e2ap_pdu, encode_e2ap_pdu, E2apPdu, UnsuccessfulOutcome};
    use crate::ies::CauseProtocol;

    #[test]
    fn test_removal_failure_decoded() {
        let failure = TransactionFailure {
            transaction_id: 9,
            cause: Cause::Protocol(CauseProtocol::SemanticError),
            time_to_wait: None,
        };
        let pdu = E2apPdu::UnsuccessfulOutcome(UnsuccessfulOutcome::E2RemovalFailure(failure));
        let bytes = encode_e2ap_pdu(&pdu).unwrap();
        let decoded = decode_e2ap_pdu(&bytes).unwrap();
        assert_eq!(decoded.name(), "E2RemovalFailure");
        assert_eq!(decoded, pdu);
    }

    #[test]
    fn test_missing_cause() {
        let ies = vec![transaction_id_ie(2).unwrap()];
        assert!(TransactionFailure::decode_ies(&ies).is_err());
    }
}
