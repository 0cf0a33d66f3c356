//! E2AP procedure messages
//!
//! Each module holds the messages of one elementary procedure and their
//! conversion to and from the protocol IE container.

pub mod e2_setup;
pub mod error_indication;
pub mod reset;
pub mod ric_indication;
pub mod ric_subscription;
pub mod ric_subscription_delete;
pub mod transaction_failure;

pub use e2_setup::{E2SetupFailure, E2SetupRequest, E2SetupResponse};
pub use error_indication::ErrorIndication;
pub use reset::{ResetRequest, ResetResponse};
pub use ric_indication::RicIndication;
pub use ric_subscription::{
    RicSubscriptionDetails, RicSubscriptionFailure, RicSubscriptionRequest,
    RicSubscriptionResponse,
};
pub use ric_subscription_delete::{
    RicSubscriptionDeleteFailure, RicSubscriptionDeleteRequest, RicSubscriptionDeleteResponse,
};
pub use transaction_failure::TransactionFailure;

use crate::codec::ProtocolIe;
use crate::ids::{ID_RAN_FUNCTION_ID, ID_TRANSACTION_ID};
use crate::ies::Criticality;
use crate::per;

// ============================================================================
// Shared IE helpers
// ============================================================================

/// TransactionID ::= INTEGER (0..255, ...)
pub(crate) fn transaction_id_ie(transaction_id: u8) -> per::Result<ProtocolIe> {
    ProtocolIe::build(ID_TRANSACTION_ID, Criticality::Reject, |enc| {
        enc.put_extensible_constrained(u64::from(transaction_id), 0, 255)
    })
}

pub(crate) fn decode_transaction_id(ie: &ProtocolIe) -> per::Result<u8> {
    ie.parse(|dec| Ok(dec.get_extensible_constrained(0, 255)? as u8))
}

/// RANfunctionID ::= INTEGER (0..4095)
pub(crate) fn ran_function_id_ie(ran_function_id: u16) -> per::Result<ProtocolIe> {
    ProtocolIe::build(ID_RAN_FUNCTION_ID, Criticality::Reject, |enc| {
        enc.put_constrained(u64::from(ran_function_id), 0, 4095)
    })
}

pub(crate) fn decode_ran_function_id(ie: &ProtocolIe) -> per::Result<u16> {
    ie.parse(|dec| Ok(dec.get_constrained(0, 4095)? as u16))
}

/// IE carrying an unconstrained OCTET STRING
pub(crate) fn octets_ie(id: u16, criticality: Criticality, data: &[u8]) -> per::Result<ProtocolIe> {
    ProtocolIe::build(id, criticality, |enc| enc.put_octet_string(data))
}

pub(crate) fn decode_octets(ie: &ProtocolIe) -> per::Result<Vec<u8>> {
    ie.parse(|dec| dec.get_octet_string())
}
