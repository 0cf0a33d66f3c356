//! E2AP PDU codec
//!
//! Two layers are provided. The raw layer ([`RawMessage`], [`ProtocolIe`])
//! mirrors the wire structure shared by every E2AP message: a procedure code,
//! a criticality and a container of protocol IEs whose values are open types.
//! The typed layer ([`E2apPdu`]) maps the procedures this node handles to
//! message structs; everything else stays raw in an `Other` arm.

use thiserror::Error;

use crate::ids::*;
use crate::ies::{AperCodec, Criticality};
use crate::per::{self, PerDecoder, PerEncoder, PerError, SizeRange};
use crate::procedures::{
    E2SetupFailure, E2SetupRequest, E2SetupResponse, ErrorIndication, ResetRequest,
    ResetResponse, RicIndication, RicSubscriptionDeleteFailure, RicSubscriptionDeleteRequest,
    RicSubscriptionDeleteResponse, RicSubscriptionFailure, RicSubscriptionRequest,
    RicSubscriptionResponse, TransactionFailure,
};

/// E2AP codec error types
#[derive(Debug, Error)]
pub enum E2apCodecError {
    /// Error in the aligned PER layer
    #[error("APER error: {0}")]
    Per(#[from] PerError),

    /// A mandatory IE is absent
    #[error("Missing mandatory IE: {0}")]
    MissingMandatoryIe(&'static str),

    /// An IE is present but its value is not acceptable
    #[error("Invalid IE value: {0}")]
    InvalidIeValue(String),
}

/// Result type for E2AP codec operations
pub type Result<T> = std::result::Result<T, E2apCodecError>;

/// Maximum number of IEs in a ProtocolIE-Container
const PROTOCOL_IE_CONTAINER_SIZE: SizeRange = SizeRange::new(0, 65535);

// ============================================================================
// Raw layer
// ============================================================================

/// ProtocolIE-Field with its value kept as an encoded open type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolIe {
    pub id: u16,
    pub criticality: Criticality,
    pub value: Vec<u8>,
}

impl ProtocolIe {
    /// Builds an IE from a typed value.
    pub fn new<T: AperCodec>(id: u16, criticality: Criticality, value: &T) -> per::Result<Self> {
        Self::build(id, criticality, |enc| value.aper_encode(enc))
    }

    /// Builds an IE whose value is written by `f`.
    pub fn build(
        id: u16,
        criticality: Criticality,
        f: impl FnOnce(&mut PerEncoder) -> per::Result<()>,
    ) -> per::Result<Self> {
        let mut enc = PerEncoder::new();
        f(&mut enc)?;
        Ok(Self {
            id,
            criticality,
            value: enc.finish(),
        })
    }

    /// Decodes the value as `T`.
    pub fn decode_value<T: AperCodec>(&self) -> per::Result<T> {
        T::aper_decode(&mut PerDecoder::new(&self.value))
    }

    /// Decodes the value with `f`.
    pub fn parse<T>(&self, f: impl FnOnce(&mut PerDecoder<'_>) -> per::Result<T>) -> per::Result<T> {
        f(&mut PerDecoder::new(&self.value))
    }
}

impl AperCodec for ProtocolIe {
    fn aper_encode(&self, enc: &mut PerEncoder) -> per::Result<()> {
        enc.put_constrained(u64::from(self.id), 0, 65535)?;
        self.criticality.aper_encode(enc)?;
        enc.put_open_type(&self.value)
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> per::Result<Self> {
        Ok(Self {
            id: dec.get_constrained(0, 65535)? as u16,
            criticality: Criticality::aper_decode(dec)?,
            value: dec.get_open_type()?,
        })
    }
}

/// An E2AP message with its IEs left undecoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    pub procedure_code: u8,
    pub criticality: Criticality,
    pub ies: Vec<ProtocolIe>,
}

impl RawMessage {
    /// Returns the first IE with the given id.
    pub fn find_ie(&self, id: u16) -> Option<&ProtocolIe> {
        find_ie(&self.ies, id)
    }

    fn encode_value(&self) -> per::Result<Vec<u8>> {
        let mut enc = PerEncoder::new();
        enc.put_sequence_preamble(true, &[]);
        enc.put_constrained_length(self.ies.len(), PROTOCOL_IE_CONTAINER_SIZE)?;
        for ie in &self.ies {
            ie.aper_encode(&mut enc)?;
        }
        Ok(enc.finish())
    }

    fn decode_value(bytes: &[u8]) -> per::Result<Vec<ProtocolIe>> {
        let mut dec = PerDecoder::new(bytes);
        dec.get_sequence_preamble(true, 0)?;
        let count = dec.get_constrained_length(PROTOCOL_IE_CONTAINER_SIZE)?;
        (0..count).map(|_| ProtocolIe::aper_decode(&mut dec)).collect()
    }
}

/// Returns the first IE with the given id.
pub fn find_ie(ies: &[ProtocolIe], id: u16) -> Option<&ProtocolIe> {
    ies.iter().find(|ie| ie.id == id)
}

/// Returns the IE with the given id or a missing-IE error naming it.
pub fn mandatory_ie<'a>(
    ies: &'a [ProtocolIe],
    id: u16,
    name: &'static str,
) -> Result<&'a ProtocolIe> {
    find_ie(ies, id).ok_or(E2apCodecError::MissingMandatoryIe(name))
}

/// Encodes a SEQUENCE OF ProtocolIE-SingleContainer.
pub fn encode_ie_list<T: AperCodec>(
    enc: &mut PerEncoder,
    item_id: u16,
    criticality: Criticality,
    items: &[T],
    size: SizeRange,
) -> per::Result<()> {
    enc.put_constrained_length(items.len(), size)?;
    for item in items {
        ProtocolIe::new(item_id, criticality, item)?.aper_encode(enc)?;
    }
    Ok(())
}

/// Decodes a SEQUENCE OF ProtocolIE-SingleContainer, skipping foreign item ids.
pub fn decode_ie_list<T: AperCodec>(
    dec: &mut PerDecoder<'_>,
    item_id: u16,
    size: SizeRange,
) -> per::Result<Vec<T>> {
    let count = dec.get_constrained_length(size)?;
    let mut items = Vec::with_capacity(count);
    for _ in 0..count {
        let ie = ProtocolIe::aper_decode(dec)?;
        if ie.id == item_id {
            items.push(ie.decode_value()?);
        }
    }
    Ok(items)
}

/// Conversion between a message struct and its protocol IE container
pub trait IeContainer: Sized {
    fn encode_ies(&self) -> Result<Vec<ProtocolIe>>;
    fn decode_ies(ies: &[ProtocolIe]) -> Result<Self>;
}

fn to_raw<T: IeContainer>(procedure_code: u8, criticality: Criticality, msg: &T) -> Result<RawMessage> {
    Ok(RawMessage {
        procedure_code,
        criticality,
        ies: msg.encode_ies()?,
    })
}

// ============================================================================
// Typed layer
// ============================================================================

/// E2AP-PDU ::= CHOICE { initiatingMessage, successfulOutcome, unsuccessfulOutcome, ... }
#[derive(Debug, Clone, PartialEq)]
pub enum E2apPdu {
    InitiatingMessage(InitiatingMessage),
    SuccessfulOutcome(SuccessfulOutcome),
    UnsuccessfulOutcome(UnsuccessfulOutcome),
}

/// Initiating messages
#[derive(Debug, Clone, PartialEq)]
pub enum InitiatingMessage {
    E2SetupRequest(E2SetupRequest),
    RicSubscriptionRequest(RicSubscriptionRequest),
    RicSubscriptionDeleteRequest(RicSubscriptionDeleteRequest),
    RicIndication(RicIndication),
    ResetRequest(ResetRequest),
    ErrorIndication(ErrorIndication),
    RicControlRequest(RawMessage),
    E2ConnectionUpdate(RawMessage),
    E2RemovalRequest(RawMessage),
    Other(RawMessage),
}

/// Successful outcomes
#[derive(Debug, Clone, PartialEq)]
pub enum SuccessfulOutcome {
    E2SetupResponse(E2SetupResponse),
    RicSubscriptionResponse(RicSubscriptionResponse),
    RicSubscriptionDeleteResponse(RicSubscriptionDeleteResponse),
    ResetResponse(ResetResponse),
    RicControlAcknowledge(RawMessage),
    RicServiceUpdateAcknowledge(RawMessage),
    E2NodeConfigurationUpdateAcknowledge(RawMessage),
    E2RemovalResponse(RawMessage),
    Other(RawMessage),
}

/// Unsuccessful outcomes
#[derive(Debug, Clone, PartialEq)]
pub enum UnsuccessfulOutcome {
    E2SetupFailure(E2SetupFailure),
    RicSubscriptionFailure(RicSubscriptionFailure),
    RicSubscriptionDeleteFailure(RicSubscriptionDeleteFailure),
    E2NodeConfigurationUpdateFailure(TransactionFailure),
    RicServiceUpdateFailure(TransactionFailure),
    E2RemovalFailure(TransactionFailure),
    Other(RawMessage),
}

impl InitiatingMessage {
    /// Message name for logging
    pub fn name(&self) -> &'static str {
        match self {
            InitiatingMessage::E2SetupRequest(_) => "E2SetupRequest",
            InitiatingMessage::RicSubscriptionRequest(_) => "RICsubscriptionRequest",
            InitiatingMessage::RicSubscriptionDeleteRequest(_) => "RICsubscriptionDeleteRequest",
            InitiatingMessage::RicIndication(_) => "RICindication",
            InitiatingMessage::ResetRequest(_) => "ResetRequest",
            InitiatingMessage::ErrorIndication(_) => "ErrorIndication",
            InitiatingMessage::RicControlRequest(_) => "RICcontrolRequest",
            InitiatingMessage::E2ConnectionUpdate(_) => "E2connectionUpdate",
            InitiatingMessage::E2RemovalRequest(_) => "E2RemovalRequest",
            InitiatingMessage::Other(_) => "InitiatingMessage",
        }
    }

    fn to_raw(&self) -> Result<RawMessage> {
        match self {
            InitiatingMessage::E2SetupRequest(m) => to_raw(ID_E2_SETUP, Criticality::Reject, m),
            InitiatingMessage::RicSubscriptionRequest(m) => {
                to_raw(ID_RIC_SUBSCRIPTION, Criticality::Reject, m)
            }
            InitiatingMessage::RicSubscriptionDeleteRequest(m) => {
                to_raw(ID_RIC_SUBSCRIPTION_DELETE, Criticality::Reject, m)
            }
            InitiatingMessage::RicIndication(m) => {
                to_raw(ID_RIC_INDICATION, Criticality::Ignore, m)
            }
            InitiatingMessage::ResetRequest(m) => to_raw(ID_RESET, Criticality::Reject, m),
            InitiatingMessage::ErrorIndication(m) => {
                to_raw(ID_ERROR_INDICATION, Criticality::Ignore, m)
            }
            InitiatingMessage::RicControlRequest(raw)
            | InitiatingMessage::E2ConnectionUpdate(raw)
            | InitiatingMessage::E2RemovalRequest(raw)
            | InitiatingMessage::Other(raw) => Ok(raw.clone()),
        }
    }

    fn from_raw(raw: RawMessage) -> Result<Self> {
        let ies = &raw.ies;
        Ok(match raw.procedure_code {
            ID_E2_SETUP => InitiatingMessage::E2SetupRequest(IeContainer::decode_ies(ies)?),
            ID_RIC_SUBSCRIPTION => {
                InitiatingMessage::RicSubscriptionRequest(IeContainer::decode_ies(ies)?)
            }
            ID_RIC_SUBSCRIPTION_DELETE => {
                InitiatingMessage::RicSubscriptionDeleteRequest(IeContainer::decode_ies(ies)?)
            }
            ID_RIC_INDICATION => InitiatingMessage::RicIndication(IeContainer::decode_ies(ies)?),
            ID_RESET => InitiatingMessage::ResetRequest(IeContainer::decode_ies(ies)?),
            ID_ERROR_INDICATION => {
                InitiatingMessage::ErrorIndication(IeContainer::decode_ies(ies)?)
            }
            ID_RIC_CONTROL => InitiatingMessage::RicControlRequest(raw),
            ID_E2_CONNECTION_UPDATE => InitiatingMessage::E2ConnectionUpdate(raw),
            ID_E2_REMOVAL => InitiatingMessage::E2RemovalRequest(raw),
            _ => InitiatingMessage::Other(raw),
        })
    }
}

impl SuccessfulOutcome {
    /// Message name for logging
    pub fn name(&self) -> &'static str {
        match self {
            SuccessfulOutcome::E2SetupResponse(_) => "E2SetupResponse",
            SuccessfulOutcome::RicSubscriptionResponse(_) => "RICsubscriptionResponse",
            SuccessfulOutcome::RicSubscriptionDeleteResponse(_) => "RICsubscriptionDeleteResponse",
            SuccessfulOutcome::ResetResponse(_) => "ResetResponse",
            SuccessfulOutcome::RicControlAcknowledge(_) => "RICcontrolAcknowledge",
            SuccessfulOutcome::RicServiceUpdateAcknowledge(_) => "RICserviceUpdateAcknowledge",
            SuccessfulOutcome::E2NodeConfigurationUpdateAcknowledge(_) => {
                "E2nodeConfigurationUpdateAcknowledge"
            }
            SuccessfulOutcome::E2RemovalResponse(_) => "E2RemovalResponse",
            SuccessfulOutcome::Other(_) => "SuccessfulOutcome",
        }
    }

    fn to_raw(&self) -> Result<RawMessage> {
        match self {
            SuccessfulOutcome::E2SetupResponse(m) => to_raw(ID_E2_SETUP, Criticality::Reject, m),
            SuccessfulOutcome::RicSubscriptionResponse(m) => {
                to_raw(ID_RIC_SUBSCRIPTION, Criticality::Reject, m)
            }
            SuccessfulOutcome::RicSubscriptionDeleteResponse(m) => {
                to_raw(ID_RIC_SUBSCRIPTION_DELETE, Criticality::Reject, m)
            }
            SuccessfulOutcome::ResetResponse(m) => to_raw(ID_RESET, Criticality::Reject, m),
            SuccessfulOutcome::RicControlAcknowledge(raw)
            | SuccessfulOutcome::RicServiceUpdateAcknowledge(raw)
            | SuccessfulOutcome::E2NodeConfigurationUpdateAcknowledge(raw)
            | SuccessfulOutcome::E2RemovalResponse(raw)
            | SuccessfulOutcome::Other(raw) => Ok(raw.clone()),
        }
    }

    fn from_raw(raw: RawMessage) -> Result<Self> {
        let ies = &raw.ies;
        Ok(match raw.procedure_code {
            ID_E2_SETUP => SuccessfulOutcome::E2SetupResponse(IeContainer::decode_ies(ies)?),
            ID_RIC_SUBSCRIPTION => {
                SuccessfulOutcome::RicSubscriptionResponse(IeContainer::decode_ies(ies)?)
            }
            ID_RIC_SUBSCRIPTION_DELETE => {
                SuccessfulOutcome::RicSubscriptionDeleteResponse(IeContainer::decode_ies(ies)?)
            }
            ID_RESET => SuccessfulOutcome::ResetResponse(IeContainer::decode_ies(ies)?),
            ID_RIC_CONTROL => SuccessfulOutcome::RicControlAcknowledge(raw),
            ID_RIC_SERVICE_UPDATE => SuccessfulOutcome::RicServiceUpdateAcknowledge(raw),
            ID_E2_NODE_CONFIGURATION_UPDATE => {
                SuccessfulOutcome::E2NodeConfigurationUpdateAcknowledge(raw)
            }
            ID_E2_REMOVAL => SuccessfulOutcome::E2RemovalResponse(raw),
            _ => SuccessfulOutcome::Other(raw),
        })
    }
}

impl UnsuccessfulOutcome {
    /// Message name for logging
    pub fn name(&self) -> &'static str {
        match self {
            UnsuccessfulOutcome::E2SetupFailure(_) => "E2SetupFailure",
            UnsuccessfulOutcome::RicSubscriptionFailure(_) => "RICsubscriptionFailure",
            UnsuccessfulOutcome::RicSubscriptionDeleteFailure(_) => "RICsubscriptionDeleteFailure",
            UnsuccessfulOutcome::E2NodeConfigurationUpdateFailure(_) => {
                "E2nodeConfigurationUpdateFailure"
            }
            UnsuccessfulOutcome::RicServiceUpdateFailure(_) => "RICserviceUpdateFailure",
            UnsuccessfulOutcome::E2RemovalFailure(_) => "E2RemovalFailure",
            UnsuccessfulOutcome::Other(_) => "UnsuccessfulOutcome",
        }
    }

    fn to_raw(&self) -> Result<RawMessage> {
        match self {
            UnsuccessfulOutcome::E2SetupFailure(m) => to_raw(ID_E2_SETUP, Criticality::Reject, m),
            UnsuccessfulOutcome::RicSubscriptionFailure(m) => {
                to_raw(ID_RIC_SUBSCRIPTION, Criticality::Reject, m)
            }
            UnsuccessfulOutcome::RicSubscriptionDeleteFailure(m) => {
                to_raw(ID_RIC_SUBSCRIPTION_DELETE, Criticality::Reject, m)
            }
            UnsuccessfulOutcome::E2NodeConfigurationUpdateFailure(m) => {
                to_raw(ID_E2_NODE_CONFIGURATION_UPDATE, Criticality::Reject, m)
            }
            UnsuccessfulOutcome::RicServiceUpdateFailure(m) => {
                to_raw(ID_RIC_SERVICE_UPDATE, Criticality::Reject, m)
            }
            UnsuccessfulOutcome::E2RemovalFailure(m) => {
                to_raw(ID_E2_REMOVAL, Criticality::Reject, m)
            }
            UnsuccessfulOutcome::Other(raw) => Ok(raw.clone()),
        }
    }

    fn from_raw(raw: RawMessage) -> Result<Self> {
        let ies = &raw.ies;
        Ok(match raw.procedure_code {
            ID_E2_SETUP => UnsuccessfulOutcome::E2SetupFailure(IeContainer::decode_ies(ies)?),
            ID_RIC_SUBSCRIPTION => {
                UnsuccessfulOutcome::RicSubscriptionFailure(IeContainer::decode_ies(ies)?)
            }
            ID_RIC_SUBSCRIPTION_DELETE => {
                UnsuccessfulOutcome::RicSubscriptionDeleteFailure(IeContainer::decode_ies(ies)?)
            }
            ID_E2_NODE_CONFIGURATION_UPDATE => {
                UnsuccessfulOutcome::E2NodeConfigurationUpdateFailure(IeContainer::decode_ies(ies)?)
            }
            ID_RIC_SERVICE_UPDATE => {
                UnsuccessfulOutcome::RicServiceUpdateFailure(IeContainer::decode_ies(ies)?)
            }
            ID_E2_REMOVAL => UnsuccessfulOutcome::E2RemovalFailure(IeContainer::decode_ies(ies)?),
            _ => UnsuccessfulOutcome::Other(raw),
        })
    }
}

impl E2apPdu {
    /// Message name for logging
    pub fn name(&self) -> &'static str {
        match self {
            E2apPdu::InitiatingMessage(m) => m.name(),
            E2apPdu::SuccessfulOutcome(m) => m.name(),
            E2apPdu::UnsuccessfulOutcome(m) => m.name(),
        }
    }
}

macro_rules! impl_into_pdu {
    ($($msg:ty => $outer:ident :: $inner:ident),* $(,)?) => {
        $(
            impl From<$msg> for E2apPdu {
                fn from(msg: $msg) -> Self {
                    E2apPdu::$outer($outer::$inner(msg))
                }
            }
        )*
    };
}

impl_into_pdu! {
    E2SetupRequest => InitiatingMessage::E2SetupRequest,
    RicSubscriptionRequest => InitiatingMessage::RicSubscriptionRequest,
    RicSubscriptionDeleteRequest => InitiatingMessage::RicSubscriptionDeleteRequest,
    RicIndication => InitiatingMessage::RicIndication,
    ResetRequest => InitiatingMessage::ResetRequest,
    ErrorIndication => InitiatingMessage::ErrorIndication,
    E2SetupResponse => SuccessfulOutcome::E2SetupResponse,
    RicSubscriptionResponse => SuccessfulOutcome::RicSubscriptionResponse,
    RicSubscriptionDeleteResponse => SuccessfulOutcome::RicSubscriptionDeleteResponse,
    ResetResponse => SuccessfulOutcome::ResetResponse,
    RicSubscriptionFailure => UnsuccessfulOutcome::RicSubscriptionFailure,
    RicSubscriptionDeleteFailure => UnsuccessfulOutcome::RicSubscriptionDeleteFailure,
}

// ============================================================================
// Entry points
// ============================================================================

fn encode_raw_pdu(choice: u64, raw: &RawMessage) -> Result<Vec<u8>> {
    let value = raw.encode_value()?;
    let mut enc = PerEncoder::new();
    enc.put_choice_index(choice, 3, true)?;
    enc.put_constrained(u64::from(raw.procedure_code), 0, 255)?;
    raw.criticality.aper_encode(&mut enc)?;
    enc.put_open_type(&value)?;
    Ok(enc.finish())
}

/// Encode an E2AP PDU to bytes using APER
pub fn encode_e2ap_pdu(pdu: &E2apPdu) -> Result<Vec<u8>> {
    match pdu {
        E2apPdu::InitiatingMessage(m) => encode_raw_pdu(0, &m.to_raw()?),
        E2apPdu::SuccessfulOutcome(m) => encode_raw_pdu(1, &m.to_raw()?),
        E2apPdu::UnsuccessfulOutcome(m) => encode_raw_pdu(2, &m.to_raw()?),
    }
}

/// Decode an E2AP PDU from APER bytes
pub fn decode_e2ap_pdu(bytes: &[u8]) -> Result<E2apPdu> {
    let mut dec = PerDecoder::new(bytes);
    let choice = dec.get_choice_index(3, true)?;
    let procedure_code = dec.get_constrained(0, 255)? as u8;
    let criticality = Criticality::aper_decode(&mut dec)?;
    let value = dec.get_open_type()?;

    let raw = RawMessage {
        procedure_code,
        criticality,
        ies: RawMessage::decode_value(&value)?,
    };

    Ok(match choice {
        0 => E2apPdu::InitiatingMessage(InitiatingMessage::from_raw(raw)?),
        1 => E2apPdu::SuccessfulOutcome(SuccessfulOutcome::from_raw(raw)?),
        _ => E2apPdu::UnsuccessfulOutcome(UnsuccessfulOutcome::from_raw(raw)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ies::Cause;

    #[test]
    fn test_protocol_ie_encoding() {
        let ie = ProtocolIe::build(ID_TRANSACTION_ID, Criticality::Reject, |enc| {
            enc.put_extensible_constrained(1, 0, 255)
        })
        .unwrap();
        assert_eq!(ie.value, vec![0x00, 0x01]);

        let mut enc = PerEncoder::new();
        ie.aper_encode(&mut enc).unwrap();
        assert_eq!(enc.finish(), vec![0x00, 0x31, 0x00, 0x02, 0x00, 0x01]);
    }

    #[test]
    fn test_unknown_procedure_kept_raw() {
        let raw = RawMessage {
            procedure_code: ID_RIC_SERVICE_QUERY,
            criticality: Criticality::Ignore,
            ies: vec![ProtocolIe::build(ID_TRANSACTION_ID, Criticality::Reject, |enc| {
                enc.put_extensible_constrained(7, 0, 255)
            })
            .unwrap()],
        };
        let pdu = E2apPdu::InitiatingMessage(InitiatingMessage::Other(raw.clone()));

        let bytes = encode_e2ap_pdu(&pdu).unwrap();
        let decoded = decode_e2ap_pdu(&bytes).unwrap();
        assert_eq!(decoded, pdu);
        assert_eq!(decoded.name(), "InitiatingMessage");
    }

    #[test]
    fn test_missing_mandatory_ie() {
        // Reset Request without its Cause IE
        let raw = RawMessage {
            procedure_code: ID_RESET,
            criticality: Criticality::Reject,
            ies: vec![ProtocolIe::build(ID_TRANSACTION_ID, Criticality::Reject, |enc| {
                enc.put_extensible_constrained(3, 0, 255)
            })
            .unwrap()],
        };
        let bytes =
            encode_e2ap_pdu(&E2apPdu::InitiatingMessage(InitiatingMessage::Other(raw))).unwrap();
        let result = decode_e2ap_pdu(&bytes);
        assert!(matches!(result, Err(E2apCodecError::MissingMandatoryIe("Cause"))));
    }

    #[test]
    fn test_unknown_ie_is_skipped() {
        let mut ies = ResetRequest {
            transaction_id: 3,
            cause: Cause::default(),
        }
        .encode_ies()
        .unwrap();
        ies.push(ProtocolIe {
            id: 999,
            criticality: Criticality::Ignore,
            value: vec![0xde, 0xad],
        });
        let raw = RawMessage {
            procedure_code: ID_RESET,
            criticality: Criticality::Reject,
            ies,
        };
        let bytes =
            encode_e2ap_pdu(&E2apPdu::InitiatingMessage(InitiatingMessage::Other(raw))).unwrap();
        match decode_e2ap_pdu(&bytes).unwrap() {
            E2apPdu::InitiatingMessage(InitiatingMessage::ResetRequest(req)) => {
                assert_eq!(req.transaction_id, 3);
            }
            other => panic!("Expected ResetRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_pdu() {
        assert!(decode_e2ap_pdu(&[0x00, 0x01]).is_err());
        assert!(decode_e2ap_pdu(&[]).is_err());
    }
}
