//! E2AP information elements
//!
//! Typed representations of the IEs carried by the messages this crate
//! handles, each with its aligned-PER encoding.

use std::fmt;

use e2node_common::Plmn;
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::per::{PerDecoder, PerEncoder, PerError, Result, SizeRange};

/// Aligned-PER encoding of a type.
pub trait AperCodec: Sized {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()>;
    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self>;
}

/// Largest gNB-CU-UP / gNB-DU / gNB-CU-CP identifier (2^36 - 1)
pub const MAX_GNB_NODE_ID: u64 = (1 << 36) - 1;

macro_rules! decode_enum {
    ($ty:ty, $value:expr) => {{
        let value: u64 = $value;
        <$ty>::try_from(value as u8).map_err(|_| PerError::InvalidChoice {
            type_name: stringify!($ty),
            index: value,
        })
    }};
}

/// Criticality ::= ENUMERATED { reject, ignore, notify }
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum Criticality {
    #[default]
    Reject = 0,
    Ignore = 1,
    Notify = 2,
}

impl AperCodec for Criticality {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        enc.put_enumerated(u8::from(*self) as u64, 3, false)
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        let value = dec.get_enumerated(3, false)?;
        decode_enum!(Criticality, value)
    }
}

// ============================================================================
// Cause
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum CauseRicRequest {
    RanFunctionIdInvalid = 0,
    ActionNotSupported,
    ExcessiveActions,
    DuplicateAction,
    DuplicateEventTrigger,
    FunctionResourceLimit,
    RequestIdUnknown,
    InconsistentActionSubsequentActionSequence,
    ControlMessageInvalid,
    RicCallProcessIdInvalid,
    ControlTimerExpired,
    ControlFailedToExecute,
    SystemNotReady,
    Unspecified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum CauseRicService {
    RanFunctionNotSupported = 0,
    ExcessiveFunctions,
    RicResourceLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum CauseE2Node {
    E2NodeComponentUnknown = 0,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum CauseTransport {
    Unspecified = 0,
    TransportResourceUnavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum CauseProtocol {
    TransferSyntaxError = 0,
    AbstractSyntaxErrorReject,
    AbstractSyntaxErrorIgnoreAndNotify,
    MessageNotCompatibleWithReceiverState,
    SemanticError,
    AbstractSyntaxErrorFalselyConstructedMessage,
    Unspecified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum CauseMisc {
    ControlProcessingOverload = 0,
    HardwareFailure,
    OmIntervention,
    Unspecified,
}

/// Cause ::= CHOICE { ricRequest, ricService, e2Node, transport, protocol, misc, ... }
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cause {
    RicRequest(CauseRicRequest),
    RicService(CauseRicService),
    E2Node(CauseE2Node),
    Transport(CauseTransport),
    Protocol(CauseProtocol),
    Misc(CauseMisc),
}

impl Default for Cause {
    fn default() -> Self {
        Cause::Misc(CauseMisc::Unspecified)
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cause::RicRequest(c) => write!(f, "ricRequest/{:?}", c),
            Cause::RicService(c) => write!(f, "ricService/{:?}", c),
            Cause::E2Node(c) => write!(f, "e2Node/{:?}", c),
            Cause::Transport(c) => write!(f, "transport/{:?}", c),
            Cause::Protocol(c) => write!(f, "protocol/{:?}", c),
            Cause::Misc(c) => write!(f, "misc/{:?}", c),
        }
    }
}

impl AperCodec for Cause {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        let (index, value, count) = match self {
            Cause::RicRequest(c) => (0, u8::from(*c), 14),
            Cause::RicService(c) => (1, u8::from(*c), 3),
            Cause::E2Node(c) => (2, u8::from(*c), 1),
            Cause::Transport(c) => (3, u8::from(*c), 2),
            Cause::Protocol(c) => (4, u8::from(*c), 7),
            Cause::Misc(c) => (5, u8::from(*c), 4),
        };
        enc.put_choice_index(index, 6, true)?;
        enc.put_enumerated(u64::from(value), count, true)
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        let cause = match dec.get_choice_index(6, true)? {
            0 => Cause::RicRequest(decode_enum!(CauseRicRequest, dec.get_enumerated(14, true)?)?),
            1 => Cause::RicService(decode_enum!(CauseRicService, dec.get_enumerated(3, true)?)?),
            2 => Cause::E2Node(decode_enum!(CauseE2Node, dec.get_enumerated(1, true)?)?),
            3 => Cause::Transport(decode_enum!(CauseTransport, dec.get_enumerated(2, true)?)?),
            4 => Cause::Protocol(decode_enum!(CauseProtocol, dec.get_enumerated(7, true)?)?),
            5 => Cause::Misc(decode_enum!(CauseMisc, dec.get_enumerated(4, true)?)?),
            index => {
                return Err(PerError::InvalidChoice {
                    type_name: "Cause",
                    index,
                })
            }
        };
        Ok(cause)
    }
}

// ============================================================================
// TimeToWait
// ============================================================================

/// TimeToWait ::= ENUMERATED { v1s, v2s, v5s, v10s, v20s, v60s, ... }
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum TimeToWait {
    V1s = 0,
    V2s,
    V5s,
    V10s,
    V20s,
    V60s,
}

impl TimeToWait {
    /// Wait time in seconds
    pub fn as_secs(&self) -> u64 {
        match self {
            TimeToWait::V1s => 1,
            TimeToWait::V2s => 2,
            TimeToWait::V5s => 5,
            TimeToWait::V10s => 10,
            TimeToWait::V20s => 20,
            TimeToWait::V60s => 60,
        }
    }
}

impl AperCodec for TimeToWait {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        enc.put_enumerated(u64::from(u8::from(*self)), 6, true)
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        let value = dec.get_enumerated(6, true)?;
        decode_enum!(TimeToWait, value)
    }
}

// ============================================================================
// Identifiers
// ============================================================================

/// RICrequestID ::= SEQUENCE { ricRequestorID (0..65535), ricInstanceID (0..65535), ... }
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RicRequestId {
    pub requestor_id: u16,
    pub instance_id: u16,
}

impl RicRequestId {
    pub const fn new(requestor_id: u16, instance_id: u16) -> Self {
        Self {
            requestor_id,
            instance_id,
        }
    }
}

impl fmt::Display for RicRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.requestor_id, self.instance_id)
    }
}

impl AperCodec for RicRequestId {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        enc.put_sequence_preamble(true, &[]);
        enc.put_constrained(u64::from(self.requestor_id), 0, 65535)?;
        enc.put_constrained(u64::from(self.instance_id), 0, 65535)
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        dec.get_sequence_preamble(true, 0)?;
        Ok(Self {
            requestor_id: dec.get_constrained(0, 65535)? as u16,
            instance_id: dec.get_constrained(0, 65535)? as u16,
        })
    }
}

impl AperCodec for Plmn {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        enc.put_fixed_octets(&self.encode());
        Ok(())
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        let bytes = dec.get_fixed_octets(3)?;
        Ok(Plmn::decode([bytes[0], bytes[1], bytes[2]]))
    }
}

/// gNB identifier bit string (22..32 bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GnbId {
    pub value: u32,
    pub length: u8,
}

const GNB_ID_SIZE: SizeRange = SizeRange::new(22, 32);

/// GlobalE2node-gNB-ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalE2NodeGnbId {
    pub plmn: Plmn,
    pub gnb_id: GnbId,
    pub gnb_cu_up_id: Option<u64>,
    pub gnb_du_id: Option<u64>,
}

/// GlobalE2node-ID ::= CHOICE { gNB, en-gNB, ng-eNB, eNB, ... }
///
/// Only the gNB alternative is supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobalE2NodeId {
    Gnb(GlobalE2NodeGnbId),
}

impl AperCodec for GlobalE2NodeId {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        let GlobalE2NodeId::Gnb(gnb) = self;
        enc.put_choice_index(0, 4, true)?;

        // GlobalE2node-gNB-ID: global-en-gNB-ID, gNB-CU-UP-ID, gNB-DU-ID optional
        enc.put_sequence_preamble(
            true,
            &[false, gnb.gnb_cu_up_id.is_some(), gnb.gnb_du_id.is_some()],
        );
        // GlobalgNB-ID
        enc.put_sequence_preamble(true, &[]);
        gnb.plmn.aper_encode(enc)?;
        enc.put_choice_index(0, 1, true)?;
        enc.put_bit_string(
            u64::from(gnb.gnb_id.value),
            usize::from(gnb.gnb_id.length),
            GNB_ID_SIZE,
        )?;
        if let Some(id) = gnb.gnb_cu_up_id {
            enc.put_constrained(id, 0, MAX_GNB_NODE_ID)?;
        }
        if let Some(id) = gnb.gnb_du_id {
            enc.put_constrained(id, 0, MAX_GNB_NODE_ID)?;
        }
        Ok(())
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        let index = dec.get_choice_index(4, true)?;
        if index != 0 {
            return Err(PerError::InvalidChoice {
                type_name: "GlobalE2node-ID",
                index,
            });
        }

        let present = dec.get_sequence_preamble(true, 3)?;
        dec.get_sequence_preamble(true, 0)?;
        let plmn = Plmn::aper_decode(dec)?;
        dec.get_choice_index(1, true)?;
        let (value, length) = dec.get_bit_string(GNB_ID_SIZE)?;
        if present[0] {
            return Err(PerError::Unsupported("global-en-gNB-ID"));
        }
        let gnb_cu_up_id = if present[1] {
            Some(dec.get_constrained(0, MAX_GNB_NODE_ID)?)
        } else {
            None
        };
        let gnb_du_id = if present[2] {
            Some(dec.get_constrained(0, MAX_GNB_NODE_ID)?)
        } else {
            None
        };

        Ok(GlobalE2NodeId::Gnb(GlobalE2NodeGnbId {
            plmn,
            gnb_id: GnbId {
                value: value as u32,
                length: length as u8,
            },
            gnb_cu_up_id,
            gnb_du_id,
        }))
    }
}

/// GlobalRIC-ID ::= SEQUENCE { pLMN-Identity, ric-ID BIT STRING (SIZE(20)), ... }
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalRicId {
    pub plmn: Plmn,
    pub ric_id: u32,
}

impl fmt::Display for GlobalRicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:#07x}", self.plmn, self.ric_id)
    }
}

impl AperCodec for GlobalRicId {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        if self.ric_id >= 1 << 20 {
            return Err(PerError::ValueOutOfRange {
                value: u64::from(self.ric_id),
                lb: 0,
                ub: (1 << 20) - 1,
            });
        }
        enc.put_sequence_preamble(true, &[]);
        self.plmn.aper_encode(enc)?;
        enc.put_fixed_bit_string(u64::from(self.ric_id), 20);
        Ok(())
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        dec.get_sequence_preamble(true, 0)?;
        let plmn = Plmn::aper_decode(dec)?;
        let ric_id = dec.get_fixed_bit_string(20)? as u32;
        Ok(Self { plmn, ric_id })
    }
}

// ============================================================================
// RAN functions
// ============================================================================

const RAN_FUNCTION_OID_SIZE: SizeRange = SizeRange::extensible(1, 1000);

/// RANfunction-Item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RanFunctionItem {
    pub ran_function_id: u16,
    pub definition: Vec<u8>,
    pub revision: u16,
    pub oid: String,
}

impl AperCodec for RanFunctionItem {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        enc.put_sequence_preamble(true, &[]);
        enc.put_constrained(u64::from(self.ran_function_id), 0, 4095)?;
        enc.put_octet_string(&self.definition)?;
        enc.put_constrained(u64::from(self.revision), 0, 4095)?;
        enc.put_printable_string(&self.oid, RAN_FUNCTION_OID_SIZE)
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        dec.get_sequence_preamble(true, 0)?;
        Ok(Self {
            ran_function_id: dec.get_constrained(0, 4095)? as u16,
            definition: dec.get_octet_string()?,
            revision: dec.get_constrained(0, 4095)? as u16,
            oid: dec.get_printable_string(RAN_FUNCTION_OID_SIZE)?,
        })
    }
}

/// RANfunctionID-Item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RanFunctionIdItem {
    pub ran_function_id: u16,
    pub revision: u16,
}

impl AperCodec for RanFunctionIdItem {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        enc.put_sequence_preamble(true, &[]);
        enc.put_constrained(u64::from(self.ran_function_id), 0, 4095)?;
        enc.put_constrained(u64::from(self.revision), 0, 4095)
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        dec.get_sequence_preamble(true, 0)?;
        Ok(Self {
            ran_function_id: dec.get_constrained(0, 4095)? as u16,
            revision: dec.get_constrained(0, 4095)? as u16,
        })
    }
}

/// RANfunctionIDcause-Item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RanFunctionIdCauseItem {
    pub ran_function_id: u16,
    pub cause: Cause,
}

impl AperCodec for RanFunctionIdCauseItem {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        enc.put_sequence_preamble(true, &[]);
        enc.put_constrained(u64::from(self.ran_function_id), 0, 4095)?;
        self.cause.aper_encode(enc)
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        dec.get_sequence_preamble(true, 0)?;
        Ok(Self {
            ran_function_id: dec.get_constrained(0, 4095)? as u16,
            cause: Cause::aper_decode(dec)?,
        })
    }
}

// ============================================================================
// RIC actions
// ============================================================================

/// RICactionType ::= ENUMERATED { report, insert, policy, ... }
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum RicActionType {
    Report = 0,
    Insert,
    Policy,
}

impl AperCodec for RicActionType {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        enc.put_enumerated(u64::from(u8::from(*self)), 3, true)
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        let value = dec.get_enumerated(3, true)?;
        decode_enum!(RicActionType, value)
    }
}

/// RICindicationType ::= ENUMERATED { report, insert, ... }
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum RicIndicationType {
    Report = 0,
    Insert,
}

impl AperCodec for RicIndicationType {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        enc.put_enumerated(u64::from(u8::from(*self)), 2, true)
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        let value = dec.get_enumerated(2, true)?;
        decode_enum!(RicIndicationType, value)
    }
}

/// RICsubsequentActionType ::= ENUMERATED { continue, wait, ... }
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum RicSubsequentActionType {
    Continue = 0,
    Wait,
}

/// RICtimeToWait ::= ENUMERATED { w1ms .. w60s, ... }
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum RicTimeToWait {
    W1ms = 0,
    W2ms,
    W5ms,
    W10ms,
    W20ms,
    W30ms,
    W40ms,
    W50ms,
    W100ms,
    W200ms,
    W500ms,
    W1s,
    W2s,
    W5s,
    W10s,
    W20s,
    W60s,
}

/// RICsubsequentAction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RicSubsequentAction {
    pub action_type: RicSubsequentActionType,
    pub time_to_wait: RicTimeToWait,
}

impl AperCodec for RicSubsequentAction {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        enc.put_sequence_preamble(true, &[]);
        enc.put_enumerated(u64::from(u8::from(self.action_type)), 2, true)?;
        enc.put_enumerated(u64::from(u8::from(self.time_to_wait)), 17, true)
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        dec.get_sequence_preamble(true, 0)?;
        let action_type = dec.get_enumerated(2, true)?;
        let time_to_wait = dec.get_enumerated(17, true)?;
        Ok(Self {
            action_type: decode_enum!(RicSubsequentActionType, action_type)?,
            time_to_wait: decode_enum!(RicTimeToWait, time_to_wait)?,
        })
    }
}

/// RICaction-ToBeSetup-Item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RicActionToBeSetupItem {
    pub action_id: u8,
    pub action_type: RicActionType,
    pub definition: Vec<u8>,
    pub subsequent_action: Option<RicSubsequentAction>,
}

impl AperCodec for RicActionToBeSetupItem {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        enc.put_sequence_preamble(true, &[self.subsequent_action.is_some()]);
        enc.put_constrained(u64::from(self.action_id), 0, 255)?;
        self.action_type.aper_encode(enc)?;
        enc.put_octet_string(&self.definition)?;
        if let Some(subsequent) = &self.subsequent_action {
            subsequent.aper_encode(enc)?;
        }
        Ok(())
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        let present = dec.get_sequence_preamble(true, 1)?;
        let action_id = dec.get_constrained(0, 255)? as u8;
        let action_type = RicActionType::aper_decode(dec)?;
        let definition = dec.get_octet_string()?;
        let subsequent_action = if present[0] {
            Some(RicSubsequentAction::aper_decode(dec)?)
        } else {
            None
        };
        Ok(Self {
            action_id,
            action_type,
            definition,
            subsequent_action,
        })
    }
}

/// RICaction-Admitted-Item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RicActionAdmittedItem {
    pub action_id: u8,
}

impl AperCodec for RicActionAdmittedItem {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        enc.put_sequence_preamble(true, &[]);
        enc.put_constrained(u64::from(self.action_id), 0, 255)
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        dec.get_sequence_preamble(true, 0)?;
        Ok(Self {
            action_id: dec.get_constrained(0, 255)? as u8,
        })
    }
}

/// RICaction-NotAdmitted-Item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RicActionNotAdmittedItem {
    pub action_id: u8,
    pub cause: Cause,
}

impl AperCodec for RicActionNotAdmittedItem {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        enc.put_sequence_preamble(true, &[]);
        enc.put_constrained(u64::from(self.action_id), 0, 255)?;
        self.cause.aper_encode(enc)
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        dec.get_sequence_preamble(true, 0)?;
        Ok(Self {
            action_id: dec.get_constrained(0, 255)? as u8,
            cause: Cause::aper_decode(dec)?,
        })
    }
}

// ============================================================================
// E2 node component configuration
// ============================================================================

/// E2nodeComponentInterfaceType ::= ENUMERATED { ng, xn, e1, f1, w1, s1, x2, ... }
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum E2NodeComponentInterfaceType {
    Ng = 0,
    Xn,
    E1,
    F1,
    W1,
    S1,
    X2,
}

impl AperCodec for E2NodeComponentInterfaceType {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        enc.put_enumerated(u64::from(u8::from(*self)), 7, true)
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        let value = dec.get_enumerated(7, true)?;
        decode_enum!(E2NodeComponentInterfaceType, value)
    }
}

const AMF_NAME_SIZE: SizeRange = SizeRange::extensible(1, 150);

/// E2nodeComponentID; the NG, E1 and F1 alternatives are supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum E2NodeComponentId {
    Ng { amf_name: String },
    E1 { gnb_cu_cp_id: u64 },
    F1 { gnb_du_id: u64 },
}

impl E2NodeComponentId {
    pub fn interface_type(&self) -> E2NodeComponentInterfaceType {
        match self {
            E2NodeComponentId::Ng { .. } => E2NodeComponentInterfaceType::Ng,
            E2NodeComponentId::E1 { .. } => E2NodeComponentInterfaceType::E1,
            E2NodeComponentId::F1 { .. } => E2NodeComponentInterfaceType::F1,
        }
    }
}

impl AperCodec for E2NodeComponentId {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        enc.put_choice_index(u64::from(u8::from(self.interface_type())), 7, true)?;
        enc.put_sequence_preamble(true, &[]);
        match self {
            E2NodeComponentId::Ng { amf_name } => {
                enc.put_printable_string(amf_name, AMF_NAME_SIZE)
            }
            E2NodeComponentId::E1 { gnb_cu_cp_id } => {
                enc.put_constrained(*gnb_cu_cp_id, 0, MAX_GNB_NODE_ID)
            }
            E2NodeComponentId::F1 { gnb_du_id } => {
                enc.put_constrained(*gnb_du_id, 0, MAX_GNB_NODE_ID)
            }
        }
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        let index = dec.get_choice_index(7, true)?;
        let interface = decode_enum!(E2NodeComponentInterfaceType, index)?;
        dec.get_sequence_preamble(true, 0)?;
        match interface {
            E2NodeComponentInterfaceType::Ng => Ok(E2NodeComponentId::Ng {
                amf_name: dec.get_printable_string(AMF_NAME_SIZE)?,
            }),
            E2NodeComponentInterfaceType::E1 => Ok(E2NodeComponentId::E1 {
                gnb_cu_cp_id: dec.get_constrained(0, MAX_GNB_NODE_ID)?,
            }),
            E2NodeComponentInterfaceType::F1 => Ok(E2NodeComponentId::F1 {
                gnb_du_id: dec.get_constrained(0, MAX_GNB_NODE_ID)?,
            }),
            _ => Err(PerError::InvalidChoice {
                type_name: "E2nodeComponentID",
                index,
            }),
        }
    }
}

/// E2nodeComponentConfigAddition-Item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct E2NodeComponentConfigAdditionItem {
    pub interface_type: E2NodeComponentInterfaceType,
    pub component_id: E2NodeComponentId,
    pub request_part: Vec<u8>,
    pub response_part: Vec<u8>,
}

impl AperCodec for E2NodeComponentConfigAdditionItem {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        enc.put_sequence_preamble(true, &[]);
        self.interface_type.aper_encode(enc)?;
        self.component_id.aper_encode(enc)?;
        // E2nodeComponentConfiguration
        enc.put_sequence_preamble(true, &[]);
        enc.put_octet_string(&self.request_part)?;
        enc.put_octet_string(&self.response_part)
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        dec.get_sequence_preamble(true, 0)?;
        let interface_type = E2NodeComponentInterfaceType::aper_decode(dec)?;
        let component_id = E2NodeComponentId::aper_decode(dec)?;
        dec.get_sequence_preamble(true, 0)?;
        Ok(Self {
            interface_type,
            component_id,
            request_part: dec.get_octet_string()?,
            response_part: dec.get_octet_string()?,
        })
    }
}

/// Outcome carried by E2nodeComponentConfigurationAck
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum ComponentUpdateOutcome {
    Success = 0,
    Failure,
}

/// E2nodeComponentConfigAdditionAck-Item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct E2NodeComponentConfigAdditionAckItem {
    pub interface_type: E2NodeComponentInterfaceType,
    pub component_id: E2NodeComponentId,
    pub outcome: ComponentUpdateOutcome,
    pub failure_cause: Option<Cause>,
}

impl AperCodec for E2NodeComponentConfigAdditionAckItem {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        enc.put_sequence_preamble(true, &[]);
        self.interface_type.aper_encode(enc)?;
        self.component_id.aper_encode(enc)?;
        // E2nodeComponentConfigurationAck
        enc.put_sequence_preamble(true, &[self.failure_cause.is_some()]);
        enc.put_enumerated(u64::from(u8::from(self.outcome)), 2, true)?;
        if let Some(cause) = &self.failure_cause {
            cause.aper_encode(enc)?;
        }
        Ok(())
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        dec.get_sequence_preamble(true, 0)?;
        let interface_type = E2NodeComponentInterfaceType::aper_decode(dec)?;
        let component_id = E2NodeComponentId::aper_decode(dec)?;
        let present = dec.get_sequence_preamble(true, 1)?;
        let outcome = dec.get_enumerated(2, true)?;
        let failure_cause = if present[0] {
            Some(Cause::aper_decode(dec)?)
        } else {
            None
        };
        Ok(Self {
            interface_type,
            component_id,
            outcome: decode_enum!(ComponentUpdateOutcome, outcome)?,
            failure_cause,
        })
    }
}
