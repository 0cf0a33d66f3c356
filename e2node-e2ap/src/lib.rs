//! E2AP (E2 Application Protocol) library
//!
//! Implements aligned-PER encoding/decoding for the E2AP messages exchanged
//! between an E2 node and the near-RT RIC.
//!
//! # Modules
//!
//! - `per` - Aligned PER primitives
//! - `ies` - Typed information elements
//! - `ids` - Procedure codes and protocol IE identifiers
//! - `codec` - E2AP PDU encoding/decoding
//! - `procedures` - Procedure message types

pub mod codec;
pub mod ids;
pub mod ies;
pub mod per;
pub mod procedures;

pub use codec::{
    decode_e2ap_pdu, encode_e2ap_pdu, E2apCodecError, E2apPdu, IeContainer, InitiatingMessage,
    ProtocolIe, RawMessage, SuccessfulOutcome, UnsuccessfulOutcome,
};
pub use ies::AperCodec;
