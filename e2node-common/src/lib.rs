//! Common types and utilities for the E2 node agent
//!
//! This crate provides shared types, configuration structures, and utilities
//! used across the E2 node crates.

pub mod bit_buffer;
pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use bit_buffer::{BitBufferError, BitReader, BitWriter};
pub use config::{E2AgentConfig, E2NodeIdentity, SctpOptions, DEFAULT_RIC_PORT};
pub use error::Error;
pub use logging::{
    format_hex_compact, init_logging, init_logging_with_filter, log_e2ap_message,
    log_protocol_message, Direction, HexDump, LogLevel,
};
pub use types::Plmn;
