//! SCTP transport layer for the E2 node agent
//!
//! This crate provides the SCTP association between an E2 node and the
//! near-RT RIC, wrapping the `sctp-proto` crate with an async tokio-based
//! interface.
//!
//! # Overview
//!
//! E2AP runs over SCTP with payload protocol identifier 70 (O-RAN.WG3.E2GAP).
//! `sctp-proto` follows the Sans-IO pattern, so the actual network I/O is
//! performed over a tokio UDP socket (SCTP-over-UDP).
//!
//! The association is driven by its owner: [`SctpAssociation::poll`] drains
//! pending datagrams without blocking and returns the next [`SctpEvent`], which
//! is either received data or a peer-status [`SctpNotification`].
//!
//! # Example
//!
//! ```rust,no_run
//! use e2node_sctp::{SctpAssociation, SctpConfig, SctpEvent};
//! use std::net::SocketAddr;
//!
//! async fn connect_to_ric() -> Result<(), Box<dyn std::error::Error>> {
//!     let ric_addr: SocketAddr = "192.168.1.1:36422".parse()?;
//!     let mut assoc = SctpAssociation::connect(ric_addr, SctpConfig::default()).await?;
//!
//!     assoc.send(0, b"E2AP message").await?;
//!
//!     if let Some(SctpEvent::DataReceived(msg)) = assoc.poll().await? {
//!         println!("Received on stream {}: {:?}", msg.stream_id, msg.data);
//!     }
//!
//!     assoc.shutdown().await?;
//!     Ok(())
//! }
//! ```

pub mod association;

pub use association::{
    AssociationState, ReceivedMessage, SctpAssociation, SctpConfig, SctpError, SctpEvent,
    SctpNotification, DEFAULT_MAX_MESSAGE_SIZE, DEFAULT_NUM_STREAMS, DEFAULT_RECEIVE_BUFFER_SIZE,
    E2AP_PPID,
};
