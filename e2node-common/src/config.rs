//! Configuration structures for the E2 node agent
//!
//! The agent is configured from a YAML document. Only `ric_ip` is mandatory;
//! everything else has a default matching a standard near-RT RIC deployment.
//!
//! ```yaml
//! ric_ip: 127.0.0.1
//! ric_port: 36422
//! max_ric_setup_retries: 5
//! ric_connect_timer: 10
//! node:
//!   plmn: { mcc: 1, mnc: 1 }
//!   gnb_id: 411
//!   gnb_id_length: 22
//! ```

use std::net::{IpAddr, Ipv4Addr};

use serde::{Deserialize, Serialize};

use crate::types::Plmn;

/// Well-known SCTP port of the RIC E2 termination.
pub const DEFAULT_RIC_PORT: u16 = 36422;

fn default_true() -> bool {
    true
}

fn default_ric_port() -> u16 {
    DEFAULT_RIC_PORT
}

fn default_bind_ip() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_connect_timer() -> u32 {
    10
}

fn default_setup_timeout_ms() -> u64 {
    5000
}

/// E2 agent configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct E2AgentConfig {
    /// Whether the E2 agent runs at all
    #[serde(default = "default_true")]
    pub enable: bool,
    /// RIC address
    pub ric_ip: IpAddr,
    /// RIC SCTP port
    #[serde(default = "default_ric_port")]
    pub ric_port: u16,
    /// Local address to bind
    #[serde(default = "default_bind_ip")]
    pub ric_bind_ip: IpAddr,
    /// Local port to bind (0 = ephemeral)
    #[serde(default)]
    pub ric_bind_port: u16,
    /// Maximum consecutive setup attempts beyond the first; <= 0 is unlimited
    #[serde(default)]
    pub max_ric_setup_retries: i32,
    /// Reconnect backoff in seconds
    #[serde(default = "default_connect_timer")]
    pub ric_connect_timer: u32,
    /// Time to wait for E2 Setup Response in milliseconds
    #[serde(default = "default_setup_timeout_ms")]
    pub setup_timeout_ms: u64,
    /// Pins the reporting period of every subscription when set
    #[serde(default)]
    pub report_period_override_ms: Option<u32>,
    /// RAN function id the KPM service model is registered under
    #[serde(default)]
    pub kpm_ran_function_id: u16,
    /// Global E2 node identity
    #[serde(default)]
    pub node: E2NodeIdentity,
    /// SCTP association options
    #[serde(default)]
    pub sctp: SctpOptions,
}

impl E2AgentConfig {
    /// Creates a configuration pointing at `ric_ip` with all other values defaulted.
    pub fn new(ric_ip: IpAddr) -> Self {
        Self {
            enable: true,
            ric_ip,
            ric_port: DEFAULT_RIC_PORT,
            ric_bind_ip: default_bind_ip(),
            ric_bind_port: 0,
            max_ric_setup_retries: 0,
            ric_connect_timer: default_connect_timer(),
            setup_timeout_ms: default_setup_timeout_ms(),
            report_period_override_ms: None,
            kpm_ran_function_id: 0,
            node: E2NodeIdentity::default(),
            sctp: SctpOptions::default(),
        }
    }

    /// Returns the retry bound, or `None` when retries are unlimited.
    pub fn setup_retry_limit(&self) -> Option<u32> {
        u32::try_from(self.max_ric_setup_retries)
            .ok()
            .filter(|max| *max > 0)
    }
}

/// Identity advertised in the Global E2 Node ID of the E2 Setup Request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct E2NodeIdentity {
    /// PLMN of the gNB
    #[serde(default)]
    pub plmn: Plmn,
    /// gNB identifier
    #[serde(default = "default_gnb_id")]
    pub gnb_id: u32,
    /// gNB identifier length in bits (22..=32)
    #[serde(default = "default_gnb_id_length")]
    pub gnb_id_length: u8,
    /// gNB-CU-UP identifier, for a CU-UP node
    #[serde(default)]
    pub gnb_cu_up_id: Option<u64>,
    /// gNB-DU identifier, for a DU node
    #[serde(default)]
    pub gnb_du_id: Option<u64>,
    /// AMF name of the NG interface advertised as an E2 node component
    #[serde(default)]
    pub amf_name: Option<String>,
}

fn default_gnb_id() -> u32 {
    1
}

fn default_gnb_id_length() -> u8 {
    22
}

impl Default for E2NodeIdentity {
    fn default() -> Self {
        Self {
            plmn: Plmn::default(),
            gnb_id: default_gnb_id(),
            gnb_id_length: default_gnb_id_length(),
            gnb_cu_up_id: None,
            gnb_du_id: None,
            amf_name: None,
        }
    }
}

/// SCTP options applied before connecting to the RIC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SctpOptions {
    /// Number of inbound and outbound streams
    pub num_streams: u16,
    /// Initial retransmission timeout
    pub rto_initial_ms: u64,
    /// Minimum retransmission timeout
    pub rto_min_ms: u64,
    /// Maximum retransmission timeout
    pub rto_max_ms: u64,
    /// INIT retransmission attempts
    pub init_max_attempts: u16,
    /// Maximum INIT timeout in milliseconds
    pub init_max_timeout_ms: u64,
}

impl Default for SctpOptions {
    fn default() -> Self {
        Self {
            num_streams: 2,
            rto_initial_ms: 3000,
            rto_min_ms: 1000,
            rto_max_ms: 6000,
            init_max_attempts: 3,
            init_max_timeout_ms: 5000,
        }
    }
}
