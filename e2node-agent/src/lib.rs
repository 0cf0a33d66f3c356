//! e2node-agent - E2 Node Agent Library
#![allow(missing_docs)]
//!
//! This crate implements the E2 node side of the O-RAN E2 interface. The
//! agent connects to a near-RT RIC over SCTP and:
//!
//! - Registers the node and its RAN functions with E2 Setup
//! - Admits RIC subscriptions through the owning service model (E2SM-KPM)
//! - Reports measurements periodically with RIC Indications
//! - Handles Subscription Delete and Reset in both directions
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                  E2 node                      │
//! │  ┌──────────────┐      ┌──────────────────┐   │
//! │  │ E2AgentTask  │<────>│ RanFunctionTable │   │
//! │  │ (E2AP state) │      │  (E2SM-KPM, ..)  │   │
//! │  └──────┬───────┘      └──────────────────┘   │
//! │         │ RicTransport                        │
//! └─────────┼─────────────────────────────────────┘
//!           ▼
//!     near-RT RIC (SCTP, PPID 70)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use e2node_agent::{
//!     load_and_validate_e2_agent_config, task_channel, E2AgentTask, RanFunctionTable,
//!     SctpRicConnector, Task, DEFAULT_CHANNEL_CAPACITY,
//! };
//! use e2node_e2sm::KpmServiceModel;
//!
//! let config = load_and_validate_e2_agent_config("config/e2agent.yaml")?;
//! let mut functions = RanFunctionTable::new();
//! functions.register(config.kpm_ran_function_id, Box::new(KpmServiceModel::new()));
//!
//! let (handle, rx) = task_channel(DEFAULT_CHANNEL_CAPACITY);
//! let mut task = E2AgentTask::new(config, functions, Arc::new(SctpRicConnector), handle)?;
//! task.run(rx).await?;
//! ```

pub mod app;
pub mod e2;
pub mod tasks;
pub mod timer;
pub mod transport;

pub use app::{
    load_and_validate_e2_agent_config, load_e2_agent_config, load_e2_agent_config_from_str,
    validate_e2_agent_config, ConfigError, ConfigValidationError, E2AgentStatus, StatusReceiver,
};
pub use e2::{
    E2AgentError, E2AgentTask, E2ConnectionState, RanFunctionDescriptor, RanFunctionTable,
    RicSubscription, SubscriptionKey, E2AP_STREAM_ID,
};
pub use tasks::{
    task_channel, E2AgentMessage, Task, TaskHandle, TaskMessage, TimerId,
    DEFAULT_CHANNEL_CAPACITY, DEFAULT_SHUTDOWN_TIMEOUT_MS,
};
pub use timer::TaskTimer;
pub use transport::{
    RicConnectParams, RicConnector, RicTransport, SctpRicConnector, SctpRicTransport,
    TransportError, TransportEvent,
};
