//! E2 Interface Module
//!
//! E2AP procedures of the node towards the near-RT RIC:
//! - E2 Setup with bounded retries
//! - RIC Subscription and Subscription Delete
//! - Periodic RIC Indication reporting
//! - Reset in both directions

mod ran_functions;
mod reset;
mod setup_procedure;
mod state;
mod subscription;
mod task;

pub use ran_functions::{RanFunctionDescriptor, RanFunctionTable};
pub use reset::ResetProcedure;
pub use setup_procedure::{Launch, SetupOutcome, SetupProcedure, SetupState, Verdict};
pub use state::E2ConnectionState;
pub use subscription::{AdmittedAction, RicSubscription, SubscriptionKey};
pub use task::{E2AgentError, E2AgentTask, E2AP_STREAM_ID};
