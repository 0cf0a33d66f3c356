//! Integration test framework for the E2 node agent
#![allow(missing_docs)]
//!
//! This crate runs the agent against an in-memory near-RT RIC and checks the
//! E2AP exchanges end to end.
//!
//! # Components
//!
//! - [`mock_ric`] - Mock RIC answering E2 Setup and Reset, recording PDUs
//! - [`test_fixtures`] - Agent harness and request builders
//! - [`test_utils`] - Utility functions for test setup and assertions
//!
//! # Test Categories
//!
//! 1. **E2 Setup Tests** - Setup success, failure backoff, retry exhaustion
//! 2. **Subscription Tests** - Admission, periodic indications, delete
//! 3. **Reset Tests** - RIC- and node-initiated reset
//! 4. **Association Tests** - SCTP notifications and reconnect

pub mod mock_ric;
pub mod test_fixtures;
pub mod test_utils;

#[cfg(test)]
mod e2_setup_tests;
#[cfg(test)]
mod subscription_tests;

pub use mock_ric::{MockRic, MockRicConfig, MockRicError, MockRicEvent, SetupBehavior};
pub use test_fixtures::{
    kpm_action, subscription_delete_request, subscription_request, test_agent_config,
    AgentHarness, TEST_GNB_ID, TEST_KPM_RAN_FUNCTION_ID,
};
pub use test_utils::{
    init_test_logging, wait_for_condition, TestResult, DEFAULT_POLL_INTERVAL,
    DEFAULT_TEST_TIMEOUT,
};
