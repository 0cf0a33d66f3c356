//! Service model abstraction
//!
//! A service model interprets the opaque event-trigger and action-definition
//! octets of a RIC subscription and produces the header/message payloads of
//! RIC Indications for its RAN function.

use e2node_e2ap::ies::RicActionToBeSetupItem;

use crate::error::ServiceModelError;

/// Interpreted event trigger of a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTrigger {
    /// Report every `period_ms` milliseconds
    PeriodicReport { period_ms: u32 },
}

impl EventTrigger {
    /// Reporting period in milliseconds (0 = no periodic reporting)
    pub fn report_period_ms(&self) -> u32 {
        match self {
            EventTrigger::PeriodicReport { period_ms } => *period_ms,
        }
    }
}

/// Payloads of one RIC Indication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicationContent {
    pub header: Vec<u8>,
    pub message: Vec<u8>,
}

/// A pluggable E2 service model
pub trait ServiceModel: Send {
    /// RAN function short name
    fn short_name(&self) -> &str;

    /// Service model OID advertised in the E2 Setup Request
    fn oid(&self) -> &str;

    /// Human-readable function description
    fn description(&self) -> &str;

    /// RAN function revision
    fn revision(&self) -> u16;

    /// Encodes the RAN function definition advertised at setup
    ///
    /// # Errors
    /// Returns `ServiceModelError` if the definition cannot be encoded
    fn generate_ran_function_description(&self) -> Result<Vec<u8>, ServiceModelError>;

    /// Interprets the event trigger definition of a subscription request
    ///
    /// # Errors
    /// Returns `ServiceModelError` if the trigger is malformed or unsupported
    fn process_event_trigger_definition(
        &self,
        definition: &[u8],
    ) -> Result<EventTrigger, ServiceModelError>;

    /// Admits an action and returns its service-model-local id
    ///
    /// # Errors
    /// Returns `ServiceModelError` if the action is not admitted
    fn process_action_definition(
        &mut self,
        action: &RicActionToBeSetupItem,
    ) -> Result<u32, ServiceModelError>;

    /// Releases an admitted action; returns false if the id is unknown
    fn remove_action_definition(&mut self, local_action_id: u32) -> bool;

    /// Produces the indication header and message for an admitted action
    ///
    /// # Errors
    /// Returns `ServiceModelError` if the action is unknown or encoding fails
    fn generate_indication_content(
        &mut self,
        local_action_id: u32,
    ) -> Result<IndicationContent, ServiceModelError>;
}
