//! E2 Reset procedure
//!
//! Only one reset transaction is tracked in each direction.

use tracing::{info, warn};

use e2node_e2ap::ies::Cause;
use e2node_e2ap::procedures::{ResetRequest, ResetResponse};

#[derive(Debug, Default)]
pub struct ResetProcedure {
    local_transaction_id: Option<u8>,
    peer_reset_id: Option<u8>,
    response_received: bool,
}

impl ResetProcedure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an agent-initiated Reset Request.
    pub fn generate_reset_request(&mut self, transaction_id: u8, cause: Cause) -> ResetRequest {
        self.local_transaction_id = Some(transaction_id);
        self.response_received = false;
        ResetRequest {
            transaction_id,
            cause,
        }
    }

    pub fn generate_reset_response(&self, transaction_id: u8) -> ResetResponse {
        ResetResponse { transaction_id }
    }

    /// Records a RIC-initiated reset and returns the transaction id to answer.
    pub fn process_reset_request(&mut self, request: &ResetRequest) -> u8 {
        info!(
            "Reset requested by RIC (transaction {}, cause {})",
            request.transaction_id, request.cause
        );
        self.peer_reset_id = Some(request.transaction_id);
        request.transaction_id
    }

    /// Records a Reset Response; returns false if it answers no outstanding request.
    pub fn process_reset_response(&mut self, response: &ResetResponse) -> bool {
        self.response_received = true;
        if self.local_transaction_id != Some(response.transaction_id) {
            warn!(
                "Reset Response transaction {} does not match outstanding request {:?}",
                response.transaction_id, self.local_transaction_id
            );
            return false;
        }
        info!("Reset completed (transaction {})", response.transaction_id);
        self.local_transaction_id = None;
        true
    }

    /// Transaction id of the last reset requested by the RIC
    pub fn peer_reset_id(&self) -> Option<u8> {
        self.peer_reset_id
    }

    pub fn response_received(&self) -> bool {
        self.response_received
    }

    /// True while an agent-initiated reset awaits its response
    pub fn is_pending(&self) -> bool {
        self.local_transaction_id.is_some()
    }
}
