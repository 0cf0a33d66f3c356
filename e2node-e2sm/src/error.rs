//! Service model error types

use e2node_e2ap::per::PerError;
use thiserror::Error;

/// Errors raised while interpreting or producing service-model payloads
#[derive(Debug, Error)]
pub enum ServiceModelError {
    /// Payload could not be encoded or decoded
    #[error("Codec error: {0}")]
    Codec(#[from] PerError),

    /// RIC style type not implemented by the model
    #[error("Unsupported RIC style type: {0}")]
    UnsupportedStyle(i64),

    /// Measurement name not offered by the node
    #[error("Unsupported measurement: {0}")]
    UnsupportedMeasurement(String),

    /// Granularity period outside the accepted range
    #[error("Invalid granularity period: {0} ms")]
    InvalidGranularityPeriod(u32),

    /// Service-model-local action id not registered
    #[error("Unknown action: {0}")]
    UnknownAction(u32),
}
