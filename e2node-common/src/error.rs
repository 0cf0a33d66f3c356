//! Error types for the E2 node agent

use thiserror::Error;

/// Error types shared by the E2 node crates.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Protocol-related errors.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Network I/O errors.
    #[error("Network error: {0}")]
    Network(#[from] std::io::Error),

    /// APER encoding errors.
    #[error("APER encoding error: {0}")]
    AperEncode(String),

    /// APER decoding errors.
    #[error("APER decoding error: {0}")]
    AperDecode(String),

    /// State machine errors.
    #[error("State machine error: {0}")]
    StateMachine(String),

    /// YAML parsing errors.
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Config("missing ric_ip".into());
        assert_eq!(err.to_string(), "Configuration error: missing ric_ip");

        let err = Error::AperDecode("buffer overrun".into());
        assert!(err.to_string().contains("APER decoding"));
    }

    #[test]
    fn test_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err: Error = io.into();
        assert!(matches!(err, Error::Network(_)));
    }
}
