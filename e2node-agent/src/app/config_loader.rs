//! Configuration Loading for the E2 Agent
//!
//! Wraps the `E2AgentConfig` from `e2node-common` with file loading and the
//! validation the agent needs before it may connect to a RIC.
//!
//! # Example
//!
//! ```rust,ignore
//! use e2node_agent::app::load_and_validate_e2_agent_config;
//!
//! let config = load_and_validate_e2_agent_config("config/e2agent.yaml")?;
//! ```

use std::path::Path;

use e2node_common::{E2AgentConfig, Plmn};
use thiserror::Error;

/// Upper bound of RANfunctionID
const MAX_RAN_FUNCTION_ID: u16 = 4095;
/// Upper bound of gNB-CU-UP-ID and gNB-DU-ID (36 bits)
const MAX_GNB_NODE_ID: u64 = (1 << 36) - 1;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ConfigValidationError),
}

/// Errors that can occur during configuration validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// Invalid RIC endpoint
    #[error("Invalid RIC address: {0}")]
    InvalidRicAddress(String),

    /// Invalid gNB ID or gNB ID length
    #[error("Invalid gNB ID: {0}")]
    InvalidGnbId(String),

    /// Invalid gNB-CU-UP or gNB-DU ID
    #[error("Invalid node ID: {0}")]
    InvalidNodeId(String),

    /// Invalid PLMN
    #[error("Invalid PLMN: {0}")]
    InvalidPlmn(String),

    /// Invalid timer value
    #[error("Invalid timer: {0}")]
    InvalidTimer(String),

    /// Invalid RAN function ID
    #[error("Invalid RAN function ID: {0}")]
    InvalidRanFunctionId(String),
}

/// Loads an E2 agent configuration from a YAML file.
///
/// Only parsing is performed; call [`validate_e2_agent_config`] afterwards
/// or use [`load_and_validate_e2_agent_config`].
pub fn load_e2_agent_config<P: AsRef<Path>>(path: P) -> Result<E2AgentConfig, ConfigError> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    load_e2_agent_config_from_str(&contents)
}

/// Loads an E2 agent configuration from a YAML string.
pub fn load_e2_agent_config_from_str(yaml: &str) -> Result<E2AgentConfig, ConfigError> {
    let config: E2AgentConfig =
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    Ok(config)
}

/// Validates an E2 agent configuration.
///
/// # Validation Rules
///
/// - RIC port must be non-zero and the RIC address specified
/// - gNB ID length must be between 22 and 32 bits and the gNB ID fit in it
/// - gNB-CU-UP and gNB-DU IDs must fit in 36 bits
/// - PLMN MCC must be 001-999 and MNC 00-999
/// - Reconnect timer and setup timeout must be non-zero
/// - KPM RAN function ID must be at most 4095
pub fn validate_e2_agent_config(config: &E2AgentConfig) -> Result<(), ConfigValidationError> {
    if config.ric_port == 0 {
        return Err(ConfigValidationError::InvalidRicAddress(
            "RIC port 0 is not allowed".to_string(),
        ));
    }
    if config.ric_ip.is_unspecified() {
        return Err(ConfigValidationError::InvalidRicAddress(
            "ric_ip cannot be unspecified (0.0.0.0 or ::)".to_string(),
        ));
    }

    let node = &config.node;
    if !(22..=32).contains(&node.gnb_id_length) {
        return Err(ConfigValidationError::InvalidGnbId(format!(
            "gNB ID length {} must be between 22 and 32 bits",
            node.gnb_id_length
        )));
    }
    if u64::from(node.gnb_id) >= 1u64 << node.gnb_id_length {
        return Err(ConfigValidationError::InvalidGnbId(format!(
            "gNB ID {} does not fit in {} bits",
            node.gnb_id, node.gnb_id_length
        )));
    }
    for (name, id) in [("gNB-CU-UP", node.gnb_cu_up_id), ("gNB-DU", node.gnb_du_id)] {
        if let Some(id) = id.filter(|id| *id > MAX_GNB_NODE_ID) {
            return Err(ConfigValidationError::InvalidNodeId(format!(
                "{} ID {} exceeds maximum 36-bit value",
                name, id
            )));
        }
    }

    validate_plmn(&node.plmn)?;

    if config.ric_connect_timer == 0 {
        return Err(ConfigValidationError::InvalidTimer(
            "ric_connect_timer must be at least 1 second".to_string(),
        ));
    }
    if config.setup_timeout_ms == 0 {
        return Err(ConfigValidationError::InvalidTimer(
            "setup_timeout_ms must be non-zero".to_string(),
        ));
    }

    if config.kpm_ran_function_id > MAX_RAN_FUNCTION_ID {
        return Err(ConfigValidationError::InvalidRanFunctionId(format!(
            "{} exceeds maximum {}",
            config.kpm_ran_function_id, MAX_RAN_FUNCTION_ID
        )));
    }

    Ok(())
}

/// Validates a PLMN configuration.
fn validate_plmn(plmn: &Plmn) -> Result<(), ConfigValidationError> {
    if plmn.mcc == 0 || plmn.mcc > 999 {
        return Err(ConfigValidationError::InvalidPlmn(format!(
            "MCC {} must be between 001 and 999",
            plmn.mcc
        )));
    }
    if plmn.mnc > 999 {
        return Err(ConfigValidationError::InvalidPlmn(format!(
            "MNC {} must be between 00 and 999",
            plmn.mnc
        )));
    }
    Ok(())
}

/// Loads and validates an E2 agent configuration in one step.
pub fn load_and_validate_e2_agent_config<P: AsRef<Path>>(
    path: P,
) -> Result<E2AgentConfig, ConfigError> {
    let config = load_e2_agent_config(path)?;
    validate_e2_agent_config(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> E2AgentConfig {
        let mut config = E2AgentConfig::new("127.0.0.1".parse().unwrap());
        config.node.plmn = Plmn::new(1, 1, false);
        config.node.gnb_id = 411;
        config
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_e2_agent_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_validate_ric_address() {
        let mut config = valid_config();
        config.ric_port = 0;
        assert!(matches!(
            validate_e2_agent_config(&config),
            Err(ConfigValidationError::InvalidRicAddress(_))
        ));

        let mut config = valid_config();
        config.ric_ip = "0.0.0.0".parse().unwrap();
        assert!(matches!(
            validate_e2_agent_config(&config),
            Err(ConfigValidationError::InvalidRicAddress(_))
        ));
    }

    #[test]
    fn test_validate_gnb_id_length() {
        let mut config = valid_config();
        config.node.gnb_id_length = 21;
        assert!(matches!(
            validate_e2_agent_config(&config),
            Err(ConfigValidationError::InvalidGnbId(_))
        ));

        config.node.gnb_id_length = 33;
        assert!(matches!(
            validate_e2_agent_config(&config),
            Err(ConfigValidationError::InvalidGnbId(_))
        ));
    }

    #[test]
    fn test_validate_gnb_id_fits_length() {
        let mut config = valid_config();
        config.node.gnb_id_length = 22;
        config.node.gnb_id = (1 << 22) - 1;
        assert!(validate_e2_agent_config(&config).is_ok());

        config.node.gnb_id = 1 << 22;
        assert!(matches!(
            validate_e2_agent_config(&config),
            Err(ConfigValidationError::InvalidGnbId(_))
        ));

        config.node.gnb_id_length = 32;
        config.node.gnb_id = u32::MAX;
        assert!(validate_e2_agent_config(&config).is_ok());
    }

    #[test]
    fn test_validate_node_ids() {
        let mut config = valid_config();
        config.node.gnb_du_id = Some(MAX_GNB_NODE_ID);
        assert!(validate_e2_agent_config(&config).is_ok());

        config.node.gnb_cu_up_id = Some(MAX_GNB_NODE_ID + 1);
        assert!(matches!(
            validate_e2_agent_config(&config),
            Err(ConfigValidationError::InvalidNodeId(_))
        ));
    }

    #[test]
    fn test_validate_plmn() {
        let mut config = valid_config();
        config.node.plmn = Plmn::new(0, 1, false);
        assert!(matches!(
            validate_e2_agent_config(&config),
            Err(ConfigValidationError::InvalidPlmn(_))
        ));

        config.node.plmn = Plmn::new(310, 1000, true);
        assert!(matches!(
            validate_e2_agent_config(&config),
            Err(ConfigValidationError::InvalidPlmn(_))
        ));
    }

    #[test]
    fn test_validate_timers() {
        let mut config = valid_config();
        config.ric_connect_timer = 0;
        assert!(matches!(
            validate_e2_agent_config(&config),
            Err(ConfigValidationError::InvalidTimer(_))
        ));

        let mut config = valid_config();
        config.setup_timeout_ms = 0;
        assert!(matches!(
            validate_e2_agent_config(&config),
            Err(ConfigValidationError::InvalidTimer(_))
        ));
    }

    #[test]
    fn test_validate_ran_function_id() {
        let mut config = valid_config();
        config.kpm_ran_function_id = 4095;
        assert!(validate_e2_agent_config(&config).is_ok());

        config.kpm_ran_function_id = 4096;
        assert!(matches!(
            validate_e2_agent_config(&config),
            Err(ConfigValidationError::InvalidRanFunctionId(_))
        ));
    }

    #[test]
    fn test_load_config_from_str() {
        let yaml = r#"
ric_ip: 127.0.0.1
max_ric_setup_retries: 2
ric_connect_timer: 3
node:
  plmn: { mcc: 1, mnc: 1 }
  gnb_id: 411
"#;
        let config = load_e2_agent_config_from_str(yaml).unwrap();
        assert_eq!(config.max_ric_setup_retries, 2);
        assert_eq!(config.ric_connect_timer, 3);
        assert!(validate_e2_agent_config(&config).is_ok());
    }

    #[test]
    fn test_load_config_from_str_invalid_yaml() {
        let result = load_e2_agent_config_from_str("invalid: yaml: content: [");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));

        // ric_ip is mandatory
        let result = load_e2_agent_config_from_str("ric_port: 36422");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_e2_agent_config("/nonexistent/path/e2agent.yaml");
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_load_sample_config() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../config/e2agent.yaml");
        let config = load_and_validate_e2_agent_config(path).unwrap();
        assert_eq!(config.ric_port, 36422);
        assert_eq!(config.node.gnb_id, 411);
        assert_eq!(config.sctp.rto_max_ms, 6000);
        assert_eq!(config.setup_retry_limit(), None);
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::ParseError("test error".to_string());
        assert!(err.to_string().contains("test error"));

        let err: ConfigError = ConfigValidationError::InvalidTimer("x".to_string()).into();
        assert!(err.to_string().contains("Invalid timer"));
    }
}
