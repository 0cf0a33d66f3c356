//! E2 Agent Application Module
//!
//! Configuration loading and validation, plus the status snapshot the agent
//! task publishes to the application.

mod config_loader;
mod status;

pub use config_loader::{
    load_and_validate_e2_agent_config, load_e2_agent_config, load_e2_agent_config_from_str,
    validate_e2_agent_config, ConfigError, ConfigValidationError,
};

pub use status::{E2AgentStatus, StatusReceiver};
