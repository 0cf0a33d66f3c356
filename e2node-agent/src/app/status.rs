//! Status Reporting for the E2 Agent
//!
//! The agent task publishes an [`E2AgentStatus`] snapshot on a watch channel
//! whenever its connection state or subscription set changes.

use serde::Serialize;
use tokio::sync::watch;

use crate::e2::E2ConnectionState;

/// E2 agent operational status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct E2AgentStatus {
    /// Connection state towards the RIC
    #[serde(rename = "e2-state")]
    pub state: E2ConnectionState,
    /// Global RIC ID learned from the last E2 Setup Response
    #[serde(rename = "global-ric-id", skip_serializing_if = "Option::is_none")]
    pub global_ric_id: Option<String>,
    /// Setup attempts since the last success
    #[serde(rename = "setup-attempts")]
    pub setup_attempts: u32,
    /// Number of live RIC subscriptions
    #[serde(rename = "active-subscriptions")]
    pub active_subscriptions: usize,
}

impl E2AgentStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true once E2 Setup has completed.
    pub fn is_established(&self) -> bool {
        self.state == E2ConnectionState::Established
    }

    /// Returns the status as a YAML string.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// Receiving side of the agent status channel
pub type StatusReceiver = watch::Receiver<E2AgentStatus>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status() {
        let status = E2AgentStatus::new();
        assert_eq!(status.state, E2ConnectionState::Disconnected);
        assert!(!status.is_established());
        assert_eq!(status.active_subscriptions, 0);
    }

    #[test]
    fn test_status_to_yaml() {
        let status = E2AgentStatus {
            state: E2ConnectionState::Established,
            global_ric_id: Some("00101/0x00abc".to_string()),
            setup_attempts: 0,
            active_subscriptions: 2,
        };
        let yaml = status.to_yaml().unwrap();
        assert!(yaml.contains("e2-state: Established"));
        assert!(yaml.contains("global-ric-id: 00101/0x00abc"));
        assert!(yaml.contains("active-subscriptions: 2"));
    }

    #[test]
    fn test_status_to_yaml_skips_unknown_ric() {
        let yaml = E2AgentStatus::new().to_yaml().unwrap();
        assert!(yaml.contains("e2-state: Disconnected"));
        assert!(!yaml.contains("global-ric-id"));
    }
}
