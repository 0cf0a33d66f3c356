//! E2 connection state

use std::fmt;

use serde::Serialize;

/// Connection state of the agent towards the RIC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum E2ConnectionState {
    /// No association
    #[default]
    Disconnected,
    /// Connect sequence in progress
    Connecting,
    /// Association up, E2 Setup Request sent
    SetupPending,
    /// E2 Setup completed
    Established,
}

impl E2ConnectionState {
    /// Returns true while an association towards the RIC exists.
    pub fn is_connected(&self) -> bool {
        matches!(
            self,
            E2ConnectionState::SetupPending | E2ConnectionState::Established
        )
    }
}

impl fmt::Display for E2ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            E2ConnectionState::Disconnected => write!(f, "Disconnected"),
            E2ConnectionState::Connecting => write!(f, "Connecting"),
            E2ConnectionState::SetupPending => write!(f, "SetupPending"),
            E2ConnectionState::Established => write!(f, "Established"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_default_and_display() {
        let state = E2ConnectionState::default();
        assert_eq!(state, E2ConnectionState::Disconnected);
        assert_eq!(state.to_string(), "Disconnected");
        assert_eq!(E2ConnectionState::SetupPending.to_string(), "SetupPending");
    }

    #[test]
    fn test_is_connected() {
        assert!(!E2ConnectionState::Disconnected.is_connected());
        assert!(!E2ConnectionState::Connecting.is_connected());
        assert!(E2ConnectionState::SetupPending.is_connected());
        assert!(E2ConnectionState::Established.is_connected());
    }
}
