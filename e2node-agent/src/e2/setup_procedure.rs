//! E2 Setup procedure
//!
//! Tracks one connect-then-setup attempt at a time and the number of
//! consecutive failed attempts. The agent task drives it:
//!
//! 1. [`SetupProcedure::launch`] when the connection must be (re)established
//! 2. [`SetupProcedure::on_setup_sent`] once the transport is up and the
//!    E2 Setup Request went out
//! 3. [`SetupProcedure::finish`] on response, failure, timeout or any error,
//!    which yields the [`Verdict`] the agent acts on

use std::fmt;
use std::time::Duration;

use e2node_e2ap::ies::TimeToWait;
use tracing::debug;

/// Sub-state of the setup procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SetupState {
    #[default]
    Idle,
    /// Background connect in flight
    AwaitingConnect,
    /// E2 Setup Request sent
    AwaitingSetupResponse,
}

impl fmt::Display for SetupState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupState::Idle => write!(f, "Idle"),
            SetupState::AwaitingConnect => write!(f, "AwaitingConnect"),
            SetupState::AwaitingSetupResponse => write!(f, "AwaitingSetupResponse"),
        }
    }
}

/// Result of one attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupOutcome {
    Success,
    Error,
}

/// What the agent must do after [`SetupProcedure::launch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Launch {
    /// An attempt is already in progress
    Refused,
    /// The attempt completed immediately; pass the outcome to `finish`
    Finished(SetupOutcome),
    /// Spawn the background connect
    Connect,
}

/// What the agent must do after [`SetupProcedure::finish`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// E2 Setup completed
    Established,
    /// Close the transport and reconnect after `delay`
    Retry { delay: Duration },
    /// Retry budget exhausted; the agent must terminate
    RetriesExhausted { attempts: u32 },
}

/// Setup procedure state
#[derive(Debug)]
pub struct SetupProcedure {
    state: SetupState,
    attempts: u32,
    retry_limit: Option<u32>,
    reconnect_interval: Duration,
    transaction_id: Option<u8>,
    time_to_wait: Option<Duration>,
}

impl SetupProcedure {
    /// `retry_limit` of `None` retries forever.
    pub fn new(retry_limit: Option<u32>, reconnect_interval: Duration) -> Self {
        Self {
            state: SetupState::Idle,
            attempts: 0,
            retry_limit,
            reconnect_interval,
            transaction_id: None,
            time_to_wait: None,
        }
    }

    pub fn state(&self) -> SetupState {
        self.state
    }

    /// True while an attempt is in progress
    pub fn is_busy(&self) -> bool {
        self.state != SetupState::Idle
    }

    /// Consecutive attempts since the last success
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Starts an attempt.
    pub fn launch(&mut self, running: bool, connected: bool) -> Launch {
        if self.is_busy() {
            debug!("Setup procedure already running ({})", self.state);
            return Launch::Refused;
        }

        self.attempts += 1;
        debug!("Setup attempt {}", self.attempts);

        if !running {
            return Launch::Finished(SetupOutcome::Error);
        }
        if connected {
            return Launch::Finished(SetupOutcome::Success);
        }
        self.state = SetupState::AwaitingConnect;
        Launch::Connect
    }

    /// Records that the E2 Setup Request with `transaction_id` went out.
    pub fn on_setup_sent(&mut self, transaction_id: u8) {
        self.state = SetupState::AwaitingSetupResponse;
        self.transaction_id = Some(transaction_id);
    }

    /// True if a response with `transaction_id` answers the outstanding request.
    pub fn matches_transaction(&self, transaction_id: u8) -> bool {
        self.state == SetupState::AwaitingSetupResponse
            && self.transaction_id == Some(transaction_id)
    }

    /// Remembers the TimeToWait of an E2 Setup Failure for the next backoff.
    pub fn record_time_to_wait(&mut self, time_to_wait: Option<TimeToWait>) {
        self.time_to_wait = time_to_wait.map(|t| Duration::from_secs(t.as_secs()));
    }

    /// Ends the current attempt.
    pub fn finish(&mut self, outcome: SetupOutcome) -> Verdict {
        self.state = SetupState::Idle;
        self.transaction_id = None;

        match outcome {
            SetupOutcome::Success => {
                self.attempts = 0;
                self.time_to_wait = None;
                Verdict::Established
            }
            SetupOutcome::Error => match self.retry_limit {
                Some(limit) if self.attempts > limit => Verdict::RetriesExhausted {
                    attempts: self.attempts,
                },
                _ => Verdict::Retry {
                    delay: self.reconnect_delay(),
                },
            },
        }
    }

    fn reconnect_delay(&mut self) -> Duration {
        match self.time_to_wait.take() {
            Some(wait) => wait.max(self.reconnect_interval),
            None => self.reconnect_interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_secs(10);

    #[test]
    fn test_successful_attempt() {
        let mut setup = SetupProcedure::new(None, INTERVAL);
        assert_eq!(setup.launch(true, false), Launch::Connect);
        assert_eq!(setup.state(), SetupState::AwaitingConnect);
        assert_eq!(setup.attempts(), 1);

        setup.on_setup_sent(7);
        assert!(setup.matches_transaction(7));
        assert!(!setup.matches_transaction(8));

        assert_eq!(setup.finish(SetupOutcome::Success), Verdict::Established);
        assert_eq!(setup.attempts(), 0);
        assert!(!setup.is_busy());
        assert!(!setup.matches_transaction(7));
    }

    #[test]
    fn test_launch_refused_while_busy() {
        let mut setup = SetupProcedure::new(None, INTERVAL);
        assert_eq!(setup.launch(true, false), Launch::Connect);
        assert_eq!(setup.launch(true, false), Launch::Refused);
        assert_eq!(setup.attempts(), 1);
    }

    #[test]
    fn test_launch_not_running_or_connected() {
        let mut setup = SetupProcedure::new(None, INTERVAL);
        assert_eq!(
            setup.launch(false, false),
            Launch::Finished(SetupOutcome::Error)
        );
        assert_eq!(
            setup.launch(true, true),
            Launch::Finished(SetupOutcome::Success)
        );
        assert_eq!(setup.attempts(), 2);
    }

    #[test]
    fn test_retry_limit() {
        let mut setup = SetupProcedure::new(Some(2), INTERVAL);
        for _ in 0..2 {
            assert_eq!(setup.launch(true, false), Launch::Connect);
            assert_eq!(
                setup.finish(SetupOutcome::Error),
                Verdict::Retry { delay: INTERVAL }
            );
        }
        assert_eq!(setup.launch(true, false), Launch::Connect);
        assert_eq!(
            setup.finish(SetupOutcome::Error),
            Verdict::RetriesExhausted { attempts: 3 }
        );
    }

    #[test]
    fn test_unlimited_retries() {
        let mut setup = SetupProcedure::new(None, INTERVAL);
        for _ in 0..100 {
            setup.launch(true, false);
            assert!(matches!(
                setup.finish(SetupOutcome::Error),
                Verdict::Retry { .. }
            ));
        }
        assert_eq!(setup.attempts(), 100);
    }

    #[test]
    fn test_success_resets_retry_budget() {
        let mut setup = SetupProcedure::new(Some(1), INTERVAL);
        setup.launch(true, false);
        setup.finish(SetupOutcome::Error);
        setup.launch(true, false);
        assert_eq!(setup.finish(SetupOutcome::Success), Verdict::Established);

        setup.launch(true, false);
        assert!(matches!(
            setup.finish(SetupOutcome::Error),
            Verdict::Retry { .. }
        ));
    }

    #[test]
    fn test_time_to_wait_extends_backoff_once() {
        let mut setup = SetupProcedure::new(None, INTERVAL);

        setup.launch(true, false);
        setup.record_time_to_wait(Some(TimeToWait::V60s));
        assert_eq!(
            setup.finish(SetupOutcome::Error),
            Verdict::Retry {
                delay: Duration::from_secs(60)
            }
        );

        // Shorter than the configured interval
        setup.launch(true, false);
        setup.record_time_to_wait(Some(TimeToWait::V1s));
        assert_eq!(
            setup.finish(SetupOutcome::Error),
            Verdict::Retry { delay: INTERVAL }
        );

        setup.launch(true, false);
        assert_eq!(
            setup.finish(SetupOutcome::Error),
            Verdict::Retry { delay: INTERVAL }
        );
    }
}
