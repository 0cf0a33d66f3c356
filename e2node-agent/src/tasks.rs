//! E2 Agent Task Framework
//!
//! The agent runs as an async actor: one tokio task owns all E2 state and
//! consumes a bounded queue of [`TaskMessage`]s. Background work (the RIC
//! connect sequence, timers) never touches that state directly; it posts a
//! result message back onto the queue instead.
//!
//! ```text
//!  connect task ──┐
//!  TaskTimer(s) ──┼──> mpsc queue ──> E2AgentTask ──> RicTransport ──> RIC
//!  application  ──┘                       ▲
//!                                         └── poll tick (inbound PDUs)
//! ```

use std::fmt;

use tokio::sync::mpsc;

use e2node_e2ap::ies::Cause;
use e2node_e2ap::E2apPdu;

use crate::e2::SubscriptionKey;
use crate::transport::{RicTransport, TransportError};

// ============================================================================
// Task Message Envelope
// ============================================================================

/// Task message envelope wrapping typed messages with control signals.
#[derive(Debug)]
pub enum TaskMessage<T> {
    /// Regular message payload
    Message(T),
    /// Shutdown signal - task should terminate gracefully
    Shutdown,
}

impl<T> TaskMessage<T> {
    /// Creates a new message envelope containing the given payload.
    pub fn message(msg: T) -> Self {
        TaskMessage::Message(msg)
    }

    /// Creates a shutdown signal.
    pub fn shutdown() -> Self {
        TaskMessage::Shutdown
    }

    /// Returns true if this is a shutdown signal.
    pub fn is_shutdown(&self) -> bool {
        matches!(self, TaskMessage::Shutdown)
    }

    /// Returns the message payload if present, or None for shutdown.
    pub fn into_message(self) -> Option<T> {
        match self {
            TaskMessage::Message(msg) => Some(msg),
            TaskMessage::Shutdown => None,
        }
    }
}

// ============================================================================
// Task Trait
// ============================================================================

/// Base trait for agent tasks.
///
/// The task processes messages from its receive channel until it receives
/// `TaskMessage::Shutdown`, the channel closes, or it fails.
#[async_trait::async_trait]
pub trait Task: Send + 'static {
    /// The message type this task processes.
    type Message: Send;
    /// Fatal outcome of the task.
    type Error: Send;

    /// Runs the task's main loop.
    async fn run(
        &mut self,
        rx: mpsc::Receiver<TaskMessage<Self::Message>>,
    ) -> Result<(), Self::Error>;
}

// ============================================================================
// Agent Messages
// ============================================================================

/// Timers owned by the agent and its subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerId {
    /// Reconnect backoff
    RicConnect,
    /// E2 Setup Response supervision
    SetupTimeout,
    /// Periodic reporting of one subscription
    SubscriptionReport(SubscriptionKey),
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerId::RicConnect => write!(f, "RicConnect"),
            TimerId::SetupTimeout => write!(f, "SetupTimeout"),
            TimerId::SubscriptionReport(key) => write!(f, "SubscriptionReport({key})"),
        }
    }
}

/// Messages for the E2 agent task.
pub enum E2AgentMessage {
    /// Outcome of the background RIC connect sequence
    ConnectResult(Result<Box<dyn RicTransport>, TransportError>),
    /// A [`TaskTimer`](crate::timer::TaskTimer) fired
    TimerExpired {
        /// Timer that fired
        timer: TimerId,
        /// Generation the timer was armed with
        generation: u64,
    },
    /// Send a PDU to the RIC from the agent task
    SendPdu(E2apPdu),
    /// Start an agent-initiated E2 Reset
    TriggerReset {
        /// Cause carried in the Reset Request
        cause: Cause,
    },
}

impl fmt::Debug for E2AgentMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            E2AgentMessage::ConnectResult(Ok(_)) => write!(f, "ConnectResult(Ok)"),
            E2AgentMessage::ConnectResult(Err(e)) => write!(f, "ConnectResult(Err({e}))"),
            E2AgentMessage::TimerExpired { timer, generation } => f
                .debug_struct("TimerExpired")
                .field("timer", timer)
                .field("generation", generation)
                .finish(),
            E2AgentMessage::SendPdu(pdu) => write!(f, "SendPdu({})", pdu.name()),
            E2AgentMessage::TriggerReset { cause } => write!(f, "TriggerReset({cause})"),
        }
    }
}

// ============================================================================
// Task Handle
// ============================================================================

/// Handle for sending messages to a task.
#[derive(Debug)]
pub struct TaskHandle<T> {
    tx: mpsc::Sender<TaskMessage<T>>,
}

impl<T> Clone for TaskHandle<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> TaskHandle<T> {
    /// Creates a new task handle from a sender.
    pub fn new(tx: mpsc::Sender<TaskMessage<T>>) -> Self {
        Self { tx }
    }

    /// Sends a message to the task.
    ///
    /// Returns an error if the task has been dropped.
    pub async fn send(&self, msg: T) -> Result<(), mpsc::error::SendError<TaskMessage<T>>> {
        self.tx.send(TaskMessage::Message(msg)).await
    }

    /// Sends a message to the task without waiting.
    ///
    /// Returns an error if the channel is full or the task has been dropped.
    pub fn try_send(&self, msg: T) -> Result<(), mpsc::error::TrySendError<TaskMessage<T>>> {
        self.tx.try_send(TaskMessage::Message(msg))
    }

    /// Sends a shutdown signal to the task.
    pub async fn shutdown(&self) -> Result<(), mpsc::error::SendError<TaskMessage<T>>> {
        self.tx.send(TaskMessage::Shutdown).await
    }

    /// Returns true if the task channel is closed.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Creates a bounded task queue and the handle that feeds it.
pub fn task_channel<T>(capacity: usize) -> (TaskHandle<T>, mpsc::Receiver<TaskMessage<T>>) {
    let (tx, rx) = mpsc::channel(capacity);
    (TaskHandle::new(tx), rx)
}

// ============================================================================
// Constants
// ============================================================================

/// Default channel capacity for task message queues.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Default shutdown timeout in milliseconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_MS: u64 = 5000;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use e2node_e2ap::ies::CauseMisc;

    #[test]
    fn test_task_message_variants() {
        let msg: TaskMessage<i32> = TaskMessage::message(42);
        assert!(!msg.is_shutdown());
        assert_eq!(msg.into_message(), Some(42));

        let shutdown: TaskMessage<i32> = TaskMessage::shutdown();
        assert!(shutdown.is_shutdown());
        assert!(shutdown.into_message().is_none());
    }

    #[tokio::test]
    async fn test_task_handle_send() {
        let (handle, mut rx) = task_channel::<i32>(10);

        handle.send(42).await.unwrap();

        match rx.recv().await {
            Some(TaskMessage::Message(val)) => assert_eq!(val, 42),
            _ => panic!("expected message"),
        }
    }

    #[tokio::test]
    async fn test_task_handle_shutdown() {
        let (handle, mut rx) = task_channel::<i32>(10);

        handle.shutdown().await.unwrap();

        match rx.recv().await {
            Some(TaskMessage::Shutdown) => {}
            _ => panic!("expected shutdown"),
        }
    }

    #[test]
    fn test_task_handle_try_send_full() {
        let (handle, _rx) = task_channel::<i32>(1);
        assert!(handle.try_send(1).is_ok());
        assert!(handle.try_send(2).is_err());
    }

    #[test]
    fn test_task_handle_closed() {
        let (handle, rx) = task_channel::<i32>(1);
        assert!(!handle.is_closed());
        drop(rx);
        assert!(handle.is_closed());
    }

    #[test]
    fn test_timer_id_display() {
        assert_eq!(TimerId::RicConnect.to_string(), "RicConnect");
        let key = SubscriptionKey::new(1024, 7);
        assert_eq!(
            TimerId::SubscriptionReport(key).to_string(),
            "SubscriptionReport(1024/7)"
        );
    }

    #[test]
    fn test_agent_message_debug() {
        let msg = E2AgentMessage::TriggerReset {
            cause: Cause::Misc(CauseMisc::OmIntervention),
        };
        assert_eq!(format!("{msg:?}"), "TriggerReset(misc/OmIntervention)");

        let msg = E2AgentMessage::ConnectResult(Err(TransportError::NotConnected));
        assert!(format!("{msg:?}").starts_with("ConnectResult(Err("));
    }
}
