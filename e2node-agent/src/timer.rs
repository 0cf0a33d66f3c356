//! Agent Timer Management
//!
//! A [`TaskTimer`] is a one-shot timer bound to the agent queue. Starting it
//! spawns a sleeping tokio task that posts [`E2AgentMessage::TimerExpired`]
//! when the interval elapses. Every start and stop bumps the timer's
//! generation, so an expiry that was already queued before a stop or restart
//! is recognised as stale by [`TaskTimer::on_expired`] and ignored.
//!
//! Periodic behaviour (subscription reporting) is built by re-arming the
//! timer from the expiry handler.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::trace;

use crate::tasks::{E2AgentMessage, TaskHandle, TimerId};

/// One-shot, restartable timer that reports expiry on the agent queue
#[derive(Debug)]
pub struct TaskTimer {
    id: TimerId,
    interval: Duration,
    handle: TaskHandle<E2AgentMessage>,
    generation: u64,
    sleeper: Option<JoinHandle<()>>,
    expiry_count: u32,
}

impl TaskTimer {
    /// Creates a stopped timer
    pub fn new(id: TimerId, interval: Duration, handle: TaskHandle<E2AgentMessage>) -> Self {
        Self {
            id,
            interval,
            handle,
            generation: 0,
            sleeper: None,
            expiry_count: 0,
        }
    }

    /// Default interval used by [`TaskTimer::start`]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Arms the timer with its default interval, restarting it if running.
    pub fn start(&mut self) {
        self.start_with(self.interval);
    }

    /// Arms the timer with `interval`, restarting it if running.
    pub fn start_with(&mut self, interval: Duration) {
        self.stop();

        let timer = self.id;
        let generation = self.generation;
        let handle = self.handle.clone();
        trace!("Timer {} armed for {:?} (generation {})", timer, interval, generation);

        self.sleeper = Some(tokio::spawn(async move {
            tokio::time::sleep(interval).await;
            // The agent may already be gone during teardown
            let _ = handle
                .send(E2AgentMessage::TimerExpired { timer, generation })
                .await;
        }));
    }

    /// Disarms the timer; an expiry already queued becomes stale.
    pub fn stop(&mut self) {
        if let Some(sleeper) = self.sleeper.take() {
            sleeper.abort();
        }
        self.generation = self.generation.wrapping_add(1);
    }

    /// Consumes an expiry message.
    ///
    /// Returns true if `generation` belongs to the current arming, in which
    /// case the timer is no longer running. Stale expiries return false.
    pub fn on_expired(&mut self, generation: u64) -> bool {
        if self.sleeper.is_none() || generation != self.generation {
            trace!("Ignoring stale expiry of timer {} (generation {})", self.id, generation);
            return false;
        }
        self.sleeper = None;
        self.expiry_count += 1;
        true
    }

    /// True while armed and its expiry has not been consumed
    pub fn is_running(&self) -> bool {
        self.sleeper.is_some()
    }

    /// Number of expiries consumed since creation
    pub fn expiry_count(&self) -> u32 {
        self.expiry_count
    }
}

impl Drop for TaskTimer {
    fn drop(&mut self) {
        if let Some(sleeper) = self.sleeper.take() {
            sleeper.abort();
        }
    }
}
