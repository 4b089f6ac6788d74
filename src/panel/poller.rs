//! Periodic selection polling.
//!
//! The host exposes no change notification for the selection, so it is
//! read on a fixed period and written into the panel state on every tick.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::host::{HostError, SelectionSource};

use super::controller::PanelController;

/// Default poll period.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct SelectionPoller {
    source: Arc<dyn SelectionSource>,
    controller: PanelController,
    period: Duration,
}

impl SelectionPoller {
    pub fn new(
        source: Arc<dyn SelectionSource>,
        controller: PanelController,
        period: Duration,
    ) -> Self {
        Self {
            source,
            controller,
            period,
        }
    }

    /// Read the host selection once.
    ///
    /// On failure the previous selection is kept; the next tick retries.
    pub async fn poll_once(&self) -> Result<(), HostError> {
        match self.source.read_selection().await {
            Ok(text) => {
                self.controller.observe_selection(text);
                Ok(())
            }
            Err(e) => {
                tracing::debug!(error = %e, "Selection read failed, keeping previous selection");
                Err(e)
            }
        }
    }

    /// Start polling on the current tokio runtime.
    ///
    /// Polling stops when the returned handle is stopped or dropped.
    pub fn spawn(self) -> PollerHandle {
        let period = self.period;
        tracing::debug!(period_ms = period.as_millis() as u64, "Starting selection poller");

        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            // A slow host read delays the next tick instead of bursting.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let _ = self.poll_once().await;
            }
        });

        PollerHandle { task: Some(task) }
    }
}

/// Owns the polling task. Dropping it cancels future ticks.
pub struct PollerHandle {
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stop polling and wait for the task to wind down.
    pub async fn stop(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
            tracing::debug!("Selection poller stopped");
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
