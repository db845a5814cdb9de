//! Cancellable periodic background tasks
//!
//! Each periodic concern (slideshow rotation, weather refresh) runs as a
//! single loop on its own tokio task. A tick never overlaps the previous one:
//! when a tick runs long the next one simply fires late, and missed ticks are
//! not replayed.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Work performed once per tick
#[async_trait]
pub trait PeriodicTask: Send + Sync + 'static {
    /// Short name used in log lines
    fn name(&self) -> &'static str;

    async fn tick(&self);
}

/// When and how often a task fires
#[derive(Debug, Clone, Copy)]
pub struct Schedule {
    pub interval: Duration,
    /// Fire once right away instead of waiting a full interval first
    pub fire_immediately: bool,
}

impl Schedule {
    pub fn every(interval: Duration) -> Self {
        Self {
            interval,
            fire_immediately: false,
        }
    }

    pub fn immediately_then_every(interval: Duration) -> Self {
        Self {
            interval,
            fire_immediately: true,
        }
    }
}

/// Handle to a running periodic loop
pub struct PeriodicHandle {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl PeriodicHandle {
    /// Signal the loop to exit. A tick already in progress is allowed to finish.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop the loop and wait for it to exit
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.handle.await {
            tracing::error!("periodic task join error: {}", e);
        }
    }
}

/// Spawn `task` on the runtime, firing on `schedule` until `cancel` fires.
///
/// The token is a child of `cancel`, so stopping the returned handle does not
/// affect sibling tasks sharing the same parent token.
pub fn spawn<T: PeriodicTask>(
    task: Arc<T>,
    schedule: Schedule,
    cancel: &CancellationToken,
) -> PeriodicHandle {
    let cancel = cancel.child_token();
    let stop = cancel.clone();

    let handle = tokio::spawn(async move {
        let start = if schedule.fire_immediately {
            Instant::now()
        } else {
            Instant::now() + schedule.interval
        };
        let mut ticker = interval_at(start, schedule.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            "Starting periodic task {} (interval {:?})",
            task.name(),
            schedule.interval
        );

        loop {
            tokio::select! {
                biased;
                _ = stop.cancelled() => break,
                _ = ticker.tick() => {
                    tracing::debug!("periodic task {} tick", task.name());
                    task.tick().await;
                }
            }
        }

        tracing::info!("Periodic task {} stopped", task.name());
    });

    PeriodicHandle { cancel, handle }
}
