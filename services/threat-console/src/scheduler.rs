//! Fixed-period poll scheduler

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::poller::StatusPoller;

/// Drives the status poller on a fixed period until cancelled.
///
/// Every tick starts a new poll without waiting for the previous one, so slow
/// responses can overlap and complete out of order.
pub struct PollScheduler {
    poller: Arc<StatusPoller>,
    interval: Duration,
    cancel: CancellationToken,
}

impl PollScheduler {
    pub fn new(poller: Arc<StatusPoller>, interval: Duration, cancel: CancellationToken) -> Self {
        Self {
            poller,
            interval,
            cancel,
        }
    }

    /// Run until the cancellation token fires. Returns the number of polls started.
    pub async fn run(&self) -> u64 {
        let mut ticker = tokio::time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut in_flight = JoinSet::new();
        let mut started = 0u64;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let poller = Arc::clone(&self.poller);
                    in_flight.spawn(async move { poller.update_status().await });
                    started += 1;
                }
                _ = self.cancel.cancelled() => {
                    tracing::debug!("Poll scheduler cancelled after {} polls", started);
                    break;
                }
            }

            while in_flight.try_join_next().is_some() {}
        }

        in_flight.abort_all();
        while in_flight.join_next().await.is_some() {}
        started
    }
}
