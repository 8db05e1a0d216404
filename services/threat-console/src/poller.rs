//! Status poller: fetches `/status` and writes it into the dashboard view

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::io::HttpClient;
use crate::status::StatusPayload;
use crate::view::ViewHandle;
use crate::{ConsoleError, Result};

/// What a single poll did to the view
#[derive(Debug)]
pub enum PollOutcome {
    /// The payload was written into the view
    Applied { sequence: u64 },
    /// A newer poll had already been applied, so this payload was dropped
    Discarded { sequence: u64 },
    /// The request or the payload failed; the view was left untouched
    Failed { sequence: u64, error: ConsoleError },
}

/// Polls the backend status endpoint and updates the view
pub struct StatusPoller {
    http: Arc<dyn HttpClient>,
    status_url: String,
    view: ViewHandle,
    discard_stale: bool,
    next_sequence: AtomicU64,
}

impl std::fmt::Debug for StatusPoller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusPoller")
            .field("status_url", &self.status_url)
            .field("discard_stale", &self.discard_stale)
            .finish()
    }
}

impl StatusPoller {
    pub fn new(
        http: Arc<dyn HttpClient>,
        status_url: impl Into<String>,
        view: ViewHandle,
    ) -> Self {
        Self {
            http,
            status_url: status_url.into(),
            view,
            discard_stale: false,
            next_sequence: AtomicU64::new(0),
        }
    }

    /// Drop responses that arrive after a newer poll was already applied
    pub fn with_discard_stale(mut self, discard_stale: bool) -> Self {
        self.discard_stale = discard_stale;
        self
    }

    /// Run one poll. Failures are logged and leave the view untouched;
    /// there is no retry before the next scheduled poll.
    pub async fn update_status(&self) -> PollOutcome {
        let sequence = self.next_sequence.fetch_add(1, Ordering::SeqCst) + 1;

        let payload = match self.fetch_status().await {
            Ok(payload) => payload,
            Err(error) => {
                tracing::error!("Error fetching status: {}", error);
                return PollOutcome::Failed { sequence, error };
            }
        };

        let mut view = self.view.write().await;
        if self.discard_stale && sequence <= view.last_applied_sequence {
            tracing::debug!(
                "Discarding stale status #{} (view already at #{})",
                sequence,
                view.last_applied_sequence
            );
            return PollOutcome::Discarded { sequence };
        }

        view.apply_status(&payload, sequence);
        tracing::debug!(
            "Applied status #{}: {} people={} chaos={}",
            sequence,
            payload.threat_level,
            payload.person_count,
            payload.chaos_metric
        );
        PollOutcome::Applied { sequence }
    }

    /// Fetch and decode one status payload without touching the view
    pub async fn fetch_status(&self) -> Result<StatusPayload> {
        let response = self.http.get(&self.status_url).await?;
        if !response.is_success() {
            return Err(ConsoleError::UnexpectedStatus {
                url: self.status_url.clone(),
                status: response.status,
            });
        }
        Ok(serde_json::from_str(&response.body)?)
    }
}
