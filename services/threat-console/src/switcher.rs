//! Camera switcher: optimistic button highlight plus `POST /switch_camera`

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::io::HttpClient;
use crate::status::{CameraSwitchRequest, CameraSwitchResult};
use crate::view::ViewHandle;
use crate::{ConsoleError, Result};

/// Sends camera switch commands to the backend
pub struct CameraSwitcher {
    http: Arc<dyn HttpClient>,
    switch_url: String,
    view: ViewHandle,
}

impl std::fmt::Debug for CameraSwitcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraSwitcher")
            .field("switch_url", &self.switch_url)
            .finish()
    }
}

impl CameraSwitcher {
    pub fn new(
        http: Arc<dyn HttpClient>,
        switch_url: impl Into<String>,
        view: ViewHandle,
    ) -> Self {
        Self {
            http,
            switch_url: switch_url.into(),
            view,
        }
    }

    /// Highlight button `index` right away, then send the switch request in
    /// its own task.
    ///
    /// The view is never reconciled with the backend's answer. A failed
    /// request is not logged and does not roll the highlight back; the
    /// returned handle carries the outcome for callers that want it.
    pub async fn switch_camera(&self, index: usize) -> JoinHandle<Result<CameraSwitchResult>> {
        self.view.write().await.set_active_camera(index);

        let http = Arc::clone(&self.http);
        let url = self.switch_url.clone();
        tokio::spawn(async move {
            let result = send_switch(http.as_ref(), &url, index).await?;
            tracing::info!("Camera switched to: {}", result.current_index);
            Ok(result)
        })
    }
}

async fn send_switch(
    http: &dyn HttpClient,
    url: &str,
    index: usize,
) -> Result<CameraSwitchResult> {
    let body = serde_json::to_value(CameraSwitchRequest { index })?;
    let response = http.post_json(url, &body).await?;
    if !response.is_success() {
        return Err(ConsoleError::UnexpectedStatus {
            url: url.to_string(),
            status: response.status,
        });
    }
    Ok(serde_json::from_str(&response.body)?)
}
