//! BDD test world for the threat console

use std::sync::Arc;

use cucumber::World;
use tokio::sync::{Notify, RwLock};
use tokio::task::JoinHandle;

use threat_console::io::{HttpClient, HttpResponse};
use threat_console::poller::PollOutcome;
use threat_console::status::CameraSwitchResult;
use threat_console::view::{DashboardView, ViewHandle};
use threat_console::ConsoleError;

/// How the fake backend answers `POST /switch_camera`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwitchBehavior {
    #[default]
    Accept,
    Reject,
    Hold,
}

/// In-process stand-in for the camera backend
#[derive(Debug, Default)]
pub struct FakeBackend {
    /// Answer to `GET /status`; `Err` simulates a transport failure
    pub status: RwLock<Option<Result<String, String>>>,
    pub switch_behavior: RwLock<SwitchBehavior>,
    pub release_switch: Notify,
}

#[async_trait::async_trait]
impl HttpClient for FakeBackend {
    async fn get(&self, url: &str) -> threat_console::Result<HttpResponse> {
        match self.status.read().await.clone() {
            Some(Ok(body)) => Ok(HttpResponse { status: 200, body }),
            Some(Err(msg)) => Err(ConsoleError::Http(msg)),
            None => Err(ConsoleError::Http(format!("no status scripted for {}", url))),
        }
    }

    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> threat_console::Result<HttpResponse> {
        let behavior = *self.switch_behavior.read().await;
        match behavior {
            SwitchBehavior::Reject => Err(ConsoleError::Http(format!("POST {} refused", url))),
            SwitchBehavior::Accept | SwitchBehavior::Hold => {
                if behavior == SwitchBehavior::Hold {
                    self.release_switch.notified().await;
                }
                Ok(HttpResponse {
                    status: 200,
                    body: serde_json::json!({
                        "success": true,
                        "current_index": body["index"],
                    })
                    .to_string(),
                })
            }
        }
    }
}

#[derive(Debug, Default, World)]
pub struct ConsoleWorld {
    pub backend: Arc<FakeBackend>,
    pub view: Option<ViewHandle>,
    pub camera_count: usize,

    // Polling
    pub status_body: Option<serde_json::Value>,
    pub view_before: Option<DashboardView>,
    pub last_outcome: Option<PollOutcome>,

    // Switching
    pub switch_handle: Option<JoinHandle<threat_console::Result<CameraSwitchResult>>>,
    pub switch_result: Option<threat_console::Result<CameraSwitchResult>>,
}

impl ConsoleWorld {
    /// The view, created on first use with the configured camera count
    pub fn view(&mut self) -> ViewHandle {
        let count = self.camera_count;
        Arc::clone(
            self.view
                .get_or_insert_with(|| threat_console::view::new_view_handle(count)),
        )
    }
}
