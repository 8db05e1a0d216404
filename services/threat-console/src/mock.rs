//! Mock status backend for local runs and integration testing
//!
//! Serves the same `/status` and `/switch_camera` endpoints as the real
//! camera backend. Status payloads come from the backend's scene
//! classification rules applied to a synthetic scene.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::status::CameraSwitchResult;

/// Average crowd speed (pixels/frame) above which a surge is a warning
pub const SURGE_THRESHOLD_WARNING: f64 = 15.0;
/// Average crowd speed (pixels/frame) above which a surge is critical
pub const SURGE_THRESHOLD_CRITICAL: f64 = 25.0;
/// Head count above which density is a warning
pub const DENSITY_WARNING: u32 = 8;
/// Head count above which density is critical
pub const DENSITY_CRITICAL: u32 = 12;
/// Number of chaos samples kept in the payload history
pub const HISTORY_LEN: usize = 50;

/// A snapshot of what the camera sees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneSample {
    pub person_count: u32,
    /// Number of tracked people currently moving
    pub moving_count: u32,
    /// Average speed of the moving people, in pixels per frame
    pub avg_crowd_speed: f64,
}

/// The `/status` body as the camera backend emits it.
///
/// The backend truncates the chaos metric to a whole number, so it and the
/// history go over the wire as JSON integers. The console decodes them into
/// floats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendStatus {
    pub threat_level: String,
    pub threat_color: String,
    pub reason: String,
    pub person_count: u32,
    pub chaos_metric: u32,
    pub history: Vec<u32>,
}

/// Classify a scene into a status payload, appending to `history`
pub fn classify_scene(sample: SceneSample, history: &[u32]) -> BackendStatus {
    // `as` saturates, so NaN and negative speeds land on 0
    let chaos = (sample.avg_crowd_speed / 20.0 * 100.0).min(100.0) as u32;
    let surging = sample.moving_count > 2;

    let (mut threat, mut reason) = (
        "NORMAL",
        "Stable conditions. Movement is within normal limits.".to_string(),
    );

    if surging && sample.avg_crowd_speed > SURGE_THRESHOLD_CRITICAL {
        threat = "CRITICAL";
        reason = "CRITICAL: RAPID CROWD SURGE DETECTED (High Velocity)".to_string();
    } else if surging && sample.avg_crowd_speed > SURGE_THRESHOLD_WARNING {
        threat = "WARNING";
        reason = "WARNING: Crowd movement is accelerating abnormally.".to_string();
    } else if sample.person_count > DENSITY_CRITICAL {
        threat = "CRITICAL";
        reason = "CRITICAL: Severe Overcrowding. Capacity limit breached.".to_string();
    } else if sample.person_count > DENSITY_WARNING {
        threat = "WARNING";
        reason = "WARNING: Crowd density is high.".to_string();
    }

    if threat == "NORMAL" && sample.person_count > 0 {
        reason = format!(
            "Monitoring {} individuals. Behavior is stable.",
            sample.person_count
        );
    }

    let mut history = history.to_vec();
    history.push(chaos);
    if history.len() > HISTORY_LEN {
        let excess = history.len() - HISTORY_LEN;
        history.drain(..excess);
    }

    BackendStatus {
        threat_level: threat.to_string(),
        threat_color: format!("var(--status-{})", threat.to_lowercase()),
        reason,
        person_count: sample.person_count,
        chaos_metric: chaos,
        history,
    }
}

/// State behind the mock endpoints
#[derive(Debug)]
pub struct MockBackend {
    pub status: BackendStatus,
    pub current_camera: usize,
    pub switch_requests: Vec<usize>,
    pub status_requests: u64,
    /// When set, `/status` answers with this HTTP status and no payload
    pub fail_status_with: Option<u16>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            status: classify_scene(
                SceneSample {
                    person_count: 0,
                    moving_count: 0,
                    avg_crowd_speed: 0.0,
                },
                &[],
            ),
            current_camera: 0,
            switch_requests: Vec::new(),
            status_requests: 0,
            fail_status_with: None,
        }
    }
}

impl MockBackend {
    /// Feed a new scene sample into the backend
    pub fn observe(&mut self, sample: SceneSample) {
        self.status = classify_scene(sample, &self.status.history);
    }
}

/// Handle to the mock backend state
pub type MockHandle = Arc<RwLock<MockBackend>>;

pub fn new_mock_handle() -> MockHandle {
    Arc::new(RwLock::new(MockBackend::default()))
}

/// Build the mock backend axum router
pub fn build_router(state: MockHandle) -> Router {
    Router::new()
        .route("/status", get(status_handler))
        .route("/switch_camera", post(switch_camera_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn status_handler(State(state): State<MockHandle>) -> axum::response::Response {
    let mut backend = state.write().await;
    backend.status_requests += 1;

    if let Some(code) = backend.fail_status_with {
        let code = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (code, "status unavailable").into_response();
    }

    Json(backend.status.clone()).into_response()
}

#[derive(Debug, Deserialize)]
struct SwitchBody {
    #[serde(default)]
    index: usize,
}

async fn switch_camera_handler(
    State(state): State<MockHandle>,
    Json(body): Json<SwitchBody>,
) -> impl IntoResponse {
    let mut backend = state.write().await;
    backend.current_camera = body.index;
    backend.switch_requests.push(body.index);
    tracing::debug!("Mock backend switched to camera {}", body.index);

    Json(CameraSwitchResult {
        current_index: body.index,
        success: Some(true),
    })
}

async fn health_handler() -> impl IntoResponse {
    "OK"
}
