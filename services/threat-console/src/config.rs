//! Configuration types for the threat console

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub cameras: CameraConfig,
}

/// Where the status backend lives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl ServerConfig {
    /// URL of the status endpoint
    pub fn status_url(&self) -> String {
        format!("{}/status", self.base_url.trim_end_matches('/'))
    }

    /// URL of the camera switch endpoint
    pub fn switch_camera_url(&self) -> String {
        format!("{}/switch_camera", self.base_url.trim_end_matches('/'))
    }
}

/// Status polling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Drop a poll response when a newer poll has already been applied.
    /// Off by default: responses apply in arrival order.
    #[serde(default)]
    pub discard_stale_responses: bool,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            discard_stale_responses: false,
        }
    }
}

impl PollingConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Camera button configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_camera_count")]
    pub count: usize,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            count: default_camera_count(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_interval_ms() -> u64 {
    500
}

fn default_camera_count() -> usize {
    4
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::ConsoleError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Reject settings the scheduler cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        if self.polling.interval_ms == 0 {
            return Err(crate::ConsoleError::Config(
                "polling.interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.server.base_url.is_empty() {
            return Err(crate::ConsoleError::Config(
                "server.base_url must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
