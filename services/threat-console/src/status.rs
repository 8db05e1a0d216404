//! Wire types for the status backend and the chaos bar color policy

use serde::{Deserialize, Serialize};
use std::fmt;

/// Threat status as returned by `GET /status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusPayload {
    pub threat_level: String,
    pub threat_color: String,
    pub reason: String,
    pub person_count: u32,
    pub chaos_metric: f64,
    /// Recent chaos samples, oldest first. Older backends omit it.
    #[serde(default)]
    pub history: Vec<f64>,
}

/// Body of `POST /switch_camera`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraSwitchRequest {
    pub index: usize,
}

/// Response of `POST /switch_camera`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraSwitchResult {
    pub current_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}

/// Intensity band of the chaos metric, used to color the chaos bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChaosTier {
    Critical,
    Warning,
    Normal,
}

impl ChaosTier {
    pub const CRITICAL_ABOVE: f64 = 70.0;
    pub const WARNING_ABOVE: f64 = 40.0;

    /// First match wins; the thresholds themselves fall to the lower tier.
    pub fn classify(chaos_metric: f64) -> Self {
        if chaos_metric > Self::CRITICAL_ABOVE {
            ChaosTier::Critical
        } else if chaos_metric > Self::WARNING_ABOVE {
            ChaosTier::Warning
        } else {
            ChaosTier::Normal
        }
    }

    /// CSS color token the surrounding stylesheet defines for this tier
    pub fn css_color(self) -> &'static str {
        match self {
            ChaosTier::Critical => "var(--status-critical)",
            ChaosTier::Warning => "var(--status-warning)",
            ChaosTier::Normal => "var(--accent)",
        }
    }
}

impl fmt::Display for ChaosTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChaosTier::Critical => write!(f, "critical"),
            ChaosTier::Warning => write!(f, "warning"),
            ChaosTier::Normal => write!(f, "normal"),
        }
    }
}
