//! Dashboard view model shared by the poller, the camera switcher and the renderer
//!
//! Each field stands in for one element of the dashboard page. Handlers
//! receive a [`ViewHandle`] instead of looking elements up themselves.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::status::{ChaosTier, StatusPayload};

/// The `threat-indicator` element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreatIndicator {
    pub text: String,
    pub color: String,
}

/// The `chaos-bar` element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChaosBar {
    /// CSS width, e.g. `55%`
    pub width: String,
    pub background_color: String,
}

/// One element of the camera button row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CameraButton {
    pub active: bool,
}

/// All dashboard elements the console writes to
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub threat_indicator: ThreatIndicator,
    pub reason_text: String,
    pub person_count: String,
    pub chaos_bar: ChaosBar,
    pub camera_buttons: Vec<CameraButton>,
    pub chaos_history: Vec<f64>,
    /// Sequence number of the poll that last wrote the status elements
    pub last_applied_sequence: u64,
    /// Bumped whenever a visible element changes value
    pub revision: u64,
}

/// Handle to the view shared across tasks
pub type ViewHandle = Arc<RwLock<DashboardView>>;

/// Create a fresh view with `camera_count` inactive camera buttons
pub fn new_view_handle(camera_count: usize) -> ViewHandle {
    Arc::new(RwLock::new(DashboardView::new(camera_count)))
}

impl DashboardView {
    pub fn new(camera_count: usize) -> Self {
        Self {
            threat_indicator: ThreatIndicator::default(),
            reason_text: String::new(),
            person_count: String::new(),
            chaos_bar: ChaosBar::default(),
            camera_buttons: vec![CameraButton::default(); camera_count],
            chaos_history: Vec::new(),
            last_applied_sequence: 0,
            revision: 0,
        }
    }

    /// Write a status payload into the status elements
    pub fn apply_status(&mut self, payload: &StatusPayload, sequence: u64) {
        let tier = ChaosTier::classify(payload.chaos_metric);
        // `|` rather than `||`: every element must be written
        let changed = replace(&mut self.threat_indicator.text, &payload.threat_level)
            | replace(&mut self.threat_indicator.color, &payload.threat_color)
            | replace(&mut self.reason_text, &payload.reason)
            | replace(&mut self.person_count, &payload.person_count.to_string())
            | replace(&mut self.chaos_bar.width, &format!("{}%", payload.chaos_metric))
            | replace(&mut self.chaos_bar.background_color, tier.css_color())
            | replace_history(&mut self.chaos_history, &payload.history);

        self.last_applied_sequence = sequence;
        if changed {
            self.revision += 1;
        }
    }

    /// Mark the button at `index` active and every other button inactive.
    /// An index past the end leaves all buttons inactive.
    pub fn set_active_camera(&mut self, index: usize) {
        let mut changed = false;
        for (position, button) in self.camera_buttons.iter_mut().enumerate() {
            let active = position == index;
            changed |= button.active != active;
            button.active = active;
        }
        if changed {
            self.revision += 1;
        }
    }

    /// Index of the highlighted camera button, if any
    pub fn active_camera(&self) -> Option<usize> {
        self.camera_buttons.iter().position(|b| b.active)
    }

    /// One-line text rendering for the console
    pub fn render(&self) -> String {
        let cameras: String = self
            .camera_buttons
            .iter()
            .enumerate()
            .map(|(i, b)| {
                if b.active {
                    format!("[{}]", i)
                } else {
                    format!(" {} ", i)
                }
            })
            .collect();

        let peak = self
            .chaos_history
            .iter()
            .copied()
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))));
        let peak = match peak {
            Some(p) => format!(" peak={}", p),
            None => String::new(),
        };

        format!(
            "threat={} ({}) people={} chaos={} [{}]{} cameras:{} | {}",
            display_or_dash(&self.threat_indicator.text),
            display_or_dash(&self.threat_indicator.color),
            display_or_dash(&self.person_count),
            display_or_dash(&self.chaos_bar.width),
            display_or_dash(&self.chaos_bar.background_color),
            peak,
            cameras,
            self.reason_text
        )
    }
}

/// Overwrite `slot` with `value`, returning whether it differed
fn replace(slot: &mut String, value: &str) -> bool {
    if slot.as_str() == value {
        return false;
    }
    value.clone_into(slot);
    true
}

fn replace_history(slot: &mut Vec<f64>, value: &[f64]) -> bool {
    if slot.as_slice() == value {
        return false;
    }
    value.clone_into(slot);
    true
}

fn display_or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}
