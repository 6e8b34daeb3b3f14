//! Controller timing and DOM-marker configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunables for the UI controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Delay awaited after a successful navigation so the destination screen can mount.
    pub navigation_settle_ms: u64,
    /// Delay awaited between consecutive actions of a sequence.
    pub sequence_step_delay_ms: u64,
    /// Attribute carrying the logical target name on clickable/toggleable elements.
    pub marker_attribute: String,
    /// Attribute carrying the data type on export triggers.
    pub export_marker_attribute: String,
    /// Executed actions retained for [`crate::UiController::history`]; older entries are dropped.
    pub history_limit: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            navigation_settle_ms: 300,
            sequence_step_delay_ms: 200,
            marker_attribute: "data-ai-target".to_string(),
            export_marker_attribute: "data-export".to_string(),
            history_limit: 100,
        }
    }
}

impl ControllerConfig {
    /// Default configuration with both delays removed.
    pub fn immediate() -> Self {
        Self {
            navigation_settle_ms: 0,
            sequence_step_delay_ms: 0,
            ..Self::default()
        }
    }

    /// Navigation settle delay.
    pub fn navigation_settle(&self) -> Duration {
        Duration::from_millis(self.navigation_settle_ms)
    }

    /// Inter-step sequence delay.
    pub fn sequence_step_delay(&self) -> Duration {
        Duration::from_millis(self.sequence_step_delay_ms)
    }
}
