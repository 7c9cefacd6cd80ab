use serde::{Deserialize, Serialize};

use crate::engine::constants::{GOAL_THRESHOLD, NO_DOUBLE_COUNTING_MS};

/// Goal sensor tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Magnitude a sensor must exceed (strictly) to count as a goal
    pub threshold: u16,
    /// Re-arm delay after a goal (ms)
    pub debounce_delay_ms: u64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self { threshold: GOAL_THRESHOLD, debounce_delay_ms: NO_DOUBLE_COUNTING_MS }
    }
}
