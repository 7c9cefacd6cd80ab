use serde::{Deserialize, Serialize};

use crate::engine::constants::NUM_LEDS;

/// When LED patterns are recomputed.
///
/// Reading a pattern can reset the bit-2 counter, so refreshing every
/// cycle makes that LED blink for a single cycle instead of holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayRefresh {
    /// Only the scoring player's bank, right after the goal
    #[default]
    OnGoal,
    /// Both banks on every active cycle
    EveryCycle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// LEDs per bank (the encoding only supports 4)
    pub led_count: u8,
    pub refresh: DisplayRefresh,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { led_count: NUM_LEDS, refresh: DisplayRefresh::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_from_json() {
        let config: DisplayConfig = serde_json::from_str(r#"{"refresh": "every_cycle"}"#).unwrap();
        assert_eq!(config.refresh, DisplayRefresh::EveryCycle);
        assert_eq!(config.led_count, 4);
    }
}
