use serde::{Deserialize, Serialize};

use crate::engine::constants::{
    CELEBRATE_TIMES, END_GAME_WAIT_MS, LIGHT_SHOW_DELAY1_MS, LIGHT_SHOW_DELAY2_MS,
    LIGHT_SHOW_DELAY3_MS, NUM_LEDS, RESET_LED_MS,
};

/// Celebration, end-of-match and reset flash timing (all ms)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationTiming {
    /// Times the winner's chase animation repeats
    pub celebration_repeat_count: u8,
    /// Pause after each LED turns on
    pub led_on_step_ms: u64,
    /// Hold with the full bank lit
    pub hold_ms: u64,
    /// Pause after each LED turns off
    pub led_off_step_ms: u64,
    /// Pause before the reset flash
    pub end_game_wait_ms: u64,
    /// Number of all-on/all-off flashes on reset
    pub reset_flash_count: u8,
    /// Half period of one reset flash
    pub reset_flash_ms: u64,
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            celebration_repeat_count: CELEBRATE_TIMES,
            led_on_step_ms: LIGHT_SHOW_DELAY1_MS,
            hold_ms: LIGHT_SHOW_DELAY2_MS,
            led_off_step_ms: LIGHT_SHOW_DELAY3_MS,
            end_game_wait_ms: END_GAME_WAIT_MS,
            reset_flash_count: NUM_LEDS,
            reset_flash_ms: RESET_LED_MS,
        }
    }
}

impl AnimationTiming {
    /// Duration of one celebration run on a bank of `led_count` LEDs
    pub fn celebration_ms(&self, led_count: u8) -> u64 {
        let per_repeat = led_count as u64 * (self.led_on_step_ms + self.led_off_step_ms)
            + self.hold_ms;
        per_repeat * self.celebration_repeat_count as u64
    }

    pub fn reset_flash_total_ms(&self) -> u64 {
        self.reset_flash_count as u64 * self.reset_flash_ms * 2
    }

    /// No waiting at all; for host replays that only care about the scores
    pub fn instant() -> Self {
        Self {
            led_on_step_ms: 0,
            hold_ms: 0,
            led_off_step_ms: 0,
            end_game_wait_ms: 0,
            reset_flash_ms: 0,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_durations() {
        let timing = AnimationTiming::default();
        assert_eq!(timing.celebration_ms(4), 200);
        assert_eq!(timing.reset_flash_total_ms(), 800);
    }

    #[test]
    fn test_instant_keeps_counts() {
        let timing = AnimationTiming::instant();
        assert_eq!(timing.celebration_ms(4), 0);
        assert_eq!(timing.celebration_repeat_count, 4);
        assert_eq!(timing.reset_flash_count, 4);
    }
}
