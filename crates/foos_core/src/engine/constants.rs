//! Default table constants
//!
//! These are the values the table shipped with. Every one of them can be
//! overridden through `ScorerConfig`; the engine never reads them directly.

/// LEDs per player bank
pub const NUM_LEDS: u8 = 4;

/// Highest score a 4-bit bank can show
pub const DISPLAY_MAX_SCORE: u8 = (1 << NUM_LEDS) - 1;

/// First to this many goals wins
pub const DEFAULT_MAX_SCORE: u8 = 10;

/// Raw sensor magnitude that counts as a ball breaking the beam (strictly greater than)
pub const GOAL_THRESHOLD: u16 = 400;

/// Full-scale reading of the 10-bit analog front end
pub const SENSOR_FULL_SCALE: u16 = 1023;

/// Re-arm delay after a goal so one ball isn't counted twice (ms)
pub const NO_DOUBLE_COUNTING_MS: u64 = 50;

/// Celebration animation repeats
pub const CELEBRATE_TIMES: u8 = 4;

/// Pause after each LED lights up during a celebration (ms)
pub const LIGHT_SHOW_DELAY1_MS: u64 = 5;

/// Hold with the whole bank lit (ms)
pub const LIGHT_SHOW_DELAY2_MS: u64 = 10;

/// Pause after each LED goes dark during a celebration (ms)
pub const LIGHT_SHOW_DELAY3_MS: u64 = 5;

/// On/off half-period of the reset flash (ms)
pub const RESET_LED_MS: u64 = 100;

/// Pause between the end of a match and the reset flash (ms)
pub const END_GAME_WAIT_MS: u64 = 20;

/// Magnitude above which the debug status indicator shows "high"
pub const SIGNAL_INDICATOR_LEVEL: u16 = 512;

// Compile-time validation
const _: () = assert!(DEFAULT_MAX_SCORE <= DISPLAY_MAX_SCORE);
const _: () = assert!(GOAL_THRESHOLD < SENSOR_FULL_SCALE);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_range() {
        assert_eq!(DISPLAY_MAX_SCORE, 15);
        assert!(DEFAULT_MAX_SCORE <= DISPLAY_MAX_SCORE);
    }

    #[test]
    fn test_celebration_length() {
        // one repeat = 4 on-steps + hold + 4 off-steps
        let per_repeat = NUM_LEDS as u64 * LIGHT_SHOW_DELAY1_MS
            + LIGHT_SHOW_DELAY2_MS
            + NUM_LEDS as u64 * LIGHT_SHOW_DELAY3_MS;
        assert_eq!(per_repeat * CELEBRATE_TIMES as u64, 200);
    }
}
