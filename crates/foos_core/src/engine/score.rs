//! # Score State and LED Encoding
//!
//! Each player has a 4-LED bank. The bank is NOT a plain binary counter;
//! the table's code uses its own per-bit rules:
//!
//! | Bit | Lit when |
//! |-----|----------|
//! | 0 | `score` is odd |
//! | 1 | `score` in 4..=7 or 12..=15 |
//! | 2 | `encoding_counter >= 2` (and a counter above 2 is reset to 0 by the read) |
//! | 3 | `score >= 8` |
//!
//! Bit 2 is driven by a separate goal counter, not by the score. Reading
//! the pattern while the counter is above 2 lights the bit and resets the
//! counter, so `compute_display_pattern` takes `&mut self`.

use serde::{Deserialize, Serialize};

use super::constants::NUM_LEDS;

/// Logical state of one 4-LED bank. Bit `i` is LED `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayPattern(u8);

impl DisplayPattern {
    pub const MASK: u8 = (1 << NUM_LEDS) - 1;
    pub const OFF: DisplayPattern = DisplayPattern(0);
    pub const ALL_ON: DisplayPattern = DisplayPattern(Self::MASK);

    /// Bits above the bank width are dropped.
    pub const fn from_bits(bits: u8) -> Self {
        DisplayPattern(bits & Self::MASK)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_lit(self, led: u8) -> bool {
        led < NUM_LEDS && self.0 & (1 << led) != 0
    }

    pub const fn with_led(self, led: u8, on: bool) -> Self {
        if led >= NUM_LEDS {
            return self;
        }
        if on {
            DisplayPattern(self.0 | (1 << led))
        } else {
            DisplayPattern(self.0 & !(1 << led))
        }
    }
}

impl std::fmt::Display for DisplayPattern {
    /// LED 3 on the left, like the physical bank
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for led in (0..NUM_LEDS).rev() {
            f.write_str(if self.is_lit(led) { "●" } else { "○" })?;
        }
        Ok(())
    }
}

/// One player's score plus the auxiliary counter behind bit 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerScoreState {
    pub score: u8,
    pub encoding_counter: u32,
}

impl PlayerScoreState {
    pub const fn new() -> Self {
        Self { score: 0, encoding_counter: 0 }
    }

    /// Credit one goal. The score is clamped at `max_score`: once there,
    /// further calls change nothing and return `false`.
    pub fn apply_goal(&mut self, max_score: u8) -> bool {
        if self.score >= max_score {
            log::warn!(
                "Goal ignored: score already at max ({}/{})",
                self.score,
                max_score
            );
            return false;
        }
        self.score += 1;
        self.encoding_counter = self.encoding_counter.saturating_add(1);
        true
    }

    pub fn has_reached(&self, max_score: u8) -> bool {
        self.score >= max_score
    }

    /// Evaluate all four LED rules against the current state.
    pub fn compute_display_pattern(&mut self) -> DisplayPattern {
        let score = self.score;
        let mut pattern = DisplayPattern::OFF;

        // LED 0
        pattern = pattern.with_led(0, score % 2 == 1);

        // LED 1
        let led1_off = score < 4 || (score > 7 && score < 12);
        pattern = pattern.with_led(1, !led1_off);

        // LED 2
        let led2 = match self.encoding_counter {
            0 | 1 => false,
            2 => true,
            _ => {
                self.encoding_counter = 0;
                true
            }
        };
        pattern = pattern.with_led(2, led2);

        // LED 3
        pattern = pattern.with_led(3, score >= 8);

        pattern
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
