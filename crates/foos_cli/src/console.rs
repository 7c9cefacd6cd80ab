//! Terminal stand-in for the two LED banks.

use foos_core::{DisplayDriver, DisplayPattern, PlayerSide};

/// Prints a line whenever a bank changes. Animation frames are counted,
/// not printed, unless `show_frames` is set.
pub struct ConsoleDisplay {
    banks: [DisplayPattern; 2],
    show_frames: bool,
    frames: u64,
}

impl ConsoleDisplay {
    pub fn new(show_frames: bool) -> Self {
        Self { banks: [DisplayPattern::OFF; 2], show_frames, frames: 0 }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn render(&self) -> String {
        format!("P1 {}  P2 {}", self.banks[0], self.banks[1])
    }

    fn emit(&mut self) {
        self.frames += 1;
        if self.show_frames {
            println!("   {}", self.render());
        }
    }
}

impl DisplayDriver for ConsoleDisplay {
    fn set_pattern(&mut self, side: PlayerSide, pattern: DisplayPattern) {
        if self.banks[side.index()] != pattern {
            self.banks[side.index()] = pattern;
            self.emit();
        }
    }

    fn all_on(&mut self) {
        self.banks = [DisplayPattern::ALL_ON; 2];
        self.emit();
    }

    fn all_off(&mut self) {
        self.banks = [DisplayPattern::OFF; 2];
        self.emit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_changes_count_as_frames() {
        let mut display = ConsoleDisplay::new(false);
        display.set_pattern(PlayerSide::One, DisplayPattern::from_bits(0b0001));
        display.set_pattern(PlayerSide::One, DisplayPattern::from_bits(0b0001));
        assert_eq!(display.frames(), 1);
        assert_eq!(display.render(), "P1 ○○○●  P2 ○○○○");
    }
}
