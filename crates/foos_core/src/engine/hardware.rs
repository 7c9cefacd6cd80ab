//! Collaborator contracts at the hardware boundary.
//!
//! The engine never touches pins or ADC registers. It reads sensors, polls
//! the reset button and pushes logical LED patterns through these traits.

use super::score::DisplayPattern;
use super::types::{PlayerSide, SensorReading};

/// Source of goal-sensor samples.
///
/// Every call returns a fresh sample; a read may block until the
/// conversion completes.
pub trait SensorReader {
    fn read_sensors(&mut self) -> SensorReading;
}

impl<F> SensorReader for F
where
    F: FnMut() -> (u16, u16),
{
    fn read_sensors(&mut self) -> SensorReading {
        SensorReading::from(self())
    }
}

/// Output side of the two LED banks.
pub trait DisplayDriver {
    fn set_pattern(&mut self, side: PlayerSide, pattern: DisplayPattern);

    fn all_on(&mut self) {
        for side in PlayerSide::BOTH {
            self.set_pattern(side, DisplayPattern::ALL_ON);
        }
    }

    fn all_off(&mut self) {
        for side in PlayerSide::BOTH {
            self.set_pattern(side, DisplayPattern::OFF);
        }
    }
}

/// External "abandon this match" input, polled once per active cycle.
pub trait ResetSignal {
    fn is_reset_requested(&mut self) -> bool;
}

impl<F> ResetSignal for F
where
    F: FnMut() -> bool,
{
    fn is_reset_requested(&mut self) -> bool {
        self()
    }
}

/// Reset input for tables without a reset button.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResetButton;

impl ResetSignal for NoResetButton {
    fn is_reset_requested(&mut self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Bank([DisplayPattern; 2]);

    impl DisplayDriver for Bank {
        fn set_pattern(&mut self, side: PlayerSide, pattern: DisplayPattern) {
            self.0[side.index()] = pattern;
        }
    }

    #[test]
    fn test_closure_sensor_reader() {
        let mut samples = vec![(10u16, 20u16), (500, 0)].into_iter();
        let mut reader = move || samples.next().unwrap_or((0, 0));
        assert_eq!(reader.read_sensors(), SensorReading::new(10, 20));
        assert_eq!(reader.read_sensors(), SensorReading::new(500, 0));
        assert_eq!(reader.read_sensors(), SensorReading::new(0, 0));
    }

    #[test]
    fn test_default_all_on_all_off() {
        let mut bank = Bank([DisplayPattern::OFF; 2]);
        bank.all_on();
        assert_eq!(bank.0, [DisplayPattern::ALL_ON; 2]);
        bank.all_off();
        assert_eq!(bank.0, [DisplayPattern::OFF; 2]);
    }

    #[test]
    fn test_closure_reset_signal() {
        let mut presses = 0;
        let mut button = || {
            presses += 1;
            presses > 2
        };
        assert!(!button.is_reset_requested());
        assert!(!button.is_reset_requested());
        assert!(button.is_reset_requested());
        assert!(!NoResetButton.is_reset_requested());
    }
}
