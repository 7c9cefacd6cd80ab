//! LED sequences: power-on show, winner celebration, reset flash.
//!
//! Sequences block on the clock between steps and never overlap.

use super::clock::Clock;
use super::hardware::DisplayDriver;
use super::score::DisplayPattern;
use super::types::PlayerSide;
use crate::config::AnimationTiming;

/// Chase one bank: light LEDs 0..n one by one, hold, then clear them in
/// the same order. Repeats `celebration_repeat_count` times.
pub fn celebrate<D, C>(
    display: &mut D,
    clock: &mut C,
    side: PlayerSide,
    timing: &AnimationTiming,
    led_count: u8,
) where
    D: DisplayDriver + ?Sized,
    C: Clock + ?Sized,
{
    for _ in 0..timing.celebration_repeat_count {
        let mut pattern = DisplayPattern::OFF;
        for led in 0..led_count {
            pattern = pattern.with_led(led, true);
            display.set_pattern(side, pattern);
            clock.delay_ms(timing.led_on_step_ms);
        }
        clock.delay_ms(timing.hold_ms);
        for led in 0..led_count {
            pattern = pattern.with_led(led, false);
            display.set_pattern(side, pattern);
            clock.delay_ms(timing.led_off_step_ms);
        }
    }
}

/// Power-on show: player one's celebration, a short hold, then player two's.
pub fn startup_light_show<D, C>(
    display: &mut D,
    clock: &mut C,
    timing: &AnimationTiming,
    led_count: u8,
) where
    D: DisplayDriver + ?Sized,
    C: Clock + ?Sized,
{
    celebrate(display, clock, PlayerSide::One, timing, led_count);
    clock.delay_ms(timing.hold_ms);
    celebrate(display, clock, PlayerSide::Two, timing, led_count);
}

/// Flash both banks fully on and off. Leaves every LED off.
pub fn reset_flash<D, C>(display: &mut D, clock: &mut C, timing: &AnimationTiming)
where
    D: DisplayDriver + ?Sized,
    C: Clock + ?Sized,
{
    for _ in 0..timing.reset_flash_count {
        display.all_on();
        clock.delay_ms(timing.reset_flash_ms);
        display.all_off();
        clock.delay_ms(timing.reset_flash_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::clock::ManualClock;
    use crate::sim::{DisplayCommand, RecordingDisplay};

    #[test]
    fn test_celebration_chase_order() {
        let mut display = RecordingDisplay::new();
        let mut clock = ManualClock::new();
        let timing = AnimationTiming { celebration_repeat_count: 1, ..AnimationTiming::default() };

        celebrate(&mut display, &mut clock, PlayerSide::One, &timing, 4);

        let bits: Vec<u8> = display
            .commands()
            .iter()
            .map(|cmd| match cmd {
                DisplayCommand::Set { side: PlayerSide::One, pattern } => pattern.bits(),
                other => panic!("unexpected command {:?}", other),
            })
            .collect();
        assert_eq!(
            bits,
            vec![0b0001, 0b0011, 0b0111, 0b1111, 0b1110, 0b1100, 0b1000, 0b0000]
        );
        assert_eq!(clock.total_delay_ms(), 50);
    }

    #[test]
    fn test_celebration_default_timing() {
        let mut display = RecordingDisplay::new();
        let mut clock = ManualClock::new();
        let timing = AnimationTiming::default();

        celebrate(&mut display, &mut clock, PlayerSide::Two, &timing, 4);

        assert_eq!(display.commands().len(), 4 * 8);
        assert_eq!(clock.total_delay_ms(), timing.celebration_ms(4));
        assert_eq!(display.pattern(PlayerSide::Two), DisplayPattern::OFF);
    }

    #[test]
    fn test_startup_show_plays_both_sides() {
        let mut display = RecordingDisplay::new();
        let mut clock = ManualClock::new();
        let timing = AnimationTiming::default();

        startup_light_show(&mut display, &mut clock, &timing, 4);

        let first_two = display
            .commands()
            .iter()
            .position(|cmd| matches!(cmd, DisplayCommand::Set { side: PlayerSide::Two, .. }))
            .unwrap();
        assert_eq!(first_two, 4 * 8);
        assert_eq!(clock.total_delay_ms(), 2 * timing.celebration_ms(4) + timing.hold_ms);
    }

    #[test]
    fn test_reset_flash() {
        let mut display = RecordingDisplay::new();
        let mut clock = ManualClock::new();
        let timing = AnimationTiming::default();

        reset_flash(&mut display, &mut clock, &timing);

        assert_eq!(display.flash_count(), 4);
        assert_eq!(clock.total_delay_ms(), 800);
        assert_eq!(display.pattern(PlayerSide::One), DisplayPattern::OFF);
        assert_eq!(display.pattern(PlayerSide::Two), DisplayPattern::OFF);
    }
}
