//! Goal detection from raw beam-sensor magnitudes.
//!
//! ## Tie-break
//! Player one is checked first. If both sensors cross the threshold in the
//! same sample only player one is credited. This is a fixed priority, not
//! a fairness decision, and is kept because that's how the table scores.

use super::clock::Millis;
use super::types::{GoalEvent, PlayerSide, SensorReading};
use crate::config::DetectionConfig;

/// Threshold comparison plus the post-goal re-arm window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalDetector {
    threshold: u16,
    rearm_delay_ms: Millis,
    /// Detection is suppressed until this time after a goal
    rearm_at: Option<Millis>,
}

impl GoalDetector {
    pub fn new(config: &DetectionConfig) -> Self {
        Self {
            threshold: config.threshold,
            rearm_delay_ms: config.debounce_delay_ms,
            rearm_at: None,
        }
    }

    pub fn threshold(&self) -> u16 {
        self.threshold
    }

    pub fn rearm_delay_ms(&self) -> Millis {
        self.rearm_delay_ms
    }

    /// Strictly greater than; a reading equal to the threshold is no goal.
    pub fn is_triggered(&self, magnitude: u16) -> bool {
        magnitude > self.threshold
    }

    pub fn is_armed(&self, now: Millis) -> bool {
        self.rearm_at.map_or(true, |at| now >= at)
    }

    /// Evaluate one sample taken at `now`.
    ///
    /// On a goal the re-arm window starts and the caller must clear the
    /// triggering magnitude (`SensorReading::clear`) before the next read.
    pub fn detect(&mut self, reading: &SensorReading, now: Millis) -> GoalEvent {
        if !self.is_armed(now) {
            return GoalEvent::None;
        }
        self.rearm_at = None;

        let scorer = PlayerSide::BOTH
            .into_iter()
            .find(|&side| self.is_triggered(reading.magnitude(side)));

        match scorer {
            Some(side) => {
                self.rearm_at = Some(now.saturating_add(self.rearm_delay_ms));
                GoalEvent::scored(side)
            }
            None => GoalEvent::None,
        }
    }

    /// Forget any pending re-arm window (new match).
    pub fn reset(&mut self) {
        self.rearm_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> GoalDetector {
        GoalDetector::new(&DetectionConfig::default())
    }

    #[test]
    fn test_player_one_goal() {
        let mut d = detector();
        assert_eq!(d.detect(&SensorReading::new(500, 0), 0), GoalEvent::Player1Scored);
    }

    #[test]
    fn test_player_two_goal() {
        let mut d = detector();
        assert_eq!(d.detect(&SensorReading::new(12, 401), 0), GoalEvent::Player2Scored);
    }

    #[test]
    fn test_simultaneous_crossing_credits_player_one() {
        let mut d = detector();
        assert_eq!(d.detect(&SensorReading::new(500, 500), 0), GoalEvent::Player1Scored);
    }

    #[test]
    fn test_exact_threshold_is_not_a_goal() {
        let mut d = detector();
        assert_eq!(d.detect(&SensorReading::new(400, 400), 0), GoalEvent::None);
        assert_eq!(d.detect(&SensorReading::new(401, 0), 0), GoalEvent::Player1Scored);
    }

    #[test]
    fn test_rearm_window_suppresses_detection() {
        let mut d = detector();
        assert!(d.detect(&SensorReading::new(900, 0), 100).is_goal());
        assert!(!d.is_armed(120));
        assert_eq!(d.detect(&SensorReading::new(900, 0), 149), GoalEvent::None);
        assert_eq!(d.detect(&SensorReading::new(0, 900), 150), GoalEvent::Player2Scored);
    }

    #[test]
    fn test_reset_rearms_immediately() {
        let mut d = detector();
        d.detect(&SensorReading::new(900, 0), 0);
        d.reset();
        assert!(d.is_armed(1));
    }

    #[test]
    fn test_custom_threshold() {
        let config = DetectionConfig { threshold: 250, ..DetectionConfig::default() };
        let mut d = GoalDetector::new(&config);
        assert_eq!(d.detect(&SensorReading::new(300, 0), 0), GoalEvent::Player1Scored);
    }
}
