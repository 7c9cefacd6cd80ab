//! Host-side stand-ins for the table hardware.
//!
//! Recorded sensor traces, a seeded noise generator, a scripted reset
//! button and a display that records every command. Used by the CLI and
//! the integration tests.

use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::engine::constants::SENSOR_FULL_SCALE;
use crate::engine::hardware::{DisplayDriver, ResetSignal, SensorReader};
use crate::engine::score::DisplayPattern;
use crate::engine::types::{PlayerSide, SensorReading};
use crate::error::{Result, ScorerError};

// ========================
// Recorded traces
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceMarker {
    /// Reset button pressed before the next sample
    Reset,
}

/// One line of a trace file: `[v1, v2]` or `"reset"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraceEntry {
    Sample([u16; 2]),
    Marker(TraceMarker),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SensorTrace {
    samples: Vec<SensorReading>,
    /// Sample index each reset press happens before
    resets: Vec<usize>,
}

impl SensorTrace {
    pub fn from_entries(entries: &[TraceEntry]) -> Result<Self> {
        let mut trace = SensorTrace::default();
        for entry in entries {
            match *entry {
                TraceEntry::Sample([v1, v2]) => trace.samples.push(SensorReading::new(v1, v2)),
                TraceEntry::Marker(TraceMarker::Reset) => trace.resets.push(trace.samples.len()),
            }
        }
        if trace.samples.is_empty() {
            return Err(ScorerError::EmptyTrace);
        }
        Ok(trace)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<TraceEntry> = serde_json::from_str(json)?;
        Self::from_entries(&entries)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let trace = Self::from_json_str(&json)?;
        log::debug!(
            "Loaded trace {}: {} samples, {} resets",
            path.display(),
            trace.samples.len(),
            trace.resets.len()
        );
        Ok(trace)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[SensorReading] {
        &self.samples
    }

    pub fn reset_positions(&self) -> &[usize] {
        &self.resets
    }

    /// Sensor and reset-button halves of the trace
    pub fn into_parts(self) -> (ScriptedSensors, ScriptedReset) {
        (ScriptedSensors::new(self.samples), ScriptedReset::new(self.resets))
    }
}

/// Replays recorded samples, then reads zero on both sensors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedSensors {
    samples: Vec<SensorReading>,
    next: usize,
}

impl ScriptedSensors {
    pub fn new(samples: Vec<SensorReading>) -> Self {
        Self { samples, next: 0 }
    }

    pub fn from_pairs<I: IntoIterator<Item = (u16, u16)>>(pairs: I) -> Self {
        Self::new(pairs.into_iter().map(SensorReading::from).collect())
    }

    pub fn reads(&self) -> usize {
        self.next
    }

    pub fn remaining(&self) -> usize {
        self.samples.len().saturating_sub(self.next)
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}

impl SensorReader for ScriptedSensors {
    fn read_sensors(&mut self) -> SensorReading {
        let reading = self.samples.get(self.next).copied().unwrap_or_default();
        self.next += 1;
        reading
    }
}

/// Presses reset before the listed sample indices.
///
/// The controller polls reset once per active cycle and reads the sensors
/// only when no reset was seen, so counting quiet polls tracks the sample
/// position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScriptedReset {
    before_sample: Vec<usize>,
    quiet_polls: usize,
    next: usize,
}

impl ScriptedReset {
    pub fn new(mut before_sample: Vec<usize>) -> Self {
        before_sample.sort_unstable();
        Self { before_sample, quiet_polls: 0, next: 0 }
    }
}

impl ResetSignal for ScriptedReset {
    fn is_reset_requested(&mut self) -> bool {
        if self.before_sample.get(self.next) == Some(&self.quiet_polls) {
            self.next += 1;
            return true;
        }
        self.quiet_polls += 1;
        false
    }
}

// ========================
// Synthetic sensors
// ========================

/// Noise generator settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticConfig {
    pub seed: u64,
    /// Chance per read that a ball breaks one of the beams
    pub goal_rate: f64,
    /// Highest value of the background noise
    pub noise_ceiling: u16,
    /// Lowest value of a goal spike
    pub spike_floor: u16,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self { seed: 42, goal_rate: 0.02, noise_ceiling: 150, spike_floor: 600 }
    }
}

/// Seeded noisy sensors with occasional goal spikes. Same seed, same readings.
#[derive(Debug, Clone)]
pub struct SyntheticSensors {
    rng: ChaCha8Rng,
    config: SyntheticConfig,
}

impl SyntheticSensors {
    pub fn new(config: SyntheticConfig) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(config.seed), config }
    }

    fn noise(&mut self) -> u16 {
        self.rng.gen_range(0..=self.config.noise_ceiling)
    }
}

impl SensorReader for SyntheticSensors {
    fn read_sensors(&mut self) -> SensorReading {
        let mut reading = SensorReading::new(self.noise(), self.noise());
        if self.rng.gen_bool(self.config.goal_rate.clamp(0.0, 1.0)) {
            let floor = self.config.spike_floor.min(SENSOR_FULL_SCALE);
            let spike = self.rng.gen_range(floor..=SENSOR_FULL_SCALE);
            if self.rng.gen_bool(0.5) {
                reading.v1 = spike;
            } else {
                reading.v2 = spike;
            }
        }
        reading
    }
}

// ========================
// Recording display
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayCommand {
    Set { side: PlayerSide, pattern: DisplayPattern },
    AllOn,
    AllOff,
}

/// Display driver that remembers every command and the current bank state.
#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    commands: Vec<DisplayCommand>,
    current: [DisplayPattern; 2],
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DisplayCommand] {
        &self.commands
    }

    pub fn pattern(&self, side: PlayerSide) -> DisplayPattern {
        self.current[side.index()]
    }

    /// Number of `all_on` commands seen
    pub fn flash_count(&self) -> usize {
        self.commands.iter().filter(|cmd| matches!(cmd, DisplayCommand::AllOn)).count()
    }

    /// Patterns pushed to one bank, in order
    pub fn patterns_for(&self, side: PlayerSide) -> Vec<DisplayPattern> {
        self.commands
            .iter()
            .filter_map(|cmd| match *cmd {
                DisplayCommand::Set { side: s, pattern } if s == side => Some(pattern),
                _ => None,
            })
            .collect()
    }

    pub fn clear_history(&mut self) {
        self.commands.clear();
    }
}

impl DisplayDriver for RecordingDisplay {
    fn set_pattern(&mut self, side: PlayerSide, pattern: DisplayPattern) {
        self.current[side.index()] = pattern;
        self.commands.push(DisplayCommand::Set { side, pattern });
    }

    fn all_on(&mut self) {
        self.current = [DisplayPattern::ALL_ON; 2];
        self.commands.push(DisplayCommand::AllOn);
    }

    fn all_off(&mut self) {
        self.current = [DisplayPattern::OFF; 2];
        self.commands.push(DisplayCommand::AllOff);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_parses_samples_and_resets() {
        let trace = SensorTrace::from_json_str(r#"[[0, 0], [500, 0], "reset", [0, 700]]"#).unwrap();
        assert_eq!(trace.len(), 3);
        assert_eq!(trace.reset_positions(), &[2]);
        assert_eq!(trace.samples()[1], SensorReading::new(500, 0));
    }

    #[test]
    fn test_empty_trace_rejected() {
        let err = SensorTrace::from_json_str(r#"["reset"]"#).unwrap_err();
        assert!(matches!(err, ScorerError::EmptyTrace));
    }

    #[test]
    fn test_bad_trace_entry_rejected() {
        assert!(matches!(
            SensorTrace::from_json_str(r#"[[1, 2, 3]]"#),
            Err(ScorerError::Json(_))
        ));
    }

    #[test]
    fn test_scripted_sensors_run_dry_to_zero() {
        let mut sensors = ScriptedSensors::from_pairs([(5, 6)]);
        assert_eq!(sensors.read_sensors(), SensorReading::new(5, 6));
        assert!(sensors.is_exhausted());
        assert_eq!(sensors.read_sensors(), SensorReading::default());
        assert_eq!(sensors.reads(), 2);
    }

    #[test]
    fn test_scripted_reset_counts_quiet_polls() {
        let mut reset = ScriptedReset::new(vec![2, 2]);
        assert!(!reset.is_reset_requested());
        assert!(!reset.is_reset_requested());
        assert!(reset.is_reset_requested());
        assert!(reset.is_reset_requested());
        assert!(!reset.is_reset_requested());
    }

    #[test]
    fn test_synthetic_sensors_deterministic() {
        let config = SyntheticConfig { seed: 7, goal_rate: 0.3, ..SyntheticConfig::default() };
        let mut a = SyntheticSensors::new(config);
        let mut b = SyntheticSensors::new(config);
        for _ in 0..200 {
            assert_eq!(a.read_sensors(), b.read_sensors());
        }
    }

    #[test]
    fn test_synthetic_noise_stays_below_ceiling_without_goals() {
        let config = SyntheticConfig { goal_rate: 0.0, ..SyntheticConfig::default() };
        let mut sensors = SyntheticSensors::new(config);
        for _ in 0..500 {
            let r = sensors.read_sensors();
            assert!(r.v1 <= 150 && r.v2 <= 150);
        }
    }

    #[test]
    fn test_recording_display_tracks_state() {
        let mut display = RecordingDisplay::new();
        display.set_pattern(PlayerSide::Two, DisplayPattern::from_bits(0b0101));
        display.all_on();
        assert_eq!(display.pattern(PlayerSide::One), DisplayPattern::ALL_ON);
        display.all_off();
        assert_eq!(display.flash_count(), 1);
        assert_eq!(display.patterns_for(PlayerSide::Two), vec![DisplayPattern::from_bits(0b0101)]);
    }
}
