//! # Match Controller
//!
//! Owns both score states and drives the table through its match cycle:
//!
//! ```text
//! Active ──(p1 reaches max)──► Player1Won ──celebrate──┐
//!   │    ──(p2 reaches max)──► Player2Won ──celebrate──┤
//!   └─────(reset button)──────────────────────────────►├─► Resetting ──wait+flash──► Active
//! ```
//!
//! Each call to [`MatchController::step`] performs exactly one cycle of the
//! current state. Everything runs on the caller's thread; delays block.

use serde::{Deserialize, Serialize};

use super::animation;
use super::clock::{Clock, Millis};
use super::detector::GoalDetector;
use super::hardware::{DisplayDriver, ResetSignal, SensorReader};
use super::score::{DisplayPattern, PlayerScoreState};
use super::types::{PlayerSide, SensorReading};
use crate::config::{DisplayRefresh, ScorerConfig};
use crate::error::ConfigError;
use crate::telemetry::{format_sensor_dump, SignalLevel, Telemetry, SENSOR_DUMP_REQUEST};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    #[default]
    Active,
    Player1Won,
    Player2Won,
    Resetting,
}

impl MatchState {
    pub fn won_by(side: PlayerSide) -> Self {
        match side {
            PlayerSide::One => MatchState::Player1Won,
            PlayerSide::Two => MatchState::Player2Won,
        }
    }

    pub fn winner(self) -> Option<PlayerSide> {
        match self {
            MatchState::Player1Won => Some(PlayerSide::One),
            MatchState::Player2Won => Some(PlayerSide::Two),
            MatchState::Active | MatchState::Resetting => None,
        }
    }
}

/// One credited goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalRecord {
    pub side: PlayerSide,
    /// Scorer's score after the goal
    pub score: u8,
    /// Active cycle (1-based) the goal was detected on
    pub cycle: u64,
    pub at_ms: Millis,
    /// Raw magnitude that crossed the threshold
    pub magnitude: u16,
    /// Scorer's bank once this cycle's refresh is done
    pub pattern: DisplayPattern,
}

/// What a single [`MatchController::step`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Active cycle with no goal
    Idle,
    Goal(GoalRecord),
    /// Goal that ended the match
    MatchWon(GoalRecord),
    /// Reset button seen; match abandoned
    ResetRequested,
    Celebrated(PlayerSide),
    ResetComplete,
}

/// Summary of a finished (or abandoned) match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub winner: Option<PlayerSide>,
    pub final_scores: [u8; 2],
    pub goals: Vec<GoalRecord>,
    pub cycles: u64,
    pub ended_by_reset: bool,
}

pub struct MatchController<S, D, R, C> {
    config: ScorerConfig,
    detector: GoalDetector,
    players: [PlayerScoreState; 2],
    patterns: [DisplayPattern; 2],
    state: MatchState,
    sensors: S,
    display: D,
    reset: R,
    clock: C,
    telemetry: Option<Box<dyn Telemetry>>,
    /// Last sample after goal clearing
    last_reading: SensorReading,
    /// Last sample as read
    last_raw: SensorReading,
    cycles: u64,
    goals: Vec<GoalRecord>,
    reset_requested: bool,
    matches_completed: u32,
}

impl<S, D, R, C> MatchController<S, D, R, C>
where
    S: SensorReader,
    D: DisplayDriver,
    R: ResetSignal,
    C: Clock,
{
    pub fn new(
        config: ScorerConfig,
        sensors: S,
        display: D,
        reset: R,
        clock: C,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            detector: GoalDetector::new(&config.detection),
            config,
            players: [PlayerScoreState::new(); 2],
            patterns: [DisplayPattern::OFF; 2],
            state: MatchState::Active,
            sensors,
            display,
            reset,
            clock,
            telemetry: None,
            last_reading: SensorReading::default(),
            last_raw: SensorReading::default(),
            cycles: 0,
            goals: Vec::new(),
            reset_requested: false,
            matches_completed: 0,
        })
    }

    pub fn with_telemetry<T: Telemetry + 'static>(mut self, telemetry: T) -> Self {
        self.telemetry = Some(Box::new(telemetry));
        self
    }

    // ========================
    // Accessors
    // ========================

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    pub fn player(&self, side: PlayerSide) -> &PlayerScoreState {
        &self.players[side.index()]
    }

    pub fn scores(&self) -> [u8; 2] {
        [self.players[0].score, self.players[1].score]
    }

    /// Pattern last pushed to a bank during play
    pub fn pattern(&self, side: PlayerSide) -> DisplayPattern {
        self.patterns[side.index()]
    }

    pub fn last_reading(&self) -> SensorReading {
        self.last_reading
    }

    pub fn matches_completed(&self) -> u32 {
        self.matches_completed
    }

    pub fn sensors(&self) -> &S {
        &self.sensors
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    // ========================
    // Lifecycle
    // ========================

    /// Startup light show (if enabled), then blank both banks.
    pub fn power_on(&mut self) {
        log::info!(
            "Scorer powered on: first to {}, threshold {}",
            self.config.rules.max_score,
            self.config.detection.threshold
        );
        if self.config.startup_light_show {
            animation::startup_light_show(
                &mut self.display,
                &mut self.clock,
                &self.config.timing,
                self.config.display.led_count,
            );
        }
        self.push_all_patterns();
    }

    /// Run one cycle of the current state.
    pub fn step(&mut self) -> CycleOutcome {
        match self.state {
            MatchState::Active => self.active_cycle(),
            MatchState::Player1Won | MatchState::Player2Won => self.celebrate_winner(),
            MatchState::Resetting => self.finish_reset(),
        }
    }

    /// Play until the match ends, run the celebration and reset, and
    /// return the match summary. Blocks forever if nobody scores and reset
    /// is never pressed.
    pub fn run_match(&mut self) -> MatchOutcome {
        loop {
            if let Some(outcome) = self.run_match_bounded(u64::MAX) {
                return outcome;
            }
        }
    }

    /// Like [`run_match`](Self::run_match) but gives up after `max_cycles`
    /// active cycles, leaving the match in progress.
    pub fn run_match_bounded(&mut self, max_cycles: u64) -> Option<MatchOutcome> {
        let mut played = 0u64;
        while self.state == MatchState::Active {
            if played >= max_cycles {
                return None;
            }
            self.step();
            played += 1;
        }
        let outcome = self.outcome();
        while self.state != MatchState::Active {
            self.step();
        }
        Some(outcome)
    }

    /// Summary of the current match so far
    pub fn outcome(&self) -> MatchOutcome {
        MatchOutcome {
            winner: self.state.winner(),
            final_scores: self.scores(),
            goals: self.goals.clone(),
            cycles: self.cycles,
            ended_by_reset: self.reset_requested,
        }
    }

    // ========================
    // States
    // ========================

    fn active_cycle(&mut self) -> CycleOutcome {
        if self.reset.is_reset_requested() {
            log::info!("Reset requested at {}-{}", self.players[0].score, self.players[1].score);
            self.reset_requested = true;
            self.state = MatchState::Resetting;
            return CycleOutcome::ResetRequested;
        }

        self.cycles += 1;
        let mut reading = self.sensors.read_sensors();
        self.last_raw = reading;
        log::trace!("cycle {}: v1={} v2={}", self.cycles, reading.v1, reading.v2);

        let now = self.clock.now_ms();
        let scored = self
            .detector
            .detect(&reading, now)
            .scorer()
            .and_then(|side| self.credit_goal(side, &mut reading, now));

        if self.config.display.refresh == DisplayRefresh::EveryCycle {
            self.refresh_pattern(PlayerSide::One);
            self.refresh_pattern(PlayerSide::Two);
        }
        let scored = scored.map(|record| self.record_goal(record));

        self.last_reading = reading;
        self.service_telemetry();

        if scored.is_some() {
            self.clock.delay_ms(self.detector.rearm_delay_ms());
        }

        match (scored, self.check_winner()) {
            (Some(record), Some(winner)) => {
                log::info!(
                    "{} wins {}-{}",
                    winner,
                    self.players[0].score,
                    self.players[1].score
                );
                self.state = MatchState::won_by(winner);
                CycleOutcome::MatchWon(record)
            }
            (Some(record), None) => CycleOutcome::Goal(record),
            (None, Some(winner)) => {
                self.state = MatchState::won_by(winner);
                CycleOutcome::Idle
            }
            (None, None) => CycleOutcome::Idle,
        }
    }

    /// Apply a detected goal. `None` when the score was already saturated.
    fn credit_goal(
        &mut self,
        side: PlayerSide,
        reading: &mut SensorReading,
        now: Millis,
    ) -> Option<GoalRecord> {
        let magnitude = reading.magnitude(side);
        reading.clear(side);

        let max_score = self.config.rules.max_score;
        if !self.players[side.index()].apply_goal(max_score) {
            return None;
        }

        if self.config.display.refresh == DisplayRefresh::OnGoal {
            self.refresh_pattern(side);
        }

        let record = GoalRecord {
            side,
            score: self.players[side.index()].score,
            cycle: self.cycles,
            at_ms: now,
            magnitude,
            pattern: self.patterns[side.index()],
        };
        Some(record)
    }

    /// Log and keep a credited goal. Runs after the display refresh so the
    /// record carries the LEDs actually shown.
    fn record_goal(&mut self, mut record: GoalRecord) -> GoalRecord {
        record.pattern = self.patterns[record.side.index()];
        log::debug!(
            "Goal {} -> {} (magnitude {}, leds {})",
            record.side,
            record.score,
            record.magnitude,
            record.pattern
        );
        self.goals.push(record);
        record
    }

    /// Player one is checked first.
    fn check_winner(&self) -> Option<PlayerSide> {
        let max_score = self.config.rules.max_score;
        PlayerSide::BOTH
            .into_iter()
            .find(|side| self.players[side.index()].has_reached(max_score))
    }

    fn celebrate_winner(&mut self) -> CycleOutcome {
        let Some(winner) = self.state.winner() else {
            return CycleOutcome::Idle;
        };
        animation::celebrate(
            &mut self.display,
            &mut self.clock,
            winner,
            &self.config.timing,
            self.config.display.led_count,
        );
        self.state = MatchState::Resetting;
        CycleOutcome::Celebrated(winner)
    }

    fn finish_reset(&mut self) -> CycleOutcome {
        self.clock.delay_ms(self.config.timing.end_game_wait_ms);
        log::debug!("Reset flash ({} ms)", self.config.timing.reset_flash_total_ms());
        animation::reset_flash(&mut self.display, &mut self.clock, &self.config.timing);

        for player in &mut self.players {
            player.reset();
        }
        self.detector.reset();
        self.goals.clear();
        self.cycles = 0;
        self.reset_requested = false;
        self.last_reading = SensorReading::default();
        self.last_raw = SensorReading::default();
        self.matches_completed += 1;
        self.state = MatchState::Active;
        self.push_all_patterns();

        log::info!("Scores reset; match {} starting", self.matches_completed + 1);
        CycleOutcome::ResetComplete
    }

    // ========================
    // Display / telemetry
    // ========================

    fn refresh_pattern(&mut self, side: PlayerSide) {
        let pattern = self.players[side.index()].compute_display_pattern();
        self.patterns[side.index()] = pattern;
        self.display.set_pattern(side, pattern);
    }

    fn push_all_patterns(&mut self) {
        for side in PlayerSide::BOTH {
            self.refresh_pattern(side);
        }
    }

    fn service_telemetry(&mut self) {
        let Some(link) = self.telemetry.as_deref_mut() else {
            return;
        };
        if link.poll_request() == Some(SENSOR_DUMP_REQUEST) {
            link.send_line(&format_sensor_dump(self.last_reading.v1));
        }
        // The status LED follows the most recent conversion, player two's sensor.
        link.indicate_signal(SignalLevel::from_magnitude(self.last_raw.v2));
    }
}
