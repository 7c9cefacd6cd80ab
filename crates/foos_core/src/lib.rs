//! # foos_core - Foosball Goal Detection and LED Scoreboard Engine
//!
//! Two beam sensors watch the goals; two 4-LED banks show each player's
//! score. This crate turns noisy analog samples into debounced goals,
//! encodes scores onto the LED banks and sequences each match through
//! play, celebration and reset.
//!
//! ## Features
//! - Strict-threshold goal detection with a post-goal re-arm window
//! - Fixed player-one-first tie-break
//! - The table's own 4-bit LED code (not plain binary)
//! - Single-threaded, blocking, deterministic on a `ManualClock`
//!
//! Hardware stays behind the `SensorReader`, `DisplayDriver` and
//! `ResetSignal` traits.

pub mod config;
pub mod engine;
pub mod error;
pub mod sim;
pub mod telemetry;

pub use config::{
    AnimationTiming, DetectionConfig, DisplayConfig, DisplayRefresh, MatchRules, ScorerConfig,
};
pub use engine::{
    Clock, CycleOutcome, DisplayDriver, DisplayPattern, GoalDetector, GoalEvent, GoalRecord,
    ManualClock, MatchController, MatchOutcome, MatchState, NoResetButton, PlayerScoreState,
    PlayerSide, ResetSignal, SensorReader, SensorReading, SystemClock,
};
pub use error::{ConfigError, Result, ScorerError};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
