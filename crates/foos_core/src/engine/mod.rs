//! # Scoring Engine
//!
//! Sensor samples flow one way per cycle:
//!
//! ```text
//! SensorReader → GoalDetector → PlayerScoreState → DisplayPattern → DisplayDriver
//! ```
//!
//! `MatchController` runs the cycle and owns every state transition.

pub mod animation;
pub mod clock;
pub mod constants;
pub mod controller;
pub mod detector;
pub mod hardware;
pub mod score;
pub mod types;

pub use clock::{Clock, ManualClock, Millis, SystemClock};
pub use controller::{CycleOutcome, GoalRecord, MatchController, MatchOutcome, MatchState};
pub use detector::GoalDetector;
pub use hardware::{DisplayDriver, NoResetButton, ResetSignal, SensorReader};
pub use score::{DisplayPattern, PlayerScoreState};
pub use types::{GoalEvent, PlayerSide, SensorReading};
