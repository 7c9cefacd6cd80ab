use serde::{Deserialize, Serialize};

/// Which end of the table.
///
/// Player one is always evaluated first, both for goal detection and for
/// the win check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlayerSide {
    #[default]
    One,
    Two,
}

impl PlayerSide {
    pub const BOTH: [PlayerSide; 2] = [PlayerSide::One, PlayerSide::Two];

    /// Array index (0 = One, 1 = Two)
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PlayerSide::One => 0,
            PlayerSide::Two => 1,
        }
    }

    /// Player number as printed on the table (1 or 2)
    #[inline]
    pub const fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

impl std::fmt::Display for PlayerSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player {}", self.number())
    }
}

/// One sample of both goal sensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SensorReading {
    /// Player one's goal sensor
    pub v1: u16,
    /// Player two's goal sensor
    pub v2: u16,
}

impl SensorReading {
    pub const fn new(v1: u16, v2: u16) -> Self {
        Self { v1, v2 }
    }

    pub fn magnitude(&self, side: PlayerSide) -> u16 {
        match side {
            PlayerSide::One => self.v1,
            PlayerSide::Two => self.v2,
        }
    }

    /// Zero the magnitude that triggered a goal so the same sample can't score twice.
    pub fn clear(&mut self, side: PlayerSide) {
        match side {
            PlayerSide::One => self.v1 = 0,
            PlayerSide::Two => self.v2 = 0,
        }
    }
}

impl From<(u16, u16)> for SensorReading {
    fn from((v1, v2): (u16, u16)) -> Self {
        Self { v1, v2 }
    }
}

/// Result of one detection cycle. At most one side scores per cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalEvent {
    #[default]
    None,
    Player1Scored,
    Player2Scored,
}

impl GoalEvent {
    pub fn scored(side: PlayerSide) -> Self {
        match side {
            PlayerSide::One => GoalEvent::Player1Scored,
            PlayerSide::Two => GoalEvent::Player2Scored,
        }
    }

    /// The side that scored, if any
    pub fn scorer(self) -> Option<PlayerSide> {
        match self {
            GoalEvent::None => None,
            GoalEvent::Player1Scored => Some(PlayerSide::One),
            GoalEvent::Player2Scored => Some(PlayerSide::Two),
        }
    }

    pub fn is_goal(self) -> bool {
        self != GoalEvent::None
    }
}
