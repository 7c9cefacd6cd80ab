use thiserror::Error;

/// Rejected configuration knob.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Goal threshold {threshold} is outside the sensor range 0..={max}")]
    ThresholdOutOfRange { threshold: u16, max: u16 },

    #[error("Max score {max_score} cannot be shown on a {led_count}-LED bank (1..={limit})")]
    MaxScoreOutOfRange { max_score: u8, led_count: u8, limit: u8 },

    #[error("LED bank must have exactly {expected} LEDs, found {found}")]
    InvalidLedCount { expected: u8, found: u8 },

    #[error("Celebration repeat count must be at least 1")]
    ZeroCelebrationRepeats,

    #[error("Unknown profile: {0}")]
    UnknownProfile(String),
}

#[derive(Error, Debug)]
pub enum ScorerError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Sensor trace is empty")]
    EmptyTrace,
}

impl ScorerError {
    /// Errors a host can fix by editing a file and retrying.
    pub fn is_recoverable(&self) -> bool {
        match self {
            ScorerError::Config(_) => true,
            ScorerError::Json(_) => true,
            ScorerError::EmptyTrace => true,
            ScorerError::Io(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScorerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_message() {
        let err = ConfigError::MaxScoreOutOfRange { max_score: 20, led_count: 4, limit: 15 };
        assert_eq!(err.to_string(), "Max score 20 cannot be shown on a 4-LED bank (1..=15)");
    }

    #[test]
    fn test_config_error_wraps_into_scorer_error() {
        let err: ScorerError = ConfigError::ZeroCelebrationRepeats.into();
        assert!(err.is_recoverable());
        assert!(err.to_string().starts_with("Invalid configuration"));
    }
}
