//! # Scorer Configuration
//!
//! Every tuning knob of the table in one place.
//!
//! ## Presets
//!
//! | Profile | Difference from `standard` |
//! |---------|----------------------------|
//! | `standard` | first to 10, threshold 400 |
//! | `quick` | first to 5 |
//! | `long` | first to 15 (the most a bank can show) |
//! | `sensitive` | threshold 250, for dim lasers |
//!
//! ## Usage
//! ```rust
//! use foos_core::config::ScorerConfig;
//!
//! let config = ScorerConfig::default();
//! let quick = ScorerConfig::quick();
//! assert!(quick.rules.max_score < config.rules.max_score);
//! ```
//!
//! ## Environment Variables
//!
//! - `FOOS_PROFILE`: Select preset (standard, quick, long, sensitive)

mod detection_config;
mod display_config;
mod timing_config;

pub use detection_config::DetectionConfig;
pub use display_config::{DisplayConfig, DisplayRefresh};
pub use timing_config::AnimationTiming;

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::engine::constants::{DEFAULT_MAX_SCORE, DISPLAY_MAX_SCORE, NUM_LEDS, SENSOR_FULL_SCALE};
use crate::error::{ConfigError, Result};

pub const PROFILE_ENV: &str = "FOOS_PROFILE";

/// Match rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchRules {
    /// First player to reach this score wins
    pub max_score: u8,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self { max_score: DEFAULT_MAX_SCORE }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    pub detection: DetectionConfig,
    pub rules: MatchRules,
    pub timing: AnimationTiming,
    pub display: DisplayConfig,
    /// Play both celebrations once at power-on
    pub startup_light_show: bool,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            detection: DetectionConfig::default(),
            rules: MatchRules::default(),
            timing: AnimationTiming::default(),
            display: DisplayConfig::default(),
            startup_light_show: true,
        }
    }
}

impl ScorerConfig {
    pub fn standard() -> Self {
        Self::default()
    }

    pub fn quick() -> Self {
        let mut cfg = Self::default();
        cfg.rules.max_score = 5;
        cfg
    }

    pub fn long() -> Self {
        let mut cfg = Self::default();
        cfg.rules.max_score = DISPLAY_MAX_SCORE;
        cfg
    }

    pub fn sensitive() -> Self {
        let mut cfg = Self::default();
        cfg.detection.threshold = 250;
        cfg
    }

    pub fn from_profile(name: &str) -> std::result::Result<Self, ConfigError> {
        match name.trim().to_lowercase().as_str() {
            "" | "standard" => Ok(Self::standard()),
            "quick" => Ok(Self::quick()),
            "long" => Ok(Self::long()),
            "sensitive" => Ok(Self::sensitive()),
            other => Err(ConfigError::UnknownProfile(other.to_string())),
        }
    }

    /// Load from `FOOS_PROFILE` or use default
    pub fn from_env_or_default() -> Self {
        let profile = env::var(PROFILE_ENV).unwrap_or_default();
        Self::from_profile(&profile).unwrap_or_else(|err| {
            log::warn!("{}; falling back to standard profile", err);
            Self::standard()
        })
    }

    /// Parse and validate a JSON config. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let cfg = Self::from_json_str(&json)?;
        log::info!("Loaded scorer config from {}", path.display());
        Ok(cfg)
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.display.led_count != NUM_LEDS {
            return Err(ConfigError::InvalidLedCount {
                expected: NUM_LEDS,
                found: self.display.led_count,
            });
        }
        if self.detection.threshold > SENSOR_FULL_SCALE {
            return Err(ConfigError::ThresholdOutOfRange {
                threshold: self.detection.threshold,
                max: SENSOR_FULL_SCALE,
            });
        }
        if self.rules.max_score == 0 || self.rules.max_score > DISPLAY_MAX_SCORE {
            return Err(ConfigError::MaxScoreOutOfRange {
                max_score: self.rules.max_score,
                led_count: self.display.led_count,
                limit: DISPLAY_MAX_SCORE,
            });
        }
        if self.timing.celebration_repeat_count == 0 {
            return Err(ConfigError::ZeroCelebrationRepeats);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let cfg = ScorerConfig::default();
        assert_eq!(cfg.detection.threshold, 400);
        assert_eq!(cfg.rules.max_score, 10);
        assert_eq!(cfg.detection.debounce_delay_ms, 50);
        assert_eq!(cfg.timing.celebration_repeat_count, 4);
        assert!(cfg.startup_light_show);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        for name in ["standard", "quick", "long", "sensitive"] {
            let cfg = ScorerConfig::from_profile(name).unwrap();
            assert!(cfg.validate().is_ok(), "{} should validate", name);
        }
        assert_eq!(ScorerConfig::quick().rules.max_score, 5);
        assert_eq!(ScorerConfig::long().rules.max_score, 15);
        assert!(ScorerConfig::sensitive().detection.threshold < 400);
    }

    #[test]
    fn test_unknown_profile() {
        let err = ScorerConfig::from_profile("blitz").unwrap_err();
        assert_eq!(err, ConfigError::UnknownProfile("blitz".to_string()));
    }

    #[test]
    fn test_max_score_above_display_rejected() {
        let mut cfg = ScorerConfig::default();
        cfg.rules.max_score = 16;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::MaxScoreOutOfRange { max_score: 16, .. })
        ));
        cfg.rules.max_score = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_threshold_above_full_scale_rejected() {
        let mut cfg = ScorerConfig::default();
        cfg.detection.threshold = 2000;
        assert!(matches!(cfg.validate(), Err(ConfigError::ThresholdOutOfRange { .. })));
    }

    #[test]
    fn test_led_count_must_be_four() {
        let mut cfg = ScorerConfig::default();
        cfg.display.led_count = 8;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::InvalidLedCount { expected: 4, found: 8 })
        );
    }

    #[test]
    fn test_from_json_str_partial() {
        let cfg = ScorerConfig::from_json_str(r#"{"rules": {"max_score": 7}}"#).unwrap();
        assert_eq!(cfg.rules.max_score, 7);
        assert_eq!(cfg.detection.threshold, 400);
    }

    #[test]
    fn test_from_json_str_invalid_value() {
        let err = ScorerConfig::from_json_str(r#"{"rules": {"max_score": 40}}"#).unwrap_err();
        assert!(matches!(err, crate::error::ScorerError::Config(_)));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"detection": {{"threshold": 333}}, "startup_light_show": false}}"#)
            .unwrap();
        let cfg = ScorerConfig::from_json_file(file.path()).unwrap();
        assert_eq!(cfg.detection.threshold, 333);
        assert!(!cfg.startup_light_show);
    }

    #[test]
    fn test_config_serialization() {
        let cfg = ScorerConfig::quick();
        let json = serde_json::to_string(&cfg).unwrap();
        let parsed: ScorerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cfg);
    }
}
