//! Data-driven game balance
//!
//! Loaded from JSON; any field left out keeps its default from [`crate::consts`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};
use crate::sim::DangerZone;

/// Balance values for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Scoring ===
    pub generate_score: u64,
    pub overcome_score: u64,
    pub ascension_bonus: u64,
    /// Highest level a ball can hold before ascending
    pub max_level: u32,

    // === Spawning ===
    pub spawn_cooldown: f32,
    pub spawn_height: f32,
    pub container_width: f32,
    pub ball_radius: f32,

    // === Danger ===
    /// `None` disables danger detection entirely
    pub danger_zone: Option<DangerZone>,
    pub danger_time_limit: f32,
    pub settle_speed: f32,

    // === Exit animations ===
    pub death_exit_duration: f32,
    pub ascension_exit_duration: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            generate_score: GENERATE_SCORE,
            overcome_score: OVERCOME_SCORE,
            ascension_bonus: ASCENSION_BONUS,
            max_level: MAX_LEVEL,

            spawn_cooldown: SPAWN_COOLDOWN,
            spawn_height: SPAWN_HEIGHT,
            container_width: CONTAINER_WIDTH,
            ball_radius: BALL_RADIUS,

            danger_zone: Some(DangerZone::new(
                Vec2::new(0.0, DANGER_LINE_TOP),
                Vec2::new(CONTAINER_WIDTH, DANGER_LINE_BOTTOM),
            )),
            danger_time_limit: DANGER_TIME_LIMIT,
            settle_speed: SETTLE_SPEED,

            death_exit_duration: DEATH_EXIT_DURATION,
            ascension_exit_duration: ASCENSION_EXIT_DURATION,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.danger_time_limit > 0.0) {
            return Err(invalid("danger_time_limit must be positive"));
        }
        if !(self.spawn_cooldown >= 0.0) {
            return Err(invalid("spawn_cooldown must not be negative"));
        }
        if !(self.death_exit_duration >= 0.0) || !(self.ascension_exit_duration >= 0.0) {
            return Err(invalid("exit durations must not be negative"));
        }
        if !(self.settle_speed >= 0.0) {
            return Err(invalid("settle_speed must not be negative"));
        }
        if !(self.ball_radius > 0.0) {
            return Err(invalid("ball_radius must be positive"));
        }
        if !(self.container_width > 2.0 * self.ball_radius) {
            return Err(invalid("container_width must fit at least one ball"));
        }
        if let Some(zone) = &self.danger_zone {
            if zone.min.x > zone.max.x || zone.min.y > zone.max.y {
                return Err(invalid("danger_zone min must not exceed max"));
            }
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> Error {
    Error::InvalidTuning(msg.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "max_level": 5, "overcome_score": 75 }"#).unwrap();
        assert_eq!(tuning.max_level, 5);
        assert_eq!(tuning.overcome_score, 75);
        assert_eq!(tuning.generate_score, GENERATE_SCORE);
        assert!(tuning.danger_zone.is_some());
    }

    #[test]
    fn test_null_zone_disables_danger() {
        let tuning = Tuning::from_json(r#"{ "danger_zone": null }"#).unwrap();
        assert!(tuning.danger_zone.is_none());
    }

    #[test]
    fn test_rejects_non_positive_time_limit() {
        let err = Tuning::from_json(r#"{ "danger_time_limit": 0.0 }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidTuning(_)));
    }

    #[test]
    fn test_rejects_inverted_zone() {
        let json = r#"{ "danger_zone": { "min": [10.0, 200.0], "max": [0.0, 100.0] } }"#;
        assert!(matches!(Tuning::from_json(json), Err(Error::InvalidTuning(_))));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(Tuning::from_json("{ nope"), Err(Error::Serde(_))));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Tuning::load("/definitely/not/here/tuning.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
