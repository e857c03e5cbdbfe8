//! Game balance and field configuration
//!
//! Every number the simulation reads lives here so a run can be re-tuned from
//! a JSON file without recompiling. Missing fields fall back to `consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tuning load/validation errors
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is outside the range the simulation can use
    #[error("Invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Avatar ===
    pub avatar_x: f32,
    pub avatar_width: f32,
    pub avatar_height: f32,
    pub gravity: f32,
    pub jump_velocity: f32,
    pub max_fall_speed: f32,
    pub min_tap_interval_ms: u64,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub base_speed: f32,
    pub spawn_spacing: f32,
    pub min_gap: f32,
    pub max_gap: f32,
    pub gap_growth: f32,
    pub gap_margin: f32,

    // === Scoring ===
    pub points_per_obstacle: u32,
    pub milestone_interval: u32,
    pub speed_step: f32,

    // === Session ===
    pub countdown_from: i32,
    pub countdown_step_ms: u64,

    // === Cosmetics ===
    pub cloud_count: usize,
    pub effect_life_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            avatar_x: AVATAR_X,
            avatar_width: AVATAR_WIDTH,
            avatar_height: AVATAR_HEIGHT,
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            max_fall_speed: MAX_FALL_SPEED,
            min_tap_interval_ms: MIN_TAP_INTERVAL_MS,

            obstacle_width: OBSTACLE_WIDTH,
            base_speed: BASE_SPEED,
            spawn_spacing: SPAWN_SPACING,
            min_gap: MIN_GAP,
            max_gap: MAX_GAP,
            gap_growth: GAP_GROWTH,
            gap_margin: GAP_MARGIN,

            points_per_obstacle: POINTS_PER_OBSTACLE,
            milestone_interval: MILESTONE_INTERVAL,
            speed_step: SPEED_STEP,

            countdown_from: COUNTDOWN_FROM,
            countdown_step_ms: COUNTDOWN_STEP_MS,

            cloud_count: CLOUD_COUNT,
            effect_life_ticks: EFFECT_LIFE_TICKS,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&contents)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Pretty JSON for writing a starter file
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> TuningError {
            TuningError::Invalid { field, reason }
        }

        fn positive(v: f32) -> bool {
            v.is_finite() && v > 0.0
        }
        fn non_negative(v: f32) -> bool {
            v.is_finite() && v >= 0.0
        }

        if !positive(self.field_width) {
            return Err(invalid("field_width", "must be positive"));
        }
        if !positive(self.field_height) {
            return Err(invalid("field_height", "must be positive"));
        }
        if !non_negative(self.avatar_x) || self.avatar_x > self.field_width {
            return Err(invalid("avatar_x", "must lie inside the field"));
        }
        if !positive(self.avatar_width) || !positive(self.avatar_height) {
            return Err(invalid("avatar_width/avatar_height", "must be positive"));
        }
        if !self.gravity.is_finite() || !self.jump_velocity.is_finite() {
            return Err(invalid("gravity/jump_velocity", "must be finite"));
        }
        if !positive(self.max_fall_speed) {
            return Err(invalid("max_fall_speed", "must be positive"));
        }
        if !positive(self.obstacle_width) {
            return Err(invalid("obstacle_width", "must be positive"));
        }
        if !positive(self.base_speed) {
            return Err(invalid("base_speed", "must be positive"));
        }
        if !positive(self.spawn_spacing) {
            return Err(invalid("spawn_spacing", "must be positive"));
        }
        if !positive(self.min_gap) || !self.max_gap.is_finite() || self.min_gap > self.max_gap {
            return Err(invalid("min_gap", "must be positive and not above max_gap"));
        }
        if !non_negative(self.gap_growth) || !non_negative(self.speed_step) {
            return Err(invalid("gap_growth/speed_step", "must not be negative"));
        }
        if !non_negative(self.gap_margin) {
            return Err(invalid("gap_margin", "must not be negative"));
        }
        if self.milestone_interval == 0 {
            return Err(invalid("milestone_interval", "must be non-zero"));
        }
        if self.countdown_from < 0 {
            return Err(invalid("countdown_from", "must not be negative"));
        }
        if self.countdown_step_ms == 0 {
            return Err(invalid("countdown_step_ms", "must be non-zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.min_tap_interval_ms, 100);
        assert_eq!(tuning.countdown_from, 3);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 1200.0, "field_height": 480.0 }"#)
            .expect("partial tuning should parse");
        assert_eq!(tuning.gravity, 1200.0);
        assert_eq!(tuning.field_height, 480.0);
        assert_eq!(tuning.field_width, FIELD_WIDTH);
        assert_eq!(tuning.obstacle_width, OBSTACLE_WIDTH);
    }

    #[test]
    fn test_inverted_gap_rejected() {
        let err = Tuning::from_json(r#"{ "min_gap": 200.0, "max_gap": 150.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "min_gap", .. }));
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let cases = [
            (r#"{ "gap_margin": -10.0 }"#, "gap_margin"),
            (r#"{ "spawn_spacing": 0.0 }"#, "spawn_spacing"),
            (r#"{ "countdown_step_ms": 0 }"#, "countdown_step_ms"),
            (r#"{ "avatar_x": 500.0 }"#, "avatar_x"),
            (r#"{ "avatar_x": -1.0 }"#, "avatar_x"),
            (r#"{ "milestone_interval": 0 }"#, "milestone_interval"),
        ];
        for (json, expected) in cases {
            match Tuning::from_json(json) {
                Err(TuningError::Invalid { field, .. }) => assert_eq!(field, expected, "{json}"),
                other => panic!("{json} should be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_nan_rejected() {
        let tuning = Tuning {
            base_speed: f32::NAN,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Tuning::from_json("{ gravity: ").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_json_roundtrip_keeps_values() {
        let mut tuning = Tuning::default();
        tuning.base_speed = 3.5;
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }
}
