//! Arena configuration
//!
//! Gameplay knobs that are not part of the arena's fixed tessellation. Loaded
//! from JSON; any missing field falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Tunable arena setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Seed for ball placement
    pub seed: u64,

    // === Balls ===
    pub ball_count: u32,
    pub ball_radius: f32,
    /// Spawn speed range (units per tick)
    pub ball_min_speed: f32,
    pub ball_max_speed: f32,
    /// Speed above which a ball is damped each step
    pub max_velocity: f32,

    // === Bricks ===
    pub brick_rows: u32,
    pub brick_columns: u32,
    /// Score for each destroyed brick
    pub brick_value: u64,

    // === Pads ===
    pub pad_count: u32,
    /// Pad rotation per tick at full input (radians)
    pub pad_speed: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            seed: 1,

            ball_count: 1,
            ball_radius: 0.5,
            ball_min_speed: 0.1,
            ball_max_speed: 0.3,
            max_velocity: 0.5,

            brick_rows: 4,
            brick_columns: 10,
            brick_value: 25,

            pad_count: 3,
            pad_speed: 0.05,
        }
    }
}

impl ArenaConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded arena config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Outer radius of the last brick row
    pub fn bricks_outer_radius(&self) -> f32 {
        BRICK_DISTANCE + self.brick_rows as f32 * BRICK_WIDTH
    }

    /// Radial band `(min, max)` for ball centers between the bricks and the pads
    pub fn spawn_band(&self) -> (f32, f32) {
        (
            self.bricks_outer_radius() + self.ball_radius,
            PAD_DISTANCE - self.ball_radius,
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if !(self.ball_radius > 0.0) {
            return invalid(format!("ball_radius must be positive, got {}", self.ball_radius));
        }
        if !(self.ball_min_speed >= 0.0) || !(self.ball_max_speed >= self.ball_min_speed) {
            return invalid(format!(
                "ball speed range {}..{} is empty or negative",
                self.ball_min_speed, self.ball_max_speed
            ));
        }
        if !(self.max_velocity > 0.0) {
            return invalid(format!("max_velocity must be positive, got {}", self.max_velocity));
        }
        if !self.pad_speed.is_finite() {
            return invalid("pad_speed must be finite".to_string());
        }
        let fits = |count: u32, width: u32| {
            count
                .checked_mul(width)
                .is_some_and(|segments| segments <= SEGMENTS)
        };
        if !fits(self.brick_columns, BRICK_SEGMENTS) {
            return invalid(format!(
                "{} brick columns do not fit in {SEGMENTS} segments",
                self.brick_columns
            ));
        }
        if !fits(self.pad_count, PAD_SEGMENTS) {
            return invalid(format!("{} pads do not fit in {SEGMENTS} segments", self.pad_count));
        }
        if self.bricks_outer_radius() > PAD_DISTANCE {
            return invalid(format!(
                "{} brick rows reach past the pads at {PAD_DISTANCE}",
                self.brick_rows
            ));
        }
        let (min, max) = self.spawn_band();
        if self.ball_count > 0 && min >= max {
            return invalid(format!(
                "no room for balls between bricks ({min}) and pads ({max})"
            ));
        }
        Ok(())
    }
}
