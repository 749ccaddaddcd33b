//! Game Configuration
//!
//! Tuning constants in human units, plus the fixed-point `Tuning`
//! the simulation actually runs on. Conversion happens once, when a
//! session is built.

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::core::fixed::{Fixed, FIXED_MAX_INT, from_int, to_fixed};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A size or speed that must be positive was not.
    #[error("{field} must be positive")]
    NonPositive {
        /// Offending field name
        field: &'static str,
    },

    /// Gravity must be zero or positive (positive pulls down).
    #[error("gravity must not be negative")]
    NegativeGravity,

    /// A value does not fit in the fixed-point world range.
    #[error("{field} exceeds the representable world range")]
    OutOfRange {
        /// Offending field name
        field: &'static str,
    },

    /// JSON could not be parsed.
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tuning constants for a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Edge length of a grid cell in world units.
    pub tile_size: u32,
    /// Viewport width; the camera keeps the player centered in it.
    pub viewport_width: u32,
    /// Viewport height; a player whose top edge passes it has fallen off.
    pub viewport_height: u32,
    /// Added to the player's vertical velocity every tick.
    pub gravity: f64,
    /// Horizontal run speed per tick.
    pub player_speed: f64,
    /// Magnitude of the upward jump impulse.
    pub jump_impulse: f64,
    /// Patrol speed magnitude for enemies.
    pub enemy_speed: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_size: 32,
            viewport_width: 800,
            viewport_height: 600,
            gravity: 0.8,
            player_speed: 5.0,
            jump_impulse: 15.0,
            enemy_speed: 2.0,
        }
    }
}

impl GameConfig {
    /// Parse from JSON. Missing fields take their default.
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every field is usable by the simulation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("tile_size", self.tile_size),
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
        ];
        for (field, value) in sizes {
            if value == 0 {
                return Err(ConfigError::NonPositive { field });
            }
            if value > FIXED_MAX_INT as u32 {
                return Err(ConfigError::OutOfRange { field });
            }
        }

        let speeds = [
            ("player_speed", self.player_speed),
            ("jump_impulse", self.jump_impulse),
            ("enemy_speed", self.enemy_speed),
        ];
        for (field, value) in speeds {
            // Checked after conversion: anything below one fixed-point step
            // truncates to zero (NaN converts to zero as well).
            if to_fixed(value) <= 0 {
                return Err(ConfigError::NonPositive { field });
            }
            if value > f64::from(self.tile_size) {
                return Err(ConfigError::OutOfRange { field });
            }
        }

        if self.gravity.is_nan() || self.gravity < 0.0 {
            return Err(ConfigError::NegativeGravity);
        }
        if self.gravity > f64::from(self.tile_size) {
            return Err(ConfigError::OutOfRange { field: "gravity" });
        }

        Ok(())
    }

    /// Convert to fixed-point. Call only on a validated config.
    pub fn tuning(&self) -> Tuning {
        Tuning {
            tile_size: from_int(self.tile_size as i32),
            viewport_width: from_int(self.viewport_width as i32),
            viewport_height: from_int(self.viewport_height as i32),
            gravity: to_fixed(self.gravity),
            player_speed: to_fixed(self.player_speed),
            jump_velocity: -to_fixed(self.jump_impulse),
            enemy_speed: to_fixed(self.enemy_speed),
        }
    }
}

/// Fixed-point constants used inside the tick loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tuning {
    /// Grid cell edge length
    pub tile_size: Fixed,
    /// Viewport width
    pub viewport_width: Fixed,
    /// Viewport height (fall-off threshold)
    pub viewport_height: Fixed,
    /// Per-tick gravity
    pub gravity: Fixed,
    /// Run speed magnitude
    pub player_speed: Fixed,
    /// Jump velocity (negative = up)
    pub jump_velocity: Fixed,
    /// Patrol speed magnitude
    pub enemy_speed: Fixed,
}

impl Default for Tuning {
    fn default() -> Self {
        GameConfig::default().tuning()
    }
}
