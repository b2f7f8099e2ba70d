//! Game configuration
//!
//! Field size, object sizes and speeds, lives and scoring. Loaded from a JSON
//! file when one is given; any field left out keeps its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,
    /// Share of the field height (from the top) used for block rows
    pub block_area_fraction: f32,

    // === Ball ===
    pub ball_size: f32,
    /// Per-axis speed in pixels per second
    pub ball_speed: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Pixels moved per input event
    pub paddle_speed: f32,

    // === Session ===
    pub starting_lives: u32,
    pub score_increment: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            block_area_fraction: BLOCK_AREA_FRACTION,

            ball_size: BALL_SIZE,
            ball_speed: BALL_SPEED,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,

            starting_lives: STARTING_LIVES,
            score_increment: SCORE_INCREMENT,
        }
    }
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::validated)
    }

    /// Load settings from a file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {}: {e}, using default settings", path.display());
                Self::default()
            }
        }
    }

    /// Replace values that cannot produce a playable field with defaults
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        let positive = |v: f32, fallback: f32| if v.is_finite() && v > 0.0 { v } else { fallback };

        self.field_width = positive(self.field_width, defaults.field_width);
        self.field_height = positive(self.field_height, defaults.field_height);
        self.ball_size = positive(self.ball_size, defaults.ball_size);
        self.ball_speed = positive(self.ball_speed, defaults.ball_speed);
        self.paddle_width = positive(self.paddle_width, defaults.paddle_width)
            .min(self.field_width);
        self.paddle_height = positive(self.paddle_height, defaults.paddle_height);
        self.paddle_speed = positive(self.paddle_speed, defaults.paddle_speed);

        if !(self.block_area_fraction > 0.0 && self.block_area_fraction <= 1.0) {
            self.block_area_fraction = defaults.block_area_fraction;
        }
        if self.starting_lives == 0 {
            self.starting_lives = defaults.starting_lives;
        }
        self
    }
}
