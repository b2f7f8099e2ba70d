//! The player's paddle
//!
//! Moves horizontally in fixed steps, one per input event, and never leaves
//! the field. Its height on screen is fixed for the whole level.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Distance covered by one move event
    pub speed: f32,
    /// Bottom-center start position for the level
    pub start: Vec2,
}

impl Paddle {
    pub fn new(start: Vec2, width: f32, height: f32, speed: f32) -> Self {
        Self {
            pos: start,
            width,
            height,
            speed,
            start,
        }
    }

    /// The level's paddle, centered near the bottom of the field
    pub fn spawn(settings: &Settings) -> Self {
        let start = Vec2::new(
            (settings.field_width - settings.paddle_width) / 2.0,
            settings.field_height / 15.0 * 14.0 - settings.paddle_height / 2.0,
        );
        Self::new(
            start,
            settings.paddle_width,
            settings.paddle_height,
            settings.paddle_speed,
        )
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(self.width, self.height))
    }

    /// One step left, stopping exactly at x = 0
    pub fn move_left(self) -> Self {
        let x = (self.pos.x - self.speed).max(0.0);
        Self {
            pos: Vec2::new(x, self.pos.y),
            ..self
        }
    }

    /// One step right, stopping exactly at the right edge
    pub fn move_right(self, field_width: f32) -> Self {
        let limit = (field_width - self.width).max(0.0);
        let x = (self.pos.x + self.speed).min(limit);
        Self {
            pos: Vec2::new(x, self.pos.y),
            ..self
        }
    }

    pub fn reset(self) -> Self {
        Self {
            pos: self.start,
            ..self
        }
    }
}
