//! The ball: motion plus wall and paddle bounce rules
//!
//! `Ball` is a plain value. Every operation consumes the current ball and
//! returns the next one, so a tick can be tested by feeding a ball in and
//! inspecting what comes out.
//!
//! Velocity is always either zero or `(±speed, ±speed)`: bounces only ever
//! negate a component, and the only way to start moving is [`Ball::start_motion`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use super::paddle::Paddle;
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    pub vel: Vec2,
    /// Edge length of the (square) bounding box
    pub size: f32,
    /// Per-axis speed used when launched
    pub speed: f32,
    /// Where the ball waits before launch and after a lost life
    pub start: Vec2,
}

impl Ball {
    /// A stationary ball resting at `start`
    pub fn new(start: Vec2, size: f32, speed: f32) -> Self {
        Self {
            pos: start,
            vel: Vec2::ZERO,
            size,
            speed,
            start,
        }
    }

    /// The level's ball: horizontally centered, at 7/9 of the field height
    pub fn spawn(settings: &Settings) -> Self {
        let start = Vec2::new(
            settings.field_width / 2.0,
            settings.field_height / 9.0 * 7.0,
        );
        Self::new(start, settings.ball_size, settings.ball_speed)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(self.size))
    }

    /// Horizontal center of the ball
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size / 2.0
    }

    /// Advance by one step of `dt` seconds. No bounds checks.
    pub fn moved(self, dt: f32) -> Self {
        Self {
            pos: self.pos + self.vel * dt,
            ..self
        }
    }

    /// Bounce off the left, right and top edges of the field
    ///
    /// A component is only flipped while the ball is still heading into the
    /// edge it touches, so a ball that has already turned around is left alone.
    pub fn bounce_off_walls(self, field_width: f32) -> Self {
        let mut vel = self.vel;
        let past_left = self.pos.x <= 0.0 && vel.x < 0.0;
        let past_right = self.pos.x + self.size >= field_width && vel.x > 0.0;
        if past_left || past_right {
            vel.x = -vel.x;
        }
        if self.pos.y <= 0.0 && vel.y < 0.0 {
            vel.y = -vel.y;
        }
        Self { vel, ..self }
    }

    /// Bounce up off the paddle's top edge
    ///
    /// Requires the ball's center to be over the paddle, its vertical extent
    /// to straddle the paddle's top, and downward motion.
    pub fn bounce_off_paddle(self, paddle: &Paddle) -> Self {
        let center_x = self.center_x();
        let over_paddle = paddle.pos.x <= center_x && center_x <= paddle.pos.x + paddle.width;
        let straddles_top = self.pos.y <= paddle.pos.y && self.pos.y + self.size >= paddle.pos.y;

        if over_paddle && straddles_top && self.vel.y > 0.0 {
            self.reverse_y()
        } else {
            self
        }
    }

    /// True once the ball's bottom edge reaches the floor
    pub fn is_contacting_floor(&self, field_height: f32) -> bool {
        self.pos.y + self.size >= field_height
    }

    /// Back to the start position, stationary
    pub fn reset(self) -> Self {
        Self {
            pos: self.start,
            vel: Vec2::ZERO,
            ..self
        }
    }

    /// Launch diagonally up and to the right
    pub fn start_motion(self) -> Self {
        Self {
            vel: Vec2::new(self.speed, -self.speed),
            ..self
        }
    }

    /// Freeze in place
    pub fn stop_motion(self) -> Self {
        Self {
            vel: Vec2::ZERO,
            ..self
        }
    }

    pub fn is_moving(&self) -> bool {
        self.vel != Vec2::ZERO
    }

    pub fn reverse_x(self) -> Self {
        Self {
            vel: Vec2::new(-self.vel.x, self.vel.y),
            ..self
        }
    }

    pub fn reverse_y(self) -> Self {
        Self {
            vel: Vec2::new(self.vel.x, -self.vel.y),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEED: f32 = 175.0;

    fn ball_at(x: f32, y: f32, vx: f32, vy: f32) -> Ball {
        Ball {
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
            ..Ball::new(Vec2::new(500.0, 500.0), 20.0, SPEED)
        }
    }

    fn paddle_at(x: f32, y: f32) -> Paddle {
        Paddle::new(Vec2::new(x, y), 150.0, 10.0, 30.0)
    }

    #[test]
    fn test_move_applies_velocity() {
        let ball = ball_at(100.0, 100.0, SPEED, -SPEED).moved(0.5);
        assert!((ball.pos.x - 187.5).abs() < 1e-4);
        assert!((ball.pos.y - 12.5).abs() < 1e-4);
    }

    #[test]
    fn test_left_wall_reverses_on_contact() {
        // Exactly on the boundary, still heading left
        let ball = ball_at(0.0, 300.0, -SPEED, SPEED).bounce_off_walls(1000.0);
        assert_eq!(ball.vel, Vec2::new(SPEED, SPEED));
    }

    #[test]
    fn test_left_wall_ignores_ball_moving_away() {
        let ball = ball_at(-2.0, 300.0, SPEED, SPEED).bounce_off_walls(1000.0);
        assert_eq!(ball.vel, Vec2::new(SPEED, SPEED));
    }

    #[test]
    fn test_right_wall_and_ceiling() {
        let ball = ball_at(985.0, 300.0, SPEED, SPEED).bounce_off_walls(1000.0);
        assert_eq!(ball.vel.x, -SPEED);

        let ball = ball_at(400.0, -1.0, SPEED, -SPEED).bounce_off_walls(1000.0);
        assert_eq!(ball.vel, Vec2::new(SPEED, SPEED));

        // Top-left corner flips both
        let ball = ball_at(0.0, 0.0, -SPEED, -SPEED).bounce_off_walls(1000.0);
        assert_eq!(ball.vel, Vec2::new(SPEED, SPEED));
    }

    #[test]
    fn test_no_floor_bounce() {
        let ball = ball_at(400.0, 760.0, SPEED, SPEED).bounce_off_walls(1000.0);
        assert_eq!(ball.vel, Vec2::new(SPEED, SPEED));
        assert!(ball.is_contacting_floor(750.0));
    }

    #[test]
    fn test_floor_contact_threshold() {
        assert!(!ball_at(0.0, 729.0, 0.0, 0.0).is_contacting_floor(750.0));
        assert!(ball_at(0.0, 730.0, 0.0, 0.0).is_contacting_floor(750.0));
    }

    #[test]
    fn test_paddle_bounce_when_descending() {
        let paddle = paddle_at(400.0, 695.0);
        let ball = ball_at(450.0, 680.0, SPEED, SPEED).bounce_off_paddle(&paddle);
        assert_eq!(ball.vel, Vec2::new(SPEED, -SPEED));
    }

    #[test]
    fn test_paddle_ignores_rising_ball() {
        let paddle = paddle_at(400.0, 695.0);
        let ball = ball_at(450.0, 680.0, SPEED, -SPEED).bounce_off_paddle(&paddle);
        assert_eq!(ball.vel, Vec2::new(SPEED, -SPEED));
    }

    #[test]
    fn test_paddle_requires_center_over_span() {
        let paddle = paddle_at(400.0, 695.0);
        // Center at 385, left of the paddle even though the box overlaps it
        let ball = ball_at(375.0, 680.0, SPEED, SPEED).bounce_off_paddle(&paddle);
        assert_eq!(ball.vel.y, SPEED);
        // Center exactly on the paddle's left edge counts
        let ball = ball_at(390.0, 680.0, SPEED, SPEED).bounce_off_paddle(&paddle);
        assert_eq!(ball.vel.y, -SPEED);
    }

    #[test]
    fn test_reset_and_launch() {
        let ball = ball_at(12.0, 34.0, -SPEED, SPEED).reset();
        assert_eq!(ball.pos, ball.start);
        assert!(!ball.is_moving());

        let ball = ball.start_motion();
        assert!(ball.is_moving());
        assert_eq!(ball.vel, Vec2::new(SPEED, -SPEED));

        let stopped = ball.moved(0.1).stop_motion();
        assert!(!stopped.is_moving());
        assert_ne!(stopped.pos, stopped.start);
    }

    #[test]
    fn test_spawn_position() {
        let ball = Ball::spawn(&Settings::default());
        assert_eq!(ball.pos, Vec2::new(500.0, 750.0 / 9.0 * 7.0));
        assert_eq!(ball.vel, Vec2::ZERO);
    }
}
