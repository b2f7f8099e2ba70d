//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (blocks in grid order)
//! - No rendering or platform dependencies

pub mod ball;
pub mod block;
pub mod geometry;
pub mod paddle;
pub mod state;
pub mod tick;

pub use ball::Ball;
pub use block::{Block, BlockField, BlockHit, CONTACT_GAP, ShadeContext};
pub use geometry::{Aabb, intersects, overlap_x, overlap_y};
pub use paddle::Paddle;
pub use state::{GameEvent, GamePhase, RunOutcome, RunResult, Session};
pub use tick::{PaddleMove, TickInput, tick};
