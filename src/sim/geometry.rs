//! Axis-aligned bounding boxes and overlap tests
//!
//! Every collider in the game (ball, paddle, blocks) is treated as an
//! axis-aligned rectangle. Intervals are closed: boxes that merely touch
//! along an edge count as overlapping.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle, positioned by its top-left corner
///
/// Screen coordinates: x grows to the right, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// True iff the two boxes overlap on both axes (touching edges included)
pub fn intersects(a: &Aabb, b: &Aabb) -> bool {
    a.right() >= b.left() && a.left() <= b.right() && a.bottom() >= b.top() && a.top() <= b.bottom()
}

/// Horizontal penetration depth
///
/// Only meaningful once [`intersects`] has confirmed an overlap.
pub fn overlap_x(a: &Aabb, b: &Aabb) -> f32 {
    a.right().min(b.right()) - a.left().max(b.left())
}

/// Vertical penetration depth
///
/// Only meaningful once [`intersects`] has confirmed an overlap.
pub fn overlap_y(a: &Aabb, b: &Aabb) -> f32 {
    a.bottom().min(b.bottom()) - a.top().max(b.top())
}
