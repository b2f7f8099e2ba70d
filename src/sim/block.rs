//! Destructible blocks and the field that holds them
//!
//! Blocks live in an ordered `Vec` (grid row-major order) and the scan for
//! ball contacts always walks it front to back. A ball resolves against at
//! most one block per tick: the first block it overlaps takes the hit and the
//! rest are left for later ticks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::geometry::{Aabb, intersects, overlap_x, overlap_y};
use crate::level::LevelGrid;
use crate::settings::Settings;
use crate::theme::Color;

/// Clearance left between a block and a ball pushed out of it
///
/// Intersection uses closed intervals, so a ball placed flush against a
/// block would still count as touching it.
pub const CONTACT_GAP: f32 = 0.01;

/// Darkest shade a block can reach, as a fraction of the base color
const MIN_BRIGHTNESS: f32 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub bounds: Aabb,
    /// Hits left before the block breaks
    pub health: u32,
}

/// What a block's color is derived from
///
/// Passed in explicitly so blocks need no link back to the field or level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadeContext {
    pub base: Color,
    /// Highest starting health in the field; maps to full brightness
    pub max_health: u32,
}

impl Block {
    pub fn new(bounds: Aabb, health: u32) -> Self {
        Self { bounds, health }
    }

    pub fn is_broken(&self) -> bool {
        self.health == 0
    }

    /// Whether the ball is touching a block that can still take hits
    pub fn check_if_should_bounce(&self, ball: &Ball) -> bool {
        self.health > 0 && intersects(&ball.bounds(), &self.bounds)
    }

    /// Reflect the ball off this block and push it clear of it
    ///
    /// The axis with the shallower penetration is the one that was hit. An
    /// exact tie is a corner hit and reflects (and pushes out along) both axes.
    pub fn bounce_ball(&self, ball: Ball) -> Ball {
        let ball_box = ball.bounds();
        let depth_x = overlap_x(&ball_box, &self.bounds);
        let depth_y = overlap_y(&ball_box, &self.bounds);

        if depth_x < depth_y {
            self.push_out_x(ball).reverse_x()
        } else if depth_y < depth_x {
            self.push_out_y(ball).reverse_y()
        } else {
            self.push_out_y(self.push_out_x(ball)).reverse_x().reverse_y()
        }
    }

    fn push_out_x(&self, ball: Ball) -> Ball {
        let x = if ball.pos.x < self.bounds.left() {
            self.bounds.left() - ball.size - CONTACT_GAP
        } else {
            self.bounds.right() + CONTACT_GAP
        };
        Ball {
            pos: Vec2::new(x, ball.pos.y),
            ..ball
        }
    }

    fn push_out_y(&self, ball: Ball) -> Ball {
        let y = if ball.pos.y < self.bounds.top() {
            self.bounds.top() - ball.size - CONTACT_GAP
        } else {
            self.bounds.bottom() + CONTACT_GAP
        };
        Ball {
            pos: Vec2::new(ball.pos.x, y),
            ..ball
        }
    }

    /// Take one point of damage
    pub fn hit_block_actions(self) -> Self {
        Self {
            health: self.health.saturating_sub(1),
            ..self
        }
    }

    /// Fill color for the block's current health
    pub fn shade(&self, ctx: &ShadeContext) -> Color {
        let max = ctx.max_health.max(1) as f32;
        let fraction = (self.health as f32 / max).clamp(0.0, 1.0);
        ctx.base.scaled(MIN_BRIGHTNESS + (1.0 - MIN_BRIGHTNESS) * fraction)
    }
}

/// Outcome of a ball striking a block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockHit {
    /// Position of the block in the field at the time of the hit
    pub index: usize,
    /// The block after taking damage
    pub block: Block,
}

impl BlockHit {
    pub fn broke(&self) -> bool {
        self.block.is_broken()
    }
}

/// The blocks of the current level, in scan order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockField {
    blocks: Vec<Block>,
    max_health: u32,
}

impl BlockField {
    /// Lay out a level grid over the top part of the field
    ///
    /// Each column gets an equal share of the field width and each row an
    /// equal share of the block area. Cells with zero health are left empty.
    pub fn from_grid(grid: &LevelGrid, settings: &Settings) -> Self {
        let width = settings.field_width / grid.cols() as f32;
        let height = settings.field_height * settings.block_area_fraction / grid.rows() as f32;
        let size = Vec2::new(width, height);

        let blocks = grid
            .cells()
            .filter(|&(_, _, health)| health > 0)
            .map(|(row, col, health)| {
                let pos = Vec2::new(col as f32 * width, row as f32 * height);
                Block::new(Aabb::new(pos, size), health)
            })
            .collect();

        Self::from_blocks(blocks)
    }

    /// Build a field from explicit blocks; broken ones are dropped
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        let blocks: Vec<Block> = blocks.into_iter().filter(|b| !b.is_broken()).collect();
        let max_health = blocks.iter().map(|b| b.health).max().unwrap_or(0);
        Self { blocks, max_health }
    }

    /// Resolve the ball against the first block it touches, if any
    ///
    /// The struck block loses one health and is removed on breaking.
    pub fn resolve_ball(&mut self, ball: Ball) -> (Ball, Option<BlockHit>) {
        let Some(index) = self.blocks.iter().position(|b| b.check_if_should_bounce(&ball)) else {
            return (ball, None);
        };

        let block = self.blocks[index];
        let ball = block.bounce_ball(ball);
        let block = block.hit_block_actions();

        if block.is_broken() {
            self.blocks.remove(index);
        } else {
            self.blocks[index] = block;
        }

        (ball, Some(BlockHit { index, block }))
    }

    /// True once every block has been broken
    pub fn is_cleared(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn shade_context(&self, base: Color) -> ShadeContext {
        ShadeContext {
            base,
            max_health: self.max_health,
        }
    }
}
