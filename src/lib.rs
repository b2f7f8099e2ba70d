//! Basketball Bouncer - a block-breaking arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collisions, lives, score, level progression)
//! - `level`: Level grids, validation and level sources
//! - `theme`: Per-level colors and health shading
//! - `ui`: Display snapshots and HUD text
//! - `settings`: Data-driven game configuration

pub mod highscores;
pub mod level;
pub mod settings;
pub mod sim;
pub mod theme;
pub mod ui;

pub use highscores::HighScore;
pub use level::{DirectoryLevels, InMemoryLevels, LevelError, LevelGrid, LevelSource};
pub use settings::Settings;
pub use theme::Color;

/// Game configuration constants (defaults for [`Settings`])
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 1000.0;
    pub const FIELD_HEIGHT: f32 = 750.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 20.0;
    /// Per-axis speed; the ball always moves diagonally at this rate
    pub const BALL_SPEED: f32 = 175.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 150.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Distance moved per input event
    pub const PADDLE_SPEED: f32 = 30.0;

    /// Portion of the field height (from the top) shared by all block rows
    pub const BLOCK_AREA_FRACTION: f32 = 0.4;
    /// Largest accepted grid dimension (rows or columns)
    pub const MAX_GRID_DIMENSION: usize = 50;

    /// Session defaults
    pub const STARTING_LIVES: u32 = 3;
    pub const SCORE_INCREMENT: u64 = 100;
}
