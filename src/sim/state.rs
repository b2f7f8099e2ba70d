//! Session state and core simulation types
//!
//! Everything the tick function reads or writes lives in [`Session`].

use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::block::BlockField;
use super::paddle::Paddle;
use crate::highscores::HighScore;
use crate::level::LevelSource;
use crate::settings::Settings;
use crate::theme::{Color, resolve_base_color};

/// Where the session is in its lifecycle
///
/// Each variant carries only what makes sense in that phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the player to start a run
    StartScreen,
    /// Ball in play on the given level
    Playing { level: u32 },
    /// Every block on the level is broken; waiting to continue
    LevelComplete { level: u32 },
    /// Run ended
    ///
    /// Play only ever ends here by losing. A won run returns straight to
    /// [`GamePhase::StartScreen`] and is reported through `Session::last_result`.
    GameOver { won: bool },
    /// The level's data could not be used; the run cannot continue
    LevelLoadFailed { level: u32 },
}

/// How a run came to an end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    Won,
    Lost,
    Abandoned,
    LoadFailed,
}

/// Summary of the most recently finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    pub outcome: RunOutcome,
    pub score: u64,
    pub high_score: u64,
    pub new_high_score: bool,
}

/// Things that happened during a tick, for the display and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted { level: u32 },
    BlockHit { index: usize, health_left: u32 },
    BlockBroken { index: usize },
    LifeLost { lives_left: u32 },
    LevelCleared { level: u32 },
    LevelLoadFailed { level: u32 },
    GameWon { score: u64 },
    GameLost { score: u64 },
    Abandoned { score: u64 },
    NewHighScore { score: u64 },
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub settings: Settings,
    pub phase: GamePhase,
    pub lives: u32,
    pub score: u64,
    pub high_score: HighScore,
    /// Playable level numbers, in order
    pub levels: Vec<u32>,
    pub paddle: Paddle,
    pub balls: Vec<Ball>,
    pub blocks: BlockField,
    /// Base block color of the current level
    pub base_color: Color,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub last_result: Option<RunResult>,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl Session {
    /// A fresh session on the start screen
    pub fn new(settings: Settings, levels: Vec<u32>) -> Self {
        Self {
            lives: settings.starting_lives,
            score: 0,
            high_score: HighScore::new(),
            phase: GamePhase::StartScreen,
            levels,
            paddle: Paddle::spawn(&settings),
            balls: vec![Ball::spawn(&settings)],
            blocks: BlockField::default(),
            base_color: Color::GRAY,
            time_ticks: 0,
            last_result: None,
            events: Vec::new(),
            settings,
        }
    }

    /// A fresh session playing through every level the source offers
    pub fn with_source(settings: Settings, source: &dyn LevelSource) -> Self {
        Self::new(settings, source.level_ids())
    }

    /// Back to the start screen with a clean run; the high score survives
    pub fn reinitialize(&mut self) {
        self.lives = self.settings.starting_lives;
        self.score = 0;
        self.phase = GamePhase::StartScreen;
        self.paddle = Paddle::spawn(&self.settings);
        self.balls = vec![Ball::spawn(&self.settings)];
        self.blocks = BlockField::default();
        self.base_color = Color::GRAY;
    }

    pub fn first_level(&self) -> Option<u32> {
        self.levels.first().copied()
    }

    /// The level after `level` in play order, if any
    pub fn next_level(&self, level: u32) -> Option<u32> {
        let pos = self.levels.iter().position(|&id| id == level)?;
        self.levels.get(pos + 1).copied()
    }

    /// Build the given level and start playing it
    ///
    /// Paddle and ball are recreated at their start positions. If the level's
    /// layout cannot be used the run stops in [`GamePhase::LevelLoadFailed`].
    pub fn start_level(&mut self, level: u32, source: &dyn LevelSource) {
        let grid = match source.grid(level) {
            Ok(grid) => grid,
            Err(e) => {
                log::warn!("Level {level} cannot be played: {e}");
                self.phase = GamePhase::LevelLoadFailed { level };
                self.events.push(GameEvent::LevelLoadFailed { level });
                self.finish_run(RunOutcome::LoadFailed);
                return;
            }
        };

        self.blocks = BlockField::from_grid(&grid, &self.settings);
        self.base_color = resolve_base_color(source, level);
        self.paddle = Paddle::spawn(&self.settings);
        self.balls = vec![Ball::spawn(&self.settings)];
        self.phase = GamePhase::Playing { level };
        self.events.push(GameEvent::LevelStarted { level });

        log::info!(
            "Level {level}: {}x{} grid, {} blocks, color {}",
            grid.rows(),
            grid.cols(),
            self.blocks.len(),
            self.base_color.to_hex()
        );
    }

    /// Launch every waiting ball, as long as lives remain
    pub fn launch(&mut self) {
        if self.lives == 0 {
            return;
        }
        for ball in &mut self.balls {
            if !ball.is_moving() {
                *ball = ball.start_motion();
            }
        }
    }

    /// Put the paddle and all balls back at their start positions
    pub fn reset_positions(&mut self) {
        self.paddle = self.paddle.reset();
        for ball in &mut self.balls {
            *ball = ball.reset();
        }
    }

    /// Record the end of a run against the high score
    pub fn finish_run(&mut self, outcome: RunOutcome) {
        let score = self.score;
        let new_high_score = self.high_score.commit(score);
        if new_high_score {
            log::info!("New high score: {score}");
            self.events.push(GameEvent::NewHighScore { score });
        }
        self.last_result = Some(RunResult {
            outcome,
            score,
            high_score: self.high_score.get(),
            new_high_score,
        });
    }
}
