//! Display snapshots and HUD text
//!
//! Drawing is someone else's job. Each tick the session is captured into a
//! [`Frame`] (rectangles, colors and text) and handed to a [`DisplaySink`].

use serde::{Deserialize, Serialize};

use crate::sim::{Aabb, GamePhase, RunOutcome, RunResult, Session};
use crate::theme::Color;

pub const BACKGROUND_COLOR: Color = Color::BLACK;
pub const PADDLE_COLOR: Color = Color::WHITE;
/// Basketball orange
pub const BALL_COLOR: Color = Color::new(238, 103, 48);

/// A filled rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub bounds: Aabb,
    pub color: Color,
}

/// Everything a display needs for one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub tick: u64,
    pub background: Color,
    pub balls: Vec<Sprite>,
    pub paddle: Sprite,
    /// Live blocks only, shaded by remaining health
    pub blocks: Vec<Sprite>,
    pub score_text: String,
    pub lives_text: String,
    /// Full-screen message for non-playing phases
    pub overlay: Option<String>,
}

impl Frame {
    pub fn capture(session: &Session) -> Self {
        let shade = session.blocks.shade_context(session.base_color);
        let playing = matches!(session.phase, GamePhase::Playing { .. });

        // Off the playfield the overlay text replaces the scene
        let (balls, blocks) = if playing {
            (
                session
                    .balls
                    .iter()
                    .map(|b| Sprite {
                        bounds: b.bounds(),
                        color: BALL_COLOR,
                    })
                    .collect(),
                session
                    .blocks
                    .blocks()
                    .iter()
                    .map(|b| Sprite {
                        bounds: b.bounds,
                        color: b.shade(&shade),
                    })
                    .collect(),
            )
        } else {
            (Vec::new(), Vec::new())
        };

        Self {
            tick: session.time_ticks,
            background: BACKGROUND_COLOR,
            balls,
            paddle: Sprite {
                bounds: session.paddle.bounds(),
                color: PADDLE_COLOR,
            },
            blocks,
            score_text: score_text(session.score),
            lives_text: lives_text(session.lives),
            overlay: overlay_text(session),
        }
    }
}

/// Receives one frame per tick
pub trait DisplaySink {
    fn present(&mut self, frame: &Frame);
}

pub fn score_text(score: u64) -> String {
    format!("Score: {score}")
}

pub fn lives_text(lives: u32) -> String {
    format!("Lives remaining: {lives}")
}

pub fn start_screen_text(lives: u32, high_score: u64) -> String {
    format!(
        "Welcome to Basketball Bouncer!\n\
         \n\
         Break as many blocks with the ball as you can to score points.\n\
         If the ball hits the bottom edge, you lose a life!\n\
         (You start with {lives} lives.)\n\
         \n\
         Move the paddle with your left and right arrow keys\n\
         so that the ball doesn't hit the floor.\n\
         \n\
         High score: {high_score}\n\
         \n\
         Press SPACE to start!"
    )
}

pub fn level_complete_text(level: u32) -> String {
    format!("Level {level} complete!\n\nPress SPACE to continue")
}

pub fn ending_text(won: bool, new_high_score: bool, high_score: u64, score: u64) -> String {
    let mut text = String::from(if won {
        "Congratulations, you won!!\n\n"
    } else {
        "Game Over\n\n"
    });
    text.push_str(&format!("Your score: {score}\nHigh score: {high_score}\n"));
    if new_high_score {
        text.push_str("\nNew high score!\n");
    }
    text.push_str("\nPress SPACE to restart.");
    text
}

fn overlay_text(session: &Session) -> Option<String> {
    let high_score = session.high_score.get();
    match session.phase {
        GamePhase::Playing { .. } => None,
        GamePhase::LevelComplete { level } => Some(level_complete_text(level)),
        GamePhase::GameOver { won } => {
            let new_high = session.last_result.is_some_and(|r| r.new_high_score);
            Some(ending_text(won, new_high, high_score, session.score))
        }
        GamePhase::LevelLoadFailed { level } => Some(format!(
            "Level {level} could not be loaded.\n\nPress SPACE to return to the start screen."
        )),
        GamePhase::StartScreen => {
            let mut text = String::new();
            if let Some(result) = session.last_result {
                text.push_str(&last_run_text(&result));
                text.push_str("\n\n");
            }
            text.push_str(&start_screen_text(session.settings.starting_lives, high_score));
            Some(text)
        }
    }
}

fn last_run_text(result: &RunResult) -> String {
    let verdict = match result.outcome {
        RunOutcome::Won => "Congratulations, you won!!",
        RunOutcome::Lost => "Game Over",
        RunOutcome::Abandoned => "Run abandoned",
        RunOutcome::LoadFailed => "Run stopped: level could not be loaded",
    };
    let mut text = format!("{verdict}\nYour score: {}", result.score);
    if result.new_high_score {
        text.push_str("\nNew high score!");
    }
    text
}
