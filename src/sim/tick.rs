//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically.

use super::state::{GameEvent, GamePhase, RunOutcome, Session};
use crate::level::LevelSource;

/// Discrete paddle move request, one per key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddleMove {
    Left,
    Right,
}

/// Input events gathered since the previous tick
///
/// Every field is one-shot: the caller clears it after the tick consumes it.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Paddle moves in the order they were pressed
    pub paddle_moves: Vec<PaddleMove>,
    /// Start / launch / continue / restart, depending on the phase (space bar)
    pub action: bool,
    /// Drop the current run and return to the start screen
    pub abandon: bool,
    /// Put ball and paddle back at their start positions
    pub reset_positions: bool,
}

/// Advance the session by one fixed timestep
pub fn tick(state: &mut Session, input: &TickInput, levels: &dyn LevelSource, dt: f32) {
    state.events.clear();
    state.time_ticks += 1;

    if input.abandon {
        abandon(state);
        return;
    }

    match state.phase {
        GamePhase::StartScreen => {
            if input.action {
                match state.first_level() {
                    Some(level) => state.start_level(level, levels),
                    None => log::warn!("No levels available, staying on start screen"),
                }
            }
        }

        GamePhase::Playing { level } => {
            for mv in &input.paddle_moves {
                state.paddle = match mv {
                    PaddleMove::Left => state.paddle.move_left(),
                    PaddleMove::Right => state.paddle.move_right(state.settings.field_width),
                };
            }
            if input.reset_positions {
                state.reset_positions();
            }
            if input.action {
                state.launch();
            }
            step_playing(state, level, dt);
        }

        GamePhase::LevelComplete { level } => {
            if input.action {
                match state.next_level(level) {
                    Some(next) => state.start_level(next, levels),
                    None => {
                        // Every level cleared
                        log::info!("All levels cleared with score {}", state.score);
                        state.events.push(GameEvent::GameWon { score: state.score });
                        state.finish_run(RunOutcome::Won);
                        state.reinitialize();
                    }
                }
            }
        }

        GamePhase::GameOver { .. } | GamePhase::LevelLoadFailed { .. } => {
            if input.action {
                state.reinitialize();
            }
        }
    }
}

/// Move every ball through one tick of play
///
/// Per moving ball: walls, paddle, at most one block, move, then the floor.
fn step_playing(state: &mut Session, level: u32, dt: f32) {
    let width = state.settings.field_width;
    let height = state.settings.field_height;
    let mut out_of_lives = false;

    for i in 0..state.balls.len() {
        // A ball waiting for launch touches nothing
        if !state.balls[i].is_moving() {
            continue;
        }
        let ball = state.balls[i]
            .bounce_off_walls(width)
            .bounce_off_paddle(&state.paddle);

        let (ball, hit) = state.blocks.resolve_ball(ball);
        if let Some(hit) = hit {
            state.score += state.settings.score_increment;
            state.events.push(GameEvent::BlockHit {
                index: hit.index,
                health_left: hit.block.health,
            });
            if hit.broke() {
                log::debug!("Block {} broken, {} left", hit.index, state.blocks.len());
                state.events.push(GameEvent::BlockBroken { index: hit.index });
            }
        }

        let mut ball = ball.moved(dt);
        if ball.is_contacting_floor(height) {
            state.lives = state.lives.saturating_sub(1);
            state.events.push(GameEvent::LifeLost {
                lives_left: state.lives,
            });
            if state.lives > 0 {
                ball = ball.reset();
            } else {
                ball = ball.stop_motion();
                out_of_lives = true;
            }
        }
        state.balls[i] = ball;
    }

    if out_of_lives {
        log::info!("Game over on level {level} with score {}", state.score);
        state.phase = GamePhase::GameOver { won: false };
        state.events.push(GameEvent::GameLost { score: state.score });
        state.finish_run(RunOutcome::Lost);
        return;
    }

    if state.blocks.is_cleared() {
        log::info!("Level {level} complete, score {}", state.score);
        state.phase = GamePhase::LevelComplete { level };
        state.events.push(GameEvent::LevelCleared { level });
    }
}

/// Commit an in-progress run and return to the start screen
fn abandon(state: &mut Session) {
    match state.phase {
        GamePhase::Playing { .. } | GamePhase::LevelComplete { .. } => {
            log::info!("Run abandoned with score {}", state.score);
            state.events.push(GameEvent::Abandoned { score: state.score });
            state.finish_run(RunOutcome::Abandoned);
        }
        // Finished runs were already committed when they ended
        GamePhase::StartScreen | GamePhase::GameOver { .. } | GamePhase::LevelLoadFailed { .. } => {}
    }
    state.reinitialize();
}
