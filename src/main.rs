//! Basketball Bouncer headless runner
//!
//! Loads levels and settings, then plays the game with a simple autopilot
//! standing in for the keyboard. Progress goes to the log.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;

use bouncer::consts::{MAX_SUBSTEPS, SIM_DT};
use bouncer::sim::{GamePhase, PaddleMove, RunOutcome, Session, TickInput, tick};
use bouncer::ui::{DisplaySink, Frame};
use bouncer::{DirectoryLevels, InMemoryLevels, LevelSource, Settings};

/// Wall-clock frame length the runner pretends to render at
const FRAME_DT: f32 = 1.0 / 30.0;

#[derive(Parser, Debug)]
#[command(name = "bouncer", about = "Run Basketball Bouncer with an autopilot")]
struct Args {
    /// Directory holding maps/lvl_NN.txt and colors/lvl_NN_color.txt (built-in levels if omitted)
    #[arg(long)]
    levels: Option<PathBuf>,
    /// JSON settings file (defaults are used if it cannot be read)
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Stop after this many frames
    #[arg(long, default_value_t = 30 * 300)]
    frames: u32,
    /// Log a HUD line every N frames (0 disables)
    #[arg(long, default_value_t = 150)]
    hud_every: u32,
}

/// Logs overlay changes and a periodic HUD line
struct LogSink {
    hud_every: u32,
    frames: u32,
    last_overlay: Option<String>,
}

impl DisplaySink for LogSink {
    fn present(&mut self, frame: &Frame) {
        if frame.overlay != self.last_overlay {
            if let Some(text) = &frame.overlay {
                log::info!("\n{text}");
            }
            self.last_overlay = frame.overlay.clone();
        }
        self.frames += 1;
        if self.hud_every > 0 && self.frames % self.hud_every == 0 && frame.overlay.is_none() {
            log::info!(
                "[tick {}] {} | {} | {} blocks",
                frame.tick,
                frame.score_text,
                frame.lives_text,
                frame.blocks.len()
            );
        }
    }
}

/// Runner state: session plus the fixed-timestep accumulator
struct Game {
    state: Session,
    accumulator: f32,
    input: TickInput,
}

impl Game {
    fn new(state: Session) -> Self {
        Self {
            state,
            accumulator: 0.0,
            input: TickInput::default(),
        }
    }

    /// Run simulation ticks covering `dt` seconds of wall time
    fn update(&mut self, dt: f32, levels: &dyn LevelSource) {
        self.accumulator += dt.min(0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.autopilot();
            // Inputs are one-shot: each tick consumes what was gathered before it
            let input = std::mem::take(&mut self.input);
            tick(&mut self.state, &input, levels, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            for event in &self.state.events {
                log::debug!("{event:?}");
            }
        }
    }

    /// Press keys the way a patient player would
    fn autopilot(&mut self) {
        match self.state.phase {
            // One run only: don't start over once a result is in
            GamePhase::StartScreen => self.input.action = self.state.last_result.is_none(),
            GamePhase::LevelComplete { .. } => self.input.action = true,
            GamePhase::Playing { .. } => {
                let Some(ball) = self.state.balls.first() else {
                    return;
                };
                if !ball.is_moving() {
                    self.input.action = true;
                    return;
                }
                // Keep the paddle's center under the ball
                let paddle = &self.state.paddle;
                let offset = ball.center_x() - (paddle.pos.x + paddle.width / 2.0);
                if offset > paddle.speed / 2.0 {
                    self.input.paddle_moves.push(PaddleMove::Right);
                } else if offset < -paddle.speed / 2.0 {
                    self.input.paddle_moves.push(PaddleMove::Left);
                }
            }
            GamePhase::GameOver { .. } | GamePhase::LevelLoadFailed { .. } => {}
        }
    }

    /// A run has ended and the runner should stop
    fn finished(&self) -> bool {
        self.state.last_result.is_some()
    }
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let settings = args
        .settings
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();

    let levels: Box<dyn LevelSource> = match &args.levels {
        Some(dir) => {
            if !dir.is_dir() {
                bail!("{} is not a directory", dir.display());
            }
            Box::new(DirectoryLevels::new(dir))
        }
        None => Box::new(InMemoryLevels::demo()),
    };

    let level_ids = levels.level_ids();
    if level_ids.is_empty() {
        bail!("no playable levels found");
    }
    log::info!("Levels: {level_ids:?}");

    let mut game = Game::new(Session::new(settings, level_ids));
    let mut sink = LogSink {
        hud_every: args.hud_every,
        frames: 0,
        last_overlay: None,
    };

    for _ in 0..args.frames {
        game.update(FRAME_DT, levels.as_ref());
        sink.present(&Frame::capture(&game.state));
        if game.finished() {
            break;
        }
    }

    match game.state.last_result {
        Some(result) => {
            let verdict = match result.outcome {
                RunOutcome::Won => "won",
                RunOutcome::Lost => "lost",
                RunOutcome::Abandoned => "abandoned",
                RunOutcome::LoadFailed => "stopped on a bad level",
            };
            log::info!(
                "Run {verdict}: score {}, high score {}",
                result.score,
                result.high_score
            );
        }
        None => log::info!(
            "Stopped after {} ticks, score {}",
            game.state.time_ticks,
            game.state.score
        ),
    }

    Ok(())
}
