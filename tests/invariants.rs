//! Properties that must hold for any sequence of play

use glam::Vec2;
use proptest::prelude::*;

use bouncer::consts::SIM_DT;
use bouncer::sim::{
    Aabb, Ball, Block, BlockField, GameEvent, GamePhase, PaddleMove, Session, TickInput,
    intersects, tick,
};
use bouncer::{InMemoryLevels, LevelGrid, Settings};

/// Random keyboard activity, minus abandon (which wipes the score on purpose)
fn arb_input() -> impl Strategy<Value = TickInput> {
    (0u8..8, 0u8..4, prop::bool::weighted(0.01)).prop_map(|(key, repeat, reset)| {
        let mut input = TickInput {
            reset_positions: reset,
            ..Default::default()
        };
        match key {
            0 => input.action = true,
            1 | 2 => input.paddle_moves = vec![PaddleMove::Left; repeat as usize],
            3 | 4 => input.paddle_moves = vec![PaddleMove::Right; repeat as usize],
            _ => {}
        }
        input
    })
}

fn dense_levels() -> InMemoryLevels {
    InMemoryLevels::new()
        .with_level(1, "1 2 1 2\n2 1 2 1\n1 1 1 1\n", Some("#00539b"))
        .with_level(2, "3 3 3\n0 1 0\n", None)
}

fn assert_axis_speed(ball: &Ball) {
    let speed = ball.speed;
    for v in [ball.vel.x, ball.vel.y] {
        assert!(v == 0.0 || v.abs() == speed, "velocity component {v} with speed {speed}");
    }
    // Never moving along only one axis
    assert_eq!(ball.vel.x == 0.0, ball.vel.y == 0.0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn velocity_stays_diagonal_at_fixed_speed(
        inputs in prop::collection::vec(arb_input(), 1..1500)
    ) {
        let levels = dense_levels();
        let mut state = Session::with_source(Settings::default(), &levels);
        for input in &inputs {
            tick(&mut state, input, &levels, SIM_DT);
            for ball in &state.balls {
                assert_axis_speed(ball);
            }
        }
    }

    #[test]
    fn score_moves_only_with_block_hits(
        inputs in prop::collection::vec(arb_input(), 1..1500)
    ) {
        let levels = dense_levels();
        let mut state = Session::with_source(Settings::default(), &levels);
        for input in &inputs {
            let before = state.score;
            let blocks_before = state.blocks.len();
            let was_playing = matches!(state.phase, GamePhase::Playing { .. });

            tick(&mut state, input, &levels, SIM_DT);

            let hits = state.events.iter().filter(|e| matches!(e, GameEvent::BlockHit { .. })).count();
            let broken = state.events.iter().filter(|e| matches!(e, GameEvent::BlockBroken { .. })).count();

            if state.phase == GamePhase::StartScreen {
                // Returning to the start screen resets the run
                prop_assert_eq!(state.score, 0);
                continue;
            }
            prop_assert_eq!(state.score, before + hits as u64 * 100);

            if was_playing {
                prop_assert_eq!(blocks_before - state.blocks.len(), broken);
                let cleared = matches!(state.phase, GamePhase::LevelComplete { .. });
                prop_assert_eq!(cleared, state.blocks.is_cleared());
            }
        }
    }

    #[test]
    fn bounce_leaves_ball_clear_of_block(
        bx in 0.0f32..600.0,
        by in 0.0f32..400.0,
        bw in 5.0f32..200.0,
        bh in 5.0f32..100.0,
        tx in 0.0f32..1.0,
        ty in 0.0f32..1.0,
        right in any::<bool>(),
        down in any::<bool>(),
    ) {
        let size = 20.0;
        let block = Block::new(Aabb::new(Vec2::new(bx, by), Vec2::new(bw, bh)), 1);
        // Anywhere the ball's box overlaps the block's
        let pos = Vec2::new(bx - size + tx * (bw + size), by - size + ty * (bh + size));
        let speed = 175.0;
        let vel = Vec2::new(
            if right { speed } else { -speed },
            if down { speed } else { -speed },
        );
        let ball = Ball { pos, vel, ..Ball::new(Vec2::ZERO, size, speed) };
        prop_assume!(block.check_if_should_bounce(&ball));

        let after = block.bounce_ball(ball);
        prop_assert!(!intersects(&after.bounds(), &block.bounds));
        prop_assert_eq!(after.vel.abs(), Vec2::splat(speed));
        // At least one component reversed
        prop_assert!(after.vel.x != vel.x || after.vel.y != vel.y);
    }

    #[test]
    fn block_breaks_exactly_when_health_runs_out(health in 1u32..8) {
        let mut field = BlockField::from_blocks(vec![Block::new(
            Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 40.0)),
            health,
        )]);
        let ball = Ball {
            pos: Vec2::new(30.0, 35.0),
            vel: Vec2::new(175.0, -175.0),
            ..Ball::new(Vec2::ZERO, 20.0, 175.0)
        };

        for hit_no in 1..=health {
            let (_, hit) = field.resolve_ball(ball);
            let hit = hit.expect("ball overlaps the block");
            prop_assert_eq!(hit.block.health, health - hit_no);
            prop_assert_eq!(field.is_cleared(), hit_no == health);
        }
        let (_, hit) = field.resolve_ball(ball);
        prop_assert!(hit.is_none());
    }

    #[test]
    fn valid_grids_lay_out_one_block_per_live_cell(
        rows in prop::collection::vec(prop::collection::vec(0i64..4, 6), 1..10)
    ) {
        let live = rows.iter().flatten().filter(|&&v| v > 0).count();
        match LevelGrid::from_rows(rows) {
            Ok(grid) => {
                let field = BlockField::from_grid(&grid, &Settings::default());
                prop_assert_eq!(field.len(), live);
            }
            Err(_) => prop_assert_eq!(live, 0),
        }
    }
}

#[test]
fn ragged_grid_is_rejected() {
    assert!(LevelGrid::parse("1 2\n3\n").is_err());
}
