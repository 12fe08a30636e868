//! Per-frame simulation tick
//!
//! One call advances the game by one display frame. Velocities are in
//! pixels per tick, so there is no dt.

use super::grid::BlockStatus;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move-left held
    pub left: bool,
    /// Move-right held
    pub right: bool,
    /// Pause toggle
    pub pause: bool,
    /// Demo mode - paddle follows the ball
    pub autopilot: bool,
}

/// Advance the game state by one tick, returning what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return events;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return events;
    }

    let input = if input.autopilot {
        autopilot(state)
    } else {
        *input
    };

    state.time_ticks += 1;

    // --- BLOCKS ---
    // Centre-point test only; every block hit flips dy again.
    let mut touched_rows: Vec<u32> = Vec::new();
    let center = state.ball.pos;
    for row in 0..state.grid.row_count() {
        let row_id = state.grid.rows()[row].id;
        for column in state.grid.active_columns(row) {
            let Some(block) = state.grid.get_mut(row, column) else {
                continue;
            };
            if block.is_alive() && block.contains_point(center) {
                block.status = BlockStatus::Destroyed;
                state.ball.vel.y = -state.ball.vel.y;
                state.score += state.settings.points_per_block;
                events.push(GameEvent::BlockDestroyed { row, column });
                if !touched_rows.contains(&row_id) {
                    touched_rows.push(row_id);
                }
            }
        }
    }

    // Rows are tracked by id since each regeneration shifts the ones above it
    for row_id in touched_rows {
        let Some(row) = state.grid.row_index(row_id) else {
            continue;
        };
        if state.grid.row_cleared(row) {
            state.grid.regenerate_row(row, &mut state.rng);
            events.push(GameEvent::RowRegenerated { row });
        }
    }

    // A shift flips parity and can hide the last live slot of a row.
    // Fresh rows are never cleared, so this ends within `row_count` passes.
    while let Some(row) = state.grid.first_cleared_row() {
        state.grid.regenerate_row(row, &mut state.rng);
        events.push(GameEvent::RowRegenerated { row });
    }

    // --- MOVEMENT ---
    state.ball.pos += state.ball.vel;

    if input.right && state.paddle.right() < state.settings.arena_width {
        state.paddle.move_right(state.settings.arena_width);
    } else if input.left && state.paddle.x > 0.0 {
        state.paddle.move_left();
    }

    // --- PADDLE ---
    if state.ball.bottom() >= state.paddle.y && state.paddle.spans_x(state.ball.pos.x) {
        let boost = state.settings.speed_up_factor;
        state.ball.vel.y = -state.ball.vel.y * boost;
        state.ball.vel.x *= boost;
        if let Some(cap) = state.settings.max_ball_speed {
            state.ball.vel = state.ball.vel.clamp_length_max(cap);
        }
        events.push(GameEvent::PaddleBounce {
            speed: state.ball.speed(),
        });
    }

    // --- WALLS ---
    let width = state.settings.arena_width;
    let ball = &mut state.ball;
    if ball.pos.x + ball.radius > width {
        ball.vel.x = -ball.vel.x;
        ball.pos.x = width - ball.radius;
    }
    if ball.pos.x - ball.radius < 0.0 {
        ball.vel.x = -ball.vel.x;
        ball.pos.x = ball.radius;
    }
    if ball.pos.y - ball.radius < 0.0 {
        ball.vel.y = -ball.vel.y;
        ball.pos.y = ball.radius;
    }

    if ball.bottom() > state.settings.arena_height {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over after {} ticks with score {}",
            state.time_ticks,
            state.score
        );
        events.push(GameEvent::GameOver { score: state.score });
    }

    events
}

/// Demo mode: hold toward the ball with a dead zone around the paddle centre
fn autopilot(state: &GameState) -> TickInput {
    let dead_zone = state.paddle.width / 4.0;
    let offset = state.ball.pos.x - state.paddle.center();
    TickInput {
        left: offset < -dead_zone,
        right: offset > dead_zone,
        pause: false,
        autopilot: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use glam::Vec2;

    /// State with the ball parked mid-arena, away from blocks and paddle
    fn open_field() -> GameState {
        let mut state = GameState::with_seed(12345);
        state.ball.pos = Vec2::new(350.0, 300.0);
        state
    }

    #[test]
    fn test_ball_moves_by_velocity() {
        let mut state = open_field();
        let events = tick(&mut state, &TickInput::default());
        assert!(events.is_empty());
        assert_eq!(state.ball.pos, Vec2::new(352.0, 298.0));
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_block_hit_flips_dy_and_scores() {
        let mut state = open_field();
        // Centre of block (row 5, column 3): odd row, x = 2*70+35 .. 245, y = 100..120
        state.ball.pos = Vec2::new(210.0, 110.0);
        let events = tick(&mut state, &TickInput::default());

        assert_eq!(state.score, 10);
        assert_eq!(state.ball.vel, Vec2::new(2.0, 2.0));
        assert_eq!(state.grid.get(5, 3).unwrap().status, BlockStatus::Destroyed);
        assert_eq!(events[0], GameEvent::BlockDestroyed { row: 5, column: 3 });
    }

    #[test]
    fn test_clearing_row_regenerates_once() {
        let mut state = open_field();
        for c in 0..10 {
            if c != 4 {
                state.grid.get_mut(4, c).unwrap().status = BlockStatus::Destroyed;
            }
        }
        let old_top_id = state.grid.rows()[0].id;
        // Block (4, 4): x = 280..350, y = 80..100
        state.ball.pos = Vec2::new(300.0, 90.0);

        let events = tick(&mut state, &TickInput::default());

        let regenerated: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::RowRegenerated { .. }))
            .collect();
        assert_eq!(regenerated, vec![&GameEvent::RowRegenerated { row: 4 }]);
        assert_eq!(state.grid.row_index(old_top_id), Some(1));
        assert!(state.grid.rows()[0].slots.iter().all(|b| b.is_alive()));
        assert_eq!(state.grid.row_count(), 6);
    }

    #[test]
    fn test_clearing_top_row() {
        let mut state = open_field();
        for c in 0..10 {
            if c != 0 {
                state.grid.get_mut(0, c).unwrap().status = BlockStatus::Destroyed;
            }
        }
        state.ball.pos = Vec2::new(30.0, 10.0);
        let events = tick(&mut state, &TickInput::default());
        assert!(events.contains(&GameEvent::RowRegenerated { row: 0 }));
        assert_eq!(state.grid.alive_count(), 57);
    }

    #[test]
    fn test_row_emptied_by_shift_is_regenerated() {
        let mut state = open_field();
        // Row 4 keeps only slot 0, which goes inactive once the row turns odd
        for c in 1..10 {
            state.grid.get_mut(4, c).unwrap().status = BlockStatus::Destroyed;
        }
        for c in 1..9 {
            state.grid.get_mut(5, c).unwrap().status = BlockStatus::Destroyed;
        }
        // Block (5, 9): x = 595..665, y = 100..120
        state.ball.pos = Vec2::new(630.0, 110.0);

        let events = tick(&mut state, &TickInput::default());

        let regenerated = events
            .iter()
            .filter(|e| **e == GameEvent::RowRegenerated { row: 5 })
            .count();
        assert_eq!(regenerated, 2);
        assert_eq!(state.grid.first_cleared_row(), None);
        assert_eq!(state.grid.alive_count(), 57);

        for _ in 0..100 {
            state.ball.pos = Vec2::new(350.0, 300.0);
            tick(&mut state, &TickInput::default());
            assert_eq!(state.grid.first_cleared_row(), None);
        }
    }

    #[test]
    fn test_paddle_bounce_scales_velocity() {
        let mut state = open_field();
        // After moving by (2, -2) the ball bottom sits on the paddle top
        state.ball.pos = Vec2::new(350.0, 474.0);
        state.ball.vel = Vec2::new(2.0, -2.0);

        let events = tick(&mut state, &TickInput::default());

        assert!((state.ball.vel.x - 2.1).abs() < 1e-5);
        assert!((state.ball.vel.y - 2.1).abs() < 1e-5);
        assert!(matches!(events[0], GameEvent::PaddleBounce { .. }));
    }

    #[test]
    fn test_speed_cap() {
        let settings = Settings {
            max_ball_speed: Some(3.0),
            ..Settings::with_seed(1)
        };
        let mut state = GameState::new(settings);
        state.ball.pos = Vec2::new(350.0, 470.0);
        state.ball.vel = Vec2::new(3.0, 3.0);

        tick(&mut state, &TickInput::default());

        assert!((state.ball.speed() - 3.0).abs() < 1e-4);
        assert!(state.ball.vel.y < 0.0);
    }

    #[test]
    fn test_paddle_right_takes_priority() {
        let mut state = open_field();
        let input = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.paddle.x, 310.0);
    }

    #[test]
    fn test_paddle_left() {
        let mut state = open_field();
        let input = TickInput {
            left: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.paddle.x, 290.0);
    }

    #[test]
    fn test_side_walls_reflect_and_clamp() {
        let mut state = open_field();
        state.ball.pos = Vec2::new(691.0, 300.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.pos.x, 692.0);
        assert_eq!(state.ball.vel.x, -2.0);

        state.ball.pos = Vec2::new(9.0, 300.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.pos.x, 8.0);
        assert_eq!(state.ball.vel.x, 2.0);
    }

    #[test]
    fn test_top_wall_reflects() {
        let mut state = open_field();
        // Destroy everything so no block is in the way
        for row in 0..state.grid.row_count() {
            for c in 0..10 {
                if let Some(block) = state.grid.get_mut(row, c) {
                    block.status = BlockStatus::Destroyed;
                }
            }
        }
        state.ball.pos = Vec2::new(350.0, 9.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.vel.y, 2.0);
        assert_eq!(state.ball.pos.y, 8.0);
    }

    #[test]
    fn test_floor_ends_game() {
        let mut state = open_field();
        state.paddle.x = 0.0;
        state.ball.pos = Vec2::new(600.0, 491.0);
        state.ball.vel = Vec2::new(2.0, 2.0);
        state.score = 40;

        let events = tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(events.last(), Some(&GameEvent::GameOver { score: 40 }));

        // Further ticks do nothing until reset
        let pos = state.ball.pos;
        assert!(tick(&mut state, &TickInput::default()).is_empty());
        assert_eq!(state.ball.pos, pos);
    }

    #[test]
    fn test_pause_toggle() {
        let mut state = open_field();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);
        let pos = state.ball.pos;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.pos, pos);

        // Unpause resumes within the same tick
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_ne!(state.ball.pos, pos);
    }

    #[test]
    fn test_autopilot_tracks_ball() {
        let mut state = open_field();
        state.ball.pos = Vec2::new(100.0, 300.0);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.paddle.x, 290.0);

        state.ball.pos = Vec2::new(state.paddle.center(), 300.0);
        let x = state.paddle.x;
        tick(&mut state, &input);
        assert_eq!(state.paddle.x, x);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::with_seed(99999);
        let mut state2 = GameState::with_seed(99999);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };

        for _ in 0..2000 {
            let e1 = tick(&mut state1, &input);
            let e2 = tick(&mut state2, &input);
            assert_eq!(e1, e2);
            if state1.is_game_over() {
                state1.reset();
                state2.reset();
            }
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.ball.pos, state2.ball.pos);
        assert_eq!(state1.paddle.x, state2.paddle.x);
    }
}
