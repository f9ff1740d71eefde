//! Fixed timestep simulation tick and player commands
//!
//! One tick moves the current piece one fall step toward the center. Commands
//! are applied immediately by the input handlers between ticks.

use super::collision::check_collision;
use super::rings::{clear_bands, complete_bands, ring_score};
use super::rules::PieceRotation;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Per-tick input that is not a piece command
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pause toggle
    pub pause: bool,
}

/// Player commands acting on the current piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    RotateRingLeft,
    RotateRingRight,
    SpeedUp,
    RotatePiece,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::info!("Paused");
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::info!("Resumed");
            }
            GamePhase::GameOver => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }
    let Some(piece) = state.current.as_mut() else {
        return;
    };

    state.time_ticks += 1;

    let previous = piece.distance;
    piece.distance -= FALL_SPEED;

    let Some(collision) = check_collision(piece, &state.pieces) else {
        return;
    };

    piece.distance = previous;
    let settled = piece.clone();
    log::debug!(
        "Settled {:?} at distance {:.1} ({:?})",
        settled.shape,
        settled.distance,
        collision
    );
    state.pieces.push(settled.clone());
    state.events.push(GameEvent::Settled {
        distance: settled.distance,
    });

    clear_rings(state);
    state.spawn_piece();
    state.check_game_over(&settled);
}

/// Remove completed rings (if enabled) and score them
fn clear_rings(state: &mut GameState) {
    if !state.rules.ring_clearing {
        return;
    }

    let bands = complete_bands(&state.pieces);
    if bands.is_empty() {
        return;
    }

    let removed = clear_bands(&mut state.pieces, &bands);
    let points = ring_score(bands.len());
    state.score += points;
    state.rings_cleared += bands.len() as u32;
    state.events.push(GameEvent::RingsCleared {
        rings: bands.len(),
        points,
    });
    log::info!(
        "Cleared rings {:?} ({} blocks) for {} points",
        bands,
        removed,
        points
    );
}

/// Apply a player command to the current piece.
///
/// Returns false when there was nothing to act on or the command was refused.
pub fn apply_command(state: &mut GameState, command: Command) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    let rotation = state.rules.piece_rotation;
    let Some(piece) = state.current.as_mut() else {
        return false;
    };

    match command {
        Command::RotateRingLeft => piece.angle -= ROTATION_SPEED,
        Command::RotateRingRight => piece.angle += ROTATION_SPEED,
        Command::SpeedUp => piece.distance -= FALL_SPEED * SPEED_UP_MULTIPLIER,
        Command::RotatePiece => match rotation {
            PieceRotation::Ring => piece.angle -= ROTATION_SPEED,
            PieceRotation::Layout => {
                let turned = piece.with_rotated_layout();
                if check_collision(&turned, &state.pieces).is_some() {
                    log::debug!("Layout rotation blocked");
                    return false;
                }
                *piece = turned;
            }
        },
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::piece::{Piece, Shape};
    use crate::sim::rings::{band_midline, sector_count};
    use crate::sim::rules::{GameOverCheck, Rules};
    use glam::Vec2;
    use proptest::prelude::*;

    fn state_with_current(piece: Piece) -> GameState {
        let mut state = GameState::new(777);
        state.current = Some(piece);
        state.drain_events();
        state
    }

    #[test]
    fn test_tick_moves_piece_inward() {
        let mut state = GameState::new(1);
        let before = state.current.as_ref().unwrap().distance;
        tick(&mut state, &TickInput::default());
        let after = state.current.as_ref().unwrap().distance;
        assert!((before - after - FALL_SPEED).abs() < 1e-6);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_step_into_center_limit_settles_at_previous_distance() {
        // I piece origin block is the innermost: at 50.3 the next step hits 49.8
        let mut state = state_with_current(Piece::new(Shape::I, 0.7, 50.3));
        tick(&mut state, &TickInput::default());

        assert_eq!(state.pieces.len(), 1);
        assert!((state.pieces[0].distance - 50.3).abs() < 1e-5);
        assert!(matches!(
            state.events.first(),
            Some(GameEvent::Settled { .. })
        ));
    }

    #[test]
    fn test_settled_piece_rules_spawn_a_fresh_piece() {
        let rules = Rules {
            game_over: GameOverCheck::SettledPiece,
            ..Rules::default()
        };
        let mut state = GameState::with_rules(777, rules);
        state.current = Some(Piece::new(Shape::I, 0.7, 50.3));
        tick(&mut state, &TickInput::default());

        assert_eq!(state.pieces.len(), 1);
        let current = state.current.as_ref().unwrap();
        assert_eq!(current.distance, GAME_RADIUS);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_step_that_stays_clear_does_not_settle() {
        let mut state = state_with_current(Piece::new(Shape::I, 0.7, 51.0));
        tick(&mut state, &TickInput::default());
        assert!(state.pieces.is_empty());
        assert!((state.current.as_ref().unwrap().distance - 50.5).abs() < 1e-5);
    }

    #[test]
    fn test_settles_on_top_of_settled_piece() {
        let mut state = state_with_current(Piece::new(Shape::I, 0.0, 140.2));
        state.pieces.push(Piece::new(Shape::I, 0.0, 60.0));
        // Top of the settled I is at 120; 120 + 20 = 140 is the first clear spot
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.pieces.len(), 2);
        assert!((state.pieces[1].distance - 140.2).abs() < 1e-4);
    }

    #[test]
    fn test_first_landing_ends_game() {
        // The replacement spawns on the rim, beyond GAME_RADIUS - 2 * BLOCK_SIZE
        let mut state = GameState::new(3);
        state.current = Some(Piece::new(Shape::I, 0.0, 50.3));
        tick(&mut state, &TickInput::default());

        assert!(state.is_game_over());
        assert!(state.current.is_none());
        assert_eq!(state.pieces.len(), 1);
        assert!(state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { score: 0 })));
    }

    #[test]
    fn test_no_mutation_after_game_over() {
        let mut state = GameState::new(3);
        state.current = Some(Piece::new(Shape::I, 0.0, 50.3));
        tick(&mut state, &TickInput::default());
        assert!(state.is_game_over());

        let ticks = state.time_ticks;
        let pieces = state.pieces.clone();
        let score = state.score;
        let commands = [
            Command::RotateRingLeft,
            Command::RotateRingRight,
            Command::SpeedUp,
            Command::RotatePiece,
        ];
        for i in 0..100 {
            tick(&mut state, &TickInput::default());
            tick(&mut state, &TickInput { pause: true });
            assert!(!apply_command(&mut state, commands[i % commands.len()]));
        }
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.pieces, pieces);
        assert_eq!(state.score, score);
        assert!(state.current.is_none());
        assert!(state.is_game_over());
    }

    #[test]
    fn test_pause_toggle() {
        let mut state = GameState::new(12345);
        let pause = TickInput { pause: true };
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);

        let distance = state.current.as_ref().unwrap().distance;
        tick(&mut state, &TickInput::default());
        assert!(!apply_command(&mut state, Command::RotateRingLeft));
        assert_eq!(state.current.as_ref().unwrap().distance, distance);

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_ring_rotation_commands() {
        let mut state = state_with_current(Piece::new(Shape::T, 1.0, 150.0));
        assert!(apply_command(&mut state, Command::RotateRingLeft));
        assert!((state.current.as_ref().unwrap().angle - (1.0 - ROTATION_SPEED)).abs() < 1e-6);
        assert!(apply_command(&mut state, Command::RotateRingRight));
        assert!((state.current.as_ref().unwrap().angle - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_speed_up_moves_five_steps() {
        let mut state = state_with_current(Piece::new(Shape::T, 1.0, 150.0));
        apply_command(&mut state, Command::SpeedUp);
        assert!((state.current.as_ref().unwrap().distance - 147.5).abs() < 1e-6);
    }

    #[test]
    fn test_rotate_piece_turns_layout_by_default() {
        let mut state = state_with_current(Piece::new(Shape::L, 0.4, 150.0));
        let before = state.current.clone().unwrap();
        assert!(apply_command(&mut state, Command::RotatePiece));
        let after = state.current.as_ref().unwrap();
        assert_eq!(after.angle, before.angle);
        assert_eq!(after.distance, before.distance);
        assert_ne!(after.blocks, before.blocks);
    }

    #[test]
    fn test_rotate_piece_legacy_turns_ring() {
        let mut state = GameState::with_rules(8, Rules::legacy());
        state.current = Some(Piece::new(Shape::L, 0.4, 150.0));
        let before = state.current.clone().unwrap();
        apply_command(&mut state, Command::RotatePiece);
        let after = state.current.as_ref().unwrap();
        assert_eq!(after.blocks, before.blocks);
        assert!((after.angle - (0.4 - ROTATION_SPEED)).abs() < 1e-6);
    }

    #[test]
    fn test_blocked_layout_rotation_is_refused() {
        // I piece lying along the ray at 100..160; turned sideways it spans
        // (130, -30)..(130, 30), where a settled block is waiting
        let mut state = state_with_current(Piece::new(Shape::I, 0.0, 100.0));
        let obstacle = Vec2::new(130.0, 30.0);
        state.pieces.push(Piece {
            blocks: vec![Vec2::ZERO],
            ..Piece::new(Shape::Square, obstacle.y.atan2(obstacle.x), obstacle.length())
        });
        assert_eq!(check_collision(state.current.as_ref().unwrap(), &state.pieces), None);

        let before = state.current.clone().unwrap();
        assert!(!apply_command(&mut state, Command::RotatePiece));
        assert_eq!(state.current.as_ref().unwrap(), &before);
    }

    #[test]
    fn test_completing_a_ring_scores_and_clears() {
        let mut state = GameState::new(21);
        let sectors = sector_count(0);
        let width = std::f32::consts::TAU / sectors as f32;
        // Leave sector 0 empty
        for s in 1..sectors {
            state.pieces.push(Piece {
                blocks: vec![Vec2::ZERO],
                ..Piece::new(Shape::Square, (s as f32 + 0.5) * width, band_midline(0))
            });
        }
        // A one-block piece falling into sector 0, landing on the center limit
        state.current = Some(Piece {
            blocks: vec![Vec2::ZERO],
            ..Piece::new(Shape::Square, 0.5 * width, CENTER_LIMIT + 0.3)
        });

        tick(&mut state, &TickInput::default());

        assert_eq!(state.score, RING_CLEAR_SCORE);
        assert_eq!(state.rings_cleared, 1);
        assert!(state.pieces.is_empty());
        assert!(state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::RingsCleared { rings: 1, .. })));
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        let commands = [Command::RotateRingLeft, Command::SpeedUp, Command::RotatePiece];

        for i in 0..2000 {
            let command = commands[i % commands.len()];
            apply_command(&mut state1, command);
            apply_command(&mut state2, command);
            tick(&mut state1, &TickInput::default());
            tick(&mut state2, &TickInput::default());
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.pieces, state2.pieces);
        assert_eq!(state1.current, state2.current);
        assert_eq!(state1.score, state2.score);
    }

    proptest! {
        #[test]
        fn prop_left_then_right_restores_angle(angle in -50.0f32..50.0, turns in 1usize..20) {
            let mut state = state_with_current(Piece::new(Shape::T, angle, 150.0));
            for _ in 0..turns {
                apply_command(&mut state, Command::RotateRingLeft);
            }
            for _ in 0..turns {
                apply_command(&mut state, Command::RotateRingRight);
            }
            let restored = state.current.as_ref().unwrap().angle;
            prop_assert!((restored - angle).abs() < 1e-3);
        }

        #[test]
        fn prop_speed_up_descends_until_settled(seed in 0u64..500) {
            let mut state = GameState::new(seed);
            while state.pieces.is_empty() {
                let before = state.current.as_ref().unwrap().distance;
                apply_command(&mut state, Command::SpeedUp);
                prop_assert!(state.current.as_ref().unwrap().distance < before);
                tick(&mut state, &TickInput::default());
            }
            prop_assert_eq!(state.pieces.len(), 1);
            prop_assert_eq!(state.score, 0);
        }

        #[test]
        fn prop_score_never_decreases(seed in 0u64..200) {
            let rules = Rules {
                game_over: GameOverCheck::SettledPiece,
                ..Rules::default()
            };
            let mut state = GameState::with_rules(seed, rules);
            let commands = [
                Command::RotateRingLeft,
                Command::SpeedUp,
                Command::RotatePiece,
                Command::RotateRingRight,
                Command::SpeedUp,
            ];
            let mut last_score = 0;
            for i in 0..1500 {
                apply_command(&mut state, commands[(i * 7 + seed as usize) % commands.len()]);
                tick(&mut state, &TickInput::default());
                prop_assert!(state.score >= last_score);
                last_score = state.score;
                if state.is_game_over() {
                    break;
                }
            }
        }
    }
}
