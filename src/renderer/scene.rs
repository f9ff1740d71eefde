//! Scene building: game state to drawing commands
//!
//! `build_scene` only reads the state. Shapes are in playfield units with the
//! origin at the center; text is handed to the HUD as plain strings.

use glam::Vec2;

use super::vertex::colors;
use crate::consts::*;
use crate::sim::{GameState, Piece};

/// Stroke width of the outer boundary
pub const BOUNDARY_LINE_WIDTH: f32 = 3.0;
/// Stroke width of the center-zone circle
pub const CENTER_LINE_WIDTH: f32 = 2.0;
/// Stroke width of block outlines
pub const BLOCK_OUTLINE_WIDTH: f32 = 2.0;

pub const GAME_OVER_MESSAGE: &str = "Game Over!";

/// One drawing operation, in paint order
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole surface
    Clear { color: [f32; 4] },
    /// Circle outline centered on the origin
    StrokeCircle {
        radius: f32,
        line_width: f32,
        color: [f32; 4],
    },
    /// Filled, outlined square rotated by `angle` about its center
    Block {
        center: Vec2,
        angle: f32,
        size: f32,
        fill: [f32; 4],
        outline: [f32; 4],
        outline_width: f32,
    },
    /// Axis-aligned square panel covering `[-half_extent, half_extent]²`
    Panel { half_extent: f32, color: [f32; 4] },
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub commands: Vec<DrawCommand>,
    /// Score text, drawn at the top-left of the playfield
    pub score_label: String,
    /// Centered message (game over)
    pub message: Option<&'static str>,
}

/// Build the frame for the current state
pub fn build_scene(state: &GameState) -> Scene {
    let mut commands = vec![
        DrawCommand::Clear {
            color: colors::BACKGROUND,
        },
        DrawCommand::StrokeCircle {
            radius: GAME_RADIUS,
            line_width: BOUNDARY_LINE_WIDTH,
            color: colors::BOUNDARY,
        },
        DrawCommand::StrokeCircle {
            radius: MIN_DISTANCE,
            line_width: CENTER_LINE_WIDTH,
            color: colors::CENTER_ZONE,
        },
    ];

    for piece in &state.pieces {
        push_piece(&mut commands, piece);
    }
    if let Some(piece) = &state.current {
        push_piece(&mut commands, piece);
    }

    let message = if state.is_game_over() {
        commands.push(DrawCommand::Panel {
            half_extent: GAME_RADIUS,
            color: colors::GAME_OVER_PANEL,
        });
        Some(GAME_OVER_MESSAGE)
    } else {
        None
    };

    Scene {
        commands,
        score_label: format!("Score: {}", state.score),
        message,
    }
}

fn push_piece(commands: &mut Vec<DrawCommand>, piece: &Piece) {
    commands.extend(piece.world_blocks().into_iter().map(|center| DrawCommand::Block {
        center,
        angle: piece.angle,
        size: BLOCK_SIZE,
        fill: piece.color,
        outline: colors::BLOCK_OUTLINE,
        outline_width: BLOCK_OUTLINE_WIDTH,
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Shape, TickInput, tick};

    fn block_count(scene: &Scene) -> usize {
        scene
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Block { .. }))
            .count()
    }

    #[test]
    fn test_scene_starts_with_clear_and_boundaries() {
        let state = GameState::new(4);
        let scene = build_scene(&state);
        assert!(matches!(scene.commands[0], DrawCommand::Clear { .. }));
        assert!(matches!(
            scene.commands[1],
            DrawCommand::StrokeCircle { radius, .. } if radius == GAME_RADIUS
        ));
        assert!(matches!(
            scene.commands[2],
            DrawCommand::StrokeCircle { radius, .. } if radius == MIN_DISTANCE
        ));
        assert_eq!(scene.score_label, "Score: 0");
        assert_eq!(scene.message, None);
    }

    #[test]
    fn test_scene_draws_settled_then_current() {
        let mut state = GameState::new(4);
        let settled = Piece::new(Shape::I, 2.0, 60.0);
        state.pieces.push(settled.clone());
        let scene = build_scene(&state);
        assert_eq!(block_count(&scene), 8);

        // Settled blocks come first, at their transformed positions
        let first = scene
            .commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::Block { center, angle, .. } => Some((*center, *angle)),
                _ => None,
            })
            .unwrap();
        assert!((first.0 - settled.world_blocks()[0]).length() < 1e-4);
        assert_eq!(first.1, settled.angle);
    }

    #[test]
    fn test_scene_does_not_mutate_state() {
        let state = GameState::new(10);
        let before = state.clone();
        let _ = build_scene(&state);
        assert_eq!(before.current, state.current);
        assert_eq!(before.time_ticks, state.time_ticks);
    }

    #[test]
    fn test_game_over_adds_panel_and_message() {
        let mut state = GameState::new(3);
        state.current = Some(Piece::new(Shape::T, 0.0, 50.5));
        tick(&mut state, &TickInput::default());
        assert!(state.is_game_over());

        let scene = build_scene(&state);
        assert!(matches!(
            scene.commands.last(),
            Some(DrawCommand::Panel { .. })
        ));
        assert_eq!(scene.message, Some(GAME_OVER_MESSAGE));
        // Only the settled piece remains on screen
        assert_eq!(block_count(&scene), 4);
    }
}
