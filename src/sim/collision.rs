//! Collision detection for radially falling pieces
//!
//! Two independent tests reject a proposed piece position: a block entering the
//! forbidden zone around the center, or a block overlapping any settled block.
//! The overlap test is axis-aligned in playfield space, not radial.

use glam::Vec2;

use super::piece::Piece;
use crate::consts::*;

/// Why a proposed position was rejected
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Collision {
    /// A block is at or inside the center limit
    Center { distance: f32 },
    /// A block overlaps a block of the settled piece at this index
    Overlap { piece_index: usize },
}

/// True if a block at `pos` is too close to the center
#[inline]
pub fn violates_center(pos: Vec2) -> bool {
    pos.length() <= CENTER_LIMIT
}

/// Axis-aligned overlap: closer than one block on both axes
#[inline]
pub fn blocks_overlap(a: Vec2, b: Vec2) -> bool {
    (a - b).abs().cmplt(Vec2::splat(BLOCK_SIZE)).all()
}

/// Check a piece's current position against the center and the settled field.
///
/// Returns the first violation found; the center test runs first.
pub fn check_collision(piece: &Piece, settled: &[Piece]) -> Option<Collision> {
    let blocks = piece.world_blocks();

    if let Some(pos) = blocks.iter().find(|b| violates_center(**b)) {
        return Some(Collision::Center {
            distance: pos.length(),
        });
    }

    for (piece_index, other) in settled.iter().enumerate() {
        let others = other.world_blocks();
        let hit = blocks
            .iter()
            .any(|b| others.iter().any(|o| blocks_overlap(*b, *o)));
        if hit {
            return Some(Collision::Overlap { piece_index });
        }
    }

    None
}
