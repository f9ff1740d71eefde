//! Rule switches
//!
//! `piece_rotation` picks what the rotate-piece key turns, `game_over` picks
//! when a settlement ends the run, and `ring_clearing` turns ring removal on or
//! off. `Rules::legacy()` turns the ring on rotate-piece and never clears.

use serde::{Deserialize, Serialize};

/// What the rotate-piece command does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PieceRotation {
    /// Turn the block layout a quarter turn about its centroid
    #[default]
    Layout,
    /// Same as rotate-ring-left
    Ring,
}

/// When a settlement ends the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameOverCheck {
    /// The new spawn sits within two blocks of the outer edge. Spawns start on
    /// the rim, so the first settlement ends the run.
    #[default]
    SpawnPosition,
    /// The settled piece reached the outer band, or the new spawn is blocked
    SettledPiece,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub piece_rotation: PieceRotation,
    pub game_over: GameOverCheck,
    /// Remove completed rings and score them
    pub ring_clearing: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            piece_rotation: PieceRotation::Layout,
            game_over: GameOverCheck::SpawnPosition,
            ring_clearing: true,
        }
    }
}

impl Rules {
    /// Rotate-piece turns the ring and rings never clear
    pub fn legacy() -> Self {
        Self {
            piece_rotation: PieceRotation::Ring,
            game_over: GameOverCheck::SpawnPosition,
            ring_clearing: false,
        }
    }
}
