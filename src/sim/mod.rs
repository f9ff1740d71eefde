//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (placement order of settled pieces)
//! - No rendering or platform dependencies

pub mod collision;
pub mod piece;
pub mod rings;
pub mod rules;
pub mod state;
pub mod tick;

pub use collision::{Collision, blocks_overlap, check_collision, violates_center};
pub use piece::{PALETTE, Piece, Shape};
pub use rules::{GameOverCheck, PieceRotation, Rules};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{Command, TickInput, apply_command, tick};
