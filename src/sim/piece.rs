//! Pieces, their templates, and the local → playfield transform
//!
//! A piece keeps its blocks in a local frame. Playfield positions are derived
//! on demand from (local offset, angle, distance), so moving or turning a piece
//! is nothing more than reassigning `angle` or `distance`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{polar_to_cartesian, rotate_vec};

/// Display palette (RGBA, 0-1)
pub const PALETTE: [[f32; 4]; 7] = [
    [1.0, 0.051, 0.051, 1.0],  // red
    [0.051, 1.0, 0.11, 1.0],   // green
    [0.051, 0.522, 1.0, 1.0],  // blue
    [1.0, 0.843, 0.051, 1.0],  // yellow
    [1.0, 0.051, 1.0, 1.0],    // magenta
    [0.051, 1.0, 0.976, 1.0],  // cyan
    [1.0, 0.557, 0.051, 1.0],  // orange
];

/// The four piece shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    I,
    Square,
    L,
    T,
}

impl Shape {
    pub const ALL: [Shape; 4] = [Shape::I, Shape::Square, Shape::L, Shape::T];

    /// Block cells as (angle in radians, distance in block units)
    pub fn cells(self) -> [(f32, f32); 4] {
        match self {
            Shape::I => [(0.0, 0.0), (0.0, 1.0), (0.0, 2.0), (0.0, 3.0)],
            Shape::Square => [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)],
            Shape::L => [(0.0, 0.0), (0.0, 1.0), (0.0, 2.0), (1.0, 2.0)],
            Shape::T => [(0.0, 0.0), (-1.0, 1.0), (0.0, 1.0), (1.0, 1.0)],
        }
    }

    /// Palette entry for this shape
    pub fn color(self) -> [f32; 4] {
        let index = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        PALETTE[index % PALETTE.len()]
    }

    /// Decode the template cells into local block offsets
    pub fn local_blocks(self) -> Vec<Vec2> {
        self.cells()
            .iter()
            .map(|&(angle, dist)| polar_to_cartesian(dist * BLOCK_SIZE, angle))
            .collect()
    }
}

/// Rotate a local offset by `angle` and push it `distance` out along the ray
#[inline]
pub fn local_to_world(local: Vec2, angle: f32, distance: f32) -> Vec2 {
    rotate_vec(local, angle) + polar_to_cartesian(distance, angle)
}

/// A falling or settled piece
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub shape: Shape,
    /// Local block offsets (piece frame)
    pub blocks: Vec<Vec2>,
    pub color: [f32; 4],
    /// Angular position around the ring (radians, unbounded)
    pub angle: f32,
    /// Distance of the piece origin from the playfield center
    pub distance: f32,
}

impl Piece {
    pub fn new(shape: Shape, angle: f32, distance: f32) -> Self {
        Self {
            shape,
            blocks: shape.local_blocks(),
            color: shape.color(),
            angle,
            distance,
        }
    }

    /// Spawn a random piece at the outer edge
    pub fn spawn<R: Rng>(rng: &mut R) -> Self {
        let shape = Shape::ALL[rng.random_range(0..Shape::ALL.len())];
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        Self::new(shape, angle, GAME_RADIUS)
    }

    /// Playfield position of one local offset
    #[inline]
    pub fn to_world(&self, local: Vec2) -> Vec2 {
        local_to_world(local, self.angle, self.distance)
    }

    /// Playfield positions of all blocks
    pub fn world_blocks(&self) -> Vec<Vec2> {
        self.blocks.iter().map(|&b| self.to_world(b)).collect()
    }

    /// Mean of the local offsets
    pub fn centroid(&self) -> Vec2 {
        if self.blocks.is_empty() {
            return Vec2::ZERO;
        }
        self.blocks.iter().copied().sum::<Vec2>() / self.blocks.len() as f32
    }

    /// Copy of this piece with its layout turned a quarter turn
    /// counter-clockwise about the centroid
    pub fn with_rotated_layout(&self) -> Self {
        let pivot = self.centroid();
        let blocks = self
            .blocks
            .iter()
            .map(|&b| {
                let rel = b - pivot;
                pivot + Vec2::new(-rel.y, rel.x)
            })
            .collect();
        Self {
            blocks,
            ..self.clone()
        }
    }
}
