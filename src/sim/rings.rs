//! Ring completion and clearing
//!
//! The playfield outside the center limit is cut into bands one block wide.
//! Each band is split into as many angular sectors as blocks fit around its
//! midline. A band is complete when every sector holds at least one settled
//! block center; complete bands are removed without shifting the blocks
//! outside them.

use glam::Vec2;

use super::piece::{Piece, local_to_world};
use crate::consts::*;
use crate::{cartesian_to_polar, normalize_angle};

/// Band index for a distance from center (None inside the center limit)
pub fn band_of(distance: f32) -> Option<u32> {
    if distance < CENTER_LIMIT {
        return None;
    }
    Some(((distance - CENTER_LIMIT) / BLOCK_SIZE).floor() as u32)
}

/// Midline radius of a band
pub fn band_midline(band: u32) -> f32 {
    CENTER_LIMIT + (band as f32 + 0.5) * BLOCK_SIZE
}

/// Number of angular sectors in a band
pub fn sector_count(band: u32) -> u32 {
    let circumference = std::f32::consts::TAU * band_midline(band);
    ((circumference / BLOCK_SIZE).floor() as u32).max(1)
}

/// Sector index of a playfield position within a band of `sectors` sectors
pub fn sector_of(pos: Vec2, sectors: u32) -> u32 {
    let (_, theta) = cartesian_to_polar(pos);
    let theta = normalize_angle(theta);
    let width = std::f32::consts::TAU / sectors as f32;
    ((theta / width).floor() as u32).min(sectors - 1)
}

/// Bands whose every sector is occupied, innermost first
pub fn complete_bands(pieces: &[Piece]) -> Vec<u32> {
    // band -> occupied sectors
    let mut occupancy: Vec<Vec<bool>> = Vec::new();

    for pos in pieces.iter().flat_map(|p| p.world_blocks()) {
        let Some(band) = band_of(pos.length()) else {
            continue;
        };
        let band = band as usize;
        if band >= occupancy.len() {
            occupancy.resize_with(band + 1, Vec::new);
        }
        let slots = &mut occupancy[band];
        if slots.is_empty() {
            slots.resize(sector_count(band as u32) as usize, false);
        }
        let sector = sector_of(pos, slots.len() as u32) as usize;
        slots[sector] = true;
    }

    occupancy
        .iter()
        .enumerate()
        .filter(|(_, slots)| !slots.is_empty() && slots.iter().all(|s| *s))
        .map(|(band, _)| band as u32)
        .collect()
}

/// Remove every block lying in one of `bands`. Pieces left without blocks are
/// dropped; the rest keep their order. Returns the number of blocks removed.
pub fn clear_bands(pieces: &mut Vec<Piece>, bands: &[u32]) -> usize {
    if bands.is_empty() {
        return 0;
    }

    let mut removed = 0;
    for piece in pieces.iter_mut() {
        let (angle, distance) = (piece.angle, piece.distance);
        let before = piece.blocks.len();
        piece.blocks.retain(|&local| {
            let pos = local_to_world(local, angle, distance);
            !band_of(pos.length()).is_some_and(|b| bands.contains(&b))
        });
        removed += before - piece.blocks.len();
    }
    pieces.retain(|p| !p.blocks.is_empty());

    removed
}

/// Score for clearing `rings` bands with one settlement
pub fn ring_score(rings: usize) -> u64 {
    let rings = rings as u64;
    RING_CLEAR_SCORE * rings * rings
}
