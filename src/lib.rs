//! Circletris - falling blocks in a circular well
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pieces, collisions, rings, game state)
//! - `renderer`: Scene building and the WebGPU triangle pipeline
//! - `platform`: Browser input mapping
//! - `settings`: Persisted player settings

pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::StartupError;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Logical drawing surface (square, origin at center)
    pub const CANVAS_SIZE: f32 = 600.0;

    /// Playfield dimensions
    pub const GAME_RADIUS: f32 = 200.0;
    /// Radius of the forbidden zone around the center
    pub const MIN_DISTANCE: f32 = 30.0;
    pub const BLOCK_SIZE: f32 = 20.0;

    /// Angular step per ring rotation command (radians)
    pub const ROTATION_SPEED: f32 = 0.05;
    /// Inward fall per tick
    pub const FALL_SPEED: f32 = 0.5;
    /// Speed-up command moves this many fall steps at once
    pub const SPEED_UP_MULTIPLIER: f32 = 5.0;

    /// Points for one cleared ring (multiplied by rings² per settlement)
    pub const RING_CLEAR_SCORE: u64 = 100;

    /// Blocks closer to the center than this collide
    pub const CENTER_LIMIT: f32 = MIN_DISTANCE + BLOCK_SIZE;
    /// A settled stack reaching this distance ends the game
    pub const OUTER_LIMIT: f32 = GAME_RADIUS - BLOCK_SIZE * 2.0;
}

/// Normalized angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(std::f32::consts::TAU);
    // rem_euclid can round up to TAU for tiny negative inputs
    if wrapped >= std::f32::consts::TAU {
        0.0
    } else {
        wrapped
    }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}

/// Rotate a vector counter-clockwise by `theta` radians
#[inline]
pub fn rotate_vec(v: Vec2, theta: f32) -> Vec2 {
    Vec2::from_angle(theta).rotate(v)
}
