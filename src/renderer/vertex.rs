//! Triangle vertices in playfield units, plus the fixed scene colors
//!
//! Block fills come from `sim::piece::PALETTE`; everything else is here.

use bytemuck::{Pod, Zeroable};

/// Playfield-space vertex, converted to NDC just before upload
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Linear RGBA colors used by `scene::build_scene` for everything that is not
/// a piece fill
pub mod colors {
    /// Outer well circle
    pub const BOUNDARY: [f32; 4] = [1.0, 0.0, 0.0, 1.0]; // #FF0000
    /// Circle around the forbidden center
    pub const CENTER_ZONE: [f32; 4] = [0.267, 0.267, 0.267, 1.0]; // #444
    pub const BLOCK_OUTLINE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    /// Dims the final frame under the game-over message
    pub const GAME_OVER_PANEL: [f32; 4] = [0.0, 0.0, 0.0, 0.75];
    pub const BACKGROUND: [f32; 4] = [0.122, 0.161, 0.216, 1.0]; // gray-800
}
