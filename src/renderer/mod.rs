//! Rendering module
//!
//! `scene` turns game state into drawing commands, `shapes` tessellates them,
//! and `pipeline` pushes the triangles through WebGPU.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{DrawCommand, Scene, build_scene};
pub use shapes::tessellate;
