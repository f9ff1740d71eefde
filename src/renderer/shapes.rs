//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::scene::{DrawCommand, Scene};
use super::vertex::Vertex;
use crate::rotate_vec;

/// Segments used for the playfield circles
const CIRCLE_SEGMENTS: u32 = 96;

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let inner1 = center + Vec2::from_angle(theta1) * inner_radius;
        let outer1 = center + Vec2::from_angle(theta1) * outer_radius;
        let inner2 = center + Vec2::from_angle(theta2) * inner_radius;
        let outer2 = center + Vec2::from_angle(theta2) * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Generate vertices for a rectangle of half extents `half` centered on
/// `center` and rotated by `angle`
pub fn rotated_rect(center: Vec2, half: Vec2, angle: f32, color: [f32; 4]) -> Vec<Vertex> {
    let corners = [
        Vec2::new(-half.x, -half.y),
        Vec2::new(half.x, -half.y),
        Vec2::new(half.x, half.y),
        Vec2::new(-half.x, half.y),
    ]
    .map(|c| center + rotate_vec(c, angle));

    [0, 1, 2, 0, 2, 3]
        .iter()
        .map(|&i| Vertex::new(corners[i].x, corners[i].y, color))
        .collect()
}

/// Generate vertices for a square outline stroked on its edges (the stroke is
/// centered on the edge, like a canvas `strokeRect`)
pub fn square_outline(
    center: Vec2,
    size: f32,
    line_width: f32,
    angle: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let half = size / 2.0;
    let outer = half + line_width / 2.0;
    let edge_half = Vec2::new(outer, line_width / 2.0);
    let mut vertices = Vec::with_capacity(24);

    // Top and bottom bars span the full outer width; sides fill the gap
    for dir in [Vec2::Y, Vec2::NEG_Y] {
        let offset = rotate_vec(dir * half, angle);
        vertices.extend(rotated_rect(center + offset, edge_half, angle, color));
    }
    let side_half = Vec2::new(line_width / 2.0, half - line_width / 2.0);
    for dir in [Vec2::X, Vec2::NEG_X] {
        let offset = rotate_vec(dir * half, angle);
        vertices.extend(rotated_rect(center + offset, side_half, angle, color));
    }

    vertices
}

/// Tessellate a scene's shape commands into triangles (playfield units).
///
/// `Clear` commands are ignored here; the render pass clears to its own color.
pub fn tessellate(scene: &Scene) -> Vec<Vertex> {
    let mut vertices = Vec::new();

    for command in &scene.commands {
        match *command {
            DrawCommand::Clear { .. } => {}
            DrawCommand::StrokeCircle {
                radius,
                line_width,
                color,
            } => vertices.extend(ring(
                Vec2::ZERO,
                radius - line_width / 2.0,
                radius + line_width / 2.0,
                color,
                CIRCLE_SEGMENTS,
            )),
            DrawCommand::Block {
                center,
                angle,
                size,
                fill,
                outline,
                outline_width,
            } => {
                vertices.extend(rotated_rect(center, Vec2::splat(size / 2.0), angle, fill));
                vertices.extend(square_outline(center, size, outline_width, angle, outline));
            }
            DrawCommand::Panel { half_extent, color } => {
                vertices.extend(rotated_rect(Vec2::ZERO, Vec2::splat(half_extent), 0.0, color));
            }
        }
    }

    vertices
}

/// Clear color of a scene (first `Clear` command)
pub fn clear_color(scene: &Scene) -> Option<[f32; 4]> {
    scene.commands.iter().find_map(|c| match c {
        DrawCommand::Clear { color } => Some(*color),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::scene::build_scene;
    use crate::sim::GameState;

    #[test]
    fn test_ring_vertex_count_and_radii() {
        let verts = ring(Vec2::ZERO, 10.0, 12.0, [1.0; 4], 16);
        assert_eq!(verts.len(), 16 * 6);
        for v in &verts {
            let r = Vec2::from(v.position).length();
            assert!((r - 10.0).abs() < 1e-3 || (r - 12.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_rotated_rect_keeps_corner_distance() {
        let center = Vec2::new(50.0, 20.0);
        let verts = rotated_rect(center, Vec2::splat(10.0), 0.8, [1.0; 4]);
        assert_eq!(verts.len(), 6);
        for v in &verts {
            let d = (Vec2::from(v.position) - center).length();
            assert!((d - 10.0 * std::f32::consts::SQRT_2).abs() < 1e-3);
        }
    }

    #[test]
    fn test_outline_stays_within_stroke_band() {
        let center = Vec2::new(-30.0, 70.0);
        let verts = square_outline(center, 20.0, 2.0, 0.0, [1.0; 4]);
        assert_eq!(verts.len(), 24);
        for v in &verts {
            let d = (Vec2::from(v.position) - center).abs();
            assert!(d.max_element() <= 11.0 + 1e-4);
            assert!(d.max_element() >= 9.0 - 1e-4);
        }
    }

    #[test]
    fn test_tessellate_scene() {
        let state = GameState::new(2);
        let scene = build_scene(&state);
        let verts = tessellate(&scene);
        // Two circles plus four blocks (fill + outline)
        let expected = 2 * CIRCLE_SEGMENTS as usize * 6 + 4 * (6 + 24);
        assert_eq!(verts.len(), expected);
        assert!(clear_color(&scene).is_some());
    }
}
