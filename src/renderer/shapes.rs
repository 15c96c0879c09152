//! Scene geometry generation
//!
//! Pure functions from `&GameState` to vertex lists; rendering never mutates
//! simulation state. Shapes become line-list vertices, the background grid
//! becomes point-list vertices.

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::consts::{GRID_SPACING, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::{GameState, Shape};

fn push_shape_lines(out: &mut Vec<Vertex>, shape: &Shape, pos: Vec2, heading: f32, color: [f32; 4]) {
    for seg in shape.world_segments(pos, heading) {
        out.push(Vertex::new(seg.start.x, seg.start.y, color));
        out.push(Vertex::new(seg.end.x, seg.end.y, color));
    }
}

/// Two line-list vertices per segment of `shape`, rotated by `heading` about
/// the local origin and translated by `pos`.
pub fn shape_lines(shape: &Shape, pos: Vec2, heading: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(shape.len() * 2);
    push_shape_lines(&mut vertices, shape, pos, heading, color);
    vertices
}

/// All shape lines for one frame: player first, then active asteroids in
/// slot order (draw order is visual stacking order).
pub fn scene_lines(state: &GameState) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    push_shape_lines(
        &mut vertices,
        &state.player.shape,
        state.player.pos,
        state.player.heading,
        colors::SHAPE,
    );
    for asteroid in state.active_asteroids() {
        push_shape_lines(
            &mut vertices,
            &asteroid.shape,
            asteroid.pos,
            asteroid.heading,
            colors::SHAPE,
        );
    }
    vertices
}

/// Background dot grid as point-list vertices. Nodes are snapped to
/// world-space multiples of `GRID_SPACING`, so dots stay put while the
/// camera pans; one screen of margin on every side covers the whole view.
pub fn grid_points(state: &GameState) -> Vec<Vertex> {
    let view = Vec2::new(SCREEN_WIDTH as f32, SCREEN_HEIGHT as f32);
    let min = state.camera.target - view;
    let max = state.camera.target + view;

    let x0 = (min.x / GRID_SPACING).floor() as i32;
    let x1 = (max.x / GRID_SPACING).ceil() as i32;
    let y0 = (min.y / GRID_SPACING).floor() as i32;
    let y1 = (max.y / GRID_SPACING).ceil() as i32;

    let mut vertices = Vec::with_capacity(((x1 - x0 + 1) * (y1 - y0 + 1)).max(0) as usize);
    for gx in x0..=x1 {
        for gy in y0..=y1 {
            vertices.push(Vertex::new(
                gx as f32 * GRID_SPACING,
                gy as f32 * GRID_SPACING,
                colors::GRID,
            ));
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{ASTEROID_SIDES, START_ASTEROIDS};
    use crate::screen_center;
    use crate::sim::Shape;

    #[test]
    fn test_scene_vertex_count() {
        let state = GameState::new(12345);
        let vertices = scene_lines(&state);
        let segments = 4 + START_ASTEROIDS * ASTEROID_SIDES as usize;
        assert_eq!(vertices.len(), segments * 2);
        for v in &vertices {
            assert_eq!(v.color, colors::SHAPE);
        }
    }

    #[test]
    fn test_zero_rotation_matches_local_coords() {
        let shape = Shape::closed_polygon(&crate::sim::SHIP_OUTLINE);
        let pos = screen_center();
        let vertices = shape_lines(&shape, pos, 0.0, colors::SHAPE);
        for (v, seg) in vertices.chunks(2).zip(shape.segments()) {
            assert_eq!(v[0].position, [pos.x + seg.start.x, pos.y + seg.start.y]);
            assert_eq!(v[1].position, [pos.x + seg.end.x, pos.y + seg.end.y]);
        }
    }

    #[test]
    fn test_vertex_generation_does_not_mutate_state() {
        let state = GameState::new(7);
        let snapshot = state.clone();
        let _ = scene_lines(&state);
        let _ = grid_points(&state);
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_grid_covers_view_and_snaps() {
        let state = GameState::new(7);
        let points = grid_points(&state);
        assert!(!points.is_empty());
        for p in &points {
            let [x, y] = p.position;
            assert!((x / GRID_SPACING).fract().abs() < 1e-4);
            assert!((y / GRID_SPACING).fract().abs() < 1e-4);
        }
    }
}
