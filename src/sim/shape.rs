//! Polyline shapes for entity silhouettes
//!
//! A shape is an ordered list of line segments in entity-local space.
//! Segments are built once at spawn and never mutated afterwards; only the
//! owning entity's position and heading change per tick. Draw order follows
//! segment order.

use glam::Vec2;
use std::f32::consts::TAU;

use crate::rotate_vec2;

/// A line segment in local (unrotated, untranslated) space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

/// An ordered list of local-space segments
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    segments: Vec<Segment>,
}

impl Shape {
    /// Build a closed polyline from `points`, connecting consecutive points
    /// cyclically (segment `i` runs from `points[i]` to `points[(i + 1) % n]`).
    pub fn closed_polygon(points: &[Vec2]) -> Self {
        let segments = (0..points.len())
            .map(|i| Segment {
                start: points[i],
                end: points[(i + 1) % points.len()],
            })
            .collect();
        Self { segments }
    }

    /// Build a closed regular polygon with vertex `j` at angle
    /// `τ / sides · j` and the given circumradius.
    pub fn regular_polygon(sides: u32, radius: f32) -> Self {
        let points: Vec<Vec2> = (0..sides)
            .map(|j| rotate_vec2(Vec2::new(radius, 0.0), TAU / sides as f32 * j as f32))
            .collect();
        Self::closed_polygon(&points)
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterate segments rotated by `heading` about the local origin and
    /// translated by `pos` into world space.
    pub fn world_segments(&self, pos: Vec2, heading: f32) -> impl Iterator<Item = Segment> + '_ {
        self.segments.iter().map(move |seg| Segment {
            start: pos + rotate_vec2(seg.start, heading),
            end: pos + rotate_vec2(seg.end, heading),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{ASTEROID_RADIUS, ASTEROID_SIDES};
    use crate::sim::SHIP_OUTLINE;
    use proptest::prelude::*;
    use std::f32::consts::PI;

    #[test]
    fn test_ship_polygon_closed() {
        let shape = Shape::closed_polygon(&SHIP_OUTLINE);
        assert_eq!(shape.len(), 4);
        for i in 0..4 {
            assert_eq!(shape.segments()[i].start, SHIP_OUTLINE[i]);
            assert_eq!(shape.segments()[i].end, SHIP_OUTLINE[(i + 1) % 4]);
        }
        // Last segment returns to the first point
        assert_eq!(shape.segments()[3].end, shape.segments()[0].start);
    }

    #[test]
    fn test_octagon_geometry() {
        let shape = Shape::regular_polygon(ASTEROID_SIDES, ASTEROID_RADIUS);
        assert_eq!(shape.len(), 8);
        for (j, seg) in shape.segments().iter().enumerate() {
            // Every vertex sits on the circumradius
            assert!((seg.start.length() - ASTEROID_RADIUS).abs() < 1e-3);
            assert!((seg.end.length() - ASTEROID_RADIUS).abs() < 1e-3);
            // Vertex j is at a 45° multiple
            let expected = TAU / 8.0 * j as f32;
            let actual = seg.start.y.atan2(seg.start.x).rem_euclid(TAU);
            assert!((actual - expected).abs() < 1e-3, "vertex {j}: {actual} vs {expected}");
        }
        // Consecutive segments share endpoints
        for j in 0..8 {
            let next = (j + 1) % 8;
            let gap = shape.segments()[j].end - shape.segments()[next].start;
            assert!(gap.length() < 1e-4);
        }
    }

    #[test]
    fn test_identity_rotation() {
        let shape = Shape::closed_polygon(&SHIP_OUTLINE);
        let pos = Vec2::new(640.0, 360.0);
        for (world, local) in shape.world_segments(pos, 0.0).zip(shape.segments()) {
            assert_eq!(world.start, pos + local.start);
            assert_eq!(world.end, pos + local.end);
        }
    }

    #[test]
    fn test_half_turn_rotation() {
        let shape = Shape::closed_polygon(&[Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)]);
        let world: Vec<Segment> = shape.world_segments(Vec2::ZERO, PI).collect();
        assert!((world[0].start - Vec2::new(-10.0, 0.0)).length() < 1e-4);
        assert!((world[0].end - Vec2::new(0.0, -10.0)).length() < 1e-4);
    }

    #[test]
    fn test_empty_polygon() {
        let shape = Shape::closed_polygon(&[]);
        assert!(shape.is_empty());
        assert_eq!(shape.world_segments(Vec2::ONE, 1.0).count(), 0);
    }

    proptest! {
        #[test]
        fn rotation_preserves_segment_length(
            angle in -10.0f32..10.0,
            x in -100.0f32..100.0,
            y in -100.0f32..100.0,
        ) {
            let shape = Shape::regular_polygon(8, 50.0);
            let pos = Vec2::new(x, y);
            for (world, local) in shape.world_segments(pos, angle).zip(shape.segments()) {
                let local_len = (local.end - local.start).length();
                let world_len = (world.end - world.start).length();
                prop_assert!((local_len - world_len).abs() < 1e-2);
            }
        }

        #[test]
        fn closed_polygon_is_cyclic(n in 3usize..16) {
            let points: Vec<Vec2> = (0..n)
                .map(|i| Vec2::new(i as f32 * 7.0, (i * i) as f32))
                .collect();
            let shape = Shape::closed_polygon(&points);
            prop_assert_eq!(shape.len(), n);
            for i in 0..n {
                prop_assert_eq!(shape.segments()[i].end, shape.segments()[(i + 1) % n].start);
            }
        }
    }
}
