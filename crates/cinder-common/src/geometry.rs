//! Geometry primitives for collision queries.
//!
//! ## Overview
//!
//! - Half-planes in homogeneous form, used to test whether a point lies
//!   inside a convex polygon (inside every edge's half-plane).
//! - Closed segment/segment intersection, used to find which polygon edge a
//!   particle's motion crossed.

use glam::{Vec2, Vec3};

/// Infinite line through a polygon edge, split into inside and outside.
///
/// Stored as `(nx, ny, -d)` where `n` is the outward face normal and
/// `d = n . p` for any point `p` on the edge. A point is outside when
/// `(x, y, 1) . (nx, ny, -d) > 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfPlane {
    /// Outward normal of the boundary line
    pub normal: Vec2,
    /// Homogeneous offset (`-n . p`)
    pub offset: f32,
}

impl HalfPlane {
    /// Builds the half-plane of an edge from its outward normal and one of
    /// its endpoints.
    #[must_use]
    pub fn from_edge(normal: Vec2, point: Vec2) -> Self {
        Self {
            normal,
            offset: -normal.dot(point),
        }
    }

    /// Returns the homogeneous coefficients `(nx, ny, -d)`.
    #[must_use]
    pub fn coefficients(&self) -> Vec3 {
        self.normal.extend(self.offset)
    }

    /// Signed distance scaled by the normal's length; positive is outside.
    #[must_use]
    pub fn signed_distance(&self, point: Vec2) -> f32 {
        point.extend(1.0).dot(self.coefficients())
    }

    /// Checks if a point is on the inner side (or on the boundary line).
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        self.signed_distance(point) <= 0.0
    }
}

/// Intersects the closed segments `a0 -> a1` and `b0 -> b1`.
///
/// Returns the intersection point, or `None` when the segments miss each
/// other, are parallel, or either one has zero length.
#[must_use]
pub fn segment_intersection(a0: Vec2, a1: Vec2, b0: Vec2, b1: Vec2) -> Option<Vec2> {
    let r = a1 - a0;
    let s = b1 - b0;
    let denom = r.perp_dot(s);
    if denom.abs() <= f32::EPSILON {
        return None;
    }

    let diff = b0 - a0;
    let t = diff.perp_dot(s) / denom;
    let u = diff.perp_dot(r) / denom;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(a0 + r * t)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_plane_sides() {
        // Right edge of a unit box, normal pointing +x
        let plane = HalfPlane::from_edge(Vec2::X, Vec2::new(1.0, -1.0));
        assert!(plane.contains(Vec2::ZERO));
        assert!(plane.contains(Vec2::new(1.0, 5.0)));
        assert!(!plane.contains(Vec2::new(1.01, 0.0)));
        assert!((plane.signed_distance(Vec2::new(3.0, 0.0)) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_crossing_segments() {
        let hit = segment_intersection(
            Vec2::new(1.0, -1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.5, 0.0),
            Vec2::new(1.5, 0.0),
        );
        let hit = hit.expect("segments cross");
        assert!((hit - Vec2::new(1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_disjoint_segments() {
        let hit = segment_intersection(
            Vec2::new(1.0, -1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.2, 0.0),
            Vec2::new(0.8, 0.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_parallel_and_degenerate_segments() {
        let parallel = segment_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
        );
        assert!(parallel.is_none());

        let point = segment_intersection(
            Vec2::new(0.0, -1.0),
            Vec2::new(0.0, 1.0),
            Vec2::ZERO,
            Vec2::ZERO,
        );
        assert!(point.is_none());
    }
}
