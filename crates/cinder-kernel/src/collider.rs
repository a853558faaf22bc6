//! Obstacle shapes particles can collide with.
//!
//! Colliders are supplied by the caller each frame together with a world
//! transform. Only [`ColliderShape::Polygon`] takes part in particle
//! collision; other shapes are carried so a caller can pass any obstacle
//! without filtering first.

use cinder_common::GeometryError;
use glam::Vec2;

/// Physical body attached to a collider.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RigidBody {
    /// Linear velocity of the body
    pub velocity: Vec2,
}

impl RigidBody {
    /// Body at rest.
    pub const STATIC: Self = Self {
        velocity: Vec2::ZERO,
    };

    /// Creates a moving body.
    #[must_use]
    pub const fn moving(velocity: Vec2) -> Self {
        Self { velocity }
    }
}

/// Convex polygon in local space.
///
/// `normals[i]` is the outward normal of the edge
/// `vertices[i] -> vertices[(i + 1) % n]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vec2>,
    normals: Vec<Vec2>,
}

impl Polygon {
    /// Creates a polygon from vertices and matching edge normals.
    pub fn new(vertices: Vec<Vec2>, normals: Vec<Vec2>) -> Result<Self, GeometryError> {
        if vertices.len() != normals.len() {
            return Err(GeometryError::NormalCountMismatch {
                vertices: vertices.len(),
                normals: normals.len(),
            });
        }
        Ok(Self { vertices, normals })
    }

    /// Creates a polygon from counter-clockwise vertices, deriving outward
    /// unit normals.
    #[must_use]
    pub fn from_vertices(vertices: Vec<Vec2>) -> Self {
        let count = vertices.len();
        let normals = (0..count)
            .map(|i| {
                let edge = vertices[(i + 1) % count] - vertices[i];
                Vec2::new(edge.y, -edge.x).normalize_or_zero()
            })
            .collect();
        Self { vertices, normals }
    }

    /// Axis-aligned rectangle centred on the origin.
    #[must_use]
    pub fn rectangle(half_extents: Vec2) -> Self {
        let Vec2 { x, y } = half_extents;
        Self::from_vertices(vec![
            Vec2::new(-x, -y),
            Vec2::new(x, -y),
            Vec2::new(x, y),
            Vec2::new(-x, y),
        ])
    }

    /// Vertices in local space.
    #[must_use]
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Outward edge normals in local space.
    #[must_use]
    pub fn normals(&self) -> &[Vec2] {
        &self.normals
    }

    /// Endpoints of edge `index`.
    #[must_use]
    pub fn edge(&self, index: usize) -> (Vec2, Vec2) {
        let count = self.vertices.len();
        (self.vertices[index], self.vertices[(index + 1) % count])
    }
}

/// Kind tag of a collider shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Convex polygon
    Polygon,
    /// Circle
    Circle,
}

/// Geometry of a collider.
#[derive(Debug, Clone, PartialEq)]
pub enum ColliderShape {
    /// Convex polygon
    Polygon(Polygon),
    /// Circle around the collider origin
    Circle {
        /// Radius in local units
        radius: f32,
    },
}

impl ColliderShape {
    /// Returns the kind tag.
    #[must_use]
    pub const fn kind(&self) -> ShapeKind {
        match self {
            Self::Polygon(_) => ShapeKind::Polygon,
            Self::Circle { .. } => ShapeKind::Circle,
        }
    }
}

/// Obstacle shape plus the body that moves it.
#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    /// Geometry
    pub shape: ColliderShape,
    /// Physical body
    pub body: RigidBody,
}

impl Collider {
    /// Creates a static polygon collider.
    #[must_use]
    pub fn polygon(polygon: Polygon) -> Self {
        Self {
            shape: ColliderShape::Polygon(polygon),
            body: RigidBody::STATIC,
        }
    }

    /// Creates a static circle collider.
    #[must_use]
    pub const fn circle(radius: f32) -> Self {
        Self {
            shape: ColliderShape::Circle { radius },
            body: RigidBody::STATIC,
        }
    }

    /// Sets the body velocity.
    #[must_use]
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.body = RigidBody::moving(velocity);
        self
    }

    /// Kind tag of the shape.
    #[must_use]
    pub const fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatched_normals_rejected() {
        let err = Polygon::new(vec![Vec2::ZERO, Vec2::X, Vec2::Y], vec![Vec2::X])
            .expect_err("counts differ");
        assert_eq!(
            err,
            GeometryError::NormalCountMismatch {
                vertices: 3,
                normals: 1
            }
        );
    }

    #[test]
    fn test_rectangle_normals_point_outward() {
        let rect = Polygon::rectangle(Vec2::new(2.0, 1.0));
        assert_eq!(rect.vertices().len(), 4);
        assert_eq!(rect.normals(), &[Vec2::NEG_Y, Vec2::X, Vec2::Y, Vec2::NEG_X]);
        assert_eq!(rect.edge(1), (Vec2::new(2.0, -1.0), Vec2::new(2.0, 1.0)));
        assert_eq!(rect.edge(3), (Vec2::new(-2.0, 1.0), Vec2::new(-2.0, -1.0)));
    }

    #[test]
    fn test_shape_kind() {
        assert_eq!(Collider::circle(1.0).kind(), ShapeKind::Circle);
        let collider = Collider::polygon(Polygon::rectangle(Vec2::ONE)).with_velocity(Vec2::X);
        assert_eq!(collider.kind(), ShapeKind::Polygon);
        assert_eq!(collider.body.velocity, Vec2::X);
    }

    #[test]
    fn test_degenerate_polygon_builds() {
        let empty = Polygon::from_vertices(Vec::new());
        assert!(empty.vertices().is_empty());

        let point = Polygon::from_vertices(vec![Vec2::ONE]);
        assert_eq!(point.normals(), &[Vec2::ZERO]);
    }
}
