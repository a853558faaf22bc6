//! 2D world transforms.

use glam::{Mat2, Vec2};
use serde::{Deserialize, Serialize};

/// Position, rotation and scale of an object in world space.
///
/// Rotation is in radians, counter-clockwise. The linear part
/// (scale then rotation) is available as a [`Mat2`] for transforming
/// collider vertices and normals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    /// World position
    pub position: Vec2,
    /// Rotation in radians
    pub rotation: f32,
    /// Per-axis scale
    pub scale: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    /// Transform at the origin with no rotation and unit scale.
    pub const IDENTITY: Self = Self {
        position: Vec2::ZERO,
        rotation: 0.0,
        scale: Vec2::ONE,
    };

    /// Creates a new transform.
    #[must_use]
    pub const fn new(position: Vec2, rotation: f32, scale: Vec2) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Creates a translation-only transform.
    #[must_use]
    pub const fn from_position(position: Vec2) -> Self {
        Self {
            position,
            rotation: 0.0,
            scale: Vec2::ONE,
        }
    }

    /// Sets the rotation.
    #[must_use]
    pub const fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets the scale.
    #[must_use]
    pub const fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Returns the linear part of the transform (rotation * scale).
    #[must_use]
    pub fn linear_transformation(&self) -> Mat2 {
        Mat2::from_scale_angle(self.scale, self.rotation)
    }

    /// Maps a local-space point into world space.
    #[must_use]
    pub fn transform_point(&self, point: Vec2) -> Vec2 {
        self.linear_transformation() * point + self.position
    }

    /// Maps a local-space direction into world space (no translation).
    #[must_use]
    pub fn transform_vector(&self, vector: Vec2) -> Vec2 {
        self.linear_transformation() * vector
    }
}
