//! # Cinder Common
//!
//! Common types, utilities, and shared abstractions for Project Cinder.
//!
//! This crate provides foundational types used by the particle kernel and
//! the runner:
//! - Error taxonomy (configuration, geometry, top-level)
//! - Handle types (EmitterId)
//! - 2D transforms backed by `glam`
//! - Geometry primitives (half-planes, segment intersection)
//! - Injectable random-number sources
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod geometry;
pub mod ids;
pub mod random;
pub mod transform;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::geometry::*;
    pub use crate::ids::*;
    pub use crate::random::*;
    pub use crate::transform::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_transform_round_trip_through_prelude() {
        let transform = Transform2D::from_position(Vec2::new(3.0, -2.0));
        let p = transform.transform_point(Vec2::new(1.0, 1.0));
        assert!((p - Vec2::new(4.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_emitter_id_raw() {
        let id = EmitterId::new(7);
        assert_eq!(id.raw(), 7);
    }

    #[test]
    fn test_config_error_converts_to_top_level() {
        let err: CinderError = ConfigError::ZeroSpawnRate.into();
        assert!(err.to_string().contains("particles per second"));
    }
}
