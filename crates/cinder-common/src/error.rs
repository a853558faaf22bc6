//! Error types for Project Cinder.

use thiserror::Error;

use crate::ids::EmitterId;

/// Top-level error type for Cinder operations.
#[derive(Debug, Error)]
pub enum CinderError {
    /// Emitter configuration was rejected
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Collider geometry was rejected
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// No emitter is registered under the handle
    #[error("Emitter not found: {0:?}")]
    EmitterNotFound(EmitterId),
}

/// Emitter configuration errors.
///
/// These are fatal for the emitter being built: the configuration is
/// rejected at construction time instead of producing a broken emitter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Spawn interval would be `1 / 0`
    #[error("particles per second must be greater than zero")]
    ZeroSpawnRate,

    /// Particles must live for a positive duration
    #[error("particle lifetime must be positive, got {0}")]
    NonPositiveParticleLifetime(f32),

    /// Emitter lifetime is a duration or the `0` immortal sentinel
    #[error("emitter lifetime must not be negative, got {0}")]
    NegativeEmitterLifetime(f32),

    /// A jitter range or wave duration below zero
    #[error("{field} must not be negative, got {value}")]
    Negative {
        /// Name of the offending field
        field: &'static str,
        /// Value that was supplied
        value: f32,
    },

    /// NaN or infinity in a numeric field
    #[error("{field} must be finite")]
    NonFinite {
        /// Name of the offending field
        field: &'static str,
    },
}

/// Collider geometry errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// Every polygon edge needs exactly one face normal
    #[error("polygon has {vertices} vertices but {normals} normals")]
    NormalCountMismatch {
        /// Number of vertices supplied
        vertices: usize,
        /// Number of normals supplied
        normals: usize,
    },
}

/// Result type alias for Cinder operations.
pub type CinderResult<T> = Result<T, CinderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ConfigError::Negative {
            field: "wave_on_time",
            value: -1.0,
        };
        assert!(err.to_string().contains("wave_on_time"));

        let err = GeometryError::NormalCountMismatch {
            vertices: 4,
            normals: 3,
        };
        assert_eq!(err.to_string(), "polygon has 4 vertices but 3 normals");
    }

    #[test]
    fn test_from_conversions() {
        let err: CinderError = GeometryError::NormalCountMismatch {
            vertices: 1,
            normals: 0,
        }
        .into();
        assert!(matches!(err, CinderError::Geometry(_)));

        let err: CinderError = ConfigError::ZeroSpawnRate.into();
        assert!(matches!(err, CinderError::Config(ConfigError::ZeroSpawnRate)));

        let err = CinderError::EmitterNotFound(EmitterId::new(3));
        assert!(err.to_string().starts_with("Emitter not found"));
    }
}
