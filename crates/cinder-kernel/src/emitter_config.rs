//! Emitter configuration.
//!
//! An [`EmitterConfig`] describes how an emitter spawns particles and how
//! those particles look over their life. It is built once, validated, and
//! then owned read-only by the emitter.

use cinder_common::ConfigError;
use glam::{Vec2, Vec4};

/// Emission and appearance parameters for one emitter.
#[derive(Debug, Clone, PartialEq)]
pub struct EmitterConfig {
    /// Name used to tell emitters apart.
    pub name: String,
    /// Acceleration applied to every particle each frame.
    pub constant_acceleration: Vec2,

    /// Scale at spawn.
    pub initial_scale: f32,
    /// Scale at the end of a particle's life.
    pub final_scale: f32,
    /// Jitter applied independently to the initial and final scale.
    pub random_scale_range: f32,

    /// Color (RGBA) at spawn.
    pub initial_color: Vec4,
    /// Color (RGBA) at the end of a particle's life.
    pub final_color: Vec4,

    /// Spin in radians per second (0 = face the direction of travel).
    pub rotational_velocity: f32,
    /// Direction of travel at spawn, radians.
    pub initial_angle: f32,
    /// Jitter applied to the spawn direction, radians.
    pub random_angle_range: f32,
    /// Speed at spawn.
    pub initial_speed: f32,

    /// Maximum number of particles.
    pub capacity: usize,
    /// Lifetime of the emitter in seconds (0 = immortal).
    pub total_lifetime: f32,
    /// Lifetime of each particle in seconds.
    pub particle_lifetime: f32,
    /// Extra lifetime drawn from `[0, range)` per particle.
    pub random_lifetime_range: f32,
    /// Spawn rate.
    pub particles_per_second: u32,

    /// Spawn offset from the anchor position.
    pub offset: Vec2,
    /// Per-axis spawn position jitter.
    pub random_position_range: Vec2,

    /// Duration of an emission burst, seconds.
    pub wave_on_time: f32,
    /// Pause between bursts, seconds.
    pub wave_off_time: f32,

    /// Stay inactive until triggered.
    pub start_on_trigger: bool,
    /// Collide with interactable colliders.
    pub interactable: bool,
    /// Particles interact with each other.
    pub self_interacting: bool,
    /// Bounciness of particles against colliders.
    pub restitution: f32,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            constant_acceleration: Vec2::ZERO,
            initial_scale: 1.0,
            final_scale: 1.0,
            random_scale_range: 0.0,
            initial_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            final_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            rotational_velocity: 0.0,
            initial_angle: 0.0,
            random_angle_range: 0.23,
            initial_speed: 1.0,
            capacity: 100,
            total_lifetime: 0.0,
            particle_lifetime: 1.5,
            random_lifetime_range: 0.0,
            particles_per_second: 20,
            offset: Vec2::ZERO,
            random_position_range: Vec2::ZERO,
            wave_on_time: 0.0,
            wave_off_time: 0.0,
            start_on_trigger: false,
            interactable: false,
            self_interacting: false,
            restitution: 1.0,
        }
    }
}

impl EmitterConfig {
    /// Creates a default configuration with a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the particle capacity.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the spawn rate.
    #[must_use]
    pub fn with_rate(mut self, particles_per_second: u32) -> Self {
        self.particles_per_second = particles_per_second;
        self
    }

    /// Sets the particle lifetime and its jitter.
    #[must_use]
    pub fn with_particle_lifetime(mut self, lifetime: f32, jitter: f32) -> Self {
        self.particle_lifetime = lifetime;
        self.random_lifetime_range = jitter;
        self
    }

    /// Sets the emitter lifetime (0 = immortal).
    #[must_use]
    pub fn with_total_lifetime(mut self, lifetime: f32) -> Self {
        self.total_lifetime = lifetime;
        self
    }

    /// Sets the burst and pause durations.
    #[must_use]
    pub fn with_waves(mut self, on: f32, off: f32) -> Self {
        self.wave_on_time = on;
        self.wave_off_time = off;
        self
    }

    /// Sets the spawn direction, its jitter and the spawn speed.
    #[must_use]
    pub fn with_direction(mut self, angle: f32, jitter: f32, speed: f32) -> Self {
        self.initial_angle = angle;
        self.random_angle_range = jitter;
        self.initial_speed = speed;
        self
    }

    /// Sets the start and end colors.
    #[must_use]
    pub fn with_colors(mut self, initial: Vec4, end: Vec4) -> Self {
        self.initial_color = initial;
        self.final_color = end;
        self
    }

    /// Sets the start and end scale and their jitter.
    #[must_use]
    pub fn with_scale(mut self, initial: f32, end: f32, jitter: f32) -> Self {
        self.initial_scale = initial;
        self.final_scale = end;
        self.random_scale_range = jitter;
        self
    }

    /// Sets the constant acceleration.
    #[must_use]
    pub fn with_acceleration(mut self, acceleration: Vec2) -> Self {
        self.constant_acceleration = acceleration;
        self
    }

    /// Sets the spawn offset and per-axis position jitter.
    #[must_use]
    pub fn with_spawn_area(mut self, offset: Vec2, jitter: Vec2) -> Self {
        self.offset = offset;
        self.random_position_range = jitter;
        self
    }

    /// Sets the spin.
    #[must_use]
    pub fn with_rotational_velocity(mut self, velocity: f32) -> Self {
        self.rotational_velocity = velocity;
        self
    }

    /// Makes the emitter collide with interactable colliders.
    #[must_use]
    pub fn with_interactable(mut self, restitution: f32) -> Self {
        self.interactable = true;
        self.restitution = restitution;
        self
    }

    /// Keeps the emitter inactive until it is triggered.
    #[must_use]
    pub fn with_start_on_trigger(mut self, start_on_trigger: bool) -> Self {
        self.start_on_trigger = start_on_trigger;
        self
    }

    /// Checks if the emitter never expires on its own.
    #[must_use]
    pub fn is_immortal(&self) -> bool {
        self.total_lifetime == 0.0
    }

    /// Seconds between two spawns.
    ///
    /// Only meaningful for a validated configuration.
    #[must_use]
    pub fn spawn_interval(&self) -> f32 {
        spawn_interval(self.particles_per_second)
    }

    /// Checks the configuration for values the emitter cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particles_per_second == 0 {
            return Err(ConfigError::ZeroSpawnRate);
        }

        let scalars = [
            ("initial_scale", self.initial_scale),
            ("final_scale", self.final_scale),
            ("random_scale_range", self.random_scale_range),
            ("rotational_velocity", self.rotational_velocity),
            ("initial_angle", self.initial_angle),
            ("random_angle_range", self.random_angle_range),
            ("initial_speed", self.initial_speed),
            ("total_lifetime", self.total_lifetime),
            ("particle_lifetime", self.particle_lifetime),
            ("random_lifetime_range", self.random_lifetime_range),
            ("wave_on_time", self.wave_on_time),
            ("wave_off_time", self.wave_off_time),
            ("restitution", self.restitution),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }

        let vectors = [
            ("constant_acceleration", self.constant_acceleration.extend(0.0).extend(0.0)),
            ("offset", self.offset.extend(0.0).extend(0.0)),
            ("random_position_range", self.random_position_range.extend(0.0).extend(0.0)),
            ("initial_color", self.initial_color),
            ("final_color", self.final_color),
        ];
        for (field, value) in vectors {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }

        if self.particle_lifetime <= 0.0 {
            return Err(ConfigError::NonPositiveParticleLifetime(self.particle_lifetime));
        }
        if self.total_lifetime < 0.0 {
            return Err(ConfigError::NegativeEmitterLifetime(self.total_lifetime));
        }

        let non_negative = [
            ("random_scale_range", self.random_scale_range),
            ("random_angle_range", self.random_angle_range),
            ("random_lifetime_range", self.random_lifetime_range),
            ("random_position_range.x", self.random_position_range.x),
            ("random_position_range.y", self.random_position_range.y),
            ("wave_on_time", self.wave_on_time),
            ("wave_off_time", self.wave_off_time),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        Ok(())
    }
}

/// Seconds between spawns for a rate; callers reject a zero rate first.
pub(crate) fn spawn_interval(particles_per_second: u32) -> f32 {
    1.0 / particles_per_second as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EmitterConfig::default();
        assert_eq!(config.name, "default");
        assert_eq!(config.capacity, 100);
        assert_eq!(config.particles_per_second, 20);
        assert!((config.particle_lifetime - 1.5).abs() < f32::EPSILON);
        assert!((config.random_angle_range - 0.23).abs() < f32::EPSILON);
        assert!((config.restitution - 1.0).abs() < f32::EPSILON);
        assert!((config.initial_scale - 1.0).abs() < f32::EPSILON);
        assert!(config.is_immortal());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_rate_rejected() {
        let config = EmitterConfig::default().with_rate(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroSpawnRate));
    }

    #[test]
    fn test_zero_capacity_is_legal() {
        let config = EmitterConfig::default().with_capacity(0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_lifetime_rules() {
        let config = EmitterConfig::default().with_particle_lifetime(0.0, 0.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveParticleLifetime(0.0))
        );

        let config = EmitterConfig::default().with_total_lifetime(-1.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NegativeEmitterLifetime(-1.0))
        );
    }

    #[test]
    fn test_negative_ranges_rejected() {
        let config = EmitterConfig::default().with_waves(-0.5, 1.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative {
                field: "wave_on_time",
                ..
            })
        ));

        let config = EmitterConfig::default().with_spawn_area(Vec2::ZERO, Vec2::new(0.0, -2.0));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative {
                field: "random_position_range.y",
                ..
            })
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        let config = EmitterConfig::default().with_direction(f32::NAN, 0.0, 1.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonFinite {
                field: "initial_angle"
            })
        );
    }

    #[test]
    fn test_spawn_interval() {
        let config = EmitterConfig::default().with_rate(5);
        assert!((config.spawn_interval() - 0.2).abs() < f32::EPSILON);
    }
}
