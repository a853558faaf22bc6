//! Built-in emitter configurations.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Vec2, Vec4};

use crate::emitter_config::EmitterConfig;

/// Names accepted by [`preset_by_name`].
pub const PRESET_NAMES: [&str; 4] = ["fire", "smoke", "sparks", "fountain"];

/// Standard gravity in world units per second squared.
const GRAVITY: Vec2 = Vec2::new(0.0, -9.8);

/// Rising, fading flames.
#[must_use]
pub fn fire() -> EmitterConfig {
    EmitterConfig::named("fire")
        .with_capacity(200)
        .with_rate(60)
        .with_direction(FRAC_PI_2, 0.35, 2.5)
        .with_particle_lifetime(0.8, 0.4)
        .with_colors(Vec4::new(1.0, 0.6, 0.1, 1.0), Vec4::new(0.8, 0.1, 0.0, 0.0))
        .with_scale(0.6, 0.1, 0.1)
        .with_acceleration(Vec2::new(0.0, 1.5))
        .with_spawn_area(Vec2::ZERO, Vec2::new(0.2, 0.05))
}

/// Slow, spinning, expanding smoke.
#[must_use]
pub fn smoke() -> EmitterConfig {
    EmitterConfig::named("smoke")
        .with_capacity(80)
        .with_rate(15)
        .with_direction(FRAC_PI_2, 0.3, 0.8)
        .with_particle_lifetime(3.0, 1.0)
        .with_colors(Vec4::new(0.4, 0.4, 0.4, 0.8), Vec4::new(0.7, 0.7, 0.7, 0.0))
        .with_scale(0.5, 2.0, 0.2)
        .with_rotational_velocity(0.6)
        .with_acceleration(Vec2::new(0.2, 0.3))
        .with_spawn_area(Vec2::new(0.0, 0.5), Vec2::new(0.1, 0.1))
}

/// Bursts of bouncing sparks in every direction.
#[must_use]
pub fn sparks() -> EmitterConfig {
    EmitterConfig::named("sparks")
        .with_capacity(150)
        .with_rate(120)
        .with_waves(0.2, 0.8)
        .with_direction(0.0, PI, 6.0)
        .with_particle_lifetime(0.5, 0.3)
        .with_colors(Vec4::new(1.0, 1.0, 0.8, 1.0), Vec4::new(1.0, 0.5, 0.0, 0.0))
        .with_scale(0.15, 0.05, 0.02)
        .with_acceleration(GRAVITY)
        .with_interactable(0.6)
}

/// Water arcing up and falling back.
#[must_use]
pub fn fountain() -> EmitterConfig {
    EmitterConfig::named("fountain")
        .with_capacity(300)
        .with_rate(80)
        .with_direction(FRAC_PI_2, 0.25, 7.0)
        .with_particle_lifetime(2.0, 0.5)
        .with_colors(Vec4::new(0.3, 0.6, 1.0, 0.9), Vec4::new(0.1, 0.3, 0.9, 0.2))
        .with_scale(0.3, 0.2, 0.05)
        .with_acceleration(GRAVITY)
        .with_interactable(0.4)
}

/// Looks up a preset by name (case-insensitive).
#[must_use]
pub fn preset_by_name(name: &str) -> Option<EmitterConfig> {
    match name.to_ascii_lowercase().as_str() {
        "fire" => Some(fire()),
        "smoke" => Some(smoke()),
        "sparks" => Some(sparks()),
        "fountain" => Some(fountain()),
        _ => None,
    }
}
