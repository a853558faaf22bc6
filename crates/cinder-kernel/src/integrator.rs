//! Motion and appearance updates for active particles.

use glam::Vec2;

use crate::emitter_config::EmitterConfig;
use crate::particle::{Particle, RenderAttributes};

/// Interpolates color and scale over the particle's life.
///
/// The life fraction is not clamped; it may exceed 1 for the frame in which
/// a particle overstays before it is retired.
pub fn interpolate_appearance(
    particle: &Particle,
    attributes: &mut RenderAttributes,
    config: &EmitterConfig,
) {
    let t = particle.life_fraction();
    attributes.color = config.initial_color.lerp(config.final_color, t);

    let scale = particle.scale_start + (particle.scale_end - particle.scale_start) * t;
    attributes.transform.scale = Vec2::splat(scale);
}

/// Advances one particle by `dt` under the frame's external force.
///
/// Velocity takes a half step of `force` plus the particle's own accumulated
/// force, which is then cleared. Particles without spin face their heading.
#[allow(clippy::float_cmp)]
pub fn integrate(particle: &mut Particle, attributes: &mut RenderAttributes, force: Vec2, dt: f32) {
    particle.velocity += force * (dt / 2.0) + particle.force;

    let position = attributes.transform.position;
    attributes.transform.position = position + particle.velocity * dt;
    attributes.transform.rotation += particle.angular_velocity * dt;
    particle.old_position = position;

    if particle.angular_velocity == 0.0 {
        attributes.transform.rotation = particle.velocity.y.atan2(particle.velocity.x);
    }

    particle.force = Vec2::ZERO;
}
