//! Per-particle simulation state and render-facing attributes.
//!
//! A pool keeps two parallel arrays: [`Particle`] records that only the
//! simulation reads, and [`RenderAttributes`] records that the renderer
//! consumes. Each particle carries the index of its render record.

use bytemuck::{Pod, Zeroable};
use cinder_common::Transform2D;
use glam::{Vec2, Vec4};

/// Simulation state of one pool slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub(crate) active: bool,
    pub(crate) render_index: usize,
    pub(crate) total_lifetime: f32,
    pub(crate) current_lifetime: f32,
    pub(crate) velocity: Vec2,
    pub(crate) angular_velocity: f32,
    pub(crate) force: Vec2,
    pub(crate) old_position: Vec2,
    pub(crate) scale_start: f32,
    pub(crate) scale_end: f32,
}

impl Particle {
    /// Creates an inactive particle bound to a render record.
    #[must_use]
    pub(crate) const fn new(render_index: usize) -> Self {
        Self {
            active: false,
            render_index,
            total_lifetime: 0.0,
            current_lifetime: 0.0,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            force: Vec2::ZERO,
            old_position: Vec2::ZERO,
            scale_start: 1.0,
            scale_end: 1.0,
        }
    }

    /// Checks if the particle is live.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Index of the render record this particle drives.
    #[must_use]
    pub const fn render_index(&self) -> usize {
        self.render_index
    }

    /// Lifetime assigned at spawn, jitter included.
    #[must_use]
    pub const fn total_lifetime(&self) -> f32 {
        self.total_lifetime
    }

    /// Time lived since activation.
    #[must_use]
    pub const fn current_lifetime(&self) -> f32 {
        self.current_lifetime
    }

    /// Progress through the particle's life.
    ///
    /// Not clamped: it exceeds 1 for the frame in which the particle
    /// overstays its lifetime.
    #[must_use]
    pub fn life_fraction(&self) -> f32 {
        self.current_lifetime / self.total_lifetime
    }

    /// Current velocity.
    #[must_use]
    pub const fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Overrides the velocity.
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Current spin in radians per second.
    #[must_use]
    pub const fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    /// Force accumulated for the next integration step.
    #[must_use]
    pub const fn force(&self) -> Vec2 {
        self.force
    }

    /// Adds an impulse applied (and cleared) at the next integration step.
    pub fn add_force(&mut self, force: Vec2) {
        self.force += force;
    }

    /// Position before the most recent integration step.
    #[must_use]
    pub const fn old_position(&self) -> Vec2 {
        self.old_position
    }

    /// Scale at spawn, jitter included.
    #[must_use]
    pub const fn scale_start(&self) -> f32 {
        self.scale_start
    }

    /// Scale at end of life, jitter included.
    #[must_use]
    pub const fn scale_end(&self) -> f32 {
        self.scale_end
    }
}

/// What the renderer reads for one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderAttributes {
    /// World transform
    pub transform: Transform2D,
    /// Color (RGBA)
    pub color: Vec4,
}

impl Default for RenderAttributes {
    fn default() -> Self {
        Self {
            transform: Transform2D::IDENTITY,
            color: Vec4::ONE,
        }
    }
}

impl RenderAttributes {
    /// Packs the attributes into a GPU instance record.
    #[must_use]
    pub fn to_instance(&self) -> ParticleInstance {
        ParticleInstance {
            color: self.color.to_array(),
            position: self.transform.position.to_array(),
            scale: self.transform.scale.to_array(),
            rotation: self.transform.rotation,
            padding: [0.0; 3],
        }
    }
}

/// GPU-friendly particle instance.
/// Layout: 48 bytes total.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    /// Color RGBA (16 bytes).
    pub color: [f32; 4],
    /// Position XY (8 bytes).
    pub position: [f32; 2],
    /// Scale XY (8 bytes).
    pub scale: [f32; 2],
    /// Rotation in radians (4 bytes).
    pub rotation: f32,
    /// Padding for alignment.
    padding: [f32; 3],
}

impl ParticleInstance {
    /// Size in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_instance_size() {
        assert_eq!(ParticleInstance::SIZE, 48);
    }

    #[test]
    fn test_new_particle_is_inactive() {
        let particle = Particle::new(3);
        assert!(!particle.is_active());
        assert_eq!(particle.render_index(), 3);
        assert_eq!(particle.force(), Vec2::ZERO);
    }

    #[test]
    fn test_life_fraction_can_overshoot() {
        let mut particle = Particle::new(0);
        particle.total_lifetime = 2.0;
        particle.current_lifetime = 1.0;
        assert!((particle.life_fraction() - 0.5).abs() < f32::EPSILON);

        particle.current_lifetime = 2.5;
        assert!(particle.life_fraction() > 1.0);
    }

    #[test]
    fn test_forces_accumulate() {
        let mut particle = Particle::new(0);
        particle.add_force(Vec2::new(1.0, 0.0));
        particle.add_force(Vec2::new(0.0, 2.0));
        assert_eq!(particle.force(), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_instance_packing() {
        let attributes = RenderAttributes {
            transform: Transform2D::new(Vec2::new(1.0, 2.0), 0.5, Vec2::splat(3.0)),
            color: Vec4::new(0.1, 0.2, 0.3, 0.4),
        };
        let instance = attributes.to_instance();
        assert_eq!(instance.position, [1.0, 2.0]);
        assert_eq!(instance.scale, [3.0, 3.0]);
        assert_eq!(instance.color, [0.1, 0.2, 0.3, 0.4]);

        let instances = [instance, instance];
        let bytes: &[u8] = bytemuck::cast_slice(&instances);
        assert_eq!(bytes.len(), 2 * ParticleInstance::SIZE);
    }
}
