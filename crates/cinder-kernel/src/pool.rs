//! Fixed-capacity particle pool with an active/inactive partition.
//!
//! Slots `[0, live_count)` always hold active particles and
//! `[live_count, len)` hold inactive ones. Activating or retiring a particle
//! swaps it across that boundary, so both operations are O(1) and never
//! allocate. The [`Particle`] array and the [`RenderAttributes`] array are
//! swapped together; a particle's render index therefore always equals its
//! slot, and the first `live_count` render records are exactly the ones to
//! draw.
//!
//! Slots are created lazily, one per [`ParticlePool::ensure_capacity`] call,
//! until the configured capacity is reached. After that the backing storage
//! never grows or shrinks.

use cinder_common::{RandomSource, Transform2D};
use glam::Vec2;

use crate::emitter_config::EmitterConfig;
use crate::particle::{Particle, RenderAttributes};

/// Arena of particle slots plus their render records.
#[derive(Debug, Clone, Default)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    render: Vec<RenderAttributes>,
    live_count: usize,
    capacity: usize,
}

impl ParticlePool {
    /// Creates an empty pool that will grow up to `capacity` slots.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            particles: Vec::new(),
            render: Vec::new(),
            live_count: 0,
            capacity,
        }
    }

    /// Appends one inactive, freshly seeded slot if the pool is not full.
    ///
    /// Returns `true` if a slot was added.
    pub fn ensure_capacity(
        &mut self,
        config: &EmitterConfig,
        anchor: &Transform2D,
        rng: &mut dyn RandomSource,
    ) -> bool {
        if self.particles.len() >= self.capacity {
            return false;
        }

        let slot = self.particles.len();
        self.render.push(RenderAttributes::default());
        self.particles.push(Particle::new(slot));
        self.reset(slot, config, anchor, rng);
        true
    }

    /// Re-seeds the particle in `slot` as if it had just been emitted from
    /// `anchor`. Does not change its activity or its slot.
    pub fn reset(
        &mut self,
        slot: usize,
        config: &EmitterConfig,
        anchor: &Transform2D,
        rng: &mut dyn RandomSource,
    ) {
        let mut jitter = Vec2::ZERO;
        if config.random_position_range.x != 0.0 {
            jitter.x = rng.symmetric(config.random_position_range.x);
        }
        if config.random_position_range.y != 0.0 {
            jitter.y = rng.symmetric(config.random_position_range.y);
        }

        let angle_jitter = if config.random_angle_range == 0.0 {
            0.0
        } else {
            rng.symmetric(config.random_angle_range)
        };

        let scale_start = config.initial_scale + rng.symmetric(config.random_scale_range);
        let scale_end = config.final_scale + rng.symmetric(config.random_scale_range);

        let lifetime_jitter = if config.random_lifetime_range == 0.0 {
            0.0
        } else {
            rng.range(0.0, config.random_lifetime_range)
        };

        let position = anchor.position + config.offset + jitter;
        let heading = config.initial_angle + angle_jitter;

        let particle = &mut self.particles[slot];
        particle.total_lifetime = config.particle_lifetime + lifetime_jitter;
        particle.current_lifetime = 0.0;
        particle.velocity = Vec2::new(heading.cos(), heading.sin()) * config.initial_speed;
        particle.angular_velocity = config.rotational_velocity;
        particle.force = Vec2::ZERO;
        particle.old_position = position;
        particle.scale_start = scale_start;
        particle.scale_end = scale_end;

        let attributes = &mut self.render[particle.render_index];
        attributes.transform = Transform2D::new(position, anchor.rotation, Vec2::splat(scale_start));
        attributes.color = config.initial_color;
    }

    /// Re-seeds the inactive particle in `slot`, marks it active and moves
    /// it to the first inactive slot.
    ///
    /// Returns the slot the particle now occupies.
    ///
    /// # Panics
    /// If `slot` is out of range or already active.
    pub fn activate(
        &mut self,
        slot: usize,
        config: &EmitterConfig,
        anchor: &Transform2D,
        rng: &mut dyn RandomSource,
    ) -> usize {
        assert!(slot < self.particles.len(), "slot {slot} out of range");
        assert!(
            !self.particles[slot].active,
            "activating particle in slot {slot} that is already active"
        );

        self.reset(slot, config, anchor, rng);
        self.particles[slot].active = true;

        let target = self.live_count;
        self.swap_slots(slot, target);
        self.live_count += 1;
        target
    }

    /// Marks the active particle in `slot` inactive and moves it to the last
    /// active slot, shrinking the live range by one.
    ///
    /// Returns the slot the retired particle now occupies.
    ///
    /// # Panics
    /// If `slot` is out of range or already inactive.
    pub fn retire(&mut self, slot: usize) -> usize {
        assert!(slot < self.particles.len(), "slot {slot} out of range");
        assert!(
            self.particles[slot].active,
            "retiring particle in slot {slot} that is already inactive"
        );

        let particle = &mut self.particles[slot];
        particle.active = false;
        particle.current_lifetime = 0.0;

        let target = self.live_count - 1;
        self.swap_slots(slot, target);
        self.live_count -= 1;
        target
    }

    /// Exchanges two slots together with their render records.
    fn swap_slots(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }

        let render_a = self.particles[a].render_index;
        let render_b = self.particles[b].render_index;
        assert!(
            render_a < self.render.len() && render_b < self.render.len(),
            "render index out of range ({render_a}, {render_b}) for {} records",
            self.render.len()
        );

        self.render.swap(render_a, render_b);
        self.particles[a].render_index = render_b;
        self.particles[b].render_index = render_a;
        self.particles.swap(a, b);
    }

    /// Number of slots created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Checks if no slot has been created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Maximum number of slots.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Checks if every slot has been created.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.particles.len() >= self.capacity
    }

    /// Number of active particles.
    #[must_use]
    pub const fn live_count(&self) -> usize {
        self.live_count
    }

    /// All slots, active prefix first.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Active particles only.
    #[must_use]
    pub fn live_particles(&self) -> &[Particle] {
        &self.particles[..self.live_count]
    }

    /// Particle in a slot.
    #[must_use]
    pub fn particle(&self, slot: usize) -> Option<&Particle> {
        self.particles.get(slot)
    }

    /// Render record of the particle in a slot.
    #[must_use]
    pub fn attributes(&self, slot: usize) -> Option<&RenderAttributes> {
        self.particles
            .get(slot)
            .and_then(|p| self.render.get(p.render_index))
    }

    /// Mutable access to a slot and its render record.
    pub fn slot_mut(&mut self, slot: usize) -> Option<(&mut Particle, &mut RenderAttributes)> {
        let particle = self.particles.get_mut(slot)?;
        let attributes = self.render.get_mut(particle.render_index)?;
        Some((particle, attributes))
    }

    /// All render records; only the first `live_count` are meaningful.
    #[must_use]
    pub fn render_attributes(&self) -> &[RenderAttributes] {
        &self.render
    }

    /// Render records of the active particles.
    #[must_use]
    pub fn live_render_attributes(&self) -> &[RenderAttributes] {
        &self.render[..self.live_count]
    }

    /// Verifies the partition and the particle/render pairing.
    #[must_use]
    pub fn check_invariants(&self) -> bool {
        self.live_count <= self.particles.len()
            && self.particles.len() <= self.capacity
            && self.particles.len() == self.render.len()
            && self
                .particles
                .iter()
                .enumerate()
                .all(|(slot, p)| p.active == (slot < self.live_count) && p.render_index == slot)
    }
}
