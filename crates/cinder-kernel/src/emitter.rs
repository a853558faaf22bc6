//! Particle emitter controller.
//!
//! A [`ParticleEmitter`] owns its configuration, particle pool, emission
//! scheduler and random source, and runs one fixed step per
//! [`ParticleEmitter::update`]:
//!
//! 1. combine the external force with the constant acceleration
//! 2. advance the spawn clock and grow the pool by at most one slot
//! 3. age, retire or activate each slot, then interpolate and integrate
//!    every active particle
//! 4. advance the emitter lifetime and the wave clock
//! 5. clear the external force

use cinder_common::{CinderResult, ConfigError, EmitterId, FastRandom, RandomSource, Transform2D};
use glam::Vec2;
use tracing::debug;

use crate::collider::Collider;
use crate::collision::{self, CollisionReport};
use crate::emitter_config::EmitterConfig;
use crate::integrator::{integrate, interpolate_appearance};
use crate::particle::{Particle, ParticleInstance, RenderAttributes};
use crate::pool::ParticlePool;
use crate::scheduler::{EmissionScheduler, WavePhase};

/// What happened to a slot during the activity pass.
enum Activity {
    /// Particle is active and now sits in the given slot
    Live(usize),
    /// Particle expired and was swapped out of the slot
    Retired,
    /// Slot is inactive and stays that way
    Idle,
}

/// A pool of particles emitted from a moving anchor.
#[derive(Debug)]
pub struct ParticleEmitter {
    id: Option<EmitterId>,
    config: EmitterConfig,
    pool: ParticlePool,
    scheduler: EmissionScheduler,
    rng: Box<dyn RandomSource>,
    additional_force: Vec2,
    current_lifetime: f32,
    active: bool,
}

impl ParticleEmitter {
    /// Creates an emitter with a randomly seeded source.
    pub fn new(config: EmitterConfig) -> CinderResult<Self> {
        Self::with_rng(config, Box::new(FastRandom::new()))
    }

    /// Creates an emitter with a deterministic source.
    pub fn seeded(config: EmitterConfig, seed: u64) -> CinderResult<Self> {
        Self::with_rng(config, Box::new(FastRandom::with_seed(seed)))
    }

    /// Creates an emitter drawing jitter from `rng`.
    ///
    /// Emitters configured to start on trigger are created inactive.
    pub fn with_rng(config: EmitterConfig, rng: Box<dyn RandomSource>) -> CinderResult<Self> {
        config.validate()?;
        let scheduler = EmissionScheduler::new(&config)?;

        debug!(
            "Created emitter '{}' (capacity {}, {} particles/s)",
            config.name, config.capacity, config.particles_per_second
        );

        Ok(Self {
            id: None,
            pool: ParticlePool::with_capacity(config.capacity),
            scheduler,
            rng,
            additional_force: Vec2::ZERO,
            current_lifetime: 0.0,
            active: !config.start_on_trigger,
            config,
        })
    }

    /// Runs one simulation step of `dt` seconds with the emitter anchored
    /// at `anchor`.
    pub fn update(&mut self, dt: f32, anchor: &Transform2D) {
        let force = self.additional_force + self.config.constant_acceleration;
        self.scheduler.advance_spawn_clock(dt);

        if self
            .pool
            .ensure_capacity(&self.config, anchor, self.rng.as_mut())
            && self.pool.is_full()
        {
            debug!(
                "Emitter '{}' pool filled ({} slots)",
                self.config.name,
                self.pool.len()
            );
        }

        let mut slot = 0;
        while slot < self.pool.len() {
            match self.update_activity(slot, dt, anchor) {
                Activity::Live(at) => {
                    self.update_particle(at, force, dt);
                    slot += 1;
                },
                // An unvisited active particle was swapped into this slot
                Activity::Retired if slot < self.pool.live_count() => {},
                Activity::Retired | Activity::Idle => slot += 1,
            }
        }

        self.current_lifetime += dt;
        if self.current_lifetime > self.config.total_lifetime && !self.config.is_immortal() {
            self.current_lifetime = 0.0;
            if self.active {
                debug!("Emitter '{}' reached end of life", self.config.name);
            }
            self.active = false;
        }

        self.scheduler.tick_wave(dt, self.active);
        self.additional_force = Vec2::ZERO;
    }

    fn update_activity(&mut self, slot: usize, dt: f32, anchor: &Transform2D) -> Activity {
        let Some((particle, _)) = self.pool.slot_mut(slot) else {
            return Activity::Idle;
        };

        if particle.active {
            particle.current_lifetime += dt;
            if particle.current_lifetime > particle.total_lifetime {
                self.pool.retire(slot);
                return Activity::Retired;
            }
            return Activity::Live(slot);
        }

        if self
            .scheduler
            .can_spawn(self.active, self.pool.live_count(), self.pool.capacity())
        {
            let at = self
                .pool
                .activate(slot, &self.config, anchor, self.rng.as_mut());
            self.scheduler.consume_spawn();
            return Activity::Live(at);
        }

        Activity::Idle
    }

    fn update_particle(&mut self, slot: usize, force: Vec2, dt: f32) {
        if let Some((particle, attributes)) = self.pool.slot_mut(slot) {
            interpolate_appearance(particle, attributes, &self.config);
            integrate(particle, attributes, force, dt);
        }
    }

    /// Adds a force applied to every particle during the next update only.
    pub fn add_force(&mut self, force: Vec2) {
        self.additional_force += force;
    }

    /// Bounces active particles off an obstacle.
    pub fn check_collisions(
        &mut self,
        transform: &Transform2D,
        collider: &Collider,
    ) -> CollisionReport {
        collision::check_collisions(
            &mut self.pool,
            transform,
            collider,
            self.config.restitution,
            self.rng.as_mut(),
        )
    }

    /// Restarts the emitter from the beginning of its life and of a burst.
    pub fn restart(&mut self) {
        self.current_lifetime = 0.0;
        self.scheduler.reset();
        self.active = true;
        debug!("Restarted emitter '{}'", self.config.name);
    }

    /// Starts an emitter waiting for a trigger. Same as [`Self::restart`].
    pub fn trigger(&mut self) {
        self.restart();
    }

    /// Stops spawning. Live particles keep aging until they retire.
    pub fn stop(&mut self) {
        self.active = false;
        debug!("Stopped emitter '{}'", self.config.name);
    }

    /// Changes the spawn rate without touching the accumulated spawn time.
    pub fn set_particles_per_second(&mut self, particles_per_second: u32) -> Result<(), ConfigError> {
        self.scheduler.set_particles_per_second(particles_per_second)?;
        self.config.particles_per_second = particles_per_second;
        Ok(())
    }

    /// Handle assigned by the owning bundle.
    #[must_use]
    pub const fn id(&self) -> Option<EmitterId> {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: EmitterId) {
        self.id = Some(id);
    }

    /// Configuration the emitter was built with.
    #[must_use]
    pub const fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Checks if the emitter may spawn particles.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Current wave phase.
    #[must_use]
    pub const fn wave_phase(&self) -> WavePhase {
        self.scheduler.phase()
    }

    /// Emission timing state.
    #[must_use]
    pub const fn scheduler(&self) -> &EmissionScheduler {
        &self.scheduler
    }

    /// Time since the emitter started or last expired.
    #[must_use]
    pub const fn current_lifetime(&self) -> f32 {
        self.current_lifetime
    }

    /// Number of active particles.
    #[must_use]
    pub const fn live_count(&self) -> usize {
        self.pool.live_count()
    }

    /// The particle pool.
    #[must_use]
    pub const fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    /// Mutable access to one particle, e.g. to add a force to it.
    pub fn particle_mut(&mut self, slot: usize) -> Option<&mut Particle> {
        self.pool.slot_mut(slot).map(|(particle, _)| particle)
    }

    /// All render records; only the first [`Self::live_count`] are drawn.
    #[must_use]
    pub fn render_attributes(&self) -> &[RenderAttributes] {
        self.pool.render_attributes()
    }

    /// Render records of the active particles.
    #[must_use]
    pub fn live_render_attributes(&self) -> &[RenderAttributes] {
        self.pool.live_render_attributes()
    }

    /// GPU instance records of the active particles.
    #[must_use]
    pub fn instances(&self) -> Vec<ParticleInstance> {
        self.live_render_attributes()
            .iter()
            .map(RenderAttributes::to_instance)
            .collect()
    }
}
