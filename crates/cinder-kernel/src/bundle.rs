//! Collections of emitters that move and collide together.
//!
//! An [`EmitterBundle`] owns its emitters and hands out [`EmitterId`]
//! handles. Each emitter stores its own handle, so code holding an emitter
//! can find its way back to the bundle without a pointer.

use std::collections::BTreeMap;

use cinder_common::{CinderError, CinderResult, EmitterId, Transform2D};
use glam::Vec2;
use tracing::debug;

use crate::collider::Collider;
use crate::collision::CollisionReport;
use crate::emitter::ParticleEmitter;
use crate::emitter_config::EmitterConfig;
use crate::particle::ParticleInstance;

/// Emitters sharing one anchor.
#[derive(Debug, Default)]
pub struct EmitterBundle {
    emitters: BTreeMap<EmitterId, ParticleEmitter>,
    pending_removal: Vec<EmitterId>,
    next_emitter_id: u32,
}

impl EmitterBundle {
    /// Creates an empty bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an emitter and returns its handle.
    ///
    /// Handles wrap around after `u32::MAX`, skipping ones still in use.
    pub fn add(&mut self, mut emitter: ParticleEmitter) -> EmitterId {
        let mut id = EmitterId::new(self.next_emitter_id);
        while self.emitters.contains_key(&id) {
            self.next_emitter_id = self.next_emitter_id.wrapping_add(1);
            id = EmitterId::new(self.next_emitter_id);
        }
        self.next_emitter_id = self.next_emitter_id.wrapping_add(1);

        emitter.set_id(id);
        debug!("Added emitter {} '{}'", id, emitter.config().name);
        self.emitters.insert(id, emitter);
        id
    }

    /// Builds an emitter from a configuration and adds it.
    pub fn spawn(&mut self, config: EmitterConfig) -> CinderResult<EmitterId> {
        let emitter = ParticleEmitter::new(config)?;
        Ok(self.add(emitter))
    }

    /// Removes an emitter immediately.
    pub fn remove(&mut self, id: EmitterId) -> CinderResult<ParticleEmitter> {
        let emitter = self
            .emitters
            .remove(&id)
            .ok_or(CinderError::EmitterNotFound(id))?;
        debug!("Removed emitter {}", id);
        Ok(emitter)
    }

    /// Schedules an emitter for removal at the start of the next update.
    pub fn mark_removed(&mut self, id: EmitterId) -> CinderResult<()> {
        if !self.emitters.contains_key(&id) {
            return Err(CinderError::EmitterNotFound(id));
        }
        if !self.pending_removal.contains(&id) {
            self.pending_removal.push(id);
        }
        Ok(())
    }

    /// Gets an emitter by handle.
    #[must_use]
    pub fn get(&self, id: EmitterId) -> Option<&ParticleEmitter> {
        self.emitters.get(&id)
    }

    /// Gets a mutable emitter by handle.
    pub fn get_mut(&mut self, id: EmitterId) -> Option<&mut ParticleEmitter> {
        self.emitters.get_mut(&id)
    }

    /// Iterates over the emitters in handle order.
    pub fn iter(&self) -> impl Iterator<Item = (EmitterId, &ParticleEmitter)> {
        self.emitters.iter().map(|(id, emitter)| (*id, emitter))
    }

    /// Steps every emitter once, after dropping emitters marked for
    /// removal.
    pub fn update(&mut self, dt: f32, anchor: &Transform2D) {
        for id in self.pending_removal.drain(..) {
            if self.emitters.remove(&id).is_some() {
                debug!("Swept emitter {}", id);
            }
        }

        for emitter in self.emitters.values_mut() {
            emitter.update(dt, anchor);
        }
    }

    /// Adds a one-update force to every emitter.
    pub fn add_force(&mut self, force: Vec2) {
        for emitter in self.emitters.values_mut() {
            emitter.add_force(force);
        }
    }

    /// Starts every emitter that waits for a trigger.
    pub fn trigger_all(&mut self) {
        for emitter in self.emitters.values_mut() {
            if emitter.config().start_on_trigger {
                emitter.trigger();
            }
        }
    }

    /// Stops every emitter.
    pub fn stop_all(&mut self) {
        for emitter in self.emitters.values_mut() {
            emitter.stop();
        }
    }

    /// Bounces the particles of interactable emitters off an obstacle.
    pub fn check_collisions(
        &mut self,
        transform: &Transform2D,
        collider: &Collider,
    ) -> CollisionReport {
        let mut report = CollisionReport::default();
        for emitter in self.emitters.values_mut() {
            if emitter.config().interactable {
                report.merge(emitter.check_collisions(transform, collider));
            }
        }
        report
    }

    /// Number of emitters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.emitters.len()
    }

    /// Checks if the bundle has no emitters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emitters.is_empty()
    }

    /// Active particles across all emitters.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.emitters.values().map(ParticleEmitter::live_count).sum()
    }

    /// GPU instance records of every active particle, emitter by emitter.
    #[must_use]
    pub fn instances(&self) -> Vec<ParticleInstance> {
        let mut instances = Vec::with_capacity(self.live_count());
        for emitter in self.emitters.values() {
            instances.extend(
                emitter
                    .live_render_attributes()
                    .iter()
                    .map(|attributes| attributes.to_instance()),
            );
        }
        instances
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collider::Polygon;

    fn emitter(config: EmitterConfig) -> ParticleEmitter {
        ParticleEmitter::seeded(config.with_waves(1000.0, 0.0), 8).expect("valid config")
    }

    #[test]
    fn test_add_assigns_handles() {
        let mut bundle = EmitterBundle::new();
        let a = bundle.add(emitter(EmitterConfig::named("a")));
        let b = bundle.add(emitter(EmitterConfig::named("b")));

        assert_ne!(a, b);
        assert_eq!(bundle.len(), 2);
        assert_eq!(bundle.get(a).and_then(ParticleEmitter::id), Some(a));
        assert_eq!(bundle.get(b).map(|e| e.config().name.as_str()), Some("b"));
    }

    #[test]
    fn test_wrapped_handles_skip_live_emitters() {
        let mut bundle = EmitterBundle::new();
        let first = bundle.add(emitter(EmitterConfig::named("first")));
        assert_eq!(first, EmitterId::new(0));

        bundle.next_emitter_id = u32::MAX;
        let last = bundle.add(emitter(EmitterConfig::named("last")));
        let wrapped = bundle.add(emitter(EmitterConfig::named("wrapped")));

        assert_eq!(last, EmitterId::new(u32::MAX));
        assert_eq!(wrapped, EmitterId::new(1));
        assert_eq!(bundle.len(), 3);
        assert_eq!(
            bundle.get(first).map(|e| e.config().name.as_str()),
            Some("first")
        );
    }

    #[test]
    fn test_spawn_rejects_bad_config() {
        let mut bundle = EmitterBundle::new();
        let result = bundle.spawn(EmitterConfig::default().with_rate(0));
        assert!(matches!(result, Err(CinderError::Config(_))));
        assert!(bundle.is_empty());
    }

    #[test]
    fn test_remove_unknown_handle() {
        let mut bundle = EmitterBundle::new();
        let missing = EmitterId::new(99);
        assert!(matches!(
            bundle.remove(missing),
            Err(CinderError::EmitterNotFound(id)) if id == missing
        ));
        assert!(bundle.mark_removed(missing).is_err());
    }

    #[test]
    fn test_mark_removed_sweeps_on_update() {
        let mut bundle = EmitterBundle::new();
        let id = bundle.add(emitter(EmitterConfig::default()));
        bundle.mark_removed(id).expect("emitter exists");
        assert!(bundle.get(id).is_some());

        bundle.update(0.016, &Transform2D::IDENTITY);
        assert!(bundle.get(id).is_none());
        assert!(bundle.is_empty());
    }

    #[test]
    fn test_update_and_instances() {
        let mut bundle = EmitterBundle::new();
        bundle.add(emitter(EmitterConfig::default().with_rate(100)));
        bundle.add(emitter(EmitterConfig::default().with_rate(100)));

        for _ in 0..5 {
            bundle.update(0.05, &Transform2D::IDENTITY);
        }
        assert!(bundle.live_count() > 0);
        assert_eq!(bundle.instances().len(), bundle.live_count());
    }

    #[test]
    fn test_trigger_all_only_starts_waiting_emitters() {
        let mut bundle = EmitterBundle::new();
        let waiting = bundle.add(emitter(EmitterConfig::default().with_start_on_trigger(true)));
        let stopped = bundle.add(emitter(EmitterConfig::default()));
        bundle.get_mut(stopped).expect("emitter exists").stop();

        bundle.trigger_all();
        assert!(bundle.get(waiting).expect("emitter exists").is_active());
        assert!(!bundle.get(stopped).expect("emitter exists").is_active());

        bundle.stop_all();
        assert!(bundle.iter().all(|(_, e)| !e.is_active()));
    }

    #[test]
    fn test_collisions_skip_non_interactable() {
        let config = EmitterConfig::default()
            .with_capacity(1)
            .with_rate(1000)
            .with_direction(std::f32::consts::PI, 0.0, 1.0)
            .with_spawn_area(Vec2::new(1.05, 0.0), Vec2::ZERO)
            .with_particle_lifetime(100.0, 0.0);

        let mut bundle = EmitterBundle::new();
        bundle.add(emitter(config.clone()));
        bundle.add(emitter(config.with_interactable(1.0)));
        bundle.update(0.1, &Transform2D::IDENTITY);

        let obstacle = Collider::polygon(Polygon::rectangle(Vec2::ONE));
        let report = bundle.check_collisions(&Transform2D::IDENTITY, &obstacle);
        assert_eq!(report.tested, 1);
        assert_eq!(report.resolved, 1);
    }

    #[test]
    fn test_add_force_reaches_every_emitter() {
        let config = EmitterConfig::default()
            .with_capacity(1)
            .with_rate(1000)
            .with_direction(0.0, 0.0, 0.0)
            .with_particle_lifetime(100.0, 0.0);
        let mut bundle = EmitterBundle::new();
        bundle.add(emitter(config.clone()));
        bundle.add(emitter(config));
        bundle.update(0.01, &Transform2D::IDENTITY);

        bundle.add_force(Vec2::new(0.0, 4.0));
        bundle.update(0.5, &Transform2D::IDENTITY);
        for (_, emitter) in bundle.iter() {
            let velocity = emitter.pool().particles()[0].velocity();
            assert!((velocity.y - 1.0).abs() < 1e-5);
        }
    }
}
