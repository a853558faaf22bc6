//! Wave-gated emission timing.
//!
//! Two clocks run side by side. The wave clock alternates the emitter
//! between bursts ([`WavePhase::On`]) and pauses ([`WavePhase::Paused`]) and
//! only advances while the emitter is active. The spawn clock accumulates
//! time every frame, paused or not; each activation consumes one spawn
//! interval from it, so fractional overflow carries into the next frame.

use cinder_common::ConfigError;
use tracing::trace;

use crate::emitter_config::{spawn_interval, EmitterConfig};

/// Phase of the burst/pause duty cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WavePhase {
    /// Emitting
    #[default]
    On,
    /// Between bursts
    Paused,
}

/// Timing state machine deciding when a particle may be activated.
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionScheduler {
    phase: WavePhase,
    wave_time: f32,
    spawn_time: f32,
    spawn_interval: f32,
    wave_on_time: f32,
    wave_off_time: f32,
}

impl EmissionScheduler {
    /// Creates a scheduler in the [`WavePhase::On`] phase with both clocks
    /// at zero.
    pub fn new(config: &EmitterConfig) -> Result<Self, ConfigError> {
        if config.particles_per_second == 0 {
            return Err(ConfigError::ZeroSpawnRate);
        }

        Ok(Self {
            phase: WavePhase::On,
            wave_time: 0.0,
            spawn_time: 0.0,
            spawn_interval: spawn_interval(config.particles_per_second),
            wave_on_time: config.wave_on_time,
            wave_off_time: config.wave_off_time,
        })
    }

    /// Advances the spawn clock. Runs every frame regardless of phase.
    pub fn advance_spawn_clock(&mut self, dt: f32) {
        self.spawn_time += dt;
    }

    /// Checks if a particle may be activated right now.
    #[must_use]
    pub fn can_spawn(&self, emitter_active: bool, live_count: usize, capacity: usize) -> bool {
        self.spawn_time > self.spawn_interval
            && emitter_active
            && self.phase == WavePhase::On
            && live_count < capacity
    }

    /// Consumes one spawn interval after a successful activation.
    pub fn consume_spawn(&mut self) {
        self.spawn_time -= self.spawn_interval;
    }

    /// Advances the wave clock and returns the new phase on a transition.
    ///
    /// An inactive emitter's wave clock does not move.
    pub fn tick_wave(&mut self, dt: f32, emitter_active: bool) -> Option<WavePhase> {
        if !emitter_active {
            return None;
        }

        self.wave_time += dt;
        let (limit, next) = match self.phase {
            WavePhase::On => (self.wave_on_time, WavePhase::Paused),
            WavePhase::Paused => (self.wave_off_time, WavePhase::On),
        };
        if self.wave_time < limit {
            return None;
        }

        trace!("Wave {:?} -> {:?} after {:.3}s", self.phase, next, self.wave_time);
        self.phase = next;
        self.wave_time = 0.0;
        Some(next)
    }

    /// Returns to the start of a burst with both clocks cleared.
    pub fn reset(&mut self) {
        self.phase = WavePhase::On;
        self.wave_time = 0.0;
        self.spawn_time = 0.0;
    }

    /// Changes the spawn rate, keeping the accumulated spawn time.
    pub fn set_particles_per_second(&mut self, particles_per_second: u32) -> Result<(), ConfigError> {
        if particles_per_second == 0 {
            return Err(ConfigError::ZeroSpawnRate);
        }
        self.spawn_interval = spawn_interval(particles_per_second);
        Ok(())
    }

    /// Current wave phase.
    #[must_use]
    pub const fn phase(&self) -> WavePhase {
        self.phase
    }

    /// Checks if the emitter is between bursts.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.phase == WavePhase::Paused
    }

    /// Time spent in the current phase.
    #[must_use]
    pub const fn wave_time(&self) -> f32 {
        self.wave_time
    }

    /// Spawn time not yet consumed by activations.
    #[must_use]
    pub const fn spawn_time(&self) -> f32 {
        self.spawn_time
    }

    /// Seconds between spawns.
    #[must_use]
    pub const fn spawn_interval(&self) -> f32 {
        self.spawn_interval
    }
}
