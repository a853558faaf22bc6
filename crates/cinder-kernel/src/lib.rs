//! # Cinder Kernel
//!
//! CPU particle emitter simulation.
//!
//! This crate provides the per-frame emitter engine:
//! - Emitter configuration with validated defaults
//! - Fixed-capacity particle pool with O(1) activation and retirement
//! - Wave-gated emission scheduling
//! - Motion integration and color/scale interpolation
//! - Collision of particles against convex polygon obstacles
//! - Emitter bundles and built-in presets
//!
//! ## Pool Partition
//!
//! Active particles always occupy a contiguous prefix of the pool:
//! - Slots `[0, live_count)` are active, the rest inactive
//! - Activating or retiring swaps a particle across the boundary
//! - Render records are swapped with their particles, so the first
//!   `live_count` records are exactly the ones to draw
//!
//! ## Frame Order
//!
//! Each [`ParticleEmitter::update`] grows the pool by at most one slot,
//! ages/retires/activates every slot, integrates active particles, then
//! advances the emitter lifetime and the wave clock. Collision checks run
//! on demand, once per obstacle per frame.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod bundle;
pub mod collider;
pub mod collision;
pub mod emitter;
pub mod emitter_config;
pub mod integrator;
pub mod particle;
pub mod pool;
pub mod presets;
pub mod scheduler;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::bundle::*;
    pub use crate::collider::*;
    pub use crate::collision::*;
    pub use crate::emitter::*;
    pub use crate::emitter_config::*;
    pub use crate::integrator::*;
    pub use crate::particle::*;
    pub use crate::pool::*;
    pub use crate::presets::*;
    pub use crate::scheduler::*;
}

pub use prelude::*;
