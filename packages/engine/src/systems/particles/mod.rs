//! Particles - transient effects layered over the grid
//!
//! A fixed pool of slots cycles between an inactive and an active list. Each
//! tick every active particle runs its kind's action, draws itself onto a
//! scratch raster, and the raster is composited back into the grid.

mod kinds;
mod pool;
mod actions;
mod raster;
mod composite;

pub use kinds::{ParticleKind, PARTICLE_KIND_COUNT};
pub use pool::{Particle, ParticleExtra, ParticlePool, ParticleRef, TreeShape};
pub use raster::ParticleRaster;
pub use composite::{composite, RIM_REACH};
