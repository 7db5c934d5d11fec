//! Systems - everything that advances the grid by one tick

pub mod behaviors;
pub mod gather;
pub mod scan;
pub mod interaction;
pub mod spigots;
pub mod particles;

/// Inputs every per-cell decision of a tick depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickParams {
    pub tick: u64,
    pub seed: u32,
    pub gravity_probability: f64,
    pub fall_into_void: bool,
}
