//! World - owns the grid, the particle pool and the tick counter
//!
//! WorldCore only orchestrates. Each step runs, in order: the pending brush
//! command, the spigots, the automaton (gather or scanline, fixed at
//! construction), the particle tick and the particle composite.

use crate::behaviors::BehaviorRegistry;
use crate::domain::config::{EngineConfig, ExecutionModel, SpigotConfig, NUM_SPIGOTS};
use crate::core::EngineError;
use crate::elements::ElementType;
use crate::grid::{Grid, GridSnapshot};
use crate::systems::interaction::InteractionCommand;
use crate::systems::particles::{ParticleKind, ParticlePool, ParticleRaster};
use crate::systems::TickParams;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "clock/frame_clock.rs"]
mod frame_clock;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "persist/persistence.rs"]
mod persistence;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod facade;

pub use facade::World;
pub use frame_clock::FrameClock;
pub use perf_stats::PerfStats;

use perf_timer::timed;

/// The simulation world
pub struct WorldCore {
    config: EngineConfig,
    grid: Grid,
    particles: ParticlePool,
    raster: ParticleRaster,
    behaviors: BehaviorRegistry,

    // State
    pending: Option<InteractionCommand>,
    tick: u64,
    clock: FrameClock,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl WorldCore {
    /// Create a world with default settings. Never fails; a zero-sized grid is
    /// simply inert.
    pub fn new(width: u32, height: u32) -> Self {
        init::create_world_core(EngineConfig::with_size(width, height))
    }

    pub fn from_config(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(init::create_world_core(config))
    }

    pub fn from_config_json(json: &str) -> Result<Self, EngineError> {
        Self::from_config(EngineConfig::from_json(json)?)
    }

    pub fn config(&self) -> &EngineConfig { &self.config }

    pub fn width(&self) -> u32 { self.grid.width() }

    pub fn height(&self) -> u32 { self.grid.height() }

    pub fn model(&self) -> ExecutionModel { self.config.model }

    pub fn tick(&self) -> u64 { self.tick }

    pub fn grid(&self) -> &Grid { &self.grid }

    /// Direct grid access for hosts and tests that stage a scene.
    pub fn grid_mut(&mut self) -> &mut Grid { &mut self.grid }

    pub fn particles(&self) -> &ParticlePool { &self.particles }

    pub fn pending_command(&self) -> Option<&InteractionCommand> {
        self.pending.as_ref()
    }

    pub(crate) fn tick_params(&self) -> TickParams {
        TickParams {
            tick: self.tick,
            seed: self.config.seed,
            gravity_probability: self.config.gravity_probability,
            fall_into_void: self.config.fall_into_void,
        }
    }

    /// Advance one tick.
    pub fn step(&mut self) {
        step::step(self);
    }

    /// Feed wall-clock time to the frame clock and run the ticks it pays out.
    /// Returns the number of ticks run.
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        step::advance(self, elapsed_ms)
    }

    // === COMMANDS ===

    /// Queue a paint stroke for the next tick, honoring the overwrite setting.
    pub fn paint(&mut self, x: i32, y: i32, radius: u32, element: ElementType) {
        commands::paint(self, x, y, radius, element)
    }

    pub fn erase(&mut self, x: i32, y: i32, radius: u32) {
        commands::erase(self, x, y, radius)
    }

    /// Queue a command that does nothing, replacing any pending stroke.
    pub fn none(&mut self) {
        commands::none(self)
    }

    pub fn queue_command(&mut self, cmd: InteractionCommand) {
        commands::queue(self, cmd)
    }

    /// Spawn a particle now. Returns false when the pool is full or the
    /// position is off the grid.
    pub fn spawn_particle(&mut self, kind: ParticleKind, x: f32, y: f32) -> bool {
        commands::spawn_particle(self, kind, x, y)
    }

    /// Raw-tag variant of `spawn_particle` for the JS boundary.
    pub fn spawn_particle_id(&mut self, kind: u8, x: f32, y: f32) -> Result<bool, EngineError> {
        let kind = ParticleKind::try_from(kind)?;
        Ok(self.spawn_particle(kind, x, y))
    }

    // === SETTINGS ===

    pub fn set_tick(&mut self, tick: u64) {
        settings::set_tick(self, tick)
    }

    pub fn set_gravity_probability(&mut self, p: f64) {
        settings::set_gravity_probability(self, p)
    }

    pub fn set_fall_into_void(&mut self, enabled: bool) {
        settings::set_fall_into_void(self, enabled)
    }

    pub fn set_overwrite(&mut self, enabled: bool) {
        settings::set_overwrite(self, enabled)
    }

    pub fn set_ticks_per_second(&mut self, tps: f64) {
        settings::set_ticks_per_second(self, tps)
    }

    pub fn set_max_tick_debt(&mut self, ticks: u32) {
        settings::set_max_tick_debt(self, ticks)
    }

    pub fn spigots(&self) -> &[SpigotConfig; NUM_SPIGOTS] {
        &self.config.spigots
    }

    pub fn set_spigot(&mut self, slot: usize, width: u32, element: ElementType) -> Result<(), EngineError> {
        settings::set_spigot(self, slot, width, element)
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    // === PERSISTENCE ===

    pub fn save(&self) -> GridSnapshot {
        persistence::save(self)
    }

    /// Restore both rasters. Particles and any pending command are dropped.
    pub fn load(&mut self, snapshot: &GridSnapshot) -> Result<(), EngineError> {
        persistence::load(self, snapshot)
    }

    /// Empty the grid and the pool and rewind the tick counter.
    pub fn clear(&mut self) {
        persistence::clear(self)
    }

    // === RENDER ACCESS ===

    /// Get pointer to types array (for JS rendering)
    pub fn types_ptr(&self) -> *const u8 {
        self.grid.types_ptr()
    }

    /// Get pointer to colors array (for JS rendering)
    pub fn colors_ptr(&self) -> *const u32 {
        self.grid.colors_ptr()
    }

    pub fn cell_count(&self) -> usize {
        self.grid.size()
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
