use crate::behaviors::BehaviorRegistry;
use crate::domain::config::EngineConfig;
use crate::grid::Grid;
use crate::systems::particles::{ParticlePool, ParticleRaster};

use super::perf_stats::PerfStats;
use super::{FrameClock, WorldCore};

pub(super) fn create_world_core(config: EngineConfig) -> WorldCore {
    let (width, height) = (config.width, config.height);
    log::info!(
        "world {}x{} ({:?}, seed {}, {} particle slots)",
        width,
        height,
        config.model,
        config.seed,
        config.particle_capacity
    );
    WorldCore {
        grid: Grid::new(width, height),
        particles: ParticlePool::new(config.particle_capacity, config.seed),
        raster: ParticleRaster::new(width, height),
        behaviors: BehaviorRegistry::new(),
        pending: None,
        tick: 0,
        clock: FrameClock::new(),
        perf_enabled: false,
        perf_stats: PerfStats::default(),
        config,
    }
}
