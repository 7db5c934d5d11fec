use crate::core::EngineError;
use crate::grid::GridSnapshot;

use super::WorldCore;

pub(super) fn save(world: &WorldCore) -> GridSnapshot {
    world.grid.snapshot()
}

pub(super) fn load(world: &mut WorldCore, snapshot: &GridSnapshot) -> Result<(), EngineError> {
    world.grid.restore(snapshot)?;
    world.particles.reset(world.config.seed);
    world.raster.clear();
    world.pending = None;
    log::debug!("loaded {}x{} snapshot at tick {}", snapshot.width, snapshot.height, world.tick);
    Ok(())
}

pub(super) fn clear(world: &mut WorldCore) {
    world.grid.clear();
    world.particles.reset(world.config.seed);
    world.raster.clear();
    world.pending = None;
    world.clock.reset();
    world.tick = 0;
}
