use crate::core::EngineError;
use crate::domain::config::NUM_SPIGOTS;
use crate::elements::ElementType;

use super::perf_stats::PerfStats;
use super::WorldCore;

pub(super) fn enable_perf_metrics(world: &mut WorldCore, enabled: bool) {
    world.perf_enabled = enabled;
    if !enabled {
        world.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(world: &WorldCore) -> PerfStats {
    world.perf_stats.clone()
}

pub(super) fn set_tick(world: &mut WorldCore, tick: u64) {
    world.tick = tick;
}

/// Clamped to [0, 1]; NaN leaves the setting unchanged.
pub(super) fn set_gravity_probability(world: &mut WorldCore, p: f64) {
    if p.is_nan() {
        log::warn!("ignoring NaN gravity probability");
        return;
    }
    world.config.gravity_probability = p.clamp(0.0, 1.0);
}

pub(super) fn set_fall_into_void(world: &mut WorldCore, enabled: bool) {
    world.config.fall_into_void = enabled;
}

pub(super) fn set_overwrite(world: &mut WorldCore, enabled: bool) {
    world.config.overwrite = enabled;
}

pub(super) fn set_ticks_per_second(world: &mut WorldCore, tps: f64) {
    if !(tps > 0.0) {
        log::warn!("ignoring non-positive tick rate {}", tps);
        return;
    }
    world.config.ticks_per_second = tps;
}

pub(super) fn set_max_tick_debt(world: &mut WorldCore, ticks: u32) {
    world.config.max_tick_debt = ticks;
}

pub(super) fn set_spigot(
    world: &mut WorldCore,
    slot: usize,
    width: u32,
    element: ElementType,
) -> Result<(), EngineError> {
    if slot >= NUM_SPIGOTS {
        return Err(EngineError::SpigotIndex(slot));
    }
    let spigot = &mut world.config.spigots[slot];
    spigot.width = width;
    spigot.element = element;
    Ok(())
}
