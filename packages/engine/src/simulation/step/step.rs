use crate::domain::config::ExecutionModel;
use crate::systems::gather::gather_tick;
use crate::systems::interaction;
use crate::systems::particles::composite;
use crate::systems::scan::scan_tick;
use crate::systems::spigots;

use super::perf_timer::PerfTimer;
use super::{timed, WorldCore};

pub(super) fn step(world: &mut WorldCore) {
    let perf_on = world.perf_enabled;
    if perf_on {
        world.perf_stats.reset();
        world.perf_stats.grid_size = world.grid.size() as u32;
        // types(1) + colors(4) + updated(1) + back types(1) + back colors(4) + particle raster(4)
        world.perf_stats.memory_bytes = (world.grid.size() as u32).saturating_mul(15);
    }
    let step_start = perf_on.then(PerfTimer::start);
    let params = world.tick_params();

    // External input wins over every rule this tick.
    if let Some(cmd) = world.pending.take() {
        let (painted, ms) = timed(perf_on, || interaction::apply(&mut world.grid, &cmd, params.tick));
        world.perf_stats.interaction_ms = ms;
        world.perf_stats.cells_painted = painted;
    }

    let ((), ms) = timed(perf_on, || {
        spigots::inject(&mut world.grid, &world.config.spigots, params.tick, params.seed)
    });
    world.perf_stats.spigot_ms = ms;

    let ((), ms) = timed(perf_on, || match world.config.model {
        ExecutionModel::Gather => gather_tick(&mut world.grid, &params),
        ExecutionModel::Scanline => {
            scan_tick(&mut world.grid, &mut world.particles, &world.behaviors, &params)
        }
    });
    world.perf_stats.automaton_ms = ms;

    // Particles read the settled grid, then draw over it.
    if world.particles.active_count() > 0 {
        let ((), ms) = timed(perf_on, || world.particles.tick(&world.grid, &mut world.raster));
        world.perf_stats.particle_ms = ms;
        let ((), ms) = timed(perf_on, || composite(&world.raster, &mut world.grid));
        world.perf_stats.composite_ms = ms;
    }

    if perf_on {
        world.perf_stats.active_particles = world.particles.active_count() as u32;
        world.perf_stats.non_empty_cells = world.grid.non_empty_count() as u32;
        if let Some(start) = step_start {
            world.perf_stats.step_ms = start.elapsed_ms();
        }
    }

    world.tick += 1;
}

pub(super) fn advance(world: &mut WorldCore, elapsed_ms: f64) -> u32 {
    let ticks = world.clock.advance(
        elapsed_ms,
        world.config.ticks_per_second,
        world.config.max_tick_debt,
    );
    for _ in 0..ticks {
        step(world);
    }
    if ticks > 1 {
        log::debug!("caught up {} ticks, now at tick {}", ticks, world.tick);
    }
    ticks
}
