//! Scanline model: one in-place pass per tick.
//!
//! Rows run bottom to top, alternating direction per row. A cell that has been
//! visited, moved into, or written by a neighbor's rule is settled and skipped
//! for the rest of the tick. Particles spawned by rules are acquired once the
//! pass is over.

use super::behaviors::{BehaviorRegistry, ParticleEffects, UpdateContext};
use super::particles::ParticlePool;
use super::TickParams;
use crate::grid::Grid;

pub fn scan_tick(
    grid: &mut Grid,
    particles: &mut ParticlePool,
    registry: &BehaviorRegistry,
    params: &TickParams,
) {
    grid.reset_updated();
    let (w, h) = (grid.width(), grid.height());
    let mut effects = ParticleEffects::from_pool(particles);

    for row in 0..h {
        let y = h - 1 - row;
        let left_to_right = row % 2 == 0;
        for i in 0..w {
            let x = if left_to_right { i } else { w - 1 - i };
            let idx = grid.index(x, y);
            if grid.is_updated_idx(idx) {
                continue;
            }
            let element = grid.get_type_idx(idx);
            if element.is_empty() {
                continue;
            }
            grid.set_updated_idx(idx);

            let mut ctx = UpdateContext::new(
                grid,
                &mut effects,
                x,
                y,
                params.tick,
                params.seed,
                params.gravity_probability,
                params.fall_into_void,
            );
            registry.update(element.class(), &mut ctx);
        }
    }

    effects.flush(particles, grid);
}
