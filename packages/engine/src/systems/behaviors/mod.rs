//! Behaviors - per-class element rules for the scanline model
//!
//! Each behavior handles one `BehaviorClass` and matches on the element inside
//! it. Rules read and write the live grid through `UpdateContext`, which also
//! carries the per-cell random stream and the scan's `ParticleEffects`.

mod common;
mod powder;
mod liquid;
mod gas;
mod energy;
mod solid;
mod plant;

pub use common::{diagonal_order, gravity_roll};
pub use energy::EnergyBehavior;
pub use gas::GasBehavior;
pub use liquid::LiquidBehavior;
pub use plant::PlantBehavior;
pub use powder::PowderBehavior;
pub use solid::SolidBehavior;

use crate::core::hash::{cell_chance, SALT_RULES};
use crate::elements::{BehaviorClass, ElementType};
use crate::grid::Grid;
use crate::systems::particles::{ParticleKind, ParticlePool};

/// Particle side of one scan.
///
/// Burning methane positions are read once when the scan starts. Spawns are
/// held back and acquired by `flush` after the last row, so particle init sees
/// the settled grid.
#[derive(Debug, Default)]
pub struct ParticleEffects {
    burning_methane: Vec<(f32, f32)>,
    spawns: Vec<(ParticleKind, u32, u32)>,
}

impl ParticleEffects {
    pub fn from_pool(pool: &ParticlePool) -> Self {
        let burning_methane = if pool.any_active(ParticleKind::Methane) {
            pool.iter_active()
                .filter(|p| p.kind == ParticleKind::Methane)
                .map(|p| (p.x, p.y))
                .collect()
        } else {
            Vec::new()
        };
        Self {
            burning_methane,
            spawns: Vec::new(),
        }
    }

    /// Any burning methane particle within `radius` of (x, y)?
    pub fn methane_within(&self, x: u32, y: u32, radius: f32) -> bool {
        let (x, y) = (x as f32, y as f32);
        let r_sq = radius * radius;
        self.burning_methane.iter().any(|&(px, py)| {
            let (dx, dy) = (px - x, py - y);
            dx * dx + dy * dy <= r_sq
        })
    }

    #[inline]
    pub fn queue(&mut self, kind: ParticleKind, x: u32, y: u32) {
        self.spawns.push((kind, x, y));
    }

    #[inline]
    pub fn queued(&self) -> &[(ParticleKind, u32, u32)] {
        &self.spawns
    }

    /// Acquire every queued spawn in scan order. A full pool drops the rest.
    pub fn flush(&mut self, pool: &mut ParticlePool, grid: &Grid) {
        for (kind, x, y) in self.spawns.drain(..) {
            let idx = grid.index(x, y);
            let _ = pool.acquire(kind, x as f32, y as f32, idx, grid);
        }
    }
}


/// Update context passed to behaviors
pub struct UpdateContext<'a> {
    pub grid: &'a mut Grid,
    pub effects: &'a mut ParticleEffects,
    pub x: u32,
    pub y: u32,
    pub tick: u64,
    pub seed: u32,
    pub gravity_probability: f64,
    pub fall_into_void: bool,
    draws: u32,
}

impl<'a> UpdateContext<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        grid: &'a mut Grid,
        effects: &'a mut ParticleEffects,
        x: u32,
        y: u32,
        tick: u64,
        seed: u32,
        gravity_probability: f64,
        fall_into_void: bool,
    ) -> Self {
        Self {
            grid,
            effects,
            x,
            y,
            tick,
            seed,
            gravity_probability,
            fall_into_void,
            draws: 0,
        }
    }

    /// Next draw of this cell's stream: true with probability `p`.
    #[inline]
    pub fn chance(&mut self, p: f64) -> bool {
        let salt = SALT_RULES + self.draws;
        self.draws += 1;
        cell_chance(self.seed, self.x, self.y, self.tick, salt, p)
    }

    #[inline]
    pub fn element(&self) -> ElementType {
        self.grid.get_type_idx(self.grid.index(self.x, self.y))
    }

    #[inline]
    fn offset(&self, dx: i32, dy: i32) -> Option<usize> {
        self.grid.checked_index(self.x as i32 + dx, self.y as i32 + dy)
    }

    /// Element at a relative offset, `None` off-grid.
    #[inline]
    pub fn at(&self, dx: i32, dy: i32) -> Option<ElementType> {
        self.offset(dx, dy).map(|i| self.grid.get_type_idx(i))
    }

    #[inline]
    pub fn is(&self, dx: i32, dy: i32, e: ElementType) -> bool {
        self.at(dx, dy) == Some(e)
    }

    #[inline]
    pub fn is_empty_at(&self, dx: i32, dy: i32) -> bool {
        self.is(dx, dy, ElementType::Background)
    }

    /// Overwrite a neighbor (or self at 0,0) and settle it for this tick.
    pub fn set(&mut self, dx: i32, dy: i32, e: ElementType) {
        if let Some(i) = self.offset(dx, dy) {
            self.grid.set_cell_idx(i, e, e.spawn_color(self.tick, 0));
            self.grid.set_updated_idx(i);
        }
    }

    #[inline]
    pub fn set_self(&mut self, e: ElementType) {
        self.set(0, 0, e);
    }

    pub fn vanish(&mut self) {
        self.set_self(ElementType::Background);
    }

    /// Move this cell by (dx, dy) into an empty target, leaving background.
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        if let Some(to) = self.offset(dx, dy) {
            let from = self.grid.index(self.x, self.y);
            self.grid.move_cell(from, to);
            self.grid.set_updated_idx(to);
        }
    }

    /// Exchange this cell with a neighbor; both are settled.
    pub fn swap_with(&mut self, dx: i32, dy: i32) {
        if let Some(other) = self.offset(dx, dy) {
            let here = self.grid.index(self.x, self.y);
            self.grid.swap_cells(here, other);
            self.grid.set_updated_idx(here);
            self.grid.set_updated_idx(other);
        }
    }

    /// Spawn a particle at this cell once the scan has finished.
    #[inline]
    pub fn spawn(&mut self, kind: ParticleKind) {
        self.effects.queue(kind, self.x, self.y);
    }
}

/// Behavior trait - each class implements this
pub trait Behavior {
    fn update(&self, ctx: &mut UpdateContext);
}

/// Behavior registry - dispatch by class
pub struct BehaviorRegistry {
    powder: PowderBehavior,
    liquid: LiquidBehavior,
    gas: GasBehavior,
    energy: EnergyBehavior,
    solid: SolidBehavior,
    plant: PlantBehavior,
}

impl BehaviorRegistry {
    pub fn new() -> Self {
        Self {
            powder: PowderBehavior,
            liquid: LiquidBehavior,
            gas: GasBehavior,
            energy: EnergyBehavior,
            solid: SolidBehavior,
            plant: PlantBehavior,
        }
    }

    pub fn update(&self, class: BehaviorClass, ctx: &mut UpdateContext) {
        match class {
            BehaviorClass::Granular => self.powder.update(ctx),
            BehaviorClass::Liquid => self.liquid.update(ctx),
            BehaviorClass::Gas => self.gas.update(ctx),
            BehaviorClass::Reactive => self.energy.update(ctx),
            BehaviorClass::StaticSolid => self.solid.update(ctx),
            BehaviorClass::Decorative => self.plant.update(ctx),
            BehaviorClass::Empty => {}
        }
    }
}

impl Default for BehaviorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::systems::scan::scan_tick;
    use crate::systems::TickParams;

    /// Scanline harness: full gravity, closed edges, fixed seed.
    pub(crate) struct Bench {
        pub grid: Grid,
        pub pool: ParticlePool,
        pub tick: u64,
        registry: BehaviorRegistry,
    }

    impl Bench {
        pub fn new(width: u32, height: u32) -> Self {
            Self {
                grid: Grid::new(width, height),
                pool: ParticlePool::new(256, 1),
                tick: 0,
                registry: BehaviorRegistry::new(),
            }
        }

        pub fn put(&mut self, x: u32, y: u32, e: ElementType) {
            self.grid.set_cell(x, y, e, e.color());
        }

        pub fn fill(&mut self, xs: std::ops::Range<u32>, ys: std::ops::Range<u32>, e: ElementType) {
            for y in ys {
                for x in xs.clone() {
                    self.put(x, y, e);
                }
            }
        }

        pub fn at(&self, x: u32, y: u32) -> ElementType {
            self.grid.get_type(x as i32, y as i32)
        }

        pub fn count(&self, e: ElementType) -> usize {
            self.grid.count(e)
        }

        pub fn step(&mut self) {
            let params = TickParams {
                tick: self.tick,
                seed: 1,
                gravity_probability: 1.0,
                fall_into_void: false,
            };
            scan_tick(&mut self.grid, &mut self.pool, &self.registry, &params);
            self.tick += 1;
        }

        /// Step until `done` holds, at most `max` ticks. Returns the ticks taken.
        pub fn run_until(&mut self, max: u32, mut done: impl FnMut(&Bench) -> bool) -> Option<u32> {
            for n in 1..=max {
                self.step();
                if done(self) {
                    return Some(n);
                }
            }
            None
        }
    }
}
