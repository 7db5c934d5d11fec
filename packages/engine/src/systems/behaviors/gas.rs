//! GasBehavior - steam and methane rise

use super::common::{bordering, rise};
use super::{Behavior, UpdateContext};
use crate::elements::ElementType;
use crate::systems::particles::ParticleKind;

/// Radius within which a burning methane particle ignites methane cells.
const METHANE_CHAIN_RADIUS: f32 = 8.0;

/// Elements methane bubbles up through.
const PERMEABLE: [ElementType; 7] = [
    ElementType::Sand,
    ElementType::Water,
    ElementType::Salt,
    ElementType::SaltWater,
    ElementType::Oil,
    ElementType::Gunpowder,
    ElementType::Rock,
];

pub struct GasBehavior;

impl GasBehavior {
    fn update_methane(&self, ctx: &mut UpdateContext) {
        let ignite = (ctx.effects.methane_within(ctx.x, ctx.y, METHANE_CHAIN_RADIUS)
            && ctx.chance(0.5))
            || (ctx.chance(0.25) && bordering(ctx, ElementType::Fire).is_some());
        if ignite {
            ctx.spawn(ParticleKind::Methane);
            ctx.set_self(ElementType::Fire);
            return;
        }

        if rise(ctx, 0.25, 0.65) {
            return;
        }

        if ctx.chance(0.7) {
            if let Some(above) = ctx.at(0, -1) {
                if PERMEABLE.contains(&above) {
                    ctx.swap_with(0, -1);
                }
            }
        }
    }
}

impl Behavior for GasBehavior {
    fn update(&self, ctx: &mut UpdateContext) {
        match ctx.element() {
            ElementType::Steam => {
                if rise(ctx, 0.7, 0.6) {
                    return;
                }
                if ctx.chance(0.05) && bordering(ctx, ElementType::Water).is_some() {
                    ctx.set_self(ElementType::Water);
                    return;
                }
                if ctx.chance(0.05) && bordering(ctx, ElementType::Spout).is_some() {
                    ctx.set_self(ElementType::Water);
                    return;
                }
                if ctx.chance(0.02) {
                    ctx.vanish();
                }
            }
            ElementType::Methane => self.update_methane(ctx),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::elements::ElementType::*;
    use crate::grid::Grid;
    use crate::systems::behaviors::testing::Bench;
    use crate::systems::particles::ParticleKind;

    #[test]
    fn steam_rises() {
        let mut b = Bench::new(21, 4);
        for x in (0..21).step_by(2) {
            b.fill(x..x + 1, 0..4, Wall);
        }
        for x in (1..21).step_by(2) {
            b.put(x, 3, Steam);
        }
        assert!(b
            .run_until(100, |b| (1..21).any(|x| b.at(x, 0) == Steam))
            .is_some());
        assert_eq!(b.count(Water), 0);
    }

    #[test]
    fn steam_condenses_on_a_spout() {
        // Walled steam cells, each over a spout. The spout runs first in every
        // tick, so a cell that reads as water right after the steam leaves it
        // condensed rather than vanished.
        let n = 20;
        let w = 2 * n + 1;
        let mut b = Bench::new(w, 3);
        b.fill(0..w, 0..3, Wall);
        let xs: Vec<u32> = (0..n).map(|k| 2 * k + 1).collect();
        for &x in &xs {
            b.put(x, 1, Steam);
            b.put(x, 2, Spout);
        }

        let mut pending = xs.clone();
        let mut condensed = 0;
        for _ in 0..2000 {
            b.step();
            pending.retain(|&x| match b.at(x, 1) {
                Steam => true,
                Water => {
                    condensed += 1;
                    false
                }
                _ => false,
            });
            if pending.is_empty() {
                break;
            }
        }
        assert!(pending.is_empty());
        assert!(condensed > 0);
    }

    #[test]
    fn methane_bubbles_up_through_sand() {
        let mut b = Bench::new(1, 3);
        b.put(0, 1, Sand);
        b.put(0, 2, Methane);
        assert!(b.run_until(100, |b| b.at(0, 1) == Methane).is_some());
    }

    #[test]
    fn methane_beside_fire_burns_into_a_particle() {
        let mut b = Bench::new(5, 3);
        b.fill(0..5, 0..1, Wall);
        b.fill(0..5, 2..3, Wall);
        b.put(0, 1, Wall);
        b.put(4, 1, Wall);
        b.put(1, 1, Wax);
        b.put(2, 1, Fire);
        b.put(3, 1, Methane);
        assert!(b.run_until(100, |b| b.count(Methane) == 0).is_some());
        assert_eq!(b.pool.count(ParticleKind::Methane), 1);
        assert_eq!(b.at(3, 1), Fire);
    }

    #[test]
    fn burning_methane_chains_within_its_radius() {
        // Sealed cells so only the particle can set them off.
        let mut b = Bench::new(20, 3);
        b.fill(0..20, 0..3, Wall);
        b.put(3, 1, Methane);
        b.put(19, 1, Methane);
        let grid = Grid::new(20, 3);
        let idx = grid.index(10, 1);
        assert!(b
            .pool
            .acquire(ParticleKind::Methane, 10.0, 1.0, idx, &grid)
            .is_some());

        assert!(b.run_until(50, |b| b.at(3, 1) == Fire).is_some());
        assert_eq!(b.at(19, 1), Methane);
    }
}
