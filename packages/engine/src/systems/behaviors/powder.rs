//! PowderBehavior - granular elements: sand, salt, rock, gunpowder, falling wax,
//! pollen, concrete, soil and thermite

use super::common::{
    above_adjacent, below_adjacent, blocked_below, bordering, bordering_adjacent, fall, sink,
    surrounded_by_adjacent, transform,
};
use super::{Behavior, UpdateContext};
use crate::elements::ElementType;
use crate::systems::particles::ParticleKind;

pub struct PowderBehavior;

impl PowderBehavior {
    /// 3x3 blast of fire (or of fresh gunpowder when the roll fails), plus a
    /// chance of an outer ring two cells out.
    fn detonate(&self, ctx: &mut UpdateContext) {
        let burn = ctx.chance(0.6);
        let replace = if burn { ElementType::Fire } else { ElementType::Gunpowder };
        for dy in -1..=1 {
            for dx in -1..=1 {
                ctx.set(dx, dy, replace);
            }
        }
        if burn && ctx.chance(0.4) {
            for (dx, dy) in [(0, -2), (0, 2), (-2, 0), (2, 0)] {
                match ctx.at(dx, dy) {
                    Some(ElementType::Gunpowder) if !ctx.chance(0.5) => {}
                    Some(_) => ctx.set(dx, dy, ElementType::Fire),
                    None => {}
                }
            }
        }
    }

    fn update_concrete(&self, ctx: &mut UpdateContext) {
        if sink(ctx, ElementType::Water, true, 0.35) || sink(ctx, ElementType::SaltWater, true, 0.35) {
            return;
        }
        if ctx.chance(0.01) && bordering_adjacent(ctx, ElementType::Wall).is_some() {
            ctx.set_self(ElementType::Wall);
            return;
        }
        if fall(ctx, true) {
            return;
        }
        if ctx.chance(0.0005) {
            ctx.set_self(ElementType::Wall);
        }
    }

    fn update_soil(&self, ctx: &mut UpdateContext) {
        if fall(ctx, false) {
            return;
        }
        for lighter in [ElementType::Water, ElementType::SaltWater, ElementType::Pollen] {
            if sink(ctx, lighter, true, 0.5) {
                return;
            }
        }
        if ctx.chance(0.25) {
            if let Some((dx, dy)) = bordering_adjacent(ctx, ElementType::Nitro) {
                ctx.set(dx, dy, ElementType::ChargedNitro);
                return;
            }
        }
        if ctx.chance(0.15) {
            if let Some((dx, dy)) = above_adjacent(ctx, ElementType::Water) {
                ctx.set(dx, dy, ElementType::Background);
                ctx.set_self(ElementType::WetSoil);
            }
        }
    }

    /// Wet soil drinks water from above, dries out, or roots a tree when it has
    /// room above and footing below.
    fn update_wet_soil(&self, ctx: &mut UpdateContext) {
        if ctx.chance(0.15) {
            if let Some((dx, dy)) = above_adjacent(ctx, ElementType::Water) {
                ctx.set(dx, dy, ElementType::Background);
            }
        }
        if fall(ctx, false) {
            return;
        }
        if sink(ctx, ElementType::Water, true, 0.5) || sink(ctx, ElementType::SaltWater, true, 0.5) {
            return;
        }
        if !ctx.chance(0.05) {
            return;
        }
        if ctx.chance(0.97) {
            if bordering_adjacent(ctx, ElementType::Water).is_none() {
                ctx.set_self(ElementType::Soil);
            }
            return;
        }
        if !ctx.chance(0.65) {
            return;
        }
        let footing = below_adjacent(ctx, ElementType::Soil).is_some()
            || below_adjacent(ctx, ElementType::Wall).is_some();
        if footing && above_adjacent(ctx, ElementType::Background).is_some() {
            ctx.spawn(ParticleKind::Tree);
            ctx.set_self(ElementType::Soil);
        }
    }

    fn update_thermite(&self, ctx: &mut UpdateContext) {
        if surrounded_by_adjacent(ctx, ElementType::Thermite) {
            return;
        }
        if ctx.chance(0.5) && bordering_adjacent(ctx, ElementType::Fire).is_some() {
            ctx.set_self(ElementType::BurningThermite);
            return;
        }
        for lighter in [ElementType::Water, ElementType::SaltWater, ElementType::Oil] {
            if sink(ctx, lighter, false, 0.95) {
                return;
            }
        }
        fall(ctx, false);
    }
}

impl Behavior for PowderBehavior {
    fn update(&self, ctx: &mut UpdateContext) {
        match ctx.element() {
            ElementType::Sand | ElementType::RainbowSand => {
                if sink(ctx, ElementType::Water, true, 0.25)
                    || sink(ctx, ElementType::SaltWater, true, 0.25)
                {
                    return;
                }
                fall(ctx, true);
            }
            ElementType::Salt => {
                if fall(ctx, true) {
                    return;
                }
                if transform(ctx, ElementType::Water, ElementType::SaltWater, 0.25, 0.5) {
                    return;
                }
                sink(ctx, ElementType::SaltWater, true, 0.25);
            }
            ElementType::Rock => {
                if sink(ctx, ElementType::Water, false, 0.95)
                    || sink(ctx, ElementType::Oil, false, 0.95)
                {
                    return;
                }
                fall(ctx, false);
            }
            ElementType::Gunpowder => {
                if ctx.chance(0.95) && bordering(ctx, ElementType::Fire).is_some() {
                    self.detonate(ctx);
                    return;
                }
                fall(ctx, true);
            }
            ElementType::FallingWax => {
                if fall(ctx, false) {
                    return;
                }
                if blocked_below(ctx) {
                    ctx.set_self(ElementType::Wax);
                }
            }
            ElementType::Pollen => {
                fall(ctx, true);
            }
            ElementType::Concrete => self.update_concrete(ctx),
            ElementType::Soil => self.update_soil(ctx),
            ElementType::WetSoil => self.update_wet_soil(ctx),
            ElementType::Thermite => self.update_thermite(ctx),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::elements::ElementType::{self, *};
    use crate::systems::behaviors::testing::Bench;
    use crate::systems::particles::ParticleKind;

    /// `w` x `h` with walls on both sides and along the bottom row.
    fn cup(w: u32, h: u32) -> Bench {
        let mut b = Bench::new(w, h);
        b.fill(0..w, h - 1..h, Wall);
        b.fill(0..1, 0..h, Wall);
        b.fill(w - 1..w, 0..h, Wall);
        b
    }

    #[test]
    fn sand_sinks_through_water() {
        let mut b = cup(3, 4);
        b.put(1, 1, Sand);
        b.put(1, 2, Water);
        assert!(b
            .run_until(200, |b| b.at(1, 2) == Sand && b.at(1, 1) == Water)
            .is_some());
    }

    #[test]
    fn rock_sinks_straight_through_oil() {
        let mut b = cup(3, 3);
        b.put(1, 0, Rock);
        b.put(1, 1, Oil);
        assert!(b
            .run_until(50, |b| b.at(1, 1) == Rock && b.at(1, 0) == Oil)
            .is_some());
    }

    #[test]
    fn salt_dissolves_into_salt_water() {
        let mut b = cup(4, 2);
        b.put(1, 0, Salt);
        b.put(2, 0, Water);
        assert!(b.run_until(200, |b| b.at(1, 0) == SaltWater).is_some());
        assert_eq!(b.count(Salt), 0);
    }

    #[test]
    fn gunpowder_blast_is_a_uniform_square() {
        // Ten specimens: gunpowder on the floor with fire on top.
        let mut b = Bench::new(60, 5);
        b.fill(0..60, 4..5, Wall);
        let xs: Vec<u32> = (0..10).map(|k| 3 + 6 * k).collect();
        for &x in &xs {
            b.put(x, 3, Gunpowder);
            b.put(x, 2, Fire);
        }
        b.step();

        let mut blasts = 0;
        for &x in &xs {
            if b.at(x, 3) == Gunpowder {
                continue;
            }
            for y in 2..=4 {
                for dx in 0..3 {
                    assert_eq!(b.at(x + dx - 1, y), Fire, "specimen at x={}", x);
                }
            }
            blasts += 1;
        }
        assert!(blasts > 0);
    }

    #[test]
    fn falling_wax_sets_when_it_lands() {
        let mut b = cup(3, 4);
        b.put(1, 0, FallingWax);
        assert_eq!(b.run_until(10, |b| b.at(1, 2) == Wax), Some(3));
        assert_eq!(b.count(FallingWax), 0);
    }

    #[test]
    fn soil_charges_nitro() {
        let mut b = cup(4, 2);
        b.put(1, 0, Soil);
        b.put(2, 0, Nitro);
        assert!(b.run_until(100, |b| b.at(2, 0) == ChargedNitro).is_some());
        assert_eq!(b.at(1, 0), Soil);
    }

    #[test]
    fn soil_soaks_up_water_above() {
        let mut b = cup(3, 4);
        b.put(1, 2, Soil);
        b.put(1, 1, Water);
        assert!(b
            .run_until(100, |b| b.count(Water) == 0 && b.at(1, 2) == WetSoil)
            .is_some());
    }

    #[test]
    fn wet_soil_roots_trees_on_firm_ground() {
        let w = 802;
        let mut b = cup(w, 3);
        b.fill(1..w - 1, 1..2, WetSoil);
        assert!(b
            .run_until(400, |b| b.pool.count(ParticleKind::Tree) > 0)
            .is_some());
        let tree = b
            .pool
            .iter_active()
            .find(|p| p.kind == ParticleKind::Tree)
            .map(|p| (p.init_x as u32, p.element));
        let Some((x, element)) = tree else {
            panic!("tree counted but not active");
        };
        assert_eq!(element, ElementType::Branch);
        assert_eq!(b.at(x, 1), Soil);
    }

    #[test]
    fn thermite_catches_from_fire() {
        // Wax keeps the flame fed so only thermite's own roll matters.
        let mut b = cup(5, 3);
        b.fill(0..5, 0..1, Wall);
        b.put(1, 1, Wax);
        b.put(2, 1, Fire);
        b.put(3, 1, Thermite);
        assert!(b.run_until(60, |b| b.at(3, 1) == BurningThermite).is_some());
    }

    #[test]
    fn concrete_falls_then_rests_on_the_floor() {
        let mut b = cup(5, 5);
        b.put(2, 0, Concrete);
        for _ in 0..3 {
            b.step();
        }
        assert_eq!(b.at(2, 3), Concrete);
        assert_eq!(b.at(2, 0), Background);
    }
}
