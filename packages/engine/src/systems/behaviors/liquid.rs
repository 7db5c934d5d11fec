//! LiquidBehavior - water, salt water, oil, lava and acid
//!
//! Liquids fall like powders and then level out sideways.

use super::common::{bordering, displace, fall, fill_empty_border, flow};
use super::{Behavior, UpdateContext};
use crate::elements::ElementType;

/// Elements lava does not set alight.
const LAVA_IMMUNE: [ElementType; 7] = [
    ElementType::Lava,
    ElementType::Background,
    ElementType::Fire,
    ElementType::Wall,
    ElementType::Rock,
    ElementType::Water,
    ElementType::Steam,
];

/// Elements acid cannot dissolve.
const ACID_PROOF: [ElementType; 8] = [
    ElementType::Acid,
    ElementType::Background,
    ElementType::Water,
    ElementType::SaltWater,
    ElementType::Ice,
    ElementType::ChilledIce,
    ElementType::Steam,
    ElementType::Cryo,
];

pub struct LiquidBehavior;

impl LiquidBehavior {
    #[inline]
    fn fall_or_flow(&self, ctx: &mut UpdateContext) {
        if !fall(ctx, true) {
            flow(ctx);
        }
    }

    fn update_lava(&self, ctx: &mut UpdateContext) {
        for liquid in [ElementType::Water, ElementType::SaltWater] {
            if let Some((dx, dy)) = bordering(ctx, liquid) {
                ctx.set(dx, dy, ElementType::Steam);
                ctx.set_self(ElementType::Rock);
                return;
            }
        }

        if ctx.chance(0.25) {
            for (dx, dy) in [(0, -1), (0, 1), (-1, 0), (1, 0)] {
                if let Some(e) = ctx.at(dx, dy) {
                    if !LAVA_IMMUNE.contains(&e) {
                        ctx.set(dx, dy, ElementType::Fire);
                    }
                }
            }
        }

        if ctx.chance(0.06) && ctx.is_empty_at(0, -1) {
            ctx.set(0, -1, ElementType::Fire);
        }

        if ctx.is(0, 1, ElementType::Steam) && ctx.chance(0.95) {
            ctx.swap_with(0, 1);
            return;
        }

        self.fall_or_flow(ctx);
    }

    /// Dissolve one orthogonal neighbor. Eating downward moves the acid into the
    /// hole, though a wall below uses the acid up a quarter of the time.
    fn dissolve(&self, ctx: &mut UpdateContext) -> bool {
        let mut vertical = [(0, -1), (0, 1)];
        let mut horizontal = [(-1, 0), (1, 0)];
        if ctx.chance(0.5) {
            vertical.swap(0, 1);
        }
        if ctx.chance(0.5) {
            horizontal.swap(0, 1);
        }
        for (dx, dy) in vertical.into_iter().chain(horizontal) {
            let Some(e) = ctx.at(dx, dy) else {
                continue;
            };
            if ACID_PROOF.contains(&e) {
                continue;
            }
            if dy == 1 {
                ctx.vanish();
                if e != ElementType::Wall || ctx.chance(0.75) {
                    ctx.set(dx, dy, ElementType::Acid);
                } else {
                    ctx.set(dx, dy, ElementType::Background);
                }
            } else {
                ctx.set(dx, dy, ElementType::Background);
            }
            return true;
        }
        false
    }
}

impl Behavior for LiquidBehavior {
    fn update(&self, ctx: &mut UpdateContext) {
        match ctx.element() {
            ElementType::Water => {
                if displace(ctx, ElementType::Oil, 0.25, 0.5) {
                    return;
                }
                self.fall_or_flow(ctx);
            }
            ElementType::SaltWater => {
                if displace(ctx, ElementType::Water, 0.5, 0.5) {
                    return;
                }
                self.fall_or_flow(ctx);
            }
            ElementType::Oil => {
                if ctx.chance(0.3) && bordering(ctx, ElementType::Fire).is_some() {
                    fill_empty_border(ctx, ElementType::Fire);
                    ctx.set_self(ElementType::Fire);
                    return;
                }
                self.fall_or_flow(ctx);
            }
            ElementType::Lava => self.update_lava(ctx),
            ElementType::Acid => {
                if ctx.chance(0.1) && self.dissolve(ctx) {
                    return;
                }
                if displace(ctx, ElementType::Water, 0.25, 0.3)
                    || displace(ctx, ElementType::SaltWater, 0.25, 0.3)
                {
                    return;
                }
                self.fall_or_flow(ctx);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::elements::ElementType::{self, *};
    use crate::systems::behaviors::testing::Bench;

    /// Box of `edge` cells around a `w - 2` by `h - 2` interior.
    fn boxed(w: u32, h: u32, edge: ElementType) -> Bench {
        let mut b = Bench::new(w, h);
        b.fill(0..w, 0..1, edge);
        b.fill(0..w, h - 1..h, edge);
        b.fill(0..1, 0..h, edge);
        b.fill(w - 1..w, 0..h, edge);
        b
    }

    #[test]
    fn lava_meeting_water_leaves_rock_and_steam() {
        let mut b = boxed(4, 3, Wall);
        b.put(1, 1, Lava);
        b.put(2, 1, Water);
        b.step();
        assert_eq!((b.at(1, 1), b.at(2, 1)), (Rock, Steam));
    }

    #[test]
    fn lava_sets_fuel_alight() {
        let mut b = boxed(4, 3, Wall);
        b.put(1, 1, Lava);
        b.put(2, 1, Plant);
        assert!(b.run_until(100, |b| b.at(2, 1) == Fire).is_some());
    }

    #[test]
    fn water_sinks_under_oil() {
        let mut b = boxed(3, 4, Wall);
        b.put(1, 1, Water);
        b.put(1, 2, Oil);
        assert!(b
            .run_until(100, |b| b.at(1, 2) == Water && b.at(1, 1) == Oil)
            .is_some());
    }

    #[test]
    fn salt_water_sinks_under_fresh() {
        let mut b = boxed(3, 4, Wall);
        b.put(1, 1, SaltWater);
        b.put(1, 2, Water);
        assert!(b
            .run_until(100, |b| b.at(1, 2) == SaltWater && b.at(1, 1) == Water)
            .is_some());
    }

    #[test]
    fn oil_catches_fire() {
        let mut b = boxed(5, 3, Wall);
        b.put(1, 1, Wax);
        b.put(2, 1, Fire);
        b.put(3, 1, Oil);
        assert!(b.run_until(100, |b| b.count(Oil) == 0).is_some());
        assert_eq!(b.at(3, 1), Fire);
    }

    #[test]
    fn water_levels_out() {
        let mut b = boxed(7, 3, Wall);
        b.put(3, 1, Water);
        b.step();
        assert_ne!(b.at(3, 1), Water);
        assert_eq!(b.count(Water), 1);
    }

    #[test]
    fn acid_dissolves_its_neighbor() {
        // Ice walls: acid cannot eat its way out.
        let mut b = boxed(4, 3, Ice);
        b.put(1, 1, Acid);
        b.put(2, 1, Sand);
        assert!(b.run_until(300, |b| b.count(Sand) == 0).is_some());
        assert_eq!(b.count(Acid), 1);
        assert_eq!(b.count(Ice), 10);
    }

    #[test]
    fn acid_eats_downward() {
        let mut b = boxed(3, 5, Ice);
        b.put(1, 2, Acid);
        b.put(1, 3, Rock);
        assert!(b.run_until(300, |b| b.count(Rock) == 0).is_some());
        assert_eq!(b.at(1, 3), Acid);
        assert_eq!(b.at(1, 2), Background);
    }
}
