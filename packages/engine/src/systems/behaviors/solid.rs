//! SolidBehavior - static solids: ice melts, wax softens, emitters produce.
//! Walls and fuse never change on their own.

use super::common::{bordering, produce};
use super::{Behavior, UpdateContext};
use crate::elements::ElementType;

/// Neighbors that thaw chilled ice back to plain ice.
const THAWS_CHILLED: [ElementType; 5] = [
    ElementType::Salt,
    ElementType::SaltWater,
    ElementType::Lava,
    ElementType::Fire,
    ElementType::Steam,
];

pub struct SolidBehavior;

impl SolidBehavior {
    fn update_ice(&self, ctx: &mut UpdateContext) {
        if ctx.chance(0.01) && bordering(ctx, ElementType::Water).is_some() {
            ctx.set_self(ElementType::Water);
            return;
        }
        if ctx.chance(0.7) {
            if let Some((dx, dy)) = bordering(ctx, ElementType::Steam) {
                ctx.set_self(ElementType::Water);
                if ctx.chance(0.5) {
                    ctx.set(dx, dy, ElementType::Water);
                }
                return;
            }
        }
        if ctx.chance(0.1)
            && (bordering(ctx, ElementType::Salt).is_some()
                || bordering(ctx, ElementType::SaltWater).is_some())
        {
            ctx.set_self(ElementType::Water);
            return;
        }
        for heat in [ElementType::Fire, ElementType::Lava] {
            if ctx.chance(0.5) && bordering(ctx, heat).is_some() {
                ctx.set_self(ElementType::Water);
                return;
            }
        }
    }
}

impl Behavior for SolidBehavior {
    fn update(&self, ctx: &mut UpdateContext) {
        match ctx.element() {
            ElementType::Ice => self.update_ice(ctx),
            ElementType::Wax => {
                if ctx.chance(0.01) && bordering(ctx, ElementType::Fire).is_some() {
                    ctx.set_self(ElementType::FallingWax);
                }
            }
            ElementType::ChilledIce => {
                if ctx.chance(0.06)
                    || THAWS_CHILLED
                        .iter()
                        .any(|&e| bordering(ctx, e).is_some())
                {
                    ctx.set_self(ElementType::Ice);
                }
            }
            ElementType::Spout => {
                produce(ctx, ElementType::Water, false, 0.05);
            }
            ElementType::Well => {
                produce(ctx, ElementType::Oil, false, 0.1);
            }
            ElementType::Torch => {
                produce(ctx, ElementType::Fire, true, 0.25);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::elements::ElementType::{self, *};
    use crate::systems::behaviors::testing::Bench;

    /// Single interior cell at (1, 1) with `e` at (2, 1), walled in.
    fn pair(a: ElementType, e: ElementType) -> Bench {
        let mut b = Bench::new(4, 3);
        b.fill(0..4, 0..3, Wall);
        b.put(1, 1, a);
        b.put(2, 1, e);
        b
    }

    #[test]
    fn ice_melts_beside_fire() {
        let mut b = Bench::new(5, 3);
        b.fill(0..5, 0..3, Wall);
        b.put(1, 1, Ice);
        b.put(2, 1, Fire);
        b.put(3, 1, Wax);
        assert!(b.run_until(100, |b| b.at(1, 1) == Water).is_some());
    }

    #[test]
    fn ice_melts_beside_salt() {
        let mut b = pair(Ice, Salt);
        assert!(b.run_until(300, |b| b.at(1, 1) == Water).is_some());
    }

    #[test]
    fn chilled_ice_thaws_to_ice() {
        let mut b = pair(ChilledIce, Wall);
        assert!(b.run_until(500, |b| b.at(1, 1) == Ice).is_some());
    }

    #[test]
    fn chilled_ice_thaws_at_once_beside_salt() {
        let mut b = pair(ChilledIce, Salt);
        b.step();
        assert_eq!(b.at(1, 1), Ice);
    }

    #[test]
    fn walls_stay_put() {
        let mut b = pair(Wall, Fire);
        for _ in 0..50 {
            b.step();
        }
        assert_eq!(b.count(Wall), 11);
    }

    #[test]
    fn spout_fills_open_neighbors_only() {
        let mut b = Bench::new(3, 3);
        b.put(1, 1, Spout);
        b.put(1, 0, Wall);
        assert!(b.run_until(500, |b| b.count(Water) > 0).is_some());
        assert_eq!(b.at(1, 0), Wall);
        assert_eq!(b.count(Water), 3);
    }

    #[test]
    fn well_produces_oil() {
        let mut b = Bench::new(3, 3);
        b.put(1, 1, Well);
        assert!(b.run_until(500, |b| b.count(Oil) == 4).is_some());
    }

    #[test]
    fn torch_burns_over_walls() {
        let mut b = Bench::new(3, 3);
        b.put(1, 1, Torch);
        b.put(1, 0, Wall);
        assert!(b.run_until(500, |b| b.at(1, 0) == Fire).is_some());
    }
}
