//! EnergyBehavior - fire and the reactive compounds it sets off

use super::common::{bordering, bordering_adjacent, fall, fill_empty_border, sink, surrounded_by};
use super::{Behavior, UpdateContext};
use crate::elements::ElementType;
use crate::systems::particles::ParticleKind;

/// Elements burning thermite does not set alight.
const THERMITE_PROOF: [ElementType; 4] = [
    ElementType::Thermite,
    ElementType::BurningThermite,
    ElementType::Lava,
    ElementType::Wall,
];

/// Fuel fire spreads into, with the per-tick spread chance.
const FUELS: [(ElementType, f64); 4] = [
    (ElementType::Plant, 0.2),
    (ElementType::Fuse, 0.8),
    (ElementType::Branch, 0.2),
    (ElementType::Leaf, 0.2),
];

pub struct EnergyBehavior;

impl EnergyBehavior {
    /// Fuel in the surrounding 3x3 that keeps a flame alive. Wax only counts
    /// orthogonally; oil only half the time.
    fn has_fuel(&self, ctx: &mut UpdateContext) -> bool {
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                match ctx.at(dx, dy) {
                    Some(
                        ElementType::Plant
                        | ElementType::Fuse
                        | ElementType::Branch
                        | ElementType::Leaf,
                    ) => return true,
                    Some(ElementType::Wax) if dx == 0 || dy == 0 => return true,
                    Some(ElementType::Oil) if ctx.chance(0.5) => return true,
                    _ => {}
                }
            }
        }
        false
    }

    fn update_fire(&self, ctx: &mut UpdateContext) {
        if ctx.chance(0.8) {
            for liquid in [ElementType::Water, ElementType::SaltWater] {
                if let Some((dx, dy)) = bordering(ctx, liquid) {
                    ctx.set(dx, dy, ElementType::Steam);
                    ctx.vanish();
                    return;
                }
            }
        }

        for (fuel, p) in FUELS {
            if ctx.chance(p) {
                if let Some((dx, dy)) = bordering_adjacent(ctx, fuel) {
                    ctx.set(dx, dy, ElementType::Fire);
                    return;
                }
            }
        }

        if ctx.chance(0.01) {
            if let Some((dx, dy)) = bordering(ctx, ElementType::Wax) {
                ctx.set(dx, dy, ElementType::Fire);
                // Melted wax drips from under the lower of the two cells.
                let drip_y = dy.max(0) + 1;
                if ctx.is_empty_at(dx, drip_y) {
                    ctx.set(dx, drip_y, ElementType::FallingWax);
                }
                return;
            }
        }

        if ctx.chance(0.5) && ctx.is_empty_at(0, -1) {
            ctx.set(0, -1, ElementType::Fire);
            return;
        }

        if ctx.chance(0.2) {
            if let Some((dx, dy)) = bordering_adjacent(ctx, ElementType::Oil) {
                ctx.set(dx, dy, ElementType::Fire);
                return;
            }
        }

        if ctx.chance(0.4) && !self.has_fuel(ctx) {
            ctx.vanish();
        }
    }

    fn update_nitro(&self, ctx: &mut UpdateContext) {
        if fall(ctx, true) {
            return;
        }
        if bordering_adjacent(ctx, ElementType::Fire).is_some() {
            if ctx.chance(0.3) {
                fill_empty_border(ctx, ElementType::Fire);
                ctx.set_self(ElementType::Fire);
                return;
            }
            if ctx.chance(0.2) {
                ctx.set_self(ElementType::Fire);
                return;
            }
        }
        for lighter in [
            ElementType::Oil,
            ElementType::Water,
            ElementType::SaltWater,
            ElementType::Pollen,
        ] {
            if sink(ctx, lighter, true, 0.25) {
                return;
            }
        }
    }

    fn update_burning_thermite(&self, ctx: &mut UpdateContext) {
        for (dx, dy) in [(0, -1), (-1, 0), (1, 0)] {
            if let Some(e) = ctx.at(dx, dy) {
                if !THERMITE_PROOF.contains(&e) {
                    ctx.set(dx, dy, ElementType::Fire);
                }
            }
        }

        if ctx.chance(0.02) && ctx.chance(0.07) {
            ctx.spawn(ParticleKind::ChargedNitro);
            ctx.set_self(ElementType::Fire);
            return;
        }
        if ctx.chance(0.02) {
            ctx.set_self(ElementType::Fire);
            return;
        }

        // Melts through walls beside and below.
        if ctx.chance(0.08) {
            if let Some(dx) = [-1, 1].into_iter().find(|&dx| ctx.is(dx, 0, ElementType::Wall)) {
                ctx.set(dx, 0, ElementType::Background);
            }
            if ctx.is(0, 1, ElementType::Wall) {
                ctx.set(0, 1, ElementType::Background);
            }
        }
        if ctx.is(0, 1, ElementType::Fire) {
            ctx.set(0, 1, ElementType::Background);
        }

        if fall(ctx, false) {
            return;
        }
        for lighter in [ElementType::Water, ElementType::SaltWater, ElementType::Oil] {
            if sink(ctx, lighter, false, 0.95) {
                return;
            }
        }
    }

    /// Freeze the first freezable neighbor found in the 3x3, else fall.
    fn update_cryo(&self, ctx: &mut UpdateContext) {
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                match ctx.at(dx, dy) {
                    Some(ElementType::Water) => {
                        ctx.set(dx, dy, ElementType::Ice);
                        ctx.set_self(ElementType::Ice);
                        return;
                    }
                    Some(ElementType::Ice) => {
                        let ice = if ctx.chance(0.0005) {
                            ElementType::ChilledIce
                        } else {
                            ElementType::Ice
                        };
                        ctx.set(dx, dy, ice);
                        ctx.set_self(ice);
                        return;
                    }
                    Some(
                        ElementType::Wall | ElementType::Wax | ElementType::Plant | ElementType::C4,
                    ) => {
                        ctx.set_self(ElementType::Ice);
                        return;
                    }
                    Some(ElementType::Lava) => {
                        ctx.set(dx, dy, ElementType::Rock);
                        ctx.vanish();
                        return;
                    }
                    _ => {}
                }
            }
        }

        if fall(ctx, true) {
            return;
        }
        if ctx.chance(0.005)
            && bordering(ctx, ElementType::Background).is_none()
            && !surrounded_by(ctx, ElementType::Cryo)
        {
            ctx.set_self(ElementType::Ice);
        }
    }

    /// Become fire and release `kind` when fire borders this cell.
    fn ignite_into(&self, ctx: &mut UpdateContext, p: f64, kind: ParticleKind) -> bool {
        if ctx.chance(p) && bordering(ctx, ElementType::Fire).is_some() {
            ctx.spawn(kind);
            ctx.set_self(ElementType::Fire);
            return true;
        }
        false
    }
}

impl Behavior for EnergyBehavior {
    fn update(&self, ctx: &mut UpdateContext) {
        match ctx.element() {
            ElementType::Fire => self.update_fire(ctx),
            ElementType::Nitro => self.update_nitro(ctx),
            ElementType::Napalm => {
                if self.ignite_into(ctx, 0.25, ParticleKind::Napalm) {
                    return;
                }
                fall(ctx, true);
            }
            ElementType::C4 => {
                self.ignite_into(ctx, 0.6, ParticleKind::C4);
            }
            ElementType::Mystery => {
                if bordering_adjacent(ctx, ElementType::Sand).is_some() {
                    ctx.spawn(ParticleKind::Magic1);
                    ctx.vanish();
                    return;
                }
                if bordering_adjacent(ctx, ElementType::Salt).is_some() {
                    ctx.spawn(ParticleKind::Magic2);
                    ctx.vanish();
                    return;
                }
                fall(ctx, true);
            }
            ElementType::ChargedNitro => {
                if fall(ctx, true) {
                    return;
                }
                if sink(ctx, ElementType::Nitro, true, 0.25)
                    || sink(ctx, ElementType::Pollen, true, 0.25)
                {
                    return;
                }
                if bordering_adjacent(ctx, ElementType::Fire).is_some() {
                    ctx.spawn(ParticleKind::ChargedNitro);
                    ctx.set_self(ElementType::Fire);
                }
            }
            ElementType::BurningThermite => self.update_burning_thermite(ctx),
            ElementType::Cryo => self.update_cryo(ctx),
            _ => {}
        }
    }
}
