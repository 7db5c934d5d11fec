//! PlantBehavior - plants, branches and leaves

use super::common::{bordering, bordering_adjacent, fill_empty_border};
use super::{Behavior, UpdateContext};
use crate::elements::ElementType;

pub struct PlantBehavior;

impl PlantBehavior {
    fn burns(&self, ctx: &mut UpdateContext, p: f64) -> bool {
        if ctx.chance(p) && bordering_adjacent(ctx, ElementType::Fire).is_some() {
            ctx.set_self(ElementType::Fire);
            return true;
        }
        false
    }
}

impl Behavior for PlantBehavior {
    fn update(&self, ctx: &mut UpdateContext) {
        match ctx.element() {
            ElementType::Plant => {
                if ctx.chance(0.5) {
                    if let Some((dx, dy)) = bordering_adjacent(ctx, ElementType::Water) {
                        // Water resting on soil is left for the soil.
                        let on_soil = matches!(
                            ctx.at(dx, dy + 1),
                            Some(ElementType::Soil | ElementType::WetSoil)
                        );
                        if !on_soil {
                            ctx.set(dx, dy, ElementType::Plant);
                            return;
                        }
                    }
                }
                if ctx.chance(0.05) && bordering(ctx, ElementType::Salt).is_some() {
                    ctx.vanish();
                }
            }
            ElementType::Branch => {
                self.burns(ctx, 0.03);
            }
            ElementType::Leaf => {
                if self.burns(ctx, 0.05) {
                    return;
                }
                if ctx.chance(0.2) && bordering_adjacent(ctx, ElementType::Salt).is_some() {
                    ctx.vanish();
                    return;
                }
                if ctx.chance(0.0009) {
                    fill_empty_border(ctx, ElementType::Pollen);
                }
            }
            _ => {}
        }
    }
}
