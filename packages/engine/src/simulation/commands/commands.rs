use crate::elements::ElementType;
use crate::systems::interaction::{InteractionAction, InteractionCommand};
use crate::systems::particles::ParticleKind;

use super::WorldCore;

/// A newer command replaces one that has not been applied yet.
pub(super) fn queue(world: &mut WorldCore, cmd: InteractionCommand) {
    world.pending = Some(cmd);
}

pub(super) fn paint(world: &mut WorldCore, x: i32, y: i32, radius: u32, element: ElementType) {
    let overwrite = world.config.overwrite;
    queue(world, InteractionCommand::paint(x, y, radius, element, overwrite));
}

pub(super) fn erase(world: &mut WorldCore, x: i32, y: i32, radius: u32) {
    queue(world, InteractionCommand::erase(x, y, radius));
}

pub(super) fn none(world: &mut WorldCore) {
    queue(
        world,
        InteractionCommand {
            action: InteractionAction::None,
            ..InteractionCommand::erase(0, 0, 0)
        },
    );
}

/// NaN or infinite coordinates are refused along with off-grid ones.
pub(super) fn spawn_particle(world: &mut WorldCore, kind: ParticleKind, x: f32, y: f32) -> bool {
    if !x.is_finite() || !y.is_finite() {
        return false;
    }
    let Some(idx) = world.grid.checked_index(x.round() as i32, y.round() as i32) else {
        return false;
    };
    world
        .particles
        .acquire(kind, x, y, idx, &world.grid)
        .is_some()
}
