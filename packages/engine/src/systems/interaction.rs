//! Interaction - brush commands from the input layer, applied before anything
//! else on a tick.

use serde::{Deserialize, Serialize};

use crate::elements::ElementType;
use crate::grid::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InteractionAction {
    Paint,
    Erase,
    #[default]
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionCommand {
    pub x: i32,
    pub y: i32,
    pub radius: u32,
    pub action: InteractionAction,
    pub element: ElementType,
    /// Paint replaces anything, walls included.
    pub overwrite: bool,
}

impl InteractionCommand {
    pub fn paint(x: i32, y: i32, radius: u32, element: ElementType, overwrite: bool) -> Self {
        Self {
            x,
            y,
            radius,
            action: InteractionAction::Paint,
            element,
            overwrite,
        }
    }

    pub fn erase(x: i32, y: i32, radius: u32) -> Self {
        Self {
            x,
            y,
            radius,
            action: InteractionAction::Erase,
            element: ElementType::Background,
            overwrite: true,
        }
    }
}

/// Apply `cmd` over its disc. Returns the number of cells changed.
///
/// Only the part of the disc's bounding square that overlaps the grid is
/// visited, so a huge radius or a far-off center costs no more than the grid.
pub fn apply(grid: &mut Grid, cmd: &InteractionCommand, tick: u64) -> u32 {
    if cmd.action == InteractionAction::None {
        return 0;
    }
    let (w, h) = (grid.width() as i64, grid.height() as i64);
    let (cx, cy, r) = (cmd.x as i64, cmd.y as i64, cmd.radius as i64);
    let (x0, x1) = ((cx - r).max(0), (cx + r).min(w - 1));
    let (y0, y1) = ((cy - r).max(0), (cy + r).min(h - 1));
    if x0 > x1 || y0 > y1 {
        return 0;
    }
    let r_sq = (r as i128) * (r as i128);
    let mut changed = 0;

    for y in y0..=y1 {
        let dy = (y - cy) as i128;
        for x in x0..=x1 {
            let dx = (x - cx) as i128;
            if dx * dx + dy * dy > r_sq {
                continue;
            }
            let idx = grid.index(x as u32, y as u32);
            match cmd.action {
                InteractionAction::Paint => {
                    if !cmd.overwrite && !grid.is_empty_idx(idx) {
                        continue;
                    }
                    grid.set_cell_idx(idx, cmd.element, cmd.element.spawn_color(tick, 0));
                }
                InteractionAction::Erase => grid.clear_cell_idx(idx),
                InteractionAction::None => {}
            }
            changed += 1;
        }
    }
    changed
}
