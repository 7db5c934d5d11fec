//! Spigots - fixed emitters in the top band of the grid.

use crate::core::hash::{cell_chance, hash2, SALT_SPIGOT};
use crate::domain::config::{SpigotConfig, NUM_SPIGOTS, SPIGOT_HEIGHT};
use crate::grid::Grid;

/// Chance that an empty zone cell receives material on a tick.
pub const SPIGOT_DENSITY: f64 = 0.1;

/// Hue jitter range, in degrees, for rainbow spigot output.
const HUE_JITTER: u32 = 60;

/// Half-open column range `[start, end)` of zone `slot` on a grid `grid_width`
/// wide, or `None` when the zone is disabled or falls off the grid.
pub fn zone_span(slot: usize, zone_width: u32, grid_width: u32) -> Option<(u32, u32)> {
    if zone_width == 0 || slot >= NUM_SPIGOTS {
        return None;
    }
    let centre = (slot as i64 + 1) * grid_width as i64 / (NUM_SPIGOTS as i64 + 1);
    let start = centre - zone_width as i64 / 2;
    let end = start + zone_width as i64;
    let (start, end) = (start.max(0), end.min(grid_width as i64));
    (start < end).then_some((start as u32, end as u32))
}

/// Inject spigot material into empty cells of every enabled zone.
pub fn inject(grid: &mut Grid, spigots: &[SpigotConfig; NUM_SPIGOTS], tick: u64, seed: u32) {
    let band = SPIGOT_HEIGHT.min(grid.height());
    for (slot, spigot) in spigots.iter().enumerate() {
        let Some((start, end)) = zone_span(slot, spigot.width, grid.width()) else {
            continue;
        };
        for y in 0..band {
            for x in start..end {
                let idx = grid.index(x, y);
                if !grid.is_empty_idx(idx) {
                    continue;
                }
                if !cell_chance(seed, x, y, tick, SALT_SPIGOT, SPIGOT_DENSITY) {
                    continue;
                }
                let color = spigot.element.spawn_color(tick, hash2(x, y) % HUE_JITTER);
                grid.set_cell_idx(idx, spigot.element, color);
            }
        }
    }
}
