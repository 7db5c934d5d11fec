//! Movement and neighborhood helpers shared by the behaviors.

use super::UpdateContext;
use crate::core::hash::{cell_chance, SALT_GRAVITY};
use crate::elements::ElementType;

/// Diagonal order for `tick`: even ticks try left first, odd ticks right.
#[inline]
pub fn diagonal_order(tick: u64) -> (i32, i32) {
    if tick & 1 == 0 {
        (-1, 1)
    } else {
        (1, -1)
    }
}

/// Whether the cell at (x, y) is pulled by gravity on `tick`. Both execution
/// models use this exact roll.
#[inline]
pub fn gravity_roll(seed: u32, x: u32, y: u32, tick: u64, p: f64) -> bool {
    cell_chance(seed, x, y, tick, SALT_GRAVITY, p)
}

const RING: [(i32, i32); 8] = [
    (0, 1),
    (-1, 1),
    (1, 1),
    (-1, 0),
    (1, 0),
    (0, -1),
    (-1, -1),
    (1, -1),
];

/// Orthogonal neighbor holding `target`: below, then the sides, then above.
pub fn bordering(ctx: &UpdateContext, target: ElementType) -> Option<(i32, i32)> {
    let (d1, d2) = diagonal_order(ctx.tick);
    [(0, 1), (d1, 0), (d2, 0), (0, -1)]
        .into_iter()
        .find(|&(dx, dy)| ctx.is(dx, dy, target))
}

/// Any of the eight surrounding cells holding `target`.
pub fn bordering_adjacent(ctx: &UpdateContext, target: ElementType) -> Option<(i32, i32)> {
    RING.iter().copied().find(|&(dx, dy)| ctx.is(dx, dy, target))
}

/// Is a straight or diagonal slide into (dx, 1) open? A diagonal is refused when
/// the cell under its target is a wall.
#[inline]
fn can_slide(ctx: &UpdateContext, dx: i32) -> bool {
    ctx.is_empty_at(dx, 1) && (dx == 0 || !ctx.is(dx, 2, ElementType::Wall))
}

/// True when nothing can move into the cell straight below.
#[inline]
pub fn blocked_below(ctx: &UpdateContext) -> bool {
    match ctx.at(0, 1) {
        None => !ctx.fall_into_void,
        Some(e) => !e.is_empty(),
    }
}

/// Gravity: straight down, then the diagonals in parity order, or out through
/// the bottom edge when the void is open. Returns true if the cell left.
pub fn fall(ctx: &mut UpdateContext, diagonal: bool) -> bool {
    if !gravity_roll(ctx.seed, ctx.x, ctx.y, ctx.tick, ctx.gravity_probability) {
        return false;
    }
    if ctx.at(0, 1).is_none() {
        if ctx.fall_into_void {
            ctx.vanish();
            return true;
        }
        return false;
    }
    if can_slide(ctx, 0) {
        ctx.move_by(0, 1);
        return true;
    }
    if !diagonal {
        return false;
    }
    let (d1, d2) = diagonal_order(ctx.tick);
    for d in [d1, d2] {
        if can_slide(ctx, d) {
            ctx.move_by(d, 1);
            return true;
        }
    }
    false
}

/// Sideways spread into an empty neighbor, parity order.
pub fn flow(ctx: &mut UpdateContext) -> bool {
    let (d1, d2) = diagonal_order(ctx.tick);
    for d in [d1, d2] {
        if ctx.is_empty_at(d, 0) {
            ctx.move_by(d, 0);
            return true;
        }
    }
    false
}

/// Swap down through a lighter element with probability `p`.
pub fn sink(ctx: &mut UpdateContext, lighter: ElementType, diagonal: bool, p: f64) -> bool {
    if !ctx.chance(p) {
        return false;
    }
    let (d1, d2) = diagonal_order(ctx.tick);
    let columns: &[i32] = if diagonal { &[0, d1, d2] } else { &[0] };
    for &dx in columns {
        if ctx.is(dx, 1, lighter) {
            ctx.swap_with(dx, 1);
            return true;
        }
    }
    false
}

/// Liquid displacement: sink below/diagonally through `heavier_than` with
/// `sink_p`, else trade places sideways with `level_p`.
pub fn displace(ctx: &mut UpdateContext, heavier_than: ElementType, sink_p: f64, level_p: f64) -> bool {
    if sink(ctx, heavier_than, true, sink_p) {
        return true;
    }
    if !ctx.chance(level_p) {
        return false;
    }
    let (d1, d2) = diagonal_order(ctx.tick);
    for d in [d1, d2] {
        if ctx.is(d, 0, heavier_than) {
            ctx.swap_with(d, 0);
            return true;
        }
    }
    false
}

/// Rise like a gas: up or up-diagonal with `up_p`, else sideways with `side_p`.
pub fn rise(ctx: &mut UpdateContext, up_p: f64, side_p: f64) -> bool {
    if ctx.chance(up_p) {
        if ctx.at(0, -1).is_none() {
            if ctx.fall_into_void {
                ctx.vanish();
                return true;
            }
            return false;
        }
        let (d1, d2) = diagonal_order(ctx.tick);
        for dx in [0, d1, d2] {
            if ctx.is_empty_at(dx, -1) {
                ctx.move_by(dx, -1);
                return true;
            }
        }
    }
    ctx.chance(side_p) && flow(ctx)
}

/// Turn into `into` when bordering `by`; the neighbor converts too with `consume_p`.
pub fn transform(
    ctx: &mut UpdateContext,
    by: ElementType,
    into: ElementType,
    p: f64,
    consume_p: f64,
) -> bool {
    if !ctx.chance(p) {
        return false;
    }
    let Some((dx, dy)) = bordering(ctx, by) else {
        return false;
    };
    ctx.set_self(into);
    if ctx.chance(consume_p) {
        ctx.set(dx, dy, into);
    }
    true
}

/// Set every empty orthogonal neighbor to `e`.
pub fn fill_empty_border(ctx: &mut UpdateContext, e: ElementType) {
    for (dx, dy) in [(0, -1), (0, 1), (-1, 0), (1, 0)] {
        if ctx.is_empty_at(dx, dy) {
            ctx.set(dx, dy, e);
        }
    }
}

/// Directly above or on either upper diagonal, parity order.
pub fn above_adjacent(ctx: &UpdateContext, target: ElementType) -> Option<(i32, i32)> {
    let (d1, d2) = diagonal_order(ctx.tick);
    [(0, -1), (d1, -1), (d2, -1)]
        .into_iter()
        .find(|&(dx, dy)| ctx.is(dx, dy, target))
}

/// Directly below or on either lower diagonal, parity order.
pub fn below_adjacent(ctx: &UpdateContext, target: ElementType) -> Option<(i32, i32)> {
    let (d1, d2) = diagonal_order(ctx.tick);
    [(0, 1), (d1, 1), (d2, 1)]
        .into_iter()
        .find(|&(dx, dy)| ctx.is(dx, dy, target))
}

/// Every on-grid orthogonal neighbor holds `target`.
pub fn surrounded_by(ctx: &UpdateContext, target: ElementType) -> bool {
    [(0, -1), (0, 1), (-1, 0), (1, 0)]
        .into_iter()
        .all(|(dx, dy)| ctx.at(dx, dy).map_or(true, |e| e == target))
}

/// Every on-grid cell of the ring holds `target`.
pub fn surrounded_by_adjacent(ctx: &UpdateContext, target: ElementType) -> bool {
    RING.iter()
        .all(|&(dx, dy)| ctx.at(dx, dy).map_or(true, |e| e == target))
}

/// Emitter: with probability `p`, write `e` into the four orthogonal neighbors,
/// only the empty ones unless `overwrite`.
pub fn produce(ctx: &mut UpdateContext, e: ElementType, overwrite: bool, p: f64) -> bool {
    if !ctx.chance(p) {
        return false;
    }
    for (dx, dy) in [(0, -1), (0, 1), (-1, 0), (1, 0)] {
        match ctx.at(dx, dy) {
            Some(n) if overwrite || n.is_empty() => ctx.set(dx, dy, e),
            _ => {}
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::elements::ElementType::*;
    use crate::systems::behaviors::ParticleEffects;

    fn grid(w: u32, h: u32, cells: &[(u32, u32, ElementType)]) -> Grid {
        let mut g = Grid::new(w, h);
        for &(x, y, e) in cells {
            g.set_cell(x, y, e, e.color());
        }
        g
    }

    /// Run `f` on a context at (x, y), tick 0, full gravity.
    fn with_ctx<R>(
        g: &mut Grid,
        x: u32,
        y: u32,
        fall_into_void: bool,
        f: impl FnOnce(&mut UpdateContext) -> R,
    ) -> R {
        let mut effects = ParticleEffects::default();
        let mut ctx = UpdateContext::new(g, &mut effects, x, y, 0, 1, 1.0, fall_into_void);
        f(&mut ctx)
    }

    #[test]
    fn diagonal_order_alternates_with_parity() {
        assert_eq!(diagonal_order(0), (-1, 1));
        assert_eq!(diagonal_order(1), (1, -1));
    }

    #[test]
    fn falls_straight_down_first() {
        let mut g = grid(3, 3, &[(1, 0, Sand)]);
        assert!(with_ctx(&mut g, 1, 0, false, |c| fall(c, true)));
        assert_eq!(g.get_type(1, 1), Sand);
        assert_eq!(g.get_type(1, 0), Background);
    }

    #[test]
    fn diagonal_over_a_wall_is_refused() {
        // Tick 0 tries left first; the left target sits on a wall.
        let mut g = grid(3, 3, &[(1, 0, Sand), (1, 1, Rock), (0, 2, Wall)]);
        assert!(with_ctx(&mut g, 1, 0, false, |c| fall(c, true)));
        assert_eq!(g.get_type(2, 1), Sand);
        assert_eq!(g.get_type(0, 1), Background);
    }

    #[test]
    fn no_diagonal_means_no_slide() {
        let mut g = grid(3, 3, &[(1, 0, Rock), (1, 1, Rock)]);
        assert!(!with_ctx(&mut g, 1, 0, false, |c| fall(c, false)));
        assert_eq!(g.get_type(1, 0), Rock);
    }

    #[test]
    fn bottom_edge_is_a_floor_unless_the_void_is_open() {
        let mut g = grid(1, 2, &[(0, 1, Sand)]);
        assert!(!with_ctx(&mut g, 0, 1, false, |c| fall(c, true)));
        assert_eq!(g.get_type(0, 1), Sand);
        assert!(with_ctx(&mut g, 0, 1, true, |c| fall(c, true)));
        assert_eq!(g.count(Sand), 0);
    }

    #[test]
    fn sure_sink_swaps_with_the_lighter_cell() {
        let mut g = grid(1, 2, &[(0, 0, Sand), (0, 1, Water)]);
        assert!(with_ctx(&mut g, 0, 0, false, |c| sink(c, Water, false, 1.0)));
        assert_eq!((g.get_type(0, 0), g.get_type(0, 1)), (Water, Sand));
    }

    #[test]
    fn never_sink_leaves_cells_alone() {
        let mut g = grid(1, 2, &[(0, 0, Sand), (0, 1, Water)]);
        assert!(!with_ctx(&mut g, 0, 0, false, |c| sink(c, Water, false, 0.0)));
        assert_eq!(g.get_type(0, 0), Sand);
    }

    #[test]
    fn displace_levels_sideways() {
        let mut g = grid(3, 1, &[(1, 0, SaltWater), (0, 0, Water)]);
        assert!(with_ctx(&mut g, 1, 0, false, |c| displace(c, Water, 0.0, 1.0)));
        assert_eq!((g.get_type(0, 0), g.get_type(1, 0)), (SaltWater, Water));
    }

    #[test]
    fn produce_respects_overwrite() {
        let mut g = grid(3, 3, &[(1, 1, Spout), (1, 0, Wall)]);
        assert!(with_ctx(&mut g, 1, 1, false, |c| produce(c, Water, false, 1.0)));
        assert_eq!(g.get_type(1, 0), Wall);
        assert_eq!(g.count(Water), 3);

        let mut g = grid(3, 3, &[(1, 1, Torch), (1, 0, Wall)]);
        assert!(with_ctx(&mut g, 1, 1, false, |c| produce(c, Fire, true, 1.0)));
        assert_eq!(g.count(Fire), 4);
        assert_eq!(g.count(Wall), 0);
    }

    #[test]
    fn surrounded_treats_the_edge_as_filled() {
        let mut g = grid(2, 2, &[(0, 0, Soil), (1, 0, Soil), (0, 1, Soil)]);
        assert!(with_ctx(&mut g, 0, 0, false, |c| surrounded_by(c, Soil)));
        assert!(!with_ctx(&mut g, 0, 0, false, |c| surrounded_by_adjacent(c, Soil)));
        g.set_cell(1, 1, Soil, Soil.color());
        assert!(with_ctx(&mut g, 0, 0, false, |c| surrounded_by_adjacent(c, Soil)));
    }

    #[test]
    fn neighbor_searches_report_offsets() {
        let mut g = grid(3, 3, &[(1, 1, Soil), (2, 0, Water), (0, 2, Wall)]);
        with_ctx(&mut g, 1, 1, false, |c| {
            assert_eq!(above_adjacent(c, Water), Some((1, -1)));
            assert_eq!(below_adjacent(c, Wall), Some((-1, 1)));
            assert_eq!(bordering(c, Water), None);
            assert_eq!(bordering_adjacent(c, Water), Some((1, -1)));
        });
    }
}
