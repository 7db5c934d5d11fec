//! Gather model: every output cell is a pure function of the frozen front buffer.
//!
//! Each cell decides where it would go (`plan`). A cell that leaves writes
//! background into its own output; an empty cell scans its possible sources and
//! copies the one whose plan lands on it. Plans never collide: a straight fall
//! beats any diagonal into the same cell, and of two diagonal claimants the one
//! for which it is the first choice wins.
//!
//! Rows are independent work units, so with the `parallel` feature they run on
//! rayon and produce the same buffer as the serial path.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::behaviors::{diagonal_order, gravity_roll};
use super::TickParams;
use crate::core::hash::{cell_chance, SALT_DECAY};
use crate::elements::ElementType;
use crate::grid::{GatherBuffers, Grid, BG_COLOR};

/// Per-tick chance that a fire cell goes out.
pub const FIRE_DECAY: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Plan {
    Stay,
    Move(usize),
    Vanish,
}

struct Kernel<'a> {
    types: &'a [ElementType],
    colors: &'a [u32],
    w: i32,
    h: i32,
    params: &'a TickParams,
    /// Preferred diagonal this tick, then the other one.
    d1: i32,
    d2: i32,
}

impl<'a> Kernel<'a> {
    fn new(types: &'a [ElementType], colors: &'a [u32], w: u32, h: u32, params: &'a TickParams) -> Self {
        let (d1, d2) = diagonal_order(params.tick);
        Self {
            types,
            colors,
            w: w as i32,
            h: h as i32,
            params,
            d1,
            d2,
        }
    }

    #[inline]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        (x >= 0 && y >= 0 && x < self.w && y < self.h).then(|| (y * self.w + x) as usize)
    }

    #[inline]
    fn get(&self, x: i32, y: i32) -> Option<ElementType> {
        self.idx(x, y).map(|i| *fast!(self.types, [i]))
    }

    /// Falling element that passes its gravity roll this tick.
    #[inline]
    fn falls(&self, x: i32, y: i32) -> bool {
        match self.get(x, y) {
            Some(e) if e.falls() => gravity_roll(
                self.params.seed,
                x as u32,
                y as u32,
                self.params.tick,
                self.params.gravity_probability,
            ),
            _ => false,
        }
    }

    /// Could anything slide diagonally into (tx, ty)? It must be empty, not sit
    /// on a wall, and not be claimed by a straight fall from directly above.
    #[inline]
    fn diagonal_open(&self, tx: i32, ty: i32) -> bool {
        self.get(tx, ty) == Some(ElementType::Background)
            && self.get(tx, ty + 1) != Some(ElementType::Wall)
            && !self.falls(tx, ty - 1)
    }

    /// The cell at (x, y) would take its first-choice diagonal if open.
    #[inline]
    fn claims_first_diagonal(&self, x: i32, y: i32) -> bool {
        self.falls(x, y)
            && self.get(x, y).is_some_and(|e| e.props().diagonal)
            && self.get(x, y + 1).is_some_and(|e| !e.is_empty())
    }

    fn plan(&self, x: i32, y: i32) -> Plan {
        if !self.falls(x, y) {
            return Plan::Stay;
        }
        let Some(below) = self.idx(x, y + 1) else {
            return if self.params.fall_into_void {
                Plan::Vanish
            } else {
                Plan::Stay
            };
        };
        if fast!(self.types, [below]).is_empty() {
            return Plan::Move(below);
        }
        if !self.get(x, y).is_some_and(|e| e.props().diagonal) {
            return Plan::Stay;
        }
        if self.diagonal_open(x + self.d1, y + 1) {
            return Plan::Move((y + 1) as usize * self.w as usize + (x + self.d1) as usize);
        }
        if self.diagonal_open(x + self.d2, y + 1) && !self.claims_first_diagonal(x + 2 * self.d2, y) {
            return Plan::Move((y + 1) as usize * self.w as usize + (x + self.d2) as usize);
        }
        Plan::Stay
    }

    /// Output for (x, y).
    fn cell(&self, x: i32, y: i32) -> (ElementType, u32) {
        let here = (y * self.w + x) as usize;
        let element = *fast!(self.types, [here]);

        if element.is_empty() {
            // Straight drop, then the first- and second-choice diagonal sources.
            for sx in [x, x - self.d1, x - self.d2] {
                if let Some(src) = self.idx(sx, y - 1) {
                    if self.plan(sx, y - 1) == Plan::Move(here) {
                        return (*fast!(self.types, [src]), *fast!(self.colors, [src]));
                    }
                }
            }
            return (ElementType::Background, BG_COLOR);
        }

        if self.plan(x, y) != Plan::Stay {
            return (ElementType::Background, BG_COLOR);
        }

        let p = self.params;
        match element {
            ElementType::Fire
                if cell_chance(p.seed, x as u32, y as u32, p.tick, SALT_DECAY, FIRE_DECAY) =>
            {
                (ElementType::Background, BG_COLOR)
            }
            ElementType::FallingWax if self.blocked_below(x, y) => {
                (ElementType::Wax, ElementType::Wax.color())
            }
            _ => (element, *fast!(self.colors, [here])),
        }
    }

    #[inline]
    fn blocked_below(&self, x: i32, y: i32) -> bool {
        match self.get(x, y + 1) {
            None => !self.params.fall_into_void,
            Some(e) => !e.is_empty(),
        }
    }

    fn row(&self, y: usize, types: &mut [ElementType], colors: &mut [u32]) {
        for x in 0..types.len() {
            let (t, c) = self.cell(x as i32, y as i32);
            fast!(types, [x] = t);
            fast!(colors, [x] = c);
        }
    }
}

/// One gather tick: compute every cell into the back buffers, then swap.
pub fn gather_tick(grid: &mut Grid, params: &TickParams) {
    let (w, h) = (grid.width(), grid.height());
    if w == 0 || h == 0 {
        return;
    }
    let GatherBuffers {
        src_types,
        src_colors,
        dst_types,
        dst_colors,
    } = grid.gather_buffers();
    let kernel = Kernel::new(src_types, src_colors, w, h, params);

    #[cfg(feature = "parallel")]
    {
        dst_types
            .par_chunks_mut(w as usize)
            .zip(dst_colors.par_chunks_mut(w as usize))
            .enumerate()
            .for_each(|(y, (types, colors))| kernel.row(y, types, colors));
    }

    #[cfg(not(feature = "parallel"))]
    {
        dst_types
            .chunks_mut(w as usize)
            .zip(dst_colors.chunks_mut(w as usize))
            .enumerate()
            .for_each(|(y, (types, colors))| kernel.row(y, types, colors));
    }

    grid.swap_buffers();
}

/// Single-threaded gather tick regardless of features.
pub fn gather_tick_serial(grid: &mut Grid, params: &TickParams) {
    let (w, h) = (grid.width(), grid.height());
    if w == 0 || h == 0 {
        return;
    }
    let GatherBuffers {
        src_types,
        src_colors,
        dst_types,
        dst_colors,
    } = grid.gather_buffers();
    let kernel = Kernel::new(src_types, src_colors, w, h, params);
    dst_types
        .chunks_mut(w as usize)
        .zip(dst_colors.chunks_mut(w as usize))
        .enumerate()
        .for_each(|(y, (types, colors))| kernel.row(y, types, colors));
    grid.swap_buffers();
}
