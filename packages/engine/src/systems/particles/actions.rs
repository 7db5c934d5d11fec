//! Per-kind init and action.
//!
//! `init` seeds size, velocity and extra state; `act` advances one iteration
//! and reports whether the particle is finished.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_8, PI, TAU};

use rand::rngs::SmallRng;
use rand::Rng;

use super::kinds::ParticleKind;
use super::pool::{Particle, ParticleExtra, ParticlePool, TreeShape};
use crate::elements::{ElementType, MAGIC_COLORS};
use crate::grid::Grid;

const LAVA_GRAVITY: f32 = 0.06;
const COLUMN_SPEED: f32 = 30.0;
const SPIRAL_SPEED: f32 = 20.0;

#[inline]
fn unit(rng: &mut SmallRng) -> f32 {
    rng.gen::<f32>()
}

fn magic_color(rng: &mut SmallRng) -> ElementType {
    MAGIC_COLORS[rng.gen_range(0..MAGIC_COLORS.len())]
}

pub(super) fn init(p: &mut Particle, rng: &mut SmallRng, grid: &Grid) {
    p.extra = ParticleExtra::None;
    p.element = ElementType::Fire;
    match p.kind {
        ParticleKind::Nitro => {
            let speed = 5.0 + unit(rng) * 10.0;
            let angle = unit(rng) * TAU;
            p.set_velocity(speed, angle);
            p.size = 2.0 + unit(rng) * 7.0;
        }
        ParticleKind::Napalm => {
            p.size = 6.0 + unit(rng) * 8.0;
            p.vx = unit(rng) * 8.0 - 4.0;
            p.vy = -(unit(rng) * 4.0 + 4.0);
            p.extra = ParticleExtra::Lifetime {
                max_iterations: rng.gen_range(5..=15),
            };
        }
        ParticleKind::C4 => {
            let roll = unit(rng) * 10_000.0;
            let span = if roll < 9_000.0 {
                10.0
            } else if roll < 9_500.0 {
                32.0
            } else if roll < 9_800.0 {
                64.0
            } else {
                128.0
            };
            p.size = 3.0 + unit(rng) * span;
        }
        ParticleKind::Lava => {
            // Steer away from near-vertical launches.
            let mut angle = FRAC_PI_4 + unit(rng) * FRAC_PI_2;
            if rng.gen_bool(0.75) && (FRAC_PI_2 - angle).abs() < PI / 18.0 {
                angle += if angle > FRAC_PI_2 { PI / 18.0 } else { -PI / 18.0 };
            }
            p.vx = (1.0 + unit(rng) * 3.0) * angle.cos();
            p.vy = (-4.0 * unit(rng) - 3.0) * angle.sin();
            p.size = 4.0 + unit(rng) * 3.0;
            p.y -= p.size;
            p.init_y = p.y;
            p.extra = ParticleExtra::Ballistic {
                init_vy: p.vy,
                ay: LAVA_GRAVITY,
            };
        }
        ParticleKind::Magic1 => {
            p.element = magic_color(rng);
            p.extra = ParticleExtra::Star {
                spokes: rng.gen_range(5..=18),
                speed: 7.0 + unit(rng) * 3.0,
                spoke_size: 4.0 + unit(rng) * 4.0,
            };
        }
        ParticleKind::Magic1Spoke => {
            p.element = magic_color(rng);
            let speed = 7.0 + unit(rng) * 3.0;
            p.set_velocity(speed, unit(rng) * TAU);
            p.size = 4.0 + unit(rng) * 4.0;
        }
        ParticleKind::Magic2 => {
            p.element = magic_color(rng);
            p.size = 4.0 + unit(rng) * 8.0;
            p.x = grid.width() as f32 / 2.0;
            p.y = grid.height() as f32 / 2.0;
            p.init_x = p.x;
            p.init_y = p.y;
            p.prev_x = p.x;
            p.prev_y = p.y;
            let max_dim = grid.width().max(grid.height()) as f32;
            let spacing = 25.0 + unit(rng) * 55.0;
            p.extra = ParticleExtra::Spiral {
                theta: 0.0,
                speed: SPIRAL_SPEED,
                spacing,
                radius: spacing,
                max_radius: (2.0 * max_dim * max_dim).sqrt() / 2.0 + p.size,
            };
        }
        ParticleKind::Methane => {
            p.size = 10.0 + unit(rng) * 10.0;
        }
        ParticleKind::Tree => {
            p.element = ElementType::Branch;
            p.size = if rng.gen_bool(0.5) { 3.0 } else { 4.0 };
            let speed = 1.0 + unit(rng) * 0.5;
            let angle = -FRAC_PI_2 - FRAC_PI_8 + unit(rng) * FRAC_PI_4;
            p.set_velocity(speed, angle);
            let spacing = rng.gen_range(15..=60);
            p.extra = ParticleExtra::Tree {
                generation: 1,
                spacing,
                max_branches: rng.gen_range(1..=3),
                next_branch: spacing,
                branches: 0,
                shape: if rng.gen_bool(0.62) {
                    TreeShape::Fork
                } else {
                    TreeShape::Trident
                },
            };
        }
        ParticleKind::ChargedNitro => {
            p.size = 1.5;
            p.vx = 0.0;
            p.vy = -COLUMN_SPEED;
            p.extra = ParticleExtra::Column {
                min_y: first_wall_above(grid, p.grid_index, rng.gen_range(3..=5)),
            };
        }
        ParticleKind::Nuke => {
            let max_dim = grid.width().max(grid.height()) as f32;
            p.size = max_dim / 4.0 + unit(rng) * max_dim / 8.0;
        }
    }
}

/// Row of the first Wall found walking up from `start`, sampling every `stride`
/// rows; -1 when none is found.
fn first_wall_above(grid: &Grid, start: usize, stride: u32) -> f32 {
    if start >= grid.size() {
        return -1.0;
    }
    let (x, mut y) = grid.coords(start);
    loop {
        if grid.get_type_idx(grid.index(x, y)) == ElementType::Wall {
            return y as f32;
        }
        if y < stride {
            return -1.0;
        }
        y -= stride;
    }
}

/// One iteration. Returns true when the particle should be released.
pub(super) fn act(pool: &mut ParticlePool, p: &mut Particle, grid: &Grid) -> bool {
    p.iterations += 1;
    let (w, h) = (grid.width(), grid.height());

    match p.kind {
        ParticleKind::Nitro => {
            p.x += p.vx;
            p.y += p.vy;
            if p.iterations % 5 == 0 {
                p.size /= 1.3;
            }
            if p.iterations % 15 == 0 {
                p.vy += 10.0 * (p.iterations as f32 / 5.0);
            }
            p.size < 1.75 || p.off_grid(w, h)
        }
        ParticleKind::Napalm => {
            p.x += p.vx;
            p.y += p.vy;
            p.size *= 1.0 + unit(&mut pool.rng) * 0.1;
            match p.extra {
                ParticleExtra::Lifetime { max_iterations } => p.iterations > max_iterations,
                _ => true,
            }
        }
        ParticleKind::C4 => {
            if p.iterations % 3 != 0 {
                return false;
            }
            p.size /= 3.0;
            p.size <= 1.0
        }
        ParticleKind::Lava => {
            p.x += p.vx;
            match p.extra {
                ParticleExtra::Ballistic { init_vy, ay } => {
                    let t = p.iterations as f32;
                    p.y = p.init_y + init_vy * t + ay * t * t / 2.0;
                }
                _ => p.y += p.vy,
            }
            p.off_grid(w, h)
        }
        ParticleKind::Magic1 => burst_star(pool, p, grid),
        ParticleKind::Magic1Spoke => {
            p.x += p.vx;
            p.y += p.vy;
            p.off_grid(w, h)
        }
        ParticleKind::Magic2 => {
            if let ParticleExtra::Spiral {
                theta,
                speed,
                spacing,
                radius,
                max_radius,
            } = p.extra
            {
                let theta = theta + speed / radius.max(1.0);
                let radius = theta / TAU * spacing;
                p.prev_x = p.x;
                p.prev_y = p.y;
                p.x = radius * theta.cos() + p.init_x;
                p.y = radius * theta.sin() + p.init_y;
                p.extra = ParticleExtra::Spiral {
                    theta,
                    speed,
                    spacing,
                    radius,
                    max_radius,
                };
                radius > max_radius
            } else {
                true
            }
        }
        ParticleKind::Methane => p.iterations > 2,
        ParticleKind::Tree => grow_tree(pool, p, grid),
        ParticleKind::ChargedNitro => {
            let old_y = p.y;
            let min_y = match p.extra {
                ParticleExtra::Column { min_y } => min_y,
                _ => -1.0,
            };
            p.y = (p.y + p.vy).max(min_y);
            (old_y > min_y && p.y <= min_y) || p.y < 0.0 || p.off_grid(w, h)
        }
        ParticleKind::Nuke => p.iterations > 4,
    }
}

/// Fan the star out into spokes: `spokes - 1` children plus this particle.
fn burst_star(pool: &mut ParticlePool, p: &mut Particle, grid: &Grid) -> bool {
    let ParticleExtra::Star {
        spokes,
        speed,
        spoke_size,
    } = p.extra
    else {
        return true;
    };
    let step = TAU / spokes as f32;
    for k in 1..spokes {
        let Some(r) = pool.acquire(ParticleKind::Magic1Spoke, p.x, p.y, p.grid_index, grid) else {
            break;
        };
        if let Some(child) = pool.get_mut(r) {
            child.element = p.element;
            child.set_velocity(speed, step * k as f32);
            child.size = spoke_size;
        }
    }
    pool.retype(p, ParticleKind::Magic1Spoke);
    p.extra = ParticleExtra::None;
    p.set_velocity(speed, 0.0);
    p.size = spoke_size;
    false
}

fn grow_tree(pool: &mut ParticlePool, p: &mut Particle, grid: &Grid) -> bool {
    let (w, h) = (grid.width(), grid.height());
    p.prev_x = p.x;
    p.prev_y = p.y;
    p.x += p.vx;
    p.y += p.vy;
    if p.off_grid(w, h) {
        return true;
    }

    // Stop when the leading edge is about to touch a wall.
    let radius = p.size / 2.0;
    let heading = p.vy.atan2(p.vx);
    let ahead_x = (p.x + heading.cos() * radius).round() as i32;
    let ahead_y = (p.y + heading.sin() * radius).round() as i32;
    if grid.type_at(ahead_x, ahead_y) == Some(ElementType::Wall) {
        return true;
    }

    let ParticleExtra::Tree {
        generation,
        spacing,
        max_branches,
        next_branch,
        branches,
        shape,
    } = p.extra
    else {
        return true;
    };
    if p.iterations < next_branch {
        return false;
    }

    let branches = branches + 1;
    if max_branches == 0 {
        return true;
    }
    let leafy = p.element == ElementType::Leaf || branches >= max_branches;

    let (angles, forks, factor) = match shape {
        TreeShape::Fork => {
            let spread = FRAC_PI_8 + unit(&mut pool.rng) * FRAC_PI_4;
            ([p.angle + spread, p.angle - spread, 0.0], 2, 0.9)
        }
        TreeShape::Trident => {
            let spread = FRAC_PI_8 + unit(&mut pool.rng) * PI / 16.0;
            ([p.angle, p.angle + spread, p.angle - spread], 3, 0.6)
        }
    };
    let child_spacing = (spacing as f32 * factor) as u32;

    for &angle in &angles[..forks] {
        let Some(r) = pool.acquire(ParticleKind::Tree, p.x, p.y, p.grid_index, grid) else {
            break;
        };
        if let Some(child) = pool.get_mut(r) {
            child.set_velocity(p.speed, angle);
            child.size = (p.size - 1.0).max(2.0);
            if leafy {
                child.element = ElementType::Leaf;
            }
            child.extra = ParticleExtra::Tree {
                generation: generation + 1,
                spacing: child_spacing,
                max_branches: max_branches.saturating_sub(1),
                next_branch: child_spacing,
                branches: 0,
                shape,
            };
        }
    }

    if branches >= max_branches {
        return true;
    }

    let spacing = if spacing > 45 {
        (spacing as f32 * 0.8) as u32
    } else {
        spacing
    };
    let next_branch =
        p.iterations + (spacing as f32 * (0.65 + unit(&mut pool.rng) * 0.35)) as u32;
    p.extra = ParticleExtra::Tree {
        generation,
        spacing,
        max_branches,
        next_branch,
        branches,
        shape,
    };
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::particles::ParticleRaster;

    fn run(pool: &mut ParticlePool, grid: &Grid, ticks: usize) {
        let mut raster = ParticleRaster::new(grid.width(), grid.height());
        for _ in 0..ticks {
            pool.tick(grid, &mut raster);
        }
    }

    #[test]
    fn nuke_lives_four_iterations() {
        let grid = Grid::new(64, 64);
        let mut pool = ParticlePool::new(4, 7);
        pool.acquire(ParticleKind::Nuke, 32.0, 32.0, 0, &grid);
        run(&mut pool, &grid, 4);
        assert_eq!(pool.active_count(), 1);
        run(&mut pool, &grid, 1);
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn methane_burns_out_after_two() {
        let grid = Grid::new(16, 16);
        let mut pool = ParticlePool::new(2, 7);
        pool.acquire(ParticleKind::Methane, 8.0, 8.0, 0, &grid);
        run(&mut pool, &grid, 3);
        assert_eq!(pool.count(ParticleKind::Methane), 0);
    }

    #[test]
    fn star_splits_into_spokes() {
        let grid = Grid::new(64, 64);
        let mut pool = ParticlePool::new(64, 7);
        let r = pool
            .acquire(ParticleKind::Magic1, 32.0, 32.0, grid.index(32, 32), &grid)
            .unwrap();
        let spokes = match pool.get(r).unwrap().extra {
            ParticleExtra::Star { spokes, .. } => spokes,
            other => panic!("unexpected extra {:?}", other),
        };
        run(&mut pool, &grid, 1);
        assert_eq!(pool.count(ParticleKind::Magic1), 0);
        assert_eq!(pool.count(ParticleKind::Magic1Spoke), spokes);
        let colors: Vec<_> = pool.iter_active().map(|p| p.element).collect();
        assert!(colors.iter().all(|&c| c == colors[0]));
    }

    #[test]
    fn star_respects_exhausted_pool() {
        let grid = Grid::new(64, 64);
        let mut pool = ParticlePool::new(3, 7);
        pool.acquire(ParticleKind::Magic1, 32.0, 32.0, 0, &grid);
        run(&mut pool, &grid, 1);
        assert_eq!(pool.active_count(), 3);
        assert_eq!(pool.active_count() + pool.inactive_count(), 3);
    }

    #[test]
    fn charged_nitro_stops_at_wall() {
        let mut grid = Grid::new(8, 100);
        for y in 10..16 {
            for x in 0..8 {
                grid.set_cell(x, y, ElementType::Wall, ElementType::Wall.color());
            }
        }
        let mut pool = ParticlePool::new(2, 7);
        let start = grid.index(4, 90);
        let r = pool
            .acquire(ParticleKind::ChargedNitro, 4.0, 90.0, start, &grid)
            .unwrap();
        match pool.get(r).unwrap().extra {
            ParticleExtra::Column { min_y } => assert!(min_y >= 10.0 && min_y <= 15.0),
            other => panic!("unexpected extra {:?}", other),
        }
        run(&mut pool, &grid, 5);
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn lava_follows_a_parabola() {
        let grid = Grid::new(400, 400);
        let mut pool = ParticlePool::new(1, 11);
        let r = pool
            .acquire(ParticleKind::Lava, 200.0, 300.0, 0, &grid)
            .unwrap();
        let p0 = *pool.get(r).unwrap();
        run(&mut pool, &grid, 2);
        let p = pool.get(r).unwrap();
        let (init_vy, ay) = match p0.extra {
            ParticleExtra::Ballistic { init_vy, ay } => (init_vy, ay),
            other => panic!("unexpected extra {:?}", other),
        };
        let expected = p0.init_y + init_vy * 2.0 + ay * 4.0 / 2.0;
        assert!((p.y - expected).abs() < 1e-4);
    }

    #[test]
    fn trees_branch_and_finish() {
        let grid = Grid::new(256, 256);
        let mut pool = ParticlePool::new(256, 5);
        pool.acquire(ParticleKind::Tree, 128.0, 250.0, 0, &grid);
        run(&mut pool, &grid, 400);
        assert_eq!(pool.count(ParticleKind::Tree), 0);
    }
}
