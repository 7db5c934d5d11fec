//! ParticlePool - preallocated slots on two intrusive index lists
//!
//! Every slot is on exactly one of the active/inactive lists at all times.
//! Acquire and release are O(1) list splices; nothing allocates after `new`.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::actions;
use super::kinds::{ParticleKind, PARTICLE_KIND_COUNT};
use super::raster::ParticleRaster;
use crate::elements::ElementType;
use crate::grid::Grid;

const NIL: usize = usize::MAX;

/// Handle to a pool slot. Stale once the particle is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticleRef(usize);

impl ParticleRef {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeShape {
    /// Splits into two branches at every fork.
    Fork,
    /// Splits into three, one continuing straight.
    Trident,
}

/// Per-kind state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleExtra {
    None,
    Lifetime {
        max_iterations: u32,
    },
    Ballistic {
        init_vy: f32,
        ay: f32,
    },
    Star {
        spokes: u32,
        speed: f32,
        spoke_size: f32,
    },
    Spiral {
        theta: f32,
        speed: f32,
        spacing: f32,
        radius: f32,
        max_radius: f32,
    },
    Tree {
        generation: u32,
        spacing: u32,
        max_branches: u32,
        next_branch: u32,
        branches: u32,
        shape: TreeShape,
    },
    Column {
        min_y: f32,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub kind: ParticleKind,
    pub init_x: f32,
    pub init_y: f32,
    pub x: f32,
    pub y: f32,
    pub prev_x: f32,
    pub prev_y: f32,
    pub grid_index: usize,
    /// Element whose canonical color the particle draws with.
    pub element: ElementType,
    pub speed: f32,
    pub angle: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: f32,
    pub iterations: u32,
    pub extra: ParticleExtra,
}

impl Particle {
    fn blank() -> Self {
        Self {
            kind: ParticleKind::Nitro,
            init_x: -1.0,
            init_y: -1.0,
            x: -1.0,
            y: -1.0,
            prev_x: -1.0,
            prev_y: -1.0,
            grid_index: 0,
            element: ElementType::Fire,
            speed: 0.0,
            angle: 0.0,
            vx: 0.0,
            vy: 0.0,
            size: 0.0,
            iterations: 0,
            extra: ParticleExtra::None,
        }
    }

    /// Set the polar velocity and derive the cartesian one.
    pub fn set_velocity(&mut self, speed: f32, angle: f32) {
        self.speed = speed;
        self.angle = angle;
        self.vx = speed * angle.cos();
        self.vy = speed * angle.sin();
    }

    /// Outside [0, width] x [0, height]. A NaN coordinate counts as outside.
    pub fn off_grid(&self, width: u32, height: u32) -> bool {
        let inside = (0.0..=width as f32).contains(&self.x) && (0.0..=height as f32).contains(&self.y);
        !inside
    }
}

#[derive(Debug, Clone, Copy)]
struct Link {
    prev: usize,
    next: usize,
    active: bool,
}

pub struct ParticlePool {
    slots: Vec<Particle>,
    links: Vec<Link>,
    active_head: usize,
    inactive_head: usize,
    active_count: usize,
    counts: [u32; PARTICLE_KIND_COUNT],
    pub(super) rng: SmallRng,
}

impl ParticlePool {
    pub fn new(capacity: usize, seed: u32) -> Self {
        let mut pool = Self {
            slots: vec![Particle::blank(); capacity],
            links: vec![
                Link {
                    prev: NIL,
                    next: NIL,
                    active: false,
                };
                capacity
            ],
            active_head: NIL,
            inactive_head: NIL,
            active_count: 0,
            counts: [0; PARTICLE_KIND_COUNT],
            rng: SmallRng::seed_from_u64(seed as u64),
        };
        pool.thread_inactive();
        pool
    }

    fn thread_inactive(&mut self) {
        let n = self.slots.len();
        for i in 0..n {
            self.links[i] = Link {
                prev: if i == 0 { NIL } else { i - 1 },
                next: if i + 1 == n { NIL } else { i + 1 },
                active: false,
            };
        }
        self.inactive_head = if n == 0 { NIL } else { 0 };
        self.active_head = NIL;
        self.active_count = 0;
        self.counts = [0; PARTICLE_KIND_COUNT];
    }

    /// Deactivate everything and reseed the random stream.
    pub fn reset(&mut self, seed: u32) {
        self.thread_inactive();
        self.rng = SmallRng::seed_from_u64(seed as u64);
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn active_count(&self) -> usize {
        self.active_count
    }

    #[inline]
    pub fn inactive_count(&self) -> usize {
        self.slots.len() - self.active_count
    }

    #[inline]
    pub fn count(&self, kind: ParticleKind) -> u32 {
        self.counts[kind as usize]
    }

    #[inline]
    pub fn any_active(&self, kind: ParticleKind) -> bool {
        self.counts[kind as usize] > 0
    }

    pub fn get(&self, r: ParticleRef) -> Option<&Particle> {
        let link = self.links.get(r.0)?;
        link.active.then(|| &self.slots[r.0])
    }

    pub fn get_mut(&mut self, r: ParticleRef) -> Option<&mut Particle> {
        let link = self.links.get(r.0)?;
        if link.active {
            Some(&mut self.slots[r.0])
        } else {
            None
        }
    }

    /// Active particles, most recently acquired first.
    pub fn iter_active(&self) -> impl Iterator<Item = &Particle> + '_ {
        let mut cur = self.active_head;
        std::iter::from_fn(move || {
            if cur == NIL {
                return None;
            }
            let p = &self.slots[cur];
            cur = self.links[cur].next;
            Some(p)
        })
    }

    fn unlink(&mut self, head: &mut usize, idx: usize) {
        let Link { prev, next, .. } = self.links[idx];
        if prev == NIL {
            *head = next;
        } else {
            self.links[prev].next = next;
        }
        if next != NIL {
            self.links[next].prev = prev;
        }
        self.links[idx].prev = NIL;
        self.links[idx].next = NIL;
    }

    fn push_front(&mut self, head: &mut usize, idx: usize) {
        self.links[idx].prev = NIL;
        self.links[idx].next = *head;
        if *head != NIL {
            self.links[*head].prev = idx;
        }
        *head = idx;
    }

    /// Take an inactive slot, link it as active and run `kind`'s init.
    /// Returns `None` when the pool is exhausted.
    pub fn acquire(
        &mut self,
        kind: ParticleKind,
        x: f32,
        y: f32,
        grid_index: usize,
        grid: &Grid,
    ) -> Option<ParticleRef> {
        let idx = self.inactive_head;
        if idx == NIL {
            return None;
        }

        let mut head = self.inactive_head;
        self.unlink(&mut head, idx);
        self.inactive_head = head;

        let mut head = self.active_head;
        self.push_front(&mut head, idx);
        self.active_head = head;
        self.links[idx].active = true;
        self.active_count += 1;
        self.counts[kind as usize] += 1;

        let mut p = Particle::blank();
        p.kind = kind;
        p.init_x = x;
        p.init_y = y;
        p.x = x;
        p.y = y;
        p.prev_x = x;
        p.prev_y = y;
        p.grid_index = grid_index;
        actions::init(&mut p, &mut self.rng, grid);
        self.slots[idx] = p;

        Some(ParticleRef(idx))
    }

    /// Return an active particle to the inactive list. Releasing twice is a no-op.
    pub fn release(&mut self, r: ParticleRef) {
        let idx = r.0;
        if !self.links.get(idx).is_some_and(|l| l.active) {
            return;
        }
        let mut head = self.active_head;
        self.unlink(&mut head, idx);
        self.active_head = head;

        let mut head = self.inactive_head;
        self.push_front(&mut head, idx);
        self.inactive_head = head;
        self.links[idx].active = false;
        self.active_count -= 1;
        self.counts[self.slots[idx].kind as usize] -= 1;
    }

    /// Re-type an active particle in place and rerun init at its current position.
    pub fn reinitialize(&mut self, r: ParticleRef, kind: ParticleKind, grid: &Grid) {
        if self.get(r).is_none() {
            return;
        }
        let mut p = self.slots[r.0];
        self.retype(&mut p, kind);
        actions::init(&mut p, &mut self.rng, grid);
        self.slots[r.0] = p;
    }

    pub(super) fn retype(&mut self, p: &mut Particle, kind: ParticleKind) {
        self.counts[p.kind as usize] -= 1;
        self.counts[kind as usize] += 1;
        p.kind = kind;
        p.iterations = 0;
    }

    /// Run one action for every particle that was active when the tick began and
    /// draw the survivors onto `raster`.
    pub fn tick(&mut self, grid: &Grid, raster: &mut ParticleRaster) {
        raster.clear();
        let mut cur = self.active_head;
        while cur != NIL {
            let next = self.links[cur].next;
            // Work on a copy: the action may acquire children, which splices links
            // but never touches particle data of an active slot.
            let mut p = self.slots[cur];
            let done = actions::act(self, &mut p, grid);
            self.slots[cur] = p;
            if done {
                self.release(ParticleRef(cur));
            } else {
                raster.draw(&p);
            }
            cur = next;
        }
    }
}
