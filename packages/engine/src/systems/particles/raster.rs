//! Scratch raster particles draw onto each tick.

use super::kinds::ParticleKind;
use super::pool::Particle;
use crate::core::color::{with_alpha, TRANSPARENT};

/// Alpha of the one-pixel rim around every stroke.
const RIM_ALPHA: u8 = 128;

pub struct ParticleRaster {
    width: u32,
    height: u32,
    pub pixels: Vec<u32>,
}

impl ParticleRaster {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![TRANSPARENT; (width as usize) * (height as usize)],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self) {
        self.pixels.fill(TRANSPARENT);
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> u32 {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return TRANSPARENT;
        }
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    #[inline]
    fn put(&mut self, x: i32, y: i32, color: u32, rim: bool) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        if rim {
            // A rim never covers a solid pixel.
            if self.pixels[idx] == TRANSPARENT {
                self.pixels[idx] = with_alpha(color, RIM_ALPHA);
            }
        } else {
            self.pixels[idx] = color;
        }
    }

    /// Filled disc of `radius` with a half-alpha rim one pixel wide.
    pub fn disc(&mut self, cx: f32, cy: f32, radius: f32, color: u32) {
        let x0 = cx.round() as i32;
        let y0 = cy.round() as i32;
        let r_sq = radius * radius;
        let rim_sq = (radius + 1.0) * (radius + 1.0);
        let reach = (radius + 1.0).ceil() as i32;
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let d = (dx * dx + dy * dy) as f32;
                if d <= r_sq {
                    self.put(x0 + dx, y0 + dy, color, false);
                } else if d <= rim_sq {
                    self.put(x0 + dx, y0 + dy, color, true);
                }
            }
        }
    }

    /// Stroke of thickness `width` as a run of overlapping discs.
    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32, color: u32) {
        let (dx, dy) = (x2 - x1, y2 - y1);
        let dist = (dx * dx + dy * dy).sqrt();
        let radius = (width / 2.0).max(0.5);
        if dist < 0.1 {
            self.disc(x1, y1, radius, color);
            return;
        }
        let steps = (dist / radius).ceil().max(2.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.disc(x1 + dx * t, y1 + dy * t, radius, color);
        }
    }

    pub fn draw(&mut self, p: &Particle) {
        let color = p.element.color();
        if !p.kind.draws_line() {
            self.disc(p.x, p.y, p.size, color);
            return;
        }
        let (sx, sy) = match p.kind {
            ParticleKind::Tree => (p.prev_x, p.prev_y),
            _ => (p.init_x, p.init_y),
        };
        self.line(sx, sy, p.x, p.y, p.size, color);
    }
}
