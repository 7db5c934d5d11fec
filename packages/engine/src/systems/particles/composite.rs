//! Particle raster -> grid merge.
//!
//! Only pixels whose color is a paintable element's canonical color become
//! material. Anything else that was drawn (soft rims) looks `RIM_REACH` pixels
//! left, right, up and down, in that order, for a paintable color to adopt.
//! Walls are never overwritten.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::raster::ParticleRaster;
use crate::core::color::TRANSPARENT;
use crate::elements::ElementType;
use crate::grid::Grid;

pub const RIM_REACH: i32 = 3;

#[inline]
fn resolve(raster: &ParticleRaster, x: i32, y: i32) -> Option<ElementType> {
    let px = raster.get(x, y);
    if px == TRANSPARENT {
        return None;
    }
    if let Some(e) = ElementType::paintable_for_color(px) {
        return Some(e);
    }
    [
        (-RIM_REACH, 0),
        (RIM_REACH, 0),
        (0, -RIM_REACH),
        (0, RIM_REACH),
    ]
    .iter()
    .find_map(|&(dx, dy)| ElementType::paintable_for_color(raster.get(x + dx, y + dy)))
}

fn composite_row(raster: &ParticleRaster, y: usize, types: &mut [ElementType], colors: &mut [u32]) {
    for x in 0..types.len() {
        if *fast!(types, [x]) == ElementType::Wall {
            continue;
        }
        if let Some(e) = resolve(raster, x as i32, y as i32) {
            fast!(types, [x] = e);
            fast!(colors, [x] = e.color());
        }
    }
}

/// Merge `raster` into the grid's front rasters.
pub fn composite(raster: &ParticleRaster, grid: &mut Grid) {
    let w = grid.width() as usize;
    if w == 0 {
        return;
    }

    #[cfg(feature = "parallel")]
    {
        grid.types
            .par_chunks_mut(w)
            .zip(grid.colors.par_chunks_mut(w))
            .enumerate()
            .for_each(|(y, (types, colors))| composite_row(raster, y, types, colors));
    }

    #[cfg(not(feature = "parallel"))]
    {
        grid.types
            .chunks_mut(w)
            .zip(grid.colors.chunks_mut(w))
            .enumerate()
            .for_each(|(y, (types, colors))| composite_row(raster, y, types, colors));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::with_alpha;
    use crate::grid::BG_COLOR;

    #[test]
    fn whitelisted_pixels_become_material() {
        let mut grid = Grid::new(10, 10);
        let mut raster = ParticleRaster::new(10, 10);
        raster.pixels[grid.index(4, 4)] = ElementType::Fire.color();
        composite(&raster, &mut grid);
        assert_eq!(grid.get_type(4, 4), ElementType::Fire);
        assert_eq!(grid.get_color(4, 4), ElementType::Fire.color());
        assert_eq!(grid.non_empty_count(), 1);
    }

    #[test]
    fn unlisted_colors_are_ignored() {
        let mut grid = Grid::new(10, 10);
        let mut raster = ParticleRaster::new(10, 10);
        raster.pixels[grid.index(4, 4)] = ElementType::Sand.color();
        composite(&raster, &mut grid);
        assert_eq!(grid.get_type(4, 4), ElementType::Background);
        assert_eq!(grid.get_color(4, 4), BG_COLOR);
    }

    #[test]
    fn rim_pixel_adopts_nearby_material() {
        let mut grid = Grid::new(10, 10);
        let mut raster = ParticleRaster::new(10, 10);
        let leaf = ElementType::Leaf.color();
        raster.pixels[grid.index(5, 5)] = with_alpha(leaf, 128);
        raster.pixels[grid.index(8, 5)] = leaf;
        composite(&raster, &mut grid);
        assert_eq!(grid.get_type(5, 5), ElementType::Leaf);
    }

    #[test]
    fn walls_are_never_overwritten() {
        let mut grid = Grid::new(10, 10);
        grid.set_cell(2, 2, ElementType::Wall, ElementType::Wall.color());
        grid.set_cell(3, 2, ElementType::Sand, ElementType::Sand.color());
        let mut raster = ParticleRaster::new(10, 10);
        raster.disc(2.0, 2.0, 2.0, ElementType::Fire.color());
        composite(&raster, &mut grid);
        assert_eq!(grid.get_type(2, 2), ElementType::Wall);
        assert_eq!(grid.get_type(3, 2), ElementType::Fire);
    }
}
