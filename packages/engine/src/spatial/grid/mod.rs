//! Grid - Structure of Arrays cell storage
//!
//! types[] and colors[] are the authoritative front rasters the renderer reads.
//! The gather kernel writes a full tick into the back rasters and swaps; the
//! scanline model never touches them.

use crate::elements::ElementType;

/// Background color, ABGR: opaque black.
pub const BG_COLOR: u32 = 0xFF00_0000;

mod indexing;
mod accessors;
mod buffers;
mod snapshot;

pub use buffers::GatherBuffers;

pub use snapshot::GridSnapshot;

pub struct Grid {
    width: u32,
    height: u32,
    size: usize,

    pub types: Vec<ElementType>,
    pub colors: Vec<u32>,
    /// 1 once a cell has been settled in the current scanline tick.
    pub updated: Vec<u8>,

    back_types: Vec<ElementType>,
    back_colors: Vec<u32>,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            width,
            height,
            size,
            types: vec![ElementType::Background; size],
            colors: vec![BG_COLOR; size],
            updated: vec![0; size],
            back_types: vec![ElementType::Background; size],
            back_colors: vec![BG_COLOR; size],
        }
    }
}
