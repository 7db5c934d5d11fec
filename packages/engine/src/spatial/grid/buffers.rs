use super::*;

/// Frozen front rasters plus the back rasters a gather pass writes into.
pub struct GatherBuffers<'a> {
    pub src_types: &'a [ElementType],
    pub src_colors: &'a [u32],
    pub dst_types: &'a mut [ElementType],
    pub dst_colors: &'a mut [u32],
}

impl Grid {
    pub fn gather_buffers(&mut self) -> GatherBuffers<'_> {
        GatherBuffers {
            src_types: &self.types,
            src_colors: &self.colors,
            dst_types: &mut self.back_types,
            dst_colors: &mut self.back_colors,
        }
    }

    /// Publish the back rasters as the new front.
    pub fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.types, &mut self.back_types);
        std::mem::swap(&mut self.colors, &mut self.back_colors);
    }
}
