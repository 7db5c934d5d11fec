use super::super::*;

impl Grid {
    /// `ElementType` is `repr(u8)`, so the type raster is readable as bytes.
    pub fn types_ptr(&self) -> *const u8 {
        self.types.as_ptr() as *const u8
    }

    pub fn colors_ptr(&self) -> *const u32 {
        self.colors.as_ptr()
    }
}
