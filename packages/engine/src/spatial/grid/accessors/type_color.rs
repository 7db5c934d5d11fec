use super::super::*;

impl Grid {
    /// Background test; off-grid cells are not empty.
    #[inline]
    pub fn is_empty(&self, x: i32, y: i32) -> bool {
        match self.checked_index(x, y) {
            Some(idx) => self.types[idx].is_empty(),
            None => false,
        }
    }

    #[inline]
    pub fn is_empty_idx(&self, idx: usize) -> bool {
        self.types[idx].is_empty()
    }

    /// Element at `(x, y)`, `None` off-grid.
    #[inline]
    pub fn type_at(&self, x: i32, y: i32) -> Option<ElementType> {
        self.checked_index(x, y).map(|idx| self.types[idx])
    }

    /// Element at `(x, y)`, Background off-grid.
    #[inline]
    pub fn get_type(&self, x: i32, y: i32) -> ElementType {
        self.type_at(x, y).unwrap_or(ElementType::Background)
    }

    #[inline]
    pub fn get_type_idx(&self, idx: usize) -> ElementType {
        self.types[idx]
    }

    #[inline]
    pub fn set_type(&mut self, x: u32, y: u32, t: ElementType) {
        let idx = self.index(x, y);
        self.types[idx] = t;
    }

    #[inline]
    pub fn get_color(&self, x: u32, y: u32) -> u32 {
        self.colors[self.index(x, y)]
    }

    #[inline]
    pub fn set_color(&mut self, x: u32, y: u32, c: u32) {
        let idx = self.index(x, y);
        self.colors[idx] = c;
    }

    /// Number of cells holding `element`.
    pub fn count(&self, element: ElementType) -> usize {
        self.types.iter().filter(|&&t| t == element).count()
    }

    /// Number of cells that are not background.
    pub fn non_empty_count(&self) -> usize {
        self.types.iter().filter(|t| !t.is_empty()).count()
    }
}
