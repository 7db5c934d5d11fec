use super::super::*;

impl Grid {
    /// Write type and color together. The cell is left un-settled.
    #[inline]
    pub fn set_cell(&mut self, x: u32, y: u32, element: ElementType, color: u32) {
        let idx = self.index(x, y);
        self.set_cell_idx(idx, element, color);
    }

    #[inline]
    pub fn set_cell_idx(&mut self, idx: usize, element: ElementType, color: u32) {
        self.types[idx] = element;
        self.colors[idx] = color;
    }

    #[inline]
    pub fn clear_cell(&mut self, x: u32, y: u32) {
        self.set_cell(x, y, ElementType::Background, BG_COLOR);
    }

    #[inline]
    pub fn clear_cell_idx(&mut self, idx: usize) {
        self.set_cell_idx(idx, ElementType::Background, BG_COLOR);
    }

    /// Exchange two cells, type and color.
    #[inline]
    pub fn swap_cells(&mut self, a: usize, b: usize) {
        self.types.swap(a, b);
        self.colors.swap(a, b);
    }

    /// Move the cell at `from` into `to` and leave background behind.
    #[inline]
    pub fn move_cell(&mut self, from: usize, to: usize) {
        self.types[to] = self.types[from];
        self.colors[to] = self.colors[from];
        self.types[from] = ElementType::Background;
        self.colors[from] = BG_COLOR;
    }

    pub fn clear(&mut self) {
        self.types.fill(ElementType::Background);
        self.colors.fill(BG_COLOR);
        self.updated.fill(0);
        self.back_types.fill(ElementType::Background);
        self.back_colors.fill(BG_COLOR);
    }
}
