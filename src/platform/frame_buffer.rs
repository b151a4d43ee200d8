//=========================================================================
// Frame Buffer
//=========================================================================
//
// Row-major grid of styled cells backing the terminal display.
//
// Entities write into it during a scene draw; `show` walks it row by row
// and `clear` resets every cell to a blank in the scene style.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::style::Style;

//=== Cell ================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cell {
    pub glyph: char,
    pub style: Style,
}

impl Cell {
    pub(crate) fn blank(style: Style) -> Self {
        Self { glyph: ' ', style }
    }
}

//=== FrameBuffer =========================================================

#[derive(Debug, Clone)]
pub(crate) struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub(crate) fn new(width: u16, height: u16, style: Style) -> Self {
        let (width, height) = (usize::from(width), usize::from(height));
        Self {
            width,
            height,
            cells: vec![Cell::blank(style); width * height],
        }
    }

    pub(crate) fn size(&self) -> (u16, u16) {
        (self.width as u16, self.height as u16)
    }

    /// Reallocates to the new size. Contents are lost.
    pub(crate) fn resize(&mut self, width: u16, height: u16, style: Style) {
        *self = Self::new(width, height, style);
    }

    /// Writes one cell; coordinates outside the grid are ignored.
    pub(crate) fn set(&mut self, x: i32, y: i32, glyph: char, style: Style) {
        if let Some(index) = self.index(x, y) {
            self.cells[index] = Cell { glyph, style };
        }
    }

    #[cfg(test)]
    pub(crate) fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|index| self.cells[index])
    }

    /// Resets every cell to a blank in `style`.
    pub(crate) fn fill(&mut self, style: Style) {
        self.cells.fill(Cell::blank(style));
    }

    /// Rows top to bottom.
    pub(crate) fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks() rejects a zero chunk size
        self.cells.chunks(self.width.max(1))
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::style::Color;

    #[test]
    fn writes_land_in_row_major_order() {
        let mut buffer = FrameBuffer::new(3, 2, Style::DEFAULT);
        buffer.set(2, 1, 'z', Style::DEFAULT);

        let rows: Vec<String> = buffer
            .rows()
            .map(|row| row.iter().map(|cell| cell.glyph).collect())
            .collect();

        assert_eq!(rows, ["   ", "  z"]);
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut buffer = FrameBuffer::new(2, 2, Style::DEFAULT);
        buffer.set(-1, 0, 'a', Style::DEFAULT);
        buffer.set(2, 0, 'b', Style::DEFAULT);
        buffer.set(0, 2, 'c', Style::DEFAULT);

        assert!(buffer.rows().flatten().all(|cell| cell.glyph == ' '));
        assert_eq!(buffer.get(2, 0), None);
    }

    #[test]
    fn fill_resets_to_style() {
        let mut buffer = FrameBuffer::new(2, 1, Style::DEFAULT);
        buffer.set(0, 0, 'a', Style::DEFAULT);

        let blue = Style::new(Color::White, Color::Blue);
        buffer.fill(blue);

        assert_eq!(buffer.get(0, 0), Some(Cell::blank(blue)));
    }

    #[test]
    fn resize_reallocates() {
        let mut buffer = FrameBuffer::new(2, 2, Style::DEFAULT);
        buffer.resize(4, 1, Style::DEFAULT);

        assert_eq!(buffer.size(), (4, 1));
        assert_eq!(buffer.rows().count(), 1);
    }

    #[test]
    fn empty_buffer_has_no_rows() {
        let buffer = FrameBuffer::new(0, 0, Style::DEFAULT);
        assert_eq!(buffer.rows().count(), 0);
    }
}
