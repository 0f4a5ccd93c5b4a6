use crate::color::ansi;
use crate::traits::Canvas;

/// Single cell of a [`CellGrid`].
///
/// # Example
/// ```
/// use ca_core::grid::Cell;
/// let cell = Cell::default();
/// assert_eq!(cell.ch, ' ');
/// assert_eq!((cell.fg, cell.bg), (7, 0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Caractère à afficher.
    pub ch: char,
    /// Foreground palette index (0–15 on the ANSI palette).
    pub fg: u8,
    /// Background palette index (0–15 on the ANSI palette).
    pub bg: u8,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: ansi::LIGHTGRAY,
            bg: ansi::BLACK,
        }
    }
}

/// Grille de cellules en mémoire, row-major. Implémente [`Canvas`].
///
/// # Example
/// ```
/// use ca_core::grid::CellGrid;
/// use ca_core::traits::Canvas;
/// let mut grid = CellGrid::new(80, 24);
/// grid.set_color_ansi(12, 0);
/// grid.put_char(3, 1, '@');
/// assert_eq!(grid.get(3, 1).map(|c| (c.ch, c.fg)), Some(('@', 12)));
/// ```
#[derive(Clone, Debug)]
pub struct CellGrid {
    /// Flat array of cells, row-major.
    cells: Vec<Cell>,
    /// Width in characters.
    width: u16,
    /// Height in characters.
    height: u16,
    pen_fg: u8,
    pen_bg: u8,
}

impl CellGrid {
    /// Crée une grille pré-allouée, remplie de cellules par défaut.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let pen = Cell::default();
        Self {
            cells: vec![pen; usize::from(width) * usize::from(height)],
            width,
            height,
            pen_fg: pen.fg,
            pen_bg: pen.bg,
        }
    }

    #[inline(always)]
    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        let x = u16::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = u16::try_from(y).ok().filter(|&y| y < self.height)?;
        Some(usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// Cell at (x, y), `None` outside the grid.
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.offset(x, y).map(|i| &self.cells[i])
    }

    /// All cells, row-major.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// One row of cells, `None` past the last row.
    #[must_use]
    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let w = usize::from(self.width);
        let start = usize::from(y) * w;
        Some(&self.cells[start..start + w])
    }

    /// Overwrite every cell with `cell`.
    ///
    /// # Example
    /// ```
    /// use ca_core::grid::{Cell, CellGrid};
    /// let mut grid = CellGrid::new(4, 4);
    /// grid.fill(Cell { ch: '#', fg: 1, bg: 2 });
    /// assert!(grid.cells().iter().all(|c| c.ch == '#'));
    /// ```
    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Reset every cell to the default (space, light grey on black).
    pub fn clear(&mut self) {
        self.fill(Cell::default());
    }

    /// Current pen colours `(fg, bg)`.
    #[must_use]
    pub fn pen(&self) -> (u8, u8) {
        (self.pen_fg, self.pen_bg)
    }
}

impl Canvas for CellGrid {
    fn width(&self) -> u32 {
        u32::from(self.width)
    }

    fn height(&self) -> u32 {
        u32::from(self.height)
    }

    fn set_color_ansi(&mut self, fg: u8, bg: u8) {
        self.pen_fg = fg;
        self.pen_bg = bg;
    }

    #[inline]
    fn put_char(&mut self, x: i32, y: i32, ch: char) {
        if let Some(i) = self.offset(x, y) {
            self.cells[i] = Cell {
                ch,
                fg: self.pen_fg,
                bg: self.pen_bg,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut grid = CellGrid::new(3, 2);
        grid.put_char(-1, 0, 'x');
        grid.put_char(3, 0, 'x');
        grid.put_char(0, 2, 'x');
        assert!(grid.cells().iter().all(|c| c.ch == ' '));
        assert!(grid.get(-1, 0).is_none());
    }

    #[test]
    fn pen_keeps_indices_past_sixteen() {
        let mut grid = CellGrid::new(1, 1);
        grid.set_color_ansi(0x1f, 0x23);
        assert_eq!(grid.pen(), (0x1f, 0x23));
        grid.put_char(0, 0, 'o');
        assert_eq!(grid.get(0, 0).map(|c| (c.fg, c.bg)), Some((0x1f, 0x23)));
    }

    #[test]
    fn rows_slice_the_grid() {
        let mut grid = CellGrid::new(2, 2);
        grid.put_char(1, 1, 'z');
        assert_eq!(grid.row(1).map(|r| r[1].ch), Some('z'));
        assert!(grid.row(2).is_none());
    }
}
