use ca_core::grid::CellGrid;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

use crate::palette::tui_color;

/// Écrit directement une `CellGrid` dans un `ratatui::Buffer`.
///
/// Pas de widget Canvas ratatui, écriture directe. The grid is clipped to
/// `area`; cells of `area` beyond the grid are left as they are.
///
/// # Example
/// ```
/// use ca_core::grid::CellGrid;
/// use ca_core::traits::Canvas;
/// use ca_render::canvas::render_grid;
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
///
/// let mut grid = CellGrid::new(2, 1);
/// grid.put_char(1, 0, '@');
/// let area = Rect::new(0, 0, 2, 1);
/// let mut buf = Buffer::empty(area);
/// render_grid(&mut buf, area, &grid);
/// assert_eq!(buf[(1, 0)].symbol(), "@");
/// ```
pub fn render_grid(buf: &mut Buffer, area: Rect, grid: &CellGrid) {
    let mut cy = 0;
    while cy < area.height {
        let Some(row) = grid.row(cy) else {
            break;
        };
        for (cx, cell) in row.iter().enumerate().take(usize::from(area.width)) {
            let pos = (area.x + cx as u16, area.y + cy);
            if let Some(buf_cell) = buf.cell_mut(pos) {
                buf_cell
                    .set_char(cell.ch)
                    .set_fg(tui_color(cell.fg))
                    .set_bg(tui_color(cell.bg));
            }
        }
        cy += 1;
    }
}

/// Widget ratatui affichant une grille.
pub struct GridView<'a> {
    grid: &'a CellGrid,
}

impl<'a> GridView<'a> {
    #[must_use]
    pub fn new(grid: &'a CellGrid) -> Self {
        Self { grid }
    }
}

impl Widget for GridView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        render_grid(buf, area, self.grid);
    }
}

#[cfg(test)]
mod tests {
    use ca_core::traits::Canvas;
    use ratatui::style::Color;

    use super::*;

    #[test]
    fn colours_are_mapped() {
        let mut grid = CellGrid::new(1, 1);
        grid.set_color_ansi(12, 1);
        grid.put_char(0, 0, '#');
        let area = Rect::new(0, 0, 1, 1);
        let mut buf = Buffer::empty(area);
        GridView::new(&grid).render(area, &mut buf);
        let cell = &buf[(0, 0)];
        assert_eq!(cell.symbol(), "#");
        assert_eq!(cell.fg, Color::LightRed);
        assert_eq!(cell.bg, Color::Blue);
    }

    #[test]
    fn grid_is_clipped_to_area() {
        let mut grid = CellGrid::new(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                grid.put_char(x, y, 'x');
            }
        }
        let mut buf = Buffer::empty(Rect::new(0, 0, 5, 5));
        render_grid(&mut buf, Rect::new(1, 1, 2, 2), &grid);
        assert_eq!(buf[(1, 1)].symbol(), "x");
        assert_eq!(buf[(2, 2)].symbol(), "x");
        assert_eq!(buf[(3, 3)].symbol(), " ");
        assert_eq!(buf[(0, 0)].symbol(), " ");
    }

    #[test]
    fn small_grid_leaves_rest_of_area() {
        let grid = CellGrid::new(1, 1);
        let area = Rect::new(0, 0, 3, 2);
        let mut buf = Buffer::empty(area);
        buf[(2, 1)].set_char('k');
        render_grid(&mut buf, area, &grid);
        assert_eq!(buf[(2, 1)].symbol(), "k");
    }
}
