use std::io::{self, Write};

use ca_core::grid::CellGrid;
use ca_core::traits::Canvas;
use crossterm::queue;
use crossterm::style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor};

use crate::palette::term_color;

/// Fin de ligne des exports texte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`, for raw-mode terminals and DOS viewers.
    CrLf,
}

impl LineEnding {
    fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// Write the grid with ANSI colour escapes.
///
/// Colours are emitted only when the (fg, bg) pair changes along a row and
/// attributes are reset at the end of every row.
///
/// # Errors
/// Propagates write errors from `out`.
pub fn write_ansi<W: Write>(out: &mut W, grid: &CellGrid, eol: LineEnding) -> io::Result<()> {
    let mut y = 0;
    while let Some(row) = grid.row(y) {
        let mut prev = None;
        for cell in row {
            if prev != Some((cell.fg, cell.bg)) {
                queue!(
                    out,
                    SetForegroundColor(term_color(cell.fg)),
                    SetBackgroundColor(term_color(cell.bg))
                )?;
                prev = Some((cell.fg, cell.bg));
            }
            queue!(out, Print(cell.ch))?;
        }
        queue!(out, ResetColor, Print(eol.as_str()))?;
        y += 1;
    }
    out.flush()
}

/// Write the glyphs only, one line per row.
///
/// # Errors
/// Propagates write errors from `out`.
pub fn write_text<W: Write>(out: &mut W, grid: &CellGrid, eol: LineEnding) -> io::Result<()> {
    let mut y = 0;
    let mut line = String::new();
    while let Some(row) = grid.row(y) {
        line.clear();
        line.extend(row.iter().map(|c| c.ch));
        line.push_str(eol.as_str());
        out.write_all(line.as_bytes())?;
        y += 1;
    }
    out.flush()
}

/// ANSI export into a `String`.
///
/// # Example
/// ```
/// use ca_core::grid::CellGrid;
/// use ca_render::export::{to_ansi, LineEnding};
/// let grid = CellGrid::new(2, 1);
/// let ansi = to_ansi(&grid, LineEnding::Lf);
/// assert!(ansi.ends_with("\x1b[0m\n"));
/// ```
#[must_use]
pub fn to_ansi(grid: &CellGrid, eol: LineEnding) -> String {
    let mut buf = Vec::new();
    if let Err(e) = write_ansi(&mut buf, grid, eol) {
        log::warn!("export ANSI incomplet : {e}");
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Plain-text export into a `String`.
///
/// # Example
/// ```
/// use ca_core::grid::CellGrid;
/// use ca_core::traits::Canvas;
/// use ca_render::export::{to_text, LineEnding};
/// let mut grid = CellGrid::new(3, 2);
/// grid.put_char(1, 1, '#');
/// assert_eq!(to_text(&grid, LineEnding::Lf), "   \n # \n");
/// ```
#[must_use]
pub fn to_text(grid: &CellGrid, eol: LineEnding) -> String {
    let mut out = String::with_capacity(grid.cells().len() + 2 * grid.height() as usize);
    let mut y = 0;
    while let Some(row) = grid.row(y) {
        out.extend(row.iter().map(|c| c.ch));
        out.push_str(eol.as_str());
        y += 1;
    }
    out
}
