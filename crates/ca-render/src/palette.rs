//! Correspondance des indices de couleur de la grille vers les couleurs
//! terminal (crossterm et ratatui).

use crossterm::style::Color as TermColor;
use ratatui::style::Color as TuiColor;

/// Grid index → crossterm colour. Index 1 is dark blue, 4 dark red.
const TERM_COLORS: [TermColor; 16] = [
    TermColor::Black,
    TermColor::DarkBlue,
    TermColor::DarkGreen,
    TermColor::DarkCyan,
    TermColor::DarkRed,
    TermColor::DarkMagenta,
    TermColor::DarkYellow,
    TermColor::Grey,
    TermColor::DarkGrey,
    TermColor::Blue,
    TermColor::Green,
    TermColor::Cyan,
    TermColor::Red,
    TermColor::Magenta,
    TermColor::Yellow,
    TermColor::White,
];

/// Grid index → ratatui colour.
const TUI_COLORS: [TuiColor; 16] = [
    TuiColor::Black,
    TuiColor::Blue,
    TuiColor::Green,
    TuiColor::Cyan,
    TuiColor::Red,
    TuiColor::Magenta,
    TuiColor::Yellow,
    TuiColor::Gray,
    TuiColor::DarkGray,
    TuiColor::LightBlue,
    TuiColor::LightGreen,
    TuiColor::LightCyan,
    TuiColor::LightRed,
    TuiColor::LightMagenta,
    TuiColor::LightYellow,
    TuiColor::White,
];

/// Crossterm colour for a grid colour index.
///
/// Indices 0–15 are the named ANSI colours; higher indices go out as
/// 256-colour palette values.
///
/// # Example
/// ```
/// use ca_render::palette::term_color;
/// use crossterm::style::Color;
/// assert_eq!(term_color(1), Color::DarkBlue);
/// assert_eq!(term_color(0x1c), Color::AnsiValue(0x1c));
/// ```
#[inline]
#[must_use]
pub fn term_color(index: u8) -> TermColor {
    TERM_COLORS
        .get(usize::from(index))
        .copied()
        .unwrap_or(TermColor::AnsiValue(index))
}

/// Ratatui colour for a grid colour index; see [`term_color`].
#[inline]
#[must_use]
pub fn tui_color(index: u8) -> TuiColor {
    TUI_COLORS
        .get(usize::from(index))
        .copied()
        .unwrap_or(TuiColor::Indexed(index))
}
