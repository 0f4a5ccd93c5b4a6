pub mod canvas;
/// Sortie des grilles de cellules pour cellart.
///
/// ANSI and plain-text export to any `io::Write`, and direct rendering into a
/// ratatui buffer.
pub mod export;
pub mod palette;

pub use canvas::{GridView, render_grid};
pub use export::{LineEnding, to_ansi, to_text, write_ansi, write_text};
