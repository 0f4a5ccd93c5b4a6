/// Types partagés du moteur de tramage cellart.
///
/// This crate contains the bitmap description, colour palettes and
/// matching, glyph ramps, the canvas abstraction and configuration logic
/// used across the cellart workspace.

pub mod bitmap;
pub mod charset;
pub mod color;
pub mod config;
pub mod error;
pub mod grid;
pub mod palette;
pub mod traits;

pub use bitmap::Bitmap;
pub use charset::{Charset, GlyphRamp};
pub use config::{ColorMode, DitherAlgorithm, DitherConfig, MatchMode};
pub use error::CoreError;
pub use grid::{Cell, CellGrid};
pub use palette::ColorPalette;
pub use traits::Canvas;
