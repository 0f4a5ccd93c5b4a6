/// Moteur de tramage bitmap → caractères pour cellart.
///
/// [`engine::BitmapDither`] maps a pixel rectangle onto a rectangle of
/// character cells; [`dither::Ditherer`] supplies the per-cell perturbation.

pub mod dither;
pub mod engine;

pub use dither::Ditherer;
pub use engine::BitmapDither;
