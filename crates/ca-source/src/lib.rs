/// Chargement des images sources pour cellart.
///
/// Decoded pictures are handed to the engine as a 32 bpp RGBA [`ca_core::Bitmap`]
/// plus the raw pixel buffer.
pub mod image;

pub use crate::image::{LoadedImage, load_image};
