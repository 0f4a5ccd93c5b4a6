use std::path::Path;

use anyhow::{Context, Result};
use ca_core::bitmap::Bitmap;
use ca_core::error::CoreError;
use image::RgbaImage;

/// Image décodée, prête pour `draw_bitmap`.
///
/// `pixels` is tightly packed RGBA8, row-major, described by `bitmap`.
#[derive(Clone, Debug)]
pub struct LoadedImage {
    /// Pixel layout (32 bpp, RGBA masks, alpha honoured).
    pub bitmap: Bitmap,
    /// Raw RGBA bytes.
    pub pixels: Vec<u8>,
}

impl LoadedImage {
    /// Wrap an already decoded RGBA image.
    ///
    /// # Errors
    /// Returns an error for a zero-sized image.
    ///
    /// # Example
    /// ```
    /// use ca_source::image::LoadedImage;
    /// let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([9, 8, 7, 255]));
    /// let loaded = LoadedImage::from_rgba(img).unwrap();
    /// assert_eq!((loaded.width(), loaded.height()), (3, 2));
    /// assert_eq!(loaded.pixels.len(), 3 * 2 * 4);
    /// ```
    pub fn from_rgba(rgba: RgbaImage) -> Result<Self> {
        let (width, height) = rgba.dimensions();
        let bitmap = Bitmap::rgba32(width, height)
            .with_context(|| format!("Image {width}×{height} inutilisable"))?;
        Ok(Self {
            bitmap,
            pixels: rgba.into_raw(),
        })
    }

    /// Decode an encoded image held in memory (PNG, JPEG, BMP, GIF).
    ///
    /// # Errors
    /// Returns an error if the format is unknown or the data is corrupt.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes).context("Impossible de décoder l'image")?;
        Self::from_rgba(img.to_rgba8())
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.bitmap.width()
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.bitmap.height()
    }

    /// Width/height ratio.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width() as f32 / self.height() as f32
    }
}

/// Charge une image depuis le disque.
///
/// # Errors
/// Returns an error if the file is missing, unreadable or not a supported
/// image.
///
/// # Example
/// ```no_run
/// use ca_source::image::load_image;
/// use std::path::Path;
/// let img = load_image(Path::new("photo.png")).unwrap();
/// println!("{}x{}", img.width(), img.height());
/// ```
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    if !path.exists() {
        return Err(CoreError::FileNotFound {
            path: path.display().to_string(),
        }
        .into());
    }
    let img = image::open(path)
        .with_context(|| format!("Impossible de charger {}", path.display()))?;
    let color = img.color();
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::debug!("{} : {width}x{height} ({color:?})", path.display());
    LoadedImage::from_rgba(rgba)
}
