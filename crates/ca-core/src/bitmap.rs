use crate::error::CoreError;

/// Size of the gamma lookup table (12-bit domain, both ends inclusive).
pub const GAMMA_TABLE_LEN: usize = 4097;

/// Number of entries in the palette of an 8 bpp bitmap.
pub const BITMAP_PALETTE_LEN: usize = 256;

/// One channel bitmask turned into a pair of shifts that scale the channel
/// into the 12-bit domain.
///
/// # Example
/// ```
/// use ca_core::bitmap::ChannelMask;
/// let green = ChannelMask::new(0x0000_ff00);
/// assert_eq!(green.extract(0x0012_3400), 0x340);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChannelMask {
    mask: u32,
    right: u32,
    /// Positive: shift left after masking. Negative: the mask is wider than
    /// 12 bits and the extra low bits are dropped instead.
    left: i32,
}

impl ChannelMask {
    /// Derive the shifts from a contiguous bitmask, eg. `0x0000ff00` gives
    /// a right shift of 8 and a left shift of 4.
    #[must_use]
    pub fn new(mask: u32) -> Self {
        if mask == 0 {
            return Self::default();
        }
        let right = mask.trailing_zeros();
        let width = (mask >> right).trailing_ones() as i32;
        Self {
            mask,
            right,
            left: 12 - width,
        }
    }

    /// True when the mask selects no bit.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Extract the channel from a packed pixel, scaled to 12 bits.
    #[inline(always)]
    #[must_use]
    pub fn extract(&self, bits: u32) -> u32 {
        let v = (bits & self.mask) >> self.right;
        if self.left >= 0 {
            v << self.left
        } else {
            v >> -self.left
        }
    }
}

/// How pixel values turn into colours.
#[derive(Clone, Debug)]
enum PixelFormat {
    /// 8 bpp: each byte indexes a 256-entry 12-bit palette.
    Paletted {
        red: Vec<u32>,
        green: Vec<u32>,
        blue: Vec<u32>,
        alpha: Vec<u32>,
    },
    /// 16/24/32 bpp: channels are packed under bitmasks.
    Masked {
        red: ChannelMask,
        green: ChannelMask,
        blue: ChannelMask,
        alpha: ChannelMask,
    },
}

/// Description d'un bitmap source : géométrie, format de pixel, palette et
/// table gamma. Ne possède pas les pixels eux-mêmes.
///
/// # Example
/// ```
/// use ca_core::bitmap::Bitmap;
/// let bitmap = Bitmap::rgba32(4, 2).unwrap();
/// assert_eq!(bitmap.pitch(), 16);
/// assert!(bitmap.has_alpha());
/// assert_eq!(bitmap.gamma_table()[1234], 1234);
/// ```
#[derive(Clone, Debug)]
pub struct Bitmap {
    bpp: u32,
    width: u32,
    height: u32,
    pitch: usize,
    format: PixelFormat,
    has_alpha: bool,
    gamma: f32,
    gamma_table: Vec<u32>,
}

impl Bitmap {
    /// Create a bitmap description.
    ///
    /// For 8 bpp the masks are ignored and a grey ramp palette is installed;
    /// for deeper formats a zero alpha mask means the bitmap has no alpha.
    ///
    /// # Errors
    /// [`CoreError::UnsupportedDepth`] unless `bpp` is 8, 16, 24 or 32;
    /// [`CoreError::InvalidDimensions`] for a zero width/height or a pitch
    /// too small to hold one row.
    pub fn new(
        bpp: u32,
        width: u32,
        height: u32,
        pitch: usize,
        masks: [u32; 4],
    ) -> Result<Self, CoreError> {
        if !matches!(bpp, 8 | 16 | 24 | 32) {
            return Err(CoreError::UnsupportedDepth { bpp });
        }
        let row_bytes = width as usize * (bpp as usize / 8);
        if width == 0 || height == 0 || pitch < row_bytes {
            return Err(CoreError::InvalidDimensions {
                width,
                height,
                pitch,
            });
        }

        let (format, has_alpha) = if bpp == 8 {
            let grey: Vec<u32> = (0..BITMAP_PALETTE_LEN as u32)
                .map(|i| i * 0xfff / 256)
                .collect();
            (
                PixelFormat::Paletted {
                    red: grey.clone(),
                    green: grey.clone(),
                    blue: grey,
                    alpha: vec![0; BITMAP_PALETTE_LEN],
                },
                false,
            )
        } else {
            let [r, g, b, a] = masks;
            (
                PixelFormat::Masked {
                    red: ChannelMask::new(r),
                    green: ChannelMask::new(g),
                    blue: ChannelMask::new(b),
                    alpha: ChannelMask::new(a),
                },
                a != 0,
            )
        };

        Ok(Self {
            bpp,
            width,
            height,
            pitch,
            format,
            has_alpha,
            gamma: 1.0,
            gamma_table: (0..GAMMA_TABLE_LEN as u32).collect(),
        })
    }

    /// Tightly packed RGBA, one byte per channel in memory order R, G, B, A.
    ///
    /// # Errors
    /// Same as [`Bitmap::new`].
    pub fn rgba32(width: u32, height: u32) -> Result<Self, CoreError> {
        let masks = [
            u32::from_ne_bytes([0xff, 0, 0, 0]),
            u32::from_ne_bytes([0, 0xff, 0, 0]),
            u32::from_ne_bytes([0, 0, 0xff, 0]),
            u32::from_ne_bytes([0, 0, 0, 0xff]),
        ];
        Self::new(32, width, height, width as usize * 4, masks)
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row stride in bytes.
    #[must_use]
    pub fn pitch(&self) -> usize {
        self.pitch
    }

    /// Bits per pixel.
    #[must_use]
    pub fn bpp(&self) -> u32 {
        self.bpp
    }

    /// Whether alpha is honoured when rendering.
    #[must_use]
    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    /// Whether pixels index a palette (8 bpp).
    #[must_use]
    pub fn has_palette(&self) -> bool {
        matches!(self.format, PixelFormat::Paletted { .. })
    }

    /// Bytes a pixel buffer needs to cover the whole bitmap.
    #[must_use]
    pub fn required_len(&self) -> usize {
        self.pitch * (self.height as usize - 1) + self.width as usize * (self.bpp as usize / 8)
    }

    /// Set palette entries of an 8 bpp bitmap. Values are 12-bit.
    ///
    /// Entries with any channel ≥ 0x1000 are skipped and keep their previous
    /// value. Any non-zero alpha entry turns alpha handling on. Ignored for
    /// non-paletted bitmaps.
    ///
    /// # Example
    /// ```
    /// use ca_core::bitmap::Bitmap;
    /// let mut bitmap = Bitmap::new(8, 2, 2, 2, [0; 4]).unwrap();
    /// bitmap.set_palette(&[0xfff, 0x1000], &[0, 0], &[0, 0], &[0xfff, 0]);
    /// assert_eq!(bitmap.palette_entry(0), Some([0xfff, 0, 0, 0xfff]));
    /// assert_eq!(bitmap.palette_entry(1), Some([15, 15, 15, 0]));
    /// assert!(bitmap.has_alpha());
    /// ```
    pub fn set_palette(&mut self, red: &[u32], green: &[u32], blue: &[u32], alpha: &[u32]) {
        let PixelFormat::Paletted {
            red: pr,
            green: pg,
            blue: pb,
            alpha: pa,
        } = &mut self.format
        else {
            log::warn!("set_palette ignoré : bitmap {} bpp sans palette", self.bpp);
            return;
        };

        let count = red
            .len()
            .min(green.len())
            .min(blue.len())
            .min(alpha.len())
            .min(BITMAP_PALETTE_LEN);
        let mut skipped = 0usize;
        let mut has_alpha = false;

        for i in 0..count {
            if (red[i] | green[i] | blue[i] | alpha[i]) >= 0x1000 {
                skipped += 1;
                continue;
            }
            pr[i] = red[i];
            pg[i] = green[i];
            pb[i] = blue[i];
            pa[i] = alpha[i];
        }
        for &a in pa.iter() {
            has_alpha |= a != 0;
        }
        self.has_alpha = has_alpha;

        if skipped > 0 {
            log::warn!("{skipped} entrée(s) de palette hors plage ignorée(s)");
        }
    }

    /// Palette entry `[r, g, b, a]`, or `None` for non-paletted bitmaps.
    #[must_use]
    pub fn palette_entry(&self, index: u8) -> Option<[u32; 4]> {
        match &self.format {
            PixelFormat::Paletted {
                red,
                green,
                blue,
                alpha,
            } => {
                let i = usize::from(index);
                Some([red[i], green[i], blue[i], alpha[i]])
            }
            PixelFormat::Masked { .. } => None,
        }
    }

    /// Rebuild the gamma table: `out = round(4096 * (in / 4096) ^ (1 / gamma))`.
    ///
    /// A gamma ≤ 0 (or NaN) is rejected and the previous table is kept.
    ///
    /// # Example
    /// ```
    /// use ca_core::bitmap::Bitmap;
    /// let mut bitmap = Bitmap::rgba32(1, 1).unwrap();
    /// bitmap.set_gamma(2.0);
    /// assert_eq!(bitmap.gamma_table()[1024], 2048);
    /// bitmap.set_gamma(-1.0);
    /// assert_eq!(bitmap.gamma(), 2.0);
    /// ```
    pub fn set_gamma(&mut self, gamma: f32) {
        if gamma.is_nan() || gamma <= 0.0 {
            log::warn!("gamma {gamma} rejeté, conservation de {}", self.gamma);
            return;
        }
        self.gamma = gamma;
        let exponent = 1.0 / f64::from(gamma);
        for (i, slot) in self.gamma_table.iter_mut().enumerate() {
            let x = i as f64 / 4096.0;
            *slot = (4096.0 * x.powf(exponent)).round() as u32;
        }
    }

    /// Current gamma exponent.
    #[must_use]
    pub fn gamma(&self) -> f32 {
        self.gamma
    }

    /// The 4097-entry gamma lookup table.
    #[must_use]
    pub fn gamma_table(&self) -> &[u32] {
        &self.gamma_table
    }

    /// Add the gamma-corrected RGBA of pixel (x, y) to `acc`.
    ///
    /// Pixels beyond the end of `pixels` contribute nothing.
    ///
    /// # Example
    /// ```
    /// use ca_core::bitmap::Bitmap;
    /// let bitmap = Bitmap::rgba32(1, 1).unwrap();
    /// let mut acc = [0u64; 4];
    /// bitmap.accumulate(&[255, 0, 128, 255], 0, 0, &mut acc);
    /// assert_eq!(acc, [0xff0, 0, 0x800, 0xff0]);
    /// ```
    #[inline]
    pub fn accumulate(&self, pixels: &[u8], x: u32, y: u32, acc: &mut [u64; 4]) {
        let Some(bits) = self.read_bits(pixels, x, y) else {
            return;
        };
        let gamma = |v: u32| u64::from(self.gamma_table[(v as usize).min(GAMMA_TABLE_LEN - 1)]);

        match &self.format {
            PixelFormat::Paletted {
                red,
                green,
                blue,
                alpha,
            } => {
                let i = (bits as usize).min(BITMAP_PALETTE_LEN - 1);
                acc[0] += gamma(red[i]);
                acc[1] += gamma(green[i]);
                acc[2] += gamma(blue[i]);
                acc[3] += u64::from(alpha[i]);
            }
            PixelFormat::Masked {
                red,
                green,
                blue,
                alpha,
            } => {
                acc[0] += gamma(red.extract(bits));
                acc[1] += gamma(green.extract(bits));
                acc[2] += gamma(blue.extract(bits));
                acc[3] += u64::from(alpha.extract(bits));
            }
        }
    }

    fn read_bits(&self, pixels: &[u8], x: u32, y: u32) -> Option<u32> {
        let bytes = self.bpp as usize / 8;
        let offset = bytes * x as usize + self.pitch * y as usize;
        let p = pixels.get(offset..offset + bytes)?;
        let bits = match bytes {
            4 => u32::from_ne_bytes([p[0], p[1], p[2], p[3]]),
            3 => {
                if cfg!(target_endian = "big") {
                    (u32::from(p[0]) << 16) | (u32::from(p[1]) << 8) | u32::from(p[2])
                } else {
                    (u32::from(p[2]) << 16) | (u32::from(p[1]) << 8) | u32::from(p[0])
                }
            }
            2 => u32::from(u16::from_ne_bytes([p[0], p[1]])),
            _ => u32::from(p[0]),
        };
        Some(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gamma_one_is_identity() {
        let mut bitmap = Bitmap::rgba32(2, 2).unwrap();
        bitmap.set_gamma(2.2);
        bitmap.set_gamma(1.0);
        for (i, &v) in bitmap.gamma_table().iter().enumerate() {
            assert_eq!(v as usize, i);
        }
        assert_eq!(bitmap.gamma_table().len(), GAMMA_TABLE_LEN);
    }

    #[test]
    fn gamma_zero_rejected() {
        let mut bitmap = Bitmap::rgba32(2, 2).unwrap();
        bitmap.set_gamma(0.5);
        let before = bitmap.gamma_table().to_vec();
        bitmap.set_gamma(0.0);
        bitmap.set_gamma(f32::NAN);
        assert_eq!(bitmap.gamma_table(), &before[..]);
        assert!((bitmap.gamma() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn gamma_table_monotonic_with_fixed_ends() {
        let mut bitmap = Bitmap::rgba32(1, 1).unwrap();
        bitmap.set_gamma(1.8);
        let table = bitmap.gamma_table();
        assert_eq!(table[0], 0);
        assert_eq!(table[4096], 4096);
        assert!(table.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn mask_shifts() {
        let m = ChannelMask::new(0xf800);
        assert_eq!(m.extract(0xffff), 0xf80);
        let wide = ChannelMask::new(0xffff);
        assert_eq!(wide.extract(0xffff), 0xfff);
        assert!(ChannelMask::new(0).is_empty());
        assert_eq!(ChannelMask::new(0).extract(0xffff_ffff), 0);
    }

    #[test]
    fn rejects_bad_geometry() {
        assert_eq!(
            Bitmap::new(12, 4, 4, 16, [0; 4]).unwrap_err(),
            CoreError::UnsupportedDepth { bpp: 12 }
        );
        assert!(Bitmap::new(32, 0, 4, 16, [0; 4]).is_err());
        assert!(Bitmap::new(32, 4, 4, 15, [0; 4]).is_err());
    }

    #[test]
    fn eight_bpp_defaults_to_grey_without_alpha() {
        let bitmap = Bitmap::new(8, 4, 4, 4, [0xff; 4]).unwrap();
        assert!(bitmap.has_palette());
        assert!(!bitmap.has_alpha());
        assert_eq!(bitmap.palette_entry(128), Some([0x7ff, 0x7ff, 0x7ff, 0]));
    }

    #[test]
    fn set_palette_on_masked_bitmap_is_ignored() {
        let mut bitmap = Bitmap::rgba32(1, 1).unwrap();
        bitmap.set_palette(&[0], &[0], &[0], &[0]);
        assert!(bitmap.palette_entry(0).is_none());
        assert!(bitmap.has_alpha());
    }

    #[test]
    fn reads_24_and_16_bpp() {
        let rgb24 = Bitmap::new(24, 1, 1, 3, [0xff_0000, 0x00_ff00, 0x00_00ff, 0]).unwrap();
        let mut acc = [0u64; 4];
        let pixel = if cfg!(target_endian = "big") {
            [0x10, 0x20, 0x30]
        } else {
            [0x30, 0x20, 0x10]
        };
        rgb24.accumulate(&pixel, 0, 0, &mut acc);
        assert_eq!(acc, [0x100, 0x200, 0x300, 0]);

        let rgb565 = Bitmap::new(16, 1, 1, 2, [0xf800, 0x07e0, 0x001f, 0]).unwrap();
        let mut acc = [0u64; 4];
        rgb565.accumulate(&0xffffu16.to_ne_bytes(), 0, 0, &mut acc);
        assert_eq!(acc, [0xf80, 0xfc0, 0xf80, 0]);
    }

    #[test]
    fn out_of_buffer_pixels_contribute_nothing() {
        let bitmap = Bitmap::rgba32(2, 2).unwrap();
        let mut acc = [1u64; 4];
        bitmap.accumulate(&[255; 8], 1, 1, &mut acc);
        assert_eq!(acc, [1; 4]);
        assert_eq!(bitmap.required_len(), 16);
    }
}
