use serde::{Deserialize, Serialize};

use crate::color::MAX_CHANNEL;

/// 11 caractères — ASCII pur, du vide au plein.
pub const GLYPHS_ASCII: &[char] = &[' ', '.', ':', ';', 't', '%', 'S', 'X', '@', '8', '#'];

/// Ombrages CP437 : espace, point médian, ░, ▒, █.
pub const GLYPHS_SHADES: &[char] = &[' ', '\u{b7}', '\u{2591}', '\u{2592}', '\u{2588}'];

/// Quarts de bloc Unicode : espace, ▘, ▚, █.
pub const GLYPHS_BLOCKS: &[char] = &[' ', '\u{2598}', '\u{259a}', '\u{2588}'];

/// Named glyph set selectable at configuration time.
///
/// # Example
/// ```
/// use ca_core::charset::Charset;
/// assert_eq!(Charset::from_name("SHADES"), Charset::Shades);
/// assert_eq!(Charset::from_name("klingon"), Charset::Ascii);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Charset {
    /// Plain ASCII.
    #[default]
    Ascii,
    /// CP437 shade blocks.
    Shades,
    /// Unicode quarter blocks.
    Blocks,
}

impl Charset {
    /// Every charset, in listing order.
    pub const ALL: [Charset; 3] = [Charset::Ascii, Charset::Shades, Charset::Blocks];

    /// Resolve a case-insensitive name. `"default"` and unknown names map
    /// to [`Charset::Ascii`]; unknown names are logged.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        match lower.as_str() {
            "shades" => Self::Shades,
            "blocks" => Self::Blocks,
            "ascii" | "default" => Self::Ascii,
            _ => {
                log::warn!("charset inconnu '{name}', utilisation de 'ascii'");
                Self::Ascii
            }
        }
    }

    /// Canonical configuration name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::Shades => "shades",
            Self::Blocks => "blocks",
        }
    }

    /// Human-readable description.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::Ascii => "plain ASCII",
            Self::Shades => "CP437 shades",
            Self::Blocks => "Unicode blocks",
        }
    }

    /// Glyph ramp for this charset.
    #[must_use]
    pub fn ramp(self) -> GlyphRamp {
        match self {
            Self::Ascii => GlyphRamp::new(GLYPHS_ASCII),
            Self::Shades => GlyphRamp::new(GLYPHS_SHADES),
            Self::Blocks => GlyphRamp::new(GLYPHS_BLOCKS),
        }
    }
}

/// Ordered glyphs from pure background (index 0) to pure foreground
/// (index `len - 1`).
///
/// # Example
/// ```
/// use ca_core::charset::Charset;
/// let ramp = Charset::Ascii.ramp();
/// assert_eq!(ramp.glyph(0), ' ');
/// assert_eq!(ramp.for_luminance(0xfff), '#');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphRamp {
    glyphs: &'static [char],
}

impl GlyphRamp {
    /// Wrap a static glyph slice.
    ///
    /// A slice shorter than 2 glyphs falls back to `" #"`.
    #[must_use]
    pub fn new(glyphs: &'static [char]) -> Self {
        if glyphs.len() >= 2 {
            Self { glyphs }
        } else {
            // Fallback: ramp trop courte pour un mélange fg/bg.
            Self { glyphs: &[' ', '#'] }
        }
    }

    /// Number of glyphs, always ≥ 2.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always false.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyph at `index`, clamped to the last glyph.
    #[inline(always)]
    #[must_use]
    pub fn glyph(&self, index: usize) -> char {
        self.glyphs[index.min(self.glyphs.len() - 1)]
    }

    /// Position of `ch` in the ramp, if present.
    #[must_use]
    pub fn position(&self, ch: char) -> Option<usize> {
        self.glyphs.iter().position(|&g| g == ch)
    }

    /// Ramp index for a 12-bit luminance, proportional and clamped.
    ///
    /// # Example
    /// ```
    /// use ca_core::charset::Charset;
    /// let ramp = Charset::Blocks.ramp();
    /// assert_eq!(ramp.index_for_luminance(-30), 0);
    /// assert_eq!(ramp.index_for_luminance(0x800), 2);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn index_for_luminance(&self, lum: i32) -> usize {
        let len = self.glyphs.len() as i32;
        (lum * len / (MAX_CHANNEL + 1)).clamp(0, len - 1) as usize
    }

    /// Glyph for a 12-bit luminance.
    #[inline(always)]
    #[must_use]
    pub fn for_luminance(&self, lum: i32) -> char {
        self.glyph(self.index_for_luminance(lum))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramps_run_from_empty_to_full() {
        for charset in Charset::ALL {
            let ramp = charset.ramp();
            assert!(ramp.len() >= 2);
            assert_eq!(ramp.glyph(0), ' ');
        }
        assert_eq!(Charset::Shades.ramp().glyph(4), '█');
        assert_eq!(Charset::Blocks.ramp().glyph(3), '█');
    }

    #[test]
    fn luminance_index_monotonic() {
        let ramp = Charset::Ascii.ramp();
        let mut prev = 0;
        for lum in 0..=0xfff {
            let idx = ramp.index_for_luminance(lum);
            assert!(idx >= prev, "index non monotone à luminance {lum}");
            prev = idx;
        }
        assert_eq!(prev, ramp.len() - 1);
    }

    #[test]
    fn short_ramp_falls_back() {
        let ramp = GlyphRamp::new(&['x']);
        assert_eq!(ramp.len(), 2);
    }

    #[test]
    fn names_round_trip() {
        for charset in Charset::ALL {
            assert_eq!(Charset::from_name(charset.name()), charset);
        }
        assert_eq!(Charset::from_name("default"), Charset::Ascii);
    }
}
