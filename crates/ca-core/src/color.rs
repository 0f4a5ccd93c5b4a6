//! Espace couleur 12 bits : conversion HSV en virgule fixe, indices ANSI et
//! table de correspondance HSV précalculée pour la palette 16 couleurs.

use std::sync::LazyLock;

/// Maximum value of one colour channel (12-bit fixed point).
pub const MAX_CHANNEL: i32 = 0xfff;

/// Half intensity, the neutral point of contrast and alpha tests.
pub const HALF_CHANNEL: i32 = 0x800;

/// Full hue circle in fixed point (six sectors of 0x1000).
pub const HUE_RANGE: i32 = 0x6000;

/// Indices of the 16 standard ANSI colours, in canvas order.
pub mod ansi {
    pub const BLACK: u8 = 0;
    pub const BLUE: u8 = 1;
    pub const GREEN: u8 = 2;
    pub const CYAN: u8 = 3;
    pub const RED: u8 = 4;
    pub const MAGENTA: u8 = 5;
    pub const BROWN: u8 = 6;
    pub const LIGHTGRAY: u8 = 7;
    pub const DARKGRAY: u8 = 8;
    pub const LIGHTBLUE: u8 = 9;
    pub const LIGHTGREEN: u8 = 10;
    pub const LIGHTCYAN: u8 = 11;
    pub const LIGHTRED: u8 = 12;
    pub const LIGHTMAGENTA: u8 = 13;
    pub const YELLOW: u8 = 14;
    pub const WHITE: u8 = 15;
}

/// Convertit RGB [0, 0xfff] → HSV en virgule fixe.
///
/// H ∈ [0, 0x6000) avec le rouge à 0 et le jaune à 0x1000, S et V ∈ [0, 0xfff].
/// Out-of-range channels are clamped first.
///
/// # Example
/// ```
/// use ca_core::color::rgb_to_hsv;
/// assert_eq!(rgb_to_hsv(0xfff, 0, 0), (0, 0xfff, 0xfff));
/// assert_eq!(rgb_to_hsv(0xfff, 0xfff, 0), (0x1000, 0xfff, 0xfff));
/// assert_eq!(rgb_to_hsv(0x400, 0x400, 0x400), (0, 0, 0x400));
/// ```
#[must_use]
pub fn rgb_to_hsv(r: i32, g: i32, b: i32) -> (i32, i32, i32) {
    let r = r.clamp(0, MAX_CHANNEL);
    let g = g.clamp(0, MAX_CHANNEL);
    let b = b.clamp(0, MAX_CHANNEL);

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    if delta == 0 {
        return (0, 0, max);
    }

    let sat = MAX_CHANNEL * delta / max;
    let hue = if r == max {
        0x1000 * (g - b) / delta
    } else if g == max {
        0x2000 + 0x1000 * (b - r) / delta
    } else {
        0x4000 + 0x1000 * (r - g) / delta
    };
    let hue = if hue < 0 { hue + HUE_RANGE } else { hue };

    (hue, sat, max)
}

/// Scale an 8-bit channel into the 12-bit domain.
///
/// # Example
/// ```
/// use ca_core::color::channel_from_u8;
/// assert_eq!(channel_from_u8(0), 0);
/// assert_eq!(channel_from_u8(255), 0xff0);
/// ```
#[inline(always)]
#[must_use]
pub fn channel_from_u8(c: u8) -> i32 {
    i32::from(c) << 4
}

const LOOKUP_VAL: usize = 32;
const LOOKUP_SAT: usize = 32;
const LOOKUP_HUE: usize = 16;

const HSV_XRATIO: i64 = 6;
const HSV_YRATIO: i64 = 3;
const HSV_HRATIO: i64 = 3;

/// Reference swatch of the HSV lookup.
struct Swatch {
    weight: i64,
    hue: i64,
    sat: i64,
    val: i64,
    color: u8,
}

const HSV_SWATCHES: [Swatch; 8] = [
    Swatch { weight: 4, hue: 0x0, sat: 0x0, val: 0x0, color: ansi::BLACK },
    Swatch { weight: 5, hue: 0x0, sat: 0x0, val: 0x5ff, color: ansi::DARKGRAY },
    Swatch { weight: 5, hue: 0x0, sat: 0x0, val: 0x9ff, color: ansi::LIGHTGRAY },
    Swatch { weight: 4, hue: 0x0, sat: 0x0, val: 0xfff, color: ansi::WHITE },
    Swatch { weight: 3, hue: 0x1000, sat: 0xfff, val: 0x5ff, color: ansi::BROWN },
    Swatch { weight: 2, hue: 0x1000, sat: 0xfff, val: 0xfff, color: ansi::YELLOW },
    Swatch { weight: 3, hue: 0x0, sat: 0xfff, val: 0x5ff, color: ansi::RED },
    Swatch { weight: 2, hue: 0x0, sat: 0xfff, val: 0xfff, color: ansi::LIGHTRED },
];

/// Index of the white swatch, the starting point of every search.
const WHITE_SWATCH: usize = 3;

/// Weighted HSV distance to a swatch.
///
/// A grey swatch (zero saturation) has no meaningful hue and a black swatch
/// (zero value) has no meaningful saturation, so those terms drop out.
fn hsv_distance(hue: i64, sat: i64, val: i64, swatch: &Swatch) -> i64 {
    let dv = val - swatch.val;
    let mut dist = HSV_XRATIO * dv * dv;
    if swatch.val != 0 {
        let ds = sat - swatch.sat;
        dist += HSV_YRATIO * ds * ds;
    }
    if swatch.sat != 0 {
        let dh = (hue - swatch.hue).abs();
        let dh = dh.min(i64::from(HUE_RANGE) - dh);
        dist += HSV_HRATIO * dh * dh;
    }
    swatch.weight * dist
}

static HSV_LOOKUP: LazyLock<HsvLookup> = LazyLock::new(HsvLookup::build);

/// Table (valeur × saturation × teinte) → paire de couleurs ANSI.
///
/// Built once on first use by an exhaustive search over the eight reference
/// swatches, then O(1) per pixel. Each entry packs `(fg << 4) | bg`.
///
/// # Example
/// ```
/// use ca_core::color::{ansi, HsvLookup};
/// let (bg, _fg) = HsvLookup::global().nearest_two(0, 0, 0);
/// assert_eq!(bg, ansi::BLACK);
/// ```
pub struct HsvLookup {
    table: Vec<u8>,
}

impl HsvLookup {
    /// Process-wide lookup table, built lazily and immutable afterwards.
    #[must_use]
    pub fn global() -> &'static Self {
        &HSV_LOOKUP
    }

    fn build() -> Self {
        let mut table = vec![0u8; LOOKUP_VAL * LOOKUP_SAT * LOOKUP_HUE];
        let max = i64::from(MAX_CHANNEL);

        for v in 0..LOOKUP_VAL {
            for s in 0..LOOKUP_SAT {
                for h in 0..LOOKUP_HUE {
                    let val = max * v as i64 / (LOOKUP_VAL as i64 - 1);
                    let sat = max * s as i64 / (LOOKUP_SAT as i64 - 1);
                    let hue = i64::from(HUE_RANGE) * h as i64 / LOOKUP_HUE as i64;

                    let mut out_bg = WHITE_SWATCH;
                    let mut out_fg = WHITE_SWATCH;
                    let mut dist_bg = hsv_distance(0, 0, 0, &HSV_SWATCHES[WHITE_SWATCH]);
                    let mut dist_fg = dist_bg;

                    for (i, swatch) in HSV_SWATCHES.iter().enumerate() {
                        let dist = hsv_distance(hue, sat, val, swatch);
                        if dist <= dist_bg {
                            out_fg = out_bg;
                            dist_fg = dist_bg;
                            out_bg = i;
                            dist_bg = dist;
                        } else if dist <= dist_fg {
                            out_fg = i;
                            dist_fg = dist;
                        }
                    }

                    table[Self::index(v, s, h)] = ((out_fg as u8) << 4) | out_bg as u8;
                }
            }
        }

        log::debug!("HSV lookup built ({} entries)", table.len());
        Self { table }
    }

    #[inline(always)]
    fn index(v: usize, s: usize, h: usize) -> usize {
        (v * LOOKUP_SAT + s) * LOOKUP_HUE + h
    }

    /// Nearest and second-nearest ANSI colours for a 12-bit RGB value.
    ///
    /// Returns `(bg, fg)` where `bg` is the closer of the two.
    ///
    /// # Example
    /// ```
    /// use ca_core::color::{ansi, HsvLookup};
    /// let (bg, _) = HsvLookup::global().nearest_two(0xfff, 0xfff, 0xfff);
    /// assert_eq!(bg, ansi::WHITE);
    /// ```
    #[must_use]
    pub fn nearest_two(&self, r: i32, g: i32, b: i32) -> (u8, u8) {
        let (hue, sat, val) = rgb_to_hsv(r, g, b);
        let max = MAX_CHANNEL as usize;
        let v = (val as usize * (LOOKUP_VAL - 1) + max / 2) / max;
        let s = (sat as usize * (LOOKUP_SAT - 1) + max / 2) / max;
        let h = (hue as usize * LOOKUP_HUE / HUE_RANGE as usize).min(LOOKUP_HUE - 1);

        let packed = self.table[Self::index(v, s, h)];
        let bg = HSV_SWATCHES[usize::from(packed & 0x0f)].color;
        let fg = HSV_SWATCHES[usize::from(packed >> 4)].color;
        (bg, fg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsv_primaries() {
        assert_eq!(rgb_to_hsv(0, 0xfff, 0).0, 0x2000);
        assert_eq!(rgb_to_hsv(0, 0, 0xfff).0, 0x4000);
        assert_eq!(rgb_to_hsv(0xfff, 0, 0xfff).0, 0x5000);
    }

    #[test]
    fn hsv_clamps_out_of_range_input() {
        assert_eq!(rgb_to_hsv(-40, -40, -40), (0, 0, 0));
        assert_eq!(rgb_to_hsv(0x2000, 0, 0), rgb_to_hsv(0xfff, 0, 0));
    }

    #[test]
    fn hsv_hue_always_in_range() {
        for r in (0..=0xfff).step_by(0x111) {
            for g in (0..=0xfff).step_by(0x111) {
                for b in (0..=0xfff).step_by(0x111) {
                    let (h, s, v) = rgb_to_hsv(r, g, b);
                    assert!((0..HUE_RANGE).contains(&h), "hue {h} for {r},{g},{b}");
                    assert!((0..=MAX_CHANNEL).contains(&s));
                    assert!((0..=MAX_CHANNEL).contains(&v));
                }
            }
        }
    }

    #[test]
    fn grey_swatch_ignores_hue() {
        let grey = &HSV_SWATCHES[1];
        assert_eq!(
            hsv_distance(0x0, 0x300, 0x500, grey),
            hsv_distance(0x3000, 0x300, 0x500, grey)
        );
    }

    #[test]
    fn black_swatch_ignores_saturation() {
        let black = &HSV_SWATCHES[0];
        assert_eq!(
            hsv_distance(0, 0, 0x100, black),
            hsv_distance(0, 0xfff, 0x100, black)
        );
    }

    #[test]
    fn lookup_pairs_are_distinct_for_saturated_red() {
        let (bg, fg) = HsvLookup::global().nearest_two(0xfff, 0, 0);
        assert_eq!(bg, ansi::LIGHTRED);
        assert_ne!(bg, fg);
    }

    #[test]
    fn lookup_grey_stays_grey() {
        let grey = [ansi::BLACK, ansi::DARKGRAY, ansi::LIGHTGRAY, ansi::WHITE];
        let (bg, _) = HsvLookup::global().nearest_two(0x600, 0x600, 0x600);
        assert!(grey.contains(&bg), "got {bg}");
    }
}
