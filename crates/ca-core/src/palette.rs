use crate::color::MAX_CHANNEL;
use crate::config::ColorMode;
use crate::error::CoreError;

/// Maximum number of entries in an output palette.
pub const MAX_PALETTE: usize = 256;

/// The 16 ANSI colours in 12-bit RGB, indexed like the canvas colours.
pub const ANSI16_RGB: [[i32; 3]; 16] = [
    [0x000, 0x000, 0x000],
    [0x000, 0x000, 0x7ff],
    [0x000, 0x7ff, 0x000],
    [0x000, 0x7ff, 0x7ff],
    [0x7ff, 0x000, 0x000],
    [0x7ff, 0x000, 0x7ff],
    [0x7ff, 0x7ff, 0x000],
    [0xaaa, 0xaaa, 0xaaa],
    [0x555, 0x555, 0x555],
    [0x000, 0x000, 0xfff],
    [0x000, 0xfff, 0x000],
    [0x000, 0xfff, 0xfff],
    [0xfff, 0x000, 0x000],
    [0xfff, 0x000, 0xfff],
    [0xfff, 0xfff, 0x000],
    [0xfff, 0xfff, 0xfff],
];

/// Indexed output palette with per-entry search weights.
///
/// Colours live in the 12-bit domain. A weight above 1 makes an entry
/// proportionally less likely to be picked by [`ColorPalette::nearest`].
///
/// # Example
/// ```
/// use ca_core::palette::ColorPalette;
/// let palette = ColorPalette::ansi16();
/// assert_eq!(palette.len(), 16);
/// assert_eq!(palette.nearest([0xfff, 0xfff, 0xfff], |_| true), 15);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorPalette {
    colors: Vec<[i32; 3]>,
    weights: Vec<i64>,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::ansi16()
    }
}

impl ColorPalette {
    /// The standard 16-colour ANSI palette, all weights 1.
    #[must_use]
    pub fn ansi16() -> Self {
        Self {
            colors: ANSI16_RGB.to_vec(),
            weights: vec![1; ANSI16_RGB.len()],
        }
    }

    /// Build a palette from 12-bit RGB triples.
    ///
    /// Channels are clamped to `0..=0xfff`; entries past 256 are dropped.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] if `colors` is empty.
    ///
    /// # Example
    /// ```
    /// use ca_core::palette::ColorPalette;
    /// let bw = ColorPalette::new(&[[0, 0, 0], [0xfff, 0xfff, 0xfff]]).unwrap();
    /// assert_eq!(bw.len(), 2);
    /// assert!(ColorPalette::new(&[]).is_err());
    /// ```
    pub fn new(colors: &[[i32; 3]]) -> Result<Self, CoreError> {
        if colors.is_empty() {
            return Err(CoreError::Config("palette vide".into()));
        }
        if colors.len() > MAX_PALETTE {
            log::warn!(
                "palette of {} entries truncated to {MAX_PALETTE}",
                colors.len()
            );
        }
        let colors: Vec<[i32; 3]> = colors
            .iter()
            .take(MAX_PALETTE)
            .map(|c| c.map(|v| v.clamp(0, MAX_CHANNEL)))
            .collect();
        let weights = vec![1; colors.len()];
        Ok(Self { colors, weights })
    }

    /// Replace the search weights. Missing weights stay at their previous
    /// value and zero weights are raised to 1.
    #[must_use]
    pub fn with_weights(mut self, weights: &[u32]) -> Self {
        for (slot, &w) in self.weights.iter_mut().zip(weights) {
            *slot = i64::from(w.max(1));
        }
        self
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false: a palette holds at least one colour.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// RGB triple of entry `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    #[inline(always)]
    #[must_use]
    pub fn rgb(&self, index: usize) -> [i32; 3] {
        self.colors[index]
    }

    /// Weighted squared RGB distance from `rgb` to entry `index`.
    #[inline(always)]
    #[must_use]
    pub fn distance(&self, rgb: [i32; 3], index: usize) -> i64 {
        let c = self.colors[index];
        let dr = i64::from(rgb[0] - c[0]);
        let dg = i64::from(rgb[1] - c[1]);
        let db = i64::from(rgb[2] - c[2]);
        (dr * dr + dg * dg + db * db) * self.weights[index]
    }

    /// Index of the nearest entry accepted by `eligible`.
    ///
    /// Ties go to the lowest index. When no entry is eligible the whole
    /// palette is searched instead.
    ///
    /// # Example
    /// ```
    /// use ca_core::palette::ColorPalette;
    /// let palette = ColorPalette::ansi16();
    /// // Pure red, but only the grey ramp is allowed.
    /// let idx = palette.nearest([0xfff, 0, 0], |i| matches!(i, 0 | 7 | 8 | 15));
    /// assert_eq!(idx, 8);
    /// ```
    #[must_use]
    pub fn nearest(&self, rgb: [i32; 3], eligible: impl Fn(usize) -> bool) -> usize {
        self.search(rgb, &eligible)
            .unwrap_or_else(|| self.search(rgb, &|_| true).unwrap_or(0))
    }

    /// Nearest entry and the nearest entry distinct from it, as `(bg, fg)`.
    ///
    /// With a single eligible entry both halves are that entry.
    ///
    /// # Example
    /// ```
    /// use ca_core::palette::ColorPalette;
    /// let palette = ColorPalette::ansi16();
    /// let (bg, fg) = palette.nearest_two([0xfff, 0xfff, 0xfff], |_| true);
    /// assert_eq!((bg, fg), (15, 7));
    /// ```
    #[must_use]
    pub fn nearest_two(&self, rgb: [i32; 3], eligible: impl Fn(usize) -> bool) -> (usize, usize) {
        let bg = self.nearest(rgb, &eligible);
        let fg = self
            .search(rgb, &|i| i != bg && eligible(i))
            .or_else(|| self.search(rgb, &|i| i != bg))
            .unwrap_or(bg);
        (bg, fg)
    }

    /// Whether this palette holds exactly the 16 ANSI colours, in canvas
    /// order. Index arithmetic on ANSI colours is only valid then.
    #[must_use]
    pub fn is_ansi16(&self) -> bool {
        self.colors == ANSI16_RGB
    }

    /// Darkest entry by channel sum; ties go to the lowest index.
    #[must_use]
    pub fn darkest(&self) -> usize {
        (0..self.colors.len())
            .min_by_key(|&i| self.colors[i].iter().sum::<i32>())
            .unwrap_or(0)
    }

    /// Brightest entry by channel sum; ties go to the lowest index.
    #[must_use]
    pub fn brightest(&self) -> usize {
        (0..self.colors.len())
            .rev()
            .max_by_key(|&i| self.colors[i].iter().sum::<i32>())
            .unwrap_or(0)
    }

    /// Entries a colour mode may pick, one flag per entry.
    ///
    /// On the ANSI palette the modes keep their ANSI subsets. On any other
    /// palette they are derived from the colours: `mono` keeps the darkest
    /// and brightest entries, the grey modes keep entries whose three
    /// channels are equal, and the 8-colour modes keep the first eight
    /// entries. An empty subset makes the search fall back to the whole
    /// palette.
    ///
    /// # Example
    /// ```
    /// use ca_core::config::ColorMode;
    /// use ca_core::palette::ColorPalette;
    /// let bw = ColorPalette::new(&[[0, 0, 0], [0xfff, 0xfff, 0xfff]]).unwrap();
    /// assert_eq!(bw.mode_mask(ColorMode::Mono), vec![true, true]);
    /// ```
    #[must_use]
    pub fn mode_mask(&self, mode: ColorMode) -> Vec<bool> {
        if self.is_ansi16() {
            return (0..self.colors.len()).map(|i| mode.allows(i)).collect();
        }
        let (dark, bright) = (self.darkest(), self.brightest());
        self.colors
            .iter()
            .enumerate()
            .map(|(i, c)| match mode {
                ColorMode::Mono => i == dark || i == bright,
                ColorMode::Gray | ColorMode::FullGray => c[0] == c[1] && c[1] == c[2],
                ColorMode::Ansi8 | ColorMode::Full8 => i < 8,
                ColorMode::Ansi16 | ColorMode::Full16 => true,
            })
            .collect()
    }

    /// Inverse of every entry.
    ///
    /// On the ANSI palette entry `i` maps to `15 - i`; otherwise each entry
    /// maps to the entry nearest its complement `0xfff - c`.
    ///
    /// # Example
    /// ```
    /// use ca_core::palette::ColorPalette;
    /// assert_eq!(ColorPalette::ansi16().inverse_table()[1], 14);
    /// let bw = ColorPalette::new(&[[0, 0, 0], [0xfff, 0xfff, 0xfff]]).unwrap();
    /// assert_eq!(bw.inverse_table(), vec![1, 0]);
    /// ```
    #[must_use]
    pub fn inverse_table(&self) -> Vec<usize> {
        if self.is_ansi16() {
            return (0..self.colors.len()).map(|i| 15 - i).collect();
        }
        self.colors
            .iter()
            .map(|c| self.nearest(c.map(|v| MAX_CHANNEL - v), |_| true))
            .collect()
    }

    fn search(&self, rgb: [i32; 3], eligible: &dyn Fn(usize) -> bool) -> Option<usize> {
        let mut best = None;
        let mut best_dist = i64::MAX;
        for index in (0..self.colors.len()).filter(|&i| eligible(i)) {
            let dist = self.distance(rgb, index);
            if dist < best_dist {
                best = Some(index);
                best_dist = dist;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn black_white() -> ColorPalette {
        ColorPalette::new(&[[0, 0, 0], [0xfff, 0xfff, 0xfff]]).unwrap()
    }

    #[test]
    fn mid_grey_picks_an_entry_no_farther_than_the_other() {
        let palette = black_white();
        let grey = [0x800, 0x800, 0x800];
        let idx = palette.nearest(grey, |_| true);
        let other = 1 - idx;
        assert!(palette.distance(grey, idx) <= palette.distance(grey, other));
    }

    #[test]
    fn direct_l2_formula() {
        let palette = black_white();
        let d = palette.distance([0x100, 0x200, 0x300], 0);
        assert_eq!(d, 0x100 * 0x100 + 0x200 * 0x200 + 0x300 * 0x300);
    }

    #[test]
    fn ties_resolve_to_lowest_index() {
        let palette = ColorPalette::new(&[[0, 0, 0], [0x200, 0, 0], [0x200, 0, 0]]).unwrap();
        assert_eq!(palette.nearest([0x200, 0, 0], |_| true), 1);
    }

    #[test]
    fn weights_bias_the_search() {
        let palette = black_white().with_weights(&[100, 1]);
        assert_eq!(palette.nearest([0x300, 0x300, 0x300], |_| true), 1);
    }

    #[test]
    fn nearest_two_excludes_background() {
        let palette = ColorPalette::ansi16();
        for rgb in [[0, 0, 0], [0x7ff, 0, 0], [0x123, 0x456, 0x789]] {
            let (bg, fg) = palette.nearest_two(rgb, |_| true);
            assert_ne!(bg, fg);
            assert_eq!(bg, palette.nearest(rgb, |_| true));
        }
    }

    #[test]
    fn nearest_two_single_entry_palette() {
        let palette = ColorPalette::new(&[[0x400, 0x400, 0x400]]).unwrap();
        assert_eq!(palette.nearest_two([0, 0, 0], |_| true), (0, 0));
    }

    #[test]
    fn red_without_red_entry_still_matches() {
        let palette = black_white();
        assert_eq!(palette.nearest([0xfff, 0, 0], |_| true), 0);
    }

    #[test]
    fn ansi_palette_is_detected() {
        assert!(ColorPalette::ansi16().is_ansi16());
        assert!(!black_white().is_ansi16());
        let mut colors = ANSI16_RGB.to_vec();
        colors.push([0x330, 0x990, 0x660]);
        assert!(!ColorPalette::new(&colors).unwrap().is_ansi16());
    }

    #[test]
    fn ansi_mode_masks_keep_ansi_subsets() {
        let mask = ColorPalette::ansi16().mode_mask(ColorMode::FullGray);
        let greys: Vec<usize> = (0..16).filter(|&i| mask[i]).collect();
        assert_eq!(greys, vec![0, 7, 8, 15]);
        let mono = ColorPalette::ansi16().mode_mask(ColorMode::Mono);
        assert_eq!(mono.iter().filter(|&&m| m).count(), 2);
        assert!(mono[0] && mono[15]);
    }

    #[test]
    fn custom_mode_masks_follow_the_colours() {
        // Blanc en tête, noir en dernier.
        let palette = ColorPalette::new(&[
            [0xfff, 0xfff, 0xfff],
            [0xfff, 0, 0],
            [0x800, 0x800, 0x800],
            [0, 0, 0],
        ])
        .unwrap();
        assert_eq!(palette.darkest(), 3);
        assert_eq!(palette.brightest(), 0);
        assert_eq!(
            palette.mode_mask(ColorMode::Mono),
            vec![true, false, false, true]
        );
        assert_eq!(
            palette.mode_mask(ColorMode::Gray),
            vec![true, false, true, true]
        );
        assert!(palette.mode_mask(ColorMode::Full16).iter().all(|&m| m));
        // Pure red restricted to the greys lands on mid grey.
        let mask = palette.mode_mask(ColorMode::FullGray);
        assert_eq!(palette.nearest([0xfff, 0, 0], |i| mask[i]), 2);
    }

    #[test]
    fn brightness_ties_go_to_lowest_index() {
        let palette = ColorPalette::new(&[[0x100, 0, 0], [0, 0x100, 0]]).unwrap();
        assert_eq!(palette.darkest(), 0);
        assert_eq!(palette.brightest(), 0);
    }

    #[test]
    fn inverse_of_custom_palette_uses_complement() {
        let palette = ColorPalette::new(&[
            [0, 0, 0],
            [0xfff, 0, 0],
            [0, 0xfff, 0xfff],
            [0xfff, 0xfff, 0xfff],
        ])
        .unwrap();
        assert_eq!(palette.inverse_table(), vec![3, 2, 1, 0]);
        let ansi = ColorPalette::ansi16().inverse_table();
        assert_eq!(ansi[0], 15);
        assert_eq!(ansi[12], 3);
    }

    #[test]
    fn new_clamps_channels() {
        let palette = ColorPalette::new(&[[-5, 0x2000, 0x10]]).unwrap();
        assert_eq!(palette.rgb(0), [0, 0xfff, 0x10]);
    }
}
