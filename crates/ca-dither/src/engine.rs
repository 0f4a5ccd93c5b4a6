use ca_core::bitmap::Bitmap;
use ca_core::charset::{Charset, GlyphRamp};
use ca_core::color::{HALF_CHANNEL, HsvLookup, MAX_CHANNEL};
use ca_core::config::{
    ColorMode, DitherAlgorithm, DitherConfig, MatchMode, antialias_from_name,
};
use ca_core::palette::ColorPalette;
use ca_core::traits::Canvas;

use crate::dither::{Ditherer, ErrorCarry};

/// Moteur de conversion bitmap → cellules de caractères.
///
/// Holds the configuration and palette; every call to
/// [`BitmapDither::draw_bitmap`] builds its own dithering state, so one
/// engine can be shared between threads and canvases.
///
/// # Example
/// ```
/// use ca_core::bitmap::Bitmap;
/// use ca_core::config::DitherConfig;
/// use ca_core::grid::CellGrid;
/// use ca_dither::engine::BitmapDither;
///
/// let bitmap = Bitmap::rgba32(2, 2).unwrap();
/// let pixels = [255u8; 16];
/// let mut grid = CellGrid::new(4, 2);
/// let engine = BitmapDither::new(DitherConfig::default());
/// engine.draw_bitmap(&mut grid, 0, 0, 3, 1, &bitmap, &pixels);
/// assert_eq!(grid.get(0, 0).map(|c| c.bg), Some(15));
/// ```
#[derive(Clone, Debug)]
pub struct BitmapDither {
    config: DitherConfig,
    palette: ColorPalette,
    ramp: GlyphRamp,
}

impl Default for BitmapDither {
    fn default() -> Self {
        Self::new(DitherConfig::default())
    }
}

/// Palette facts fixed for one `draw_bitmap` call.
struct Search {
    /// Entries the colour mode may pick.
    eligible: Vec<bool>,
    /// HSV lookup instead of the RGB search.
    hsv: bool,
    /// Background of the single-search modes.
    base: usize,
    /// Inverse of every entry, when inverting.
    inverse: Option<Vec<usize>>,
}

/// Colour chosen for one cell, before inversion.
struct CellChoice {
    fg: usize,
    bg: usize,
    glyph: usize,
    /// What the chosen glyph/colour pair actually renders.
    rendered: [i32; 3],
}

impl BitmapDither {
    /// Engine with the standard 16-colour palette.
    #[must_use]
    pub fn new(config: DitherConfig) -> Self {
        Self::with_palette(config, ColorPalette::ansi16())
    }

    /// Engine with a custom palette.
    #[must_use]
    pub fn with_palette(mut config: DitherConfig, palette: ColorPalette) -> Self {
        config.clamp_all();
        let ramp = config.charset.ramp();
        Self {
            config,
            palette,
            ramp,
        }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &DitherConfig {
        &self.config
    }

    /// Current palette.
    #[must_use]
    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    pub fn set_palette(&mut self, palette: ColorPalette) {
        self.palette = palette;
    }

    pub fn set_antialias(&mut self, enabled: bool) {
        self.config.antialias = enabled;
    }

    /// Antialiasing by name (`"none"`, `"prefilter"`, `"default"`).
    pub fn set_antialias_name(&mut self, name: &str) {
        self.config.antialias = antialias_from_name(name);
    }

    #[must_use]
    pub fn antialias(&self) -> bool {
        self.config.antialias
    }

    /// Colour mode by name; unknown names select `full16`.
    pub fn set_color_mode(&mut self, name: &str) {
        self.config.color_mode = ColorMode::from_name(name);
    }

    #[must_use]
    pub fn color_mode(&self) -> ColorMode {
        self.config.color_mode
    }

    /// Glyph ramp by name; unknown names select `ascii`.
    pub fn set_charset(&mut self, name: &str) {
        self.config.charset = Charset::from_name(name);
        self.ramp = self.config.charset.ramp();
    }

    #[must_use]
    pub fn charset(&self) -> Charset {
        self.config.charset
    }

    /// Dithering algorithm by name; unknown names select `fstein`.
    ///
    /// # Example
    /// ```
    /// use ca_core::config::DitherAlgorithm;
    /// use ca_dither::engine::BitmapDither;
    /// let mut engine = BitmapDither::default();
    /// engine.set_algorithm("ordered4");
    /// assert_eq!(engine.algorithm(), DitherAlgorithm::Ordered4);
    /// engine.set_algorithm("wat");
    /// assert_eq!(engine.algorithm(), DitherAlgorithm::FloydSteinberg);
    /// ```
    pub fn set_algorithm(&mut self, name: &str) {
        self.config.algorithm = DitherAlgorithm::from_name(name);
    }

    #[must_use]
    pub fn algorithm(&self) -> DitherAlgorithm {
        self.config.algorithm
    }

    pub fn set_invert(&mut self, enabled: bool) {
        self.config.invert = enabled;
    }

    #[must_use]
    pub fn invert(&self) -> bool {
        self.config.invert
    }

    /// Brightness multiplier, clamped to [0, 4].
    pub fn set_brightness(&mut self, brightness: f32) {
        self.config.brightness = brightness;
        self.config.clamp_all();
    }

    #[must_use]
    pub fn brightness(&self) -> f32 {
        self.config.brightness
    }

    /// Contrast around the midpoint, clamped to [0, 4].
    pub fn set_contrast(&mut self, contrast: f32) {
        self.config.contrast = contrast;
        self.config.clamp_all();
    }

    #[must_use]
    pub fn contrast(&self) -> f32 {
        self.config.contrast
    }

    pub fn set_matcher(&mut self, matcher: MatchMode) {
        self.config.matcher = matcher;
    }

    #[must_use]
    pub fn matcher(&self) -> MatchMode {
        self.config.matcher
    }

    /// Seed for the random ditherer.
    pub fn set_seed(&mut self, seed: u64) {
        self.config.seed = seed;
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.config.seed
    }

    /// Render `pixels`, described by `bitmap`, into the inclusive cell
    /// rectangle `(x1, y1)`–`(x2, y2)` of `canvas`.
    ///
    /// Corners may be given in any order. Cells outside the canvas are
    /// skipped, cells whose averaged alpha is below half intensity are left
    /// untouched, and an empty `pixels` slice makes the call a no-op.
    #[allow(clippy::too_many_arguments, clippy::similar_names)]
    pub fn draw_bitmap<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        bitmap: &Bitmap,
        pixels: &[u8],
    ) {
        if pixels.is_empty() {
            log::debug!("draw_bitmap: tampon de pixels vide, rien à faire");
            return;
        }

        let (x1, x2) = (x1.min(x2), x1.max(x2));
        let (y1, y2) = (y1.min(y2), y1.max(y2));
        let delta_x = i64::from(x2) - i64::from(x1) + 1;
        let delta_y = i64::from(y2) - i64::from(y1) + 1;

        // Clip to the canvas.
        let cw = i64::from(canvas.width());
        let ch = i64::from(canvas.height());
        let x_start = i64::from(x1).max(0);
        let x_end = i64::from(x2).min(cw - 1);
        let y_start = i64::from(y1).max(0);
        let y_end = i64::from(y2).min(ch - 1);
        if x_start > x_end || y_start > y_end {
            log::debug!("draw_bitmap: région ({x1},{y1})-({x2},{y2}) hors du canevas");
            return;
        }

        log::debug!(
            "draw_bitmap: {}x{} px → cellules ({x_start},{y_start})-({x_end},{y_end}), \
             algo={} couleurs={} glyphes={} aa={}",
            bitmap.width(),
            bitmap.height(),
            self.config.algorithm.name(),
            self.config.color_mode.name(),
            self.config.charset.name(),
            self.config.antialias,
        );

        let src_w = i64::from(bitmap.width());
        let src_h = i64::from(bitmap.height());
        let span = (x_end - x_start + 1) as usize;

        let search = self.search();
        let mut ditherer = Ditherer::new(self.config.algorithm, self.config.seed);
        let diffuse = ditherer.is_error_diffusion();
        let mut carry = ErrorCarry::new(span);

        for y in y_start..=y_end {
            let (from_y, to_y) = source_span(y - i64::from(y1), src_h, delta_y);
            ditherer.init_line(y as u32);
            let mut remain = carry.start_row();

            for x in x_start..=x_end {
                let col = (x - x_start) as usize;
                let (from_x, to_x) = source_span(x - i64::from(x1), src_w, delta_x);

                let rgba = self.sample(bitmap, pixels, (from_x, to_x), (from_y, to_y));

                if bitmap.has_alpha() && rgba[3] < HALF_CHANNEL {
                    // Cellule transparente : rien n'est écrit.
                    carry.clear(col);
                    remain = carry.deposited(col + 1);
                    ditherer.advance();
                    continue;
                }

                let mut rgb = [rgba[0], rgba[1], rgba[2]];
                if diffuse {
                    for (c, r) in rgb.iter_mut().zip(remain) {
                        *c += r;
                    }
                } else {
                    let offset = ditherer.perturbation();
                    for c in &mut rgb {
                        *c += offset;
                    }
                }

                let choice = self.choose(rgb, &search);

                if diffuse {
                    let error = [
                        rgb[0] - choice.rendered[0],
                        rgb[1] - choice.rendered[1],
                        rgb[2] - choice.rendered[2],
                    ];
                    remain = carry.diffuse(col, error);
                }

                let (fg, bg) = match &search.inverse {
                    Some(inverse) => (inverse[choice.fg], inverse[choice.bg]),
                    None => (choice.fg, choice.bg),
                };

                canvas.set_color_ansi(canvas_index(fg), canvas_index(bg));
                canvas.put_char(x as i32, y as i32, self.ramp.glyph(choice.glyph));

                ditherer.advance();
            }
        }
    }

    /// Representative RGBA of a source rectangle, after gamma and tone.
    fn sample(
        &self,
        bitmap: &Bitmap,
        pixels: &[u8],
        (from_x, to_x): (i64, i64),
        (from_y, to_y): (i64, i64),
    ) -> [i32; 4] {
        let mut acc = [0u64; 4];
        let rgba = if self.config.antialias {
            let mut dots = 0u64;
            for sx in from_x..to_x {
                for sy in from_y..to_y {
                    dots += 1;
                    bitmap.accumulate(pixels, sx as u32, sy as u32, &mut acc);
                }
            }
            let dots = dots.max(1);
            acc.map(|v| (v / dots) as i32)
        } else {
            let mx = (from_x + to_x) / 2;
            let my = (from_y + to_y) / 2;
            bitmap.accumulate(pixels, mx as u32, my as u32, &mut acc);
            acc.map(|v| v as i32)
        };

        let mut rgb = [rgba[0], rgba[1], rgba[2]];
        self.apply_tone(&mut rgb);
        [rgb[0], rgb[1], rgb[2], rgba[3]]
    }

    /// Luminosité puis contraste autour de 0x800.
    fn apply_tone(&self, rgb: &mut [i32; 3]) {
        if self.config.is_neutral_tone() {
            return;
        }
        let brightness = self.config.brightness;
        let contrast = self.config.contrast;
        let mid = HALF_CHANNEL as f32;
        for c in rgb.iter_mut() {
            let v = *c as f32 * brightness;
            let v = (v - mid) * contrast + mid;
            *c = (v.round() as i32).clamp(0, MAX_CHANNEL);
        }
    }

    fn search(&self) -> Search {
        let ansi = self.palette.is_ansi16();
        Search {
            eligible: self.palette.mode_mask(self.config.color_mode),
            // La table HSV rend des indices ANSI.
            hsv: ansi
                && self.config.matcher == MatchMode::Hsv
                && matches!(self.config.color_mode, ColorMode::Ansi16 | ColorMode::Full16),
            base: self.palette.darkest(),
            inverse: self.config.invert.then(|| self.palette.inverse_table()),
        }
    }

    /// Palette search and glyph selection for a perturbed colour.
    fn choose(&self, rgb: [i32; 3], search: &Search) -> CellChoice {
        let n = self.ramp.len() as i32;
        let eligible = |i: usize| search.eligible[i];

        if self.config.color_mode.is_full() {
            let (bg, fg) = if search.hsv {
                let (bg, fg) = HsvLookup::global().nearest_two(rgb[0], rgb[1], rgb[2]);
                (usize::from(bg), usize::from(fg))
            } else {
                self.palette.nearest_two(rgb, eligible)
            };
            let fg_rgb = self.palette.rgb(fg);
            let bg_rgb = self.palette.rgb(bg);

            // Mélange i parts fg / (2n-1-i) parts bg, distance L1.
            let parts = 2 * n - 1;
            let mut glyph = 0;
            let mut best = i64::MAX;
            for i in 0..n - 1 {
                let dist: i64 = (0..3)
                    .map(|c| {
                        let blend = i * fg_rgb[c] + (parts - i) * bg_rgb[c];
                        i64::from(rgb[c] * parts - blend).abs()
                    })
                    .sum();
                if dist < best {
                    best = dist;
                    glyph = i;
                }
            }

            let rendered =
                std::array::from_fn(|c| (fg_rgb[c] * glyph + bg_rgb[c] * (parts - glyph)) / parts);
            CellChoice {
                fg,
                bg,
                glyph: glyph as usize,
                rendered,
            }
        } else {
            let matched = if search.hsv {
                usize::from(HsvLookup::global().nearest_two(rgb[0], rgb[1], rgb[2]).0)
            } else {
                self.palette.nearest(rgb, eligible)
            };
            let lum = rgb[0].max(rgb[1]).max(rgb[2]);
            let glyph = (lum * n / (MAX_CHANNEL + 1)).clamp(0, n - 1);
            let c = self.palette.rgb(matched);
            let rendered = std::array::from_fn(|k| c[k] * glyph / (n - 1));
            CellChoice {
                fg: matched,
                bg: search.base,
                glyph: glyph as usize,
                rendered,
            }
        }
    }
}

/// Source interval `[from, to)` for destination offset `offset` out of
/// `delta` cells, at least one pixel wide.
#[inline(always)]
fn source_span(offset: i64, size: i64, delta: i64) -> (i64, i64) {
    let from = offset * size / delta;
    let mut to = (offset + 1) * size / delta;
    if to == from {
        to += 1;
    }
    (from, to)
}

/// Palette index as stored on the canvas; palettes hold at most 256 entries.
#[inline(always)]
fn canvas_index(index: usize) -> u8 {
    u8::try_from(index).unwrap_or(u8::MAX)
}

#[cfg(test)]
mod tests {
    use ca_core::grid::{Cell, CellGrid};

    use super::*;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> (Bitmap, Vec<u8>) {
        let bitmap = Bitmap::rgba32(width, height).unwrap();
        let pixels = rgba.repeat((width * height) as usize);
        (bitmap, pixels)
    }

    #[test]
    fn source_span_covers_at_least_one_pixel() {
        assert_eq!(source_span(0, 2, 4), (0, 1));
        assert_eq!(source_span(1, 2, 4), (0, 1));
        assert_eq!(source_span(3, 2, 4), (1, 2));
        assert_eq!(source_span(1, 10, 2), (5, 10));
    }

    #[test]
    fn white_fills_with_white_background() {
        let (bitmap, pixels) = solid(4, 4, [255, 255, 255, 255]);
        let mut grid = CellGrid::new(2, 2);
        let mut config = DitherConfig::default();
        config.algorithm = DitherAlgorithm::None;
        BitmapDither::new(config).draw_bitmap(&mut grid, 0, 0, 1, 1, &bitmap, &pixels);
        for cell in grid.cells() {
            assert_eq!(cell.bg, 15);
            assert_eq!(cell.ch, ' ');
        }
    }

    #[test]
    fn black_stays_black() {
        let (bitmap, pixels) = solid(3, 3, [0, 0, 0, 255]);
        let mut grid = CellGrid::new(3, 3);
        BitmapDither::default().draw_bitmap(&mut grid, 0, 0, 2, 2, &bitmap, &pixels);
        for cell in grid.cells() {
            assert_eq!((cell.bg, cell.ch), (0, ' '));
        }
    }

    #[test]
    fn mono_mode_uses_black_background() {
        let (bitmap, pixels) = solid(2, 2, [200, 30, 30, 255]);
        let mut grid = CellGrid::new(2, 1);
        let mut engine = BitmapDither::default();
        engine.set_color_mode("mono");
        engine.set_algorithm("none");
        engine.draw_bitmap(&mut grid, 0, 0, 1, 0, &bitmap, &pixels);
        for cell in grid.cells() {
            assert_eq!(cell.bg, 0);
            assert!(cell.fg == 0 || cell.fg == 15);
        }
    }

    #[test]
    fn gray_mode_only_writes_greys() {
        let (bitmap, pixels) = solid(8, 8, [30, 200, 90, 255]);
        let mut grid = CellGrid::new(8, 4);
        let mut engine = BitmapDither::default();
        engine.set_color_mode("fullgray");
        engine.draw_bitmap(&mut grid, 0, 0, 7, 3, &bitmap, &pixels);
        for cell in grid.cells() {
            assert!([0, 7, 8, 15].contains(&cell.fg), "fg {}", cell.fg);
            assert!([0, 7, 8, 15].contains(&cell.bg), "bg {}", cell.bg);
        }
    }

    #[test]
    fn nearest_centre_pixel_without_antialias() {
        // Left half black, right half white; one cell per half.
        let bitmap = Bitmap::rgba32(4, 1).unwrap();
        let mut pixels = Vec::new();
        for x in 0..4 {
            let v = if x < 2 { 0 } else { 255 };
            pixels.extend_from_slice(&[v, v, v, 255]);
        }
        let mut grid = CellGrid::new(2, 1);
        let mut engine = BitmapDither::default();
        engine.set_antialias(false);
        engine.set_algorithm("none");
        engine.draw_bitmap(&mut grid, 0, 0, 1, 0, &bitmap, &pixels);
        assert_eq!(grid.get(0, 0).map(|c| c.bg), Some(0));
        assert_eq!(grid.get(1, 0).map(|c| c.bg), Some(15));
    }

    #[test]
    fn brightness_zero_renders_black() {
        let (bitmap, pixels) = solid(2, 2, [255, 255, 255, 255]);
        let mut grid = CellGrid::new(1, 1);
        let mut engine = BitmapDither::default();
        engine.set_brightness(0.0);
        engine.set_contrast(1.0);
        engine.draw_bitmap(&mut grid, 0, 0, 0, 0, &bitmap, &pixels);
        assert_eq!(grid.get(0, 0).map(|c| (c.bg, c.ch)), Some((0, ' ')));
    }

    #[test]
    fn tone_setters_are_clamped() {
        let mut engine = BitmapDither::default();
        engine.set_brightness(9.0);
        engine.set_contrast(-1.0);
        assert!((engine.brightness() - 4.0).abs() < f32::EPSILON);
        assert!(engine.contrast().abs() < f32::EPSILON);
    }

    #[test]
    fn charset_switch_changes_glyphs() {
        let mut engine = BitmapDither::default();
        engine.set_charset("BLOCKS");
        assert_eq!(engine.charset(), Charset::Blocks);
        engine.set_charset("nope");
        assert_eq!(engine.charset(), Charset::Ascii);
    }

    #[test]
    fn hsv_matcher_draws_pure_red_as_red() {
        let (bitmap, pixels) = solid(2, 2, [255, 0, 0, 255]);
        let mut grid = CellGrid::new(1, 1);
        let mut engine = BitmapDither::default();
        engine.set_matcher(MatchMode::Hsv);
        engine.set_algorithm("none");
        engine.draw_bitmap(&mut grid, 0, 0, 0, 0, &bitmap, &pixels);
        let cell = grid.get(0, 0).copied().unwrap_or_default();
        assert!(cell.bg == 4 || cell.bg == 12, "bg {}", cell.bg);
    }

    #[test]
    fn getters_reflect_setters() {
        let mut engine = BitmapDither::default();
        engine.set_antialias_name("none");
        engine.set_invert(true);
        engine.set_seed(42);
        engine.set_color_mode("8");
        assert!(!engine.antialias());
        assert!(engine.invert());
        assert_eq!(engine.seed(), 42);
        assert_eq!(engine.color_mode(), ColorMode::Ansi8);
    }

    fn ansi_plus_olive() -> ColorPalette {
        let mut colors = ca_core::palette::ANSI16_RGB.to_vec();
        colors.push([0x330, 0x990, 0x660]);
        ColorPalette::new(&colors).unwrap()
    }

    fn black_white() -> ColorPalette {
        ColorPalette::new(&[[0, 0, 0], [0xfff, 0xfff, 0xfff]]).unwrap()
    }

    #[test]
    fn entries_past_sixteen_reach_the_canvas() {
        let (bitmap, pixels) = solid(1, 1, [0x33, 0x99, 0x66, 255]);
        let mut engine = BitmapDither::with_palette(DitherConfig::default(), ansi_plus_olive());
        engine.set_algorithm("none");
        let mut grid = CellGrid::new(1, 1);
        engine.draw_bitmap(&mut grid, 0, 0, 0, 0, &bitmap, &pixels);
        let cell = grid.get(0, 0).copied().unwrap_or_default();
        assert_eq!(cell.bg, 16);
        assert_eq!(cell.ch, ' ');
    }

    #[test]
    fn hsv_matcher_ignored_for_custom_palette() {
        let (bitmap, pixels) = solid(1, 1, [0x33, 0x99, 0x66, 255]);
        let mut engine = BitmapDither::with_palette(DitherConfig::default(), ansi_plus_olive());
        engine.set_algorithm("none");
        engine.set_matcher(MatchMode::Hsv);
        let mut grid = CellGrid::new(1, 1);
        engine.draw_bitmap(&mut grid, 0, 0, 0, 0, &bitmap, &pixels);
        assert_eq!(grid.get(0, 0).map(|c| c.bg), Some(16));
    }

    #[test]
    fn mono_on_black_white_palette_draws_white() {
        let (bitmap, pixels) = solid(1, 1, [255, 255, 255, 255]);
        let mut engine = BitmapDither::with_palette(DitherConfig::default(), black_white());
        engine.set_color_mode("mono");
        engine.set_algorithm("none");
        let mut grid = CellGrid::new(1, 1);
        engine.draw_bitmap(&mut grid, 0, 0, 0, 0, &bitmap, &pixels);
        assert_eq!(
            grid.get(0, 0).copied(),
            Some(Cell {
                ch: '#',
                fg: 1,
                bg: 0,
            })
        );
    }

    #[test]
    fn single_search_background_is_darkest_entry() {
        // Noir en dernière position.
        let palette = ColorPalette::new(&[[0xfff, 0xfff, 0xfff], [0, 0, 0]]).unwrap();
        let (bitmap, pixels) = solid(1, 1, [255, 255, 255, 255]);
        let mut engine = BitmapDither::with_palette(DitherConfig::default(), palette);
        engine.set_color_mode("gray");
        engine.set_algorithm("none");
        let mut grid = CellGrid::new(1, 1);
        engine.draw_bitmap(&mut grid, 0, 0, 0, 0, &bitmap, &pixels);
        assert_eq!(grid.get(0, 0).map(|c| (c.fg, c.bg)), Some((0, 1)));
    }

    #[test]
    fn invert_on_custom_palette_swaps_black_and_white() {
        let (bitmap, pixels) = solid(1, 1, [255, 255, 255, 255]);
        let mut engine = BitmapDither::with_palette(DitherConfig::default(), black_white());
        engine.set_algorithm("none");
        let mut grid = CellGrid::new(1, 1);
        engine.draw_bitmap(&mut grid, 0, 0, 0, 0, &bitmap, &pixels);
        assert_eq!(grid.get(0, 0).map(|c| (c.fg, c.bg)), Some((0, 1)));

        engine.set_invert(true);
        engine.draw_bitmap(&mut grid, 0, 0, 0, 0, &bitmap, &pixels);
        assert_eq!(grid.get(0, 0).map(|c| (c.fg, c.bg)), Some((1, 0)));
    }

    #[test]
    fn partially_offscreen_region_only_touches_canvas() {
        let (bitmap, pixels) = solid(4, 4, [255, 255, 255, 255]);
        let mut grid = CellGrid::new(3, 3);
        grid.fill(Cell {
            ch: 'z',
            fg: 1,
            bg: 1,
        });
        BitmapDither::default().draw_bitmap(&mut grid, 1, 1, 5, 5, &bitmap, &pixels);
        assert_eq!(grid.get(0, 0).map(|c| c.ch), Some('z'));
        assert_eq!(grid.get(2, 0).map(|c| c.ch), Some('z'));
        assert_eq!(grid.get(1, 1).map(|c| c.bg), Some(15));
        assert_eq!(grid.get(2, 2).map(|c| c.bg), Some(15));
    }
}
