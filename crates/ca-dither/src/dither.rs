//! Algorithmique de tramage : matrices de Bayer, bruit aléatoire et tampon
//! de diffusion d'erreur Floyd-Steinberg.
//!
//! Un `Ditherer` est créé au début d'un rendu et jeté à la fin : aucun état
//! ne survit entre deux appels.

use ca_core::config::DitherAlgorithm;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Matrice de Bayer 2x2. Normalisée sur 4 niveaux (0-3).
pub const BAYER_2X2: [[u8; 2]; 2] = [[0, 2], [3, 1]];

/// Matrice de Bayer 4x4. Normalisée sur 16 niveaux (0-15).
pub const BAYER_4X4: [[u8; 4]; 4] = [[0, 8, 2, 10], [12, 4, 14, 6], [3, 11, 1, 9], [15, 7, 13, 5]];

/// Matrice de Bayer 8x8. Normalisée sur 64 niveaux (0-63).
pub const BAYER_8X8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// Threshold values span `0..DITHER_RANGE`.
pub const DITHER_RANGE: i32 = 0x100;

/// Neutral threshold, returned by the non-perturbing algorithms.
pub const DITHER_MIDPOINT: i32 = 0x80;

/// Multiplier turning a threshold offset into a 12-bit channel offset.
pub const DITHER_SCALE: i32 = 4;

/// Side of an ordered-dither matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BayerOrder {
    Two,
    Four,
    Eight,
}

impl BayerOrder {
    /// Matrix side length.
    #[must_use]
    pub fn size(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Four => 4,
            Self::Eight => 8,
        }
    }

    /// Threshold at (row, col), scaled to `0..DITHER_RANGE`.
    #[inline(always)]
    #[must_use]
    pub fn threshold(self, row: usize, col: usize) -> i32 {
        let n = self.size();
        let level = match self {
            Self::Two => BAYER_2X2[row % n][col % n],
            Self::Four => BAYER_4X4[row % n][col % n],
            Self::Eight => BAYER_8X8[row % n][col % n],
        };
        i32::from(level) * DITHER_RANGE / (n * n) as i32
    }
}

/// Curseur dans une matrice de Bayer : une ligne par scanline, une colonne
/// par cellule.
#[derive(Clone, Debug)]
pub struct OrderedDither {
    order: BayerOrder,
    row: usize,
    cursor: usize,
}

/// Per-render dithering strategy.
///
/// Threshold-based algorithms are driven through [`Ditherer::init_line`],
/// [`Ditherer::get`] and [`Ditherer::advance`]. Floyd-Steinberg ignores them
/// and works through an [`ErrorCarry`] owned by the caller.
///
/// # Example
/// ```
/// use ca_core::config::DitherAlgorithm;
/// use ca_dither::dither::{Ditherer, DITHER_MIDPOINT};
///
/// let mut d = Ditherer::new(DitherAlgorithm::Ordered2, 0);
/// d.init_line(1);
/// assert_eq!(d.get(), 0xc0);
/// d.advance();
/// assert_eq!(d.get(), 0x40);
///
/// let mut none = Ditherer::new(DitherAlgorithm::None, 0);
/// assert_eq!(none.get(), DITHER_MIDPOINT);
/// ```
#[derive(Clone, Debug)]
pub enum Ditherer {
    /// Constant midpoint.
    None,
    /// Bayer matrix.
    Ordered(OrderedDither),
    /// Uniform noise from a seeded generator.
    Random(StdRng),
    /// Error diffusion; thresholds are neutral.
    FloydSteinberg,
}

impl Ditherer {
    /// Build the ditherer for `algorithm`. `seed` only matters for
    /// [`DitherAlgorithm::Random`].
    #[must_use]
    pub fn new(algorithm: DitherAlgorithm, seed: u64) -> Self {
        let ordered = |order| {
            Self::Ordered(OrderedDither {
                order,
                row: 0,
                cursor: 0,
            })
        };
        match algorithm {
            DitherAlgorithm::None => Self::None,
            DitherAlgorithm::Ordered2 => ordered(BayerOrder::Two),
            DitherAlgorithm::Ordered4 => ordered(BayerOrder::Four),
            DitherAlgorithm::Ordered8 => ordered(BayerOrder::Eight),
            DitherAlgorithm::Random => Self::Random(StdRng::seed_from_u64(seed)),
            DitherAlgorithm::FloydSteinberg => Self::FloydSteinberg,
        }
    }

    /// True for error diffusion.
    #[must_use]
    pub fn is_error_diffusion(&self) -> bool {
        matches!(self, Self::FloydSteinberg)
    }

    /// Start scanline `line`: select matrix row `line mod N`, rewind the cursor.
    pub fn init_line(&mut self, line: u32) {
        if let Self::Ordered(o) = self {
            o.row = line as usize % o.order.size();
            o.cursor = 0;
        }
    }

    /// Current threshold in `0..DITHER_RANGE`.
    #[inline]
    pub fn get(&mut self) -> i32 {
        match self {
            Self::None | Self::FloydSteinberg => DITHER_MIDPOINT,
            Self::Ordered(o) => o.order.threshold(o.row, o.cursor),
            Self::Random(rng) => rng.gen_range(0..DITHER_RANGE),
        }
    }

    /// Move to the next cell of the scanline.
    #[inline]
    pub fn advance(&mut self) {
        if let Self::Ordered(o) = self {
            o.cursor = (o.cursor + 1) % o.order.size();
        }
    }

    /// Signed 12-bit channel offset derived from [`Ditherer::get`].
    #[inline]
    pub fn perturbation(&mut self) -> i32 {
        (self.get() - DITHER_MIDPOINT) * DITHER_SCALE
    }
}

/// Tampon d'erreur Floyd-Steinberg : trois tableaux (R, G, B) de
/// `largeur + 2` entrées, la garde à chaque bout absorbant les voisins
/// hors région.
///
/// Slot `col + 1` holds the error pushed down to column `col` of the next
/// row. The down-right share of a cell is held back until the cell to its
/// right writes its own down share, so it is added rather than overwritten.
/// Allocated per render, zero-initialised.
#[derive(Clone, Debug)]
pub struct ErrorCarry {
    r: Vec<i32>,
    g: Vec<i32>,
    b: Vec<i32>,
    down_right: [i32; 3],
}

impl ErrorCarry {
    /// Zeroed buffer for a region `width` cells wide.
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self {
            r: vec![0; width + 2],
            g: vec![0; width + 2],
            b: vec![0; width + 2],
            down_right: [0; 3],
        }
    }

    /// Error deposited for column `col` by the previous row.
    #[inline(always)]
    #[must_use]
    pub fn deposited(&self, col: usize) -> [i32; 3] {
        let i = col + 1;
        [self.r[i], self.g[i], self.b[i]]
    }

    /// Begin a new row; returns the carry for its first column.
    #[inline]
    pub fn start_row(&mut self) -> [i32; 3] {
        self.down_right = [0; 3];
        self.deposited(0)
    }

    /// Drop any carry pending for column `col`.
    #[inline(always)]
    pub fn clear(&mut self, col: usize) {
        let i = col + 1;
        self.r[i] = 0;
        self.g[i] = 0;
        self.b[i] = 0;
        self.down_right = [0; 3];
    }

    /// Spread `error` from column `col` with weights 7/16 (right),
    /// 3/16 (down-left), 5/16 (down) and 1/16 (down-right).
    ///
    /// Returns the carry for the cell to the right: its own deposit from the
    /// previous row plus 7/16 of `error`.
    #[inline]
    pub fn diffuse(&mut self, col: usize, error: [i32; 3]) -> [i32; 3] {
        let i = col + 1;
        let mut right = [0; 3];
        for (c, buf) in [&mut self.r, &mut self.g, &mut self.b].into_iter().enumerate() {
            let e = error[c];
            right[c] = buf[i + 1] + 7 * e / 16;
            buf[i - 1] += 3 * e / 16;
            buf[i] = 5 * e / 16 + self.down_right[c];
            self.down_right[c] = e / 16;
        }
        right
    }
}
