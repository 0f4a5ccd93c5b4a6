use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::charset::Charset;
use crate::color::ansi;

/// Configuration complète du tramage, figée pendant un appel de rendu.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use ca_core::config::{ColorMode, DitherAlgorithm, DitherConfig};
/// let config = DitherConfig::default();
/// assert_eq!(config.algorithm, DitherAlgorithm::FloydSteinberg);
/// assert_eq!(config.color_mode, ColorMode::Full16);
/// assert!(config.antialias);
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct DitherConfig {
    /// Moyenne de tous les pixels couverts par une cellule (sinon pixel central).
    pub antialias: bool,
    /// Nombre de couleurs par cellule et sous-ensemble de palette autorisé.
    pub color_mode: ColorMode,
    /// Rampe de glyphes.
    pub charset: Charset,
    /// Algorithme de tramage.
    pub algorithm: DitherAlgorithm,
    /// Inverse les indices de couleur écrits (15 - index).
    pub invert: bool,
    /// Exposant gamma appliqué au bitmap source (> 0).
    pub gamma: f32,
    /// Multiplicateur de luminosité [0.0, 4.0]. 1.0 = neutre.
    pub brightness: f32,
    /// Contraste autour du point médian [0.0, 4.0]. 1.0 = neutre.
    pub contrast: f32,
    /// Méthode de recherche de la couleur la plus proche.
    pub matcher: MatchMode,
    /// Graine du tramage aléatoire.
    pub seed: u64,
}

impl Default for DitherConfig {
    fn default() -> Self {
        Self {
            antialias: true,
            color_mode: ColorMode::Full16,
            charset: Charset::Ascii,
            algorithm: DitherAlgorithm::FloydSteinberg,
            invert: false,
            gamma: 1.0,
            brightness: 1.0,
            contrast: 1.0,
            matcher: MatchMode::Rgb,
            seed: 0,
        }
    }
}

impl DitherConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        if self.gamma.is_nan() || self.gamma <= 0.0 {
            log::warn!("gamma {} invalide, retour à 1.0", self.gamma);
            self.gamma = 1.0;
        }
        self.gamma = self.gamma.clamp(0.01, 10.0);
        self.brightness = self.brightness.clamp(0.0, 4.0);
        self.contrast = self.contrast.clamp(0.0, 4.0);
    }

    /// True when brightness and contrast leave colours untouched.
    #[must_use]
    pub fn is_neutral_tone(&self) -> bool {
        (self.brightness - 1.0).abs() < f32::EPSILON && (self.contrast - 1.0).abs() < f32::EPSILON
    }
}

/// Antialiasing selected by name: `"none"` disables it, `"prefilter"`,
/// `"default"` and unknown names enable it.
///
/// # Example
/// ```
/// use ca_core::config::antialias_from_name;
/// assert!(!antialias_from_name("None"));
/// assert!(antialias_from_name("prefilter"));
/// ```
#[must_use]
pub fn antialias_from_name(name: &str) -> bool {
    match name.to_ascii_lowercase().as_str() {
        "none" => false,
        "prefilter" | "default" => true,
        _ => {
            log::warn!("antialiasing inconnu '{name}', utilisation de 'prefilter'");
            true
        }
    }
}

/// Antialiasing methods as `(name, description)` pairs.
pub const ANTIALIAS_LIST: [(&str, &str); 2] = [
    ("none", "No antialiasing"),
    ("prefilter", "Prefilter antialiasing"),
];

/// Colour mode: how many palette searches per cell and which entries are
/// eligible.
///
/// # Example
/// ```
/// use ca_core::config::ColorMode;
/// assert_eq!(ColorMode::from_name("full8"), ColorMode::Full8);
/// assert!(ColorMode::Full8.is_full());
/// assert!(!ColorMode::Ansi16.is_full());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum ColorMode {
    /// White on black.
    #[serde(rename = "mono")]
    Mono,
    /// Grayscale on black.
    #[serde(rename = "gray")]
    Gray,
    /// 8 colours on black.
    #[serde(rename = "8")]
    Ansi8,
    /// 16 colours on black.
    #[serde(rename = "16")]
    Ansi16,
    /// Two grays per cell.
    #[serde(rename = "fullgray")]
    FullGray,
    /// Two of 8 colours per cell.
    #[serde(rename = "full8")]
    Full8,
    /// Two of 16 colours per cell.
    #[default]
    #[serde(rename = "full16")]
    Full16,
}

impl ColorMode {
    /// Every mode, in listing order.
    pub const ALL: [ColorMode; 7] = [
        ColorMode::Mono,
        ColorMode::Gray,
        ColorMode::Ansi8,
        ColorMode::Ansi16,
        ColorMode::FullGray,
        ColorMode::Full8,
        ColorMode::Full16,
    ];

    /// Resolve a case-insensitive name; `"default"` and unknown names give
    /// [`ColorMode::Full16`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.name() == lower)
            .unwrap_or_else(|| {
                if lower != "default" {
                    log::warn!("mode couleur inconnu '{name}', utilisation de 'full16'");
                }
                Self::Full16
            })
    }

    /// Canonical configuration name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Mono => "mono",
            Self::Gray => "gray",
            Self::Ansi8 => "8",
            Self::Ansi16 => "16",
            Self::FullGray => "fullgray",
            Self::Full8 => "full8",
            Self::Full16 => "full16",
        }
    }

    /// Human-readable description.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::Mono => "white on black",
            Self::Gray => "grayscale on black",
            Self::Ansi8 => "8 colours on black",
            Self::Ansi16 => "16 colours on black",
            Self::FullGray => "full grayscale",
            Self::Full8 => "full 8 colours",
            Self::Full16 => "full 16 colours",
        }
    }

    /// Two colours per cell (background + foreground search).
    #[must_use]
    pub fn is_full(self) -> bool {
        matches!(self, Self::FullGray | Self::Full8 | Self::Full16)
    }

    /// Whether ANSI colour `index` may be chosen in this mode. Other
    /// palettes go through [`ColorPalette::mode_mask`](crate::palette::ColorPalette::mode_mask).
    #[inline(always)]
    #[must_use]
    pub fn allows(self, index: usize) -> bool {
        const GRAYS: [usize; 4] = [
            ansi::BLACK as usize,
            ansi::DARKGRAY as usize,
            ansi::LIGHTGRAY as usize,
            ansi::WHITE as usize,
        ];
        match self {
            Self::Mono => index == usize::from(ansi::BLACK) || index == usize::from(ansi::WHITE),
            Self::Gray | Self::FullGray => GRAYS.contains(&index),
            Self::Ansi8 | Self::Full8 => index < 8,
            Self::Ansi16 | Self::Full16 => true,
        }
    }
}

/// Dithering algorithm.
///
/// # Example
/// ```
/// use ca_core::config::DitherAlgorithm;
/// assert_eq!(DitherAlgorithm::from_name("ordered4"), DitherAlgorithm::Ordered4);
/// assert_eq!(DitherAlgorithm::from_name("bogus"), DitherAlgorithm::FloydSteinberg);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum DitherAlgorithm {
    /// Nearest colour, no perturbation.
    #[serde(rename = "none")]
    None,
    /// 2×2 Bayer matrix.
    #[serde(rename = "ordered2")]
    Ordered2,
    /// 4×4 Bayer matrix.
    #[serde(rename = "ordered4")]
    Ordered4,
    /// 8×8 Bayer matrix.
    #[serde(rename = "ordered8")]
    Ordered8,
    /// Uniform random threshold.
    #[serde(rename = "random")]
    Random,
    /// Floyd-Steinberg error diffusion.
    #[default]
    #[serde(rename = "fstein")]
    FloydSteinberg,
}

impl DitherAlgorithm {
    /// Every algorithm, in listing order.
    pub const ALL: [DitherAlgorithm; 6] = [
        DitherAlgorithm::None,
        DitherAlgorithm::Ordered2,
        DitherAlgorithm::Ordered4,
        DitherAlgorithm::Ordered8,
        DitherAlgorithm::Random,
        DitherAlgorithm::FloydSteinberg,
    ];

    /// Resolve a case-insensitive name; `"default"` and unknown names give
    /// [`DitherAlgorithm::FloydSteinberg`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|a| a.name() == lower)
            .unwrap_or_else(|| {
                if lower != "default" {
                    log::warn!("algorithme inconnu '{name}', utilisation de 'fstein'");
                }
                Self::FloydSteinberg
            })
    }

    /// Canonical configuration name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Ordered2 => "ordered2",
            Self::Ordered4 => "ordered4",
            Self::Ordered8 => "ordered8",
            Self::Random => "random",
            Self::FloydSteinberg => "fstein",
        }
    }

    /// Human-readable description.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::None => "no dithering",
            Self::Ordered2 => "2x2 ordered dithering",
            Self::Ordered4 => "4x4 ordered dithering",
            Self::Ordered8 => "8x8 ordered dithering",
            Self::Random => "random dithering",
            Self::FloydSteinberg => "Floyd-Steinberg dithering",
        }
    }
}

/// Nearest-colour search strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Weighted Euclidean search over the palette.
    #[default]
    Rgb,
    /// Precomputed HSV bucket lookup (fixed ANSI palette only).
    Hsv,
}

impl MatchMode {
    /// Resolve a case-insensitive name; unknown names give [`MatchMode::Rgb`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "hsv" => Self::Hsv,
            "rgb" | "default" => Self::Rgb,
            _ => {
                log::warn!("recherche couleur inconnue '{name}', utilisation de 'rgb'");
                Self::Rgb
            }
        }
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    dither: Option<DitherSection>,
}

/// Dither section of the TOML config, all fields optional for partial override.
///
/// Enumerated options are read as names so unknown values fall back to the
/// default instead of failing the whole file.
#[derive(Deserialize)]
struct DitherSection {
    antialias: Option<bool>,
    color_mode: Option<String>,
    charset: Option<String>,
    algorithm: Option<String>,
    invert: Option<bool>,
    gamma: Option<f32>,
    brightness: Option<f32>,
    contrast: Option<f32>,
    matcher: Option<String>,
    seed: Option<u64>,
}

/// Parse TOML text and merge it over the defaults.
///
/// # Errors
/// Returns an error if the text is not valid TOML for this schema.
///
/// # Example
/// ```
/// use ca_core::config::{parse_config, DitherAlgorithm};
/// let config = parse_config("[dither]\nalgorithm = \"ordered8\"\n").unwrap();
/// assert_eq!(config.algorithm, DitherAlgorithm::Ordered8);
/// ```
pub fn parse_config(content: &str) -> Result<DitherConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;
    let mut config = DitherConfig::default();

    if let Some(d) = file.dither {
        if let Some(v) = d.antialias {
            config.antialias = v;
        }
        if let Some(v) = d.color_mode {
            config.color_mode = ColorMode::from_name(&v);
        }
        if let Some(v) = d.charset {
            config.charset = Charset::from_name(&v);
        }
        if let Some(v) = d.algorithm {
            config.algorithm = DitherAlgorithm::from_name(&v);
        }
        if let Some(v) = d.invert {
            config.invert = v;
        }
        if let Some(v) = d.gamma {
            config.gamma = v;
        }
        if let Some(v) = d.brightness {
            config.brightness = v;
        }
        if let Some(v) = d.contrast {
            config.contrast = v;
        }
        if let Some(v) = d.matcher {
            config.matcher = MatchMode::from_name(&v);
        }
        if let Some(v) = d.seed {
            config.seed = v;
        }
    }

    config.clamp_all();
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use ca_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<DitherConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Configuration invalide dans {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn unknown_names_fall_back_to_defaults() {
        let config = parse_config(
            "[dither]\nalgorithm = \"sierra\"\ncolor_mode = \"cmyk\"\ncharset = \"emoji\"\n",
        )
        .unwrap();
        assert_eq!(config.algorithm, DitherAlgorithm::FloydSteinberg);
        assert_eq!(config.color_mode, ColorMode::Full16);
        assert_eq!(config.charset, Charset::Ascii);
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let config = parse_config("[dither]\ninvert = true\n").unwrap();
        assert!(config.invert);
        assert!(config.antialias);
        assert_eq!(config.matcher, MatchMode::Rgb);
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(parse_config("").unwrap(), DitherConfig::default());
    }

    #[test]
    fn clamps_numeric_fields() {
        let config =
            parse_config("[dither]\ngamma = -2.0\nbrightness = 9.0\ncontrast = -1.0\n").unwrap();
        assert!((config.gamma - 1.0).abs() < f32::EPSILON);
        assert!((config.brightness - 4.0).abs() < f32::EPSILON);
        assert!(config.contrast.abs() < f32::EPSILON);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(parse_config("[dither\n").is_err());
        assert!(parse_config("[dither]\ngamma = \"high\"\n").is_err());
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[dither]\ncharset = \"blocks\"\nseed = 42").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.charset, Charset::Blocks);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn shipped_default_file_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/default.toml");
        assert_eq!(load_config(&path).unwrap(), DitherConfig::default());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_config(Path::new("/nonexistent/cellart.toml")).is_err());
    }

    #[test]
    fn mode_eligibility() {
        assert!(ColorMode::Mono.allows(0) && ColorMode::Mono.allows(15));
        assert!(!ColorMode::Mono.allows(7));
        assert!(ColorMode::FullGray.allows(8) && !ColorMode::FullGray.allows(4));
        assert!(ColorMode::Full8.allows(7) && !ColorMode::Full8.allows(8));
        assert!((0..16).all(|i| ColorMode::Full16.allows(i)));
    }

    #[test]
    fn names_round_trip() {
        for mode in ColorMode::ALL {
            assert_eq!(ColorMode::from_name(mode.name()), mode);
        }
        for algo in DitherAlgorithm::ALL {
            assert_eq!(DitherAlgorithm::from_name(algo.name()), algo);
        }
        assert_eq!(ColorMode::from_name("DEFAULT"), ColorMode::Full16);
    }

    #[test]
    fn serde_uses_option_names() {
        let text = toml::to_string(&DitherConfig::default()).unwrap();
        assert!(text.contains("algorithm = \"fstein\""));
        assert!(text.contains("color_mode = \"full16\""));
        let back: DitherConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, DitherConfig::default());
    }
}
