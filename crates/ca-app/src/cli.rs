use std::path::PathBuf;

use anyhow::Result;
use ca_core::charset::Charset;
use ca_core::config::{ColorMode, DitherAlgorithm, DitherConfig, MatchMode, antialias_from_name};
use ca_core::error::CoreError;
use clap::{Parser, ValueEnum};

/// Largeur par défaut, en cellules, quand ni --width ni --height ne sont donnés.
pub const DEFAULT_WIDTH: u16 = 60;

/// Assumed font cell: 6 pixels wide, 10 pixels high.
const FONT_W: u64 = 6;
const FONT_H: u64 = 10;

/// img2cells — convertit une image en art de caractères colorés.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image source (PNG, JPEG, BMP, GIF).
    #[arg(required_unless_present = "list")]
    pub image: Option<PathBuf>,

    /// Largeur du résultat en cellules.
    #[arg(short = 'W', long)]
    pub width: Option<u16>,

    /// Hauteur du résultat en cellules.
    #[arg(short = 'H', long)]
    pub height: Option<u16>,

    /// Tramage : none, ordered2, ordered4, ordered8, random, fstein.
    #[arg(short, long)]
    pub dither: Option<String>,

    /// Rampe de glyphes : ascii, shades, blocks.
    #[arg(long)]
    pub charset: Option<String>,

    /// Mode couleur : mono, gray, 8, 16, fullgray, full8, full16.
    #[arg(long)]
    pub color: Option<String>,

    /// Antialiasing : none, prefilter.
    #[arg(long)]
    pub antialias: Option<String>,

    /// Recherche de couleur : rgb, hsv.
    #[arg(long)]
    pub matcher: Option<String>,

    /// Gamma (> 0).
    #[arg(short, long)]
    pub gamma: Option<f32>,

    /// Luminosité [0.0, 4.0].
    #[arg(short, long)]
    pub brightness: Option<f32>,

    /// Contraste [0.0, 4.0].
    #[arg(short, long)]
    pub contrast: Option<f32>,

    /// Inverser les couleurs.
    #[arg(long, default_value_t = false)]
    pub invert: bool,

    /// Graine du tramage aléatoire.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Format de sortie.
    #[arg(short, long, value_enum, default_value_t = Format::Ansi)]
    pub format: Format,

    /// Fichier de configuration TOML (section [dither]).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Lister les options disponibles et quitter.
    #[arg(long, default_value_t = false)]
    pub list: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Coloured ANSI escapes.
    Ansi,
    /// Glyphs only, LF line endings.
    Utf8,
    /// Glyphs only, CRLF line endings.
    Utf8cr,
    /// Inline ratatui viewport.
    Tui,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut DitherConfig) {
        if let Some(ref name) = self.dither {
            config.algorithm = DitherAlgorithm::from_name(name);
        }
        if let Some(ref name) = self.charset {
            config.charset = Charset::from_name(name);
        }
        if let Some(ref name) = self.color {
            config.color_mode = ColorMode::from_name(name);
        }
        if let Some(ref name) = self.antialias {
            config.antialias = antialias_from_name(name);
        }
        if let Some(ref name) = self.matcher {
            config.matcher = MatchMode::from_name(name);
        }
        if let Some(v) = self.gamma {
            config.gamma = v;
        }
        if let Some(v) = self.brightness {
            config.brightness = v;
        }
        if let Some(v) = self.contrast {
            config.contrast = v;
        }
        if let Some(v) = self.seed {
            config.seed = v;
        }
        if self.invert {
            config.invert = true;
        }
        config.clamp_all();
    }

    /// Output size in cells for an image of `img_w` × `img_h` pixels.
    ///
    /// # Errors
    /// Returns an error for an empty image.
    pub fn output_size(&self, img_w: u32, img_h: u32) -> Result<(u16, u16)> {
        output_size(self.width, self.height, img_w, img_h)
    }
}

/// Derive the missing dimension assuming a 6×10 font; a zero counts as
/// missing. Both results are at least 1.
///
/// # Errors
/// Returns [`CoreError::InvalidDimensions`] for an empty image.
pub fn output_size(
    cols: Option<u16>,
    lines: Option<u16>,
    img_w: u32,
    img_h: u32,
) -> Result<(u16, u16)> {
    if img_w == 0 || img_h == 0 {
        return Err(CoreError::InvalidDimensions {
            width: img_w,
            height: img_h,
            pitch: 0,
        }
        .into());
    }
    let (w, h) = (u64::from(img_w), u64::from(img_h));
    let cols = cols.filter(|&c| c > 0).map(u64::from);
    let lines = lines.filter(|&l| l > 0).map(u64::from);

    let (cols, lines) = match (cols, lines) {
        (Some(c), Some(l)) => (c, l),
        (Some(c), None) => (c, c * h * FONT_W / w / FONT_H),
        (None, Some(l)) => (l * w * FONT_H / h / FONT_W, l),
        (None, None) => {
            let c = u64::from(DEFAULT_WIDTH);
            (c, c * h * FONT_W / w / FONT_H)
        }
    };

    let clamp = |v: u64| v.clamp(1, u64::from(u16::MAX)) as u16;
    Ok((clamp(cols), clamp(lines)))
}

/// `(name, description)` listing of every enumerated option.
#[must_use]
pub fn option_listing() -> String {
    let mut out = String::new();
    let mut section = |title: &str, rows: Vec<(&str, &str)>| {
        out.push_str(title);
        out.push('\n');
        for (name, desc) in rows {
            out.push_str(&format!("  {name:<10} {desc}\n"));
        }
    };
    section(
        "dither:",
        DitherAlgorithm::ALL.iter().map(|a| (a.name(), a.describe())).collect(),
    );
    section(
        "color:",
        ColorMode::ALL.iter().map(|m| (m.name(), m.describe())).collect(),
    );
    section(
        "charset:",
        Charset::ALL.iter().map(|c| (c.name(), c.describe())).collect(),
    );
    section("antialias:", ca_core::config::ANTIALIAS_LIST.to_vec());
    out
}
