use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// Referenced file does not exist.
    #[error("Fichier introuvable : {path}")]
    FileNotFound {
        /// Path that was not found.
        path: String,
    },

    /// Bits-per-pixel value outside 8/16/24/32.
    #[error("Profondeur non supportée : {bpp} bpp")]
    UnsupportedDepth {
        /// The rejected depth.
        bpp: u32,
    },

    /// Invalid width/height/pitch for a bitmap.
    #[error("Dimensions invalides : {width}×{height} (pitch {pitch})")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
        /// Row stride in bytes.
        pitch: usize,
    },
}
