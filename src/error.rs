use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by configuration loading and card rendering.
///
/// Unresolved layout references are not errors; they skip the pip.
#[derive(Debug, Error)]
pub enum CardError {
    #[error("rank {0} is outside 2..=14")]
    InvalidRank(u8),
    #[error("invalid color '{0}'")]
    InvalidColor(String),
    #[error("suit name '{0}' is not usable in a file name")]
    InvalidSuitName(String),
    #[error("card of {columns}x{rows} cells at {cell} px is empty or too large")]
    InvalidGeometry { cell: u32, columns: u32, rows: u32 },
    #[error("failed to read config {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to load font {}", path.display())]
    Font {
        path: PathBuf,
        #[source]
        source: FontLoadError,
    },
    #[error("failed to load image asset {}", path.display())]
    Asset {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to encode PNG")]
    Encode(#[source] image::ImageError),
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Underlying cause of a font that could not be used.
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("not a TrueType/OpenType font")]
    Invalid(#[from] ab_glyph::InvalidFont),
}

pub type Result<T, E = CardError> = std::result::Result<T, E>;
