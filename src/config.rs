//! Declarative deck description loaded once per run.
//!
//! The file is JSON. Relative asset paths are resolved against the directory
//! that holds the config file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::color::Color;
use crate::error::{CardError, Result};
use crate::grid::{CardGeometry, GridConfig, LayoutGrid, Point};
use crate::rank::Rank;

/// Complete, immutable input for a render run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckConfig {
    #[serde(default)]
    pub background: Color,
    /// TrueType/OpenType font for labels; the built-in bitmap face is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<PathBuf>,
    #[serde(default)]
    pub card: CardGeometry,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub index: IndexConfig,
    /// Stroke the cell grid onto every card.
    #[serde(default)]
    pub debug_grid: bool,
    pub suits: Vec<Suit>,
    #[serde(default)]
    pub ranks: Vec<RankLayout>,
    #[serde(skip)]
    base_dir: PathBuf,
}

/// One suit of the deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suit {
    pub name: String,
    pub color: Color,
    pub icon: IconSource,
}

/// Where a suit (or pip) icon comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconSource {
    /// Text drawn in the suit color, e.g. `"♠"`.
    Glyph(String),
    /// Raster file drawn as-is.
    Image(PathBuf),
}

/// Anchor names for the two corner indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub top: String,
    pub bottom: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            top: "TOP_LEFT_CORNER".to_string(),
            bottom: "BOTTOM_RIGHT_CORNER".to_string(),
        }
    }
}

/// Pip layout for a single rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankLayout {
    pub rank: Rank,
    #[serde(default)]
    pub pips: Vec<Pip>,
}

/// How a pip is drawn. Any `type` other than `IMAGE` is a glyph pip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PipKind {
    /// Raster stretched into a named bounding box.
    Image,
    /// Suit icon centred on an anchor.
    #[default]
    #[serde(other)]
    Suit,
}

/// A named grid anchor or a literal pixel point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PipPosition {
    Named(String),
    Literal(Point),
}

/// Named X/Y coordinates bounding an `IMAGE` pip. A missing name leaves the
/// pip unresolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipBounds {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<String>,
}

impl PipBounds {
    /// Bounds with all four names set.
    pub fn named(left: &str, top: &str, right: &str, bottom: &str) -> Self {
        Self {
            left: Some(left.to_string()),
            top: Some(top.to_string()),
            right: Some(right.to_string()),
            bottom: Some(bottom.to_string()),
        }
    }
}

/// One placement instruction within a rank layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pip {
    #[serde(rename = "type", default)]
    pub kind: PipKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<PipPosition>,
    /// Clockwise rotation in degrees.
    #[serde(default)]
    pub rotate: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,
    /// Shorthand for a 180° rotation; wins over `rotate`.
    #[serde(default)]
    pub down: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<PipBounds>,
    /// Asset for `IMAGE` pips; defaults to `<suit color hex>.png`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<PathBuf>,
}

impl Pip {
    /// Glyph pip at a named anchor.
    pub fn at<S: Into<String>>(position: S) -> Self {
        Self {
            position: Some(PipPosition::Named(position.into())),
            ..Self::default()
        }
    }

    pub fn rotated(mut self, degrees: f32) -> Self {
        self.rotate = degrees;
        self
    }

    /// Effective rotation in degrees.
    pub fn rotation(&self) -> f32 {
        if self.down { 180.0 } else { self.rotate }
    }
}

impl DeckConfig {
    /// Read and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| CardError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let config: DeckConfig =
            serde_json::from_str(&raw).map_err(|source| CardError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.with_base_dir(base_dir).validated()
    }

    /// Parse a config held in memory; relative paths resolve against `base_dir`.
    pub fn from_json_str(raw: &str, base_dir: impl Into<PathBuf>) -> Result<Self> {
        let config: DeckConfig =
            serde_json::from_str(raw).map_err(|source| CardError::ConfigParse {
                path: PathBuf::from("<memory>"),
                source,
            })?;
        config.with_base_dir(base_dir).validated()
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    fn validated(self) -> Result<Self> {
        if self.card.dimensions().is_none() {
            return Err(CardError::InvalidGeometry {
                cell: self.card.cell,
                columns: self.card.columns,
                rows: self.card.rows,
            });
        }
        for suit in &self.suits {
            let name = suit.name.trim();
            if name.is_empty() || name.contains(['/', '\\']) || name != suit.name {
                return Err(CardError::InvalidSuitName(suit.name.clone()));
            }
        }
        Ok(self)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve a config-relative path.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir().join(path)
        }
    }

    /// Build the grid for this config's geometry.
    pub fn layout_grid(&self) -> LayoutGrid {
        LayoutGrid::new(self.card, &self.grid)
    }

    /// Pips for `rank`, or `None` when the rank has no layout entry.
    pub fn layout_for(&self, rank: Rank) -> Option<&[Pip]> {
        self.ranks
            .iter()
            .find(|layout| layout.rank == rank)
            .map(|layout| layout.pips.as_slice())
    }

    pub fn suit(&self, name: &str) -> Option<&Suit> {
        self.suits.iter().find(|suit| suit.name == name)
    }

    /// SHA-256 of the canonical JSON form, used to tie a manifest to its config.
    pub fn digest(&self) -> Result<String> {
        let canonical = serde_json::to_vec(self).map_err(|source| CardError::ConfigParse {
            path: self.base_dir.clone(),
            source,
        })?;
        Ok(format!("{:x}", Sha256::digest(&canonical)))
    }
}
