//! Procedural playing-card face renderer.
//!
//! A [`DeckConfig`] describes suits, per-rank pip layouts and the named layout
//! grid. [`CardRenderer`] turns one (rank, suit) pair into an RGBA face and PNG
//! bytes; [`render_deck`] walks every suit and rank and writes
//! `<suit>_<rank:02>.png` files.

mod color;
mod config;
mod deck;
mod error;
mod graphics;
mod grid;
mod manifest;
mod rank;
mod render;

pub use color::Color;
pub use config::{
    DeckConfig, IconSource, IndexConfig, Pip, PipBounds, PipKind, PipPosition, RankLayout, Suit,
};
pub use deck::{DeckFilter, RenderedCard, VerifyReport, for_each_card, render_deck, verify_output};
pub use error::{CardError, FontLoadError, Result};
pub use graphics::{Canvas, Typeface};
pub use grid::{CardGeometry, GridConfig, GridPreset, LayoutGrid, Point};
pub use manifest::{MANIFEST_FILE, Manifest, ManifestDiff, ManifestEntry, digest_bytes};
pub use rank::{Rank, card_file_name, rank_label};
pub use render::{CardRenderer, Icon, encode_png, inked_pixels};
