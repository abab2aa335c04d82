//! Convenience helpers shared across command handlers.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pipdeck::{DeckConfig, Rank};

/// Directory name used when `--out` is not given.
const DEFAULT_OUT_DIR: &str = "cards";

/// Load a deck config, attaching path context to any error.
pub fn load_config(path: &Path) -> Result<DeckConfig> {
    DeckConfig::load(path).with_context(|| format!("failed to load deck config {}", path.display()))
}

/// Resolve the output directory: explicit `--out`, else `cards/` beside the config.
pub fn output_dir(config_path: &Path, out: Option<&Path>) -> PathBuf {
    match out {
        Some(dir) => dir.to_path_buf(),
        None => config_path
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(DEFAULT_OUT_DIR),
    }
}

/// Clap-friendly rank parser accepting `2`..`14` or a face letter.
pub fn parse_rank(input: &str) -> Result<Rank, String> {
    let value = match input.trim().to_ascii_uppercase().as_str() {
        "J" => 11,
        "Q" => 12,
        "K" => 13,
        "A" => 14,
        other => other
            .parse::<u8>()
            .map_err(|_| format!("'{input}' is not a rank"))?,
    };
    Rank::new(value).map_err(|err| err.to_string())
}
