//! Shared clap helper types for CLI commands.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use pipdeck::GridPreset;

/// Default config file, looked up relative to the working directory.
pub const DEFAULT_CONFIG: &str = "deck.json";

/// Config and output locations shared by commands that touch card files.
#[derive(Args, Debug, Clone)]
pub struct DeckPaths {
    /// Deck configuration (JSON).
    #[arg(short = 'c', long = "config", default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
    /// Output directory (defaults to `cards/` next to the config).
    #[arg(short = 'o', long = "out")]
    pub out: Option<PathBuf>,
}

impl Default for DeckPaths {
    fn default() -> Self {
        Self {
            config: PathBuf::from(DEFAULT_CONFIG),
            out: None,
        }
    }
}

/// Grid presets selectable from the command line.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum GridPresetArg {
    Standard,
    Thirds,
}

impl From<GridPresetArg> for GridPreset {
    fn from(value: GridPresetArg) -> GridPreset {
        match value {
            GridPresetArg::Standard => GridPreset::Standard,
            GridPresetArg::Thirds => GridPreset::Thirds,
        }
    }
}
