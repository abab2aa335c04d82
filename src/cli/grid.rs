//! Grid inspection (`pipdeck grid`).

use anyhow::Result;
use clap::Args;
use pipdeck::{DeckConfig, LayoutGrid};

use crate::cli::common::{DEFAULT_CONFIG, GridPresetArg};
use crate::cli::utils::load_config;

/// Arguments for `pipdeck grid`.
#[derive(Args, Debug)]
pub struct GridArgs {
    /// Deck configuration (JSON).
    #[arg(short = 'c', long = "config", default_value = DEFAULT_CONFIG)]
    pub config: std::path::PathBuf,
    /// Override the configured preset.
    #[arg(long, value_enum)]
    pub preset: Option<GridPresetArg>,
}

/// Print every named anchor and coordinate of the resolved grid.
pub fn handle(args: GridArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    print!("{}", describe(&config, args.preset));
    Ok(())
}

fn describe(config: &DeckConfig, preset: Option<GridPresetArg>) -> String {
    let mut grid_config = config.grid.clone();
    if let Some(preset) = preset {
        grid_config.preset = preset.into();
    }
    let grid = LayoutGrid::new(config.card, &grid_config);
    let geometry = grid.geometry();

    let mut output = format!(
        "Card {}x{} px, cell {} px, preset {:?}\n",
        geometry.width(),
        geometry.height(),
        geometry.cell,
        grid_config.preset
    );
    output.push_str("Points:\n");
    for (name, point) in grid.points() {
        output.push_str(&format!("  {:<28} {:>8.2} {:>8.2}\n", name, point.x, point.y));
    }
    output.push_str("X:\n");
    for (name, x) in grid.xs() {
        output.push_str(&format!("  {:<28} {:>8.2}\n", name, x));
    }
    output.push_str("Y:\n");
    for (name, y) in grid.ys() {
        output.push_str(&format!("  {:<28} {:>8.2}\n", name, y));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_points_for_selected_preset() {
        let config =
            DeckConfig::from_json_str(r#"{ "suits": [] }"#, ".").expect("config parses");
        let standard = describe(&config, None);
        assert!(standard.starts_with("Card 256x384 px, cell 64 px, preset Standard"));
        assert!(standard.contains("TOP_CENTER"));
        assert!(!standard.contains("TOP_THIRD_CENTER"));

        let thirds = describe(&config, Some(GridPresetArg::Thirds));
        assert!(thirds.contains("TOP_THIRD_CENTER"));
    }
}
