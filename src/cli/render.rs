//! Rendering command (`pipdeck render`).

use anyhow::{Context, Result, anyhow};
use clap::Args;
use log::info;
use pipdeck::{DeckFilter, MANIFEST_FILE, Manifest, Rank, render_deck};

use crate::cli::common::DeckPaths;
use crate::cli::utils::{load_config, output_dir, parse_rank};

/// Args for `pipdeck render`.
#[derive(Args, Debug, Default)]
pub struct RenderArgs {
    #[command(flatten)]
    pub paths: DeckPaths,
    /// Only render this suit.
    #[arg(long)]
    pub suit: Option<String>,
    /// Only render this rank (2-14 or J/Q/K/A).
    #[arg(long, value_parser = parse_rank)]
    pub rank: Option<Rank>,
    /// Skip writing manifest.json.
    #[arg(long = "no-manifest")]
    pub no_manifest: bool,
}

/// Execute the render command.
pub fn handle(args: RenderArgs) -> Result<()> {
    let config = load_config(&args.paths.config)?;
    if let Some(suit) = args.suit.as_deref() {
        if config.suit(suit).is_none() {
            return Err(anyhow!(
                "suit '{}' is not defined in {}",
                suit,
                args.paths.config.display()
            ));
        }
    }

    let out_dir = output_dir(&args.paths.config, args.paths.out.as_deref());
    let filter = DeckFilter {
        suit: args.suit,
        rank: args.rank,
    };
    let partial = filter != DeckFilter::default();
    info!(
        "rendering {} from {}",
        if partial { "selection" } else { "deck" },
        args.paths.config.display()
    );
    let entries = render_deck(&config, &out_dir, &filter)
        .with_context(|| format!("rendering into {} failed", out_dir.display()))?;

    if !args.no_manifest && !partial {
        let manifest = Manifest::new(config.digest()?, entries.clone());
        manifest.save(&out_dir.join(MANIFEST_FILE))?;
    }

    println!(
        "Rendered {} card image(s) to {}",
        entries.len(),
        out_dir.display()
    );
    Ok(())
}
