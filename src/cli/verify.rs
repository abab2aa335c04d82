//! Verification workflow (`pipdeck verify`).

use anyhow::{Result, anyhow};
use clap::Args;
use log::warn;
use pipdeck::{MANIFEST_FILE, Manifest, verify_output};

use crate::cli::common::DeckPaths;
use crate::cli::utils::{load_config, output_dir};

/// Arguments for `pipdeck verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub paths: DeckPaths,
    /// Treat a stale or drifted manifest as an error too.
    #[arg(long)]
    pub strict: bool,
}

/// Execute the verify command.
pub fn handle(args: VerifyArgs) -> Result<()> {
    let config = load_config(&args.paths.config)?;
    let out_dir = output_dir(&args.paths.config, args.paths.out.as_deref());
    let report = verify_output(&config, &out_dir)?;

    for file in &report.mismatched {
        println!("changed  {}", file);
    }
    for file in &report.missing {
        println!("missing  {}", file);
    }

    let manifest_path = out_dir.join(MANIFEST_FILE);
    let mut manifest_ok = true;
    if manifest_path.exists() {
        let manifest = Manifest::load(&manifest_path)?;
        if manifest.config_digest != config.digest()? {
            warn!(
                "{} was written for a different config",
                manifest_path.display()
            );
            manifest_ok = false;
        }
        let diff = manifest.compare(&report.rendered);
        for file in &diff.mismatched {
            println!("manifest digest differs  {}", file);
        }
        for file in &diff.missing {
            println!("manifest lists unknown   {}", file);
        }
        for file in &diff.unexpected {
            println!("manifest does not list   {}", file);
        }
        manifest_ok &= diff.is_clean();
    } else {
        warn!("no manifest at {}", manifest_path.display());
    }

    if !report.is_clean() {
        return Err(anyhow!(
            "{} card(s) differ from a fresh render in {}",
            report.mismatched.len() + report.missing.len(),
            out_dir.display()
        ));
    }
    if args.strict && !manifest_ok {
        return Err(anyhow!("manifest at {} is out of date", manifest_path.display()));
    }
    println!(
        "Verified {} card image(s) in {}",
        report.rendered.len(),
        out_dir.display()
    );
    Ok(())
}
