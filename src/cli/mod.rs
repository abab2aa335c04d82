//! Command-line interface wiring for the `pipdeck` binary.
//!
//! This module owns the clap definitions and delegates execution to one
//! submodule per command.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod common;
pub mod grid;
pub mod render;
pub mod utils;
pub mod verify;

/// Parsed CLI entrypoint for the `pipdeck` binary.
#[derive(Parser, Debug)]
#[command(name = "pipdeck", version, about = "Render playing-card faces from pip layouts")]
pub struct Cli {
    /// Command to execute (defaults to `render`).
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Commands made available to end users.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render every card face to PNG.
    Render(render::RenderArgs),
    /// Re-render in memory and compare against existing output.
    Verify(verify::VerifyArgs),
    /// Print the resolved layout grid.
    Grid(grid::GridArgs),
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Command::Render(args)) => render::handle(args),
        Some(Command::Verify(args)) => verify::handle(args),
        Some(Command::Grid(args)) => grid::handle(args),
        None => render::handle(render::RenderArgs::default()),
    }
}
