// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `prepare` — loads a split and injects (or reloads)
//      synthetic label noise, freezing it on disk
//   2. `inspect` — measures an existing frozen noise cache
//      against the clean labels
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, InspectArgs, PrepareArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "cross-modal-noise",
    version = "0.1.0",
    about = "Load multi-view retrieval datasets and inject synthetic label noise."
)]
pub struct Cli {
    /// The subcommand to run (prepare or inspect)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Prepare(args) => Self::run_prepare(args),
            Commands::Inspect(args) => Self::run_inspect(args),
        }
    }

    /// Handles the `prepare` subcommand.
    /// Converts CLI args into a PrepareConfig and hands off to Layer 2.
    fn run_prepare(args: PrepareArgs) -> Result<()> {
        use crate::application::prepare_use_case::PrepareUseCase;

        tracing::info!(
            "preparing '{}' ({} split) at noise rate {}",
            args.dataset,
            args.split,
            args.noise_rate
        );

        // Convert CLI args → application config (separates presentation from domain)
        let use_case = PrepareUseCase::new(args.into());
        use_case.execute()?;

        println!("Preparation complete. Noisy labels frozen on disk.");
        Ok(())
    }

    /// Handles the `inspect` subcommand.
    /// Prints per-view corruption statistics for a frozen cache.
    fn run_inspect(args: InspectArgs) -> Result<()> {
        use crate::application::inspect_use_case::InspectUseCase;

        let use_case = InspectUseCase::new(args.into());
        let report   = use_case.execute()?;

        for stats in &report.per_view {
            println!(
                "view '{}': {}/{} labels flipped ({:.2}%)",
                stats.view,
                stats.flipped,
                stats.samples,
                stats.flip_rate() * 100.0,
            );
        }
        Ok(())
    }
}
