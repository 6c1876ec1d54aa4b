// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `prepare` and `inspect`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//
// Defaults mirror the original experiment configuration:
// dataset wiki, data root ./, rate 0.6, symmetric noise.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::inspect_use_case::InspectConfig;
use crate::application::prepare_use_case::PrepareConfig;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a split and inject (or reload) synthetic label noise
    Prepare(PrepareArgs),

    /// Report what an existing frozen noise cache actually did
    Inspect(InspectArgs),
}

/// All arguments for the `prepare` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// Dataset name, matched loosely: wiki, nus, inria,
    /// xmedianet2views, xmedianet4view
    #[arg(long, default_value = "wiki")]
    pub dataset: String,

    /// Directory containing the per-dataset subdirectories
    #[arg(long, default_value = "./")]
    pub root_dir: String,

    /// Which split to load: train, valid or test
    /// (only train receives noise)
    #[arg(long, default_value = "train")]
    pub split: String,

    /// Fraction of samples whose label is corrupted, in [0, 1]
    #[arg(long, default_value_t = 0.6)]
    pub noise_rate: f64,

    /// Noise model: sym (uniform redraw) or asym (pairwise swap)
    #[arg(long, default_value = "sym")]
    pub noise_mode: String,

    /// Explicit noisy-label cache file; defaults to
    /// noise_labels_<rate>_<mode>.json under the dataset dir
    #[arg(long)]
    pub noise_file: Option<String>,
}

/// Convert CLI PrepareArgs into the application-layer config.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<PrepareArgs> for PrepareConfig {
    fn from(a: PrepareArgs) -> Self {
        PrepareConfig {
            dataset:    a.dataset,
            root_dir:   a.root_dir,
            split:      a.split,
            noise_rate: a.noise_rate,
            noise_mode: a.noise_mode,
            noise_file: a.noise_file,
        }
    }
}

/// All arguments for the `inspect` command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Dataset name (same loose matching as prepare)
    #[arg(long, default_value = "wiki")]
    pub dataset: String,

    /// Directory containing the per-dataset subdirectories
    #[arg(long, default_value = "./")]
    pub root_dir: String,

    /// Rate the cache was generated with (keys the file name)
    #[arg(long, default_value_t = 0.6)]
    pub noise_rate: f64,

    /// Mode the cache was generated with: sym or asym
    #[arg(long, default_value = "sym")]
    pub noise_mode: String,

    /// Explicit noisy-label cache file to inspect
    #[arg(long)]
    pub noise_file: Option<String>,
}

impl From<InspectArgs> for InspectConfig {
    fn from(a: InspectArgs) -> Self {
        InspectConfig {
            dataset:    a.dataset,
            root_dir:   a.root_dir,
            noise_rate: a.noise_rate,
            noise_mode: a.noise_mode,
            noise_file: a.noise_file,
        }
    }
}
