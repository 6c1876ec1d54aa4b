// ============================================================
// Layer 3 — Noise Specification
// ============================================================
// Describes HOW labels get corrupted, without doing any
// corruption itself (that is Layer 4's job).
//
// Two noise models are supported:
//   - Symmetric:  a corrupted label is redrawn uniformly over
//     ALL classes. It may land on the true class by chance —
//     noise is "selected for redraw", not "guaranteed changed".
//   - Asymmetric: classes are paired up once per synthesis run
//     and every corrupted sample's label is swapped with its
//     partner class. This models structured confusions
//     (e.g. "art" consistently mislabelled as "history").
//
// The (rate, mode) pair also keys the on-disk cache file name,
// so the same spec always resolves to the same frozen noise
// assignment across runs.
//
// Reference: Rust Book §6 (Enums), serde documentation

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DataError;

/// The corruption model applied to selected samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoiseMode {
    /// Redraw uniformly over all classes
    Symmetric,

    /// Swap through a fixed pairwise class transition
    Asymmetric,
}

impl NoiseMode {
    /// Short token used in cache file names (`sym` / `asym`)
    pub fn as_str(&self) -> &'static str {
        match self {
            NoiseMode::Symmetric  => "sym",
            NoiseMode::Asymmetric => "asym",
        }
    }
}

impl fmt::Display for NoiseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoiseMode {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sym" | "symmetric"   => Ok(NoiseMode::Symmetric),
            "asym" | "asymmetric" => Ok(NoiseMode::Asymmetric),
            other => Err(DataError::config(format!("unknown noise mode '{other}'"))),
        }
    }
}

/// A complete noise recipe: what fraction of samples to corrupt
/// and which model to corrupt them with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseSpec {
    /// Fraction of samples whose label is redrawn, in [0, 1]
    pub rate: f64,

    /// Symmetric or asymmetric corruption
    pub mode: NoiseMode,
}

impl NoiseSpec {
    /// Build a spec, rejecting rates outside [0, 1].
    /// A bad rate is a caller bug, not something to clamp silently.
    pub fn new(rate: f64, mode: NoiseMode) -> Result<Self, DataError> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(DataError::config(format!(
                "noise rate {rate} outside [0, 1]"
            )));
        }
        Ok(Self { rate, mode })
    }

    /// How many of `n` samples get corrupted: floor(rate * n)
    pub fn noisy_count(&self, n: usize) -> usize {
        (self.rate * n as f64).floor() as usize
    }
}
