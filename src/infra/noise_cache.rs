// ============================================================
// Layer 5 — Noisy-Label Cache
// ============================================================
// Persists the synthetic noisy-label assignment so an
// experiment can be re-run with EXACTLY the same corruption.
//
// Why cache at all?
//   Noise injection is random. If every run redrew the noise,
//   no two training runs would ever see the same labels and
//   results could not be compared. The first run freezes the
//   assignment on disk; every later run loads it verbatim.
//
// File format:
//   A JSON array with one inner array per view, each holding
//   one integer label per sample in original load order:
//     [[3, 0, 7, ...],   ← view 0
//      [3, 1, 7, ...]]   ← view 1
//
// File naming convention (under the dataset's directory):
//   noise_labels_<rate>_<mode>.json    e.g. noise_labels_0.4_sym.json
//
// A cache file that exists but cannot be parsed, or whose
// per-view lengths disagree with the loaded split, is reported
// as CacheCorrupt — the CALLER decides whether to delete and
// regenerate or to abort. This module never deletes anything.
//
// Reference: Rust Book §9 (Error Handling)
//            serde_json documentation

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::errors::DataError;
use crate::domain::noise_spec::NoiseSpec;

/// Handle to one noisy-label cache file.
pub struct NoiseCache {
    /// Full path to the JSON cache file
    path: PathBuf,
}

impl NoiseCache {
    /// Point the cache at an explicit file path
    /// (the --noise-file CLI override).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Build the conventional cache path for a dataset directory
    /// and noise spec: `<dir>/noise_labels_<rate>_<mode>.json`.
    ///
    /// The rate is formatted with `{}` so 0.4 becomes "0.4",
    /// not "0.40" — the file name doubles as the cache key and
    /// must be stable across runs.
    pub fn for_spec(dataset_dir: &Path, spec: &NoiseSpec) -> Self {
        let file = format!("noise_labels_{}_{}.json", spec.rate, spec.mode);
        Self { path: dataset_dir.join(file) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a frozen assignment already exists on disk
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the cached per-view label assignment.
    ///
    /// I/O failure is an Io error; a file that reads fine but
    /// does not parse as `Vec<Vec<i64>>` is CacheCorrupt.
    pub fn load(&self) -> Result<Vec<Vec<i64>>, DataError> {
        let raw = fs::read_to_string(&self.path)?;

        serde_json::from_str(&raw).map_err(|e| DataError::CacheCorrupt {
            path:   self.path.clone(),
            reason: format!("not a per-view label array: {e}"),
        })
    }

    /// Persist a freshly generated assignment.
    /// Creates the parent directory if needed so a bare data
    /// root works on first run.
    pub fn save(&self, labels: &[Vec<i64>]) -> Result<(), DataError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // to_vec_pretty keeps the file diffable and inspectable
        let json = serde_json::to_vec_pretty(labels).map_err(|e| {
            DataError::config(format!("cannot serialise noisy labels: {e}"))
        })?;
        fs::write(&self.path, json)?;

        tracing::info!("saved noisy labels to '{}'", self.path.display());
        Ok(())
    }
}
