// ============================================================
// Layer 5 — Noise Report
// ============================================================
// Measures how much corruption a noisy-label assignment
// actually applied, per view, by comparing it against the
// clean labels.
//
// Why measure when the rate is already known?
//   - Symmetric noise can redraw a sample's ORIGINAL class by
//     chance, so the observed flip rate is below the nominal
//     rate by roughly rate/class_count.
//   - A stale cache generated with a different rate would
//     silently skew an experiment; the report makes that
//     visible before any training time is spent.
//
// Output file: noise_report.csv, written next to the cache.
//
// Example CSV output:
//   view,samples,flipped,flip_rate
//   img,2173,756,0.347906
//   txt,2173,761,0.350207
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::errors::DataError;

/// Corruption statistics for a single view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewNoiseStats {
    /// Modality name ("img", "txt", ...)
    pub view: String,

    /// Total samples in the view
    pub samples: usize,

    /// Samples whose assigned label differs from the clean label
    pub flipped: usize,
}

impl ViewNoiseStats {
    /// Observed corruption fraction in [0, 1]
    pub fn flip_rate(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.flipped as f64 / self.samples as f64
        }
    }
}

/// Per-view corruption report for one noisy-label assignment.
#[derive(Debug, Clone)]
pub struct NoiseReport {
    pub per_view: Vec<ViewNoiseStats>,
}

impl NoiseReport {
    /// Compare clean labels against an assignment, view by view.
    /// `names` supplies the modality names for the report rows.
    pub fn compare(
        names: &[String],
        clean: &[Vec<i64>],
        noisy: &[Vec<i64>],
    ) -> Result<Self, DataError> {
        if clean.len() != noisy.len() || clean.len() != names.len() {
            return Err(DataError::shape(format!(
                "report inputs disagree: {} names, {} clean views, {} noisy views",
                names.len(),
                clean.len(),
                noisy.len()
            )));
        }

        let mut per_view = Vec::with_capacity(clean.len());
        for (v, name) in names.iter().enumerate() {
            if clean[v].len() != noisy[v].len() {
                return Err(DataError::shape(format!(
                    "view '{}': {} clean labels vs {} noisy labels",
                    name,
                    clean[v].len(),
                    noisy[v].len()
                )));
            }

            let flipped = clean[v]
                .iter()
                .zip(&noisy[v])
                .filter(|(a, b)| a != b)
                .count();

            per_view.push(ViewNoiseStats {
                view:    name.clone(),
                samples: clean[v].len(),
                flipped,
            });
        }

        Ok(Self { per_view })
    }

    /// Log one line per view at info level
    pub fn log(&self) {
        for s in &self.per_view {
            tracing::info!(
                "view '{}': {}/{} labels flipped ({:.2}%)",
                s.view,
                s.flipped,
                s.samples,
                s.flip_rate() * 100.0,
            );
        }
    }

    /// Write the report as CSV into `dir/noise_report.csv`
    /// and return the written path.
    pub fn write_csv(&self, dir: &Path) -> Result<PathBuf, DataError> {
        fs::create_dir_all(dir)?;
        let path = dir.join("noise_report.csv");

        let mut f = fs::File::create(&path)?;
        writeln!(f, "view,samples,flipped,flip_rate")?;
        for s in &self.per_view {
            writeln!(
                f,
                "{},{},{},{:.6}",
                s.view,
                s.samples,
                s.flipped,
                s.flip_rate(),
            )?;
        }

        tracing::debug!("wrote noise report to '{}'", path.display());
        Ok(path)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("view{i}")).collect()
    }

    #[test]
    fn test_counts_flips_per_view() {
        let clean = vec![vec![0i64, 1, 2, 3], vec![0i64, 1, 2, 3]];
        let noisy = vec![vec![0i64, 1, 2, 3], vec![3i64, 1, 0, 3]];

        let report = NoiseReport::compare(&names(2), &clean, &noisy).unwrap();
        assert_eq!(report.per_view[0].flipped, 0);
        assert_eq!(report.per_view[1].flipped, 2);
        assert!((report.per_view[1].flip_rate() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let clean = vec![vec![0i64, 1]];
        let noisy = vec![vec![0i64, 1, 2]];
        let err   = NoiseReport::compare(&names(1), &clean, &noisy).unwrap_err();
        assert!(matches!(err, DataError::ShapeMismatch(_)));
    }

    #[test]
    fn test_csv_written() {
        let dir    = tempfile::tempdir().unwrap();
        let clean  = vec![vec![0i64, 1]];
        let noisy  = vec![vec![1i64, 1]];
        let report = NoiseReport::compare(&names(1), &clean, &noisy).unwrap();

        let path = report.write_csv(dir.path()).unwrap();
        let body = fs::read_to_string(path).unwrap();
        assert!(body.starts_with("view,samples,flipped,flip_rate"));
        assert!(body.contains("view0,2,1,0.5"));
    }
}
