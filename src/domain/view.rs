// ============================================================
// Layer 3 — View Domain Types
// ============================================================
// A "view" is one modality of a multi-view sample: the image
// features, the text features, the audio features, and so on.
// Within one split every view holds the same N samples in the
// same order, but each view may use a different feature
// dimensionality D_v.
//
//   View 0 (image): N × 4096 features, N labels
//   View 1 (text):  N × 300  features, N labels
//
// Labels are per-view because the raw corpora annotate each
// modality independently — the views USUALLY agree on a
// sample's class, but the pipeline must not assume they do.
//
// The loader contract guarantees labels are normalised to
// 0-based non-negative integers. That guarantee is what makes
// the -1 "unknown" sentinel of the container's soft reset
// unambiguous, so it is validated here rather than trusted.
//
// Reference: Rust Book §5 (Structs)

use serde::{Deserialize, Serialize};

use crate::domain::errors::DataError;

/// One modality's samples: a (N × D_v) feature table plus a
/// length-N integer label array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct View {
    /// Modality name, kept for logs and reports ("img", "txt", ...)
    pub name: String,

    /// Row-major feature table — one Vec<f32> per sample
    pub features: Vec<Vec<f32>>,

    /// One class label per sample, 0-based and non-negative
    pub labels: Vec<i64>,
}

impl View {
    pub fn new(
        name:     impl Into<String>,
        features: Vec<Vec<f32>>,
        labels:   Vec<i64>,
    ) -> Self {
        Self { name: name.into(), features, labels }
    }

    /// Number of samples in this view
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Feature dimensionality D_v (0 for an empty view)
    pub fn feature_dim(&self) -> usize {
        self.features.first().map_or(0, |row| row.len())
    }

    /// Check the internal invariants of a single view:
    ///   - one label per feature row
    ///   - all feature rows have the same width
    ///   - labels are non-negative (loader normalisation held)
    pub fn validate(&self) -> Result<(), DataError> {
        if self.features.len() != self.labels.len() {
            return Err(DataError::shape(format!(
                "view '{}': {} feature rows but {} labels",
                self.name,
                self.features.len(),
                self.labels.len()
            )));
        }

        let dim = self.feature_dim();
        if let Some(bad) = self.features.iter().position(|row| row.len() != dim) {
            return Err(DataError::shape(format!(
                "view '{}': row {} has {} features, expected {}",
                self.name,
                bad,
                self.features[bad].len(),
                dim
            )));
        }

        if let Some(&bad) = self.labels.iter().find(|&&l| l < 0) {
            return Err(DataError::config(format!(
                "view '{}': negative label {} — labels must be 0-based",
                self.name, bad
            )));
        }

        Ok(())
    }
}

/// The canonical multi-view bundle every loader produces:
/// an ordered list of views sharing one sample count.
#[derive(Debug, Clone)]
pub struct MultiViewSplit {
    views: Vec<View>,
}

impl MultiViewSplit {
    /// Bundle views after checking the cross-view invariants.
    /// An empty view list or disagreeing sample counts are
    /// rejected here so downstream code never has to re-check.
    pub fn new(views: Vec<View>) -> Result<Self, DataError> {
        if views.is_empty() {
            return Err(DataError::config("a split needs at least one view"));
        }

        for view in &views {
            view.validate()?;
        }

        let n = views[0].len();
        if let Some(bad) = views.iter().find(|v| v.len() != n) {
            return Err(DataError::shape(format!(
                "view '{}' has {} samples but view '{}' has {}",
                bad.name,
                bad.len(),
                views[0].name,
                n
            )));
        }

        Ok(Self { views })
    }

    pub fn views(&self) -> &[View] {
        &self.views
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    /// Shared sample count N
    pub fn sample_count(&self) -> usize {
        self.views[0].len()
    }

    /// Per-view label arrays, cloned out for the noise synthesizer
    pub fn labels(&self) -> Vec<Vec<i64>> {
        self.views.iter().map(|v| v.labels.clone()).collect()
    }

    /// Consume the bundle into (per-view features, per-view labels) —
    /// the shape the dataset container is built from.
    pub fn into_arrays(self) -> (Vec<Vec<Vec<f32>>>, Vec<Vec<i64>>) {
        let mut data   = Vec::with_capacity(self.views.len());
        let mut labels = Vec::with_capacity(self.views.len());
        for view in self.views {
            data.push(view.features);
            labels.push(view.labels);
        }
        (data, labels)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn view(name: &str, n: usize, dim: usize) -> View {
        View::new(
            name,
            (0..n).map(|i| vec![i as f32; dim]).collect(),
            (0..n).map(|i| (i % 3) as i64).collect(),
        )
    }

    #[test]
    fn test_valid_bundle() {
        let split = MultiViewSplit::new(vec![view("img", 5, 4), view("txt", 5, 2)]).unwrap();
        assert_eq!(split.view_count(), 2);
        assert_eq!(split.sample_count(), 5);
    }

    #[test]
    fn test_views_may_differ_in_dim_but_not_count() {
        let err = MultiViewSplit::new(vec![view("img", 5, 4), view("txt", 4, 2)]).unwrap_err();
        assert!(matches!(err, DataError::ShapeMismatch(_)));
    }

    #[test]
    fn test_label_feature_length_mismatch() {
        let mut v = view("img", 3, 2);
        v.labels.pop();
        assert!(matches!(v.validate(), Err(DataError::ShapeMismatch(_))));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let mut v = view("img", 3, 2);
        v.features[1].push(9.0);
        assert!(matches!(v.validate(), Err(DataError::ShapeMismatch(_))));
    }

    #[test]
    fn test_negative_labels_rejected() {
        let mut v = view("img", 3, 2);
        v.labels[0] = -1;
        assert!(matches!(v.validate(), Err(DataError::Config(_))));
    }

    #[test]
    fn test_empty_bundle_rejected() {
        assert!(MultiViewSplit::new(Vec::new()).is_err());
    }
}
