// ============================================================
// Layer 4 — Cross-Modal Dataset Container
// ============================================================
// Holds the per-view feature and label arrays and implements
// Burn's Dataset trait over whatever subset is currently
// "active".
//
// Why an active subset at all?
//   Robust-training loops alternate between epochs: a model
//   scores every sample's label as trustworthy or not, then the
//   next epoch trains on just the confidently-labelled part (or
//   just the rest). Rather than rebuilding the dataset each
//   time, the container keeps the FULL arrays immutable and
//   derives the active arrays from them on every reset:
//
//     Full    — fixed at construction, never mutated
//     Labeled — samples at least one view vouches for;
//               label + confidence resolved across views
//     Unlabeled — the complement; labels left per-view
//     Soft    — everything, but unvouched-for labels replaced
//               by the -1 "unknown" sentinel
//
// reset is called from the orchestrating thread between
// epochs, never concurrently with get. A failed reset leaves
// the active state exactly as it was.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DataError;
use crate::domain::view::MultiViewSplit;

// ─── CrossModalItem ───────────────────────────────────────────────────────────
/// One indexed sample across all active views.
/// `confidence` is present only after a confidence-carrying
/// reset (labeled / unlabeled / soft).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossModalItem {
    /// One feature row per view
    pub features: Vec<Vec<f32>>,

    /// One (possibly noisy) label per view
    pub labels: Vec<i64>,

    /// One confidence score per view, if supplied
    pub confidence: Option<Vec<f32>>,

    /// Position within the ACTIVE view — what the training loop
    /// reports scores against
    pub index: usize,
}

// ─── ConfidenceVotes ──────────────────────────────────────────────────────────
/// The external model's opinion about every sample, per view:
///   votes  — binary {0, 1}: "is this sample's label clean?"
///   scores — the raw confidence in [0, 1] behind each vote
/// Both are indexed [view][sample] over the FULL sample count.
#[derive(Debug, Clone)]
pub struct ConfidenceVotes {
    pub votes:  Vec<Vec<f32>>,
    pub scores: Vec<Vec<f32>>,
}

/// Which partition the next epoch trains on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetMode {
    /// Discard confidence, activate every sample
    Full,

    /// Keep samples at least one view vouches for; resolve one
    /// label and confidence per sample across views
    Labeled,

    /// Keep the complement; labels stay per-view
    Unlabeled,

    /// Keep everything, but mask unvouched-for labels to -1
    Soft,
}

// ─── CrossModalDataset ────────────────────────────────────────────────────────
/// The container itself. Indexed [view][sample] throughout.
pub struct CrossModalDataset {
    // Fixed at construction, never mutated afterwards
    full_data:   Vec<Vec<Vec<f32>>>,
    full_labels: Vec<Vec<i64>>,

    // Derived from full_* by reset; what get/len expose
    active_data:       Vec<Vec<Vec<f32>>>,
    active_labels:     Vec<Vec<i64>>,
    active_confidence: Option<Vec<Vec<f32>>>,
}

impl CrossModalDataset {
    /// Build from per-view arrays. All views must agree on the
    /// sample count and each view needs one label per sample;
    /// the active state starts as the full view.
    pub fn new(
        data:   Vec<Vec<Vec<f32>>>,
        labels: Vec<Vec<i64>>,
    ) -> Result<Self, DataError> {
        if data.is_empty() || data.len() != labels.len() {
            return Err(DataError::shape(format!(
                "{} data views vs {} label views",
                data.len(),
                labels.len()
            )));
        }

        let n = data[0].len();
        for v in 0..data.len() {
            if data[v].len() != n {
                return Err(DataError::shape(format!(
                    "view {v} has {} samples, view 0 has {n}",
                    data[v].len()
                )));
            }
            if labels[v].len() != n {
                return Err(DataError::shape(format!(
                    "view {v} has {} labels for {n} samples",
                    labels[v].len()
                )));
            }
        }

        Ok(Self {
            active_data:       data.clone(),
            active_labels:     labels.clone(),
            active_confidence: None,
            full_data:         data,
            full_labels:       labels,
        })
    }

    /// Wrap a loaded split with an externally supplied label
    /// assignment (usually the noisy one from the synthesizer).
    pub fn from_split(
        split:  MultiViewSplit,
        labels: Vec<Vec<i64>>,
    ) -> Result<Self, DataError> {
        let (data, _clean) = split.into_arrays();
        Self::new(data, labels)
    }

    pub fn view_count(&self) -> usize {
        self.full_data.len()
    }

    /// Sample count of the immutable full view
    pub fn full_len(&self) -> usize {
        self.full_data[0].len()
    }

    /// Sample count of the current active view
    pub fn sample_count(&self) -> usize {
        self.active_data[0].len()
    }

    /// The i-th active sample across all views, or None past the
    /// end. Confidence rides along only when a reset supplied it.
    pub fn get_item(&self, index: usize) -> Option<CrossModalItem> {
        if index >= self.sample_count() {
            return None;
        }

        Some(CrossModalItem {
            features: self.active_data.iter().map(|v| v[index].clone()).collect(),
            labels:   self.active_labels.iter().map(|v| v[index]).collect(),
            confidence: self
                .active_confidence
                .as_ref()
                .map(|conf| conf.iter().map(|v| v[index]).collect()),
            index,
        })
    }

    // ─── reset ────────────────────────────────────────────────────────────────
    /// Re-derive the active arrays from the full arrays.
    ///
    /// `confidence = None` (or mode Full) restores the full view
    /// and drops any stored confidence. The other modes partition
    /// or mask according to the votes — see the module header.
    ///
    /// All inputs are validated before anything is touched, so a
    /// ShapeMismatch error leaves the active state unchanged.
    pub fn reset(
        &mut self,
        confidence: Option<&ConfidenceVotes>,
        mode:       ResetMode,
    ) -> Result<(), DataError> {
        let votes = match (confidence, mode) {
            (None, _) | (_, ResetMode::Full) => {
                self.active_data       = self.full_data.clone();
                self.active_labels     = self.full_labels.clone();
                self.active_confidence = None;
                return Ok(());
            }
            (Some(c), _) => c,
        };

        self.check_votes(votes)?;
        let n = self.full_len();
        let views = self.view_count();

        match mode {
            ResetMode::Full => unreachable!("handled above"),

            ResetMode::Labeled => {
                // A sample is kept iff at least one view votes for
                // it: with binary votes, a cross-view sum > 0.5
                // means "some view said yes".
                let kept = self.vote_partition(votes, |sum| sum > 0.5);

                // Resolve ONE label and confidence per kept sample:
                // whichever view is most confident wins (first view
                // on ties), and its answer is broadcast to every
                // view. Per-view disagreement is discarded here.
                let mut labels = Vec::with_capacity(kept.len());
                let mut conf   = Vec::with_capacity(kept.len());
                for &i in &kept {
                    let mut best = 0;
                    for v in 1..views {
                        if votes.scores[v][i] > votes.scores[best][i] {
                            best = v;
                        }
                    }
                    labels.push(self.full_labels[best][i]);
                    conf.push(votes.scores[best][i]);
                }

                self.active_data       = self.gather_data(&kept);
                self.active_labels     = vec![labels; views];
                self.active_confidence = Some(vec![conf; views]);
            }

            ResetMode::Unlabeled => {
                // The exact complement of Labeled: vote-sum <= 0.5.
                let kept = self.vote_partition(votes, |sum| sum <= 0.5);

                self.active_labels = self
                    .full_labels
                    .iter()
                    .map(|view| kept.iter().map(|&i| view[i]).collect())
                    .collect();
                self.active_confidence = Some(
                    votes
                        .scores
                        .iter()
                        .map(|view| kept.iter().map(|&i| view[i]).collect())
                        .collect(),
                );
                self.active_data = self.gather_data(&kept);
            }

            ResetMode::Soft => {
                // No filtering — every sample stays active, but a
                // view that does NOT vote for a sample has its label
                // masked to the -1 "unknown" sentinel. The loader
                // guarantees real labels are non-negative, so the
                // sentinel cannot collide with a class index.
                let mut labels = Vec::with_capacity(views);
                for v in 0..views {
                    labels.push(
                        (0..n)
                            .map(|i| {
                                if votes.votes[v][i] <= 0.5 {
                                    -1
                                } else {
                                    self.full_labels[v][i]
                                }
                            })
                            .collect(),
                    );
                }

                self.active_data       = self.full_data.clone();
                self.active_labels     = labels;
                self.active_confidence = Some(votes.scores.clone());
            }
        }

        debug_assert!(self.active_views_agree());
        Ok(())
    }

    /// Kept full-array indices, in original order, for samples
    /// whose cross-view vote sum satisfies `keep`.
    fn vote_partition(&self, votes: &ConfidenceVotes, keep: impl Fn(f32) -> bool) -> Vec<usize> {
        (0..self.full_len())
            .filter(|&i| keep(votes.votes.iter().map(|view| view[i]).sum()))
            .collect()
    }

    /// Clone the selected full rows out of every view.
    fn gather_data(&self, kept: &[usize]) -> Vec<Vec<Vec<f32>>> {
        self.full_data
            .iter()
            .map(|view| kept.iter().map(|&i| view[i].clone()).collect())
            .collect()
    }

    /// Votes and scores must both cover every view at the full
    /// sample count. Checked before reset mutates anything.
    fn check_votes(&self, votes: &ConfidenceVotes) -> Result<(), DataError> {
        let views = self.view_count();
        let n     = self.full_len();

        if votes.votes.len() != views || votes.scores.len() != views {
            return Err(DataError::shape(format!(
                "confidence covers {} vote views / {} score views, dataset has {views}",
                votes.votes.len(),
                votes.scores.len()
            )));
        }

        for v in 0..views {
            if votes.votes[v].len() != n || votes.scores[v].len() != n {
                return Err(DataError::shape(format!(
                    "view {v}: {} votes / {} scores for {n} samples",
                    votes.votes[v].len(),
                    votes.scores[v].len()
                )));
            }
        }

        Ok(())
    }

    /// Invariant: all active views expose the same sample count.
    fn active_views_agree(&self) -> bool {
        let n = self.active_data[0].len();
        self.active_data.iter().all(|v| v.len() == n)
            && self.active_labels.iter().all(|v| v.len() == n)
            && self
                .active_confidence
                .as_ref()
                .map_or(true, |conf| conf.iter().all(|v| v.len() == n))
    }
}

// ─── Burn Dataset Trait Implementation ────────────────────────────────────────
// This is what lets Burn's DataLoader iterate the container:
// it calls .get(index) and .len() on the active view.
impl Dataset<CrossModalItem> for CrossModalDataset {
    fn get(&self, index: usize) -> Option<CrossModalItem> {
        self.get_item(index)
    }

    fn len(&self) -> usize {
        self.sample_count()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    /// 2 views × 5 samples, distinguishable features and labels
    fn dataset() -> CrossModalDataset {
        let data = vec![
            (0..5).map(|i| vec![i as f32, 0.0]).collect(),
            (0..5).map(|i| vec![i as f32, 1.0]).collect(),
        ];
        let labels = vec![
            vec![0i64, 1, 2, 3, 4],
            vec![5i64, 6, 7, 8, 9],
        ];
        CrossModalDataset::new(data, labels).unwrap()
    }

    /// The worked example from the partitioning design:
    /// vote-sum = [1, 0, 2, 1, 0] → labeled {0, 2, 3}, unlabeled {1, 4}
    fn votes() -> ConfidenceVotes {
        ConfidenceVotes {
            votes: vec![
                vec![1.0, 0.0, 1.0, 0.0, 0.0],
                vec![0.0, 0.0, 1.0, 1.0, 0.0],
            ],
            scores: vec![
                vec![0.9, 0.2, 0.4, 0.1, 0.3],
                vec![0.3, 0.1, 0.8, 0.7, 0.2],
            ],
        }
    }

    #[test]
    fn test_mismatched_construction_rejected() {
        let data: Vec<Vec<Vec<f32>>> = vec![vec![vec![1.0]; 3], vec![vec![1.0]; 4]];
        let labels = vec![vec![0i64; 3], vec![0i64; 4]];
        assert!(matches!(
            CrossModalDataset::new(data, labels),
            Err(DataError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn test_get_without_confidence() {
        let ds   = dataset();
        let item = ds.get_item(2).unwrap();
        assert_eq!(item.features, vec![vec![2.0, 0.0], vec![2.0, 1.0]]);
        assert_eq!(item.labels, vec![2, 7]);
        assert!(item.confidence.is_none());
        assert_eq!(item.index, 2);
        assert!(ds.get_item(5).is_none());
    }

    #[test]
    fn test_full_reset_is_idempotent() {
        let mut ds = dataset();
        let v      = votes();
        ds.reset(Some(&v), ResetMode::Labeled).unwrap();
        assert_ne!(ds.sample_count(), ds.full_len());

        ds.reset(None, ResetMode::Full).unwrap();
        assert_eq!(ds.sample_count(), 5);
        ds.reset(None, ResetMode::Full).unwrap();
        assert_eq!(ds.sample_count(), 5);
        assert!(ds.get_item(0).unwrap().confidence.is_none());
    }

    #[test]
    fn test_labeled_keeps_vouched_samples_in_order() {
        let mut ds = dataset();
        ds.reset(Some(&votes()), ResetMode::Labeled).unwrap();

        // Kept full indices {0, 2, 3}, original order preserved
        assert_eq!(ds.sample_count(), 3);
        let kept_features: Vec<f32> = (0..3)
            .map(|i| ds.get_item(i).unwrap().features[0][0])
            .collect();
        assert_eq!(kept_features, vec![0.0, 2.0, 3.0]);
    }

    #[test]
    fn test_labeled_resolves_by_highest_score_and_broadcasts() {
        let mut ds = dataset();
        ds.reset(Some(&votes()), ResetMode::Labeled).unwrap();

        // Sample 0: view 0 scores 0.9 > 0.3 → label 0, conf 0.9
        // Sample 2: view 1 scores 0.8 > 0.4 → label 7, conf 0.8
        // Sample 3: view 1 scores 0.7 > 0.1 → label 8, conf 0.7
        let items: Vec<CrossModalItem> =
            (0..3).map(|i| ds.get_item(i).unwrap()).collect();
        assert_eq!(items[0].labels, vec![0, 0]);
        assert_eq!(items[1].labels, vec![7, 7]);
        assert_eq!(items[2].labels, vec![8, 8]);
        assert_eq!(items[0].confidence.as_deref(), Some(&[0.9f32, 0.9][..]));
        assert_eq!(items[1].confidence.as_deref(), Some(&[0.8f32, 0.8][..]));
    }

    #[test]
    fn test_unlabeled_is_the_exact_complement() {
        let mut labeled   = dataset();
        let mut unlabeled = dataset();
        let v = votes();

        labeled.reset(Some(&v), ResetMode::Labeled).unwrap();
        unlabeled.reset(Some(&v), ResetMode::Unlabeled).unwrap();

        // Partition: 3 + 2 = 5, no overlap by construction of the
        // > 0.5 / <= 0.5 split on the same vote sums
        assert_eq!(labeled.sample_count() + unlabeled.sample_count(), 5);

        // Unlabeled keeps full indices {1, 4} with per-view labels
        let item = unlabeled.get_item(0).unwrap();
        assert_eq!(item.features[0][0], 1.0);
        assert_eq!(item.labels, vec![1, 6]);
        let item = unlabeled.get_item(1).unwrap();
        assert_eq!(item.features[0][0], 4.0);
        // Raw per-view scores, filtered to kept indices
        assert_eq!(item.confidence.as_deref(), Some(&[0.3f32, 0.2][..]));
    }

    #[test]
    fn test_soft_masks_unvouched_labels() {
        let mut ds = dataset();
        ds.reset(Some(&votes()), ResetMode::Soft).unwrap();

        // Nothing filtered
        assert_eq!(ds.sample_count(), 5);

        // View 0 votes for samples {0, 2}; everything else → -1.
        // View 1 votes for samples {2, 3}.
        let labels0: Vec<i64> = (0..5).map(|i| ds.get_item(i).unwrap().labels[0]).collect();
        let labels1: Vec<i64> = (0..5).map(|i| ds.get_item(i).unwrap().labels[1]).collect();
        assert_eq!(labels0, vec![0, -1, 2, -1, -1]);
        assert_eq!(labels1, vec![-1, -1, 7, 8, -1]);

        // Confidence is the raw scores, unfiltered
        let item = ds.get_item(4).unwrap();
        assert_eq!(item.confidence.as_deref(), Some(&[0.3f32, 0.2][..]));
    }

    #[test]
    fn test_failed_reset_leaves_active_state_unchanged() {
        let mut ds = dataset();
        ds.reset(Some(&votes()), ResetMode::Labeled).unwrap();
        let before = ds.sample_count();

        // One view short → ShapeMismatch, active state untouched
        let bad = ConfidenceVotes {
            votes:  vec![vec![1.0; 5]],
            scores: vec![vec![0.5; 5]],
        };
        let err = ds.reset(Some(&bad), ResetMode::Unlabeled).unwrap_err();
        assert!(matches!(err, DataError::ShapeMismatch(_)));
        assert_eq!(ds.sample_count(), before);

        // Wrong per-view length too
        let bad = ConfidenceVotes {
            votes:  vec![vec![1.0; 4], vec![1.0; 5]],
            scores: vec![vec![0.5; 5], vec![0.5; 5]],
        };
        assert!(ds.reset(Some(&bad), ResetMode::Soft).is_err());
        assert_eq!(ds.sample_count(), before);
    }

    #[test]
    fn test_burn_dataset_trait_sees_active_view() {
        let mut ds = dataset();
        assert_eq!(Dataset::len(&ds), 5);
        ds.reset(Some(&votes()), ResetMode::Unlabeled).unwrap();
        assert_eq!(Dataset::len(&ds), 2);
        assert!(Dataset::get(&ds, 1).is_some());
        assert!(Dataset::get(&ds, 2).is_none());
    }
}
