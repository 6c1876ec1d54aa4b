// ============================================================
// Layer 4 — Multi-View Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec of
// CrossModalItems into per-view tensors.
//
// What is a Batcher?
//   A Batcher takes a list of individual samples and stacks
//   them into batch tensors. GPUs are most efficient when
//   processing many samples at once.
//
// The multi-view twist:
//   Views have DIFFERENT feature dimensionalities, so they
//   cannot share one tensor. The batch therefore carries one
//   tensor per view:
//
//   Input:  Vec of N CrossModalItems over V views
//   Output: features[v]   — Tensor [N, D_v]   for each view v
//           labels[v]     — Tensor [N]        for each view v
//           confidence[v] — Tensor [N]        (when present)
//           indices       — Tensor [N]        original positions
//
//   Per view we flatten all rows into one long Vec, then
//   reshape: [s1_d1, ..., s1_dD, s2_d1, ..., sN_dD] → [N, D_v]
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::CrossModalItem;

// ─── MultiViewBatch ───────────────────────────────────────────────────────────
/// A batch of cross-modal samples ready for a per-view encoder
/// forward pass. Outer Vecs are indexed by view.
///
/// B is the Burn Backend (e.g. Wgpu, NdArray) —
/// generic so the same batcher works on any device.
#[derive(Debug, Clone)]
pub struct MultiViewBatch<B: Backend> {
    /// Per-view feature matrices — shape: [batch_size, D_v]
    pub features: Vec<Tensor<B, 2>>,

    /// Per-view label vectors — shape: [batch_size]
    /// May contain the -1 sentinel after a soft reset
    pub labels: Vec<Tensor<B, 1, Int>>,

    /// Per-view confidence vectors — shape: [batch_size];
    /// present only when the items carried confidence
    pub confidence: Option<Vec<Tensor<B, 1>>>,

    /// Active-view sample indices — shape: [batch_size]
    /// Lets the training loop write per-sample scores back
    pub indices: Tensor<B, 1, Int>,
}

// ─── MultiViewBatcher ─────────────────────────────────────────────────────────
/// The batcher struct — holds the target device so tensors
/// are created on the correct GPU/CPU.
#[derive(Clone, Debug)]
pub struct MultiViewBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> MultiViewBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

// ─── Burn Batcher Trait Implementation ────────────────────────────────────────
// The DataLoader calls .batch(items) with each mini-batch of
// samples drawn from the CrossModalDataset. The container
// guarantees every item spans the same views with the same
// per-view dimensionality, so items[0] is a safe template.
impl<B: Backend> Batcher<CrossModalItem, MultiViewBatch<B>> for MultiViewBatcher<B> {
    fn batch(&self, items: Vec<CrossModalItem>) -> MultiViewBatch<B> {
        let batch_size = items.len();
        let view_count = items[0].features.len();
        let with_conf  = items[0].confidence.is_some();

        let mut features   = Vec::with_capacity(view_count);
        let mut labels     = Vec::with_capacity(view_count);
        let mut confidence = if with_conf {
            Some(Vec::with_capacity(view_count))
        } else {
            None
        };

        for v in 0..view_count {
            let dim = items[0].features[v].len();

            // ── Flatten this view's feature rows ──────────────────────────────
            let flat: Vec<f32> = items
                .iter()
                .flat_map(|item| item.features[v].iter().copied())
                .collect();

            features.push(
                Tensor::<B, 1>::from_floats(flat.as_slice(), &self.device)
                    .reshape([batch_size, dim]),
            );

            // ── This view's labels (Burn uses i32 for Int tensors) ────────────
            let view_labels: Vec<i32> =
                items.iter().map(|item| item.labels[v] as i32).collect();
            labels.push(Tensor::<B, 1, Int>::from_ints(
                view_labels.as_slice(),
                &self.device,
            ));

            // ── This view's confidence, when present ──────────────────────────
            if let Some(conf) = confidence.as_mut() {
                let view_conf: Vec<f32> = items
                    .iter()
                    .map(|item| item.confidence.as_ref().map_or(0.0, |c| c[v]))
                    .collect();
                conf.push(Tensor::<B, 1>::from_floats(
                    view_conf.as_slice(),
                    &self.device,
                ));
            }
        }

        // ── Original sample indices ───────────────────────────────────────────
        let idx: Vec<i32> = items.iter().map(|item| item.index as i32).collect();
        let indices = Tensor::<B, 1, Int>::from_ints(idx.as_slice(), &self.device);

        MultiViewBatch { features, labels, confidence, indices }
    }
}
