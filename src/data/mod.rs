// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from canonical split files
// all the way to GPU-ready multi-view tensor batches.
//
// The pipeline flows in this order:
//
//   <dataset dir>/<split>.json
//       │
//       ▼
//   JsonViewLoader     → reads files, yields MultiViewSplit
//       │
//       ▼
//   NoiseSynthesizer   → corrupts a fraction of train labels
//       │                (or reloads the frozen cache)
//       ▼
//   CrossModalDataset  → implements Burn's Dataset trait,
//       │                repartitioned between epochs via reset
//       ▼
//   MultiViewBatcher   → stacks samples into per-view tensors
//       │
//       ▼
//   DataLoader         → feeds batches to the training loop
//
// Each module is responsible for exactly one step.
// This makes each step independently testable and replaceable.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Maps dataset names to directories and reads canonical split files
pub mod loader;

/// Injects symmetric/asymmetric label noise, frozen via the cache
pub mod noise;

/// Implements Burn's Dataset trait over the active multi-view arrays
pub mod dataset;

/// Implements Burn's Batcher trait to create per-view tensor batches
pub mod batcher;
