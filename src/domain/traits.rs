// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// Traits are Rust's way of defining shared behaviour —
// by programming against traits instead of concrete types,
// we can swap implementations without changing the code
// that uses them.
//
// Branching on the dataset name inside consumer code would
// mean editing every consumer for each new corpus. Here the
// branching lives behind ViewSource:
//   - JsonViewLoader → reads the canonical JSON exports
//   - (future) Hdf5Loader → reads the raw .h5py corpora
//   - (future) MatLoader  → reads the raw .mat corpora
// The application layer only ever sees ViewSource and the
// canonical MultiViewSplit shape.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use crate::domain::errors::DataError;
use crate::domain::split::Split;
use crate::domain::view::MultiViewSplit;

// ─── ViewSource ───────────────────────────────────────────────────────────────
/// Any component that can produce the canonical multi-view
/// arrays for a named split.
///
/// The contract downstream code relies on:
///   - all views share one sample count
///   - labels are normalised to 0-based non-negative integers
/// Both are enforced by MultiViewSplit::new, so an implementor
/// that builds its result through it cannot break them.
pub trait ViewSource {
    /// Load one split's per-view feature and label arrays.
    fn load_split(&self, split: Split) -> Result<MultiViewSplit, DataError>;
}
