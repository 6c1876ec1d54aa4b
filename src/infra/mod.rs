// ============================================================
// Layer 5 — Infrastructure Layer
// ============================================================
// Handles the cross-cutting persistence concerns that don't
// belong in any specific business layer:
//
//   noise_cache.rs — Noisy-label cache persistence
//                    Saves and reloads the per-view noisy label
//                    assignment as JSON, keyed by (rate, mode)
//                    in the file name. Once generated, the
//                    assignment is frozen — this is what makes
//                    experiments reproducible across runs.
//
//   metrics.rs     — Corruption statistics reporting
//                    Compares clean vs. assigned labels per view
//                    and writes a CSV report for later analysis.
//
// Why is this a separate layer?
//   These concerns are used by multiple other layers but
//   don't belong to any one of them. Keeping them here:
//   - Prevents duplication across layers
//   - Makes it easy to swap implementations
//     (e.g. swap JSON files for a proper experiment store)
//   - Keeps other layers focused on their core logic
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling)

/// Noisy-label cache saving and loading
pub mod noise_cache;

/// Per-view corruption statistics and CSV report
pub mod metrics;
