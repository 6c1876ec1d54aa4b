// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// a specific goal (preparing a noisy dataset or inspecting an
// existing noise cache).
//
// Rules for this layer:
//   - No noise math or array code here (that's Layer 4)
//   - No UI or printing here (that's Layer 1)
//   - No direct file format knowledge (Layers 4 and 5)
//   - Only workflow coordination
//
// Think of this layer as the "director" — it tells other
// layers what to do but doesn't do the work itself.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Load a split, inject/reload label noise, build the dataset
pub mod prepare_use_case;

// Measure an existing noise cache against the clean labels
pub mod inspect_use_case;
