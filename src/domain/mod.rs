// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// This is the heart of the application — pure Rust structs
// and traits that define the core concepts of the system.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O or network calls
//   - NO randomness — noise synthesis lives in Layer 4
//   - Only plain Rust structs, enums, and traits
//
// Why keep this layer pure?
//   - Easy to unit test (no files or RNG needed)
//   - Easy to understand (no framework noise)
//   - Easy to swap implementations (just implement the trait)
//
// Think of this layer as the "dictionary" of the system —
// it defines what things ARE, not how they work.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// The train/valid/test split names
pub mod split;

// Noise rate + noise mode pair describing a corruption run
pub mod noise_spec;

// One modality's samples and labels, and the multi-view bundle
pub mod view;

// The typed error taxonomy shared by all layers
pub mod errors;

// Core abstractions (traits) that other layers implement
pub mod traits;
