// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// One typed error enum for the whole data pipeline.
//
// Why typed errors here instead of anyhow everywhere?
//   The caller's recovery policy depends on WHICH failure
//   occurred:
//   - Config        → a caller/config bug, abort immediately
//   - CacheCorrupt  → caller may delete the cache and regenerate
//   - ShapeMismatch → a caller bug, abort, active state unchanged
//   anyhow flattens these into one opaque type; thiserror keeps
//   them matchable while still converting into anyhow::Error
//   at the application layer via `?`.
//
// All of these are deterministic, local, in-process failures —
// there is no retry policy because nothing here is transient.
//
// Reference: Rust Book §9 (Error Handling)
//            thiserror crate documentation

use std::path::PathBuf;
use thiserror::Error;

/// Every failure the data pipeline can surface.
#[derive(Debug, Error)]
pub enum DataError {
    /// Unknown dataset/split/mode name, bad noise rate,
    /// or mismatched class counts across views.
    #[error("configuration error: {0}")]
    Config(String),

    /// A noise cache file exists but cannot be trusted:
    /// unparseable JSON, or per-view lengths that do not
    /// match the loaded split.
    #[error("noise cache corrupt at '{path}': {reason}")]
    CacheCorrupt { path: PathBuf, reason: String },

    /// Per-view array lengths disagree where they must match.
    /// Raised by the container on construction and on reset;
    /// a failed reset leaves the active state untouched.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Plain I/O failure reading or writing a pipeline file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    /// Shorthand for building a Config error from anything
    /// that formats — keeps call sites to one line.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Shorthand for building a ShapeMismatch error.
    pub fn shape(msg: impl Into<String>) -> Self {
        Self::ShapeMismatch(msg.into())
    }
}
