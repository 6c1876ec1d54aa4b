// ============================================================
// Layer 3 — Split Domain Type
// ============================================================
// Names the three mutually exclusive partitions of a dataset.
// The partition is fixed at load time — samples never move
// between splits during a run.
//
// Reference: Rust Book §6 (Enums and Pattern Matching)

use std::fmt;
use std::str::FromStr;

use crate::domain::errors::DataError;

/// One of the three dataset partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    /// Used to fit the model — the only split that receives
    /// synthetic label noise
    Train,

    /// Used for model selection during training
    Valid,

    /// Used for the final retrieval evaluation
    Test,
}

impl Split {
    /// The lowercase token used in file names (`train.json` etc.)
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Valid => "valid",
            Split::Test  => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a split name case-insensitively.
/// Unknown names are a fatal configuration error —
/// there is no sensible fallback split.
impl FromStr for Split {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "train" => Ok(Split::Train),
            "valid" => Ok(Split::Valid),
            "test"  => Ok(Split::Test),
            other   => Err(DataError::config(format!("unknown split '{other}'"))),
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_case_insensitively() {
        assert_eq!("Train".parse::<Split>().unwrap(), Split::Train);
        assert_eq!("VALID".parse::<Split>().unwrap(), Split::Valid);
        assert_eq!("test".parse::<Split>().unwrap(), Split::Test);
    }

    #[test]
    fn test_unknown_split_is_config_error() {
        let err = "eval".parse::<Split>().unwrap_err();
        assert!(matches!(err, DataError::Config(_)));
    }

    #[test]
    fn test_display_matches_file_stem() {
        assert_eq!(Split::Train.to_string(), "train");
    }
}
