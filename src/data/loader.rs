// ============================================================
// Layer 4 — Dataset Loader
// ============================================================
// Maps a dataset name to its directory layout and reads the
// canonical per-split JSON exports into MultiViewSplit.
//
// Parsing the raw research corpora (.h5py / .mat containers)
// is out of scope — an export step produces one JSON file per
// split with the shape:
//
//   { "views": [ { "name":     "img",
//                  "features": [[0.1, ...], ...],   N × D_v
//                  "labels":   [3, 0, 7, ...] } ,   length N
//                { "name": "txt", ... } ] }
//
// Two quirks carried over from the original corpora:
//
//   1. Label offsets. Some exports label classes 1..C instead
//      of 0..C-1. Every view's labels are shifted so the
//      minimum observed label becomes 0. This is also what
//      guarantees the non-negative labels that the container's
//      -1 "unknown" sentinel relies on.
//
//   2. Carved validation sets. The doc2vec-era corpora (wiki,
//      NUS-WIDE, XMediaNet) ship no validation split — by
//      convention the FIRST K samples of the test split serve
//      as validation and the remainder as the real test set.
//      K is fixed per corpus (wiki 231, nus 5000, xmedianet
//      4000). The carve only applies when no valid.json exists.
//
// Reference: Rust Book §9 (Error Handling)
//            serde_json documentation

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::domain::errors::DataError;
use crate::domain::split::Split;
use crate::domain::traits::ViewSource;
use crate::domain::view::{MultiViewSplit, View};

// ─── DatasetKind ──────────────────────────────────────────────────────────────
/// The supported multi-view retrieval corpora.
/// Adding a corpus means adding a variant here — consumer code
/// only ever sees the canonical MultiViewSplit shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    /// Wikipedia image/text pairs
    Wiki,

    /// NUS-WIDE web images with tag text
    NusWide,

    /// INRIA-Websearch image/text pairs
    InriaWebsearch,

    /// XMediaNet, image + text views
    XMediaNet,

    /// XMediaNet, four aligned views
    XMediaNet4View,
}

impl DatasetKind {
    /// Directory name under the data root
    pub fn dir_name(&self) -> &'static str {
        match self {
            DatasetKind::Wiki           => "wiki",
            DatasetKind::NusWide        => "NUS-WIDE",
            DatasetKind::InriaWebsearch => "INRIA-Websearch",
            DatasetKind::XMediaNet      => "XMediaNet",
            DatasetKind::XMediaNet4View => "XMediaNet4View",
        }
    }

    /// How many modalities this corpus provides
    pub fn view_count(&self) -> usize {
        match self {
            DatasetKind::XMediaNet4View => 4,
            _                           => 2,
        }
    }

    /// For corpora without a dedicated validation file: how many
    /// samples to carve off the FRONT of the test split as the
    /// validation set. None means the corpus ships all three
    /// splits explicitly.
    fn carved_valid_len(&self) -> Option<usize> {
        match self {
            DatasetKind::Wiki      => Some(231),
            DatasetKind::NusWide   => Some(5000),
            DatasetKind::XMediaNet => Some(4000),
            _                      => None,
        }
    }
}

/// Resolve a dataset name by case-insensitive substring match,
/// the same loose matching the experiment configs always used
/// ("Wiki", "wiki_2views", ... all resolve to Wiki).
///
/// "xmedianet4view" must be checked before "xmedianet" —
/// the shorter token is a substring of the longer one.
impl FromStr for DatasetKind {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.to_ascii_lowercase();
        if name.contains("wiki") {
            Ok(DatasetKind::Wiki)
        } else if name.contains("nus") {
            Ok(DatasetKind::NusWide)
        } else if name.contains("inria") {
            Ok(DatasetKind::InriaWebsearch)
        } else if name.contains("xmedianet4view") {
            Ok(DatasetKind::XMediaNet4View)
        } else if name.contains("xmedianet") {
            Ok(DatasetKind::XMediaNet)
        } else {
            Err(DataError::config(format!("unknown dataset '{s}'")))
        }
    }
}

// ─── Canonical split file format ──────────────────────────────────────────────
/// On-disk shape of one split file.
#[derive(Debug, Deserialize)]
struct SplitFile {
    views: Vec<ViewRecord>,
}

#[derive(Debug, Deserialize)]
struct ViewRecord {
    name:     String,
    features: Vec<Vec<f32>>,
    labels:   Vec<i64>,
}

// ─── JsonViewLoader ───────────────────────────────────────────────────────────
/// Loads canonical JSON split files for one dataset.
/// Implements the ViewSource trait from Layer 3.
pub struct JsonViewLoader {
    root: PathBuf,
    kind: DatasetKind,
}

impl JsonViewLoader {
    pub fn new(root: impl Into<PathBuf>, kind: DatasetKind) -> Self {
        Self { root: root.into(), kind }
    }

    /// The dataset's own directory — also where the noise cache
    /// and reports live.
    pub fn dataset_dir(&self) -> PathBuf {
        self.root.join(self.kind.dir_name())
    }

    fn split_path(&self, split: Split) -> PathBuf {
        self.dataset_dir().join(format!("{split}.json"))
    }

    /// Read and validate one split file, without any carving.
    fn read_file(&self, path: &Path) -> Result<MultiViewSplit, DataError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            DataError::config(format!("cannot read split file '{}': {e}", path.display()))
        })?;

        let file: SplitFile = serde_json::from_str(&raw).map_err(|e| {
            DataError::config(format!("malformed split file '{}': {e}", path.display()))
        })?;

        if file.views.len() != self.kind.view_count() {
            return Err(DataError::config(format!(
                "'{}' has {} views, {:?} expects {}",
                path.display(),
                file.views.len(),
                self.kind,
                self.kind.view_count()
            )));
        }

        let views = file
            .views
            .into_iter()
            .map(|record| {
                View::new(
                    record.name,
                    record.features,
                    normalise_labels(record.labels),
                )
            })
            .collect();

        MultiViewSplit::new(views)
    }

    /// Keep only samples [lo, hi) in every view of a loaded split.
    fn slice(split: MultiViewSplit, lo: usize, hi: usize) -> Result<MultiViewSplit, DataError> {
        let views = split
            .views()
            .iter()
            .map(|v| {
                View::new(
                    v.name.clone(),
                    v.features[lo..hi].to_vec(),
                    v.labels[lo..hi].to_vec(),
                )
            })
            .collect();
        MultiViewSplit::new(views)
    }
}

impl ViewSource for JsonViewLoader {
    fn load_split(&self, split: Split) -> Result<MultiViewSplit, DataError> {
        let path = self.split_path(split);

        // The carve only applies to valid/test, only for corpora
        // with a fixed carve length, and only when no dedicated
        // valid.json exists. Otherwise the requested file must
        // simply be there.
        let carve = match (split, self.kind.carved_valid_len()) {
            (Split::Valid, Some(k)) | (Split::Test, Some(k))
                if !self.split_path(Split::Valid).exists() =>
            {
                Some(k)
            }
            _ => None,
        };

        let loaded = match carve {
            None => {
                if !path.exists() {
                    return Err(DataError::config(format!(
                        "no split file '{}' for dataset {:?}",
                        path.display(),
                        self.kind
                    )));
                }
                self.read_file(&path)?
            }
            Some(k) => {
                // test.json holds valid + test concatenated:
                // front k samples → valid, remainder → test.
                let test_path = self.split_path(Split::Test);
                let full      = self.read_file(&test_path)?;
                let n         = full.sample_count();

                if k >= n {
                    return Err(DataError::config(format!(
                        "cannot carve {k}-sample validation set out of {n} test samples"
                    )));
                }

                match split {
                    Split::Valid => Self::slice(full, 0, k)?,
                    _            => Self::slice(full, k, n)?,
                }
            }
        };

        tracing::info!(
            "loaded {} split: {} samples × {} views",
            split,
            loaded.sample_count(),
            loaded.view_count(),
        );
        Ok(loaded)
    }
}

/// Shift labels so the minimum observed label becomes 0.
/// Some exports use 1-based class indices; everything downstream
/// assumes 0-based.
fn normalise_labels(labels: Vec<i64>) -> Vec<i64> {
    let min = labels.iter().copied().min().unwrap_or(0);
    if min == 0 {
        labels
    } else {
        labels.into_iter().map(|l| l - min).collect()
    }
}
