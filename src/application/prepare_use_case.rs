// ============================================================
// Layer 2 — PrepareUseCase
// ============================================================
// Orchestrates the full data-preparation pipeline in order:
//
//   Step 1: Resolve dataset / split / spec   (Layer 3 - domain)
//   Step 2: Load the canonical split         (Layer 4 - data)
//   Step 3: Synthesize or reload noise       (Layer 4 + 5)
//   Step 4: Wrap in the dataset container    (Layer 4 - data)
//   Step 5: Report what was prepared         (Layer 5 - infra)
//
// Only the train split receives noise — validation and test
// labels stay clean, because they measure the damage noise
// does rather than participate in it.
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::CrossModalDataset,
    loader::{DatasetKind, JsonViewLoader},
    noise::NoiseSynthesizer,
};
use crate::domain::{
    noise_spec::{NoiseMode, NoiseSpec},
    split::Split,
    traits::ViewSource,
};
use crate::infra::{metrics::NoiseReport, noise_cache::NoiseCache};

// ─── Preparation Configuration ────────────────────────────────────────────────
// Everything one preparation run needs, as plain strings and
// numbers straight from the CLI. Serialisable so a run's exact
// configuration can be archived next to its outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareConfig {
    pub dataset:    String,
    pub root_dir:   String,
    pub split:      String,
    pub noise_rate: f64,
    pub noise_mode: String,

    /// Explicit cache path; None means the conventional
    /// `noise_labels_<rate>_<mode>.json` under the dataset dir
    pub noise_file: Option<String>,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            dataset:    "wiki".to_string(),
            root_dir:   "./".to_string(),
            split:      "train".to_string(),
            noise_rate: 0.6,
            noise_mode: "sym".to_string(),
            noise_file: None,
        }
    }
}

// ─── PrepareUseCase ───────────────────────────────────────────────────────────
// Owns the config and runs the preparation pipeline.
pub struct PrepareUseCase {
    config: PrepareConfig,
}

impl PrepareUseCase {
    pub fn new(config: PrepareConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline and report; the CLI entry point.
    pub fn execute(&self) -> Result<()> {
        let (dataset, report) = self.build()?;

        tracing::info!(
            "prepared {} samples × {} views",
            dataset.sample_count(),
            dataset.view_count()
        );
        if let Some(report) = report {
            report.log();
        }
        Ok(())
    }

    /// Run the pipeline and hand the dataset (plus the noise
    /// report, for the train split) to the caller — this is the
    /// seam a training loop builds on.
    pub fn build(&self) -> Result<(CrossModalDataset, Option<NoiseReport>)> {
        let cfg = &self.config;

        // ── Step 1: Resolve typed configuration ───────────────────────────────
        // String → domain types; every bad name fails here, before
        // any file is touched.
        let kind:  DatasetKind = cfg.dataset.parse()?;
        let split: Split       = cfg.split.parse()?;
        let mode:  NoiseMode   = cfg.noise_mode.parse()?;
        let spec               = NoiseSpec::new(cfg.noise_rate, mode)?;

        // ── Step 2: Load the canonical split ──────────────────────────────────
        let loader = JsonViewLoader::new(&cfg.root_dir, kind);
        let views  = loader.load_split(split)?;

        // ── Step 3: Synthesize or reload the noisy labels ─────────────────────
        // Train only; valid/test keep their clean labels.
        let clean = views.labels();
        let (labels, report) = if split == Split::Train {
            let cache = match &cfg.noise_file {
                Some(path) => NoiseCache::at(path),
                None       => NoiseCache::for_spec(&loader.dataset_dir(), &spec),
            };
            let noisy  = NoiseSynthesizer::new(spec).synthesize(&clean, &cache)?;
            let names: Vec<String> =
                views.views().iter().map(|v| v.name.clone()).collect();
            let report = NoiseReport::compare(&names, &clean, &noisy)?;
            (noisy, Some(report))
        } else {
            tracing::info!("{split} split keeps clean labels");
            (clean, None)
        };

        // ── Step 4: Wrap in the dataset container ─────────────────────────────
        // CrossModalDataset implements Burn's Dataset trait, so a
        // DataLoader can iterate it directly.
        let dataset = CrossModalDataset::from_split(views, labels)?;

        Ok((dataset, report))
    }
}
