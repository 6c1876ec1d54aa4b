// ============================================================
// Layer 2 — InspectUseCase
// ============================================================
// Answers "what did the frozen noise actually do?" for an
// existing cache, without regenerating anything:
//
//   Step 1: Resolve dataset / spec        (Layer 3 - domain)
//   Step 2: Load the clean train split    (Layer 4 - data)
//   Step 3: Load the frozen cache         (Layer 5 - infra)
//   Step 4: Compare and write the report  (Layer 5 - infra)
//
// A missing cache is a configuration error here — inspect
// never draws noise, so there must be something to inspect.
// A corrupt cache surfaces as CacheCorrupt untouched; whether
// to delete and re-prepare is the operator's call, not ours.
//
// Reference: Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::loader::{DatasetKind, JsonViewLoader};
use crate::domain::{
    errors::DataError,
    noise_spec::{NoiseMode, NoiseSpec},
    split::Split,
    traits::ViewSource,
};
use crate::infra::{metrics::NoiseReport, noise_cache::NoiseCache};

// ─── Inspection Configuration ─────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectConfig {
    pub dataset:    String,
    pub root_dir:   String,
    pub noise_rate: f64,
    pub noise_mode: String,
    pub noise_file: Option<String>,
}

// ─── InspectUseCase ───────────────────────────────────────────────────────────
pub struct InspectUseCase {
    config: InspectConfig,
}

impl InspectUseCase {
    pub fn new(config: InspectConfig) -> Self {
        Self { config }
    }

    /// Compare the frozen cache against the clean train labels,
    /// log per-view flip rates, and write noise_report.csv into
    /// the dataset directory.
    pub fn execute(&self) -> Result<NoiseReport> {
        let cfg = &self.config;

        // ── Step 1: Resolve typed configuration ───────────────────────────────
        let kind: DatasetKind = cfg.dataset.parse()?;
        let mode: NoiseMode   = cfg.noise_mode.parse()?;
        let spec              = NoiseSpec::new(cfg.noise_rate, mode)?;

        // ── Step 2: Load the clean train split ────────────────────────────────
        let loader = JsonViewLoader::new(&cfg.root_dir, kind);
        let views  = loader.load_split(Split::Train)?;

        // ── Step 3: Load the frozen cache ─────────────────────────────────────
        let cache = match &cfg.noise_file {
            Some(path) => NoiseCache::at(path),
            None       => NoiseCache::for_spec(&loader.dataset_dir(), &spec),
        };
        if !cache.exists() {
            return Err(DataError::config(format!(
                "no noise cache at '{}' — run 'prepare' first",
                cache.path().display()
            ))
            .into());
        }
        let noisy = cache
            .load()
            .with_context(|| format!("inspecting '{}'", cache.path().display()))?;

        // ── Step 4: Compare and report ────────────────────────────────────────
        let names: Vec<String> = views.views().iter().map(|v| v.name.clone()).collect();
        let report = NoiseReport::compare(&names, &views.labels(), &noisy)?;
        report.log();
        report.write_csv(&loader.dataset_dir())?;

        Ok(report)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::prepare_use_case::{PrepareConfig, PrepareUseCase};
    use std::fs;

    fn write_train(root: &std::path::Path, n: usize) {
        let dir = root.join("wiki");
        fs::create_dir_all(&dir).unwrap();
        let views: Vec<serde_json::Value> = (0..2)
            .map(|v| {
                serde_json::json!({
                    "name":     format!("view{v}"),
                    "features": (0..n).map(|i| vec![i as f32]).collect::<Vec<_>>(),
                    "labels":   (0..n).map(|i| (i % 4) as i64).collect::<Vec<_>>(),
                })
            })
            .collect();
        fs::write(
            dir.join("train.json"),
            serde_json::to_vec(&serde_json::json!({ "views": views })).unwrap(),
        )
        .unwrap();
    }

    #[test]
    fn test_inspect_reports_frozen_noise() {
        let dir = tempfile::tempdir().unwrap();
        write_train(dir.path(), 10);
        let root = dir.path().to_string_lossy().into_owned();

        // Freeze a cache first via prepare
        PrepareUseCase::new(PrepareConfig {
            root_dir:   root.clone(),
            noise_rate: 0.4,
            ..PrepareConfig::default()
        })
        .execute()
        .unwrap();

        let report = InspectUseCase::new(InspectConfig {
            dataset:    "wiki".to_string(),
            root_dir:   root,
            noise_rate: 0.4,
            noise_mode: "sym".to_string(),
            noise_file: None,
        })
        .execute()
        .unwrap();

        // floor(0.4 * 10) = 4 redrawn per view, flips <= 4
        assert_eq!(report.per_view.len(), 2);
        assert!(report.per_view.iter().all(|s| s.flipped <= 4));
        assert!(dir.path().join("wiki/noise_report.csv").exists());
    }

    #[test]
    fn test_inspect_without_cache_fails() {
        let dir = tempfile::tempdir().unwrap();
        write_train(dir.path(), 10);

        let err = InspectUseCase::new(InspectConfig {
            dataset:    "wiki".to_string(),
            root_dir:   dir.path().to_string_lossy().into_owned(),
            noise_rate: 0.4,
            noise_mode: "sym".to_string(),
            noise_file: None,
        })
        .execute()
        .unwrap_err();
        assert!(err.to_string().contains("prepare"));
    }
}
