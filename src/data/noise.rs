// ============================================================
// Layer 4 — Label Noise Synthesizer
// ============================================================
// Corrupts a fraction of the training labels so the rest of
// the pipeline can study learning under label noise.
//
// How one synthesis run works, per view independently:
//   1. Shuffle the sample indices and take the first
//      floor(rate * N) as the "noisy" set. Everyone else keeps
//      their true label — exactly floor(rate * N) samples are
//      redrawn, never more, never fewer.
//   2. Symmetric mode: each noisy sample's label is redrawn
//      uniformly over [0, class_count). The redraw may land on
//      the true class by chance; noise means "redrawn", not
//      "guaranteed different".
//   3. Asymmetric mode: classes are shuffled and paired off
//      once per synthesis run, and every noisy sample's true
//      label is swapped with its partner class. The same
//      transition applies to all views so the corruption is
//      structurally consistent across modalities.
//
// Reproducibility:
//   The first synthesis persists its assignment through the
//   NoiseCache; every later call with the same cache path
//   returns the frozen assignment verbatim and never touches
//   the RNG. Rate and mode are effectively baked into the
//   cache file, which is why they key its file name.
//
// Reference: rand crate documentation
//            Rust Book §8 (Collections)

use std::collections::{BTreeSet, HashSet};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::errors::DataError;
use crate::domain::noise_spec::{NoiseMode, NoiseSpec};
use crate::infra::noise_cache::NoiseCache;

/// Applies one NoiseSpec to per-view label arrays,
/// freezing the result through a NoiseCache.
pub struct NoiseSynthesizer {
    spec: NoiseSpec,
}

impl NoiseSynthesizer {
    pub fn new(spec: NoiseSpec) -> Self {
        Self { spec }
    }

    /// Produce the (possibly cached) noisy label assignment for
    /// `clean`, one Vec<i64> per view.
    ///
    /// A pre-existing cache wins unconditionally — the spec is
    /// ignored on a cache hit, because the whole point of the
    /// cache is that the assignment never changes once drawn.
    pub fn synthesize(
        &self,
        clean: &[Vec<i64>],
        cache: &NoiseCache,
    ) -> Result<Vec<Vec<i64>>, DataError> {
        if cache.exists() {
            let cached = cache.load()?;
            validate_cached(&cached, clean, cache)?;
            tracing::info!(
                "reusing frozen noisy labels from '{}'",
                cache.path().display()
            );
            return Ok(cached);
        }

        let class_count = class_count(clean)?;
        tracing::info!(
            "injecting {} noise at rate {} over {} classes",
            self.spec.mode,
            self.spec.rate,
            class_count
        );

        // One transition shared by every view, drawn once per run.
        let transition = match self.spec.mode {
            NoiseMode::Asymmetric => Some(pairwise_transition(class_count)),
            NoiseMode::Symmetric  => None,
        };

        let mut rng   = rand::thread_rng();
        let mut noisy = Vec::with_capacity(clean.len());

        for true_labels in clean {
            let n = true_labels.len();

            // Draw floor(rate * n) distinct indices to corrupt.
            let mut indices: Vec<usize> = (0..n).collect();
            indices.shuffle(&mut rng);
            let selected: HashSet<usize> =
                indices[..self.spec.noisy_count(n)].iter().copied().collect();

            let mut view_labels = Vec::with_capacity(n);
            for (i, &label) in true_labels.iter().enumerate() {
                if !selected.contains(&i) {
                    view_labels.push(label);
                } else {
                    match &transition {
                        None    => view_labels.push(rng.gen_range(0..class_count) as i64),
                        Some(t) => view_labels.push(t[label as usize] as i64),
                    }
                }
            }
            noisy.push(view_labels);
        }

        cache.save(&noisy)?;
        Ok(noisy)
    }
}

/// Distinct-label count, checked for agreement across views.
///
/// Every view must observe the same number of classes and every
/// label must lie in [0, class_count) — the loader normalises to
/// 0-based labels, so a gap or disagreement here means the
/// caller fed views from different corpora.
fn class_count(clean: &[Vec<i64>]) -> Result<usize, DataError> {
    if clean.is_empty() {
        return Err(DataError::config("no views to synthesize noise for"));
    }

    let mut count = None;
    for (v, labels) in clean.iter().enumerate() {
        let classes: BTreeSet<i64> = labels.iter().copied().collect();
        let c = classes.len();

        match count {
            None => count = Some(c),
            Some(expected) if expected != c => {
                return Err(DataError::config(format!(
                    "view {v} observes {c} classes, view 0 observes {expected}"
                )));
            }
            _ => {}
        }

        if let Some(&max) = classes.iter().next_back() {
            if max as usize >= c || classes.iter().next().is_some_and(|&min| min < 0) {
                return Err(DataError::config(format!(
                    "view {v}: labels are not contiguous 0-based class indices"
                )));
            }
        }
    }

    // count is Some: clean is non-empty
    count.ok_or_else(|| DataError::config("no views to synthesize noise for"))
}

/// Build the asymmetric class transition: shuffle the class
/// indices and swap each of the first half with its partner in
/// the second half. For an odd class count the leftover class
/// maps to itself; for an even count the pairing is perfect and
/// no class is a fixed point.
pub fn pairwise_transition(class_count: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..class_count).collect();
    order.shuffle(&mut rand::thread_rng());

    let mut transition: Vec<usize> = (0..class_count).collect();
    let half = class_count / 2;
    for i in 0..half {
        let (a, b) = (order[i], order[half + i]);
        transition[a] = b;
        transition[b] = a;
    }
    transition
}

/// A cache hit is only trusted if its shape matches the split it
/// is being applied to; anything else means the file belongs to
/// a different export and silently using it would poison the
/// experiment.
fn validate_cached(
    cached: &[Vec<i64>],
    clean:  &[Vec<i64>],
    cache:  &NoiseCache,
) -> Result<(), DataError> {
    if cached.len() != clean.len() {
        return Err(DataError::CacheCorrupt {
            path:   cache.path().to_path_buf(),
            reason: format!("{} views cached, split has {}", cached.len(), clean.len()),
        });
    }

    for (v, (c, t)) in cached.iter().zip(clean).enumerate() {
        if c.len() != t.len() {
            return Err(DataError::CacheCorrupt {
                path:   cache.path().to_path_buf(),
                reason: format!(
                    "view {v}: {} labels cached, split has {}",
                    c.len(),
                    t.len()
                ),
            });
        }
    }

    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn cache_in(dir: &tempfile::TempDir) -> NoiseCache {
        NoiseCache::at(dir.path().join("noise_labels_test.json"))
    }

    /// Labels 0..classes cycling over n samples
    fn cyclic_labels(n: usize, classes: i64) -> Vec<i64> {
        (0..n).map(|i| i as i64 % classes).collect()
    }

    #[test]
    fn test_flips_exactly_floor_rate_n() {
        let dir   = tempfile::tempdir().unwrap();
        let clean = vec![cyclic_labels(10, 4), cyclic_labels(10, 4)];
        let spec  = NoiseSpec::new(0.5, NoiseMode::Asymmetric).unwrap();

        let noisy = NoiseSynthesizer::new(spec)
            .synthesize(&clean, &cache_in(&dir))
            .unwrap();

        // Asymmetric with an even class count never maps a class
        // to itself, so "redrawn" and "differs" coincide here:
        // exactly floor(0.5 * 10) = 5 per view.
        for v in 0..2 {
            let flipped = clean[v]
                .iter()
                .zip(&noisy[v])
                .filter(|(a, b)| a != b)
                .count();
            assert_eq!(flipped, 5);
        }
    }

    #[test]
    fn test_symmetric_keeps_unselected_labels() {
        let dir   = tempfile::tempdir().unwrap();
        let clean = vec![cyclic_labels(20, 4)];
        let spec  = NoiseSpec::new(0.3, NoiseMode::Symmetric).unwrap();

        let noisy = NoiseSynthesizer::new(spec)
            .synthesize(&clean, &cache_in(&dir))
            .unwrap();

        // floor(0.3 * 20) = 6 redrawn → at least 14 unchanged,
        // and every assigned label stays inside [0, 4).
        let same = clean[0].iter().zip(&noisy[0]).filter(|(a, b)| a == b).count();
        assert!(same >= 14);
        assert!(noisy[0].iter().all(|&l| (0..4).contains(&l)));
    }

    #[test]
    fn test_rate_zero_and_one() {
        let dir   = tempfile::tempdir().unwrap();
        let clean = vec![cyclic_labels(8, 2)];

        let spec  = NoiseSpec::new(0.0, NoiseMode::Symmetric).unwrap();
        let noisy = NoiseSynthesizer::new(spec)
            .synthesize(&clean, &cache_in(&dir))
            .unwrap();
        assert_eq!(noisy, clean);

        let dir   = tempfile::tempdir().unwrap();
        let spec  = NoiseSpec::new(1.0, NoiseMode::Asymmetric).unwrap();
        let noisy = NoiseSynthesizer::new(spec)
            .synthesize(&clean, &cache_in(&dir))
            .unwrap();
        // Two classes, rate 1.0 → every label swapped
        let flipped = clean[0].iter().zip(&noisy[0]).filter(|(a, b)| a != b).count();
        assert_eq!(flipped, 8);
    }

    #[test]
    fn test_cache_freezes_the_assignment() {
        let dir   = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        let clean = vec![cyclic_labels(50, 5), cyclic_labels(50, 5)];
        let spec  = NoiseSpec::new(0.6, NoiseMode::Symmetric).unwrap();

        let synth = NoiseSynthesizer::new(spec);
        let first  = synth.synthesize(&clean, &cache).unwrap();
        let second = synth.synthesize(&clean, &cache).unwrap();
        assert_eq!(first, second);

        // Even a different spec returns the frozen assignment —
        // the cache wins unconditionally.
        let other = NoiseSynthesizer::new(NoiseSpec::new(0.1, NoiseMode::Asymmetric).unwrap());
        assert_eq!(other.synthesize(&clean, &cache).unwrap(), first);
    }

    #[test]
    fn test_cache_with_wrong_lengths_is_corrupt() {
        let dir   = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        cache.save(&[vec![0i64, 1, 2]]).unwrap();

        let clean = vec![cyclic_labels(5, 3)];
        let spec  = NoiseSpec::new(0.2, NoiseMode::Symmetric).unwrap();
        let err   = NoiseSynthesizer::new(spec)
            .synthesize(&clean, &cache)
            .unwrap_err();
        assert!(matches!(err, DataError::CacheCorrupt { .. }));
    }

    #[test]
    fn test_class_count_mismatch_across_views() {
        let dir   = tempfile::tempdir().unwrap();
        let clean = vec![cyclic_labels(12, 4), cyclic_labels(12, 3)];
        let spec  = NoiseSpec::new(0.5, NoiseMode::Symmetric).unwrap();

        let err = NoiseSynthesizer::new(spec)
            .synthesize(&clean, &cache_in(&dir))
            .unwrap_err();
        assert!(matches!(err, DataError::Config(_)));
    }

    #[test]
    fn test_non_contiguous_labels_rejected() {
        let dir   = tempfile::tempdir().unwrap();
        // Two classes but labelled {0, 7} — a transition table
        // indexed by label would go out of range.
        let clean = vec![vec![0i64, 7, 0, 7]];
        let spec  = NoiseSpec::new(0.5, NoiseMode::Asymmetric).unwrap();

        let err = NoiseSynthesizer::new(spec)
            .synthesize(&clean, &cache_in(&dir))
            .unwrap_err();
        assert!(matches!(err, DataError::Config(_)));
    }

    #[test]
    fn test_transition_even_class_count_has_no_fixed_points() {
        for _ in 0..20 {
            let t = pairwise_transition(10);
            // Perfect pairing: no fixed points, and swapping twice
            // returns home (an involution).
            assert!((0..10).all(|c| t[c] != c));
            assert!((0..10).all(|c| t[t[c]] == c));
        }
    }

    #[test]
    fn test_transition_odd_class_count_has_one_fixed_point() {
        for _ in 0..20 {
            let t     = pairwise_transition(7);
            let fixed = (0..7).filter(|&c| t[c] == c).count();
            assert_eq!(fixed, 1);
            assert!((0..7).all(|c| t[t[c]] == c));
        }
    }
}
