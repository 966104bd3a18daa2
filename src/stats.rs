//! Per-term mean and sample standard deviation, and per-paragraph z-scores.
//!
//! ```text
//! mean_t  = Σ_p f[p][t] / P
//! stdev_t = sqrt( Σ_p (f[p][t] - mean_t)² / (P - 1) )
//! z[p][t] = (f[p][t] - mean_t) / stdev_t        (0 when stdev_t == 0)
//! ```
//!
//! A term whose frequency is bit-identical across every paragraph is a
//! degenerate feature. Its stdev is reported as exactly 0 and all of its
//! z-scores are 0.

use crate::error::AnalysisError;
use crate::features::Vocabulary;
use crate::profile::FrequencyProfile;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

/// Mean and sample standard deviation of one term across paragraphs
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TermStats {
    pub mean: f64,
    pub stdev: f64,
}

/// Term statistics in vocabulary rank order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeatureStats {
    terms: IndexMap<String, TermStats>,
}

impl FeatureStats {
    pub fn get(&self, term: &str) -> Option<&TermStats> {
        self.terms.get(term)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// `(term, stats)` pairs in vocabulary rank order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TermStats)> + '_ {
        self.terms.iter().map(|(term, stats)| (term.as_str(), stats))
    }
}

/// Z-scores of one paragraph, in vocabulary rank order
#[derive(Debug, Clone, PartialEq)]
pub struct ZScoreVector {
    scores: Vec<f64>,
}

impl ZScoreVector {
    pub fn values(&self) -> &[f64] {
        &self.scores
    }

    /// Z-score of `term`, or `None` when it is not in `vocab`
    pub fn get(&self, vocab: &Vocabulary, term: &str) -> Option<f64> {
        vocab.position(term).map(|i| self.scores[i])
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl From<Vec<f64>> for ZScoreVector {
    fn from(scores: Vec<f64>) -> Self {
        Self { scores }
    }
}

/// Compute mean and sample stdev of every vocabulary term.
///
/// Fails with [`AnalysisError::InsufficientData`] when fewer than two
/// paragraphs are profiled.
pub fn feature_stats(
    profiles: &[FrequencyProfile],
    vocab: &Vocabulary,
) -> Result<FeatureStats, AnalysisError> {
    let p = profiles.len();
    if p < 2 {
        return Err(AnalysisError::InsufficientData { found: p });
    }

    let mut terms = IndexMap::with_capacity(vocab.len());
    for (t, term) in vocab.terms().enumerate() {
        let column = profiles.iter().map(|profile| profile.values()[t]);
        let stats = column_stats(column, p);
        if stats.stdev == 0.0 {
            debug!("Degenerate feature {:?}: identical frequency in all {} paragraphs", term, p);
        }
        terms.insert(term.to_string(), stats);
    }

    Ok(FeatureStats { terms })
}

fn column_stats(column: impl Iterator<Item = f64> + Clone, p: usize) -> TermStats {
    let mut values = column.clone();
    let first = values.next().unwrap_or(0.0);
    if values.all(|v| v == first) {
        return TermStats {
            mean: first,
            stdev: 0.0,
        };
    }

    let n = p as f64;
    let mean = column.clone().sum::<f64>() / n;
    let sq_diff: f64 = column.map(|v| (v - mean).powi(2)).sum();
    TermStats {
        mean,
        stdev: (sq_diff / (n - 1.0)).sqrt(),
    }
}

/// Standardize every profile against `stats`.
#[must_use]
pub fn z_scores(profiles: &[FrequencyProfile], stats: &FeatureStats) -> Vec<ZScoreVector> {
    profiles
        .iter()
        .map(|profile| {
            let scores = profile
                .values()
                .iter()
                .zip(stats.terms.values())
                .map(|(&freq, term)| {
                    if term.stdev == 0.0 {
                        0.0
                    } else {
                        (freq - term.mean) / term.stdev
                    }
                })
                .collect();
            ZScoreVector { scores }
        })
        .collect()
}
