//! Per-paragraph relative frequencies of the vocabulary terms.

use crate::features::Vocabulary;
use crate::models::WordTokens;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// Relative frequency of each vocabulary term within one paragraph,
/// stored densely in vocabulary rank order.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyProfile {
    freqs: Vec<f64>,
}

impl FrequencyProfile {
    /// Frequencies in vocabulary rank order
    pub fn values(&self) -> &[f64] {
        &self.freqs
    }

    /// Frequency of `term`, or `None` when it is not in `vocab`
    pub fn get(&self, vocab: &Vocabulary, term: &str) -> Option<f64> {
        vocab.position(term).map(|i| self.freqs[i])
    }

    pub fn len(&self) -> usize {
        self.freqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.freqs.is_empty()
    }
}

impl From<Vec<f64>> for FrequencyProfile {
    fn from(freqs: Vec<f64>) -> Self {
        Self { freqs }
    }
}

/// Profile one paragraph: `count(term) / token count`, all zeros for an
/// empty paragraph.
#[must_use]
pub fn frequency_profile(tokens: &[String], vocab: &Vocabulary) -> FrequencyProfile {
    if tokens.is_empty() {
        return FrequencyProfile {
            freqs: vec![0.0; vocab.len()],
        };
    }

    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }

    let total = tokens.len() as f64;
    let freqs = vocab
        .terms()
        .map(|term| counts.get(term).map_or(0.0, |&c| c as f64 / total))
        .collect();

    FrequencyProfile { freqs }
}

/// Profile every paragraph in parallel, preserving paragraph order.
#[must_use]
pub fn frequency_profiles(paragraphs: &[WordTokens], vocab: &Vocabulary) -> Vec<FrequencyProfile> {
    paragraphs
        .par_iter()
        .map(|tokens| frequency_profile(tokens, vocab))
        .collect()
}
