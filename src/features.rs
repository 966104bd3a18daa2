//! Top-K vocabulary selection over the whole corpus.
//!
//! Terms are counted by exact string (case-sensitive) and ranked by
//! descending count. Ties keep first-seen corpus order: counting goes into
//! an insertion-ordered map and the ranking sort is stable.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::Serialize;

/// Upper bound on vocabulary size.
pub const MAX_VOCABULARY: usize = 30;

/// Ranked vocabulary terms with their corpus-wide counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Vocabulary {
    terms: IndexMap<String, usize>,
}

impl Vocabulary {
    /// Count every term in `corpus` and keep the `top_k` most frequent
    /// (never more than [`MAX_VOCABULARY`]).
    pub fn extract(corpus: &[&str], top_k: usize) -> Self {
        let top_k = top_k.min(MAX_VOCABULARY);

        let mut counts: IndexMap<&str, usize, FxBuildHasher> = IndexMap::default();
        for &term in corpus {
            *counts.entry(term).or_insert(0) += 1;
        }

        let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(top_k);

        Self {
            terms: ranked
                .into_iter()
                .map(|(term, count)| (term.to_string(), count))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Corpus-wide count of `term`, if it made the cut
    pub fn count(&self, term: &str) -> Option<usize> {
        self.terms.get(term).copied()
    }

    /// Rank position of `term`
    pub fn position(&self, term: &str) -> Option<usize> {
        self.terms.get_index_of(term)
    }

    /// Term at rank `index`
    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get_index(index).map(|(term, _)| term.as_str())
    }

    /// Terms in rank order
    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.terms.keys().map(String::as_str)
    }

    /// `(term, count)` pairs in rank order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.terms.iter().map(|(term, count)| (term.as_str(), *count))
    }
}
