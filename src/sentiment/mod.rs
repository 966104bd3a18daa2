//! Lexicon-based sentiment scoring.
//!
//! # Scoring
//!
//! ```text
//! sentence  = Σ sign · valence(token) / token count
//! paragraph = mean of its sentence scores      (0 with no sentences)
//! document  = mean of its paragraph scores     (0 with no paragraphs)
//! ```
//!
//! Tokens are lower-cased and looked up in the built-in valence table,
//! falling back to their English stem. A negation word flips `sign` for the
//! rest of its sentence.

mod lexicon;

pub use lexicon::{is_negation, valence};

use crate::models::{SentenceTokens, SentimentStats};
use rayon::prelude::*;

/// Signed polarity of one tokenized sentence.
#[must_use]
pub fn score_sentence(tokens: &[String]) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }

    let mut sign = 1.0;
    let mut total = 0.0;
    for token in tokens {
        let word = token.to_lowercase();
        if is_negation(&word) {
            sign = -1.0;
        } else if let Some(v) = valence(&word) {
            total += sign * f64::from(v);
        }
    }
    total / tokens.len() as f64
}

/// Average sentence score of one paragraph.
#[must_use]
pub fn paragraph_score(sentences: &SentenceTokens) -> f64 {
    if sentences.is_empty() {
        return 0.0;
    }
    let total: f64 = sentences.iter().map(|s| score_sentence(s)).sum();
    total / sentences.len() as f64
}

/// Score every paragraph and the document as a whole.
#[must_use]
pub fn aggregate(paragraphs: &[SentenceTokens]) -> SentimentStats {
    let scores: Vec<f64> = paragraphs.par_iter().map(paragraph_score).collect();

    let whole_corpus_average = if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    };

    SentimentStats {
        paragraphs: scores.into_iter().enumerate().collect(),
        whole_corpus_average,
    }
}
