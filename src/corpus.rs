//! Document-wide token stream.

use crate::models::WordTokens;

/// Concatenate per-paragraph tokens into one corpus, paragraph order first
/// and token order within each paragraph second.
#[must_use]
pub fn build_corpus(paragraphs: &[WordTokens]) -> Vec<&str> {
    let total: usize = paragraphs.iter().map(Vec::len).sum();
    let mut corpus = Vec::with_capacity(total);
    for tokens in paragraphs {
        corpus.extend(tokens.iter().map(String::as_str));
    }
    corpus
}
