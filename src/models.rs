//! Core data models for diction
//!
//! These are the request and response shapes exchanged with the editing
//! surface, plus the paragraph record used inside one analysis run.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Word tokens of one paragraph, in order.
pub type WordTokens = Vec<String>;

/// Sentences of one paragraph, each sentence word-tokenized.
pub type SentenceTokens = Vec<Vec<String>>;

/// Which outputs an analysis request computes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Outlier detection and sentiment
    #[default]
    #[serde(alias = "document", alias = "both")]
    Full,
    /// Stylometric outliers only
    #[serde(alias = "outlier", alias = "diction")]
    Outliers,
    /// Sentiment only
    Sentiment,
}

impl AnalysisMode {
    pub fn wants_outliers(self) -> bool {
        matches!(self, AnalysisMode::Full | AnalysisMode::Outliers)
    }

    pub fn wants_sentiment(self) -> bool {
        matches!(self, AnalysisMode::Full | AnalysisMode::Sentiment)
    }

    /// Parse a mode name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "full" | "document" | "both" => Some(AnalysisMode::Full),
            "outliers" | "outlier" | "diction" => Some(AnalysisMode::Outliers),
            "sentiment" => Some(AnalysisMode::Sentiment),
            _ => None,
        }
    }
}

impl std::fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisMode::Full => write!(f, "full"),
            AnalysisMode::Outliers => write!(f, "outliers"),
            AnalysisMode::Sentiment => write!(f, "sentiment"),
        }
    }
}

/// A non-blank paragraph taken into analysis.
///
/// `index` is the paragraph's position in the submitted arrays. Its analyzed
/// ordinal is its position in the filtered sequence handed to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub key: String,
    pub index: usize,
    pub text: String,
}

/// One analysis request from the editing surface
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    /// Caller correlation id, echoed on the reply
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Paragraph texts in document order
    #[serde(alias = "paragraph_array")]
    pub paragraph_array: Vec<String>,
    /// Opaque paragraph identifiers, same length and order as `paragraph_array`
    #[serde(alias = "key_array")]
    pub key_array: Vec<String>,
    /// Outputs to compute (falls back to the configured mode)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<AnalysisMode>,
}

impl AnalysisRequest {
    pub fn new(paragraphs: Vec<String>, keys: Vec<String>) -> Self {
        Self {
            id: None,
            paragraph_array: paragraphs,
            key_array: keys,
            mode: None,
        }
    }

    /// Build a request whose keys are derived from paragraph positions (`p0`, `p1`, ...).
    pub fn from_paragraphs<S: Into<String>>(paragraphs: impl IntoIterator<Item = S>) -> Self {
        let paragraph_array: Vec<String> = paragraphs.into_iter().map(Into::into).collect();
        let key_array = (0..paragraph_array.len()).map(|i| format!("p{i}")).collect();
        Self::new(paragraph_array, key_array)
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_mode(mut self, mode: AnalysisMode) -> Self {
        self.mode = Some(mode);
        self
    }
}

/// The most dissimilar sibling of one paragraph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlierEntry {
    /// Analyzed ordinal of the farthest paragraph
    pub farthest_index: usize,
    /// Key of the farthest paragraph
    pub farthest_key: String,
    /// Stylometric distance to it
    pub delta: f64,
}

/// Per-paragraph and whole-document sentiment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentStats {
    /// Analyzed ordinal -> average sentence score
    pub paragraphs: BTreeMap<usize, f64>,
    /// Mean of the paragraph scores
    pub whole_corpus_average: f64,
}

/// Result of one analysis request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Paragraphs actually analyzed (blank entries excluded)
    pub paragraph_count: usize,
    /// Analyzed ordinal -> farthest sibling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outlier_stats: Option<BTreeMap<usize, OutlierEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_stats: Option<SentimentStats>,
}

impl AnalysisResponse {
    /// Ordinals whose farthest-sibling delta is at least `threshold`.
    pub fn flagged(&self, threshold: f64) -> Vec<usize> {
        self.outlier_stats
            .iter()
            .flatten()
            .filter(|(_, entry)| entry.delta >= threshold)
            .map(|(ordinal, _)| *ordinal)
            .collect()
    }
}
