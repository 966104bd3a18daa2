//! Error types for the analysis engine
//!
//! Only structural contract violations are surfaced here. Numerically
//! degenerate inputs (empty paragraphs, zero-variance features, paragraphs
//! without sentences) are resolved where they occur and never become errors.

use thiserror::Error;

/// Errors that can occur while analyzing a paragraph batch
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("No usable paragraphs: every submitted paragraph is blank")]
    EmptyInput,

    #[error("Insufficient data: {found} usable paragraph(s), at least 2 are required")]
    InsufficientData { found: usize },

    #[error("Mismatched arrays: {paragraphs} paragraph(s) but {keys} key(s)")]
    MismatchedArrays { paragraphs: usize, keys: usize },
}

impl AnalysisError {
    /// Stable kind name used on the wire
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::EmptyInput => "EmptyInput",
            AnalysisError::InsufficientData { .. } => "InsufficientData",
            AnalysisError::MismatchedArrays { .. } => "MismatchedArrays",
        }
    }
}

/// Errors from the channel-based engine front end
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Analysis engine is shut down")]
    Closed,
}
