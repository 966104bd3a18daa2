//! diction - paragraph-level stylometry and sentiment for prose editors
//!
//! Given the paragraphs of a document (each with a caller-chosen key),
//! diction answers two questions:
//!
//! - **Which paragraph reads least like each other one?** Word frequencies
//!   over the document's most common terms are standardized into z-scores,
//!   and every paragraph is paired with the sibling at the largest
//!   Burrows' Delta distance.
//! - **How positive or negative is each paragraph?** Sentences are scored
//!   against an AFINN-style lexicon and averaged per paragraph and for the
//!   whole document.
//!
//! ```no_run
//! use diction::{analyze, AnalysisConfig, AnalysisRequest};
//!
//! let request = AnalysisRequest::from_paragraphs(["The cat sat.", "A storm rolled in."]);
//! let response = analyze(&request, &AnalysisConfig::default())?;
//! println!("{}", serde_json::to_string(&response)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod features;
pub mod models;
pub mod outlier;
pub mod pipeline;
pub mod profile;
pub mod reporters;
pub mod sentiment;
pub mod stats;
pub mod tokenize;

pub use config::AnalysisConfig;
pub use engine::{AnalysisEngine, Reply};
pub use error::{AnalysisError, EngineError};
pub use models::{
    AnalysisMode, AnalysisRequest, AnalysisResponse, OutlierEntry, Paragraph, SentimentStats,
};
pub use pipeline::Pipeline;

/// Analyze one request with the given settings.
pub fn analyze(
    request: &AnalysisRequest,
    config: &AnalysisConfig,
) -> Result<AnalysisResponse, AnalysisError> {
    Pipeline::new(config).run(request)
}
