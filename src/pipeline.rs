//! Analysis pipeline
//!
//! Runs one request end to end:
//! 1. Validate the request shape
//! 2. Drop blank paragraphs, keeping keys aligned with texts
//! 3. Stylometry: tokens -> corpus -> vocabulary -> profiles -> z-scores -> outliers
//! 4. Sentiment: sentence tokens -> sentence scores -> paragraph and document averages
//!
//! Steps 3 and 4 are independent; the request's mode selects which run.
//! Every value built here lives for one call only.

use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::corpus::build_corpus;
use crate::error::AnalysisError;
use crate::features::Vocabulary;
use crate::models::{AnalysisMode, AnalysisRequest, AnalysisResponse, Paragraph};
use crate::outlier::{detect_outliers, OutlierMap};
use crate::profile::frequency_profiles;
use crate::sentiment;
use crate::stats::{feature_stats, z_scores, FeatureStats, ZScoreVector};
use crate::tokenize::{is_blank, sentence_tokens, word_tokens};

/// Intermediate results of the stylometric chain
#[derive(Debug, Clone)]
pub struct Stylometry {
    pub vocabulary: Vocabulary,
    pub stats: FeatureStats,
    pub z_scores: Vec<ZScoreVector>,
    pub outliers: OutlierMap,
}

/// Parameterized request handler
#[derive(Debug, Clone)]
pub struct Pipeline {
    top_k: usize,
    mode: AnalysisMode,
    parallel: bool,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

impl Pipeline {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            top_k: config.top_k,
            mode: config.mode,
            parallel: config.parallel,
        }
    }

    /// Mode used for requests that do not name one
    pub fn with_mode(mut self, mode: AnalysisMode) -> Self {
        self.mode = mode;
        self
    }

    /// Force a sequential outlier scan
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Analyze one request.
    pub fn run(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, AnalysisError> {
        let mode = request.mode.unwrap_or(self.mode);
        let paragraphs = usable_paragraphs(request)?;

        let required = if mode.wants_outliers() { 2 } else { 1 };
        if paragraphs.len() < required {
            return Err(AnalysisError::InsufficientData {
                found: paragraphs.len(),
            });
        }

        debug!(
            "Analyzing {} of {} paragraph(s), mode={}",
            paragraphs.len(),
            request.paragraph_array.len(),
            mode
        );

        let outlier_stats = if mode.wants_outliers() {
            Some(self.stylometry(&paragraphs)?.outliers)
        } else {
            None
        };

        let sentiment_stats = if mode.wants_sentiment() {
            Some(sentiment::aggregate(&sentence_tokens(&texts(&paragraphs))))
        } else {
            None
        };

        info!("Analysis complete: {} paragraph(s)", paragraphs.len());

        Ok(AnalysisResponse {
            id: request.id,
            paragraph_count: paragraphs.len(),
            outlier_stats,
            sentiment_stats,
        })
    }

    /// Run the stylometric chain over already-filtered paragraphs.
    pub fn stylometry(&self, paragraphs: &[Paragraph]) -> Result<Stylometry, AnalysisError> {
        let tokens = word_tokens(&texts(paragraphs));
        let corpus = build_corpus(&tokens);
        let vocabulary = Vocabulary::extract(&corpus, self.top_k);
        debug!(
            "Corpus has {} token(s); vocabulary has {} term(s)",
            corpus.len(),
            vocabulary.len()
        );

        let profiles = frequency_profiles(&tokens, &vocabulary);
        let stats = feature_stats(&profiles, &vocabulary)?;
        let z_scores = z_scores(&profiles, &stats);
        let outliers = detect_outliers(paragraphs, &z_scores, self.parallel);

        Ok(Stylometry {
            vocabulary,
            stats,
            z_scores,
            outliers,
        })
    }
}

/// Check the request and keep its non-blank paragraphs.
///
/// Fails with `MismatchedArrays` before looking at any text, then with
/// `EmptyInput` when nothing is left after blank filtering.
pub fn usable_paragraphs(request: &AnalysisRequest) -> Result<Vec<Paragraph>, AnalysisError> {
    if request.paragraph_array.len() != request.key_array.len() {
        return Err(AnalysisError::MismatchedArrays {
            paragraphs: request.paragraph_array.len(),
            keys: request.key_array.len(),
        });
    }

    let paragraphs: Vec<Paragraph> = request
        .paragraph_array
        .iter()
        .zip(&request.key_array)
        .enumerate()
        .filter(|(_, (text, _))| !is_blank(text))
        .map(|(index, (text, key))| Paragraph {
            key: key.clone(),
            index,
            text: text.clone(),
        })
        .collect();

    if paragraphs.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }
    Ok(paragraphs)
}

fn texts(paragraphs: &[Paragraph]) -> Vec<&str> {
    paragraphs.iter().map(|p| p.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(texts: &[&str]) -> AnalysisRequest {
        AnalysisRequest::from_paragraphs(texts.iter().copied())
    }

    #[test]
    fn test_mismatched_arrays_rejected_first() {
        let req = AnalysisRequest::new(
            vec!["a".into(), "b".into(), "c".into()],
            vec!["k1".into(), "k2".into()],
        );
        assert_eq!(
            Pipeline::default().run(&req),
            Err(AnalysisError::MismatchedArrays { paragraphs: 3, keys: 2 })
        );

        // Even an all-blank request reports the mismatch
        let req = AnalysisRequest::new(vec!["\n".into()], vec![]);
        assert_eq!(
            Pipeline::default().run(&req),
            Err(AnalysisError::MismatchedArrays { paragraphs: 1, keys: 0 })
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(Pipeline::default().run(&request(&[])), Err(AnalysisError::EmptyInput));
        assert_eq!(
            Pipeline::default().run(&request(&["\n", "  ", ""])),
            Err(AnalysisError::EmptyInput)
        );
    }

    #[test]
    fn test_single_paragraph_insufficient_for_outliers() {
        let req = request(&["Only one paragraph here."]);
        assert_eq!(
            Pipeline::default().run(&req),
            Err(AnalysisError::InsufficientData { found: 1 })
        );
        assert_eq!(
            Pipeline::default().run(&req.clone().with_mode(AnalysisMode::Outliers)),
            Err(AnalysisError::InsufficientData { found: 1 })
        );
    }

    #[test]
    fn test_single_paragraph_sentiment_only() {
        let req = request(&["What a wonderful day."]).with_mode(AnalysisMode::Sentiment);
        let response = Pipeline::default().run(&req).unwrap();
        assert_eq!(response.paragraph_count, 1);
        assert!(response.outlier_stats.is_none());
        let sentiment = response.sentiment_stats.unwrap();
        assert!(sentiment.whole_corpus_average > 0.0);
    }

    #[test]
    fn test_mode_selects_outputs() {
        let req = request(&["The cat sat.", "A dog ran."]);
        let full = Pipeline::default().run(&req).unwrap();
        assert!(full.outlier_stats.is_some());
        assert!(full.sentiment_stats.is_some());

        let outliers = Pipeline::default()
            .with_mode(AnalysisMode::Outliers)
            .run(&req)
            .unwrap();
        assert!(outliers.outlier_stats.is_some());
        assert!(outliers.sentiment_stats.is_none());
    }

    #[test]
    fn test_request_mode_overrides_pipeline_mode() {
        let req = request(&["The cat sat.", "A dog ran."]).with_mode(AnalysisMode::Sentiment);
        let response = Pipeline::default()
            .with_mode(AnalysisMode::Outliers)
            .run(&req)
            .unwrap();
        assert!(response.outlier_stats.is_none());
        assert!(response.sentiment_stats.is_some());
    }

    #[test]
    fn test_blank_paragraphs_keep_keys_aligned() {
        let req = AnalysisRequest::new(
            vec![
                "The cat sat on the mat.".into(),
                "\n".into(),
                "The cat sat on the mat.".into(),
                "Quantum entanglement defies classical locality.".into(),
            ],
            vec!["a".into(), "blank".into(), "b".into(), "c".into()],
        );
        let paragraphs = usable_paragraphs(&req).unwrap();
        assert_eq!(paragraphs.len(), 3);
        assert_eq!(paragraphs[1].key, "b");
        assert_eq!(paragraphs[1].index, 2);

        let response = Pipeline::default().run(&req).unwrap();
        assert_eq!(response.paragraph_count, 3);
        let outliers = response.outlier_stats.unwrap();
        assert_eq!(outliers[&0].farthest_index, 2);
        assert_eq!(outliers[&0].farthest_key, "c");
        assert!(outliers.values().all(|e| e.farthest_key != "blank"));
    }

    #[test]
    fn test_id_echoed() {
        let req = request(&["One.", "Two."]).with_id(42);
        assert_eq!(Pipeline::default().run(&req).unwrap().id, Some(42));
    }

    #[test]
    fn test_stylometry_respects_top_k() {
        let config = AnalysisConfig {
            top_k: 3,
            ..AnalysisConfig::default()
        };
        let req = request(&["a b c d e f", "f e d c b a g"]);
        let paragraphs = usable_paragraphs(&req).unwrap();
        let stylometry = Pipeline::new(&config).stylometry(&paragraphs).unwrap();
        assert_eq!(stylometry.vocabulary.len(), 3);
        assert_eq!(stylometry.stats.len(), 3);
        assert!(stylometry.z_scores.iter().all(|z| z.len() == 3));
    }

    #[test]
    fn test_sequential_matches_parallel() {
        let req = request(&[
            "It was the best of times.",
            "It was the worst of times!",
            "Call me Ishmael.",
            "All happy families are alike.",
        ]);
        let parallel = Pipeline::default().run(&req).unwrap();
        let sequential = Pipeline::default().sequential().run(&req).unwrap();
        assert_eq!(parallel, sequential);
    }
}
