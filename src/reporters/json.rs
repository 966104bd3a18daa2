//! JSON reporter
//!
//! Outputs the AnalysisResponse as pretty-printed JSON, in the same shape
//! the serve loop sends.

use crate::models::AnalysisResponse;
use anyhow::Result;

/// Render response as JSON
pub fn render(response: &AnalysisResponse) -> Result<String> {
    Ok(serde_json::to_string_pretty(response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report_parts;

    #[test]
    fn test_json_render_valid() {
        let (response, _) = test_report_parts();
        let json_str = render(&response).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["paragraphCount"], 3);
        assert_eq!(parsed["outlierStats"]["2"]["farthestKey"], "k0");
        assert!(parsed["sentimentStats"]["wholeCorpusAverage"].is_number());
    }

    #[test]
    fn test_json_round_trip() {
        let (response, _) = test_report_parts();
        let json_str = render(&response).expect("render JSON");
        let back: AnalysisResponse = serde_json::from_str(&json_str).expect("parse response");
        assert_eq!(back, response);
    }
}
