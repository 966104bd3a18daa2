//! Output reporters for analysis results
//!
//! Supports:
//! - `text` - Terminal output, highlighted paragraphs marked
//! - `json` - The response exactly as it goes over the wire

mod json;
mod text;

use crate::models::{AnalysisResponse, Paragraph};
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// A response together with the paragraphs it describes
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    pub response: &'a AnalysisResponse,
    /// Analyzed paragraphs, indexed by ordinal
    pub paragraphs: &'a [Paragraph],
    /// Deltas at or above this are highlighted
    pub highlight_threshold: f64,
}

/// Render a report in the specified format
pub fn report(report: &Report<'_>, format: &str) -> Result<String> {
    let fmt = OutputFormat::from_str(format)?;
    report_with_format(report, fmt)
}

/// Render a report using an OutputFormat enum
pub fn report_with_format(report: &Report<'_>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(report),
        OutputFormat::Json => json::render(report.response),
    }
}
