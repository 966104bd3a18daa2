//! Text reporter for terminal output
//!
//! Styling goes through `console`, which drops escape codes on its own
//! when stdout is not a terminal.

use super::Report;
use crate::models::Paragraph;
use anyhow::Result;
use console::style;

const PREVIEW_CHARS: usize = 48;

/// Render report as formatted terminal text
pub fn render(report: &Report<'_>) -> Result<String> {
    let response = report.response;
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", style("Diction Analysis").bold()));
    out.push_str(&format!(
        "{}\n\n",
        style(format!("{} paragraph(s) analyzed", response.paragraph_count)).dim()
    ));

    if let Some(outliers) = &response.outlier_stats {
        let flagged = response.flagged(report.highlight_threshold);
        out.push_str(&format!(
            "{} {}\n",
            style("OUTLIERS").bold(),
            style(format!(
                "({} at delta >= {:.2})",
                flagged.len(),
                report.highlight_threshold
            ))
            .dim()
        ));

        for (&ordinal, entry) in outliers {
            let is_flagged = flagged.contains(&ordinal);
            let marker = if is_flagged {
                style("!").red().bold().to_string()
            } else {
                " ".to_string()
            };
            let delta = format!("{:.3}", entry.delta);
            let delta = if is_flagged {
                style(delta).red().to_string()
            } else {
                delta
            };
            out.push_str(&format!(
                "  {} [{}] {:<10} -> [{}] {:<10} delta {}\n",
                marker,
                ordinal,
                key_of(report.paragraphs, ordinal),
                entry.farthest_index,
                entry.farthest_key,
                delta
            ));
            out.push_str(&format!(
                "        {}\n",
                style(preview(report.paragraphs, ordinal)).dim()
            ));
        }
        out.push('\n');
    }

    if let Some(sentiment) = &response.sentiment_stats {
        out.push_str(&format!("{}\n", style("SENTIMENT").bold()));
        for (&ordinal, &score) in &sentiment.paragraphs {
            out.push_str(&format!(
                "    [{}] {:<10} {}\n",
                ordinal,
                key_of(report.paragraphs, ordinal),
                signed(score)
            ));
        }
        out.push_str(&format!(
            "  Document average: {}\n",
            signed(sentiment.whole_corpus_average)
        ));
    }

    Ok(out)
}

fn key_of(paragraphs: &[Paragraph], ordinal: usize) -> &str {
    paragraphs.get(ordinal).map(|p| p.key.as_str()).unwrap_or("?")
}

fn preview(paragraphs: &[Paragraph], ordinal: usize) -> String {
    let Some(paragraph) = paragraphs.get(ordinal) else {
        return String::new();
    };
    let text = paragraph.text.trim();
    if text.chars().count() <= PREVIEW_CHARS {
        format!("\"{}\"", text)
    } else {
        let cut: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("\"{}...\"", cut.trim_end())
    }
}

fn signed(score: f64) -> String {
    let text = format!("{:+.3}", score);
    if score > 0.0 {
        style(text).green().to_string()
    } else if score < 0.0 {
        style(text).red().to_string()
    } else {
        text
    }
}
