//! Analyze command - run one document through the pipeline

use anyhow::{Context, Result};
use console::style;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use diction::config::AnalysisConfig;
use diction::models::AnalysisRequest;
use diction::pipeline::{usable_paragraphs, Pipeline};
use diction::reporters::{self, Report};

pub struct AnalyzeArgs<'a> {
    pub config: &'a AnalysisConfig,
    pub input: Option<&'a Path>,
    pub format: &'a str,
    pub request_json: bool,
    pub output: Option<&'a Path>,
}

/// Run the analyze command
pub fn run(args: AnalyzeArgs<'_>) -> Result<()> {
    let raw = read_input(args.input)?;
    let request = if args.request_json {
        serde_json::from_str::<AnalysisRequest>(&raw).context("Invalid JSON request")?
    } else {
        request_from_lines(&raw)
    };
    debug!(
        "Read {} paragraph(s) from {}",
        request.paragraph_array.len(),
        args.input.map(|p| p.display().to_string()).unwrap_or_else(|| "stdin".into())
    );

    let response = Pipeline::new(args.config).run(&request)?;
    let paragraphs = usable_paragraphs(&request)?;

    let rendered = reporters::report(
        &Report {
            response: &response,
            paragraphs: &paragraphs,
            highlight_threshold: args.config.highlight_threshold,
        },
        args.format,
    )?;

    match args.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} Report written to: {}",
                style("✓").green(),
                style(path.display()).cyan()
            );
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

/// One paragraph per line, keyed `p0`, `p1`, ... by line position
fn request_from_lines(raw: &str) -> AnalysisRequest {
    AnalysisRequest::from_paragraphs(raw.lines())
}
