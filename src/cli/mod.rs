//! CLI command definitions and handlers

mod analyze;
mod init;
mod serve;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use diction::config::AnalysisConfig;
use diction::features::MAX_VOCABULARY;
use diction::models::AnalysisMode;

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// Parse and validate vocabulary size (1-30)
fn parse_top_k(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 || n > MAX_VOCABULARY {
        Err(format!("top-k must be between 1 and {}", MAX_VOCABULARY))
    } else {
        Ok(n)
    }
}

fn parse_mode(s: &str) -> Result<AnalysisMode, String> {
    AnalysisMode::parse(s).ok_or_else(|| format!("'{}' is not one of full, outliers, sentiment", s))
}

/// diction - find the paragraph that does not sound like the rest
#[derive(Parser, Debug)]
#[command(name = "diction")]
#[command(
    version,
    about = "Stylometric outlier detection and sentiment scoring for prose paragraphs",
    after_help = "\
Examples:
  diction analyze chapter.txt                 One paragraph per line
  cat draft.txt | diction analyze --format json
  diction analyze --request request.json      Read an editor request
  diction serve --workers 4                   JSON Lines over stdin/stdout"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Config file to use instead of ./diction.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a document, one paragraph per line
    Analyze {
        /// Input file ("-" or absent reads stdin)
        input: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Outputs to compute: full, outliers, sentiment
        #[arg(long, value_parser = parse_mode)]
        mode: Option<AnalysisMode>,

        /// Vocabulary size for stylometric comparison (1-30)
        #[arg(long, value_parser = parse_top_k)]
        top_k: Option<usize>,

        /// Highlight paragraphs whose farthest delta is at least this
        #[arg(long)]
        threshold: Option<f64>,

        /// Treat input as a JSON request with paragraphArray and keyArray
        #[arg(long)]
        request: bool,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Answer JSON Lines requests on stdin until it closes
    Serve {
        /// Number of worker threads (1-64)
        #[arg(long, value_parser = parse_workers)]
        workers: Option<usize>,
    },

    /// Write an example diction.toml in the current directory
    Init,
}

/// Run the CLI command
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init => init::run(&std::env::current_dir()?),

        Commands::Analyze {
            input,
            format,
            mode,
            top_k,
            threshold,
            request,
            output,
        } => {
            let mut config = AnalysisConfig::load(cli.config.as_deref())?;
            if let Some(mode) = mode {
                config.mode = mode;
            }
            if let Some(top_k) = top_k {
                config.top_k = top_k;
            }
            if let Some(threshold) = threshold {
                config.highlight_threshold = threshold;
            }
            config.validate()?;
            analyze::run(analyze::AnalyzeArgs {
                config: &config,
                input: input.as_deref(),
                format: &format,
                request_json: request,
                output: output.as_deref(),
            })
        }

        Commands::Serve { workers } => {
            let mut config = AnalysisConfig::load(cli.config.as_deref())?;
            if let Some(workers) = workers {
                config.workers = workers;
            }
            serve::run(&config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_workers() {
        assert_eq!(parse_workers("4"), Ok(4));
        assert!(parse_workers("0").is_err());
        assert!(parse_workers("65").is_err());
        assert!(parse_workers("many").is_err());
    }

    #[test]
    fn test_parse_top_k() {
        assert_eq!(parse_top_k("30"), Ok(30));
        assert!(parse_top_k("31").is_err());
        assert!(parse_top_k("0").is_err());
    }

    #[test]
    fn test_cli_parses_analyze() {
        let cli = Cli::parse_from([
            "diction", "analyze", "draft.txt", "--format", "json", "--mode", "sentiment",
            "--top-k", "10",
        ]);
        match cli.command {
            Commands::Analyze {
                input,
                format,
                mode,
                top_k,
                ..
            } => {
                assert_eq!(input, Some(PathBuf::from("draft.txt")));
                assert_eq!(format, "json");
                assert_eq!(mode, Some(AnalysisMode::Sentiment));
                assert_eq!(top_k, Some(10));
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn test_cli_rejects_bad_mode() {
        assert!(Cli::try_parse_from(["diction", "analyze", "--mode", "pacing"]).is_err());
    }
}
