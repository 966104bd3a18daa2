//! Init command - write an example project config

use anyhow::{Context, Result};
use console::style;
use std::path::Path;

use diction::config::{AnalysisConfig, PROJECT_CONFIG_FILE};

/// Run the init command
pub fn run(dir: &Path) -> Result<()> {
    let dir = dir
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", dir.display()))?;

    if !dir.is_dir() {
        anyhow::bail!("Path is not a directory: {}", dir.display());
    }

    let existed = dir.join(PROJECT_CONFIG_FILE).exists();
    let config_path = AnalysisConfig::init_project_config(&dir)?;

    if existed {
        println!(
            "{} Already initialized at {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
    } else {
        println!(
            "{} Created {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
    }

    if let Some(user_path) = AnalysisConfig::user_config_path() {
        println!(
            "  User-wide settings go in {}",
            style(user_path.display()).dim()
        );
    }

    println!("\nNext steps:");
    println!("  {} Analyze a document", style("diction analyze draft.txt").cyan());
    println!("  {} Serve an editor", style("diction serve").cyan());

    Ok(())
}
