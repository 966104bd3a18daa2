//! Analysis configuration
//!
//! Sources, lowest to highest priority:
//! 1. Built-in defaults
//! 2. User config (`~/.config/diction/config.toml`)
//! 3. Project config (`./diction.toml`, or an explicit `--config` path)
//! 4. Environment variables (`DICTION_TOP_K`, `DICTION_MODE`, `DICTION_PARALLEL`)
//!
//! CLI flags are applied on top by the caller.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::features::MAX_VOCABULARY;
use crate::models::AnalysisMode;

/// Project config file name looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "diction.toml";

fn default_top_k() -> usize {
    MAX_VOCABULARY
}

fn default_parallel() -> bool {
    true
}

fn default_highlight_threshold() -> f64 {
    1.0
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
        .min(8)
}

/// Tunables for one analysis run
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// Vocabulary size (1-30)
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Outputs computed when a request does not name a mode
    #[serde(default)]
    pub mode: AnalysisMode,

    /// Compute outlier rows on the rayon pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Minimum farthest-sibling delta for a paragraph to be highlighted
    #[serde(default = "default_highlight_threshold")]
    pub highlight_threshold: f64,

    /// Worker threads for `diction serve`
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            mode: AnalysisMode::default(),
            parallel: default_parallel(),
            highlight_threshold: default_highlight_threshold(),
            workers: default_workers(),
        }
    }
}

/// Partial config as read from one file; unset fields leave the base alone
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    top_k: Option<usize>,
    mode: Option<AnalysisMode>,
    parallel: Option<bool>,
    highlight_threshold: Option<f64>,
    workers: Option<usize>,
}

impl AnalysisConfig {
    /// Load config from all sources.
    ///
    /// `explicit` replaces the project file lookup. A file that cannot be
    /// read or parsed is skipped with a warning, except an explicit one,
    /// which is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = AnalysisConfig::default();

        if let Some(user_path) = Self::user_config_path().filter(|p| p.exists()) {
            match read_config_file(&user_path) {
                Ok(file) => {
                    debug!("Loaded user config from {}", user_path.display());
                    config.merge(file);
                }
                Err(e) => warn!("Failed to load {}: {:#}", user_path.display(), e),
            }
        }

        match explicit {
            Some(path) => {
                let file = read_config_file(path)?;
                debug!("Loaded config from {}", path.display());
                config.merge(file);
            }
            None => {
                let project_path = PathBuf::from(PROJECT_CONFIG_FILE);
                if project_path.exists() {
                    match read_config_file(&project_path) {
                        Ok(file) => {
                            debug!("Loaded project config from {}", project_path.display());
                            config.merge(file);
                        }
                        Err(e) => warn!("Failed to load {}: {:#}", project_path.display(), e),
                    }
                }
            }
        }

        config.apply_env(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Get the user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("diction").join("config.toml"))
    }

    /// Merge a file's settings into this config (file takes priority)
    fn merge(&mut self, other: ConfigFile) {
        if let Some(top_k) = other.top_k {
            self.top_k = top_k;
        }
        if let Some(mode) = other.mode {
            self.mode = mode;
        }
        if let Some(parallel) = other.parallel {
            self.parallel = parallel;
        }
        if let Some(threshold) = other.highlight_threshold {
            self.highlight_threshold = threshold;
        }
        if let Some(workers) = other.workers {
            self.workers = workers;
        }
    }

    /// Apply `DICTION_*` overrides. Unparseable values are ignored with a warning.
    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(raw) = var("DICTION_TOP_K") {
            match raw.trim().parse() {
                Ok(top_k) => self.top_k = top_k,
                Err(_) => warn!("Ignoring DICTION_TOP_K={raw:?}: not a number"),
            }
        }
        if let Some(raw) = var("DICTION_MODE") {
            match AnalysisMode::parse(&raw) {
                Some(mode) => self.mode = mode,
                None => warn!("Ignoring DICTION_MODE={raw:?}: expected full, outliers or sentiment"),
            }
        }
        if let Some(raw) = var("DICTION_PARALLEL") {
            match raw.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.parallel = true,
                "0" | "false" | "no" | "off" => self.parallel = false,
                _ => warn!("Ignoring DICTION_PARALLEL={raw:?}: expected a boolean"),
            }
        }
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 || self.top_k > MAX_VOCABULARY {
            anyhow::bail!("top_k must be between 1 and {}, got {}", MAX_VOCABULARY, self.top_k);
        }
        if self.workers == 0 {
            anyhow::bail!("workers must be at least 1");
        }
        if !self.highlight_threshold.is_finite() || self.highlight_threshold < 0.0 {
            anyhow::bail!(
                "highlight_threshold must be a non-negative number, got {}",
                self.highlight_threshold
            );
        }
        Ok(())
    }

    /// Write an example project config, unless one already exists
    pub fn init_project_config(dir: &Path) -> Result<PathBuf> {
        let config_path = dir.join(PROJECT_CONFIG_FILE);
        if !config_path.exists() {
            let example = r#"# diction configuration

# Vocabulary size used for stylometric comparison (1-30)
top_k = 30

# Default outputs: "full", "outliers" or "sentiment"
mode = "full"

# Compute pairwise distances on all cores
parallel = true

# Highlight paragraphs whose most different sibling is at least this far away
highlight_threshold = 1.0

# Worker threads for `diction serve`
# workers = 4
"#;
            std::fs::write(&config_path, example)
                .with_context(|| format!("Failed to write {}", config_path.display()))?;
        }
        Ok(config_path)
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file: ConfigFile =
        toml::from_str(&content).with_context(|| format!("Invalid TOML in {}", path.display()))?;
    Ok(file)
}
