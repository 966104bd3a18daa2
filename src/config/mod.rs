//! Configuration module for diction
//!
//! This module handles:
//! - Project-level configuration (diction.toml)
//! - User-level configuration (~/.config/diction/config.toml)
//! - Environment overrides

mod analysis_config;

pub use analysis_config::{AnalysisConfig, PROJECT_CONFIG_FILE};
