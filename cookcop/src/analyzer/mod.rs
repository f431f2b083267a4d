//! cookcop analyzer module.
//!
//! This module contains the file-level analysis engine, broken down into:
//! - `types`: Result types (`AnalysisResult`, `FileError`, `AnalysisSummary`)
//! - `builder`: Builder-style configuration
//! - `processing`: File discovery, parallel processing and aggregation
//! - Core `Analyzer` struct

mod builder;
mod processing;
/// Result types and analysis summaries.
pub mod types;

pub use types::{AnalysisResult, AnalysisSummary, FileError};

use crate::config::Config;
use crate::linter::Linter;
use std::path::PathBuf;
use std::sync::Arc;

/// The main analyzer struct.
/// Configuration options for the analysis are stored here.
pub struct Analyzer {
    /// Folders to exclude from analysis.
    pub exclude_folders: Vec<String>,
    /// Folders to force-include in analysis (overrides default exclusions).
    pub include_folders: Vec<String>,
    /// Progress bar for tracking analysis progress (thread-safe).
    pub progress_bar: Option<Arc<indicatif::ProgressBar>>,
    /// Directory that `--fix` may write inside.
    pub analysis_root: PathBuf,
    linter: Linter,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Analyzer {
    /// Creates an analyzer seeded with the folders and rules from `config`.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            exclude_folders: config.exclude_folders().to_vec(),
            include_folders: config.include_folders().to_vec(),
            linter: Linter::from_config(config),
            progress_bar: None,
            analysis_root: PathBuf::from("."),
        }
    }

    /// Counts the Ruby files that would be analyzed.
    /// Useful for sizing a progress bar before analysis.
    #[must_use]
    pub fn count_files(&self, paths: &[PathBuf]) -> usize {
        self.collect_files(paths).map_or(0, |files| files.len())
    }
}
