//! Type definitions for analysis results.

use crate::rules::Finding;
use serde::Serialize;

/// A file that could not be read or parsed.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct FileError {
    /// The file where the error occurred.
    pub file: std::path::PathBuf,
    /// The error message.
    pub error: String,
}

/// Holds the results of the analysis.
/// This struct is serialized to JSON if requested.
#[derive(Debug, Serialize, Default)]
pub struct AnalysisResult {
    /// Findings across all files, sorted by file, line and column.
    pub findings: Vec<Finding>,
    /// Files that were skipped because they could not be read or parsed.
    pub file_errors: Vec<FileError>,
    /// Summary statistics of the analysis.
    pub analysis_summary: AnalysisSummary,
}

impl AnalysisResult {
    /// Whether anything was reported.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Summary statistics for the analysis result.
#[derive(Debug, Serialize, Default, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisSummary {
    /// Total number of files scanned.
    pub total_files: usize,
    /// Total number of lines analyzed.
    pub total_lines_analyzed: usize,
    /// Total number of findings.
    pub findings_count: usize,
    /// Findings that carry an automatic correction.
    pub fixable_count: usize,
    /// Files that could not be read or parsed.
    pub file_errors_count: usize,
}
