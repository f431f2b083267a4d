use crate::config::Config;
use crate::fix::TextEdit;
use crate::syntax::{SourceFile, Span};
use crate::utils::LineIndex;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone)]
/// Context passed to rules during analysis.
pub struct Context {
    /// Path to the file being analyzed.
    pub filename: PathBuf,
    /// Line index for accurate line/column mapping.
    pub line_index: LineIndex,
}

impl Context {
    /// Build the context for one source file.
    #[must_use]
    pub fn for_file(file: &SourceFile) -> Self {
        Self {
            filename: PathBuf::from(&file.path),
            line_index: LineIndex::new(&file.text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single issue found by a rule.
pub struct Finding {
    /// ID of the rule that triggered the finding.
    pub rule_id: String,
    /// Category of the rule.
    pub category: String,
    /// Severity level (e.g., "REFACTOR", "WARNING").
    pub severity: String,
    /// Description of the issue.
    pub message: String,
    /// File where the issue was found.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub col: usize,
    /// Byte range the finding is anchored at.
    pub span: Span,
    /// Correction for the issue, if the rule can apply one.
    pub fix: Option<TextEdit>,
}

#[derive(Debug, Clone, Copy, Serialize)]
/// Metadata associated with a rule.
pub struct RuleMetadata {
    /// Unique code/ID of the rule.
    pub id: &'static str,
    /// Category of the rule.
    pub category: &'static str,
}

/// Trait defining a linting rule.
///
/// Rules are pure functions of one file: they keep no state between calls
/// and may be shared across worker threads.
pub trait Rule: Send + Sync {
    /// Returns the unique code/ID of the rule.
    fn code(&self) -> &'static str {
        self.metadata().id
    }
    /// Returns the category/functional group of the rule.
    fn category(&self) -> &'static str {
        self.metadata().category
    }
    /// Returns the full metadata for the rule.
    fn metadata(&self) -> RuleMetadata;
    /// Inspect a whole file and report findings.
    fn check(&self, file: &SourceFile, context: &Context) -> Vec<Finding>;
}

/// Returns every rule enabled by the configuration.
pub fn get_rules(config: &Config) -> Vec<Box<dyn Rule>> {
    modernize::get_modernize_rules()
        .into_iter()
        .filter(|rule| config.is_rule_enabled(rule.code()))
        .collect()
}

/// Path-based classification of cookbook files.
pub mod file_role;
/// Module containing rule ID constants.
pub mod ids;
/// Module containing rules that modernize cookbooks for current Chef releases.
pub mod modernize;
