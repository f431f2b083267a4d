//! Processing methods for the analyzer.
//!
//! Contains: `analyze_paths`, `analyze_code`, file collection and aggregation.

use super::{AnalysisResult, AnalysisSummary, Analyzer, FileError};
use crate::constants::RUBY_EXTENSION;
use crate::cst::{ParseError, RubyParser};
use crate::rules::Finding;
use crate::utils::{collect_ruby_files, normalize_display_path};
use anyhow::Result;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Number of files to process per chunk in parallel processing.
/// Bounds how many sources are held in memory at once on very large repos.
const CHUNK_SIZE: usize = 500;

/// What a single file contributed to the analysis.
struct FileOutcome {
    findings: Vec<Finding>,
    error: Option<FileError>,
    lines: usize,
}

impl FileOutcome {
    fn failed(file_path: &Path, error: String) -> Self {
        Self {
            findings: Vec::new(),
            error: Some(FileError {
                file: file_path.to_path_buf(),
                error,
            }),
            lines: 0,
        }
    }
}

impl Analyzer {
    /// Runs the analysis on multiple paths (files or directories).
    ///
    /// Directories are walked for `.rb` files; files named explicitly are
    /// analyzed even inside excluded folders. With no paths the current
    /// directory is analyzed.
    ///
    /// # Errors
    ///
    /// Returns an error if one of `paths` does not exist. Files that cannot
    /// be read or parsed are reported in [`AnalysisResult::file_errors`]
    /// instead.
    pub fn analyze_paths(&self, paths: &[PathBuf]) -> Result<AnalysisResult> {
        let files = self.collect_files(paths)?;
        log::debug!("analyzing {} Ruby file(s)", files.len());

        let mut outcomes = Vec::with_capacity(files.len());
        for chunk in files.chunks(CHUNK_SIZE) {
            let chunk_outcomes: Vec<FileOutcome> = chunk
                .par_iter()
                .map_init(RubyParser::new, |parser, file_path| {
                    let outcome = match parser {
                        Ok(parser) => self.process_single_file(parser, file_path),
                        Err(e) => FileOutcome::failed(file_path, e.to_string()),
                    };
                    if let Some(pb) = &self.progress_bar {
                        pb.inc(1);
                    }
                    outcome
                })
                .collect();
            outcomes.extend(chunk_outcomes);
        }

        Ok(Self::aggregate_results(outcomes, files.len()))
    }

    /// Analyzes source code held in memory as if it lived at `file_path`.
    ///
    /// The path only drives file classification; nothing is read from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the source is not valid Ruby.
    pub fn analyze_code(&self, code: &str, file_path: &Path) -> Result<Vec<Finding>, ParseError> {
        let mut parser = RubyParser::new()?;
        self.lint_source(&mut parser, code, file_path)
    }

    /// Resolves `paths` into the sorted, de-duplicated list of Ruby files to analyze.
    pub(super) fn collect_files(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let current_dir = [PathBuf::from(".")];
        let paths = if paths.is_empty() {
            &current_dir[..]
        } else {
            paths
        };

        let mut files = Vec::new();
        for path in paths {
            if path.is_file() {
                if path.extension().is_some_and(|ext| ext == RUBY_EXTENSION) {
                    files.push(path.clone());
                } else {
                    log::debug!("skipping non-Ruby file {}", path.display());
                }
            } else if path.is_dir() {
                files.extend(collect_ruby_files(
                    path,
                    &self.exclude_folders,
                    &self.include_folders,
                ));
            } else {
                anyhow::bail!("No such file or directory: {}", path.display());
            }
        }

        files.sort();
        files.dedup();
        Ok(files)
    }

    fn process_single_file(&self, parser: &mut RubyParser, file_path: &Path) -> FileOutcome {
        let source = match fs::read_to_string(file_path) {
            Ok(source) => source,
            Err(e) => {
                log::warn!("failed to read {}: {e}", file_path.display());
                return FileOutcome::failed(file_path, format!("Failed to read file: {e}"));
            }
        };

        let lines = source.lines().count();
        match self.lint_source(parser, &source, file_path) {
            Ok(findings) => FileOutcome {
                findings,
                error: None,
                lines,
            },
            Err(e) => {
                log::debug!("{}: {e}", file_path.display());
                FileOutcome {
                    lines,
                    ..FileOutcome::failed(file_path, e.to_string())
                }
            }
        }
    }

    fn lint_source(
        &self,
        parser: &mut RubyParser,
        source: &str,
        file_path: &Path,
    ) -> Result<Vec<Finding>, ParseError> {
        let file = parser.parse(&normalize_display_path(file_path), source)?;
        Ok(self.linter.lint(&file))
    }

    fn aggregate_results(outcomes: Vec<FileOutcome>, total_files: usize) -> AnalysisResult {
        let mut result = AnalysisResult::default();
        let mut total_lines = 0;

        for outcome in outcomes {
            total_lines += outcome.lines;
            result.findings.extend(outcome.findings);
            result.file_errors.extend(outcome.error);
        }

        result
            .findings
            .sort_by(|a, b| (&a.file, a.line, a.col).cmp(&(&b.file, b.line, b.col)));

        result.analysis_summary = AnalysisSummary {
            total_files,
            total_lines_analyzed: total_lines,
            findings_count: result.findings.len(),
            fixable_count: result.findings.iter().filter(|f| f.fix.is_some()).count(),
            file_errors_count: result.file_errors.len(),
        };
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tempfile::tempdir;

    #[test]
    fn test_analyze_code_uses_path_for_classification() {
        let analyzer = Analyzer::default();
        let source = "include Chef::Mixin::ShellOut\n";

        let findings = analyzer
            .analyze_code(source, Path::new("cookbook/resources/x.rb"))
            .unwrap();
        assert_eq!(findings.len(), 1);

        let findings = analyzer
            .analyze_code(source, Path::new("cookbook/recipes/x.rb"))
            .unwrap();
        assert!(findings.is_empty());
    }

    #[test]
    fn test_analyze_code_rejects_invalid_ruby() {
        let analyzer = Analyzer::default();
        assert!(analyzer
            .analyze_code("class Foo\n", Path::new("resources/x.rb"))
            .is_err());
    }

    #[test]
    fn test_analyze_paths_aggregates_and_sorts() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path();
        fs::create_dir_all(root.join("resources"))?;
        fs::create_dir_all(root.join("providers"))?;
        fs::write(
            root.join("resources/b.rb"),
            "require 'chef/mixin/shell_out'\n",
        )?;
        fs::write(
            root.join("providers/a.rb"),
            "require 'chef/mixin/powershell_out'\ninclude Chef::Mixin::PowershellOut\n",
        )?;
        fs::write(root.join("resources/broken.rb"), "def oops(\n")?;

        let result = Analyzer::new(&Config::default()).analyze_paths(&[root.to_path_buf()])?;
        assert_eq!(result.analysis_summary.total_files, 3);
        assert_eq!(result.analysis_summary.findings_count, 3);
        assert_eq!(result.analysis_summary.fixable_count, 3);
        assert_eq!(result.file_errors.len(), 1);
        assert!(result.findings[0].file.ends_with("providers/a.rb"));
        assert_eq!(result.findings[1].line, 2);
        assert!(result.findings[2].file.ends_with("resources/b.rb"));
        Ok(())
    }

    #[test]
    fn test_analyze_paths_missing_path_is_an_error() {
        let analyzer = Analyzer::default();
        let missing = PathBuf::from("definitely/not/here");
        assert!(analyzer.analyze_paths(&[missing]).is_err());
    }

    #[test]
    fn test_explicit_file_inside_excluded_folder_is_analyzed() -> Result<()> {
        let dir = tempdir()?;
        let resources = dir.path().join("vendor").join("resources");
        fs::create_dir_all(&resources)?;
        let file = resources.join("x.rb");
        fs::write(&file, "include Chef::Mixin::ShellOut\n")?;

        let analyzer = Analyzer::default();
        assert!(analyzer.analyze_paths(&[dir.path().to_path_buf()])?.is_clean());
        assert_eq!(analyzer.analyze_paths(&[file])?.findings.len(), 1);
        Ok(())
    }
}
