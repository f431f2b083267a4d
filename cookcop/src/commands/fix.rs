//! Autocorrect command.

use crate::analyzer::{AnalysisResult, Analyzer};
use crate::cst::RubyParser;
use crate::fix::{ByteRangeRewriter, TextEdit};
use crate::utils::{normalize_display_path, validate_output_path};

use anyhow::Result;
use colored::Colorize;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Options for `--fix`
#[derive(Debug, Default)]
pub struct FixOptions {
    /// Dry-run mode (show what would change)
    pub dry_run: bool,
    /// Verbose output
    pub verbose: bool,
}

/// Result of fixing one file
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FixResult {
    /// File that was fixed
    pub file: String,
    /// Number of corrections applied (or that would be applied in dry-run mode)
    pub fixes: usize,
    /// Whether the file was left untouched because of `--dry-run`
    pub dry_run: bool,
}

/// Apply the corrections carried by the findings in `results`.
///
/// Each affected file is read again and re-analyzed before editing, so edits
/// are computed against what is on disk now rather than what was analyzed
/// earlier. A corrected file is only written if it still parses, and only
/// when it lies inside the analyzer's analysis root.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails or a corrected file cannot be written.
pub fn run_fix<W: Write>(
    results: &AnalysisResult,
    analyzer: &Analyzer,
    options: &FixOptions,
    mut writer: W,
) -> Result<Vec<FixResult>> {
    if options.dry_run {
        writeln!(
            writer,
            "\n{}",
            "[DRY-RUN] Corrections that would be applied:".yellow()
        )?;
    } else {
        writeln!(writer, "\n{}", "Applying corrections...".cyan())?;
    }

    let files = collect_files_to_fix(results);
    if files.is_empty() {
        writeln!(writer, "  No correctable findings.")?;
        return Ok(vec![]);
    }

    if options.verbose {
        let total: usize = files.iter().map(|(_, count)| count).sum();
        writeln!(writer, "[VERBOSE] Fix Statistics:")?;
        writeln!(writer, "   Files to modify: {}", files.len())?;
        writeln!(writer, "   Corrections: {total}")?;
        writeln!(writer)?;
    }

    let mut parser = RubyParser::new()?;
    let mut all_results = Vec::new();
    for (file_path, _) in files {
        if let Some(res) = fix_file(&mut writer, &mut parser, analyzer, &file_path, options)? {
            all_results.push(res);
        }
    }

    Ok(all_results)
}

/// Files with at least one correctable finding, with their finding counts, in path order.
fn collect_files_to_fix(results: &AnalysisResult) -> Vec<(PathBuf, usize)> {
    let mut by_file: FxHashMap<&Path, usize> = FxHashMap::default();
    for finding in results.findings.iter().filter(|f| f.fix.is_some()) {
        *by_file.entry(finding.file.as_path()).or_default() += 1;
    }

    let mut files: Vec<(PathBuf, usize)> = by_file
        .into_iter()
        .map(|(path, count)| (path.to_path_buf(), count))
        .collect();
    files.sort();
    files
}

fn fix_file<W: Write>(
    writer: &mut W,
    parser: &mut RubyParser,
    analyzer: &Analyzer,
    file_path: &Path,
    options: &FixOptions,
) -> Result<Option<FixResult>> {
    let display = normalize_display_path(file_path);

    let target = match std::path::absolute(file_path)
        .map_err(anyhow::Error::from)
        .and_then(|absolute| validate_output_path(&absolute, Some(&analyzer.analysis_root)))
    {
        Ok(target) => target,
        Err(e) => {
            log::warn!("{e}");
            writeln!(writer, "  {} {display}: {e}", "Skip:".yellow())?;
            return Ok(None);
        }
    };

    let content = match fs::read_to_string(&target) {
        Ok(c) => c,
        Err(e) => {
            writeln!(writer, "  {} {display}: {e}", "Skip:".yellow())?;
            return Ok(None);
        }
    };

    let findings = match analyzer.analyze_code(&content, file_path) {
        Ok(findings) => findings,
        Err(e) => {
            writeln!(writer, "  {} {display}: {e}", "Parse error:".red())?;
            return Ok(None);
        }
    };

    let edits: Vec<TextEdit> = findings.iter().filter_map(|f| f.fix.clone()).collect();
    if edits.is_empty() {
        log::debug!("{display}: nothing left to correct");
        return Ok(None);
    }

    if options.dry_run {
        for finding in findings.iter().filter(|f| f.fix.is_some()) {
            writeln!(
                writer,
                "  Would correct {} at {display}:{}",
                finding.rule_id, finding.line
            )?;
        }
        return Ok(Some(FixResult {
            file: display,
            fixes: edits.len(),
            dry_run: true,
        }));
    }

    let count = edits.len();
    let mut rewriter = ByteRangeRewriter::new(content);
    rewriter.add_edits(edits);
    let fixed = match rewriter.apply() {
        Ok(fixed) => fixed,
        Err(e) => {
            writeln!(writer, "  {} {display}: {e}", "Skip:".yellow())?;
            return Ok(None);
        }
    };

    if !parser.is_valid(&fixed) {
        log::warn!("{display}: corrected source no longer parses, leaving file unchanged");
        writeln!(
            writer,
            "  {} {display}: correction would break the file",
            "Skip:".yellow()
        )?;
        return Ok(None);
    }

    fs::write(&target, fixed)?;
    writeln!(
        writer,
        "  {} {display} ({count} corrected)",
        "Fixed:".green()
    )?;
    Ok(Some(FixResult {
        file: display,
        fixes: count,
        dry_run: false,
    }))
}
