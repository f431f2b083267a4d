use crate::analyzer::{AnalysisResult, AnalysisSummary, FileError};
use crate::rules::Finding;
use crate::utils::normalize_display_path;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::Write;
use std::time::Duration;

/// Print the exclusion list in styled format.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_exclusion_list(writer: &mut impl Write, folders: &[String]) -> std::io::Result<()> {
    if folders.is_empty() {
        let mut defaults: Vec<&str> = crate::constants::DEFAULT_EXCLUDE_FOLDERS()
            .iter()
            .copied()
            .collect();
        defaults.sort_unstable();
        writeln!(
            writer,
            "{} {}",
            "[OK] Using default exclusions only:".green(),
            defaults.join(", ").dimmed()
        )?;
    } else {
        writeln!(writer, "{} {}", "Excluding:".yellow().bold(), folders.join(", "))?;
    }
    Ok(())
}

/// Create a progress bar with file count.
///
/// In test mode, returns a hidden progress bar to avoid polluting test output.
#[must_use]
pub fn create_progress_bar(total_files: u64) -> ProgressBar {
    if cfg!(test) {
        return ProgressBar::hidden();
    }

    let pb =
        ProgressBar::with_draw_target(Some(total_files), ProgressDrawTarget::stderr_with_hz(20));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );
    pb.set_message("inspecting...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.tick();
    pb
}

/// Print the main header with box-drawing characters.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_header(writer: &mut impl Write) -> std::io::Result<()> {
    writeln!(writer)?;
    writeln!(
        writer,
        "{}",
        "╔════════════════════════════════════════╗".cyan()
    )?;
    writeln!(
        writer,
        "{}",
        "║  Cookbook Inspection Results           ║".cyan().bold()
    )?;
    writeln!(
        writer,
        "{}",
        "╚════════════════════════════════════════╝".cyan()
    )?;
    writeln!(writer)?;
    Ok(())
}

/// First letter of the severity, as RuboCop prints it (`R`, `C`, `W`, ...).
fn severity_letter(severity: &str) -> String {
    severity
        .chars()
        .next()
        .map(|c| c.to_ascii_uppercase().to_string())
        .unwrap_or_default()
}

/// Format one finding as `path:line:col: R: [Correctable] Rule/Id: message`.
#[must_use]
pub fn format_finding(finding: &Finding) -> String {
    let location = format!(
        "{}:{}:{}",
        normalize_display_path(&finding.file),
        finding.line,
        finding.col
    );
    let correctable = if finding.fix.is_some() {
        format!("{} ", "[Correctable]".yellow())
    } else {
        String::new()
    };
    format!(
        "{}: {}: {}{}: {}",
        location.cyan(),
        severity_letter(&finding.severity).yellow(),
        correctable,
        finding.rule_id.bold(),
        finding.message
    )
}

/// Print one line per finding.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_findings(writer: &mut impl Write, findings: &[Finding]) -> std::io::Result<()> {
    for finding in findings {
        writeln!(writer, "{}", format_finding(finding))?;
    }
    Ok(())
}

/// Helper to create a standard table with headers.
fn create_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);
    table
}

/// Print files that could not be read or parsed.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_file_errors(writer: &mut impl Write, errors: &[FileError]) -> std::io::Result<()> {
    if errors.is_empty() {
        return Ok(());
    }

    writeln!(writer, "\n{}", "Skipped Files".bold().underline().red())?;

    let mut table = create_table(vec!["File", "Error"]);
    for e in errors {
        table.add_row(vec![
            Cell::new(normalize_display_path(&e.file)).fg(Color::Red),
            Cell::new(&e.error),
        ]);
    }
    writeln!(writer, "{table}")?;
    Ok(())
}

/// Print the summary table.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_summary(writer: &mut impl Write, summary: &AnalysisSummary) -> std::io::Result<()> {
    fn count_cell(count: usize) -> Cell {
        if count == 0 {
            Cell::new(count).fg(Color::Green)
        } else {
            Cell::new(count).fg(Color::Red).add_attribute(Attribute::Bold)
        }
    }

    let mut table = create_table(vec!["Files", "Lines", "Offenses", "Correctable", "Skipped"]);
    table.add_row(vec![
        Cell::new(summary.total_files),
        Cell::new(summary.total_lines_analyzed),
        count_cell(summary.findings_count),
        count_cell(summary.fixable_count),
        count_cell(summary.file_errors_count),
    ]);
    writeln!(writer, "\n{table}")?;
    Ok(())
}

/// Print the full human-readable report.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_report(writer: &mut impl Write, result: &AnalysisResult) -> std::io::Result<()> {
    print_header(writer)?;

    if result.findings.is_empty() && result.file_errors.is_empty() {
        writeln!(writer, "{}", "[OK] No offenses detected.".green().bold())?;
    } else {
        print_findings(writer, &result.findings)?;
        print_file_errors(writer, &result.file_errors)?;
    }

    print_summary(writer, &result.analysis_summary)
}

/// Print only the findings and a one-line recap.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_report_quiet(writer: &mut impl Write, result: &AnalysisResult) -> std::io::Result<()> {
    print_findings(writer, &result.findings)?;
    let summary = &result.analysis_summary;
    writeln!(
        writer,
        "\n{} files inspected, {} offenses detected, {} correctable",
        summary.total_files, summary.findings_count, summary.fixable_count
    )?;
    Ok(())
}
