use crate::analyzer::Analyzer;
use crate::cli::Cli;
use crate::commands::{run_fix, FixOptions};
use crate::config::Config;
use crate::utils::normalize_display_path;
use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Exit code when offenses remain after the run.
const EXIT_OFFENSES: i32 = 1;
/// Exit code for usage errors and missing paths.
const EXIT_USAGE: i32 = 2;

/// Runs cookcop with the given arguments, writing to stdout.
///
/// # Errors
///
/// Returns an error if the analysis or a fix fails in a way that cannot be
/// reported per file.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Run cookcop with the given arguments, writing output to the specified writer.
///
/// This is the testable version of `run_with_args` that allows output capture.
/// Returns the process exit code: `0` when no offense remains, `1` when
/// offenses remain, `2` for usage errors.
///
/// # Errors
///
/// Returns an error if the analysis or a fix fails in a way that cannot be
/// reported per file.
pub fn run_with_args_to<W: std::io::Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["cookcop".to_owned()];
    program_args.extend(args);
    let cli = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                write!(writer, "{e}")?;
                writer.flush()?;
                return Ok(0);
            }
            _ => {
                eprint!("{e}");
                return Ok(EXIT_USAGE);
            }
        },
    };

    if cli.output.no_color {
        colored::control::set_override(false);
    }

    let paths: Vec<PathBuf> = match &cli.paths.root {
        Some(root) => vec![root.clone()],
        None if cli.paths.paths.is_empty() => vec![PathBuf::from(".")],
        None => cli.paths.paths.clone(),
    };
    for path in &paths {
        if !path.exists() {
            eprintln!(
                "Error: The file or directory '{}' does not exist.",
                path.display()
            );
            return Ok(EXIT_USAGE);
        }
    }

    let config = Config::load_from_path(&paths[0]);
    let analysis_root = fix_boundary(&cli);

    if cli.output.verbose && !cli.output.json {
        print_verbose_header(&cli, &config, &paths);
    }

    let mut analyzer = Analyzer::new(&config)
        .with_excludes(cli.exclude_folders.clone())
        .with_includes(cli.include_folders.clone())
        .with_root(analysis_root);

    let human = !cli.output.json;
    if human && !cli.output.quiet {
        crate::output::print_exclusion_list(writer, &analyzer.exclude_folders)?;
    }

    let progress = if human && !cli.output.quiet {
        let total = analyzer.count_files(&paths);
        let pb = Arc::new(crate::output::create_progress_bar(total as u64));
        analyzer = analyzer.with_progress(Arc::clone(&pb));
        Some(pb)
    } else {
        None
    };

    let result = analyzer.analyze_paths(&paths)?;
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    if human {
        if cli.output.quiet {
            crate::output::print_report_quiet(writer, &result)?;
        } else {
            crate::output::print_report(writer, &result)?;
        }
    }

    let mut fixes = Vec::new();
    if cli.fix && !result.is_clean() {
        let options = FixOptions {
            dry_run: cli.dry_run,
            verbose: cli.output.verbose,
        };
        fixes = if human {
            run_fix(&result, &analyzer, &options, &mut *writer)?
        } else {
            run_fix(&result, &analyzer, &options, std::io::sink())?
        };
    }

    let applied = fixes.iter().any(|f| !f.dry_run);
    let remaining = if applied {
        analyzer.analyze_paths(&paths)?.analysis_summary.findings_count
    } else {
        result.analysis_summary.findings_count
    };

    if !human {
        let mut value = serde_json::to_value(&result)?;
        if cli.fix {
            value["fixes"] = serde_json::to_value(&fixes)?;
            value["remaining_findings"] = remaining.into();
        }
        writeln!(writer, "{}", serde_json::to_string_pretty(&value)?)?;
    }

    log::debug!("{remaining} offense(s) remaining");
    Ok(if remaining > 0 { EXIT_OFFENSES } else { 0 })
}

/// The directory `--fix` may write inside.
///
/// `--root` wins. A single positional path is its own boundary (a file
/// contributes its parent folder). Anything else falls back to the current
/// directory.
fn fix_boundary(cli: &Cli) -> PathBuf {
    if let Some(root) = &cli.paths.root {
        return root.clone();
    }
    match cli.paths.paths.as_slice() {
        [only] if only.is_dir() => only.clone(),
        [only] => only
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
        _ => PathBuf::from("."),
    }
}

fn print_verbose_header(cli: &Cli, config: &Config, paths: &[PathBuf]) {
    eprintln!("[VERBOSE] cookcop v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("[VERBOSE] Using {} threads", rayon::current_num_threads());
    eprintln!("[VERBOSE] Configuration:");
    match &config.config_file_path {
        Some(path) => eprintln!("   Config file: {}", path.display()),
        None => eprintln!("   Config file: (defaults)"),
    }
    let shown: Vec<String> = paths.iter().map(|p| normalize_display_path(p)).collect();
    eprintln!("   Paths: {shown:?}");
    if !cli.exclude_folders.is_empty() {
        eprintln!("   Exclude folders: {:?}", cli.exclude_folders);
    }
    if let Some(ignored) = &config.cookcop.ignore {
        eprintln!("   Ignored rules: {ignored:?}");
    }
    eprintln!();
}
