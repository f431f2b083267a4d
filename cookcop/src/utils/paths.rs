//! Path utilities for cookcop.
//!
//! This module consolidates all path-related logic for:
//! - Cross-platform path normalization
//! - Path traversal security validation
//! - Ruby file discovery with gitignore support

use crate::constants::{DEFAULT_EXCLUDE_FOLDERS, RUBY_EXTENSION};
use std::path::{Path, PathBuf};

/// Normalizes a path for CLI display.
///
/// - Converts backslashes to forward slashes (for cross-platform consistency)
/// - Strips leading "./" prefix (for cleaner output)
///
/// # Examples
/// ```
/// use std::path::Path;
/// use cookcop::utils::normalize_display_path;
///
/// assert_eq!(normalize_display_path(Path::new("./resources/default.rb")), "resources/default.rb");
/// ```
#[must_use]
pub fn normalize_display_path(path: &Path) -> String {
    let s = path.to_string_lossy();
    let clean = s.trim_start_matches(r"\\?\");
    let normalized = clean.replace('\\', "/");
    normalized
        .strip_prefix("./")
        .unwrap_or(&normalized)
        .to_owned()
}

/// Checks if a name matches any exclusion pattern.
/// Supports exact matching and wildcard patterns starting with `*.`.
#[must_use]
pub fn is_excluded(name: &str, excludes: &[String]) -> bool {
    excludes.iter().any(|exclude| match exclude.strip_prefix('*') {
        Some(suffix) if suffix.starts_with('.') => name.ends_with(suffix),
        _ => name == exclude,
    })
}

/// Validates that a path we are about to write stays inside `root`.
///
/// When `root` is `None`, the current working directory is the boundary.
/// The longest existing ancestor is canonicalized so symlinks cannot be
/// used to escape, and the non-existent remainder may not contain `..`.
///
/// # Errors
///
/// Returns an error if the root cannot be resolved or the path escapes it.
pub fn validate_output_path(path: &Path, root: Option<&Path>) -> anyhow::Result<PathBuf> {
    let current_dir = std::env::current_dir()?;
    let root_dir = root.unwrap_or(&current_dir);
    let canonical_root = root_dir.canonicalize().map_err(|e| {
        anyhow::anyhow!(
            "Failed to canonicalize root directory {}: {}",
            root_dir.display(),
            e
        )
    })?;

    let absolute_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        canonical_root.join(path)
    };

    let mut ancestor = absolute_path.as_path();
    while !ancestor.exists() {
        match ancestor.parent() {
            Some(p) => ancestor = p,
            None => break,
        }
    }

    let canonical_ancestor = ancestor.canonicalize().map_err(|e| {
        anyhow::anyhow!(
            "Failed to canonicalize ancestor path {}: {}",
            ancestor.display(),
            e
        )
    })?;

    if !canonical_ancestor.starts_with(&canonical_root) {
        anyhow::bail!(
            "Refusing to write '{}': outside of analysis root '{}'",
            normalize_display_path(&canonical_ancestor),
            normalize_display_path(&canonical_root)
        );
    }

    if let Ok(remainder) = absolute_path.strip_prefix(ancestor) {
        if remainder
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            anyhow::bail!(
                "Path contains '..' in non-existent portion: '{}'",
                path.display()
            );
        }
    }

    Ok(absolute_path)
}

/// Collects Ruby files from a directory with gitignore support.
///
/// Uses the `ignore` crate to respect .gitignore, .git/info/exclude and the
/// global gitignore in addition to the default exclusions (`.kitchen`,
/// `vendor`, ...).
///
/// # Arguments
/// * `root` - Root directory to search
/// * `exclude` - Additional user-specified exclusion patterns
/// * `include` - Folders to force-include (overrides excludes)
///
/// # Returns
/// All `.rb` files found, in walk order.
#[must_use]
pub fn collect_ruby_files(root: &Path, exclude: &[String], include: &[String]) -> Vec<PathBuf> {
    use ignore::WalkBuilder;

    let mut all_excludes: Vec<String> = exclude
        .iter()
        .cloned()
        .chain(DEFAULT_EXCLUDE_FOLDERS().iter().map(|&s| s.to_owned()))
        .collect();
    all_excludes.retain(|ex| !include.iter().any(|inc| ex == inc));

    let root_for_filter = root.to_path_buf();
    let walker = WalkBuilder::new(root)
        .hidden(false) // dot-directories are handled by the exclusion list
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .filter_entry(move |entry| {
            if entry.path() == root_for_filter {
                return true;
            }
            if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                return true;
            }
            entry
                .file_name()
                .to_str()
                .is_none_or(|name| !is_excluded(name, &all_excludes))
        })
        .build();

    let mut files = Vec::new();
    for result in walker {
        match result {
            Ok(entry) => {
                let path = entry.path();
                if entry.file_type().is_some_and(|ft| ft.is_file())
                    && path.extension().is_some_and(|ext| ext == RUBY_EXTENSION)
                {
                    files.push(path.to_path_buf());
                }
            }
            Err(e) => log::debug!("walk error: {e}"),
        }
    }

    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_is_excluded_patterns() {
        let excludes = vec!["vendor".to_owned(), "*.bak".to_owned()];
        assert!(is_excluded("vendor", &excludes));
        assert!(is_excluded("old.bak", &excludes));
        assert!(!is_excluded("vendors", &excludes));
    }

    #[test]
    fn test_collect_ruby_files_skips_default_excludes() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let root = temp.path();
        fs::create_dir_all(root.join("resources"))?;
        fs::create_dir_all(root.join(".kitchen/cache"))?;
        fs::create_dir_all(root.join("vendor"))?;
        fs::write(root.join("resources/default.rb"), "")?;
        fs::write(root.join("resources/notes.md"), "")?;
        fs::write(root.join(".kitchen/cache/x.rb"), "")?;
        fs::write(root.join("vendor/y.rb"), "")?;

        let files = collect_ruby_files(root, &[], &[]);
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("resources/default.rb"));

        let files = collect_ruby_files(root, &[], &["vendor".to_owned()]);
        assert_eq!(files.len(), 2);
        Ok(())
    }

    #[test]
    fn test_validate_output_path_rejects_escape() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let root = temp.path().join("cookbook");
        fs::create_dir_all(&root)?;
        fs::write(temp.path().join("outside.rb"), "")?;

        assert!(validate_output_path(&root.join("inside.rb"), Some(&root)).is_ok());
        assert!(validate_output_path(&temp.path().join("outside.rb"), Some(&root)).is_err());
        assert!(validate_output_path(Path::new("../outside.rb"), Some(&root)).is_err());
        Ok(())
    }
}
