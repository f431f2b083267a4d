//! Utilities module for cookcop.
//!
//! This module provides various utility functions used across the codebase.

mod paths;

pub use paths::{collect_ruby_files, is_excluded, normalize_display_path, validate_output_path};

use crate::constants::DIRECTIVE_RE;
use rustc_hash::{FxHashMap, FxHashSet};

/// A utility struct to convert byte offsets to line numbers.
///
/// Rules work with byte spans, but findings are reported with
/// human-readable line and column numbers.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Stores the byte index of the start of each line.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Creates a new `LineIndex` by scanning the source code for newlines.
    /// Uses byte iteration since '\n' is always a single byte in UTF-8.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, byte) in source.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Converts a byte offset to a 1-indexed line number.
    #[must_use]
    pub fn line_index(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(line) => line,
        }
    }

    /// Converts a byte offset to a 1-indexed `(line, column)` pair.
    /// The column counts bytes from the start of the line.
    #[must_use]
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = self.line_index(offset);
        let start = self.line_starts.get(line - 1).copied().unwrap_or(0);
        (line, offset - start + 1)
    }
}

/// Whether `pattern` names `rule_id` exactly or one of its departments.
///
/// `Chef/Modernize` and `Chef/Modernize/` both match every
/// `Chef/Modernize/...` rule; `Chef/Mod` matches nothing.
#[must_use]
pub fn rule_matches(pattern: &str, rule_id: &str) -> bool {
    let pattern = pattern.trim_end_matches('/');
    !pattern.is_empty()
        && (rule_id == pattern
            || rule_id
                .strip_prefix(pattern)
                .is_some_and(|rest| rest.starts_with('/')))
}

/// Suppression specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suppression {
    /// Suppress all findings.
    All,
    /// Suppress findings for specific rules or departments (`Chef/Modernize`).
    Specific(FxHashSet<String>),
}

impl Suppression {
    fn merge(&mut self, other: &Self) {
        match other {
            Self::All => *self = Self::All,
            Self::Specific(theirs) => {
                if let Self::Specific(mine) = self {
                    mine.extend(theirs.iter().cloned());
                }
            }
        }
    }

    fn covers(&self, rule_id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Specific(rules) => rules.iter().any(|r| rule_matches(r, rule_id)),
        }
    }
}

#[derive(Debug)]
enum Directive {
    Disable(Suppression),
    Enable(Suppression),
}

/// Parses a `# rubocop:disable ...` / `# cookstyle:enable ...` comment on a line.
fn parse_directive(line: &str) -> Option<Directive> {
    let caps = DIRECTIVE_RE().captures(line)?;
    let verb = caps.get(1)?.as_str();
    let targets = caps.get(2)?.as_str();

    let mut rules = FxHashSet::default();
    for name in targets.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        if name.eq_ignore_ascii_case("all") {
            return Some(wrap(verb, Suppression::All));
        }
        rules.insert(name.to_owned());
    }
    if rules.is_empty() {
        return None;
    }
    Some(wrap(verb, Suppression::Specific(rules)))
}

fn wrap(verb: &str, suppression: Suppression) -> Directive {
    if verb == "enable" {
        Directive::Enable(suppression)
    } else {
        Directive::Disable(suppression)
    }
}

/// Detects suppressed lines in a source file.
///
/// Supports the RuboCop comment syntax (with `cookstyle` accepted as an alias):
/// - `include Foo # rubocop:disable Chef/Modernize/X` - that line only
/// - `# rubocop:disable Chef/Modernize` on its own line - until the
///   matching `# rubocop:enable` or the end of the file
/// - `all` instead of a rule list
///
/// Returns a map of line numbers (1-indexed) to suppression specs.
#[must_use]
pub fn get_ignored_lines(source: &str) -> FxHashMap<usize, Suppression> {
    let mut ignored: FxHashMap<usize, Suppression> = FxHashMap::default();
    let mut open_all = false;
    let mut open: FxHashSet<String> = FxHashSet::default();

    for (i, line) in source.lines().enumerate() {
        let line_no = i + 1;
        let standalone = line.trim_start().starts_with('#');
        let mut own_line = None;

        match parse_directive(line) {
            Some(Directive::Disable(s)) if standalone => match s {
                Suppression::All => open_all = true,
                Suppression::Specific(rules) => open.extend(rules),
            },
            Some(Directive::Enable(s)) if standalone => match s {
                Suppression::All => {
                    open_all = false;
                    open.clear();
                }
                Suppression::Specific(rules) => open.retain(|r| !rules.contains(r)),
            },
            Some(Directive::Disable(s)) => own_line = Some(s),
            Some(Directive::Enable(_)) | None => {}
        }

        let mut active = if open_all {
            Some(Suppression::All)
        } else if open.is_empty() {
            None
        } else {
            Some(Suppression::Specific(open.clone()))
        };
        if let Some(s) = own_line {
            match active.as_mut() {
                Some(a) => a.merge(&s),
                None => active = Some(s),
            }
        }
        if let Some(a) = active {
            ignored.insert(line_no, a);
        }
    }

    ignored
}

/// Checks if a specific line and rule are suppressed.
///
/// Returns true if the finding should be ignored.
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn is_line_suppressed(
    ignored_lines: &FxHashMap<usize, Suppression>,
    line: usize,
    rule_id: &str,
) -> bool {
    ignored_lines
        .get(&line)
        .is_some_and(|suppression| suppression.covers(rule_id))
}
