//! Byte-range safe text rewriter.
//!
//! Applies [`TextEdit`]s produced by rules, preserving every byte outside
//! the edited ranges.
//!
//! # Usage
//!
//! ```
//! use cookcop::fix::{ByteRangeRewriter, TextEdit};
//! use cookcop::syntax::Span;
//!
//! let source = "require 'chef/mixin/shell_out'\nputs 'hi'\n";
//! let mut rewriter = ByteRangeRewriter::new(source);
//! rewriter.add_edit(TextEdit::delete(Span::new(0, 31)));
//! let fixed = rewriter.apply().expect("should apply");
//! assert_eq!(fixed, "puts 'hi'\n");
//! ```

use crate::syntax::Span;
use serde::Serialize;
use thiserror::Error;

/// A single replacement over the original text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    /// Range being replaced
    pub span: Span,
    /// Replacement content
    pub replacement: String,
}

impl TextEdit {
    /// Create a new edit
    #[must_use]
    pub fn new(span: Span, replacement: impl Into<String>) -> Self {
        Self {
            span,
            replacement: replacement.into(),
        }
    }

    /// Create a deletion edit
    #[must_use]
    pub fn delete(span: Span) -> Self {
        Self::new(span, "")
    }

    /// Check if this edit overlaps with another
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.span.overlaps(&other.span)
    }
}

/// Error during rewriting
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewriteError {
    /// Two or more edits have overlapping ranges
    #[error("overlapping edits at indices {edit_a} and {edit_b}")]
    OverlappingEdits {
        /// Index of first overlapping edit
        edit_a: usize,
        /// Index of second overlapping edit
        edit_b: usize,
    },
    /// Edit range is out of bounds
    #[error("edit {edit_index} out of bounds: end {end} > source length {source_len}")]
    OutOfBounds {
        /// Index of the bad edit
        edit_index: usize,
        /// End byte of the edit
        end: usize,
        /// Length of the source
        source_len: usize,
    },
    /// Edit boundary falls inside a UTF-8 sequence or start > end
    #[error("edit {edit_index} does not cover a valid character range")]
    InvalidRange {
        /// Index of the bad edit
        edit_index: usize,
    },
}

/// Safe text rewriter using byte ranges
///
/// Edits are applied back to front so earlier offsets stay valid.
#[derive(Debug, Clone)]
pub struct ByteRangeRewriter {
    source: String,
    edits: Vec<TextEdit>,
}

impl ByteRangeRewriter {
    /// Create a new rewriter for the given source
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            edits: Vec::new(),
        }
    }

    /// Add an edit to the pending list
    pub fn add_edit(&mut self, edit: TextEdit) {
        self.edits.push(edit);
    }

    /// Add multiple edits
    pub fn add_edits(&mut self, edits: impl IntoIterator<Item = TextEdit>) {
        self.edits.extend(edits);
    }

    /// Get the number of pending edits
    #[must_use]
    pub fn edit_count(&self) -> usize {
        self.edits.len()
    }

    /// Validate edits without applying them
    ///
    /// # Errors
    /// Returns error if edits overlap, are out of bounds, or split a character
    pub fn validate(&self) -> Result<(), RewriteError> {
        for (i, edit) in self.edits.iter().enumerate() {
            if edit.span.end > self.source.len() {
                return Err(RewriteError::OutOfBounds {
                    edit_index: i,
                    end: edit.span.end,
                    source_len: self.source.len(),
                });
            }
            if edit.span.start > edit.span.end
                || !self.source.is_char_boundary(edit.span.start)
                || !self.source.is_char_boundary(edit.span.end)
            {
                return Err(RewriteError::InvalidRange { edit_index: i });
            }
        }

        for (i, a) in self.edits.iter().enumerate() {
            for (j, b) in self.edits.iter().enumerate().skip(i + 1) {
                if a.overlaps(b) {
                    return Err(RewriteError::OverlappingEdits {
                        edit_a: i,
                        edit_b: j,
                    });
                }
            }
        }

        Ok(())
    }

    /// Apply all edits and return the modified source
    ///
    /// # Errors
    /// Returns error if edits overlap or are out of bounds
    pub fn apply(self) -> Result<String, RewriteError> {
        self.validate()?;

        let mut result = self.source;
        let mut sorted_edits = self.edits;
        sorted_edits.sort_by(|a, b| b.span.start.cmp(&a.span.start));

        for edit in sorted_edits {
            result.replace_range(edit.span.start..edit.span.end, &edit.replacement);
        }

        Ok(result)
    }
}
