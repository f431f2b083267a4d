//! Shared fix module for auto-correction.
//!
//! Rules describe corrections as [`TextEdit`]s over the original text;
//! `ByteRangeRewriter` applies them using byte offsets so everything
//! outside the edited ranges is preserved exactly.

mod rewriter;

pub use rewriter::{ByteRangeRewriter, RewriteError, TextEdit};
