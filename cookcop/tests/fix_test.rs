//! Tests for the fix module (ByteRangeRewriter).

use cookcop::fix::{ByteRangeRewriter, RewriteError, TextEdit};
use cookcop::syntax::Span;

#[test]
fn test_deletions_applied_back_to_front() {
    let source = "require 'a'\nrequire 'b'\nrequire 'c'\n";
    let mut rewriter = ByteRangeRewriter::new(source);
    rewriter.add_edits([
        TextEdit::delete(Span::new(0, 12)),
        TextEdit::delete(Span::new(24, 36)),
    ]);
    assert_eq!(rewriter.edit_count(), 2);
    assert_eq!(rewriter.apply().expect("should apply"), "require 'b'\n");
}

#[test]
fn test_out_of_bounds_error() {
    let mut rewriter = ByteRangeRewriter::new("short");
    rewriter.add_edit(TextEdit::delete(Span::new(2, 50)));

    assert!(matches!(
        rewriter.validate(),
        Err(RewriteError::OutOfBounds { .. })
    ));
}

#[test]
fn test_no_edits_returns_source() {
    let rewriter = ByteRangeRewriter::new("unchanged\n");
    assert_eq!(rewriter.apply().expect("should apply"), "unchanged\n");
}
