//! CST (Concrete Syntax Tree) frontend for Ruby sources.
//!
//! Tree-sitter parses the file; the statements rules inspect are lowered
//! into [`crate::syntax::SourceFile`]. Anything the rules do not reason
//! about becomes [`crate::syntax::StatementKind::Other`].
//!
//! # Design Principles
//!
//! - **Parse once, lower once**: rules never see tree-sitter nodes
//! - **Byte-range anchored**: every statement keeps its exact source span
//! - **Reject broken input**: files with syntax errors never reach a rule

mod parser;

pub use parser::{ParseError, RubyParser};
