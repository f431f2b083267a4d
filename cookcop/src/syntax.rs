//! Lowered statement model consumed by rules.
//!
//! The Ruby frontend in [`crate::cst`] produces these values from a
//! tree-sitter parse. Rules only ever read them.

use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;

/// A half-open byte range `[start, end)` over the original source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the span in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if this span overlaps with another.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A qualified constant reference such as `Chef::Mixin::ShellOut`.
///
/// `rooted` records a leading `::` (`::Chef::Provider`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConstantPath {
    segments: SmallVec<[String; 4]>,
    rooted: bool,
}

impl ConstantPath {
    /// Build an unrooted path from its segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            rooted: false,
        }
    }

    /// Mark the path as anchored at the top-level namespace.
    #[must_use]
    pub fn rooted(mut self) -> Self {
        self.rooted = true;
        self
    }

    /// Append a trailing segment.
    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    /// The identifier segments, outermost first.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Whether the path started with `::`.
    #[must_use]
    pub const fn is_rooted(&self) -> bool {
        self.rooted
    }

    /// Exact, segment-by-segment comparison against an unrooted qualified name.
    #[must_use]
    pub fn is(&self, qualified: &[&str]) -> bool {
        !self.rooted
            && self.segments.len() == qualified.len()
            && self.segments.iter().zip(qualified).all(|(a, b)| a == b)
    }
}

impl fmt::Display for ConstantPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rooted {
            write!(f, "::")?;
        }
        write!(f, "{}", self.segments.join("::"))
    }
}

/// The statement shapes rules can reason about.
///
/// Anything the frontend does not recognise is lowered to [`StatementKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementKind {
    /// `require 'some/module'`
    Import {
        /// The literal module name passed to `require`.
        module_name: String,
    },
    /// `include Some::Mixin`
    MixinInclusion {
        /// The constant being mixed in.
        constant_path: ConstantPath,
    },
    /// `class Name < Superclass ... end`
    ClassDeclaration {
        /// Declared name, `::`-joined when qualified.
        name: String,
        /// The superclass expression when it is a constant reference.
        superclass_path: Option<ConstantPath>,
        /// Statements of the class body.
        body: Vec<Statement>,
    },
    /// `module Name ... end`
    ModuleDeclaration {
        /// Declared name, `::`-joined when qualified.
        name: String,
        /// Statements of the module body.
        body: Vec<Statement>,
    },
    /// Any other statement.
    Other,
}

/// A lowered statement with its source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// Shape of the statement.
    pub kind: StatementKind,
    /// Byte range of the whole statement.
    pub span: Span,
}

impl Statement {
    /// Create a statement.
    #[must_use]
    pub const fn new(kind: StatementKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Statements nested in a class or module body, if any.
    #[must_use]
    pub fn body(&self) -> &[Statement] {
        match &self.kind {
            StatementKind::ClassDeclaration { body, .. }
            | StatementKind::ModuleDeclaration { body, .. } => body,
            StatementKind::Import { .. }
            | StatementKind::MixinInclusion { .. }
            | StatementKind::Other => &[],
        }
    }
}

/// One source file handed to the rules.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path as given by the caller; only ever inspected lexically.
    pub path: String,
    /// The exact text the statements were lowered from.
    pub text: String,
    /// Top-level statements in source order.
    pub statements: Vec<Statement>,
}

impl SourceFile {
    /// Create a source file.
    pub fn new(path: impl Into<String>, text: impl Into<String>, statements: Vec<Statement>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
            statements,
        }
    }

    /// Walk every statement reachable through class and module bodies,
    /// depth-first in source order.
    pub fn walk(&self) -> impl Iterator<Item = &Statement> {
        let mut stack: Vec<&Statement> = self.statements.iter().rev().collect();
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.body().iter().rev());
            Some(next)
        })
    }
}
