//! Tree-sitter based parser for Ruby source code.
//!
//! Parses a file and lowers the statements rules care about into
//! [`crate::syntax`] values. Byte ranges come straight from tree-sitter.

use crate::syntax::{ConstantPath, SourceFile, Span, Statement, StatementKind};
use thiserror::Error;
use tree_sitter::{Node, Parser, Point};

/// Error during parsing
#[derive(Debug, Error)]
pub enum ParseError {
    /// Failed to create parser
    #[error("failed to create Ruby parser: {0}")]
    ParserCreation(String),
    /// Tree-sitter gave up on the source
    #[error("failed to parse source as Ruby")]
    ParseFailed,
    /// The tree contains error or missing nodes
    #[error("syntax error at line {line}, column {column}")]
    Syntax {
        /// One-indexed line of the first error node
        line: usize,
        /// One-indexed column of the first error node
        column: usize,
    },
}

/// Tree-sitter based Ruby parser
pub struct RubyParser {
    parser: Parser,
}

impl RubyParser {
    /// Create a new parser for Ruby
    ///
    /// # Errors
    /// Returns error if the grammar cannot be loaded
    pub fn new() -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_ruby::LANGUAGE.into())
            .map_err(|e| ParseError::ParserCreation(e.to_string()))?;
        Ok(Self { parser })
    }

    /// Parse `source` and lower its statements.
    ///
    /// # Errors
    /// Returns error if parsing fails or the source has syntax errors
    pub fn parse(&mut self, path: &str, source: &str) -> Result<SourceFile, ParseError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or(ParseError::ParseFailed)?;
        let root = tree.root_node();

        if root.has_error() {
            let point = first_error(root).map_or(root.start_position(), |n| n.start_position());
            return Err(syntax_error(point));
        }

        let statements = lower_statements(root, source);
        Ok(SourceFile::new(path, source, statements))
    }

    /// Whether `source` parses without error nodes.
    pub fn is_valid(&mut self, source: &str) -> bool {
        self.parser
            .parse(source, None)
            .is_some_and(|tree| !tree.root_node().has_error())
    }
}

fn syntax_error(point: Point) -> ParseError {
    ParseError::Syntax {
        line: point.row + 1,
        column: point.column + 1,
    }
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(Node::has_error)
        .find_map(first_error)
}

/// Lower the statement children of `parent` (a `program` or `body_statement`).
fn lower_statements(parent: Node<'_>, source: &str) -> Vec<Statement> {
    let mut cursor = parent.walk();
    parent
        .named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .map(|child| lower_statement(child, source))
        .collect()
}

fn lower_statement(node: Node<'_>, source: &str) -> Statement {
    let span = Span::new(node.start_byte(), node.end_byte());
    let kind = match node.kind() {
        "call" => lower_call(node, source),
        "class" => lower_class(node, source),
        "module" => lower_module(node, source),
        _ => None,
    };
    Statement::new(kind.unwrap_or(StatementKind::Other), span)
}

/// `require '...'` and `include Const` written as bare commands.
fn lower_call(node: Node<'_>, source: &str) -> Option<StatementKind> {
    if node.child_by_field_name("receiver").is_some() || node.child_by_field_name("block").is_some()
    {
        return None;
    }
    let method = text(node.child_by_field_name("method")?, source)?;
    let argument = single_argument(node.child_by_field_name("arguments")?)?;

    match method {
        "require" => Some(StatementKind::Import {
            module_name: string_literal(argument, source)?,
        }),
        "include" => Some(StatementKind::MixinInclusion {
            constant_path: constant_path(argument, source)?,
        }),
        _ => None,
    }
}

fn lower_class(node: Node<'_>, source: &str) -> Option<StatementKind> {
    let name = constant_path(node.child_by_field_name("name")?, source)?;
    let superclass_path = node
        .child_by_field_name("superclass")
        .and_then(|sc| sc.named_child(0))
        .and_then(|expr| constant_path(expr, source));

    Some(StatementKind::ClassDeclaration {
        name: name.to_string(),
        superclass_path,
        body: lower_body(node, source),
    })
}

fn lower_module(node: Node<'_>, source: &str) -> Option<StatementKind> {
    let name = constant_path(node.child_by_field_name("name")?, source)?;
    Some(StatementKind::ModuleDeclaration {
        name: name.to_string(),
        body: lower_body(node, source),
    })
}

fn lower_body(node: Node<'_>, source: &str) -> Vec<Statement> {
    let mut cursor = node.walk();
    let body = node
        .named_children(&mut cursor)
        .find(|child| child.kind() == "body_statement");
    body.map(|b| lower_statements(b, source)).unwrap_or_default()
}

fn single_argument(arguments: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = arguments.walk();
    let mut args = arguments
        .named_children(&mut cursor)
        .filter(|child| !child.is_extra());
    let first = args.next()?;
    args.next().is_none().then_some(first)
}

/// The value of a plain string literal; `None` for interpolated strings.
fn string_literal(node: Node<'_>, source: &str) -> Option<String> {
    if node.kind() != "string" {
        return None;
    }
    let mut cursor = node.walk();
    let mut value = String::new();
    for part in node.named_children(&mut cursor) {
        if part.kind() != "string_content" {
            return None;
        }
        value.push_str(text(part, source)?);
    }
    Some(value)
}

/// Flatten `constant` / `scope_resolution` chains.
fn constant_path(node: Node<'_>, source: &str) -> Option<ConstantPath> {
    match node.kind() {
        "constant" => Some(ConstantPath::new([text(node, source)?])),
        "scope_resolution" => {
            let name = node.child_by_field_name("name")?;
            if name.kind() != "constant" {
                return None;
            }
            let mut path = match node.child_by_field_name("scope") {
                Some(scope) => constant_path(scope, source)?,
                None => ConstantPath::default().rooted(),
            };
            path.push(text(name, source)?);
            Some(path)
        }
        _ => None,
    }
}

fn text<'s>(node: Node<'_>, source: &'s str) -> Option<&'s str> {
    node.utf8_text(source.as_bytes()).ok()
}
