//! `Chef/Modernize/IncludingMixinShelloutInResources`
//!
//! Chef Infra Client 12.4+ mixes `Chef::Mixin::ShellOut` and
//! `Chef::Mixin::PowershellOut` into every resource and provider, so requiring
//! or including them there is dead weight. Plain helper libraries still need
//! them, which is why `libraries/` files only qualify when they declare a
//! provider subclass somewhere in the file.

use crate::constants::{
    POWERSHELL_OUT_MIXIN, POWERSHELL_OUT_REQUIRE, SHELL_OUT_MIXIN, SHELL_OUT_REQUIRE,
};
use crate::fix::TextEdit;
use crate::rules::file_role::resolve_file_role;
use crate::rules::ids::{CATEGORY_MODERNIZE, RULE_ID_SHELLOUT_MIXIN_IN_RESOURCES, SEVERITY_REFACTOR};
use crate::rules::{Context, Finding, Rule, RuleMetadata};
use crate::syntax::{SourceFile, Span, Statement, StatementKind};

/// Fixed diagnostic text; suppression files and golden outputs depend on it verbatim.
pub const MESSAGE: &str = "There is no need to include Chef::Mixin::ShellOut or Chef::Mixin::PowershellOut in resources or providers as this is already done by Chef Infra Client 12.4+.";

const BOM: char = '\u{feff}';

/// The capability an offending statement pulls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// `Chef::Mixin::ShellOut`
    ShellOut,
    /// `Chef::Mixin::PowershellOut`
    PowershellOut,
}

impl Capability {
    /// The mixin constant this capability stands for.
    #[must_use]
    pub const fn mixin(self) -> &'static str {
        match self {
            Self::ShellOut => "Chef::Mixin::ShellOut",
            Self::PowershellOut => "Chef::Mixin::PowershellOut",
        }
    }
}

/// `require` targets that load a built-in mixin.
pub const MIXIN_REQUIRES: &[(&str, Capability)] = &[
    (SHELL_OUT_REQUIRE, Capability::ShellOut),
    (POWERSHELL_OUT_REQUIRE, Capability::PowershellOut),
];

/// Constants that name a built-in mixin.
pub const MIXIN_CONSTANTS: &[(&[&str], Capability)] = &[
    (SHELL_OUT_MIXIN, Capability::ShellOut),
    (POWERSHELL_OUT_MIXIN, Capability::PowershellOut),
];

/// Recognise `require 'chef/mixin/shell_out'`-style and
/// `include Chef::Mixin::ShellOut`-style statements.
#[must_use]
pub fn match_inclusion(stmt: &Statement) -> Option<Capability> {
    match &stmt.kind {
        StatementKind::Import { module_name } => MIXIN_REQUIRES
            .iter()
            .find(|(name, _)| name == module_name)
            .map(|&(_, capability)| capability),
        StatementKind::MixinInclusion { constant_path } => MIXIN_CONSTANTS
            .iter()
            .find(|(path, _)| constant_path.is(path))
            .map(|&(_, capability)| capability),
        StatementKind::ClassDeclaration { .. }
        | StatementKind::ModuleDeclaration { .. }
        | StatementKind::Other => None,
    }
}

/// The range to delete when removing the statement at `span`.
///
/// A statement alone on its line(s) takes the whole line with it, leading
/// indentation and line terminator included. Otherwise only the statement
/// itself goes. A byte order mark opening the file counts as blank and is kept.
#[must_use]
pub fn removal_span(text: &str, span: Span) -> Span {
    let (Some(before), Some(after)) = (text.get(..span.start), text.get(span.end..)) else {
        return span;
    };

    let line_start = before
        .rfind('\n')
        .map_or_else(|| before.strip_prefix(BOM).map_or(0, |_| BOM.len_utf8()), |i| i + 1);
    let indent = &before[line_start..];
    let rest_len = after.find('\n').unwrap_or(after.len());
    let rest = &after[..rest_len];

    let blank_before = indent.chars().all(|c| c == ' ' || c == '\t');
    let blank_after = rest.chars().all(|c| matches!(c, ' ' | '\t' | '\r'));
    if !(blank_before && blank_after) {
        return span;
    }

    let mut end = span.end + rest_len;
    if end < text.len() {
        end += 1; // the '\n' itself
    }
    Span::new(line_start, end)
}

/// Flags redundant shell-out mixins in resources, providers and HWRP libraries.
pub struct IncludingMixinShelloutInResources;

impl IncludingMixinShelloutInResources {
    fn create_finding(
        &self,
        stmt: &Statement,
        capability: Capability,
        file: &SourceFile,
        context: &Context,
    ) -> Finding {
        let (line, col) = context.line_index.line_col(stmt.span.start);
        log::debug!(
            "{}:{line}: {} is built into resources and providers",
            file.path,
            capability.mixin()
        );
        Finding {
            rule_id: self.code().to_owned(),
            category: self.category().to_owned(),
            severity: SEVERITY_REFACTOR.to_owned(),
            message: MESSAGE.to_owned(),
            file: context.filename.clone(),
            line,
            col,
            span: stmt.span,
            fix: Some(TextEdit::delete(removal_span(&file.text, stmt.span))),
        }
    }
}

impl Rule for IncludingMixinShelloutInResources {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata {
            id: RULE_ID_SHELLOUT_MIXIN_IN_RESOURCES,
            category: CATEGORY_MODERNIZE,
        }
    }

    fn check(&self, file: &SourceFile, context: &Context) -> Vec<Finding> {
        let candidates: Vec<(&Statement, Capability)> = file
            .walk()
            .filter_map(|stmt| match_inclusion(stmt).map(|capability| (stmt, capability)))
            .collect();
        if candidates.is_empty() || !resolve_file_role(file).has_builtin_shell_out() {
            return Vec::new();
        }

        candidates
            .into_iter()
            .map(|(stmt, capability)| self.create_finding(stmt, capability, file, context))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::ConstantPath;

    fn import(name: &str, start: usize) -> Statement {
        Statement::new(
            StatementKind::Import {
                module_name: name.to_owned(),
            },
            Span::new(start, start + name.len() + 10),
        )
    }

    fn include(path: &[&str]) -> Statement {
        Statement::new(
            StatementKind::MixinInclusion {
                constant_path: ConstantPath::new(path.iter().copied()),
            },
            Span::default(),
        )
    }

    fn check(file: &SourceFile) -> Vec<Finding> {
        let context = Context::for_file(file);
        IncludingMixinShelloutInResources.check(file, &context)
    }

    #[test]
    fn test_match_require_forms() {
        assert_eq!(
            match_inclusion(&import("chef/mixin/shell_out", 0)),
            Some(Capability::ShellOut)
        );
        assert_eq!(
            match_inclusion(&import("chef/mixin/powershell_out", 0)),
            Some(Capability::PowershellOut)
        );
        assert_eq!(match_inclusion(&import("chef/mixin/foo", 0)), None);
        assert_eq!(match_inclusion(&import("Chef/Mixin/Shell_Out", 0)), None);
        assert_eq!(match_inclusion(&import("my/chef/mixin/shell_out", 0)), None);
    }

    #[test]
    fn test_match_include_forms() {
        assert_eq!(
            match_inclusion(&include(&["Chef", "Mixin", "ShellOut"])),
            Some(Capability::ShellOut)
        );
        assert_eq!(
            match_inclusion(&include(&["Chef", "Mixin", "PowershellOut"])),
            Some(Capability::PowershellOut)
        );
        assert_eq!(match_inclusion(&include(&["Chef", "Mixin", "Foo"])), None);
        assert_eq!(match_inclusion(&include(&["Mixin", "ShellOut"])), None);
        assert_eq!(
            match_inclusion(&include(&["Chef", "Mixin", "ShellOut", "Extra"])),
            None
        );
    }

    #[test]
    fn test_capability_names_its_mixin() {
        for (path, capability) in MIXIN_CONSTANTS {
            assert_eq!(capability.mixin(), path.join("::"));
        }
        for (require, capability) in MIXIN_REQUIRES {
            let stmt = import(require, 0);
            assert_eq!(match_inclusion(&stmt), Some(*capability));
        }
    }

    #[test]
    fn test_removal_span_takes_whole_line() {
        let text = "require 'chef/mixin/shell_out'\n";
        let span = Span::new(0, text.len() - 1);
        assert_eq!(removal_span(text, span), Span::new(0, text.len()));
    }

    #[test]
    fn test_removal_span_includes_indentation_and_crlf() {
        let text = "class Foo\r\n  include Chef::Mixin::ShellOut\r\nend\r\n";
        let start = text.find("include").unwrap();
        let end = start + "include Chef::Mixin::ShellOut".len();
        let removal = removal_span(text, Span::new(start, end));

        let mut fixed = text.to_owned();
        fixed.replace_range(removal.start..removal.end, "");
        assert_eq!(fixed, "class Foo\r\nend\r\n");
    }

    #[test]
    fn test_removal_span_keeps_shared_line() {
        let text = "require 'json'; require 'chef/mixin/shell_out'\n";
        let start = text.find("require 'chef").unwrap();
        let span = Span::new(start, text.len() - 1);
        assert_eq!(removal_span(text, span), span);

        let text = "require 'chef/mixin/shell_out' # legacy\n";
        let span = Span::new(0, 30);
        assert_eq!(removal_span(text, span), span);
    }

    #[test]
    fn test_removal_span_at_end_of_file() {
        let text = "puts 1\nrequire 'chef/mixin/shell_out'";
        let start = text.find("require").unwrap();
        assert_eq!(
            removal_span(text, Span::new(start, text.len())),
            Span::new(start, text.len())
        );
    }

    #[test]
    fn test_removal_span_keeps_leading_byte_order_mark() {
        let text = "\u{feff}require 'chef/mixin/shell_out'\nproperty :name, String\n";
        let start = BOM.len_utf8();
        let end = start + "require 'chef/mixin/shell_out'".len();
        let removal = removal_span(text, Span::new(start, end));

        let mut fixed = text.to_owned();
        fixed.replace_range(removal.start..removal.end, "");
        assert_eq!(fixed, "\u{feff}property :name, String\n");

        let only = "\u{feff}require 'chef/mixin/shell_out'\n";
        let removal = removal_span(only, Span::new(start, only.len() - 1));
        assert_eq!(removal, Span::new(start, only.len()));
    }

    #[test]
    fn test_removal_span_out_of_range_is_identity() {
        let span = Span::new(10, 20);
        assert_eq!(removal_span("short", span), span);
    }

    #[test]
    fn test_resource_file_flags_each_statement() {
        let text = "require 'chef/mixin/shell_out'\nrequire 'chef/mixin/powershell_out'\n";
        let first = Statement::new(
            StatementKind::Import {
                module_name: SHELL_OUT_REQUIRE.to_owned(),
            },
            Span::new(0, 30),
        );
        let second = Statement::new(
            StatementKind::Import {
                module_name: POWERSHELL_OUT_REQUIRE.to_owned(),
            },
            Span::new(31, 66),
        );
        let file = SourceFile::new("cookbook/providers/x.rb", text, vec![first, second]);

        let findings = check(&file);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].line, 1);
        assert_eq!(findings[1].line, 2);
        assert_eq!(findings[1].col, 1);
        assert_eq!(findings[0].message, MESSAGE);
        assert_eq!(findings[0].rule_id, RULE_ID_SHELLOUT_MIXIN_IN_RESOURCES);
        assert_eq!(
            findings[1].fix,
            Some(TextEdit::delete(Span::new(31, text.len())))
        );
    }

    #[test]
    fn test_unclassified_and_plain_library_files_are_clean() {
        let stmt = include(&["Chef", "Mixin", "ShellOut"]);
        for path in ["recipes/default.rb", "x.rb", "cookbook/libraries/helpers.rb"] {
            let file = SourceFile::new(path, "", vec![stmt.clone()]);
            assert!(check(&file).is_empty(), "{path} should not be flagged");
        }
    }
}
