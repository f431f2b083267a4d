use crate::config::Config;
use crate::rules::{get_rules, Context, Finding, Rule};
use crate::syntax::SourceFile;
use crate::utils::{get_ignored_lines, is_line_suppressed};

/// Runs a set of rules over parsed files and applies inline suppressions.
///
/// A `Linter` is immutable once built and can be shared by reference across
/// worker threads.
pub struct Linter {
    rules: Vec<Box<dyn Rule>>,
}

impl Linter {
    /// Creates a `Linter` with the given rules.
    #[must_use]
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Creates a `Linter` with every rule the configuration enables.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(get_rules(config))
    }

    /// Codes of the active rules, in registration order.
    pub fn rule_codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.code())
    }

    /// Lints one file.
    ///
    /// Findings on lines covered by a `rubocop:disable`/`cookstyle:disable`
    /// comment are dropped. The rest come back in source order.
    #[must_use]
    pub fn lint(&self, file: &SourceFile) -> Vec<Finding> {
        let context = Context::for_file(file);
        let mut findings: Vec<Finding> = self
            .rules
            .iter()
            .flat_map(|rule| rule.check(file, &context))
            .collect();
        if findings.is_empty() {
            return findings;
        }

        let ignored = get_ignored_lines(&file.text);
        findings.retain(|f| !is_line_suppressed(&ignored, f.line, &f.rule_id));
        findings.sort_by_key(|f| (f.span.start, f.span.end));
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::RubyParser;

    const RULE: &str = "Chef/Modernize/IncludingMixinShelloutInResources";

    fn lint(path: &str, source: &str, config: Config) -> Vec<Finding> {
        let file = RubyParser::new().unwrap().parse(path, source).unwrap();
        Linter::from_config(&config).lint(&file)
    }

    #[test]
    fn test_lint_resource_file() {
        let findings = lint(
            "cookbook/resources/site.rb",
            "require 'chef/mixin/shell_out'\ninclude Chef::Mixin::ShellOut\n",
            Config::default(),
        );
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].line, 1);
        assert_eq!(findings[1].line, 2);
    }

    #[test]
    fn test_trailing_disable_comment_suppresses_finding() {
        let source = format!(
            "require 'chef/mixin/shell_out' # rubocop:disable {RULE}\ninclude Chef::Mixin::ShellOut\n"
        );
        let findings = lint("cookbook/resources/site.rb", &source, Config::default());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 2);
    }

    #[test]
    fn test_ignored_rule_produces_nothing() {
        let mut config = Config::default();
        config.cookcop.ignore = Some(vec![RULE.to_owned()]);
        let linter = Linter::from_config(&config);
        assert_eq!(linter.rule_codes().count(), 0);

        let file = RubyParser::new()
            .unwrap()
            .parse("resources/x.rb", "include Chef::Mixin::ShellOut\n")
            .unwrap();
        assert!(linter.lint(&file).is_empty());
    }
}
