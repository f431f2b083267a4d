//! Tests for Chef/Modernize/IncludingMixinShelloutInResources.
#![allow(clippy::unwrap_used)]

use cookcop::analyzer::Analyzer;
use cookcop::fix::ByteRangeRewriter;
use cookcop::rules::file_role::{classify_dir, PathClass};
use cookcop::rules::modernize::shellout::MESSAGE;
use cookcop::rules::Finding;
use std::path::Path;

const RULE: &str = "Chef/Modernize/IncludingMixinShelloutInResources";

fn inspect(path: &str, source: &str) -> Vec<Finding> {
    Analyzer::default()
        .analyze_code(source, Path::new(path))
        .unwrap()
}

fn autocorrect(path: &str, source: &str) -> String {
    let findings = inspect(path, source);
    let mut rewriter = ByteRangeRewriter::new(source);
    rewriter.add_edits(findings.into_iter().filter_map(|f| f.fix));
    rewriter.apply().unwrap()
}

#[test]
fn test_require_shell_out_in_resource() {
    let source = "require 'chef/mixin/shell_out'\n";
    let findings = inspect("/foo/bar/cookbook/resources/site.rb", source);

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].rule_id, RULE);
    assert_eq!(findings[0].message, MESSAGE);
    assert_eq!((findings[0].line, findings[0].col), (1, 1));
    assert_eq!(autocorrect("/foo/bar/cookbook/resources/site.rb", source), "");
}

#[test]
fn test_double_quoted_require_in_provider() {
    let source = "require \"chef/mixin/powershell_out\"\n\naction :create do\nend\n";
    let findings = inspect("cookbook/providers/site.rb", source);
    assert_eq!(findings.len(), 1);
    assert_eq!(
        autocorrect("cookbook/providers/site.rb", source),
        "\naction :create do\nend\n"
    );
}

#[test]
fn test_include_in_resource() {
    let source = "include Chef::Mixin::ShellOut\ninclude Chef::Mixin::PowershellOut\n";
    let findings = inspect("cookbook/resources/site.rb", source);
    assert_eq!(findings.len(), 2);
    assert_eq!(findings[1].line, 2);
    assert_eq!(autocorrect("cookbook/resources/site.rb", source), "");
}

#[test]
fn test_hwrp_library_is_flagged() {
    let source = "\
require 'chef/mixin/shell_out'

class Chef
  class Provider
    class LvmVolumeGroup < Chef::Provider
      include Chef::Mixin::ShellOut

      def load_current_resource; end
    end
  end
end
";
    let findings = inspect("cookbook/libraries/lvm.rb", source);
    assert_eq!(findings.len(), 2);
    assert_eq!((findings[1].line, findings[1].col), (6, 7));

    let expected = source
        .replacen("require 'chef/mixin/shell_out'\n", "", 1)
        .replacen("      include Chef::Mixin::ShellOut\n", "", 1);
    assert!(expected.starts_with("\nclass Chef\n"));
    assert_eq!(autocorrect("cookbook/libraries/lvm.rb", source), expected);
}

#[test]
fn test_lwrp_base_library_is_flagged() {
    let source = "\
class Chef
  class Provider
    class LvmVolumeGroup < Chef::Provider::LWRPBase
      include Chef::Mixin::ShellOut
    end
  end
end
";
    assert_eq!(inspect("cookbook/libraries/lvm.rb", source).len(), 1);
}

#[test]
fn test_helper_library_is_not_flagged() {
    let source = "\
require 'chef/mixin/shell_out'

module MyCookbook
  module Helpers
    include Chef::Mixin::ShellOut
  end
end
";
    assert!(inspect("cookbook/libraries/helpers.rb", source).is_empty());
}

#[test]
fn test_other_mixins_are_not_flagged() {
    let source = "require 'chef/mixin/foo'\ninclude Chef::Mixin::Foo\ninclude Mixin::ShellOut\n";
    assert!(inspect("cookbook/resources/site.rb", source).is_empty());
}

#[test]
fn test_recipes_are_not_flagged() {
    let source = "include Chef::Mixin::ShellOut\n";
    assert!(inspect("cookbook/recipes/default.rb", source).is_empty());
    assert!(inspect("default.rb", source).is_empty());
}

#[test]
fn test_non_candidate_positions_are_not_flagged() {
    let source = "\
def helper
  include Chef::Mixin::ShellOut
end
include ::Chef::Mixin::ShellOut
require \"chef/mixin/#{name}\"
require 'chef/mixin/shell_out' if windows?
";
    assert!(inspect("cookbook/resources/site.rb", source).is_empty());
}

#[test]
fn test_autocorrect_is_idempotent() {
    let source = "require 'chef/mixin/shell_out'\nresource_name :site\n";
    let once = autocorrect("resources/site.rb", source);
    assert_eq!(once, "resource_name :site\n");
    assert!(inspect("resources/site.rb", &once).is_empty());
    assert_eq!(autocorrect("resources/site.rb", &once), once);
}

#[test]
fn test_crlf_line_endings_are_preserved() {
    let source = "property :name, String\r\ninclude Chef::Mixin::ShellOut\r\n";
    assert_eq!(
        autocorrect("resources/site.rb", source),
        "property :name, String\r\n"
    );
}

#[test]
fn test_byte_order_mark_is_kept_without_blank_line() {
    let source = "\u{feff}require 'chef/mixin/shell_out'\nproperty :name, String\n";
    assert_eq!(inspect("resources/site.rb", source).len(), 1);
    assert_eq!(
        autocorrect("resources/site.rb", source),
        "\u{feff}property :name, String\n"
    );
    assert_eq!(
        autocorrect("resources/site.rb", "\u{feff}require 'chef/mixin/shell_out'\n"),
        "\u{feff}"
    );
}

#[test]
fn test_trailing_slash_directory_classification() {
    assert_eq!(
        classify_dir("/foo/bar/cookbook/resources/"),
        PathClass::ResourceOrProvider
    );
    assert_eq!(classify_dir("/foo/bar/cookbook/libraries/"), PathClass::Library);
    assert_eq!(classify_dir("/foo/bar/cookbook/recipes/"), PathClass::Other);
}
