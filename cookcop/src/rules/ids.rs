//! Centralized Rule IDs for cookcop.
//!
//! IDs use the RuboCop `Department/Subdepartment/Name` form so existing
//! `# rubocop:disable` comments keep working.

/// Modernize: `Chef::Mixin::ShellOut`/`PowershellOut` included in a resource or provider
pub const RULE_ID_SHELLOUT_MIXIN_IN_RESOURCES: &str =
    "Chef/Modernize/IncludingMixinShelloutInResources";

/// Category shared by all modernization rules.
pub const CATEGORY_MODERNIZE: &str = "Modernize";

/// Severity for findings that are clean-ups rather than bugs.
pub const SEVERITY_REFACTOR: &str = "REFACTOR";
