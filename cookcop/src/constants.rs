//! Shared constants: file names, cookbook layout, and the fixed names rules match on.

use regex::Regex;
use rustc_hash::FxHashSet;
use std::sync::OnceLock;

/// Configuration file looked up from the analysis root upwards.
pub const CONFIG_FILENAME: &str = ".cookcop.toml";

/// Extension of Ruby source files.
pub const RUBY_EXTENSION: &str = "rb";

/// Cookbook directory holding custom resources.
pub const RESOURCES_DIR: &str = "resources";
/// Cookbook directory holding LWRP providers.
pub const PROVIDERS_DIR: &str = "providers";
/// Cookbook directory holding arbitrary helper libraries (and HWRPs).
pub const LIBRARIES_DIR: &str = "libraries";

/// `require` target of the shell-out mixin.
pub const SHELL_OUT_REQUIRE: &str = "chef/mixin/shell_out";
/// `require` target of the powershell-out mixin.
pub const POWERSHELL_OUT_REQUIRE: &str = "chef/mixin/powershell_out";

/// `Chef::Mixin::ShellOut`
pub const SHELL_OUT_MIXIN: &[&str] = &["Chef", "Mixin", "ShellOut"];
/// `Chef::Mixin::PowershellOut`
pub const POWERSHELL_OUT_MIXIN: &[&str] = &["Chef", "Mixin", "PowershellOut"];

/// `Chef::Provider`
pub const PROVIDER_BASE: &[&str] = &["Chef", "Provider"];
/// `Chef::Provider::LWRPBase`
pub const LWRP_PROVIDER_BASE: &[&str] = &["Chef", "Provider", "LWRPBase"];

/// Superclasses that make a library class a provider (HWRP).
pub const PROVIDER_BASES: &[&[&str]] = &[PROVIDER_BASE, LWRP_PROVIDER_BASE];

/// Default folders to exclude from analysis.
pub fn get_default_exclude_folders() -> &'static FxHashSet<&'static str> {
    static DEFAULTS: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    DEFAULTS.get_or_init(|| {
        let mut s = FxHashSet::default();
        s.insert(".git");
        s.insert(".kitchen");
        s.insert(".bundle");
        s.insert("vendor");
        s.insert("node_modules");
        s.insert("coverage");
        s.insert("pkg");
        s.insert("tmp");
        s
    })
}

/// Regex for inline RuboCop-style directives.
///
/// Group 1 is the verb (`disable`/`enable`), group 2 the comma separated rule list.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_directive_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"#\s*(?:rubocop|cookstyle)\s*:\s*(disable|enable)\s+([A-Za-z0-9_/,\s]+)")
            .expect("Invalid directive regex pattern")
    })
}

// Uppercase aliases used at call sites
pub use get_default_exclude_folders as DEFAULT_EXCLUDE_FOLDERS;
pub use get_directive_re as DIRECTIVE_RE;
