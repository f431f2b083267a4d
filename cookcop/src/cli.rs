use clap::{Args, Parser};
use std::path::PathBuf;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.cookcop.toml):
  Create this file in your repository or cookbook root to set defaults.
  It is found by walking up from the analyzed path.

  [cookcop]
  exclude_folders = [\"test\", \"spec\"]   # Skip these folders
  include_folders = [\"vendor\"]         # Force-include these
  ignore = [\"Chef/Modernize\"]          # Rule codes or departments to skip

INLINE SUPPRESSION:
  include Chef::Mixin::ShellOut # rubocop:disable Chef/Modernize/IncludingMixinShelloutInResources
  # cookstyle:disable all
  ...
  # cookstyle:enable all
";

/// Options for output formatting and verbosity.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are legitimately booleans
pub struct OutputOptions {
    /// Output raw JSON.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output (shows configuration and fix statistics).
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode: one line per offense and a recap, no tables.
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,
}

/// Shared path arguments (mutually exclusive paths/root).
#[derive(Args, Debug, Default, Clone)]
pub struct PathArgs {
    /// Paths to inspect (files or directories).
    /// When no paths are provided, defaults to the current directory.
    /// Cannot be used with --root.
    #[arg(conflicts_with = "root")]
    pub paths: Vec<PathBuf>,

    /// Cookbook or repository root to inspect.
    /// Also the boundary that --fix will not write outside of.
    /// Cannot be used together with positional path arguments.
    #[arg(long, conflicts_with = "paths")]
    pub root: Option<PathBuf>,
}

/// Command line interface configuration using `clap`.
/// This struct defines the arguments and flags accepted by the program.
#[derive(Parser, Debug)]
#[command(
    name = "cookcop",
    author,
    version,
    about = "cookcop - Chef cookbook linter that removes redundant shell-out mixins",
    long_about = None,
    after_help = CONFIG_HELP
)]
pub struct Cli {
    /// Global path options (paths vs root).
    #[command(flatten)]
    pub paths: PathArgs,

    /// Output formatting options.
    #[command(flatten)]
    pub output: OutputOptions,

    /// Folders to exclude from analysis.
    #[arg(long = "exclude-folder", alias = "exclude-folders")]
    pub exclude_folders: Vec<String>,

    /// Folders to force-include in analysis (overrides default exclusions).
    #[arg(long = "include-folder", alias = "include-folders")]
    pub include_folders: Vec<String>,

    /// Apply automatic corrections to the offending files.
    /// Writes stay inside --root, or inside the single path given
    /// (its parent folder for a file), or else the current directory.
    #[arg(short = 'a', long, alias = "autocorrect")]
    pub fix: bool,

    /// Show what --fix would change without writing anything.
    #[arg(long, requires = "fix")]
    pub dry_run: bool,
}
