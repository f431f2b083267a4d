use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::CONFIG_FILENAME;
use crate::utils::rule_matches;

#[derive(Debug, Deserialize, Default, Clone)]
/// Top-level configuration struct.
pub struct Config {
    #[serde(default)]
    /// The `[cookcop]` table.
    pub cookcop: CookcopConfig,
    /// The path to the configuration file this was loaded from.
    /// Set during `load_from_path`, `None` if using defaults or programmatic config.
    #[serde(skip)]
    pub config_file_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
/// Configuration options for cookcop.
pub struct CookcopConfig {
    /// List of folders to exclude.
    pub exclude_folders: Option<Vec<String>>,
    /// List of folders to include even when excluded by default.
    pub include_folders: Option<Vec<String>>,
    /// Rule codes (or department prefixes such as `Chef/Modernize`) to ignore.
    pub ignore: Option<Vec<String>>,
}

impl Config {
    /// Loads configuration from the current directory upwards.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from_path(Path::new("."))
    }

    /// Loads configuration starting from a specific path and traversing up.
    ///
    /// The first `.cookcop.toml` found wins. A file that cannot be read or
    /// parsed is reported with a warning and defaults are used instead.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let mut current = path.to_path_buf();
        if current.is_file() {
            current.pop();
        }

        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Self::read_file(&candidate).unwrap_or_else(|e| {
                    log::warn!("ignoring {}: {e}", candidate.display());
                    Config::default()
                });
            }

            if !current.pop() {
                break;
            }
        }

        log::debug!("no {CONFIG_FILENAME} found from {}", path.display());
        Config::default()
    }

    fn read_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut config = toml::from_str::<Config>(&content)?;
        config.config_file_path = Some(path.to_path_buf());
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Whether findings of the rule `code` should be reported.
    ///
    /// An `ignore` entry matches the code exactly or any code below it in
    /// the department hierarchy (`Chef/Modernize` covers
    /// `Chef/Modernize/IncludingMixinShelloutInResources`).
    #[must_use]
    pub fn is_rule_enabled(&self, code: &str) -> bool {
        let Some(ignored) = &self.cookcop.ignore else {
            return true;
        };
        !ignored.iter().any(|entry| rule_matches(entry, code))
    }

    /// Extra folders to exclude from the file walk.
    #[must_use]
    pub fn exclude_folders(&self) -> &[String] {
        self.cookcop.exclude_folders.as_deref().unwrap_or_default()
    }

    /// Folders to walk even when excluded by default.
    #[must_use]
    pub fn include_folders(&self) -> &[String] {
        self.cookcop.include_folders.as_deref().unwrap_or_default()
    }
}
