//! Builder-style methods for the analyzer.

use super::Analyzer;
use std::path::PathBuf;
use std::sync::Arc;

impl Analyzer {
    /// Builder-style method to set the directory `--fix` is confined to.
    #[must_use]
    pub fn with_root(mut self, root: PathBuf) -> Self {
        self.analysis_root = root;
        self
    }

    /// Builder-style method to add excluded folders on top of the configured ones.
    #[must_use]
    pub fn with_excludes(mut self, folders: Vec<String>) -> Self {
        self.exclude_folders.extend(folders);
        self
    }

    /// Builder-style method to add force-included folders.
    #[must_use]
    pub fn with_includes(mut self, folders: Vec<String>) -> Self {
        self.include_folders.extend(folders);
        self
    }

    /// Builder-style method to attach a progress bar ticked once per file.
    #[must_use]
    pub fn with_progress(mut self, progress_bar: Arc<indicatif::ProgressBar>) -> Self {
        self.progress_bar = Some(progress_bar);
        self
    }
}
