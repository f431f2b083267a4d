//! Cookbook file roles.
//!
//! Chef loads `resources/` and `providers/` files as resource/provider
//! definitions; `libraries/` may hold either plain helpers or hand-written
//! providers (HWRPs). Classification is lexical on the path string.

use crate::constants::{LIBRARIES_DIR, PROVIDERS_DIR, PROVIDER_BASES, RESOURCES_DIR};
use crate::syntax::{SourceFile, StatementKind};

/// What the file's parent directory says about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    /// Under `resources/` or `providers/`.
    ResourceOrProvider,
    /// Under `libraries/`.
    Library,
    /// Anywhere else, or no directory component at all.
    Other,
}

/// Role of a file once the class hierarchy has been taken into account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    /// A custom resource or LWRP provider.
    ResourceOrProvider,
    /// A library declaring at least one provider subclass.
    LibraryWithProviderSubclass,
    /// A library of plain helpers.
    LibraryOther,
    /// Not a cookbook file this rule set cares about.
    Unclassified,
}

impl FileRole {
    /// Whether Chef already mixes shell-out helpers into files of this role.
    #[must_use]
    pub const fn has_builtin_shell_out(self) -> bool {
        matches!(self, Self::ResourceOrProvider | Self::LibraryWithProviderSubclass)
    }
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Classify a directory path by its deepest segment, ignoring trailing separators.
#[must_use]
pub fn classify_dir(dir: &str) -> PathClass {
    let segment = dir
        .trim_end_matches(is_separator)
        .rsplit(is_separator)
        .next()
        .unwrap_or_default();

    match segment {
        RESOURCES_DIR | PROVIDERS_DIR => PathClass::ResourceOrProvider,
        LIBRARIES_DIR => PathClass::Library,
        _ => PathClass::Other,
    }
}

/// Classify a file path by the name of its immediate parent directory.
#[must_use]
pub fn classify_path(path: &str) -> PathClass {
    let trimmed = path.trim_end_matches(is_separator);
    match trimmed.rfind(is_separator) {
        Some(idx) => classify_dir(&trimmed[..idx]),
        None => PathClass::Other,
    }
}

/// Whether any class in the file, at any nesting depth, inherits from a provider base.
#[must_use]
pub fn declares_provider_subclass(file: &SourceFile) -> bool {
    file.walk().any(|stmt| match &stmt.kind {
        StatementKind::ClassDeclaration {
            superclass_path: Some(superclass),
            ..
        } => PROVIDER_BASES.iter().any(|base| superclass.is(base)),
        StatementKind::ClassDeclaration { .. }
        | StatementKind::ModuleDeclaration { .. }
        | StatementKind::Import { .. }
        | StatementKind::MixinInclusion { .. }
        | StatementKind::Other => false,
    })
}

/// Resolve the role of `file`. The hierarchy scan only runs for libraries.
#[must_use]
pub fn resolve_file_role(file: &SourceFile) -> FileRole {
    match classify_path(&file.path) {
        PathClass::ResourceOrProvider => FileRole::ResourceOrProvider,
        PathClass::Library if declares_provider_subclass(file) => {
            FileRole::LibraryWithProviderSubclass
        }
        PathClass::Library => FileRole::LibraryOther,
        PathClass::Other => FileRole::Unclassified,
    }
}
