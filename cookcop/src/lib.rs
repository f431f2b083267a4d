//! Core library for the cookcop Chef cookbook linter.
//!
//! Ruby sources are parsed with tree-sitter, lowered into a small statement
//! tree, and checked by rules that report findings with optional
//! corrections. The only rule shipped today removes redundant
//! `Chef::Mixin::ShellOut`/`PowershellOut` inclusions from resources and
//! providers.

#![allow(clippy::module_name_repetitions, clippy::items_after_statements)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// Module containing the file-level analyzer.
/// This includes the `Analyzer` struct and its methods for running the analysis.
pub mod analyzer;

/// Module defining the command-line interface arguments and structs.
pub mod cli;

/// Module for handling CLI commands and their execution logic.
pub mod commands;

/// Module for loading configuration.
pub mod config;

/// Module containing shared constants and regex patterns.
pub mod constants;

/// Module for parsing Ruby sources into the statement tree.
pub mod cst;

/// Module defining the entry point logic shared by the binary and tests.
pub mod entry_point;

/// Module for applying byte-range corrections to source text.
pub mod fix;

/// Module containing the linter that runs rules and applies suppressions.
pub mod linter;

/// Module for rich CLI output formatting with colored text and progress bars.
pub mod output;

/// Module containing the implementation of the analysis rules.
pub mod rules;

/// Module defining the language-neutral statement tree the rules inspect.
pub mod syntax;

/// Module containing utility functions.
/// This includes line indexing, suppression comments and path helpers.
pub mod utils;
