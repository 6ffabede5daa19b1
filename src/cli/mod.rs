//! # Command-Line Interface
//!
//! User-facing commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `init` | Create a project with a sample catalog |
//! | `models`, `options` | Browse the catalog |
//! | `merge` | Final folded parts list for a model and selection |
//! | `picklist` | Department-grouped sheet with totals |
//! | `conflicts`, `validate` | Selection diagnostics |
//!
//! ## Output Formats
//!
//! All commands support `--format text|json`. Without the flag the global
//! config's `default_format` applies.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod build;
mod catalog;

pub use app::{Cli, Commands, Selection, run};
pub use output::{Output, OutputFormat};
