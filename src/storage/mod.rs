//! # Storage Layer
//!
//! Reads catalogs and configuration from a project directory.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Base parts per model | JSON, YAML or TOML | `.bom/models/{model}.json` |
//! | Option catalog | JSON, YAML or TOML (list or id-keyed map) | `.bom/options.json` |
//! | Config | TOML | `.bom/config.toml` |
//!
//! ## Project Structure
//!
//! ```text
//! .bom/
//! ├── models/
//! │   └── sport-26.json     # Base BOM for one boat model
//! ├── options.json          # Option rules
//! └── config.toml           # Project configuration
//! ```
//!
//! ## Key Types
//!
//! - [`Project`] - Entry point for accessing a BOM project
//! - [`CatalogStore`] - Load and write model and option catalogs
//! - [`Config`] - Project and global configuration

mod catalog;
mod config;
mod project;

/// Name of the project directory
pub const BOM_DIR: &str = ".bom";

pub use catalog::{CatalogError, CatalogFormat, CatalogStore};
pub use config::{Config, ConfigError, GlobalConfig, OutputFormat, PicklistConfig, ProjectConfig};
pub use project::{Project, ProjectError, SAMPLE_MODEL};
