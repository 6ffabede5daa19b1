//! Project management
//!
//! Handles project initialization and provides access to the catalog.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::{CatalogStore, Config, BOM_DIR};
use crate::domain::{OptionCatalog, OptionRule, Part};

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Not in a BOM project. Run 'bom init' first.")]
    NotInProject,

    #[error("No model specified. Pass --model or set default_model in .bom/config.toml")]
    NoModel,
}

/// Model seeded by `bom init`
pub const SAMPLE_MODEL: &str = "sport-26";

/// A BOM project directory
pub struct Project {
    root: PathBuf,
    config: Config,
}

impl Project {
    /// Opens an existing project at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.join(BOM_DIR).is_dir() {
            return Err(ProjectError::NotInProject.into());
        }

        let config = Config::for_project(&root)?;

        Ok(Self { root, config })
    }

    /// Opens the project at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let root = Config::find_project_root().ok_or(ProjectError::NotInProject)?;

        Self::open(root)
    }

    /// Initializes a new project at the given path
    ///
    /// Existing files are left alone, so running it twice is harmless.
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let bom_dir = root.join(BOM_DIR);

        let models_dir = bom_dir.join("models");
        fs::create_dir_all(&models_dir).with_context(|| {
            format!("Failed to create models directory: {}", models_dir.display())
        })?;

        let config_path = bom_dir.join("config.toml");
        if !config_path.exists() {
            let default_config = format!(
                r#"# Boatyard BOM configuration

# Model used when --model is not given
default_model = "{}"

# Option catalog, relative to .bom/ (.json, .yaml, .yml or .toml)
options_file = "options.json"

# Warn when several selected options add the same part
warn_on_conflicts = true

[picklist]
show_staging = true
show_locations = true
"#,
                SAMPLE_MODEL
            );
            fs::write(&config_path, default_config)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        let project = Self::open(root)?;
        let catalog = project.catalog();

        if catalog.list_models()?.is_empty() {
            catalog.write_model(SAMPLE_MODEL, &sample_model())?;
        }
        if !catalog.options_path().exists() {
            catalog.write_options(&sample_options())?;
        }

        Ok(project)
    }

    /// Returns the project root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the .bom directory path
    pub fn bom_dir(&self) -> PathBuf {
        self.root.join(BOM_DIR)
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the catalog store, honoring the configured options file
    pub fn catalog(&self) -> CatalogStore {
        CatalogStore::new(self.bom_dir(), self.config.project.options_file.clone())
    }

    /// Picks the model to use: the explicit one, else the configured default
    pub fn resolve_model(&self, explicit: Option<&str>) -> Result<String> {
        explicit
            .map(str::to_string)
            .or_else(|| self.config.project.default_model.clone())
            .ok_or_else(|| ProjectError::NoModel.into())
    }
}

fn sample_model() -> Vec<Part> {
    vec![
        Part::new("HULL-26", "Hull", "Lamination", 1).with_pick_location("Mold Bay 1"),
        Part::new("DECK-26", "Deck", "Lamination", 1).with_pick_location("Mold Bay 2"),
        Part::new("CONSOLE", "Console", "Assembly", 1).with_pick_location("A-03"),
        Part::new("WIRE-12GA", "Wire", "Rigging", 2)
            .with_pick_location("R-01")
            .with_staging("Rigging Cart", 2),
    ]
}

fn sample_options() -> OptionCatalog {
    OptionCatalog::from(vec![
        OptionRule::new("MINIMAL", "Minimal Package")
            .removes("CONSOLE")
            .removes("WIRE-12GA"),
        OptionRule::new("STEREO", "Stereo Package")
            .adds(Part::new("AMP-JL", "Amp", "Rigging", 1).with_pick_location("R-14"))
            .adds(Part::new("SPEAKERS", "Speakers", "Rigging", 4).with_pick_location("R-15")),
        OptionRule::new("HARD_TOP", "Hard Top")
            .adds(Part::new("HARDTOP", "Hard Top", "Assembly", 1).with_pick_location("A-10"))
            .adds(Part::new("WIRE-12GA", "Wire (extra)", "Rigging", 1))
            .removes("CONSOLE"),
    ])
}
