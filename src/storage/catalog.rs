//! Catalog files
//!
//! Base parts for each boat model live in `.bom/models/{model}.{ext}` and
//! the option catalog in `.bom/options.{ext}`. JSON, YAML, and TOML are
//! accepted, picked by file extension. TOML has no top-level arrays, so
//! TOML files wrap the list in a `parts = [...]` or `options = [...]` key.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::BOM_DIR;
use crate::domain::{OptionCatalog, OptionRule, Part};

/// Extensions tried, in order, when looking up a model by name
const MODEL_EXTENSIONS: &[&str] = &["json", "yaml", "yml", "toml"];

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(PathBuf),
}

/// File format of a catalog file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Yaml,
    Toml,
}

impl CatalogFormat {
    /// Picks the format from a path's extension
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(CatalogFormat::Json),
            Some("yaml") | Some("yml") => Ok(CatalogFormat::Yaml),
            Some("toml") => Ok(CatalogFormat::Toml),
            _ => Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct TomlModel {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum TomlOptions {
    List {
        #[serde(default)]
        options: Vec<OptionRule>,
    },
    Keyed {
        options: BTreeMap<String, OptionRule>,
    },
}

/// Reads and writes base-model and option catalogs
pub struct CatalogStore {
    dir: PathBuf,
    options_file: String,
}

impl CatalogStore {
    /// Creates a store rooted at a `.bom/` directory
    pub fn new(dir: impl Into<PathBuf>, options_file: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            options_file: options_file.into(),
        }
    }

    /// Creates the store for a project, using the default options file
    pub fn for_project(project_root: &Path) -> Self {
        Self::new(project_root.join(BOM_DIR), "options.json")
    }

    /// Returns the models directory
    pub fn models_dir(&self) -> PathBuf {
        self.dir.join("models")
    }

    /// Returns the option catalog path
    pub fn options_path(&self) -> PathBuf {
        self.dir.join(&self.options_file)
    }

    /// Lists model names (file stems), sorted
    pub fn list_models(&self) -> Result<Vec<String>> {
        let models_dir = self.models_dir();
        if !models_dir.is_dir() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&models_dir)
            .with_context(|| format!("Failed to read models directory: {}", models_dir.display()))?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if CatalogFormat::from_path(&path).is_err() {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }

        names.sort();
        names.dedup();
        Ok(names)
    }

    /// Finds the file backing a model
    pub fn model_path(&self, name: &str) -> Option<PathBuf> {
        let models_dir = self.models_dir();
        MODEL_EXTENSIONS
            .iter()
            .map(|ext| models_dir.join(format!("{}.{}", name, ext)))
            .find(|path| path.is_file())
    }

    /// Loads a model's base parts
    pub fn load_model(&self, name: &str) -> Result<Vec<Part>> {
        let path = self
            .model_path(name)
            .ok_or_else(|| CatalogError::ModelNotFound(name.to_string()))?;

        let format = CatalogFormat::from_path(&path)?;
        let content = read(&path)?;

        let parts = match format {
            CatalogFormat::Toml => parse::<TomlModel>(format, &content, &path)?.parts,
            _ => parse(format, &content, &path)?,
        };

        Ok(parts)
    }

    /// Loads the option catalog; a missing file is an empty catalog
    pub fn load_options(&self) -> Result<OptionCatalog> {
        let path = self.options_path();
        if !path.exists() {
            return Ok(OptionCatalog::default());
        }

        let format = CatalogFormat::from_path(&path)?;
        let content = read(&path)?;

        let catalog = match format {
            CatalogFormat::Toml => match parse::<TomlOptions>(format, &content, &path)? {
                TomlOptions::List { options } => OptionCatalog::List(options),
                TomlOptions::Keyed { options } => OptionCatalog::Keyed(options),
            },
            _ => parse(format, &content, &path)?,
        };

        Ok(catalog)
    }

    /// Writes a model's base parts as `{name}.json`
    pub fn write_model(&self, name: &str, parts: &[Part]) -> Result<PathBuf> {
        let models_dir = self.models_dir();
        fs::create_dir_all(&models_dir)
            .with_context(|| format!("Failed to create directory: {}", models_dir.display()))?;

        let path = models_dir.join(format!("{}.json", name));
        let content = serde_json::to_string_pretty(parts).context("Failed to serialize model")?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write model: {}", path.display()))?;

        Ok(path)
    }

    /// Writes the option catalog in the format its path names
    pub fn write_options(&self, catalog: &OptionCatalog) -> Result<()> {
        let path = self.options_path();
        let content = match CatalogFormat::from_path(&path)? {
            CatalogFormat::Json => {
                serde_json::to_string_pretty(catalog).context("Failed to serialize options")?
            }
            CatalogFormat::Yaml => {
                serde_yaml::to_string(catalog).context("Failed to serialize options")?
            }
            CatalogFormat::Toml => {
                let wrapped = match catalog.clone() {
                    OptionCatalog::List(options) => TomlOptions::List { options },
                    OptionCatalog::Keyed(options) => TomlOptions::Keyed { options },
                };
                toml::to_string_pretty(&wrapped).context("Failed to serialize options")?
            }
        };

        fs::write(&path, content)
            .with_context(|| format!("Failed to write options: {}", path.display()))
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read catalog: {}", path.display()))
}

fn parse<T: DeserializeOwned>(format: CatalogFormat, content: &str, path: &Path) -> Result<T> {
    let context = || format!("Failed to parse catalog: {}", path.display());
    match format {
        CatalogFormat::Json => serde_json::from_str(content).with_context(context),
        CatalogFormat::Yaml => serde_yaml::from_str(content).with_context(context),
        CatalogFormat::Toml => toml::from_str(content).with_context(context),
    }
}
