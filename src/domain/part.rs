//! BOM line model
//!
//! A [`Part`] is one line of a bill of materials. Older catalogs use
//! `sku`/`dept`/`qty` for the same fields, so deserialization accepts both
//! naming schemes while serialization always writes the canonical names.

use serde::{Deserialize, Serialize};

/// Department bucket for parts with no category
pub const UNKNOWN_DEPARTMENT: &str = "Unknown";

fn default_quantity() -> u64 {
    1
}

/// A staging location holding part of a line's quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingLocation {
    pub location: String,
    #[serde(alias = "qty")]
    pub quantity: u64,
}

impl StagingLocation {
    pub fn new(location: impl Into<String>, quantity: u64) -> Self {
        Self {
            location: location.into(),
            quantity,
        }
    }
}

/// A single BOM line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    /// Identifies the physical part; the key used when folding duplicates
    #[serde(alias = "sku")]
    pub id: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Production department (Lamination, Assembly, Rigging, ...)
    #[serde(default, alias = "dept", alias = "department")]
    pub category: String,

    /// How many of this part one unit needs
    #[serde(default = "default_quantity", alias = "qty")]
    pub quantity: u64,

    /// Bin or shelf the part is pulled from
    #[serde(
        default,
        alias = "pickLocation",
        skip_serializing_if = "Option::is_none"
    )]
    pub pick_location: Option<String>,

    /// Where the part is staged before it reaches the line
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub staging: Vec<StagingLocation>,
}

impl Part {
    /// Creates a part with no location metadata
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        quantity: u64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            quantity,
            pick_location: None,
            staging: Vec::new(),
        }
    }

    /// Sets the pick location
    pub fn with_pick_location(mut self, location: impl Into<String>) -> Self {
        self.pick_location = Some(location.into());
        self
    }

    /// Appends a staging location
    pub fn with_staging(mut self, location: impl Into<String>, quantity: u64) -> Self {
        self.staging.push(StagingLocation::new(location, quantity));
        self
    }

    /// Returns the department bucket, falling back to `Unknown`
    pub fn department(&self) -> &str {
        if self.category.is_empty() {
            UNKNOWN_DEPARTMENT
        } else {
            &self.category
        }
    }
}
