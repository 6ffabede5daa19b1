//! Option rules and the catalog container
//!
//! An [`OptionRule`] is a named modification to a base BOM: parts it adds
//! and part ids it removes. Catalogs arrive either as an ordered list or as
//! a map keyed by option id; [`OptionCatalog`] accepts both and normalizes
//! them into the ordered slice the merge engine works on.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::part::Part;

/// A selectable modification to the base BOM
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionRule {
    /// Key used to select the rule
    #[serde(default)]
    pub id: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Parts contributed when the rule is applied
    #[serde(default, alias = "parts")]
    pub add: Vec<Part>,

    /// Part ids stripped from the working list before `add` is appended
    #[serde(default, alias = "removes")]
    pub remove: Vec<String>,
}

impl OptionRule {
    /// Creates a rule that neither adds nor removes anything
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            add: Vec::new(),
            remove: Vec::new(),
        }
    }

    /// Adds a part to the rule's add-list
    pub fn adds(mut self, part: Part) -> Self {
        self.add.push(part);
        self
    }

    /// Adds a part id to the rule's remove-list
    pub fn removes(mut self, id: impl Into<String>) -> Self {
        self.remove.push(id.into());
        self
    }
}

/// Option catalog in either of its accepted shapes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionCatalog {
    /// Ordered list of rules
    List(Vec<OptionRule>),

    /// Rules keyed by option id
    Keyed(BTreeMap<String, OptionRule>),
}

impl Default for OptionCatalog {
    fn default() -> Self {
        OptionCatalog::List(Vec::new())
    }
}

impl OptionCatalog {
    /// Normalizes the catalog into an ordered list of rules
    ///
    /// Keyed catalogs enumerate in key order. A keyed rule with an empty
    /// `id` takes its map key.
    pub fn into_rules(self) -> Vec<OptionRule> {
        match self {
            OptionCatalog::List(rules) => rules,
            OptionCatalog::Keyed(map) => map
                .into_iter()
                .map(|(key, mut rule)| {
                    if rule.id.is_empty() {
                        rule.id = key;
                    }
                    rule
                })
                .collect(),
        }
    }

    /// Borrowing variant of [`OptionCatalog::into_rules`]
    pub fn rules(&self) -> Vec<OptionRule> {
        self.clone().into_rules()
    }

    /// Number of rules in the catalog
    pub fn len(&self) -> usize {
        match self {
            OptionCatalog::List(rules) => rules.len(),
            OptionCatalog::Keyed(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<OptionRule>> for OptionCatalog {
    fn from(rules: Vec<OptionRule>) -> Self {
        OptionCatalog::List(rules)
    }
}

impl From<BTreeMap<String, OptionRule>> for OptionCatalog {
    fn from(map: BTreeMap<String, OptionRule>) -> Self {
        OptionCatalog::Keyed(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_list_catalog() {
        let json = r#"[
            {"id": "MINIMAL", "name": "Minimal", "removes": ["CONSOLE"]},
            {"id": "STEREO", "name": "Stereo", "parts": [
                {"id": "AMP-JL", "name": "Amp", "category": "Rigging", "quantity": 1}
            ]}
        ]"#;

        let catalog: OptionCatalog = serde_json::from_str(json).unwrap();
        let rules = catalog.into_rules();

        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].id, "MINIMAL");
        assert_eq!(rules[0].remove, vec!["CONSOLE"]);
        assert!(rules[0].add.is_empty());
        assert_eq!(rules[1].add[0].id, "AMP-JL");
    }

    #[test]
    fn deserialize_keyed_catalog_fills_missing_ids() {
        let json = r#"{
            "STEREO": {"name": "Stereo", "add": [{"sku": "AMP-JL", "dept": "Rigging", "qty": 1}]},
            "HARD_TOP": {"id": "HARD_TOP", "name": "Hard Top", "remove": ["CONSOLE"]}
        }"#;

        let catalog: OptionCatalog = serde_json::from_str(json).unwrap();
        assert!(matches!(catalog, OptionCatalog::Keyed(_)));

        let rules = catalog.into_rules();
        let ids: Vec<_> = rules.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["HARD_TOP", "STEREO"]);
        assert_eq!(rules[1].add[0].category, "Rigging");
    }

    #[test]
    fn builder_helpers() {
        let rule = OptionRule::new("HARD_TOP", "Hard Top")
            .removes("CONSOLE")
            .adds(Part::new("HARDTOP", "Hard Top", "Assembly", 1));

        assert_eq!(rule.remove, vec!["CONSOLE"]);
        assert_eq!(rule.add.len(), 1);
    }

    #[test]
    fn empty_catalog() {
        let catalog = OptionCatalog::default();
        assert!(catalog.is_empty());
        assert!(catalog.rules().is_empty());
    }
}
