//! Selection diagnostics
//!
//! Neither check blocks a merge. They exist so callers can warn about
//! stale selections and about parts that several options add at once.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::option::OptionRule;

/// A part id added by more than one selected option
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionConflict {
    /// The part id
    pub id: String,

    /// Options that add it, in the order they were scanned
    pub conflicting_option_ids: Vec<String>,
}

/// Finds part ids added by two or more of the given options
///
/// Removals are ignored. Conflicts are reported in the order their part id
/// was first seen.
pub fn find_option_conflicts<'a>(
    selected: impl IntoIterator<Item = &'a OptionRule>,
) -> Vec<OptionConflict> {
    let mut order: Vec<&str> = Vec::new();
    let mut adders: HashMap<&str, Vec<&str>> = HashMap::new();

    for rule in selected {
        for part in &rule.add {
            let entry = adders.entry(part.id.as_str()).or_insert_with(|| {
                order.push(part.id.as_str());
                Vec::new()
            });
            if !entry.contains(&rule.id.as_str()) {
                entry.push(rule.id.as_str());
            }
        }
    }

    order
        .into_iter()
        .filter_map(|id| {
            let options = adders.get(id)?;
            (options.len() > 1).then(|| OptionConflict {
                id: id.to_string(),
                conflicting_option_ids: options.iter().map(|o| o.to_string()).collect(),
            })
        })
        .collect()
}

/// Returns the selected ids that match no available option
pub fn validate_selected_options<S: AsRef<str>>(
    selected: &[S],
    available: &[OptionRule],
) -> Vec<String> {
    let known: HashSet<&str> = available.iter().map(|r| r.id.as_str()).collect();

    selected
        .iter()
        .map(AsRef::as_ref)
        .filter(|id| !known.contains(id))
        .map(str::to_string)
        .collect()
}

/// Resolves selected ids to their rules, skipping unknown ids
///
/// The first rule with a matching id wins, the same lookup the merge engine
/// performs.
pub fn selected_rules<'a, S: AsRef<str>>(
    rules: &'a [OptionRule],
    selected: &[S],
) -> Vec<&'a OptionRule> {
    selected
        .iter()
        .filter_map(|id| rules.iter().find(|r| r.id == id.as_ref()))
        .collect()
}
