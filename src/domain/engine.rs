//! BOM options merge engine
//!
//! Applies selected option rules to a base parts list, then folds duplicate
//! part ids into one line with summed quantity.
//!
//! For each selected id, in order:
//! 1. Unknown ids are skipped.
//! 2. The rule's removals filter the current working list.
//! 3. The rule's additions are appended as-is.
//!
//! Folding runs once, after every rule has been applied. The first
//! occurrence of an id keeps its record and later quantities are added to
//! it. Inputs are never mutated; the output is always freshly allocated.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::conflict::{find_option_conflicts, selected_rules, OptionConflict};
use super::option::{OptionCatalog, OptionRule};
use super::part::Part;

/// Result of a merge with diagnostics about the selection
#[derive(Debug, Clone, Serialize)]
pub struct MergeResult {
    /// The folded final parts list
    pub parts: Vec<Part>,

    /// Selected ids that matched a rule, in application order
    pub applied: Vec<String>,

    /// Selected ids that matched nothing
    pub ignored: Vec<String>,

    /// Part ids added by more than one applied option
    pub conflicts: Vec<OptionConflict>,
}

/// Computes the final parts list for a selection of options
pub fn merge<S: AsRef<str>>(base: &[Part], rules: &[OptionRule], selected: &[S]) -> Vec<Part> {
    let mut working: Vec<Part> = base.to_vec();

    for id in selected {
        let Some(rule) = find_rule(rules, id.as_ref()) else {
            continue;
        };

        if !rule.remove.is_empty() {
            let removed: HashSet<&str> = rule.remove.iter().map(String::as_str).collect();
            working.retain(|part| !removed.contains(part.id.as_str()));
        }

        working.extend(rule.add.iter().cloned());
    }

    fold_duplicates(&working)
}

/// Merges against a catalog in either accepted shape
pub fn apply_options<S: AsRef<str>>(
    base: &[Part],
    catalog: &OptionCatalog,
    selected: &[S],
) -> Vec<Part> {
    merge(base, &catalog.rules(), selected)
}

/// Merges and reports which selections applied, which were ignored, and
/// which part ids several options added
pub fn merge_with_report<S: AsRef<str>>(
    base: &[Part],
    rules: &[OptionRule],
    selected: &[S],
) -> MergeResult {
    let (applied, ignored): (Vec<String>, Vec<String>) = selected
        .iter()
        .map(|id| id.as_ref().to_string())
        .partition(|id| find_rule(rules, id).is_some());

    MergeResult {
        parts: merge(base, rules, selected),
        conflicts: find_option_conflicts(selected_rules(rules, selected)),
        applied,
        ignored,
    }
}

/// Collapses lines sharing an id into one, summing quantities
///
/// The first occurrence keeps its name, category, and metadata. Output
/// order is first-occurrence order. Sums past `u64::MAX` saturate.
pub fn fold_duplicates(parts: &[Part]) -> Vec<Part> {
    let mut folded: Vec<Part> = Vec::with_capacity(parts.len());
    let mut index: HashMap<&str, usize> = HashMap::new();

    for part in parts {
        match index.get(part.id.as_str()) {
            Some(&pos) => {
                let existing = &mut folded[pos];
                existing.quantity = existing.quantity.saturating_add(part.quantity);
            }
            None => {
                index.insert(part.id.as_str(), folded.len());
                folded.push(part.clone());
            }
        }
    }

    folded
}

fn find_rule<'a>(rules: &'a [OptionRule], id: &str) -> Option<&'a OptionRule> {
    rules.iter().find(|rule| rule.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn base() -> Vec<Part> {
        vec![
            Part::new("HULL-26", "Hull", "Lamination", 1),
            Part::new("DECK-26", "Deck", "Lamination", 1),
            Part::new("CONSOLE", "Console", "Assembly", 1),
            Part::new("WIRE-12GA", "Wire", "Rigging", 2),
        ]
    }

    fn minimal() -> OptionRule {
        OptionRule::new("MINIMAL", "Minimal")
            .removes("CONSOLE")
            .removes("WIRE-12GA")
    }

    fn stereo() -> OptionRule {
        OptionRule::new("STEREO", "Stereo")
            .adds(Part::new("AMP-JL", "Amp", "Rigging", 1))
            .adds(Part::new("SPEAKERS", "Speakers", "Rigging", 4))
    }

    fn hard_top() -> OptionRule {
        OptionRule::new("HARD_TOP", "Hard Top")
            .adds(Part::new("HARDTOP", "Hard Top", "Assembly", 1))
            .adds(Part::new("WIRE-12GA", "Wire (extra)", "Rigging", 1))
            .removes("CONSOLE")
    }

    fn ids(parts: &[Part]) -> Vec<&str> {
        parts.iter().map(|p| p.id.as_str()).collect()
    }

    fn quantity_of(parts: &[Part], id: &str) -> Option<u64> {
        parts.iter().find(|p| p.id == id).map(|p| p.quantity)
    }

    #[test]
    fn no_options_returns_base() {
        let result = merge::<&str>(&base(), &[], &[]);

        assert_eq!(result.len(), 4);
        assert_eq!(result[0].id, "HULL-26");
        assert_eq!(result, base());
    }

    #[test]
    fn removal_only_option() {
        let result = merge(&base(), &[minimal()], &["MINIMAL"]);

        assert_eq!(result.len(), 2);
        assert!(quantity_of(&result, "CONSOLE").is_none());
        assert!(quantity_of(&result, "WIRE-12GA").is_none());
    }

    #[test]
    fn addition_only_option() {
        let result = merge(&base(), &[stereo()], &["STEREO"]);

        assert_eq!(result.len(), 6);
        assert_eq!(quantity_of(&result, "AMP-JL"), Some(1));
        assert_eq!(quantity_of(&result, "SPEAKERS"), Some(4));
    }

    #[test]
    fn add_and_remove_folds_duplicate_wire() {
        let result = merge(&base(), &[hard_top()], &["HARD_TOP"]);

        assert_eq!(ids(&result), vec!["HULL-26", "DECK-26", "WIRE-12GA", "HARDTOP"]);
        assert!(quantity_of(&result, "CONSOLE").is_none());
        assert_eq!(quantity_of(&result, "HARDTOP"), Some(1));
        assert_eq!(quantity_of(&result, "WIRE-12GA"), Some(3));

        // First occurrence keeps its record
        let wire = result.iter().find(|p| p.id == "WIRE-12GA").unwrap();
        assert_eq!(wire.name, "Wire");
    }

    #[test]
    fn unknown_option_is_ignored() {
        let expected = merge(&base(), &[hard_top()], &["HARD_TOP"]);
        let result = merge(&base(), &[hard_top()], &["HARD_TOP", "INVALID_OPTION"]);

        assert_eq!(result.len(), 4);
        assert_eq!(result, expected);
    }

    #[test]
    fn remove_then_readd_same_id() {
        let deluxe = OptionRule::new("DELUXE", "Deluxe Console")
            .removes("CONSOLE")
            .adds(Part::new("CONSOLE", "Deluxe Console", "Assembly", 2));

        let result = merge(&base(), &[deluxe], &["DELUXE"]);

        let consoles: Vec<_> = result.iter().filter(|p| p.id == "CONSOLE").collect();
        assert_eq!(consoles.len(), 1);
        assert_eq!(consoles[0].name, "Deluxe Console");
        assert_eq!(consoles[0].quantity, 2);
    }

    #[test]
    fn later_removal_wins_over_earlier_add() {
        let result = merge(&base(), &[stereo(), minimal()], &["HARD_TOP", "STEREO", "MINIMAL"]);
        assert_eq!(ids(&result), vec!["HULL-26", "DECK-26", "AMP-JL", "SPEAKERS"]);

        let strip_amp = OptionRule::new("NO_AMP", "No Amp").removes("AMP-JL");
        let result = merge(&base(), &[stereo(), strip_amp], &["STEREO", "NO_AMP"]);
        assert!(quantity_of(&result, "AMP-JL").is_none());
    }

    #[test]
    fn two_options_adding_same_id_are_summed() {
        let a = OptionRule::new("A", "A").adds(Part::new("CLEAT", "Cleat", "Rigging", 2));
        let b = OptionRule::new("B", "B").adds(Part::new("CLEAT", "Big Cleat", "Rigging", 3));

        let result = merge(&base(), &[a, b], &["A", "B"]);

        assert_eq!(quantity_of(&result, "CLEAT"), Some(5));
        assert_eq!(result.iter().find(|p| p.id == "CLEAT").unwrap().name, "Cleat");
    }

    #[test]
    fn first_matching_rule_is_used() {
        let first = OptionRule::new("X", "First").adds(Part::new("P1", "P1", "", 1));
        let second = OptionRule::new("X", "Second").adds(Part::new("P2", "P2", "", 1));

        let result = merge::<&str>(&[], &[first, second], &["X"]);
        assert_eq!(ids(&result), vec!["P1"]);
    }

    #[test]
    fn inputs_are_not_mutated() {
        let base = base();
        let rules = vec![hard_top(), stereo()];
        let base_before = base.clone();
        let rules_before = rules.clone();

        let _ = merge(&base, &rules, &["HARD_TOP", "STEREO"]);

        assert_eq!(base, base_before);
        assert_eq!(rules, rules_before);
    }

    #[test]
    fn fold_preserves_first_occurrence_order() {
        let parts = vec![
            Part::new("B", "B", "", 1),
            Part::new("A", "A", "", 2),
            Part::new("B", "B2", "", 3),
            Part::new("C", "C", "", 1),
            Part::new("A", "A2", "", 5),
        ];

        let folded = fold_duplicates(&parts);
        assert_eq!(ids(&folded), vec!["B", "A", "C"]);
        assert_eq!(folded[0].quantity, 4);
        assert_eq!(folded[1].quantity, 7);
        assert_eq!(folded[1].name, "A");
    }

    #[test]
    fn fold_sums_past_u32_range() {
        let parts = vec![
            Part::new("RESIN", "Resin (ml)", "Lamination", u64::from(u32::MAX)),
            Part::new("RESIN", "Resin (ml)", "Lamination", 5),
        ];

        let folded = fold_duplicates(&parts);
        assert_eq!(folded[0].quantity, 4_294_967_300);
    }

    #[test]
    fn fold_keeps_first_metadata() {
        let parts = vec![
            Part::new("AMP-JL", "Amp", "Rigging", 1).with_pick_location("R-14"),
            Part::new("AMP-JL", "Amp", "Rigging", 1).with_pick_location("R-99"),
        ];

        let folded = fold_duplicates(&parts);
        assert_eq!(folded.len(), 1);
        assert_eq!(folded[0].pick_location.as_deref(), Some("R-14"));
        assert_eq!(folded[0].quantity, 2);
    }

    #[test]
    fn apply_options_accepts_keyed_catalog() {
        let mut map = BTreeMap::new();
        map.insert("HARD_TOP".to_string(), hard_top());
        map.insert("STEREO".to_string(), stereo());

        let keyed = OptionCatalog::from(map);
        let listed = OptionCatalog::from(vec![stereo(), hard_top()]);

        let from_keyed = apply_options(&base(), &keyed, &["HARD_TOP"]);
        let from_list = apply_options(&base(), &listed, &["HARD_TOP"]);

        assert_eq!(from_keyed, from_list);
        assert_eq!(from_keyed.len(), 4);
    }

    #[test]
    fn report_splits_applied_and_ignored() {
        let rules = vec![hard_top(), stereo()];
        let report = merge_with_report(&base(), &rules, &["STEREO", "GONE", "HARD_TOP"]);

        assert_eq!(report.applied, vec!["STEREO", "HARD_TOP"]);
        assert_eq!(report.ignored, vec!["GONE"]);
        assert_eq!(report.parts, merge(&base(), &rules, &["STEREO", "HARD_TOP"]));
        assert!(report.conflicts.is_empty());
    }

    #[test]
    fn report_surfaces_conflicts() {
        let extra_wire = OptionRule::new("EXTRA_WIRE", "Extra Wire")
            .adds(Part::new("WIRE-12GA", "Wire", "Rigging", 4));
        let rules = vec![hard_top(), extra_wire];

        let report = merge_with_report(&base(), &rules, &["HARD_TOP", "EXTRA_WIRE"]);

        assert_eq!(report.conflicts.len(), 1);
        assert_eq!(report.conflicts[0].id, "WIRE-12GA");
        assert_eq!(quantity_of(&report.parts, "WIRE-12GA"), Some(7));
    }
}

#[cfg(test)]
mod properties {
    use super::*;
    use proptest::prelude::*;

    const IDS: &[&str] = &["HULL", "DECK", "CONSOLE", "WIRE", "AMP", "SPEAKERS"];
    const OPTION_IDS: &[&str] = &["OPT_A", "OPT_B", "OPT_C"];

    fn arb_part() -> impl Strategy<Value = Part> {
        (prop::sample::select(IDS), 0u64..50).prop_map(|(id, quantity)| {
            Part::new(id, id.to_lowercase(), "Rigging", quantity)
        })
    }

    fn arb_rule(id: &'static str) -> impl Strategy<Value = OptionRule> {
        (
            prop::collection::vec(arb_part(), 0..4),
            prop::collection::vec(prop::sample::select(IDS), 0..3),
        )
            .prop_map(move |(add, remove)| OptionRule {
                id: id.to_string(),
                name: id.to_string(),
                add,
                remove: remove.into_iter().map(str::to_string).collect(),
            })
    }

    fn arb_rules() -> impl Strategy<Value = Vec<OptionRule>> {
        (arb_rule("OPT_A"), arb_rule("OPT_B"), arb_rule("OPT_C"))
            .prop_map(|(a, b, c)| vec![a, b, c])
    }

    fn arb_selection() -> impl Strategy<Value = Vec<&'static str>> {
        prop::collection::vec(prop::sample::select(OPTION_IDS), 0..5)
    }

    proptest! {
        #[test]
        fn empty_selection_is_fold_of_base(
            base in prop::collection::vec(arb_part(), 0..10),
            rules in arb_rules(),
        ) {
            prop_assert_eq!(merge::<&str>(&base, &rules, &[]), fold_duplicates(&base));
        }

        #[test]
        fn output_ids_are_unique(
            base in prop::collection::vec(arb_part(), 0..10),
            rules in arb_rules(),
            selected in arb_selection(),
        ) {
            let result = merge(&base, &rules, &selected);
            let distinct: HashSet<_> = result.iter().map(|p| p.id.as_str()).collect();
            prop_assert_eq!(distinct.len(), result.len());
        }

        #[test]
        fn fold_conserves_quantity(parts in prop::collection::vec(arb_part(), 0..20)) {
            let folded = fold_duplicates(&parts);
            for part in &folded {
                let expected: u64 = parts
                    .iter()
                    .filter(|p| p.id == part.id)
                    .map(|p| p.quantity)
                    .sum();
                prop_assert_eq!(part.quantity, expected);
            }
        }

        #[test]
        fn unknown_ids_do_not_change_output(
            base in prop::collection::vec(arb_part(), 0..10),
            rules in arb_rules(),
            selected in arb_selection(),
            position in 0usize..6,
        ) {
            let mut with_unknown = selected.clone();
            let at = position.min(with_unknown.len());
            with_unknown.insert(at, "NOT_IN_CATALOG");

            prop_assert_eq!(merge(&base, &rules, &with_unknown), merge(&base, &rules, &selected));
        }
    }
}
