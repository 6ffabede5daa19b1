//! Department grouping and totals
//!
//! Turns a flat, folded parts list into per-department buckets for the
//! picklist sheet and staging workflow.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::part::Part;

/// Item count and summed quantity for a group of parts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DeptTotals {
    pub total_items: usize,
    pub total_quantity: u64,
}

/// Compares display names the way a locale-aware sort would
///
/// Case is ignored for the primary ordering. Names equal up to case put the
/// lowercase form first, then fall back to a plain comparison.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    primary
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

/// Groups parts by department, each bucket sorted by name
///
/// Parts without a category land in `Unknown`. Bucket keys iterate in
/// alphabetical order.
pub fn group_by_dept(parts: &[Part]) -> BTreeMap<String, Vec<Part>> {
    let mut groups: BTreeMap<String, Vec<Part>> = BTreeMap::new();

    for part in parts {
        groups
            .entry(part.department().to_string())
            .or_default()
            .push(part.clone());
    }

    for bucket in groups.values_mut() {
        bucket.sort_by(|a, b| compare_names(&a.name, &b.name));
    }

    groups
}

/// Counts items and sums quantities
pub fn calculate_dept_totals(parts: &[Part]) -> DeptTotals {
    DeptTotals {
        total_items: parts.len(),
        total_quantity: parts
            .iter()
            .fold(0u64, |total, p| total.saturating_add(p.quantity)),
    }
}

/// One department's section of a picklist
#[derive(Debug, Clone, Serialize)]
pub struct PicklistSection {
    pub department: String,
    pub parts: Vec<Part>,
    pub totals: DeptTotals,
}

/// A department-grouped, printable parts sheet for one boat
#[derive(Debug, Clone, Serialize)]
pub struct Picklist {
    pub model: String,
    pub options: Vec<String>,
    pub departments: Vec<PicklistSection>,
    pub totals: DeptTotals,
    pub generated_at: DateTime<Utc>,
}

impl Picklist {
    /// Builds a picklist from an already merged parts list
    pub fn build(model: impl Into<String>, options: Vec<String>, parts: &[Part]) -> Self {
        let departments = group_by_dept(parts)
            .into_iter()
            .map(|(department, parts)| PicklistSection {
                totals: calculate_dept_totals(&parts),
                department,
                parts,
            })
            .collect();

        Self {
            model: model.into(),
            options,
            departments,
            totals: calculate_dept_totals(parts),
            generated_at: Utc::now(),
        }
    }
}
