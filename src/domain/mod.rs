//! Domain models for the BOM engine
//!
//! Pure data transformation: base parts plus option rules in, folded and
//! grouped parts lists out. No I/O happens here.

mod part;
mod option;
mod engine;
mod conflict;
mod report;

pub use part::{Part, StagingLocation, UNKNOWN_DEPARTMENT};
pub use option::{OptionCatalog, OptionRule};
pub use engine::{apply_options, fold_duplicates, merge, merge_with_report, MergeResult};
pub use conflict::{find_option_conflicts, selected_rules, validate_selected_options, OptionConflict};
pub use report::{
    calculate_dept_totals, compare_names, group_by_dept, DeptTotals, Picklist, PicklistSection,
};
