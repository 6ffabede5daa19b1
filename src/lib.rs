//! Boatyard BOM - options engine and picklists for boat production
//!
//! Each boat model has a base bill of materials. Customer options add and
//! remove parts from it. This crate merges a selection of options into a
//! final parts list, folds duplicate part numbers, and groups the result by
//! production department for picking and staging.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{merge, group_by_dept, calculate_dept_totals, OptionCatalog, OptionRule, Part};
