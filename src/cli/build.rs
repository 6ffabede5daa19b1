//! Build commands (merge, picklist)
//!
//! Both load a model's base parts and the option catalog, run the merge
//! engine, and render the result.

use anyhow::Result;

use super::app::Selection;
use super::output::Output;
use crate::domain::{merge_with_report, MergeResult, Part, Picklist};
use crate::storage::{PicklistConfig, Project};

/// A merged selection plus the warnings it produced
struct Build {
    project: Project,
    model: String,
    report: MergeResult,
    warnings: Vec<String>,
}

/// Loads the catalog and merges the selection
///
/// Stale ids and conflicts become warnings. Text output prints them to
/// stderr; JSON output carries them in the payload.
fn run_selection(output: &Output, selection: &Selection) -> Result<Build> {
    let project = Project::open_current()?;
    output.verbose_ctx(
        "build",
        &format!("Opened project at: {}", project.root().display()),
    );

    let model = project.resolve_model(selection.model.as_deref())?;
    let catalog = project.catalog();

    let base = catalog.load_model(&model)?;
    let rules = catalog.load_options()?.into_rules();
    output.verbose_ctx(
        "build",
        &format!("Model {} has {} base parts, catalog has {} options", model, base.len(), rules.len()),
    );

    let report = merge_with_report(&base, &rules, &selection.options);

    let mut warnings: Vec<String> = report
        .ignored
        .iter()
        .map(|id| format!("Unknown option ignored: {}", id))
        .collect();
    if project.config().project.warn_on_conflicts {
        warnings.extend(report.conflicts.iter().map(|conflict| {
            format!(
                "{} is added by several options ({})",
                conflict.id,
                conflict.conflicting_option_ids.join(", ")
            )
        }));
    }

    if !output.is_json() {
        for warning in &warnings {
            output.warn(warning);
        }
    }

    output.verbose_ctx(
        "build",
        &format!("Merged to {} parts", report.parts.len()),
    );

    Ok(Build {
        project,
        model,
        report,
        warnings,
    })
}

/// Print the final parts list
pub fn merge(output: &Output, selection: &Selection) -> Result<()> {
    let Build {
        model,
        report,
        warnings,
        ..
    } = run_selection(output, selection)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "model": model,
            "applied": report.applied,
            "ignored": report.ignored,
            "conflicts": report.conflicts,
            "warnings": warnings,
            "parts": report.parts,
        }));
        return Ok(());
    }

    println!("BOM for {} ({} parts):", model, report.parts.len());
    if !report.applied.is_empty() {
        println!("Options: {}", report.applied.join(", "));
    }
    println!("{:<14} {:<24} {:<14} {:>5}", "ID", "NAME", "DEPT", "QTY");
    println!("{}", "-".repeat(60));
    for part in &report.parts {
        println!(
            "{:<14} {:<24} {:<14} {:>5}",
            part.id,
            part.name,
            part.department(),
            part.quantity
        );
    }

    Ok(())
}

/// Print a department-grouped picklist
pub fn picklist(output: &Output, selection: &Selection) -> Result<()> {
    let Build {
        project,
        model,
        report,
        warnings,
    } = run_selection(output, selection)?;
    let picklist = Picklist::build(model, report.applied, &report.parts);

    if output.is_json() {
        output.data(&serde_json::json!({
            "picklist": picklist,
            "ignored": report.ignored,
            "conflicts": report.conflicts,
            "warnings": warnings,
        }));
        return Ok(());
    }

    let settings = &project.config().project.picklist;

    println!("Picklist: {}", picklist.model);
    if !picklist.options.is_empty() {
        println!("Options:  {}", picklist.options.join(", "));
    }
    println!(
        "Generated: {}",
        picklist.generated_at.format("%Y-%m-%d %H:%M UTC")
    );

    for section in &picklist.departments {
        println!();
        println!(
            "== {} ({} items, {} pcs)",
            section.department, section.totals.total_items, section.totals.total_quantity
        );
        for part in &section.parts {
            print_line(part, settings);
        }
    }

    println!();
    println!(
        "Total: {} items, {} pcs",
        picklist.totals.total_items, picklist.totals.total_quantity
    );

    Ok(())
}

fn print_line(part: &Part, settings: &PicklistConfig) {
    let location = match (&part.pick_location, settings.show_locations) {
        (Some(location), true) => location.as_str(),
        _ => "",
    };
    println!(
        "  [ ] {:>4} x {:<24} {:<14} {}",
        part.quantity, part.name, part.id, location
    );

    if settings.show_staging {
        for staged in &part.staging {
            println!("        staged: {} at {}", staged.quantity, staged.location);
        }
    }
}
