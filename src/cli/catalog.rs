//! Catalog commands (models, options, conflicts, validate)

use anyhow::Result;

use super::output::Output;
use crate::domain::{find_option_conflicts, selected_rules, validate_selected_options};
use crate::storage::Project;

/// List boat models
pub fn models(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let catalog = project.catalog();
    let names = catalog.list_models()?;
    output.verbose_ctx("models", &format!("Found {} models", names.len()));

    let mut rows = Vec::with_capacity(names.len());
    for name in names {
        let parts = catalog.load_model(&name)?;
        rows.push((name, parts.len()));
    }

    if output.is_json() {
        let items: Vec<_> = rows
            .iter()
            .map(|(name, count)| serde_json::json!({ "model": name, "parts": count }))
            .collect();
        output.data(&items);
    } else if rows.is_empty() {
        println!("No models found in {}", catalog.models_dir().display());
    } else {
        println!("{:<20} PARTS", "MODEL");
        println!("{}", "-".repeat(30));
        for (name, count) in &rows {
            println!("{:<20} {}", name, count);
        }
    }

    Ok(())
}

/// List option rules
pub fn options(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let rules = project.catalog().load_options()?.into_rules();
    output.verbose_ctx("options", &format!("Loaded {} options", rules.len()));

    if output.is_json() {
        output.data(&rules);
    } else if rules.is_empty() {
        println!("No options defined.");
    } else {
        println!("{:<14} {:<24} CHANGES", "ID", "NAME");
        println!("{}", "-".repeat(60));
        for rule in &rules {
            let changes: Vec<String> = rule
                .remove
                .iter()
                .map(|id| format!("-{}", id))
                .chain(rule.add.iter().map(|p| format!("+{}x{}", p.id, p.quantity)))
                .collect();
            println!("{:<14} {:<24} {}", rule.id, rule.name, changes.join(" "));
        }
    }

    Ok(())
}

/// Show parts added by more than one selected option
pub fn conflicts(output: &Output, selected: &[String]) -> Result<()> {
    let project = Project::open_current()?;
    let rules = project.catalog().load_options()?.into_rules();

    for id in validate_selected_options(selected, &rules) {
        output.warn(&format!("Unknown option ignored: {}", id));
    }

    let conflicts = find_option_conflicts(selected_rules(&rules, selected));
    output.verbose_ctx("conflicts", &format!("Found {} conflicts", conflicts.len()));

    if output.is_json() {
        output.data(&conflicts);
    } else if conflicts.is_empty() {
        println!("No conflicts.");
    } else {
        println!("{:<14} ADDED BY", "PART");
        println!("{}", "-".repeat(40));
        for conflict in &conflicts {
            println!(
                "{:<14} {}",
                conflict.id,
                conflict.conflicting_option_ids.join(", ")
            );
        }
    }

    Ok(())
}

/// Check selected ids against the catalog; fails if any are unknown
pub fn validate(output: &Output, selected: &[String]) -> Result<()> {
    let project = Project::open_current()?;
    let rules = project.catalog().load_options()?.into_rules();
    let invalid = validate_selected_options(selected, &rules);

    if output.is_json() {
        output.data(&serde_json::json!({
            "valid": invalid.is_empty(),
            "invalid": invalid,
        }));
    } else if invalid.is_empty() {
        output.success(&format!("All {} selected options are valid", selected.len()));
    }

    if !invalid.is_empty() {
        anyhow::bail!("Unknown option(s): {}", invalid.join(", "));
    }

    Ok(())
}
