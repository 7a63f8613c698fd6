//! `idrplot check` command implementation
//!
//! Reports geometry that will be drawn as given but looks wrong, and names
//! that would produce ambiguous track labels.

use crate::error::Result;
use colored::Colorize;
use idrplot_core::DatasetFormat;
use std::path::Path;
use tracing::debug;

pub fn run(dataset: Option<&Path>, input_format: Option<DatasetFormat>) -> Result<()> {
    let dataset = super::load_dataset(dataset, input_format)?;
    dataset.require_non_empty()?;

    let advisories = dataset.advisories();
    let duplicates = dataset.duplicate_names();
    debug!(
        records = dataset.len(),
        advisories = advisories.len(),
        duplicates = duplicates.len(),
        "Checked dataset"
    );

    println!("{} {} protein records", "✓".green(), dataset.len());

    if advisories.is_empty() {
        println!("{} Geometry is consistent", "✓".green());
    } else {
        println!();
        println!("{}", "Inconsistent geometry (drawn as given):".yellow().bold());
        for note in &advisories {
            println!(
                "  #{:<5} {} {}",
                note.index,
                format!("{:<12}", note.name).cyan(),
                note.advisory
            );
        }
    }

    if !duplicates.is_empty() {
        println!();
        println!("{}", "Duplicate names (labels will repeat):".yellow().bold());
        for name in &duplicates {
            println!("  {}", name.cyan());
        }
    }

    Ok(())
}
