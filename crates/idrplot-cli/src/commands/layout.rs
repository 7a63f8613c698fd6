//! `idrplot layout` command implementation
//!
//! Prints the p-site centered tracks in rank order.

use crate::error::Result;
use clap::ValueEnum;
use colored::Colorize;
use idrplot_common::LayoutRecord;
use idrplot_core::layout::normalize_and_rank;
use idrplot_core::DatasetFormat;
use std::io::{self, IsTerminal};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Tsv,
}

pub fn run(
    dataset: Option<&Path>,
    input_format: Option<DatasetFormat>,
    format: Option<OutputFormat>,
    output: Option<&Path>,
) -> Result<()> {
    let dataset = super::load_dataset(dataset, input_format)?;
    let layouts = normalize_and_rank(dataset.records());

    let formatted = match determine_output_format(format) {
        OutputFormat::Table => format_as_table(&layouts),
        OutputFormat::Json => format_as_json(&layouts)?,
        OutputFormat::Csv => format_as_delimited(&layouts, b',')?,
        OutputFormat::Tsv => format_as_delimited(&layouts, b'\t')?,
    };

    if let Some(path) = output {
        std::fs::write(path, formatted)?;
        println!(
            "{} Output written to: {}",
            "✓".green(),
            path.display().to_string().cyan()
        );
    } else {
        print!("{}", formatted);
    }

    Ok(())
}

/// Table on a terminal, tsv for pipes
fn determine_output_format(format: Option<OutputFormat>) -> OutputFormat {
    if let Some(format) = format {
        return format;
    }

    if io::stdout().is_terminal() {
        OutputFormat::Table
    } else {
        OutputFormat::Tsv
    }
}

fn format_as_table(layouts: &[LayoutRecord]) -> String {
    use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, CellAlignment, Table};

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            "Rank", "Name", "Length", "IDR start", "IDR end", "p-site", "Protein start",
            "Protein end",
        ]);

    for layout in layouts {
        table.add_row(vec![
            layout.track_index.to_string(),
            layout.name.clone(),
            layout.protein_length.to_string(),
            layout.centered_region_start.to_string(),
            layout.centered_region_end.to_string(),
            layout.centered_psite.to_string(),
            layout.centered_length_start.to_string(),
            layout.centered_length_end.to_string(),
        ]);
    }

    for index in [0, 2, 3, 4, 5, 6, 7] {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    format!("{}\n", table)
}

fn format_as_json(layouts: &[LayoutRecord]) -> Result<String> {
    Ok(format!("{}\n", serde_json::to_string_pretty(layouts)?))
}

/// CSV or TSV with one header row of field names
fn format_as_delimited(layouts: &[LayoutRecord], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    for layout in layouts {
        writer.serialize(layout)?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
