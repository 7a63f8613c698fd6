//! Build automation tasks for idrplot
//!
//! - Generating the CLI reference from the clap definitions

use anyhow::Context;
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation tasks for idrplot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate the CLI reference in Markdown
    GenerateCliDocs {
        /// Output directory for generated documentation
        #[arg(short, long, default_value = "docs")]
        output_dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::GenerateCliDocs { output_dir } => generate_cli_docs(&output_dir)?,
    }

    Ok(())
}

fn generate_cli_docs(output_dir: &Path) -> anyhow::Result<()> {
    println!("Generating CLI documentation...");

    let markdown = clap_markdown::help_markdown::<idrplot_cli::Cli>();

    let content = format!(
        r#"# idrplot CLI Reference

This documentation is auto-generated from the CLI source code. Last updated: {}.

## Overview

idrplot aligns the intrinsically disordered regions (IDRs) of many proteins on
their phosphorylation sites and draws one horizontal track per protein, shortest
protein on top.

## Quick Start

```bash
# Draw the bundled 14-3-3 client proteins to idr_psites.svg
idrplot render

# Your own data, as PNG (build with --features png)
idrplot render clients.csv -o clients.png --title "My clients"

# Inspect the centered, ranked tracks
idrplot layout clients.csv --format table

# Report p-sites outside their region and other inconsistent geometry
idrplot check clients.csv
```

## Dataset Formats

Columns `region_start`, `region_end`, `name`, `psite`, `protein_length` as CSV or
TSV with a header row, or as JSON, YAML or TOML (a list of objects or of
5-element tuples).

## Commands

{}

## Environment Variables

- `IDRPLOT_CONFIG` - Configuration file (TOML)
- `IDRPLOT_TITLE`, `IDRPLOT_WIDTH`, `IDRPLOT_HEIGHT` - Figure settings
- `IDRPLOT_LOG_LEVEL` - Logging level (`trace`, `debug`, `info`, `warn`, `error`)
- `IDRPLOT_LOG_OUTPUT`, `IDRPLOT_LOG_FORMAT`, `IDRPLOT_LOG_DIR`, `IDRPLOT_LOG_FILTER` - Log routing

---

*To update, run `cargo xtask generate-cli-docs`.*
"#,
        chrono::Utc::now().format("%Y-%m-%d"),
        markdown
    );

    fs::create_dir_all(output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;

    let file_path = output_dir.join("cli-reference.md");
    fs::write(&file_path, content)?;

    println!("✅ Generated CLI documentation at: {}", file_path.display());
    Ok(())
}
