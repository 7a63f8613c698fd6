//! idrplot CLI Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Command-line front end for p-site centered IDR diagrams.
//!
//! # Overview
//!
//! - **Rendering**: draw a dataset to SVG, PNG or a JSON primitive log (`idrplot render`)
//! - **Layout**: print the centered, ranked tracks (`idrplot layout`)
//! - **Checking**: report inconsistent geometry and duplicate names (`idrplot check`)
//! - **Configuration**: show the effective settings (`idrplot config show`)

pub mod commands;
pub mod config;
pub mod error;

pub use config::Config;
pub use error::{CliError, Result};

use clap::{Parser, Subcommand};
use commands::layout::OutputFormat;
use commands::render::Backend;
use idrplot_core::DatasetFormat;
use std::path::PathBuf;

/// idrplot - p-site centered IDR diagrams
#[derive(Parser, Debug)]
#[command(name = "idrplot")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (TOML)
    #[arg(long, env = "IDRPLOT_CONFIG", global = true)]
    pub config: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Draw one track per protein, aligned on the p-site
    Render {
        /// Dataset file (defaults to the bundled 14-3-3 client proteins)
        dataset: Option<PathBuf>,

        /// Dataset format when the extension is missing or misleading
        #[arg(long)]
        input_format: Option<DatasetFormat>,

        /// Output file (defaults to idr_psites.svg)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Figure title
        #[arg(long)]
        title: Option<String>,

        /// Output backend (inferred from the output extension if omitted)
        #[arg(short, long, value_enum)]
        backend: Option<Backend>,

        /// Canvas width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Canvas height in pixels
        #[arg(long)]
        height: Option<u32>,
    },

    /// Print the centered and ranked tracks
    Layout {
        /// Dataset file (defaults to the bundled 14-3-3 client proteins)
        dataset: Option<PathBuf>,

        /// Dataset format when the extension is missing or misleading
        #[arg(long)]
        input_format: Option<DatasetFormat>,

        /// Output format (table on a terminal, tsv otherwise)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report inconsistent geometry and duplicate names
    Check {
        /// Dataset file (defaults to the bundled 14-3-3 client proteins)
        dataset: Option<PathBuf>,

        /// Dataset format when the extension is missing or misleading
        #[arg(long)]
        input_format: Option<DatasetFormat>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration as TOML
    Show,

    /// Print the configuration file location
    Path,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_render_flags_parse() {
        let cli = Cli::try_parse_from([
            "idrplot", "render", "clients.csv", "-o", "out.png", "--title", "T", "--width", "640",
        ])
        .unwrap();

        match cli.command {
            Commands::Render {
                dataset,
                output,
                title,
                width,
                backend,
                ..
            } => {
                assert_eq!(dataset, Some(PathBuf::from("clients.csv")));
                assert_eq!(output, Some(PathBuf::from("out.png")));
                assert_eq!(title.as_deref(), Some("T"));
                assert_eq!(width, Some(640));
                assert_eq!(backend, None);
            },
            other => panic!("expected render, got {:?}", other),
        }
    }

    #[test]
    fn test_input_format_parses() {
        let cli =
            Cli::try_parse_from(["idrplot", "check", "data.txt", "--input-format", "tsv"]).unwrap();

        match cli.command {
            Commands::Check { input_format, .. } => {
                assert_eq!(input_format, Some(DatasetFormat::Tsv));
            },
            other => panic!("expected check, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_backend_rejected() {
        assert!(Cli::try_parse_from(["idrplot", "render", "--backend", "pdf"]).is_err());
    }
}
