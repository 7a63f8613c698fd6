//! idrplot CLI - Main entry point

use clap::Parser;
use idrplot_cli::{commands, Cli, Commands, Config, ConfigCommand};
use idrplot_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::error;

fn main() {
    // Pick up IDRPLOT_* settings from a local .env
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_config = if cli.verbose {
        LogConfig::builder()
            .level(LogLevel::Debug)
            .output(LogOutput::Console)
            .log_file_prefix("idrplot-cli")
            .build()
    } else {
        LogConfig::builder()
            .level(LogLevel::Warn)
            .output(LogOutput::Console)
            .log_file_prefix("idrplot-cli")
            .build()
    };

    // Environment variables take precedence
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    // The CLI works without logging
    let _ = init_logging(&log_config);

    if let Err(e) = execute_command(&cli) {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn execute_command(cli: &Cli) -> idrplot_cli::Result<()> {
    match &cli.command {
        Commands::Render {
            dataset,
            input_format,
            output,
            title,
            backend,
            width,
            height,
        } => {
            let config =
                Config::load(cli.config.as_deref())?.with_overrides(title.clone(), *width, *height)?;
            commands::render::run(
                &config,
                dataset.as_deref(),
                *input_format,
                output.as_deref(),
                *backend,
            )
        },

        Commands::Layout {
            dataset,
            input_format,
            format,
            output,
        } => commands::layout::run(dataset.as_deref(), *input_format, *format, output.as_deref()),

        Commands::Check {
            dataset,
            input_format,
        } => commands::check::run(dataset.as_deref(), *input_format),

        Commands::Config { command } => match command {
            ConfigCommand::Show => commands::config::show(&Config::load(cli.config.as_deref())?),
            ConfigCommand::Path => commands::config::path(cli.config.as_deref()),
        },
    }
}
