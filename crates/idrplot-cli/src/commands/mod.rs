//! CLI command implementations
//!
//! Each subcommand has its own module with a `run` function.

pub mod check;
pub mod config;
pub mod layout;
pub mod render;

use crate::error::{CliError, Result};
use idrplot_core::{Dataset, DatasetFormat};
use std::path::Path;
use tracing::debug;

/// Load `path`, or the bundled dataset when no path is given
pub(crate) fn load_dataset(path: Option<&Path>, format: Option<DatasetFormat>) -> Result<Dataset> {
    let Some(path) = path else {
        debug!("Using bundled dataset");
        return Ok(Dataset::builtin()?);
    };

    if !path.is_file() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }

    let dataset = match format {
        Some(format) => Dataset::from_path_with_format(path, format)?,
        None => Dataset::from_path(path)?,
    };
    Ok(dataset)
}
