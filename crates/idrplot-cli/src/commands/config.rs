//! `idrplot config` command implementation

use crate::config::Config;
use crate::error::Result;
use colored::Colorize;
use std::path::Path;

/// Print the effective configuration as TOML
pub fn show(config: &Config) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Print which config file is (or would be) read
pub fn path(explicit: Option<&Path>) -> Result<()> {
    let Some(path) = explicit.map(Path::to_path_buf).or_else(Config::default_path) else {
        println!("{} No config directory on this platform", "ℹ".cyan());
        return Ok(());
    };

    let status = if path.is_file() {
        "exists".green()
    } else {
        "not found, using defaults".yellow()
    };
    println!("{} ({})", path.display(), status);
    Ok(())
}
