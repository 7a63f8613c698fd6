//! Configuration management for idrplot CLI
//!
//! Settings are layered: built-in defaults, then a TOML file, then
//! `IDRPLOT_*` environment variables, then command-line flags.

use crate::error::{CliError, Result};
use idrplot_core::backends::CanvasOptions;
use idrplot_core::dataset::BUILTIN_TITLE;
use idrplot_core::TrackStyle;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

// ============================================================================
// CLI Configuration Constants
// ============================================================================

/// Output file used when `render` is not given one
pub const DEFAULT_OUTPUT: &str = "idr_psites.svg";

/// Config file name inside `<config_dir>/idrplot/`
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Figure settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Figure title
    pub title: String,

    /// Canvas width in pixels
    pub width: u32,

    /// Canvas height in pixels
    pub height: u32,

    /// Font size of the protein name labels
    pub label_font_size: f64,

    /// Radius of the p-site and region end markers
    pub marker_size: f64,

    /// Stroke width of region and full-length lines
    pub line_width: f64,
}

impl Default for Config {
    fn default() -> Self {
        let canvas = CanvasOptions::default();
        Self {
            title: BUILTIN_TITLE.to_string(),
            width: canvas.width,
            height: canvas.height,
            label_font_size: canvas.label_font_size,
            marker_size: 1.5,
            line_width: 1.5,
        }
    }
}

impl Config {
    /// Resolve defaults, file and environment.
    ///
    /// An explicit `path` must exist; the per-user file is read only when
    /// present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        let config = config.merge_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Per-user config file location, if the platform has one
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("idrplot").join(CONFIG_FILE_NAME))
    }

    /// Read a TOML config file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }

        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Apply environment overrides
    ///
    /// Environment variables:
    /// - `IDRPLOT_TITLE`: Figure title
    /// - `IDRPLOT_WIDTH`: Canvas width in pixels
    /// - `IDRPLOT_HEIGHT`: Canvas height in pixels
    pub fn merge_env(self) -> Result<Self> {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    fn merge_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(title) = var("IDRPLOT_TITLE") {
            self.title = title;
        }

        if let Some(width) = var("IDRPLOT_WIDTH") {
            self.width = parse_pixels("IDRPLOT_WIDTH", &width)?;
        }

        if let Some(height) = var("IDRPLOT_HEIGHT") {
            self.height = parse_pixels("IDRPLOT_HEIGHT", &height)?;
        }

        Ok(self)
    }

    /// Apply command-line flags, the last layer
    pub fn with_overrides(
        mut self,
        title: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<Self> {
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(width) = width {
            self.width = width;
        }
        if let Some(height) = height {
            self.height = height;
        }

        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CliError::config(format!(
                "canvas must be at least 1x1 pixels, got {}x{}",
                self.width, self.height
            )));
        }

        for (key, value) in [
            ("label_font_size", self.label_font_size),
            ("marker_size", self.marker_size),
            ("line_width", self.line_width),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CliError::config(format!("{} must be positive, got {}", key, value)));
            }
        }

        Ok(())
    }

    /// Canvas geometry for the file backends
    pub fn canvas(&self) -> CanvasOptions {
        CanvasOptions {
            width: self.width,
            height: self.height,
            label_font_size: self.label_font_size,
        }
    }

    /// Track palette sized by this configuration
    pub fn track_style(&self) -> TrackStyle {
        TrackStyle::with_sizes(self.line_width, self.marker_size)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}

fn parse_pixels(key: &str, value: &str) -> Result<u32> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::config(format!("{} must be a whole number of pixels, got '{}'", key, value)))
}
