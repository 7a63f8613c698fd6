//! `idrplot render` command implementation
//!
//! Draws a dataset with the chosen backend and writes it to a file.

use crate::config::{Config, DEFAULT_OUTPUT};
use crate::error::{CliError, Result};
use anyhow::Context;
use clap::ValueEnum;
use colored::Colorize;
use idrplot_core::backends::{RecordingSurface, SvgSurface};
use idrplot_core::pipeline::{render_dataset, RenderSummary};
use idrplot_core::{DatasetFormat, TrackRenderer};
use idrplot_common::ProteinRecord;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

/// Output backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Standalone SVG document
    Svg,
    /// Raster image (requires the `png` feature)
    Png,
    /// JSON log of the emitted drawing primitives
    Json,
}

impl Backend {
    /// Pick the backend matching an output file extension
    pub fn from_output(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "svg" => Ok(Backend::Svg),
            "png" => Ok(Backend::Png),
            "json" => Ok(Backend::Json),
            _ => Err(CliError::unsupported_output(format!(
                "cannot infer a backend from '{}'",
                path.display()
            ))),
        }
    }
}

/// Render `dataset` (or the bundled one) to `output`
pub fn run(
    config: &Config,
    dataset: Option<&Path>,
    input_format: Option<DatasetFormat>,
    output: Option<&Path>,
    backend: Option<Backend>,
) -> Result<()> {
    let dataset = super::load_dataset(dataset, input_format)?;
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    let backend = match backend {
        Some(backend) => backend,
        None => Backend::from_output(&output)?,
    };

    let renderer = TrackRenderer::new(config.track_style());
    let records = dataset.records();

    let summary = match backend {
        Backend::Svg => {
            let file = File::create(&output)
                .with_context(|| format!("Failed to create '{}'", output.display()))?;
            let mut surface = SvgSurface::new(BufWriter::new(file), config.canvas());
            render_dataset(records, &config.title, &renderer, &mut surface)?
        },
        Backend::Png => render_png(records, config, &renderer, &output)?,
        Backend::Json => {
            let mut surface = RecordingSurface::new();
            let summary = render_dataset(records, &config.title, &renderer, &mut surface)?;
            std::fs::write(&output, surface.to_json()?)
                .with_context(|| format!("Failed to write '{}'", output.display()))?;
            summary
        },
    };

    info!(output = %output.display(), ?backend, tracks = summary.tracks, "Wrote figure");
    report(&summary, &output);
    Ok(())
}

#[cfg(feature = "png")]
fn render_png(
    records: &[ProteinRecord],
    config: &Config,
    renderer: &TrackRenderer,
    output: &Path,
) -> Result<RenderSummary> {
    use idrplot_core::backends::BitmapSurface;

    let mut surface = BitmapSurface::new(output, config.canvas());
    Ok(render_dataset(records, &config.title, renderer, &mut surface)?)
}

#[cfg(not(feature = "png"))]
fn render_png(
    _records: &[ProteinRecord],
    _config: &Config,
    _renderer: &TrackRenderer,
    output: &Path,
) -> Result<RenderSummary> {
    Err(CliError::unsupported_output(format!(
        "'{}' needs PNG support; rebuild with `--features png` or write .svg instead",
        output.display()
    )))
}

fn report(summary: &RenderSummary, output: &Path) {
    println!(
        "{} Rendered {} tracks to {}",
        "✓".green(),
        summary.tracks,
        output.display().to_string().cyan()
    );

    if summary.tracks == 0 {
        println!("{} Dataset is empty; only the title and legend were drawn", "⚠".yellow());
    }

    if summary.duplicate_names > 0 {
        println!(
            "{} {} names label more than one track; run 'idrplot check' for details",
            "⚠".yellow(),
            summary.duplicate_names
        );
    }

    if summary.advisories > 0 {
        println!(
            "{} {} inconsistent geometry notes; run 'idrplot check' for details",
            "⚠".yellow(),
            summary.advisories
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_backend_from_extension() {
        assert_eq!(Backend::from_output(Path::new("a.svg")).unwrap(), Backend::Svg);
        assert_eq!(Backend::from_output(Path::new("a.PNG")).unwrap(), Backend::Png);
        assert_eq!(Backend::from_output(Path::new("out/a.json")).unwrap(), Backend::Json);
    }

    #[test]
    fn test_backend_unknown_extension() {
        let err = Backend::from_output(Path::new("figure.pdf")).unwrap_err();
        assert!(matches!(err, CliError::UnsupportedOutput(_)));
        assert!(Backend::from_output(Path::new("figure")).is_err());
    }

    #[test]
    fn test_render_bundled_dataset_to_svg() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("clients.svg");

        run(&Config::default(), None, None, Some(&output), None).unwrap();

        let svg = std::fs::read_to_string(&output).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(">CHK1</text>"));
        assert!(svg.contains("14-3-3 Client Proteins"));
    }

    #[test]
    fn test_explicit_backend_beats_extension() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("primitives.out");

        run(&Config::default(), None, None, Some(&output), Some(Backend::Json)).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(json[0]["primitive"], "begin");
    }
}
