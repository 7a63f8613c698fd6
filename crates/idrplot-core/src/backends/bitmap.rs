//! PNG output through plotters
//!
//! plotters wants the whole chart described up front, so primitives are
//! buffered and drawn in one pass on `finish`.

use crate::backends::svg::CanvasOptions;
use crate::surface::{
    DrawingSurface, Frame, LegendGlyph, LineStyle, MarkerStyle, Point, Rgb, Stroke,
};
use idrplot_common::{IdrError, Result};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::PathBuf;
use tracing::debug;

pub struct BitmapSurface {
    path: PathBuf,
    options: CanvasOptions,
    frame: Option<Frame>,
    lines: Vec<(Point, Point, LineStyle)>,
    markers: Vec<(Point, MarkerStyle)>,
}

impl BitmapSurface {
    pub fn new(path: impl Into<PathBuf>, options: CanvasOptions) -> Self {
        Self {
            path: path.into(),
            options,
            frame: None,
            lines: Vec::new(),
            markers: Vec::new(),
        }
    }

    fn ensure_started(&self) -> Result<()> {
        if self.frame.is_none() {
            return Err(IdrError::render("PNG primitive emitted before begin"));
        }
        Ok(())
    }

    fn draw(&self, frame: &Frame) -> Result<()> {
        let root = BitMapBackend::new(&self.path, (self.options.width, self.options.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(plot_err)?;

        let (min, max) = frame.x_range;
        let (min, max) = (min as f64, max as f64);
        let rows = frame.slots.max(1) as f64;
        let y_of = |slot: usize| rows - frame.row_from_top(slot) as f64 - 0.5;

        let mut chart = ChartBuilder::on(&root)
            .caption(&frame.title, ("sans-serif", 18))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(100)
            .build_cartesian_2d(min..max, 0f64..rows)
            .map_err(plot_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .y_labels(0)
            .x_desc(frame.x_label.as_str())
            .draw()
            .map_err(plot_err)?;

        for (start, end, style) in &self.lines {
            let points = vec![(start.x as f64, y_of(start.slot)), (end.x as f64, y_of(end.slot))];
            let shape = rgb(style.color).stroke_width(style.width.ceil() as u32);

            match style.stroke {
                Stroke::Solid => {
                    chart
                        .draw_series(LineSeries::new(points, shape))
                        .map_err(plot_err)?;
                },
                Stroke::Dotted => {
                    chart
                        .draw_series(DashedLineSeries::new(points, 2, 3, shape))
                        .map_err(plot_err)?;
                },
            }
        }

        chart
            .draw_series(self.markers.iter().map(|(at, style)| {
                Circle::new(
                    (at.x as f64, y_of(at.slot)),
                    (style.size.ceil() as u32).max(1),
                    rgb(style.color).filled(),
                )
            }))
            .map_err(plot_err)?;

        let label_style = TextStyle::from(("sans-serif", self.options.label_font_size).into_font())
            .pos(Pos::new(HPos::Right, VPos::Center));
        for label in &frame.labels {
            let (px, py) = chart.backend_coord(&(min, y_of(label.slot)));
            root.draw(&Text::new(label.text.as_str(), (px - 4, py), label_style.clone()))
                .map_err(plot_err)?;
        }

        // Zero-radius carriers give each legend entry a series to hang on
        for entry in &frame.legend {
            let color = rgb(entry.color);
            let carrier = chart
                .draw_series(std::iter::once(Circle::new((min, 0.0), 0, color.filled())))
                .map_err(plot_err)?
                .label(entry.label.as_str());

            match entry.glyph {
                LegendGlyph::Line { .. } => {
                    carrier.legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3))
                    });
                },
                LegendGlyph::Marker => {
                    carrier.legend(move |(x, y)| Circle::new((x + 10, y), 3, color.filled()));
                },
            }
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(plot_err)?;

        root.present().map_err(plot_err)?;
        Ok(())
    }
}

impl DrawingSurface for BitmapSurface {
    fn begin(&mut self, frame: &Frame) -> Result<()> {
        if self.frame.is_some() {
            return Err(IdrError::render("PNG surface already started"));
        }
        self.frame = Some(frame.clone());
        Ok(())
    }

    fn line(&mut self, start: Point, end: Point, style: &LineStyle) -> Result<()> {
        self.ensure_started()?;
        self.lines.push((start, end, *style));
        Ok(())
    }

    fn point(&mut self, at: Point, style: &MarkerStyle) -> Result<()> {
        self.ensure_started()?;
        self.markers.push((at, *style));
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let frame = self
            .frame
            .take()
            .ok_or_else(|| IdrError::render("PNG surface finished before begin"))?;

        self.draw(&frame)?;
        debug!(path = %self.path.display(), lines = self.lines.len(), markers = self.markers.len(), "Wrote PNG");
        Ok(())
    }
}

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

fn plot_err<E: std::fmt::Display>(err: E) -> IdrError {
    IdrError::render(err.to_string())
}
