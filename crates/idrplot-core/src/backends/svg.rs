//! Standalone SVG output
//!
//! Elements are streamed to the writer as primitives arrive; the legend is
//! written last so it sits above the tracks.

use crate::surface::{
    DrawingSurface, Frame, LegendGlyph, LineStyle, MarkerStyle, Point, Stroke,
};
use idrplot_common::{IdrError, Position, Result};
use quick_xml::escape::escape;
use serde::{Deserialize, Serialize};
use std::io::Write;

const MARGIN_LEFT: f64 = 110.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 50.0;

const LEGEND_WIDTH: f64 = 170.0;
const LEGEND_ROW: f64 = 16.0;

/// Canvas geometry shared by the file backends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasOptions {
    pub width: u32,
    pub height: u32,
    /// Font size of the per-track protein labels
    pub label_font_size: f64,
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 800,
            label_font_size: 5.0,
        }
    }
}

pub struct SvgSurface<W: Write> {
    writer: W,
    options: CanvasOptions,
    frame: Option<Frame>,
}

impl<W: Write> SvgSurface<W> {
    pub fn new(writer: W, options: CanvasOptions) -> Self {
        Self {
            writer,
            options,
            frame: None,
        }
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn plot_width(&self) -> f64 {
        (self.options.width as f64 - MARGIN_LEFT - MARGIN_RIGHT).max(1.0)
    }

    fn plot_height(&self) -> f64 {
        (self.options.height as f64 - MARGIN_TOP - MARGIN_BOTTOM).max(1.0)
    }

    fn frame(&self) -> Result<&Frame> {
        self.frame
            .as_ref()
            .ok_or_else(|| IdrError::render("SVG primitive emitted before begin"))
    }

    fn x_px(&self, frame: &Frame, x: Position) -> f64 {
        let (min, max) = frame.x_range;
        let span = (max - min).max(1) as f64;
        MARGIN_LEFT + (x - min) as f64 / span * self.plot_width()
    }

    fn y_px(&self, frame: &Frame, slot: usize) -> f64 {
        let row_height = self.plot_height() / frame.slots.max(1) as f64;
        MARGIN_TOP + (frame.row_from_top(slot) as f64 + 0.5) * row_height
    }

    fn write_axes(&mut self, frame: &Frame) -> Result<()> {
        let (plot_width, plot_height) = (self.plot_width(), self.plot_height());
        let bottom = MARGIN_TOP + plot_height;
        let right = MARGIN_LEFT + plot_width;

        writeln!(
            self.writer,
            r#"<rect x="{MARGIN_LEFT:.1}" y="{MARGIN_TOP:.1}" width="{plot_width:.1}" height="{plot_height:.1}" fill="none" stroke="black" stroke-width="0.8"/>"#
        )?;

        for tick in frame.x_ticks() {
            let x = self.x_px(frame, tick);
            writeln!(
                self.writer,
                r#"<line x1="{x:.1}" y1="{bottom:.1}" x2="{x:.1}" y2="{:.1}" stroke="black" stroke-width="0.8"/>"#,
                bottom + 4.0
            )?;
            writeln!(
                self.writer,
                r#"<text x="{x:.1}" y="{:.1}" font-size="10" text-anchor="middle">{tick}</text>"#,
                bottom + 16.0
            )?;
        }

        writeln!(
            self.writer,
            r#"<text x="{:.1}" y="{:.1}" font-size="12" text-anchor="middle">{}</text>"#,
            (MARGIN_LEFT + right) / 2.0,
            bottom + 36.0,
            escape(&frame.x_label)
        )?;

        let font_size = self.options.label_font_size;
        for label in &frame.labels {
            let y = self.y_px(frame, label.slot);
            writeln!(
                self.writer,
                r#"<text x="{:.1}" y="{y:.1}" font-size="{font_size}" text-anchor="end" dominant-baseline="middle">{}</text>"#,
                MARGIN_LEFT - 4.0,
                escape(&label.text)
            )?;
        }

        Ok(())
    }

    fn write_legend(&mut self, frame: &Frame) -> Result<()> {
        let height = LEGEND_ROW * frame.legend.len() as f64 + 8.0;
        let left = MARGIN_LEFT + self.plot_width() - LEGEND_WIDTH - 8.0;
        let top = MARGIN_TOP + self.plot_height() - height - 8.0;

        writeln!(self.writer, r#"<g class="legend">"#)?;
        writeln!(
            self.writer,
            r##"<rect x="{left:.1}" y="{top:.1}" width="{LEGEND_WIDTH:.1}" height="{height:.1}" fill="white" fill-opacity="0.8" stroke="#cccccc"/>"##
        )?;

        for (i, entry) in frame.legend.iter().enumerate() {
            let y = top + 4.0 + LEGEND_ROW * (i as f64 + 0.5);
            let color = entry.color.to_hex();

            match entry.glyph {
                LegendGlyph::Line { stroke } => writeln!(
                    self.writer,
                    r#"<line x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="{color}" stroke-width="3"{}/>"#,
                    left + 8.0,
                    left + 32.0,
                    dash(stroke, 3.0)
                )?,
                LegendGlyph::Marker => writeln!(
                    self.writer,
                    r#"<circle cx="{:.1}" cy="{y:.1}" r="3" fill="{color}"/>"#,
                    left + 20.0
                )?,
            }

            writeln!(
                self.writer,
                r#"<text x="{:.1}" y="{y:.1}" font-size="10" dominant-baseline="middle">{}</text>"#,
                left + 40.0,
                escape(&entry.label)
            )?;
        }

        writeln!(self.writer, "</g>")?;
        Ok(())
    }
}

impl<W: Write> DrawingSurface for SvgSurface<W> {
    fn begin(&mut self, frame: &Frame) -> Result<()> {
        if self.frame.is_some() {
            return Err(IdrError::render("SVG surface already started"));
        }

        let (width, height) = (self.options.width, self.options.height);
        writeln!(
            self.writer,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="sans-serif">"#
        )?;
        writeln!(
            self.writer,
            r#"<rect width="100%" height="100%" fill="white"/>"#
        )?;
        writeln!(
            self.writer,
            r#"<text x="{:.1}" y="{:.1}" font-size="14" text-anchor="middle">{}</text>"#,
            width as f64 / 2.0,
            MARGIN_TOP / 2.0 + 5.0,
            escape(&frame.title)
        )?;

        self.write_axes(frame)?;
        self.frame = Some(frame.clone());
        Ok(())
    }

    fn line(&mut self, start: Point, end: Point, style: &LineStyle) -> Result<()> {
        let frame = self.frame()?;
        let (x1, y1) = (self.x_px(frame, start.x), self.y_px(frame, start.slot));
        let (x2, y2) = (self.x_px(frame, end.x), self.y_px(frame, end.slot));

        writeln!(
            self.writer,
            r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}" stroke="{}" stroke-width="{}"{}/>"#,
            style.color.to_hex(),
            style.width,
            dash(style.stroke, style.width)
        )?;
        Ok(())
    }

    fn point(&mut self, at: Point, style: &MarkerStyle) -> Result<()> {
        let frame = self.frame()?;
        let (cx, cy) = (self.x_px(frame, at.x), self.y_px(frame, at.slot));

        writeln!(
            self.writer,
            r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{}" fill="{}"/>"#,
            style.size,
            style.color.to_hex()
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let frame = self
            .frame
            .take()
            .ok_or_else(|| IdrError::render("SVG surface finished before begin"))?;

        self.write_legend(&frame)?;
        writeln!(self.writer, "</svg>")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// `stroke-dasharray` attribute for dotted strokes
fn dash(stroke: Stroke, width: f64) -> String {
    match stroke {
        Stroke::Solid => String::new(),
        Stroke::Dotted => format!(
            r#" stroke-dasharray="{:.1},{:.1}" stroke-linecap="round""#,
            width,
            width * 2.0
        ),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::layout::normalize_and_rank;
    use crate::renderer::TrackRenderer;
    use idrplot_common::ProteinRecord;

    fn render_svg(records: &[ProteinRecord], title: &str) -> String {
        let layouts = normalize_and_rank(records);
        let mut surface = SvgSurface::new(Vec::new(), CanvasOptions::default());
        TrackRenderer::default()
            .render(title, &layouts, &mut surface)
            .unwrap();
        String::from_utf8(surface.into_inner()).unwrap()
    }

    /// y attribute of the label text element for `name`
    fn label_y(svg: &str, name: &str) -> f64 {
        let line = svg
            .lines()
            .find(|l| l.contains("text-anchor=\"end\"") && l.ends_with(&format!(">{}</text>", name)))
            .unwrap();
        let start = line.find("y=\"").unwrap() + 3;
        let end = start + line[start..].find('"').unwrap();
        line[start..end].parse().unwrap()
    }

    #[test]
    fn test_document_structure() {
        let svg = render_svg(
            &[ProteinRecord::new(265, 330, "CHK1", 296, 476)],
            "14-3-3 clients",
        );

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(">14-3-3 clients</text>"));
        assert!(svg.contains(">Position</text>"));
        assert!(svg.contains(">CHK1</text>"));
        assert_eq!(svg.matches("<circle").count(), 3 + 3);
        assert!(svg.contains("stroke-dasharray"));
    }

    #[test]
    fn test_legend_lists_all_categories() {
        let svg = render_svg(&[], "empty");

        for label in ["IDR Region", "Total Protein Length", "p-site", "IDR Start", "IDR End"] {
            assert!(svg.contains(&format!(">{}</text>", label)), "missing {}", label);
        }
    }

    #[test]
    fn test_shortest_label_drawn_highest() {
        let svg = render_svg(
            &[
                ProteinRecord::new(10, 20, "LONG", 15, 100),
                ProteinRecord::new(10, 20, "SHORT", 15, 50),
            ],
            "order",
        );

        assert!(label_y(&svg, "SHORT") < label_y(&svg, "LONG"));
    }

    #[test]
    fn test_names_are_escaped() {
        let svg = render_svg(
            &[
                ProteinRecord::new(1, 10, "A<B&C", 5, 20),
                ProteinRecord::new(1, 10, "KIN'1>", 5, 30),
            ],
            "x \"y\"",
        );

        assert!(svg.contains(">A&lt;B&amp;C</text>"));
        assert!(svg.contains(">KIN&apos;1&gt;</text>"));
        assert!(svg.contains(">x &quot;y&quot;</text>"));
        assert!(!svg.contains("A<B"));
    }

    #[test]
    fn test_primitive_before_begin_fails() {
        let mut surface = SvgSurface::new(Vec::new(), CanvasOptions::default());
        let style = TrackRenderer::default().style().psite;
        assert!(surface.point(Point::new(0, 1), &style).is_err());
    }
}
