//! Track rendering
//!
//! One horizontal track per layout record: the IDR as a solid line, the full
//! protein as a dotted line, and markers at the p-site and both region ends.
//!
//! Vertical placement: the record at rank `i` of `n` goes to slot `n - i`,
//! and the frame asks for the highest slot on top. Rank 0 (the shortest
//! protein) therefore lands on the top row and the longest on the bottom.

use crate::surface::{
    DrawingSurface, Frame, LegendEntry, LegendGlyph, LineStyle, MarkerStyle, Point, Rgb,
    SlotLabel, Stroke, TrackCategory, VerticalOrder, LEGEND,
};
use idrplot_common::{LayoutRecord, Position, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Fraction of the x span added on each side of the data
const X_PADDING: f64 = 0.05;

/// Visual style of every track
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackStyle {
    pub region: LineStyle,
    pub full_length: LineStyle,
    pub psite: MarkerStyle,
    pub region_start: MarkerStyle,
    pub region_end: MarkerStyle,
}

impl Default for TrackStyle {
    fn default() -> Self {
        Self::with_sizes(1.5, 1.5)
    }
}

impl TrackStyle {
    /// Default palette with the given line width and marker size
    pub fn with_sizes(line_width: f64, marker_size: f64) -> Self {
        let marker = |category, color| MarkerStyle {
            category,
            color,
            size: marker_size,
        };

        Self {
            region: LineStyle {
                category: TrackCategory::Region,
                stroke: Stroke::Solid,
                color: Rgb::BLACK,
                width: line_width,
            },
            full_length: LineStyle {
                category: TrackCategory::FullLength,
                stroke: Stroke::Dotted,
                color: Rgb::GRAY,
                width: line_width,
            },
            psite: marker(TrackCategory::Psite, Rgb::RED),
            region_start: marker(TrackCategory::RegionStart, Rgb::GREEN),
            region_end: marker(TrackCategory::RegionEnd, Rgb::BLUE),
        }
    }

    /// Legend entries for the fixed manifest, colored like the tracks
    pub fn legend(&self) -> Vec<LegendEntry> {
        LEGEND
            .iter()
            .map(|&category| {
                let (glyph, color) = match category {
                    TrackCategory::Region => (
                        LegendGlyph::Line {
                            stroke: self.region.stroke,
                        },
                        self.region.color,
                    ),
                    TrackCategory::FullLength => (
                        LegendGlyph::Line {
                            stroke: self.full_length.stroke,
                        },
                        self.full_length.color,
                    ),
                    TrackCategory::Psite => (LegendGlyph::Marker, self.psite.color),
                    TrackCategory::RegionStart => (LegendGlyph::Marker, self.region_start.color),
                    TrackCategory::RegionEnd => (LegendGlyph::Marker, self.region_end.color),
                };

                LegendEntry {
                    category,
                    label: category.label().to_string(),
                    glyph,
                    color,
                }
            })
            .collect()
    }
}

/// Vertical slot of the record at `rank` among `total` records
pub fn slot_for(rank: usize, total: usize) -> usize {
    total - rank
}

/// Emits drawing primitives for ranked layout records
#[derive(Debug, Clone, Default)]
pub struct TrackRenderer {
    style: TrackStyle,
}

impl TrackRenderer {
    pub fn new(style: TrackStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &TrackStyle {
        &self.style
    }

    /// Describe the figure for `layouts` (expected in rank order)
    pub fn frame(&self, title: &str, layouts: &[LayoutRecord]) -> Frame {
        let total = layouts.len();

        Frame {
            title: title.to_string(),
            x_label: "Position".to_string(),
            x_range: x_range(layouts),
            slots: total,
            labels: layouts
                .iter()
                .enumerate()
                .map(|(rank, layout)| SlotLabel {
                    slot: slot_for(rank, total),
                    text: layout.name.clone(),
                })
                .collect(),
            vertical_order: VerticalOrder::HighestSlotOnTop,
            legend: self.style.legend(),
        }
    }

    /// Draw every track onto `surface`.
    ///
    /// Title and legend are emitted through the frame even when `layouts` is
    /// empty.
    #[instrument(skip_all, fields(tracks = layouts.len()))]
    pub fn render<S>(&self, title: &str, layouts: &[LayoutRecord], surface: &mut S) -> Result<()>
    where
        S: DrawingSurface + ?Sized,
    {
        let frame = self.frame(title, layouts);
        surface.begin(&frame)?;

        let total = layouts.len();
        for (rank, layout) in layouts.iter().enumerate() {
            self.draw_track(layout, slot_for(rank, total), surface)?;
        }

        surface.finish()?;
        debug!("Rendered tracks");
        Ok(())
    }

    fn draw_track<S>(&self, layout: &LayoutRecord, slot: usize, surface: &mut S) -> Result<()>
    where
        S: DrawingSurface + ?Sized,
    {
        let style = &self.style;
        let at = |x| Point::new(x, slot);

        surface.line(
            at(layout.centered_region_start),
            at(layout.centered_region_end),
            &style.region,
        )?;
        surface.point(at(layout.centered_psite), &style.psite)?;
        surface.point(at(layout.centered_region_start), &style.region_start)?;
        surface.point(at(layout.centered_region_end), &style.region_end)?;
        surface.line(
            at(layout.centered_length_start),
            at(layout.centered_length_end),
            &style.full_length,
        )?;

        Ok(())
    }
}

/// Padded x extent covering every endpoint of every track
fn x_range(layouts: &[LayoutRecord]) -> (Position, Position) {
    let endpoints = layouts.iter().flat_map(|l| {
        [
            l.centered_region_start,
            l.centered_region_end,
            l.centered_psite,
            l.centered_length_start,
            l.centered_length_end,
        ]
    });

    let (min, max) = endpoints.fold((Position::MAX, Position::MIN), |(lo, hi), x| {
        (lo.min(x), hi.max(x))
    });

    if min > max {
        return (-1, 1);
    }

    let pad = (((max - min) as f64) * X_PADDING).ceil().max(1.0) as Position;
    (min - pad, max + pad)
}
