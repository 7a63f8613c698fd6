//! Drawing primitives and the surface trait backends implement
//!
//! The renderer never talks to a plotting library directly. It describes the
//! figure once with a [`Frame`], then emits lines and point markers in
//! centered coordinates; each backend maps those onto pixels, SVG elements or
//! an in-memory log.

use idrplot_common::{Position, Result};
use serde::{Deserialize, Serialize};

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const GRAY: Rgb = Rgb(128, 128, 128);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 128, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);

    /// CSS hex notation, e.g. `#808080`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// What a primitive depicts; also the key of the legend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackCategory {
    Region,
    FullLength,
    Psite,
    RegionStart,
    RegionEnd,
}

impl TrackCategory {
    /// Legend label
    pub fn label(self) -> &'static str {
        match self {
            TrackCategory::Region => "IDR Region",
            TrackCategory::FullLength => "Total Protein Length",
            TrackCategory::Psite => "p-site",
            TrackCategory::RegionStart => "IDR Start",
            TrackCategory::RegionEnd => "IDR End",
        }
    }
}

/// The fixed legend manifest, in display order
pub const LEGEND: [TrackCategory; 5] = [
    TrackCategory::Region,
    TrackCategory::FullLength,
    TrackCategory::Psite,
    TrackCategory::RegionStart,
    TrackCategory::RegionEnd,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stroke {
    Solid,
    Dotted,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub category: TrackCategory,
    pub stroke: Stroke,
    pub color: Rgb,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub category: TrackCategory,
    pub color: Rgb,
    pub size: f64,
}

/// A position in centered coordinates on a given track slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: Position,
    pub slot: usize,
}

impl Point {
    pub fn new(x: Position, slot: usize) -> Self {
        Self { x, slot }
    }
}

/// How a legend entry is drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "glyph", rename_all = "snake_case")]
pub enum LegendGlyph {
    Line { stroke: Stroke },
    Marker,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub category: TrackCategory,
    pub label: String,
    pub glyph: LegendGlyph,
    pub color: Rgb,
}

/// Where slots go on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalOrder {
    /// Slot numbers grow upward: the largest slot is the top row
    HighestSlotOnTop,
    /// Slot numbers grow downward: slot 1 is the top row
    LowestSlotOnTop,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotLabel {
    pub slot: usize,
    pub text: String,
}

/// Figure-level description handed to a surface before any primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub title: String,
    pub x_label: String,
    /// Inclusive x extent in centered coordinates
    pub x_range: (Position, Position),
    /// Number of track slots; slots are numbered `1..=slots`
    pub slots: usize,
    pub labels: Vec<SlotLabel>,
    pub vertical_order: VerticalOrder,
    pub legend: Vec<LegendEntry>,
}

impl Frame {
    /// 0-based screen row of `slot`, counted from the top edge
    pub fn row_from_top(&self, slot: usize) -> usize {
        match self.vertical_order {
            VerticalOrder::HighestSlotOnTop => self.slots.saturating_sub(slot),
            VerticalOrder::LowestSlotOnTop => slot.saturating_sub(1),
        }
    }

    /// Evenly spaced tick positions on 1, 2 or 5 times a power of ten
    pub fn x_ticks(&self) -> Vec<Position> {
        let (min, max) = self.x_range;
        let span = (max - min) as f64;
        if span <= 0.0 {
            return vec![min];
        }

        let raw = span / 8.0;
        let magnitude = 10f64.powf(raw.log10().floor());
        let step = match raw / magnitude {
            r if r <= 1.0 => magnitude,
            r if r <= 2.0 => 2.0 * magnitude,
            r if r <= 5.0 => 5.0 * magnitude,
            _ => 10.0 * magnitude,
        };
        let step = (step.round() as Position).max(1);

        let first = (min as f64 / step as f64).ceil() as Position * step;
        (0..)
            .map(|i| first + i * step)
            .take_while(|tick| *tick <= max)
            .collect()
    }
}

/// A rendering backend.
///
/// Calls arrive as `begin`, any number of `line`/`point`, then `finish`.
/// Errors are the backend's own drawing faults and abort the render.
pub trait DrawingSurface {
    fn begin(&mut self, frame: &Frame) -> Result<()>;

    fn line(&mut self, start: Point, end: Point, style: &LineStyle) -> Result<()>;

    fn point(&mut self, at: Point, style: &MarkerStyle) -> Result<()>;

    fn finish(&mut self) -> Result<()>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn frame(x_range: (Position, Position), slots: usize, order: VerticalOrder) -> Frame {
        Frame {
            title: "t".to_string(),
            x_label: "Position".to_string(),
            x_range,
            slots,
            labels: Vec::new(),
            vertical_order: order,
            legend: Vec::new(),
        }
    }

    #[test]
    fn test_row_from_top_highest_slot_on_top() {
        let f = frame((0, 10), 3, VerticalOrder::HighestSlotOnTop);
        assert_eq!(f.row_from_top(3), 0);
        assert_eq!(f.row_from_top(1), 2);
    }

    #[test]
    fn test_row_from_top_lowest_slot_on_top() {
        let f = frame((0, 10), 3, VerticalOrder::LowestSlotOnTop);
        assert_eq!(f.row_from_top(1), 0);
        assert_eq!(f.row_from_top(3), 2);
    }

    #[test]
    fn test_x_ticks_nice_steps() {
        let f = frame((-300, 1200), 1, VerticalOrder::HighestSlotOnTop);
        assert_eq!(
            f.x_ticks(),
            vec![-200, 0, 200, 400, 600, 800, 1000, 1200]
        );
    }

    #[test]
    fn test_x_ticks_include_zero_for_small_span() {
        let f = frame((-1, 1), 0, VerticalOrder::HighestSlotOnTop);
        assert!(f.x_ticks().contains(&0));
    }

    #[test]
    fn test_rgb_hex() {
        assert_eq!(Rgb::GRAY.to_hex(), "#808080");
        assert_eq!(Rgb::RED.to_hex(), "#ff0000");
    }

    #[test]
    fn test_legend_manifest_has_five_categories() {
        let labels: Vec<&str> = LEGEND.iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            vec!["IDR Region", "Total Protein Length", "p-site", "IDR Start", "IDR End"]
        );
    }
}
