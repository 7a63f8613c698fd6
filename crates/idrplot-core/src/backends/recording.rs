//! In-memory surface
//!
//! Keeps the primitive stream exactly as the renderer emitted it. The CLI
//! exposes it as the `json` backend; tests use it to inspect what was drawn.

use crate::surface::{DrawingSurface, Frame, LineStyle, MarkerStyle, Point};
use idrplot_common::{IdrError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "primitive", rename_all = "snake_case")]
pub enum Primitive {
    Begin {
        frame: Frame,
    },
    Line {
        start: Point,
        end: Point,
        style: LineStyle,
    },
    Marker {
        at: Point,
        style: MarkerStyle,
    },
    Finish,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    primitives: Vec<Primitive>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// The frame passed to `begin`, if any
    pub fn frame(&self) -> Option<&Frame> {
        self.primitives.iter().find_map(|p| match p {
            Primitive::Begin { frame } => Some(frame),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = (&Point, &Point, &LineStyle)> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Line { start, end, style } => Some((start, end, style)),
            _ => None,
        })
    }

    pub fn points(&self) -> impl Iterator<Item = (&Point, &MarkerStyle)> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Marker { at, style } => Some((at, style)),
            _ => None,
        })
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.primitives.last(), Some(Primitive::Finish))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.primitives)?)
    }

    fn ensure_open(&self) -> Result<()> {
        match self.primitives.first() {
            Some(Primitive::Begin { .. }) if !self.is_finished() => Ok(()),
            _ => Err(IdrError::render("primitive emitted outside begin/finish")),
        }
    }
}

impl DrawingSurface for RecordingSurface {
    fn begin(&mut self, frame: &Frame) -> Result<()> {
        if !self.primitives.is_empty() {
            return Err(IdrError::render("surface already used"));
        }
        self.primitives.push(Primitive::Begin {
            frame: frame.clone(),
        });
        Ok(())
    }

    fn line(&mut self, start: Point, end: Point, style: &LineStyle) -> Result<()> {
        self.ensure_open()?;
        self.primitives.push(Primitive::Line {
            start,
            end,
            style: *style,
        });
        Ok(())
    }

    fn point(&mut self, at: Point, style: &MarkerStyle) -> Result<()> {
        self.ensure_open()?;
        self.primitives.push(Primitive::Marker { at, style: *style });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.primitives.push(Primitive::Finish);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::surface::{Rgb, TrackCategory, VerticalOrder};

    fn frame() -> Frame {
        Frame {
            title: "t".to_string(),
            x_label: "Position".to_string(),
            x_range: (-1, 1),
            slots: 0,
            labels: Vec::new(),
            vertical_order: VerticalOrder::HighestSlotOnTop,
            legend: Vec::new(),
        }
    }

    fn marker() -> MarkerStyle {
        MarkerStyle {
            category: TrackCategory::Psite,
            color: Rgb::RED,
            size: 1.5,
        }
    }

    #[test]
    fn test_point_before_begin_is_rejected() {
        let mut surface = RecordingSurface::new();
        assert!(surface.point(Point::new(0, 1), &marker()).is_err());
    }

    #[test]
    fn test_point_after_finish_is_rejected() {
        let mut surface = RecordingSurface::new();
        surface.begin(&frame()).unwrap();
        surface.finish().unwrap();
        assert!(surface.point(Point::new(0, 1), &marker()).is_err());
    }

    #[test]
    fn test_json_tags_primitives() {
        let mut surface = RecordingSurface::new();
        surface.begin(&frame()).unwrap();
        surface.point(Point::new(0, 1), &marker()).unwrap();
        surface.finish().unwrap();

        let json: serde_json::Value = serde_json::from_str(&surface.to_json().unwrap()).unwrap();
        assert_eq!(json[0]["primitive"], "begin");
        assert_eq!(json[1]["primitive"], "marker");
        assert_eq!(json[1]["style"]["category"], "psite");
        assert_eq!(json[2]["primitive"], "finish");
    }
}
