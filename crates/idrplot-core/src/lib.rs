//! idrplot Core
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Aligns intrinsically disordered regions (IDRs) of many proteins on their
//! phosphorylation sites and draws one horizontal track per protein.
//!
//! # Overview
//!
//! - **Dataset**: reads protein records from CSV, TSV, JSON, YAML or TOML
//! - **Layout**: centers every record on its p-site and ranks by protein length
//! - **Renderer**: turns ranked layout records into drawing primitives
//! - **Surface**: the primitive interface any backend (SVG, PNG, in-memory) implements
//!
//! # Example
//!
//! ```
//! use idrplot_common::ProteinRecord;
//! use idrplot_core::backends::RecordingSurface;
//! use idrplot_core::{layout, TrackRenderer};
//!
//! let records = vec![
//!     ProteinRecord::new(265, 330, "CHK1", 296, 476),
//!     ProteinRecord::new(87, 106, "SASH1", 90, 1247),
//! ];
//!
//! let layouts = layout::normalize_and_rank(&records);
//! assert_eq!(layouts[0].name, "CHK1");
//! assert_eq!(layouts[0].centered_region_start, -31);
//!
//! let mut surface = RecordingSurface::new();
//! TrackRenderer::default()
//!     .render("14-3-3 clients", &layouts, &mut surface)
//!     .unwrap();
//! assert_eq!(surface.lines().count(), 4);
//! ```

pub mod backends;
pub mod dataset;
pub mod layout;
pub mod pipeline;
pub mod renderer;
pub mod surface;

pub use dataset::{Dataset, DatasetFormat};
pub use renderer::{TrackRenderer, TrackStyle};
pub use surface::{DrawingSurface, Frame};
