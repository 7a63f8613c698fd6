//! Drawing surface implementations

#[cfg(feature = "png")]
pub mod bitmap;
pub mod recording;
pub mod svg;

#[cfg(feature = "png")]
pub use bitmap::BitmapSurface;
pub use recording::{Primitive, RecordingSurface};
pub use svg::{CanvasOptions, SvgSurface};
