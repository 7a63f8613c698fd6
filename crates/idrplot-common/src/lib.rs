//! idrplot Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, utilities, and error handling for the idrplot project.
//!
//! # Overview
//!
//! This crate provides common functionality used across all idrplot workspace members:
//!
//! - **Error Handling**: Custom error types and result types
//! - **Logging**: Centralised `tracing` subscriber setup
//! - **Types**: Protein records, centered layout records and geometry advisories
//!
//! # Example
//!
//! ```
//! use idrplot_common::types::ProteinRecord;
//!
//! let chk1 = ProteinRecord::new(265, 330, "CHK1", 296, 476);
//! assert!(chk1.psite_in_region());
//! assert!(chk1.advisories().is_empty());
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{IdrError, Result};
pub use types::{GeometryAdvisory, LayoutRecord, Position, ProteinRecord, MAX_POSITION};
