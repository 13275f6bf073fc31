//! Common infrastructure shared across the pipeline
//!
//! This module provides reusable infrastructure for:
//! - The extracted variant table data structures
//! - Distribution entries and ASCII table formatting
//! - Chart-drawing primitives

pub mod buckets;
pub mod data_structures;
pub mod plots;

// Re-export commonly used items
pub use data_structures::{VariantRow, VariantTable};
pub use plots::PlotError;
