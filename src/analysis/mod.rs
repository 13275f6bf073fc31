//! Domain-specific analysis modules
//!
//! This module contains the analysis logic for the extracted variant table:
//! - Descriptive statistics and correlation
//! - The basic 2x2 analysis figure
//! - The gated advanced figure (heatmap + box plot)

pub mod advanced_plots;
pub mod basic_plots;
pub mod constants;
pub mod descriptive;

// Re-export analysis entry points for convenience
pub use advanced_plots::{advanced_plots_enabled, generate_advanced_plots, ADVANCED_PLOT_FILE};
pub use basic_plots::{generate_basic_plots, BASIC_PLOT_FILE};
pub use descriptive::{pearson_correlation, DescriptiveStats};
