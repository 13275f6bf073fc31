//! Fixed thresholds and figure dimensions used by the analysis modules

/// Valid-row threshold gating the advanced visualizations.
///
/// A *valid row* has numeric QUAL and DP. Advanced plots are generated only
/// when strictly more than this many valid rows exist; the value is carried
/// over from the original analysis unchanged.
pub const ADVANCED_PLOT_MIN_ROWS: usize = 100;

/// Number of equal-width bins in the histogram panels.
pub const HISTOGRAM_BINS: usize = 50;

/// Chromosomes shown in the variants-per-chromosome bar chart.
pub const BAR_CHART_TOP_CHROMOSOMES: usize = 10;

/// Chromosomes shown in the per-chromosome quality box plot.
pub const BOXPLOT_TOP_CHROMOSOMES: usize = 5;

/// Figure width in pixels.
pub const PLOT_WIDTH: u32 = 1200;

/// Figure height in pixels.
pub const PLOT_HEIGHT: u32 = 800;
