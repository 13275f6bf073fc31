//! Basic analysis figure
//!
//! Renders the 2x2 panel figure for the extracted variant table: quality
//! histogram, allele-frequency histogram, quality-vs-depth scatter, and the
//! variants-per-chromosome bar chart.

use crate::analysis::constants::{
    BAR_CHART_TOP_CHROMOSOMES, HISTOGRAM_BINS, PLOT_HEIGHT, PLOT_WIDTH,
};
use crate::common::plots::{draw_bar_chart, draw_histogram, draw_scatter};
use crate::common::{PlotError, VariantTable};
use plotters::prelude::*;
use std::path::Path;

/// File name of the basic analysis figure inside the output directory.
pub const BASIC_PLOT_FILE: &str = "vcf_analysis_plots.png";

/// Renders the basic 2x2 analysis figure to `output_dir`.
///
/// Panels without any numeric data are left blank rather than erroring; an
/// entirely empty table short-circuits without creating a file.
pub fn generate_basic_plots(table: &VariantTable, output_dir: &Path) -> Result<(), PlotError> {
    if table.is_empty() {
        return Ok(());
    }

    let path = output_dir.join(BASIC_PLOT_FILE);
    let root = BitMapBackend::new(&path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let titled = root
        .titled("VCF Analysis Results", ("sans-serif", 40))
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;
    let panels = titled.split_evenly((2, 2));

    let quality = table.quality_values();
    if !quality.is_empty() {
        draw_histogram(
            &panels[0],
            &quality,
            HISTOGRAM_BINS,
            "Variant Quality Distribution",
            "Quality Score",
            BLUE,
        )?;
    }

    let frequencies = table.allele_frequencies();
    if !frequencies.is_empty() {
        draw_histogram(
            &panels[1],
            &frequencies,
            HISTOGRAM_BINS,
            "Allele Frequency Distribution",
            "Allele Frequency",
            GREEN,
        )?;
    }

    let pairs = table.depth_quality_pairs();
    if !pairs.is_empty() {
        draw_scatter(
            &panels[2],
            &pairs,
            "Quality vs Depth",
            "Depth (DP)",
            "Quality Score",
        )?;
    }

    let chromosomes: Vec<(String, usize)> = table
        .chromosome_counts()
        .into_iter()
        .take(BAR_CHART_TOP_CHROMOSOMES)
        .collect();
    if !chromosomes.is_empty() {
        draw_bar_chart(
            &panels[3],
            &chromosomes,
            "Variants per Chromosome (Top 10)",
            "Chromosome",
            "Number of Variants",
        )?;
    }

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}
