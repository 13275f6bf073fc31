//! Advanced analysis figure
//!
//! Renders the correlation heatmap and the per-chromosome quality box plot,
//! but only when enough valid rows exist to make the statistics meaningful.

use crate::analysis::constants::{
    ADVANCED_PLOT_MIN_ROWS, BOXPLOT_TOP_CHROMOSOMES, PLOT_HEIGHT, PLOT_WIDTH,
};
use crate::analysis::descriptive::pearson_correlation;
use crate::common::plots::{draw_correlation_heatmap, draw_grouped_boxplot};
use crate::common::{PlotError, VariantTable};
use plotters::prelude::*;
use std::path::Path;

/// File name of the advanced analysis figure inside the output directory.
pub const ADVANCED_PLOT_FILE: &str = "advanced_analysis.png";

/// Whether the advanced visualizations should run for this many valid rows
/// (rows where both QUAL and DP are numeric).
pub fn advanced_plots_enabled(valid_rows: usize) -> bool {
    valid_rows > ADVANCED_PLOT_MIN_ROWS
}

/// Renders the advanced figure to `output_dir` when the valid-row gate
/// passes. Returns whether the figure was generated.
pub fn generate_advanced_plots(table: &VariantTable, output_dir: &Path) -> Result<bool, PlotError> {
    let pairs = table.depth_quality_pairs();
    if !advanced_plots_enabled(pairs.len()) {
        return Ok(false);
    }

    let (depths, quality): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
    // Zero-variance columns have no defined coefficient; annotate as 0
    let r = pearson_correlation(&quality, &depths).unwrap_or(0.0);
    let matrix = vec![vec![1.0, r], vec![r, 1.0]];

    let path = output_dir.join(ADVANCED_PLOT_FILE);
    let root = BitMapBackend::new(&path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;
    let panels = root.split_evenly((1, 2));

    draw_correlation_heatmap(
        &panels[0],
        &["QUAL", "DP"],
        &matrix,
        "Quality Metrics Correlation",
    )?;

    let groups = table.quality_by_top_chromosomes(BOXPLOT_TOP_CHROMOSOMES);
    if !groups.is_empty() {
        draw_grouped_boxplot(
            &panels[1],
            &groups,
            "Quality Distribution by Chromosome",
            "Chromosome",
            "Quality Score",
        )?;
    }

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::VariantRow;
    use tempfile::TempDir;

    fn synthetic_table(valid_rows: usize) -> VariantTable {
        let rows: Vec<VariantRow> = (0..valid_rows)
            .map(|index| VariantRow {
                chrom: format!("chr{}", index % 3 + 1),
                pos: Some(500 + index as u64),
                qual: Some(30.0 + (index % 17) as f64),
                af: Some(0.2),
                dp: Some(12.0 + (index % 23) as f64),
            })
            .collect();
        VariantTable::new(rows)
    }

    #[test]
    fn test_gate_threshold_boundaries() {
        assert!(!advanced_plots_enabled(0));
        assert!(!advanced_plots_enabled(99));
        assert!(!advanced_plots_enabled(100));
        assert!(advanced_plots_enabled(101));
    }

    #[test]
    fn test_small_table_skips_figure() {
        let temp_dir = TempDir::new().unwrap();
        let table = synthetic_table(50);

        let generated = generate_advanced_plots(&table, temp_dir.path()).unwrap();
        assert!(!generated);
        assert!(!temp_dir.path().join(ADVANCED_PLOT_FILE).exists());
    }

    #[test]
    fn test_rows_without_depth_do_not_count_as_valid() {
        let temp_dir = TempDir::new().unwrap();
        let mut table = synthetic_table(50);
        // Plenty of rows, but none of these are valid (missing DP)
        for index in 0..200 {
            table.rows.push(VariantRow {
                chrom: "chr1".to_string(),
                pos: Some(index),
                qual: Some(10.0),
                af: None,
                dp: None,
            });
        }

        let generated = generate_advanced_plots(&table, temp_dir.path()).unwrap();
        assert!(!generated);
    }

    #[test]
    #[ignore = "Font rendering not available in test environment"]
    fn test_renders_figure_above_threshold() {
        let temp_dir = TempDir::new().unwrap();
        let table = synthetic_table(150);

        let generated = generate_advanced_plots(&table, temp_dir.path()).unwrap();
        assert!(generated);
        assert!(temp_dir.path().join(ADVANCED_PLOT_FILE).exists());
    }
}
