//! Plotting infrastructure for the analysis figures
//!
//! This module provides the chart-drawing primitives used by the analysis
//! figures (histograms, scatter, bar chart, correlation heatmap, box plot)
//! using the [`plotters`] crate. Figures are saved as PNG files with fixed
//! 1200x800 resolution; each primitive draws into one panel of a split
//! drawing area.
//!
//! # Headless compatibility
//! All drawing uses plotters' bitmap backend so it works in headless
//! environments (Docker/CI) without a display server. Font rendering still
//! requires system fonts; tests that render full charts are ignored where
//! fonts are unavailable.

use plotters::coord::Shift;
use plotters::data::Quartiles;
use plotters::prelude::*;
use thiserror::Error;

/// Errors that can occur during plot generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to save plot to file: {0}")]
    FileSave(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, PlotError>;

/// Bins `values` into `bin_count` equal-width buckets spanning the data
/// range. Returns `(lower, upper, count)` triples in ascending order.
///
/// A degenerate range (all values equal) is widened to one unit so the
/// resulting chart still has a drawable X extent.
pub fn histogram_bins(values: &[f64], bin_count: usize) -> Vec<(f64, f64, usize)> {
    if values.is_empty() || bin_count == 0 {
        return Vec::new();
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let span = if max > min { max - min } else { 1.0 };
    let width = span / bin_count as f64;

    let mut counts = vec![0usize; bin_count];
    for value in values {
        let index = (((value - min) / width) as usize).min(bin_count - 1);
        counts[index] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(index, count)| {
            let lower = min + index as f64 * width;
            (lower, lower + width, count)
        })
        .collect()
}

/// Draws a frequency histogram into one panel of a figure.
///
/// # Arguments
/// * `area` - Target panel
/// * `values` - Raw numeric values (binned internally)
/// * `bin_count` - Number of equal-width bins
/// * `title` - Panel caption
/// * `x_label` - X-axis description
/// * `color` - Bar fill color
pub fn draw_histogram(
    area: &DrawingArea<BitMapBackend, Shift>,
    values: &[f64],
    bin_count: usize,
    title: &str,
    x_label: &str,
    color: RGBColor,
) -> Result<()> {
    if values.is_empty() {
        return Err(PlotError::InvalidData("Data cannot be empty".to_string()));
    }

    let bins = histogram_bins(values, bin_count);
    let x_min = bins.first().map(|(lower, _, _)| *lower).unwrap_or(0.0);
    let x_max = bins.last().map(|(_, upper, _)| *upper).unwrap_or(1.0);
    let y_max = bins.iter().map(|(_, _, count)| *count).max().unwrap_or(1) as f64;

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max * 1.05)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc("Frequency")
        .label_style(("sans-serif", 15))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(bins.iter().map(|(lower, upper, count)| {
            Rectangle::new([(*lower, 0.0), (*upper, *count as f64)], color.mix(0.7).filled())
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

/// Draws a scatter plot of `(x, y)` points into one panel of a figure.
pub fn draw_scatter(
    area: &DrawingArea<BitMapBackend, Shift>,
    points: &[(f64, f64)],
    title: &str,
    x_label: &str,
    y_label: &str,
) -> Result<()> {
    if points.is_empty() {
        return Err(PlotError::InvalidData("Data cannot be empty".to_string()));
    }

    let x_min = points.iter().map(|(x, _)| *x).fold(f64::INFINITY, f64::min);
    let x_max = points
        .iter()
        .map(|(x, _)| *x)
        .fold(f64::NEG_INFINITY, f64::max);
    let y_min = points.iter().map(|(_, y)| *y).fold(f64::INFINITY, f64::min);
    let y_max = points
        .iter()
        .map(|(_, y)| *y)
        .fold(f64::NEG_INFINITY, f64::max);

    // Pad degenerate ranges so single-point data still builds a chart
    let (x_min, x_max) = pad_range(x_min, x_max);
    let (y_min, y_max) = pad_range(y_min, y_max);

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .label_style(("sans-serif", 15))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(
            points
                .iter()
                .map(|(x, y)| Circle::new((*x, *y), 2, BLUE.mix(0.5).filled())),
        )
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

/// Draws a labeled vertical bar chart into one panel of a figure.
///
/// One bar per `(label, count)` entry, in the order given.
pub fn draw_bar_chart(
    area: &DrawingArea<BitMapBackend, Shift>,
    counts: &[(String, usize)],
    title: &str,
    x_label: &str,
    y_label: &str,
) -> Result<()> {
    if counts.is_empty() {
        return Err(PlotError::InvalidData("Data cannot be empty".to_string()));
    }

    let n = counts.len() as i32;
    let y_max = counts.iter().map(|(_, count)| *count).max().unwrap_or(1) as i32;

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d((0..n).into_segmented(), 0..y_max + y_max / 20 + 1)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .label_style(("sans-serif", 15))
        .x_label_formatter(&|segment: &SegmentValue<i32>| fetch_label(counts, segment))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(counts.iter().enumerate().map(|(index, (_, count))| {
            let index = index as i32;
            Rectangle::new(
                [
                    (SegmentValue::Exact(index), 0),
                    (SegmentValue::Exact(index + 1), *count as i32),
                ],
                GREEN.mix(0.7).filled(),
            )
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

/// Draws an annotated correlation heatmap into one panel of a figure.
///
/// `matrix[row][col]` holds the correlation between `labels[row]` and
/// `labels[col]` in `[-1, 1]`. Diagonal cells are annotated with the label
/// name, off-diagonal cells with the coefficient.
pub fn draw_correlation_heatmap(
    area: &DrawingArea<BitMapBackend, Shift>,
    labels: &[&str],
    matrix: &[Vec<f64>],
    title: &str,
) -> Result<()> {
    if labels.is_empty() || matrix.len() != labels.len() {
        return Err(PlotError::InvalidData(format!(
            "Correlation matrix must be square with one row per label ({} labels, {} rows)",
            labels.len(),
            matrix.len()
        )));
    }

    let n = labels.len();
    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .build_cartesian_2d(0.0..n as f64, 0.0..n as f64)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_axes()
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    for (row, row_values) in matrix.iter().enumerate() {
        if row_values.len() != n {
            return Err(PlotError::InvalidData(format!(
                "Correlation matrix row {} has {} columns, expected {}",
                row,
                row_values.len(),
                n
            )));
        }

        for (col, value) in row_values.iter().enumerate() {
            let (x, y) = (col as f64, (n - 1 - row) as f64);
            let cell = Rectangle::new(
                [(x, y), (x + 1.0, y + 1.0)],
                correlation_color(*value).filled(),
            );
            chart
                .draw_series(std::iter::once(cell))
                .map_err(|e| PlotError::Drawing(e.to_string()))?;

            let annotation = if row == col {
                labels[row].to_string()
            } else {
                format!("{:.2}", value)
            };
            chart
                .draw_series(std::iter::once(Text::new(
                    annotation,
                    (x + 0.35, y + 0.55),
                    ("sans-serif", 20),
                )))
                .map_err(|e| PlotError::Drawing(e.to_string()))?;
        }
    }

    Ok(())
}

/// Draws a vertical box plot per group into one panel of a figure.
///
/// Each entry is `(label, values)`; quartiles are computed internally.
pub fn draw_grouped_boxplot(
    area: &DrawingArea<BitMapBackend, Shift>,
    groups: &[(String, Vec<f64>)],
    title: &str,
    x_label: &str,
    y_label: &str,
) -> Result<()> {
    if groups.is_empty() || groups.iter().any(|(_, values)| values.is_empty()) {
        return Err(PlotError::InvalidData(
            "Each box plot group needs at least one value".to_string(),
        ));
    }

    let quartiles: Vec<(String, Quartiles)> = groups
        .iter()
        .map(|(label, values)| (label.clone(), Quartiles::new(values)))
        .collect();

    let n = groups.len() as i32;
    let y_max = groups
        .iter()
        .flat_map(|(_, values)| values.iter())
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max) as f32;
    let y_max = if y_max > 0.0 { y_max * 1.05 } else { 1.0 };

    let labels: Vec<(String, usize)> = groups
        .iter()
        .map(|(label, values)| (label.clone(), values.len()))
        .collect();

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d((0..n).into_segmented(), 0f32..y_max)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .label_style(("sans-serif", 15))
        .x_label_formatter(&|segment: &SegmentValue<i32>| fetch_label(&labels, segment))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(quartiles.iter().enumerate().map(|(index, (_, quartiles))| {
            Boxplot::new_vertical(SegmentValue::CenterOf(index as i32), quartiles)
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

/// Maps a correlation coefficient in `[-1, 1]` to a white-red (positive) or
/// white-blue (negative) fill, the stronger the darker.
fn correlation_color(value: f64) -> RGBColor {
    let value = value.clamp(-1.0, 1.0);
    let t = value.abs();
    let blend = |from: u8, to: u8| (from as f64 + (to as f64 - from as f64) * t).round() as u8;
    if value >= 0.0 {
        RGBColor(blend(255, 214), blend(255, 39), blend(255, 40))
    } else {
        RGBColor(blend(255, 31), blend(255, 119), blend(255, 180))
    }
}

fn pad_range(min: f64, max: f64) -> (f64, f64) {
    if max > min {
        (min, max)
    } else {
        (min - 1.0, max + 1.0)
    }
}

/// Resolves the bar/box label for a segmented axis tick.
fn fetch_label(labels: &[(String, usize)], segment: &SegmentValue<i32>) -> String {
    let index = match segment {
        SegmentValue::Exact(index) | SegmentValue::CenterOf(index) => *index,
        SegmentValue::Last => return String::new(),
    };
    labels
        .get(index as usize)
        .map(|(label, _)| label.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_histogram_bins_distribution() {
        let values = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 10.0];
        let bins = histogram_bins(&values, 5);

        assert_eq!(bins.len(), 5);
        assert_eq!(bins[0].0, 0.0);
        assert_eq!(bins[4].1, 10.0);
        // All values accounted for
        let total: usize = bins.iter().map(|(_, _, count)| *count).sum();
        assert_eq!(total, values.len());
        // Maximum lands in the last bin
        assert!(bins[4].2 >= 1);
    }

    #[test]
    fn test_histogram_bins_identical_values() {
        let bins = histogram_bins(&[3.0, 3.0, 3.0], 4);
        assert_eq!(bins.len(), 4);
        // Degenerate range is widened to one unit
        assert!((bins[3].1 - 4.0).abs() < 1e-9);
        let total: usize = bins.iter().map(|(_, _, count)| *count).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_histogram_bins_empty() {
        assert!(histogram_bins(&[], 50).is_empty());
        assert!(histogram_bins(&[1.0], 0).is_empty());
    }

    #[test]
    fn test_correlation_color_extremes() {
        assert_eq!(correlation_color(0.0), RGBColor(255, 255, 255));
        assert_eq!(correlation_color(1.0), RGBColor(214, 39, 40));
        assert_eq!(correlation_color(-1.0), RGBColor(31, 119, 180));
        // Out-of-range values are clamped
        assert_eq!(correlation_color(5.0), correlation_color(1.0));
    }

    #[test]
    fn test_draw_histogram_rejects_empty_data() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.png");
        let root = BitMapBackend::new(&path, (400, 300)).into_drawing_area();

        let result = draw_histogram(&root, &[], 50, "Test", "X", BLUE);
        assert!(matches!(result, Err(PlotError::InvalidData(_))));
    }

    #[test]
    fn test_draw_heatmap_rejects_non_square_matrix() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("heatmap.png");
        let root = BitMapBackend::new(&path, (400, 300)).into_drawing_area();

        let result = draw_correlation_heatmap(&root, &["QUAL", "DP"], &[vec![1.0]], "Test");
        assert!(matches!(result, Err(PlotError::InvalidData(_))));
    }

    #[test]
    fn test_draw_boxplot_rejects_empty_group() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("box.png");
        let root = BitMapBackend::new(&path, (400, 300)).into_drawing_area();

        let groups = vec![("chr1".to_string(), vec![])];
        let result = draw_grouped_boxplot(&root, &groups, "Test", "X", "Y");
        assert!(matches!(result, Err(PlotError::InvalidData(_))));
    }

    #[test]
    #[ignore = "Font rendering not available in test environment"]
    fn test_draw_histogram_renders_png() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("hist.png");
        {
            let root = BitMapBackend::new(&path, (400, 300)).into_drawing_area();
            root.fill(&WHITE).unwrap();
            draw_histogram(&root, &[1.0, 2.0, 2.5, 3.0, 10.0], 10, "Quality", "Score", BLUE)
                .unwrap();
            root.present().unwrap();
        }
        assert!(path.exists());
    }
}
