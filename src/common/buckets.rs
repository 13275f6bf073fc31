//! Count/percentage distribution entries and ASCII table formatting
//!
//! Shared support for the distribution tables in the summary report:
//! - [`DistributionEntry`] holds a label (a bucket range or a chromosome
//!   name), a count, and the percentage of total records
//! - ASCII table rendering uses the [`tabled`] crate
//!
//! The functions that decide bucket ranges live with their analyses.

use tabled::{Table, Tabled};

/// A single distribution table row: label, count, and share of total.
#[derive(Debug, Clone, Tabled)]
pub struct DistributionEntry {
    /// Human-readable label (e.g. "20-30", "chr1")
    #[tabled(rename = "Range")]
    pub label: String,
    /// Number of variant records covered by this entry
    #[tabled(rename = "Count")]
    pub count: usize,
    /// Percentage of total records
    #[tabled(rename = "Percentage")]
    pub percentage: String,
}

impl DistributionEntry {
    /// Creates an entry with the percentage pre-formatted against `total`.
    pub fn new(label: String, count: usize, total: usize) -> Self {
        let percentage = if total == 0 {
            "0.00%".to_string()
        } else {
            format!("{:.2}%", (count as f64 / total as f64) * 100.0)
        };

        Self {
            label,
            count,
            percentage,
        }
    }
}

/// Formats distribution entries as an ASCII table using the [`tabled`] crate.
pub fn format_distribution_table(entries: &[DistributionEntry], title: Option<&str>) -> String {
    if entries.is_empty() {
        return "No data available".to_string();
    }

    let table = Table::new(entries).to_string();

    if let Some(title) = title {
        format!("{}\n{}\n{}", title, "=".repeat(title.len()), table)
    } else {
        table
    }
}
