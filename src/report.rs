//! Summary report generation
//!
//! Writes the final `analysis_summary.txt` (human-readable, with
//! distribution tables) and its machine-readable JSON twin. The summary is
//! produced even when earlier pipeline steps failed; missing data is
//! reported as `N/A`.

use crate::analysis::DescriptiveStats;
use crate::common::buckets::{format_distribution_table, DistributionEntry};
use crate::common::VariantTable;
use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name of the text summary inside the output directory.
pub const SUMMARY_TEXT_FILE: &str = "analysis_summary.txt";

/// File name of the JSON summary inside the output directory.
pub const SUMMARY_JSON_FILE: &str = "analysis_summary.json";

/// Errors that can occur while writing the summary report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write summary report: {0}")]
    FileWrite(#[from] std::io::Error),

    #[error("Failed to serialize summary report: {0}")]
    Serialize(#[from] serde_json::Error),
}

type Result<T> = core::result::Result<T, ReportError>;

/// Everything the summary needs from the rest of the pipeline.
pub struct SummaryContext<'a> {
    /// Input variant file as given on the command line
    pub input_file: &'a Path,
    /// The extracted table, absent when extraction or parsing failed
    pub table: Option<&'a VariantTable>,
    /// Artifact file names actually produced by earlier steps, in order
    pub artifacts: &'a [&'static str],
}

/// Machine-readable summary, serialized next to the text report.
#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub input_file: String,
    pub total_variants: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<QualitySummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chromosomes_represented: Option<usize>,
    pub files_generated: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct QualitySummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Writes the text and JSON summaries into `output_dir`.
pub fn write_summary(output_dir: &Path, context: &SummaryContext<'_>) -> Result<()> {
    let mut files: Vec<String> = context
        .artifacts
        .iter()
        .map(|name| name.to_string())
        .collect();
    files.push(SUMMARY_TEXT_FILE.to_string());
    files.push(SUMMARY_JSON_FILE.to_string());

    let text = build_summary_text(context, &files);
    fs::write(output_dir.join(SUMMARY_TEXT_FILE), text)?;

    let quality_stats = context
        .table
        .and_then(|table| DescriptiveStats::compute(&table.quality_values()));
    let report = SummaryReport {
        input_file: context.input_file.display().to_string(),
        total_variants: context.table.map(|table| table.len()),
        quality: quality_stats.map(|stats| QualitySummary {
            min: stats.min,
            max: stats.max,
            mean: stats.mean,
        }),
        chromosomes_represented: context.table.map(|table| table.distinct_chromosomes()),
        files_generated: files,
    };
    let json = serde_json::to_string_pretty(&report)?;
    fs::write(output_dir.join(SUMMARY_JSON_FILE), json)?;

    Ok(())
}

/// Renders the human-readable summary text.
fn build_summary_text(context: &SummaryContext<'_>, files: &[String]) -> String {
    let mut sections = Vec::new();

    let mut header = format!(
        "VCF Analysis Summary Report\n{}\n\nInput file: {}\n",
        "=".repeat(30),
        context.input_file.display()
    );
    match context.table {
        Some(table) => {
            header.push_str(&format!("Total variants analyzed: {}\n", table.len()));
            match DescriptiveStats::compute(&table.quality_values()) {
                Some(stats) => {
                    header.push_str(&format!(
                        "Quality score range: {:.2} - {:.2}\n",
                        stats.min, stats.max
                    ));
                    header.push_str(&format!("Mean quality score: {:.2}\n", stats.mean));
                }
                None => header.push_str("Quality score range: N/A\n"),
            }
            header.push_str(&format!(
                "Chromosomes represented: {}\n",
                table.distinct_chromosomes()
            ));
        }
        None => header.push_str("Total variants analyzed: N/A\n"),
    }
    sections.push(header);

    if let Some(table) = context.table {
        let quality = table.quality_values();
        if !quality.is_empty() {
            let buckets = create_quality_buckets(&quality);
            sections.push(format_distribution_table(
                &buckets,
                Some("Quality Score Distribution (Fixed Ranges)"),
            ));
        }

        let chromosome_counts = table.chromosome_counts();
        if !chromosome_counts.is_empty() {
            let total = table.len();
            let entries: Vec<DistributionEntry> = chromosome_counts
                .into_iter()
                .map(|(chrom, count)| DistributionEntry::new(chrom, count, total))
                .collect();
            sections.push(format_distribution_table(
                &entries,
                Some("Variants per Chromosome"),
            ));
        }
    }

    let mut list = String::from("Files generated:\n");
    for name in files {
        list.push_str(&format!("- {}: {}\n", name, artifact_description(name)));
    }
    sections.push(list);

    sections.join("\n")
}

/// Fixed bucket ranges for quality scores
///
/// Ranges: <10, 10-20, 20-30, 30-50, 50-100, 100+. Phred-scaled call
/// quality clusters heavily below 100; the finer low-end ranges separate
/// marginal calls from confident ones.
fn create_quality_buckets(quality: &[f64]) -> Vec<DistributionEntry> {
    let total = quality.len();
    let ranges: [(f64, f64, &str); 6] = [
        (f64::NEG_INFINITY, 10.0, "<10"),
        (10.0, 20.0, "10-20"),
        (20.0, 30.0, "20-30"),
        (30.0, 50.0, "30-50"),
        (50.0, 100.0, "50-100"),
        (100.0, f64::INFINITY, "100+"),
    ];

    ranges
        .into_iter()
        .map(|(lower, upper, label)| {
            let count = quality
                .iter()
                .filter(|value| **value >= lower && **value < upper)
                .count();
            DistributionEntry::new(label.to_string(), count, total)
        })
        .collect()
}

fn artifact_description(name: &str) -> &'static str {
    match name {
        "vcf_stats.txt" => "bcftools statistics",
        "variants.tsv" => "Extracted variant data",
        "vcf_analysis_plots.png" => "Basic analysis plots",
        "advanced_analysis.png" => "Advanced visualizations",
        SUMMARY_TEXT_FILE => "This summary report",
        SUMMARY_JSON_FILE => "Machine-readable summary",
        _ => "Generated artifact",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::VariantRow;
    use tempfile::TempDir;

    fn table_with_quals(quals: &[f64]) -> VariantTable {
        let rows: Vec<VariantRow> = quals
            .iter()
            .enumerate()
            .map(|(index, qual)| VariantRow {
                chrom: if index % 2 == 0 { "chr1" } else { "chr2" }.to_string(),
                pos: Some(index as u64 + 1),
                qual: Some(*qual),
                af: None,
                dp: None,
            })
            .collect();
        VariantTable::new(rows)
    }

    #[test]
    fn test_summary_reports_counts_and_quality_figures() {
        let temp_dir = TempDir::new().unwrap();
        let table = table_with_quals(&[10.0, 20.0, 30.0, 40.0]);
        let context = SummaryContext {
            input_file: Path::new("sample.vcf.gz"),
            table: Some(&table),
            artifacts: &["vcf_stats.txt", "variants.tsv"],
        };

        write_summary(temp_dir.path(), &context).unwrap();

        let text = fs::read_to_string(temp_dir.path().join(SUMMARY_TEXT_FILE)).unwrap();
        assert!(text.contains("Input file: sample.vcf.gz"));
        assert!(text.contains("Total variants analyzed: 4"));
        assert!(text.contains("Quality score range: 10.00 - 40.00"));
        assert!(text.contains("Mean quality score: 25.00"));
        assert!(text.contains("Chromosomes represented: 2"));
        assert!(text.contains("Variants per Chromosome"));
        assert!(text.contains("- vcf_stats.txt: bcftools statistics"));
        assert!(text.contains("- analysis_summary.txt: This summary report"));

        let json = fs::read_to_string(temp_dir.path().join(SUMMARY_JSON_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_variants"], 4);
        assert_eq!(value["quality"]["mean"], 25.0);
        assert_eq!(value["chromosomes_represented"], 2);
    }

    #[test]
    fn test_summary_without_table_uses_placeholder() {
        let temp_dir = TempDir::new().unwrap();
        let context = SummaryContext {
            input_file: Path::new("broken.vcf"),
            table: None,
            artifacts: &[],
        };

        write_summary(temp_dir.path(), &context).unwrap();

        let text = fs::read_to_string(temp_dir.path().join(SUMMARY_TEXT_FILE)).unwrap();
        assert!(text.contains("Total variants analyzed: N/A"));
        assert!(!text.contains("Quality score range"));
        assert!(!text.contains("Variants per Chromosome"));

        let json = fs::read_to_string(temp_dir.path().join(SUMMARY_JSON_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_variants"], serde_json::Value::Null);
        assert!(value.get("quality").is_none());
    }

    #[test]
    fn test_quality_buckets_cover_all_values() {
        let quality = vec![5.0, 10.0, 19.9, 25.0, 49.9, 99.0, 250.0];
        let buckets = create_quality_buckets(&quality);

        assert_eq!(buckets.len(), 6);
        let total: usize = buckets.iter().map(|entry| entry.count).sum();
        assert_eq!(total, quality.len());
        assert_eq!(buckets[0].label, "<10");
        assert_eq!(buckets[0].count, 1);
        assert_eq!(buckets[1].count, 2); // 10.0 and 19.9
        assert_eq!(buckets[5].label, "100+");
        assert_eq!(buckets[5].count, 1);
    }

    #[test]
    fn test_table_without_numeric_quality() {
        let temp_dir = TempDir::new().unwrap();
        let table = VariantTable::new(vec![VariantRow {
            chrom: "chr1".to_string(),
            pos: Some(1),
            qual: None,
            af: None,
            dp: None,
        }]);
        let context = SummaryContext {
            input_file: Path::new("sample.vcf"),
            table: Some(&table),
            artifacts: &[],
        };

        write_summary(temp_dir.path(), &context).unwrap();

        let text = fs::read_to_string(temp_dir.path().join(SUMMARY_TEXT_FILE)).unwrap();
        assert!(text.contains("Total variants analyzed: 1"));
        assert!(text.contains("Quality score range: N/A"));
    }
}
