//! Pipeline orchestration
//!
//! Runs the five analysis steps in order: bcftools statistics, field
//! extraction, descriptive statistics with the basic figure, the gated
//! advanced figure, and the summary report. Steps that depend on data a
//! failed step should have produced are skipped; the summary is always
//! written. Only input/output problems abort the run.

use crate::analysis::{
    generate_advanced_plots, generate_basic_plots, DescriptiveStats, ADVANCED_PLOT_FILE,
    BASIC_PLOT_FILE,
};
use crate::bcftools::Bcftools;
use crate::common::VariantTable;
use crate::parsing::{self, TSV_HEADER};
use crate::report::{self, ReportError, SummaryContext};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// File name of the raw bcftools statistics report.
pub const STATS_FILE: &str = "vcf_stats.txt";

/// File name of the extracted variant table.
pub const VARIANTS_FILE: &str = "variants.tsv";

/// Errors that abort the pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("VCF file '{0}' not found")]
    InputNotFound(PathBuf),

    #[error("Failed to create output directory {path}: {source}")]
    CreateOutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    WriteArtifact {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Report(#[from] ReportError),
}

type Result<T> = core::result::Result<T, PipelineError>;

/// Run configuration, filled from the command line.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Input variant file (VCF/BCF, optionally compressed)
    pub vcf: PathBuf,
    /// Directory receiving all artifacts, created if absent
    pub output_dir: PathBuf,
    /// bcftools executable name or path
    pub bcftools: String,
}

/// What the run produced, for callers and tests.
#[derive(Debug, Default)]
pub struct PipelineOutcome {
    pub stats_written: bool,
    pub variants_analyzed: Option<usize>,
    pub basic_plots_written: bool,
    pub advanced_plots_written: bool,
}

/// Executes the full pipeline.
pub fn run(config: &PipelineConfig) -> Result<PipelineOutcome> {
    if !config.vcf.exists() {
        return Err(PipelineError::InputNotFound(config.vcf.clone()));
    }

    let output_dir = &config.output_dir;
    fs::create_dir_all(output_dir).map_err(|source| PipelineError::CreateOutputDir {
        path: output_dir.clone(),
        source,
    })?;

    let bcftools = Bcftools::new(&config.bcftools);
    let mut outcome = PipelineOutcome::default();
    let mut artifacts: Vec<&'static str> = Vec::new();

    info!("Step 1: basic VCF statistics");
    match bcftools.stats(&config.vcf) {
        Ok(stats_text) => {
            write_artifact(&output_dir.join(STATS_FILE), &stats_text)?;
            artifacts.push(STATS_FILE);
            outcome.stats_written = true;
            info!("VCF statistics saved to {}", output_dir.join(STATS_FILE).display());
        }
        Err(e) => warn!("bcftools stats failed, skipping statistics report: {e}"),
    }

    info!("Step 2: extract variant fields");
    let table = extract_variant_table(&bcftools, config, &mut artifacts)?;
    outcome.variants_analyzed = table.as_ref().map(|table| table.len());

    if let Some(table) = &table {
        info!("Step 3: descriptive statistics and basic plots");
        if let Some(stats) = DescriptiveStats::compute(&table.quality_values()) {
            info!("Variant quality statistics:\n{stats}");
        }
        if table.is_empty() {
            info!("No variant records extracted, skipping plots");
        } else {
            match generate_basic_plots(table, output_dir) {
                Ok(()) => {
                    artifacts.push(BASIC_PLOT_FILE);
                    outcome.basic_plots_written = true;
                    info!(
                        "Analysis plots saved to {}",
                        output_dir.join(BASIC_PLOT_FILE).display()
                    );
                }
                Err(e) => warn!("Failed to render analysis plots: {e}"),
            }

            info!("Step 4: advanced visualizations");
            match generate_advanced_plots(table, output_dir) {
                Ok(true) => {
                    artifacts.push(ADVANCED_PLOT_FILE);
                    outcome.advanced_plots_written = true;
                    info!(
                        "Advanced analysis plots saved to {}",
                        output_dir.join(ADVANCED_PLOT_FILE).display()
                    );
                }
                Ok(false) => info!(
                    "Skipping advanced plots: not enough rows with numeric QUAL and DP"
                ),
                Err(e) => warn!("Failed to render advanced plots: {e}"),
            }
        }
    }

    info!("Step 5: summary report");
    report::write_summary(
        output_dir,
        &SummaryContext {
            input_file: &config.vcf,
            table: table.as_ref(),
            artifacts: &artifacts,
        },
    )?;
    info!(
        "Summary report saved to {}",
        output_dir.join(report::SUMMARY_TEXT_FILE).display()
    );

    Ok(outcome)
}

/// Step 2: run `bcftools query`, persist `variants.tsv` with a header, and
/// load it back into a table. Any failure is logged and yields `None`,
/// which downstream steps interpret as "skip".
fn extract_variant_table(
    bcftools: &Bcftools,
    config: &PipelineConfig,
    artifacts: &mut Vec<&'static str>,
) -> Result<Option<VariantTable>> {
    let query_output = match bcftools.query(&config.vcf) {
        Ok(output) => output,
        Err(e) => {
            warn!("bcftools query failed, skipping variant analysis: {e}");
            return Ok(None);
        }
    };

    let path = config.output_dir.join(VARIANTS_FILE);
    write_artifact(&path, &format!("{}\n{}", TSV_HEADER, query_output))?;
    artifacts.push(VARIANTS_FILE);

    match parsing::parse_variant_table(&path) {
        Ok(table) => {
            info!("Loaded {} variants from {}", table.len(), path.display());
            Ok(Some(table))
        }
        Err(e) => {
            warn!("Failed to parse extracted variant table: {e}");
            Ok(None)
        }
    }
}

fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| PipelineError::WriteArtifact {
        path: path.to_path_buf(),
        source,
    })
}
