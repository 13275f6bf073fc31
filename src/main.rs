use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use analyze_vcf_stats::{init_tracing, pipeline, PipelineConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Summarize a VCF with bcftools and render quality plots", long_about = None)]
struct Cli {
    /// Path to the variant file (VCF/BCF, optionally compressed).
    vcf: PathBuf,

    /// Directory where analysis artifacts are written.
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// bcftools executable to invoke.
    #[arg(long, default_value = "bcftools")]
    bcftools: String,
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let config = PipelineConfig {
        vcf: cli.vcf,
        output_dir: cli.output_dir,
        bcftools: cli.bcftools,
    };

    info!("Starting VCF analysis pipeline");
    match pipeline::run(&config) {
        Ok(outcome) => {
            if let Some(count) = outcome.variants_analyzed {
                info!("Analyzed {} variants", count);
            }
            info!(
                "Analysis complete! Check {} for results",
                config.output_dir.display()
            );
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
