//! One-shot VCF analysis pipeline
//!
//! Invokes the external `bcftools` toolkit to summarize a variant file and
//! extract per-variant fields, loads the extracted table, computes
//! descriptive statistics, renders plots, and writes summary reports into
//! an output directory. A demo pipeline around well-tested external tools,
//! not a variant-analysis engine.

pub mod analysis;
pub mod bcftools;
pub mod common;
pub mod parsing;
pub mod pipeline;
pub mod report;

pub use common::{VariantRow, VariantTable};
pub use pipeline::{PipelineConfig, PipelineError, PipelineOutcome};

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber once; safe to call from tests.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init();
    });
}
