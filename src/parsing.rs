//! Parsing of the extracted variant table
//!
//! `bcftools query` emits one tab-separated line per variant; the pipeline
//! prepends a header and writes the result to `variants.tsv`. This module
//! loads that file back into a [`VariantTable`], applying lenient numeric
//! coercion: missing-value markers (`.`), unparseable text, and non-finite
//! numbers all become `None`.

use crate::common::{VariantRow, VariantTable};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Header line written above the raw `bcftools query` output.
pub const TSV_HEADER: &str = "CHROM\tPOS\tQUAL\tAF\tDP";

/// Errors that can occur while loading the variant table
#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("Failed to read variant table: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Malformed variant table: {0}")]
    Malformed(#[from] csv::Error),
}

type Result<T> = core::result::Result<T, ParsingError>;

/// One TSV record exactly as extracted; every field stays text until
/// coercion.
#[derive(Debug, Deserialize)]
struct RawVariantRow {
    #[serde(rename = "CHROM")]
    chrom: String,
    #[serde(rename = "POS")]
    pos: String,
    #[serde(rename = "QUAL")]
    qual: String,
    #[serde(rename = "AF")]
    af: String,
    #[serde(rename = "DP")]
    dp: String,
}

/// Loads `variants.tsv` from disk into a [`VariantTable`].
///
/// A data line whose field count differs from the header is a
/// [`ParsingError::Malformed`].
pub fn parse_variant_table(path: &Path) -> Result<VariantTable> {
    let file = File::open(path)?;
    parse_variant_table_from_reader(file)
}

/// Reader-generic variant of [`parse_variant_table`].
pub fn parse_variant_table_from_reader<R: Read>(reader: R) -> Result<VariantTable> {
    let mut reader = ReaderBuilder::new().delimiter(b'\t').from_reader(reader);

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let raw: RawVariantRow = record?;
        rows.push(VariantRow {
            chrom: raw.chrom,
            pos: coerce_position(&raw.pos),
            qual: coerce_numeric(&raw.qual),
            af: coerce_numeric(&raw.af),
            dp: coerce_numeric(&raw.dp),
        });
    }

    Ok(VariantTable::new(rows))
}

/// Lenient numeric coercion: `.`, empty, unparseable, and non-finite values
/// become `None`.
fn coerce_numeric(field: &str) -> Option<f64> {
    let trimmed = field.trim();
    if trimmed.is_empty() || trimmed == "." {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn coerce_position(field: &str) -> Option<u64> {
    field.trim().parse().ok()
}
