//! Data structures for the extracted variant table

use std::collections::HashMap;

/// A single extracted variant record.
///
/// Fields arrive from `bcftools query` as text; numeric fields are `None`
/// when the source field was a missing marker (`.`), empty, or failed
/// numeric coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantRow {
    /// Chromosome identifier (e.g. "chr1", "X")
    pub chrom: String,
    /// 1-based position on the chromosome
    pub pos: Option<u64>,
    /// Variant call quality score (QUAL column)
    pub qual: Option<f64>,
    /// Allele frequency (INFO/AF)
    pub af: Option<f64>,
    /// Read depth (INFO/DP)
    pub dp: Option<f64>,
}

/// The extracted variant table: one row per variant record.
///
/// Built from subprocess output, discarded at process exit.
#[derive(Debug, Default)]
pub struct VariantTable {
    pub rows: Vec<VariantRow>,
}

impl VariantTable {
    pub fn new(rows: Vec<VariantRow>) -> Self {
        Self { rows }
    }

    /// Number of variant records in the table.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Quality scores for rows where QUAL coerced to a number.
    pub fn quality_values(&self) -> Vec<f64> {
        self.rows.iter().filter_map(|row| row.qual).collect()
    }

    /// Allele frequencies for rows where INFO/AF coerced to a number.
    pub fn allele_frequencies(&self) -> Vec<f64> {
        self.rows.iter().filter_map(|row| row.af).collect()
    }

    /// (depth, quality) pairs for *valid rows*: rows where both QUAL and
    /// INFO/DP coerced to numbers. This is the row set that gates the
    /// advanced visualizations.
    pub fn depth_quality_pairs(&self) -> Vec<(f64, f64)> {
        self.rows
            .iter()
            .filter_map(|row| match (row.dp, row.qual) {
                (Some(dp), Some(qual)) => Some((dp, qual)),
                _ => None,
            })
            .collect()
    }

    /// Variant counts per chromosome, ordered by descending count with ties
    /// broken by chromosome name for deterministic output.
    pub fn chromosome_counts(&self) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for row in &self.rows {
            *counts.entry(row.chrom.as_str()).or_insert(0) += 1;
        }

        let mut counts: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(chrom, count)| (chrom.to_string(), count))
            .collect();
        counts.sort_by(|(name_a, count_a), (name_b, count_b)| {
            count_b.cmp(count_a).then_with(|| name_a.cmp(name_b))
        });
        counts
    }

    /// Number of distinct chromosomes represented in the table.
    pub fn distinct_chromosomes(&self) -> usize {
        self.chromosome_counts().len()
    }

    /// Quality scores per chromosome for the `top` chromosomes by variant
    /// count. Chromosomes whose rows carry no numeric QUAL are skipped.
    pub fn quality_by_top_chromosomes(&self, top: usize) -> Vec<(String, Vec<f64>)> {
        self.chromosome_counts()
            .into_iter()
            .take(top)
            .filter_map(|(chrom, _)| {
                let values: Vec<f64> = self
                    .rows
                    .iter()
                    .filter(|row| row.chrom == chrom)
                    .filter_map(|row| row.qual)
                    .collect();
                if values.is_empty() {
                    None
                } else {
                    Some((chrom, values))
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(chrom: &str, qual: Option<f64>, af: Option<f64>, dp: Option<f64>) -> VariantRow {
        VariantRow {
            chrom: chrom.to_string(),
            pos: Some(100),
            qual,
            af,
            dp,
        }
    }

    #[test]
    fn test_column_accessors_skip_missing_values() {
        let table = VariantTable::new(vec![
            row("chr1", Some(30.0), Some(0.5), Some(20.0)),
            row("chr1", None, None, Some(15.0)),
            row("chr2", Some(42.0), Some(0.1), None),
        ]);

        assert_eq!(table.len(), 3);
        assert_eq!(table.quality_values(), vec![30.0, 42.0]);
        assert_eq!(table.allele_frequencies(), vec![0.5, 0.1]);
        assert_eq!(table.depth_quality_pairs(), vec![(20.0, 30.0)]);
    }

    #[test]
    fn test_chromosome_counts_ordering() {
        let table = VariantTable::new(vec![
            row("chr2", None, None, None),
            row("chr1", None, None, None),
            row("chr2", None, None, None),
            row("chr3", None, None, None),
        ]);

        // Descending by count, ties resolved by name
        assert_eq!(
            table.chromosome_counts(),
            vec![
                ("chr2".to_string(), 2),
                ("chr1".to_string(), 1),
                ("chr3".to_string(), 1),
            ]
        );
        assert_eq!(table.distinct_chromosomes(), 3);
    }

    #[test]
    fn test_quality_by_top_chromosomes() {
        let table = VariantTable::new(vec![
            row("chr1", Some(10.0), None, None),
            row("chr1", Some(20.0), None, None),
            row("chr2", None, None, None),
            row("chr3", Some(5.0), None, None),
        ]);

        let groups = table.quality_by_top_chromosomes(2);
        // chr2 has the second-highest count but no numeric QUAL, so only
        // chr1 survives from the top two.
        assert_eq!(groups, vec![("chr1".to_string(), vec![10.0, 20.0])]);
    }

    #[test]
    fn test_empty_table() {
        let table = VariantTable::default();
        assert!(table.is_empty());
        assert!(table.quality_values().is_empty());
        assert!(table.chromosome_counts().is_empty());
        assert_eq!(table.distinct_chromosomes(), 0);
    }
}
