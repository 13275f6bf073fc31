//! Descriptive statistics over extracted numeric columns

use std::fmt;

/// Describe-style summary of one numeric column: count, mean, sample
/// standard deviation, minimum, quartiles, maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl DescriptiveStats {
    /// Computes the summary over `values`. Returns `None` for an empty
    /// column. The standard deviation is the sample deviation (n-1) and is
    /// zero when fewer than two values are present.
    pub fn compute(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let std = if count > 1 {
            let variance = values
                .iter()
                .map(|value| {
                    let delta = value - mean;
                    delta * delta
                })
                .sum::<f64>()
                / (count - 1) as f64;
            variance.sqrt()
        } else {
            0.0
        };

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        Some(Self {
            count,
            mean,
            std,
            min: sorted[0],
            q25: percentile(&sorted, 0.25),
            median: percentile(&sorted, 0.50),
            q75: percentile(&sorted, 0.75),
            max: sorted[count - 1],
        })
    }
}

impl fmt::Display for DescriptiveStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "count  {}", self.count)?;
        writeln!(f, "mean   {:.2}", self.mean)?;
        writeln!(f, "std    {:.2}", self.std)?;
        writeln!(f, "min    {:.2}", self.min)?;
        writeln!(f, "25%    {:.2}", self.q25)?;
        writeln!(f, "50%    {:.2}", self.median)?;
        writeln!(f, "75%    {:.2}", self.q75)?;
        write!(f, "max    {:.2}", self.max)
    }
}

/// Linear-interpolated percentile over an ascending-sorted slice.
/// `q` is a fraction in `[0, 1]`.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }

    let rank = q * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let fraction = rank - lower as f64;
        sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
    }
}

/// Pearson correlation coefficient between two equal-length columns.
///
/// Returns `None` when fewer than two pairs exist, lengths differ, or
/// either column has zero variance.
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut variance_x = 0.0;
    let mut variance_y = 0.0;
    for (x, y) in xs.iter().zip(ys.iter()) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        variance_x += dx * dx;
        variance_y += dy * dy;
    }

    if variance_x == 0.0 || variance_y == 0.0 {
        return None;
    }

    Some(covariance / (variance_x.sqrt() * variance_y.sqrt()))
}
