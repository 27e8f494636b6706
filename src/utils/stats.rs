use itertools::Itertools;
use log::*;
use serde::{
    Deserialize,
    Serialize,
};
use statrs::distribution::{
    ContinuousCDF,
    Normal,
    StudentsT,
};
use statrs::statistics::Statistics;

use crate::data_structs::typedef::MetricValue;

/// How undefined values are treated when vectors are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MissingPolicy {
    /// Drop every index at which any input is undefined.
    #[default]
    Omit,
    /// Treat undefined values as `0.0`.
    Zero,
}

impl MissingPolicy {
    /// Aligns two vectors of possibly undefined values.
    pub fn align(
        &self,
        x: &[MetricValue],
        y: &[MetricValue],
    ) -> (Vec<f64>, Vec<f64>) {
        match self {
            MissingPolicy::Omit => {
                x.iter()
                    .zip(y.iter())
                    .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
                    .unzip()
            },
            MissingPolicy::Zero => {
                x.iter()
                    .zip(y.iter())
                    .map(|(a, b)| (a.unwrap_or(0.0), b.unwrap_or(0.0)))
                    .unzip()
            },
        }
    }

    /// Aligns any number of equally long columns. With [`MissingPolicy::Omit`]
    /// a row is kept only if every column is defined there.
    pub fn align_many(
        &self,
        columns: &[&[MetricValue]],
    ) -> Vec<Vec<f64>> {
        let n_rows = columns.iter().map(|c| c.len()).min().unwrap_or(0);
        let mut aligned = vec![Vec::with_capacity(n_rows); columns.len()];
        for row in 0..n_rows {
            let values = columns.iter().map(|c| c[row]).collect_vec();
            if *self == MissingPolicy::Omit && values.iter().any(Option::is_none) {
                continue;
            }
            for (target, value) in aligned.iter_mut().zip(values) {
                target.push(value.unwrap_or(0.0));
            }
        }
        aligned
    }

    /// Applies the policy to a single vector.
    pub fn apply(
        &self,
        values: &[MetricValue],
    ) -> Vec<f64> {
        match self {
            MissingPolicy::Omit => values.iter().flatten().copied().collect(),
            MissingPolicy::Zero => values.iter().map(|v| v.unwrap_or(0.0)).collect(),
        }
    }
}

/// Arithmetic mean. Undefined for an empty slice.
pub fn mean(values: &[f64]) -> MetricValue {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().mean())
}

/// Quantile `q` in `[0, 1]` with linear interpolation between the two
/// nearest order statistics. Undefined for an empty slice.
pub fn quantile(
    values: &[f64],
    q: f64,
) -> MetricValue {
    if values.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let sorted = values
        .iter()
        .copied()
        .sorted_by(f64::total_cmp)
        .collect_vec();
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Renders a metric value for display. Undefined values print as `NA`.
pub fn format_metric(value: MetricValue) -> String {
    match value {
        Some(value) => format!("{value:.6}"),
        None => "NA".to_string(),
    }
}

/// Bessel-corrected sample variance. Undefined for fewer than two values.
pub fn sample_variance(values: &[f64]) -> MetricValue {
    if values.len() < 2 {
        return None;
    }
    Some(values.iter().variance())
}

/// Ranks starting at 1. Tied values receive the average of their ranks.
pub fn rank(values: &[f64]) -> Vec<f64> {
    let order = (0..values.len())
        .sorted_by(|&a, &b| values[a].total_cmp(&values[b]))
        .collect_vec();

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // Positions start..end share the average of ranks start+1..=end.
        let avg_rank = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = avg_rank;
        }
        start = end;
    }
    ranks
}

/// Pearson correlation coefficient. Undefined for mismatched or too short
/// inputs and for constant vectors.
pub fn pearson_r(
    x: &[f64],
    y: &[f64],
) -> MetricValue {
    if x.len() != y.len() {
        warn!(
            "Cannot calculate Pearson's r: x length ({}) doesn't match y length ({})",
            x.len(),
            y.len()
        );
        return None;
    }
    if x.len() < 2 {
        debug!("Cannot calculate Pearson's r on {} values", x.len());
        return None;
    }

    let x_mean = x.iter().mean();
    let y_mean = y.iter().mean();

    let numerator = x
        .iter()
        .zip(y.iter())
        .map(|(valx, valy)| (valx - x_mean) * (valy - y_mean))
        .sum::<f64>();

    let denominator = {
        let x_dev: f64 = x.iter().map(|valx| (valx - x_mean).powi(2)).sum();
        let y_dev: f64 = y.iter().map(|valy| (valy - y_mean).powi(2)).sum();
        (x_dev * y_dev).sqrt()
    };

    if denominator == 0.0 {
        debug!("Denominator is zero, Pearson's r is undefined");
        return None;
    }

    Some((numerator / denominator).clamp(-1.0, 1.0))
}

/// Spearman rank correlation of two aligned vectors.
pub fn spearman_rho(
    x: &[f64],
    y: &[f64],
) -> MetricValue {
    if x.len() != y.len() {
        warn!(
            "Cannot calculate Spearman's rho: x length ({}) doesn't match y length ({})",
            x.len(),
            y.len()
        );
        return None;
    }
    pearson_r(&rank(x), &rank(y))
}

/// Result of a correlation together with its significance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    pub coefficient: f64,
    /// Two-sided p-value.
    pub p_value:     MetricValue,
    /// Number of aligned pairs used.
    pub n:           usize,
}

/// Spearman correlation of vectors with undefined entries, handled with
/// `policy`, and its two-sided p-value (Student's t, n - 2 degrees of
/// freedom).
pub fn spearman(
    x: &[MetricValue],
    y: &[MetricValue],
    policy: MissingPolicy,
) -> Option<Correlation> {
    let (x, y) = policy.align(x, y);
    let coefficient = spearman_rho(&x, &y)?;
    let n = x.len();
    Some(Correlation {
        coefficient,
        p_value: correlation_p_value(coefficient, n),
        n,
    })
}

/// Two-sided p-value of a correlation coefficient computed on `n` pairs.
pub fn correlation_p_value(
    r: f64,
    n: usize,
) -> MetricValue {
    if n < 3 {
        return None;
    }
    if (1.0 - r.abs()) <= f64::EPSILON {
        return Some(0.0);
    }
    let dof = (n - 2) as f64;
    let t = r * (dof / (1.0 - r * r)).sqrt();
    let dist = StudentsT::new(0.0, 1.0, dof).ok()?;
    Some((2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0))
}

/// Outcome of Steiger's test for two dependent correlations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteigerTest {
    pub z:       f64,
    /// Two-sided p-value.
    pub p_value: f64,
}

/// Steiger's (1980) Z test comparing `r12` and `r13`, two correlations that
/// share variable 1, given the correlation `r23` of the other two variables
/// and the sample size `n`.
///
/// Undefined for `n <= 3` or when a correlation is exactly +-1.
pub fn steiger_test(
    r12: f64,
    r13: f64,
    r23: f64,
    n: usize,
) -> Option<SteigerTest> {
    if n <= 3 {
        debug!("Steiger's test requires more than 3 observations, got {}", n);
        return None;
    }
    if [r12, r13, r23].iter().any(|r| r.abs() >= 1.0) {
        debug!("Steiger's test is undefined for perfect correlations");
        return None;
    }

    let z12 = r12.atanh();
    let z13 = r13.atanh();
    let r_mean = (r12 + r13) / 2.0;
    let r_mean_sq = r_mean * r_mean;

    let psi = r23 * (1.0 - 2.0 * r_mean_sq) - 0.5 * r_mean_sq * (1.0 - 2.0 * r_mean_sq - r23 * r23);
    let s = psi / (1.0 - r_mean_sq).powi(2);
    let denominator = (2.0 - 2.0 * s).sqrt();
    if !denominator.is_finite() || denominator == 0.0 {
        return None;
    }

    let z = (z12 - z13) * ((n - 3) as f64).sqrt() / denominator;
    let normal = Normal::new(0.0, 1.0).ok()?;
    let p_value = (2.0 * (1.0 - normal.cdf(z.abs()))).min(1.0);

    debug!("Steiger's test: z={:.4}, p={:.6}", z, p_value);
    Some(SteigerTest { z, p_value })
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn test_sample_variance_bessel() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_approx_eq!(sample_variance(&values).unwrap(), 32.0 / 7.0);
        assert_eq!(sample_variance(&[3.0]), None);
        assert_eq!(sample_variance(&[]), None);
    }

    #[test]
    fn test_quantile_interpolates() {
        let values = [4.0, 1.0, 3.0, 2.0];
        assert_approx_eq!(quantile(&values, 0.25).unwrap(), 1.75);
        assert_approx_eq!(quantile(&values, 0.5).unwrap(), 2.5);
        assert_approx_eq!(quantile(&values, 1.0).unwrap(), 4.0);
        assert_approx_eq!(quantile(&[7.0], 0.75).unwrap(), 7.0);
        assert_eq!(quantile(&[], 0.5), None);
        assert_eq!(quantile(&values, 1.5), None);
    }

    #[test]
    fn test_format_metric() {
        assert_eq!(format_metric(Some(0.25)), "0.250000");
        assert_eq!(format_metric(None), "NA");
    }

    #[test]
    fn test_mean() {
        assert_approx_eq!(mean(&[1.0, 2.0, 3.0]).unwrap(), 2.0);
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_rank_with_ties() {
        assert_eq!(rank(&[10.0, 20.0, 20.0, 5.0]), vec![2.0, 3.5, 3.5, 1.0]);
        assert_eq!(rank(&[1.0, 1.0, 1.0]), vec![2.0, 2.0, 2.0]);
    }

    #[test]
    fn pearson_r_test() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let y = vec![6.0, 7.0, 8.0, 9.0, 10.0, 11.0];
        assert_approx_eq!(pearson_r(&x, &y).unwrap(), 1.0);
        assert_eq!(pearson_r(&x, &[1.0; 6]), None);
    }

    #[test]
    fn test_spearman_monotone() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [1.0, 8.0, 27.0, 64.0, 125.0];
        assert_approx_eq!(spearman_rho(&x, &y).unwrap(), 1.0);
        let y_rev = [5.0, 4.0, 3.0, 2.0, 1.0];
        assert_approx_eq!(spearman_rho(&x, &y_rev).unwrap(), -1.0);
    }

    #[test]
    fn test_spearman_missing_policies() {
        let x = [Some(1.0), Some(2.0), None, Some(4.0), Some(5.0)];
        let y = [Some(2.0), Some(4.0), Some(100.0), Some(8.0), Some(10.0)];

        let omitted = spearman(&x, &y, MissingPolicy::Omit).unwrap();
        assert_eq!(omitted.n, 4);
        assert_approx_eq!(omitted.coefficient, 1.0);

        let zeroed = spearman(&x, &y, MissingPolicy::Zero).unwrap();
        assert_eq!(zeroed.n, 5);
        assert!(zeroed.coefficient < 1.0);
    }

    #[test]
    fn test_p_value_bounds() {
        let p = correlation_p_value(0.3, 20).unwrap();
        assert!(p > 0.0 && p < 1.0);
        assert_approx_eq!(correlation_p_value(0.0, 20).unwrap(), 1.0);
        assert_eq!(correlation_p_value(0.5, 2), None);
    }

    #[test]
    fn test_steiger_equal_correlations() {
        let result = steiger_test(0.5, 0.5, 0.3, 50).unwrap();
        assert_approx_eq!(result.z, 0.0);
        assert_approx_eq!(result.p_value, 1.0);
    }

    #[test]
    fn test_steiger_direction() {
        let result = steiger_test(0.7, 0.2, 0.3, 100).unwrap();
        assert!(result.z > 0.0);
        assert!(result.p_value < 0.05);
        assert_eq!(steiger_test(0.7, 0.2, 0.3, 3), None);
    }
}
