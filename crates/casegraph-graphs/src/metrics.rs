//! Rolling and cumulative statistics over a country series.

use casegraph_data::CountrySeries;
use serde::Serialize;

/// Statistics computed once over a full series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedMetrics {
    /// First row whose `total` exceeds the threshold.
    pub threshold_index: Option<usize>,
    /// Rows since the threshold row, `-1` before it (or everywhere if never crossed).
    pub t_since_threshold: Vec<i64>,
    /// Day-over-day fractional change in `total`; non-finite values are `0.0`.
    pub pct_change: Vec<f64>,
    /// Trailing mean of `pct_change`; `0.0` until the window is full.
    pub pct_change_rolling_mean: Vec<f64>,
}

impl DerivedMetrics {
    /// Mean of the rolling mean column, leading zeros included.
    pub fn mean_rolling_pct_change(&self) -> f64 {
        mean(&self.pct_change_rolling_mean)
    }
}

/// First index with `total > threshold`; `None` when the threshold is never crossed.
pub fn threshold_index(totals: &[i64], threshold: i64) -> Option<usize> {
    totals.iter().position(|&total| total > threshold)
}

/// Days since the threshold row for each of `len` rows.
pub fn days_since_threshold(len: usize, threshold_index: Option<usize>) -> Vec<i64> {
    (0..len)
        .map(|i| match threshold_index {
            Some(start) if i >= start => (i - start) as i64,
            _ => -1,
        })
        .collect()
}

/// `(total[i] - total[i-1]) / total[i-1]`, with the first row and any
/// division by zero reported as `0.0`.
pub fn pct_change(totals: &[i64]) -> Vec<f64> {
    let mut changes = Vec::with_capacity(totals.len());
    if !totals.is_empty() {
        changes.push(0.0);
    }
    changes.extend(totals.windows(2).map(|pair| {
        let previous = pair[0] as f64;
        let change = (pair[1] as f64 - previous) / previous;
        if change.is_finite() {
            change
        } else {
            0.0
        }
    }));
    changes
}

/// Mean over the trailing `window` values; positions without a full window are `0.0`.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || values.len() < window {
        return vec![0.0; values.len()];
    }

    let mut means = vec![0.0; window - 1];
    means.extend(values.windows(window).map(|w| {
        let m = mean(w);
        if m.is_finite() {
            m
        } else {
            0.0
        }
    }));
    means
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Compute every derived column for `series`.
pub fn derive_metrics(series: &CountrySeries, threshold: i64, window: usize) -> DerivedMetrics {
    let totals = series.totals();
    let threshold_index = threshold_index(&totals, threshold);
    let pct_change = pct_change(&totals);
    let pct_change_rolling_mean = rolling_mean(&pct_change, window);

    DerivedMetrics {
        threshold_index,
        t_since_threshold: days_since_threshold(totals.len(), threshold_index),
        pct_change,
        pct_change_rolling_mean,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casegraph_common::test_utils::assert_approx_eq;

    #[test]
    fn test_threshold_scenario() {
        let totals = [50, 80, 150, 200];
        let index = threshold_index(&totals, 100);
        assert_eq!(index, Some(2));
        assert_eq!(days_since_threshold(totals.len(), index), vec![-1, -1, 0, 1]);
    }

    #[test]
    fn test_threshold_is_strict() {
        assert_eq!(threshold_index(&[99, 100, 101], 100), Some(2));
    }

    #[test]
    fn test_threshold_never_crossed() {
        let totals = [1, 5, 40];
        let index = threshold_index(&totals, 100);
        assert_eq!(index, None);
        assert_eq!(days_since_threshold(totals.len(), index), vec![-1, -1, -1]);
    }

    #[test]
    fn test_pct_change_with_zero_totals() {
        let changes = pct_change(&[0, 0, 5]);
        assert_eq!(changes.len(), 3);
        assert_eq!(changes[0], 0.0);
        assert_eq!(changes[1], 0.0);
        assert!(changes[2].is_finite());
    }

    #[test]
    fn test_pct_change_values() {
        let changes = pct_change(&[10, 15, 30]);
        assert_approx_eq(changes[1], 0.5, 1e-12);
        assert_approx_eq(changes[2], 1.0, 1e-12);
    }

    #[test]
    fn test_pct_change_empty() {
        assert!(pct_change(&[]).is_empty());
    }

    #[test]
    fn test_rolling_mean_window() {
        let values: Vec<f64> = (1..=9).map(f64::from).collect();
        let means = rolling_mean(&values, 7);
        assert_eq!(&means[..6], &[0.0; 6]);
        assert_approx_eq(means[6], 4.0, 1e-12);
        assert_approx_eq(means[7], 5.0, 1e-12);
        assert_approx_eq(means[8], 6.0, 1e-12);
    }

    #[test]
    fn test_rolling_mean_short_input() {
        assert_eq!(rolling_mean(&[0.5, 0.5], 7), vec![0.0, 0.0]);
        assert_eq!(rolling_mean(&[0.5, 0.5], 0), vec![0.0, 0.0]);
    }

    #[test]
    fn test_mean_rolling_pct_change() {
        let metrics = DerivedMetrics {
            threshold_index: None,
            t_since_threshold: vec![],
            pct_change: vec![],
            pct_change_rolling_mean: vec![0.0, 0.0, 0.3, 0.5],
        };
        assert_approx_eq(metrics.mean_rolling_pct_change(), 0.2, 1e-12);
    }
}
