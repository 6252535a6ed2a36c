//! Property tests for derived metrics and chart layout.

use casegraph_config::ChartConfig;
use casegraph_data::{transform, RawRecord};
use casegraph_graphs::{build_chart_data, derive_metrics, pct_change, rolling_mean};
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

fn records_from_totals(totals: &[i64]) -> Vec<RawRecord> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 22).unwrap();
    totals
        .iter()
        .enumerate()
        .map(|(i, &confirmed)| RawRecord {
            country: "Singapore".to_string(),
            date: (start + Duration::days(i as i64)).format("%Y-%m-%d").to_string(),
            confirmed,
            deaths: 0,
            recovered: 0,
        })
        .collect()
}

/// Non-decreasing cumulative totals, zeros included.
fn cumulative_totals() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(0i64..1_000, 1..120).prop_map(|steps| {
        steps
            .into_iter()
            .scan(0i64, |total, step| {
                *total += step;
                Some(*total)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn days_since_threshold_counts_up_by_one(totals in cumulative_totals(), threshold in 0i64..5_000) {
        let series = transform(&records_from_totals(&totals), "Singapore").unwrap();
        let metrics = derive_metrics(&series, threshold, 7);
        let days = &metrics.t_since_threshold;

        match metrics.threshold_index {
            Some(start) => {
                prop_assert!(totals[start] > threshold);
                prop_assert!(days[..start].iter().all(|&d| d == -1));
                for (offset, &d) in days[start..].iter().enumerate() {
                    prop_assert_eq!(d, offset as i64);
                }
            }
            None => prop_assert!(days.iter().all(|&d| d == -1)),
        }
    }

    #[test]
    fn rolling_mean_is_finite_with_leading_zeros(totals in cumulative_totals()) {
        let means = rolling_mean(&pct_change(&totals), 7);
        prop_assert_eq!(means.len(), totals.len());
        prop_assert!(means.iter().all(|m| m.is_finite()));
        prop_assert!(means.iter().take(6).all(|&m| m == 0.0));
    }

    #[test]
    fn labels_stay_inside_the_axis(totals in cumulative_totals()) {
        let series = transform(&records_from_totals(&totals), "Singapore").unwrap();
        let config = ChartConfig { markers: vec![], ..ChartConfig::default() };
        let chart = build_chart_data(&series, &config).unwrap();

        prop_assert!(chart.y_max > 0.0);
        for label in &chart.latest_labels {
            prop_assert!(label.y >= 0.0 && label.y <= chart.y_max);
        }
        for band in &chart.month_bands {
            prop_assert!(band.x_start <= chart.x_max);
        }
    }
}
