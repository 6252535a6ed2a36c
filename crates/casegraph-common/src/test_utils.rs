//! Test utilities and shared fixtures for the casegraph workspace.
//!
//! Enabled for downstream crates through the `testing` feature.

use chrono::{Duration, NaiveDate};
use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Upstream feed fixtures.
pub mod feed_fixtures {
    use super::{Duration, NaiveDate};
    use serde_json::{json, Map, Value};

    /// One upstream observation: `(confirmed, deaths, recovered)`.
    pub type Counts = (i64, i64, i64);

    /// Consecutive unpadded upstream dates (`2020-1-22`, `2020-1-23`, ...).
    pub fn upstream_dates(start: NaiveDate, count: usize) -> Vec<String> {
        (0..count)
            .map(|i| {
                let date = start + Duration::days(i as i64);
                date.format("%Y-%-m-%-d").to_string()
            })
            .collect()
    }

    /// Build a per-country observation list starting at `start`.
    pub fn country_series(start: NaiveDate, counts: &[Counts]) -> Value {
        let dates = upstream_dates(start, counts.len());
        Value::Array(
            dates
                .iter()
                .zip(counts)
                .map(|(date, (confirmed, deaths, recovered))| {
                    json!({
                        "date": date,
                        "confirmed": confirmed,
                        "deaths": deaths,
                        "recovered": recovered,
                    })
                })
                .collect(),
        )
    }

    /// Build a full upstream payload from `(country, start, counts)` triples.
    pub fn payload(countries: &[(&str, NaiveDate, &[Counts])]) -> String {
        let mut map = Map::new();
        for (country, start, counts) in countries {
            map.insert((*country).to_string(), country_series(*start, counts));
        }
        Value::Object(map).to_string()
    }

    /// First day of the upstream feed.
    pub fn feed_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 22).expect("valid fixture date")
    }

    /// Small two-country payload used across crates.
    pub fn sample_payload() -> String {
        payload(&[
            (
                "Singapore",
                feed_start(),
                &[(0, 0, 0), (1, 0, 0), (3, 0, 0), (7, 0, 1), (13, 0, 2)],
            ),
            (
                "Malaysia",
                feed_start(),
                &[(0, 0, 0), (0, 0, 0), (3, 0, 0), (4, 0, 0), (4, 0, 1)],
            ),
        ])
    }

    /// Cumulative totals with roughly exponential growth, `(confirmed, deaths, recovered)`.
    pub fn growth_counts(days: usize) -> Vec<Counts> {
        (0..days)
            .map(|i| {
                let confirmed = (1.12_f64.powi(i as i32) * 3.0).round() as i64;
                let recovered = confirmed * 2 / 5;
                let deaths = confirmed / 100;
                (confirmed, deaths, recovered)
            })
            .collect()
    }
}
