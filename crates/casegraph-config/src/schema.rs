//! Configuration schema definitions using serde.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for casegraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Upstream feed configuration.
    pub source: SourceConfig,
    /// Country selection and metric parameters.
    pub data: DataConfig,
    /// Chart output and annotation configuration.
    pub chart: ChartConfig,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

/// Upstream time-series feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// URL of the JSON time series.
    pub url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

/// Data selection and derived metric parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Country to chart, matched exactly against the feed's keys.
    pub country: String,
    /// Rows with `total` strictly above this count start the days-since clock.
    pub threshold_cases: i64,
    /// Trailing window length for the percent-change rolling mean.
    pub rolling_window: usize,
}

/// Chart output, annotation and styling configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Output image path (PNG).
    pub output: PathBuf,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Chart title; `None` uses "No. of cases in <country>, daily".
    pub title: Option<String>,
    /// Number of rows between x axis tick labels.
    pub tick_every: usize,
    /// Credit line drawn under the chart.
    pub footnote: String,
    /// Policy era markers, resolved against the series by exact date.
    pub markers: Vec<MarkerConfig>,
    /// Line and band colours.
    pub colors: ColorsConfig,
    /// Vertical offsets of the latest-value labels as fractions of the y bound.
    pub label_offsets: LabelOffsets,
}

/// A dated policy era marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerConfig {
    /// Text drawn next to the marker.
    pub label: String,
    /// Canonical `YYYY-MM-DD` date.
    pub date: String,
    /// Fill colour of the era band starting at this marker.
    pub color: String,
}

/// Colour configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    /// `total` line.
    pub total: String,
    /// `active` line.
    pub active: String,
    /// `discharged` line.
    pub discharged: String,
    /// `deaths` line.
    pub deaths: String,
    /// Month band fill for even months.
    pub month_even: String,
    /// Month band fill for odd months.
    pub month_odd: String,
    /// Marker label text.
    pub marker_text: String,
    /// Chart background.
    pub background: String,
    /// Grid lines.
    pub grid: String,
}

/// Latest-value label offsets, each a fraction of the y axis bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelOffsets {
    /// Offset of the `total` label.
    pub total: f64,
    /// Offset of the `active` label.
    pub active: f64,
    /// Offset of the `discharged` label.
    pub discharged: f64,
    /// Offset of the `deaths` label.
    pub deaths: f64,
}

/// Logging settings read from the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `info` or `casegraph=debug`.
    pub level: String,
    /// One of `pretty`, `compact` or `json`.
    pub format: String,
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> casegraph_common::Result<()> {
        crate::validator::ConfigValidator::validate(self)
    }
}

impl ChartConfig {
    /// Title for the given country, honouring an explicit override.
    pub fn title_for(&self, country: &str) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("No. of cases in {country}, daily"))
    }
}
