//! Default values reproducing the Singapore chart.

use crate::schema::*;
use std::path::PathBuf;

/// Upstream feed of the Johns Hopkins CSSE data, reshaped per country.
pub const DEFAULT_SOURCE_URL: &str = "https://pomber.github.io/covid19/timeseries.json";

/// Country charted when none is configured.
pub const DEFAULT_COUNTRY: &str = "Singapore";

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            data: DataConfig::default(),
            chart: ChartConfig::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            country: DEFAULT_COUNTRY.to_string(),
            threshold_cases: 100,
            rolling_window: 7,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("casegraph.png"),
            width: 1600,
            height: 800,
            title: None,
            tick_every: 7,
            footnote: "Based on COVID Data Repository by Johns Hopkins CSSE\n\
                       News updates by CNA, Straits Times"
                .to_string(),
            markers: default_markers(),
            colors: ColorsConfig::default(),
            label_offsets: LabelOffsets::default(),
        }
    }
}

fn marker(label: &str, date: &str, color: &str) -> MarkerConfig {
    MarkerConfig {
        label: label.to_string(),
        date: date.to_string(),
        color: color.to_string(),
    }
}

/// Singapore policy eras.
pub fn default_markers() -> Vec<MarkerConfig> {
    vec![
        marker("First case detected", "2020-01-23", "PEACHPUFF"),
        marker("Dorscon Orange Declared", "2020-02-07", "PAPAYAWHIP"),
        marker("Circuit Breaker Begins", "2020-04-07", "MOCCASIN"),
        marker("Circuit Breaker Tighter Measures Start", "2020-04-21", "PEACHPUFF"),
        marker("Circuit Breaker Measures Relaxed", "2020-05-12", "MOCCASIN"),
        marker("Phase 1 Begins", "2020-06-02", "THISTLE"),
        marker("Phase 2 Begins", "2020-06-19", "LIGHTGREEN"),
    ]
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            total: "FIREBRICK".to_string(),
            active: "DARKGREEN".to_string(),
            discharged: "NAVY".to_string(),
            deaths: "DARKSLATEGRAY".to_string(),
            month_even: "WHITESMOKE".to_string(),
            month_odd: "SILVER".to_string(),
            marker_text: "BROWN".to_string(),
            background: "#ffffff".to_string(),
            grid: "LIGHTGRAY".to_string(),
        }
    }
}

impl Default for LabelOffsets {
    fn default() -> Self {
        Self {
            total: 0.02,
            active: 0.07,
            discharged: -0.06,
            deaths: 0.01,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}
