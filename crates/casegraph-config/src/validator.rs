//! Runtime validation of a loaded configuration.

use crate::schema::{ChartConfig, Config};
use casegraph_common::{is_canonical_date, parse_rgb, CaseGraphError, LogFormat, Result};

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        Self::validate_source(config)?;
        Self::validate_data(config)?;
        Self::validate_chart(&config.chart)?;
        config.logging.format.parse::<LogFormat>()?;
        Ok(())
    }

    fn validate_source(config: &Config) -> Result<()> {
        let url = url::Url::parse(&config.source.url).map_err(|e| {
            CaseGraphError::config_with_source(
                format!("source.url '{}' is not a valid URL", config.source.url),
                e,
            )
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CaseGraphError::config(format!(
                "source.url must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if config.source.timeout_secs == 0 {
            return Err(CaseGraphError::config(
                "source.timeout_secs must be greater than 0",
            ));
        }
        Ok(())
    }

    fn validate_data(config: &Config) -> Result<()> {
        if config.data.country.trim().is_empty() {
            return Err(CaseGraphError::config("data.country cannot be empty"));
        }
        if config.data.rolling_window == 0 {
            return Err(CaseGraphError::config(
                "data.rolling_window must be greater than 0",
            ));
        }
        Ok(())
    }

    fn validate_chart(chart: &ChartConfig) -> Result<()> {
        if chart.width == 0 || chart.height == 0 {
            return Err(CaseGraphError::config(
                "chart.width and chart.height must be greater than 0",
            ));
        }
        if chart.tick_every == 0 {
            return Err(CaseGraphError::config(
                "chart.tick_every must be greater than 0",
            ));
        }

        for (i, marker) in chart.markers.iter().enumerate() {
            if marker.label.trim().is_empty() {
                return Err(CaseGraphError::config(format!(
                    "chart.markers[{i}].label cannot be empty"
                )));
            }
            if !is_canonical_date(&marker.date) {
                return Err(CaseGraphError::config(format!(
                    "chart.markers[{i}].date '{}' must be YYYY-MM-DD",
                    marker.date
                )));
            }
            Self::validate_color(&format!("chart.markers[{i}].color"), &marker.color)?;
        }

        let colors = &chart.colors;
        for (field, value) in [
            ("total", &colors.total),
            ("active", &colors.active),
            ("discharged", &colors.discharged),
            ("deaths", &colors.deaths),
            ("month_even", &colors.month_even),
            ("month_odd", &colors.month_odd),
            ("marker_text", &colors.marker_text),
            ("background", &colors.background),
            ("grid", &colors.grid),
        ] {
            Self::validate_color(&format!("chart.colors.{field}"), value)?;
        }

        let offsets = &chart.label_offsets;
        if [offsets.total, offsets.active, offsets.discharged, offsets.deaths]
            .iter()
            .any(|offset| !offset.is_finite())
        {
            return Err(CaseGraphError::config(
                "chart.label_offsets must be finite numbers",
            ));
        }
        Ok(())
    }

    fn validate_color(field: &str, value: &str) -> Result<()> {
        parse_rgb(value).map(|_| ()).ok_or_else(|| {
            CaseGraphError::config(format!("{field} '{value}' is not a known colour"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::MarkerConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_rejects_non_http_url() {
        let mut config = Config::default();
        config.source.url = "ftp://example.com/timeseries.json".to_string();
        assert!(ConfigValidator::validate(&config).is_err());

        config.source.url = "not a url".to_string();
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_rejects_zero_timeout_and_window() {
        let mut config = Config::default();
        config.source.timeout_secs = 0;
        assert!(ConfigValidator::validate(&config).is_err());

        let mut config = Config::default();
        config.data.rolling_window = 0;
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_rejects_non_canonical_marker_date() {
        let mut config = Config::default();
        config.chart.markers.push(MarkerConfig {
            label: "Phase 3 Begins".to_string(),
            date: "2020-12-8".to_string(),
            color: "THISTLE".to_string(),
        });
        let error = ConfigValidator::validate(&config).unwrap_err();
        assert!(error.to_string().contains("chart.markers[7].date"));
    }

    #[test]
    fn test_rejects_unknown_colour() {
        let mut config = Config::default();
        config.chart.colors.total = "chartreuse-ish".to_string();
        let error = ConfigValidator::validate(&config).unwrap_err();
        assert!(error.to_string().contains("chart.colors.total"));
    }

    #[test]
    fn test_rejects_unknown_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(ConfigValidator::validate(&config).is_err());
    }
}
