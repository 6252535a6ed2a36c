//! Plain chart data derived from a country series.
//!
//! Everything the renderer draws is computed here, so the numbers behind the
//! picture can be checked without rasterising anything.

use casegraph_common::{month_abbrev, month_day, parse_date, CaseGraphError, Result};
use casegraph_config::{ChartConfig, MarkerConfig};
use casegraph_data::{CountryRow, CountrySeries};
use chrono::Datelike;
use serde::Serialize;
use tracing::debug;

/// Headroom above the largest `total`.
pub const Y_HEADROOM: f64 = 1.2;
/// Upper edge of the month band layer, as a fraction of `y_max`.
pub const MONTH_BAND_TOP: f64 = 0.1;
/// Height of the month labels, as a fraction of `y_max`.
pub const MONTH_LABEL_Y: f64 = 0.07;
/// First marker label height, as a fraction of `y_max`.
pub const MARKER_LABEL_TOP: f64 = 0.98;
/// Vertical step between marker labels, as a fraction of `y_max`.
pub const MARKER_LABEL_STEP: f64 = 0.05;
/// Horizontal offset of marker and month labels from their row.
pub const LABEL_X_NUDGE: f64 = 0.5;
/// Rows to the left of the last row where latest-value labels start.
pub const LATEST_LABEL_INSET: f64 = 2.0;

/// The four plotted series, in legend order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Metric {
    /// Cumulative confirmed cases.
    Total,
    /// Currently active cases.
    Active,
    /// Cumulative recoveries.
    Discharged,
    /// Cumulative deaths.
    Deaths,
}

impl Metric {
    /// All metrics in drawing order.
    pub const ALL: [Self; 4] = [Self::Total, Self::Active, Self::Discharged, Self::Deaths];

    /// Column name used in the legend.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Total => "total",
            Self::Active => "active",
            Self::Discharged => "discharged",
            Self::Deaths => "deaths",
        }
    }

    /// Value of this metric in a row.
    pub const fn value(self, row: &CountryRow) -> i64 {
        match self {
            Self::Total => row.total,
            Self::Active => row.active,
            Self::Discharged => row.discharged,
            Self::Deaths => row.deaths,
        }
    }
}

/// One plotted line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricLine {
    /// Which metric.
    pub metric: Metric,
    /// Line colour.
    pub color: String,
    /// One value per row.
    pub values: Vec<i64>,
}

/// A filled rectangle in data coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Band {
    /// Left edge, in rows.
    pub x_start: f64,
    /// Right edge, in rows.
    pub x_end: f64,
    /// Bottom edge.
    pub y_low: f64,
    /// Top edge.
    pub y_high: f64,
    /// Fill colour.
    pub color: String,
}

/// Text anchored at a data coordinate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLabel {
    /// Text to draw.
    pub text: String,
    /// Anchor x, in rows.
    pub x: f64,
    /// Anchor y, in cases.
    pub y: f64,
    /// Text colour.
    pub color: String,
}

/// A configured marker resolved to a row of the series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodMarker {
    /// Era description.
    pub label: String,
    /// Canonical start date.
    pub date: String,
    /// Row of `date` in the series.
    pub row_index: usize,
    /// Band colour.
    pub color: String,
}

/// First row of a calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBoundary {
    /// Month abbreviation, e.g. `FEB`.
    pub label: String,
    /// Canonical date of the first row in the month.
    pub date: String,
    /// Row of `date` in the series.
    pub row_index: usize,
}

/// Everything needed to draw the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    /// Chart caption.
    pub title: String,
    /// X axis description.
    pub x_label: String,
    /// Y axis description.
    pub y_label: String,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Canvas colour.
    pub background: String,
    /// Grid line colour.
    pub grid: String,
    /// Index of the last row; bands extend to here.
    pub x_max: f64,
    /// `max(total) * 1.2`, floored at `1.0`.
    pub y_max: f64,
    /// One line per metric, in legend order.
    pub lines: Vec<MetricLine>,
    /// `(row, "MM-DD")` every `tick_every` rows.
    pub x_ticks: Vec<(usize, String)>,
    /// Month boundaries after the first month.
    pub months: Vec<MonthBoundary>,
    /// Resolved policy era markers.
    pub markers: Vec<PeriodMarker>,
    /// Lower layer: alternating month shading.
    pub month_bands: Vec<Band>,
    /// Upper layer: one band per policy era.
    pub era_bands: Vec<Band>,
    /// `"<date>: <label>"` per marker, stepping down from the top.
    pub marker_labels: Vec<TextLabel>,
    /// Month abbreviations inside the month band layer.
    pub month_labels: Vec<TextLabel>,
    /// Last value of each metric, beside its line.
    pub latest_labels: Vec<TextLabel>,
    /// Credit line under the plot.
    pub footnote: String,
}

/// Upper y bound: `max(total) * 1.2`, or `1.0` when every total is zero.
pub fn y_axis_bound(series: &CountrySeries) -> f64 {
    let max_total = series.totals().into_iter().max().unwrap_or(0);
    let bound = max_total as f64 * Y_HEADROOM;
    if bound > 0.0 {
        bound
    } else {
        1.0
    }
}

/// Resolve each marker's date to a row.
///
/// Fails with [`CaseGraphError::MarkerDateNotFound`] on the first marker the
/// series does not cover.
pub fn resolve_markers(series: &CountrySeries, markers: &[MarkerConfig]) -> Result<Vec<PeriodMarker>> {
    markers
        .iter()
        .map(|marker| {
            let row_index = series.index_of(&marker.date).ok_or_else(|| {
                CaseGraphError::MarkerDateNotFound {
                    label: marker.label.clone(),
                    date: marker.date.clone(),
                    first: series.first_date().unwrap_or_default().to_string(),
                    last: series.last_date().unwrap_or_default().to_string(),
                }
            })?;
            Ok(PeriodMarker {
                label: marker.label.clone(),
                date: marker.date.clone(),
                row_index,
                color: marker.color.clone(),
            })
        })
        .collect()
}

/// First row of every month after the month containing row 0.
pub fn month_boundaries(series: &CountrySeries) -> Vec<MonthBoundary> {
    let mut boundaries = Vec::new();
    let mut current: Option<(i32, u32)> = None;

    for (row_index, row) in series.rows().iter().enumerate() {
        let Ok(date) = parse_date(&row.date) else {
            continue;
        };
        let month = (date.year(), date.month());
        match current {
            None => current = Some(month),
            Some(seen) if seen != month => {
                boundaries.push(MonthBoundary {
                    label: month_abbrev(date),
                    date: row.date.clone(),
                    row_index,
                });
                current = Some(month);
            }
            Some(_) => {}
        }
    }
    boundaries
}

/// Lay out every line, band and label of the chart.
///
/// `y_max` is fixed first; all vertical placements are fractions of it.
pub fn build_chart_data(series: &CountrySeries, config: &ChartConfig) -> Result<ChartData> {
    let latest = series
        .latest()
        .ok_or_else(|| CaseGraphError::graph("Cannot chart an empty series"))?;

    let y_max = y_axis_bound(series);
    let x_max = (series.len() - 1) as f64;

    let markers = resolve_markers(series, &config.markers)?;
    let months = month_boundaries(series);
    debug!(
        y_max,
        markers = markers.len(),
        months = months.len(),
        "Resolved chart annotations"
    );

    let colors = &config.colors;
    let line_color = |metric: Metric| match metric {
        Metric::Total => colors.total.clone(),
        Metric::Active => colors.active.clone(),
        Metric::Discharged => colors.discharged.clone(),
        Metric::Deaths => colors.deaths.clone(),
    };
    let offsets = &config.label_offsets;
    let label_offset = |metric: Metric| match metric {
        Metric::Total => offsets.total,
        Metric::Active => offsets.active,
        Metric::Discharged => offsets.discharged,
        Metric::Deaths => offsets.deaths,
    };

    let lines = Metric::ALL
        .iter()
        .map(|&metric| MetricLine {
            metric,
            color: line_color(metric),
            values: series.column(|row| metric.value(row)),
        })
        .collect();

    let mut month_bands = vec![Band {
        x_start: 0.0,
        x_end: x_max,
        y_low: 0.0,
        y_high: y_max * MONTH_BAND_TOP,
        color: colors.month_odd.clone(),
    }];
    month_bands.extend(months.iter().enumerate().map(|(k, month)| Band {
        x_start: month.row_index as f64,
        x_end: x_max,
        y_low: 0.0,
        y_high: y_max * MONTH_BAND_TOP,
        color: if k % 2 == 0 {
            colors.month_even.clone()
        } else {
            colors.month_odd.clone()
        },
    }));

    let era_bands = markers
        .iter()
        .map(|marker| Band {
            x_start: marker.row_index as f64,
            x_end: x_max,
            y_low: y_max * MONTH_BAND_TOP,
            y_high: y_max,
            color: marker.color.clone(),
        })
        .collect();

    let marker_labels = markers
        .iter()
        .enumerate()
        .map(|(k, marker)| TextLabel {
            text: format!("{}: {}", marker.date, marker.label),
            x: marker.row_index as f64 + LABEL_X_NUDGE,
            y: y_max * MARKER_LABEL_STEP.mul_add(-((k + 1) as f64), MARKER_LABEL_TOP),
            color: colors.marker_text.clone(),
        })
        .collect();

    let month_labels = months
        .iter()
        .map(|month| TextLabel {
            text: month.label.clone(),
            x: month.row_index as f64 + LABEL_X_NUDGE,
            y: y_max * MONTH_LABEL_Y,
            color: "BLACK".to_string(),
        })
        .collect();

    let latest_labels = Metric::ALL
        .iter()
        .map(|&metric| {
            let value = metric.value(latest);
            TextLabel {
                text: value.to_string(),
                x: (x_max - LATEST_LABEL_INSET).max(0.0),
                y: label_offset(metric)
                    .mul_add(y_max, value as f64)
                    .clamp(0.0, y_max),
                color: line_color(metric),
            }
        })
        .collect();

    let x_ticks = series
        .rows()
        .iter()
        .enumerate()
        .step_by(config.tick_every.max(1))
        .filter_map(|(i, row)| parse_date(&row.date).ok().map(|d| (i, month_day(d))))
        .collect();

    Ok(ChartData {
        title: config.title_for(series.country()),
        x_label: "Date".to_string(),
        y_label: "No. of Cases".to_string(),
        width: config.width,
        height: config.height,
        background: colors.background.clone(),
        grid: colors.grid.clone(),
        x_max,
        y_max,
        lines,
        x_ticks,
        months,
        markers,
        month_bands,
        era_bands,
        marker_labels,
        month_labels,
        latest_labels,
        footnote: config.footnote.clone(),
    })
}
