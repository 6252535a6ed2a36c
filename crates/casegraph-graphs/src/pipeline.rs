//! Derivation and rendering of one country series.

use crate::chart_data::{build_chart_data, ChartData};
use crate::metrics::{derive_metrics, DerivedMetrics};
use crate::renderer::{ChartRenderer, RenderedChart};
use casegraph_common::Result;
use casegraph_config::{ChartConfig, DataConfig};
use casegraph_data::CountrySeries;
use tracing::{info, instrument};

/// Everything produced for one series.
#[derive(Debug, Clone)]
pub struct ChartReport {
    /// Threshold and growth statistics.
    pub metrics: DerivedMetrics,
    /// The laid-out chart.
    pub chart: ChartData,
    /// Where the chart was drawn.
    pub rendered: RenderedChart,
}

/// Derive metrics, lay out the chart and hand it to `renderer`.
///
/// Marker resolution happens while building the chart data, so a bad marker
/// date fails before the renderer is called.
#[instrument(skip_all, fields(country = series.country(), renderer = renderer.name()))]
pub fn derive_and_render<R>(
    series: &CountrySeries,
    data_config: &DataConfig,
    chart_config: &ChartConfig,
    renderer: &R,
) -> Result<ChartReport>
where
    R: ChartRenderer + ?Sized,
{
    let metrics = derive_metrics(series, data_config.threshold_cases, data_config.rolling_window);
    info!(
        threshold = data_config.threshold_cases,
        threshold_index = ?metrics.threshold_index,
        mean_rolling_pct_change = metrics.mean_rolling_pct_change(),
        "Derived metrics"
    );

    let chart = build_chart_data(series, chart_config)?;
    let rendered = renderer.render_to_file(&chart, &chart_config.output)?;

    Ok(ChartReport {
        metrics,
        chart,
        rendered,
    })
}
