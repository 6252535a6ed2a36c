//! One end-to-end chart run.

use casegraph_common::Result;
use casegraph_config::Config;
use casegraph_data::{transform, CaseFetcher};
use casegraph_graphs::{derive_and_render, ChartRenderer, ChartReport};
use tracing::info;

/// Runs fetch, transform, derive and render for the configured country.
#[derive(Debug, Clone)]
pub struct CaseGraphApp {
    config: Config,
}

impl CaseGraphApp {
    /// Creates a new application for a validated configuration.
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Configuration this app runs with.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Fetch from the configured source and render with `renderer`.
    pub async fn run<R>(&self, renderer: &R) -> Result<ChartReport>
    where
        R: ChartRenderer + ?Sized,
    {
        let fetcher = CaseFetcher::from_config(&self.config.source)?;
        self.run_with(&fetcher, renderer).await
    }

    /// Same as [`run`](Self::run) with an explicit fetcher.
    pub async fn run_with<R>(&self, fetcher: &CaseFetcher, renderer: &R) -> Result<ChartReport>
    where
        R: ChartRenderer + ?Sized,
    {
        let records = fetcher.fetch_all().await?;
        let series = transform(&records, &self.config.data.country)?;
        let report = derive_and_render(&series, &self.config.data, &self.config.chart, renderer)?;

        info!(
            country = %self.config.data.country,
            path = %report.rendered.path.display(),
            rows = series.len(),
            "Chart written"
        );
        Ok(report)
    }
}
