//! HTTP client for the upstream per-country time series.

use crate::records::RawRecord;
use casegraph_common::{CaseGraphError, Result};
use casegraph_config::SourceConfig;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// One element of a country's list in the upstream payload.
#[derive(Debug, Deserialize)]
struct Observation {
    date: String,
    confirmed: i64,
    deaths: i64,
    recovered: i64,
}

/// Fetches the full multi-country feed in a single request.
#[derive(Debug, Clone)]
pub struct CaseFetcher {
    client: reqwest::Client,
    url: String,
}

impl CaseFetcher {
    /// Create a fetcher for `url`; the timeout bounds the whole request.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("casegraph/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CaseGraphError::fetch_with_source("Failed to create HTTP client", e))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Create a fetcher from the `source` configuration section.
    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        Self::new(config.url.clone(), Duration::from_secs(config.timeout_secs))
    }

    /// URL this fetcher requests.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Download and flatten every country's series.
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn fetch_all(&self) -> Result<Vec<RawRecord>> {
        info!("Fetching upstream time series");

        let response = self.client.get(&self.url).send().await.map_err(|e| {
            error!("Request failed: {}", e);
            CaseGraphError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("Upstream returned {}", status);
            return Err(CaseGraphError::fetch_with_status(
                format!("{} returned {}", self.url, status),
                status.as_u16(),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CaseGraphError::fetch_with_source("Failed to read response body", e))?;
        debug!("Received {} bytes", body.len());

        let records = parse_payload(&body)?;
        info!("Fetched {} records", records.len());
        Ok(records)
    }
}

/// Parse a `{country: [{date, confirmed, deaths, recovered}, ...]}` document
/// and attach the country name to every observation.
///
/// Countries are emitted in lexicographic order; each country's observations
/// keep their upstream order.
pub fn parse_payload(body: &str) -> Result<Vec<RawRecord>> {
    let by_country: BTreeMap<String, Vec<Observation>> = serde_json::from_str(body)?;

    let records = by_country
        .into_iter()
        .flat_map(|(country, observations)| {
            observations.into_iter().map(move |obs| RawRecord {
                country: country.clone(),
                date: obs.date,
                confirmed: obs.confirmed,
                deaths: obs.deaths,
                recovered: obs.recovered,
            })
        })
        .collect();

    Ok(records)
}
