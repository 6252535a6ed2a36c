//! Error types and utilities for casegraph

use thiserror::Error;

/// Result type alias for casegraph operations
pub type Result<T> = std::result::Result<T, CaseGraphError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for casegraph operations.
///
/// Every variant is fatal to a run; nothing in the pipeline recovers locally.
#[derive(Error, Debug)]
pub enum CaseGraphError {
    /// Transport failure, timeout or non-success status from the upstream feed
    #[error("Fetch error: {message}")]
    Fetch {
        /// What failed, including the URL or status when known
        message: String,
        /// HTTP status, when the server answered
        status: Option<u16>,
        /// Underlying transport error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Upstream payload did not match the expected shape
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the malformed content
        message: String,
        /// Underlying deserialization error
        #[source]
        source: Option<BoxedSource>,
    },

    /// No upstream rows for the requested country
    #[error("Unknown country: no records for '{country}'")]
    UnknownCountry {
        /// Requested country name
        country: String,
    },

    /// A configured period marker has no row in the fetched series
    #[error(
        "Marker '{label}' date {date} not found in series (series covers {first} to {last})"
    )]
    MarkerDateNotFound {
        /// Marker label
        label: String,
        /// Marker date
        date: String,
        /// First date in the series
        first: String,
        /// Last date in the series
        last: String,
    },

    /// A date field does not match `YYYY-MM-DD`
    #[error("Date parse error: '{value}' for {country} at row {row}")]
    DateParse {
        /// Offending date text
        value: String,
        /// Country being transformed
        country: String,
        /// Row within that country's records
        row: usize,
        /// Underlying chrono error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Duplicate or out-of-order dates within one country's series
    #[error("Unordered dates for {country} at row {row}: {date} does not follow {previous}")]
    UnorderedDates {
        /// Country being transformed
        country: String,
        /// Row of the offending date
        row: usize,
        /// Date of the preceding row
        previous: String,
        /// Offending date
        date: String,
    },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        /// Which setting is wrong and why
        message: String,
        /// Underlying parse error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Graph generation and plotting errors
    #[error("Graph error: {message}")]
    Graph {
        /// What could not be drawn
        message: String,
        /// Underlying drawing error
        #[source]
        source: Option<BoxedSource>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CaseGraphError {
    /// Create a new fetch error
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch {
            message: msg.into(),
            status: None,
            source: None,
        }
    }

    /// Create a new fetch error with the HTTP status that caused it
    pub fn fetch_with_status(msg: impl Into<String>, status: u16) -> Self {
        Self::Fetch {
            message: msg.into(),
            status: Some(status),
            source: None,
        }
    }

    /// Create a new fetch error with source
    pub fn fetch_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Fetch {
            message: msg.into(),
            status: None,
            source: Some(Box::new(source)),
        }
    }

    /// Create a new parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new parse error with source
    pub fn parse_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Parse {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an unknown country error
    pub fn unknown_country(country: impl Into<String>) -> Self {
        Self::UnknownCountry {
            country: country.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new graph error
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new graph error with source
    pub fn graph_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Graph {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// HTTP status attached to a fetch error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Fetch { status, .. } => *status,
            _ => None,
        }
    }
}

/// Convert from reqwest::Error to CaseGraphError
impl From<reqwest::Error> for CaseGraphError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::fetch_with_source("Request timeout", err)
        } else if err.is_connect() {
            Self::fetch_with_source("Connection failed", err)
        } else if let Some(status) = err.status() {
            Self::Fetch {
                message: format!("HTTP error: {}", status.as_u16()),
                status: Some(status.as_u16()),
                source: Some(Box::new(err)),
            }
        } else {
            Self::fetch_with_source("Network request failed", err)
        }
    }
}

/// Convert from serde_json::Error to CaseGraphError
impl From<serde_json::Error> for CaseGraphError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse_with_source(format!("Malformed payload: {err}"), err)
    }
}

/// Convert from serde_yaml::Error to CaseGraphError
impl From<serde_yaml::Error> for CaseGraphError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::config_with_source("YAML parsing error", err)
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to CaseGraphError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for CaseGraphError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::graph_with_source("Graph rendering failed", err)
    }
}
