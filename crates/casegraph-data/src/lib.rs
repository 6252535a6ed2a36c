//! # casegraph data
//!
//! Ingestion and reshaping of the upstream COVID-19 time series.
//!
//! [`CaseFetcher`] downloads the multi-country feed and flattens it into
//! [`RawRecord`]s; [`transform`] turns those into one country's
//! [`CountrySeries`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod fetcher;
pub mod records;
pub mod transform;

pub use fetcher::*;
pub use records::*;
pub use transform::*;
