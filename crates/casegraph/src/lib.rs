//! # casegraph
//!
//! Fetches the public COVID-19 time series, reshapes one country's rows,
//! derives growth statistics and renders an annotated case chart.
//!
//! The binary wires [`Args`] and the configuration loader into a
//! [`CaseGraphApp`] run.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod cli;

pub use app::*;
pub use cli::*;
