//! # casegraph graphs
//!
//! Derived statistics and chart generation for a country's case series.
//!
//! The work is split into plain stages: [`derive_metrics`] computes the
//! threshold and growth columns, [`build_chart_data`] lays out every line,
//! band and label as data, and a [`ChartRenderer`] draws the result.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod chart_data;
pub mod metrics;
pub mod pipeline;
pub mod renderer;

pub use chart_data::*;
pub use metrics::*;
pub use pipeline::*;
pub use renderer::*;
