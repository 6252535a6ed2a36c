//! # casegraph common
//!
//! Shared error taxonomy, logging bootstrap and date helpers for the casegraph workspace.
//!
//! This crate provides the foundational types and utilities used across
//! all other crates in the workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod color;
pub mod error;
pub mod logging;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use color::*;
pub use error::*;
pub use logging::*;
pub use utils::*;
