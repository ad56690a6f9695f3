//! # Autoviz - tabular data exploration
//!
//! Autoviz loads a CSV file, infers a type for every column, and answers the
//! questions an exploration front end asks about it: what columns are there,
//! what does a chart of one column against another look like, how well does a
//! straight line fit two numeric columns, and what are the descriptive
//! statistics of the whole table.
//!
//! ## Quick Start
//!
//! ```no_run
//! use autoviz::analyser::logic::{self, Aggregation, ChartSpec};
//!
//! # fn example() -> autoviz::error::Result<()> {
//! let dataset = logic::load(std::fs::read("sales.csv")?.as_slice())?;
//!
//! for profile in logic::inspect(&dataset) {
//!     println!("{}: {} ({} distinct)", profile.name, profile.kind, profile.cardinality);
//! }
//!
//! let chart = logic::aggregate(
//!     &dataset,
//!     &ChartSpec::bar("Department", "Profit", Aggregation::Sum),
//! )?;
//! let fit = logic::fit_ols(&dataset, "Revenue", "Profit")?;
//! println!("{}: R² = {:.3}", chart.title(), fit.r_squared);
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`analyser`]: loading, profiling and analysis
//!   - [`analyser::logic`]: pure functions over a [`analyser::logic::Dataset`]
//!   - [`analyser::workspace`]: the currently loaded dataset, swapped atomically on reload
//! - [`config`]: loader settings read from JSON
//! - [`error`]: error types and handling utilities
//! - [`logging`]: `env_logger` setup for the binary
//! - [`utils`]: formatting helpers

#![warn(clippy::all, rust_2018_idioms)]

pub mod analyser;
pub mod config;
pub mod error;
pub mod logging;
pub mod utils;

pub use analyser::Workspace;
pub use config::AnalysisConfig;
pub use error::{AutovizError, Result};
