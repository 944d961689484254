//! [kpiboard]'s visualization library.
//!
//! Renders a [Dashboard](kpiboard_metrics::Dashboard) into a static single-page
//! HTML dashboard with one Plotly line chart per metric.
//!
//! [kpiboard]: https://crates.io/crates/kpiboard

#![warn(missing_docs)]

pub(crate) mod chart;
pub(crate) mod template;

pub mod error;
pub mod layout;
