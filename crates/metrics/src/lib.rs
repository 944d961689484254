//! Derives chart data from weekly business KPI series.
//!
//! A [Dataset] groups weekly [Record]s by [Category]. For every [MetricSpec] of
//! a [MetricCatalog] the pipeline computes the time axis month buckets, the
//! value axis ticks, the extrema of the series and the period-over-period
//! trend, and assembles them into a [ChartView] ready to be rendered.
//!
//! Everything in this crate is a pure function of its input; fetching the
//! data and scheduling the reload checks is left to the caller.

pub mod axis;
pub mod calendar;
pub mod dataset;
pub mod error;
pub mod metric;
pub mod pipeline;
pub mod record;
pub mod refresh;
pub mod stats;
pub mod trend;

pub use crate::dataset::Dataset;
pub use crate::metric::MetricCatalog;
pub use crate::metric::MetricSpec;
pub use crate::pipeline::ChartView;
pub use crate::pipeline::Dashboard;
pub use crate::record::Category;
pub use crate::record::Record;
pub use crate::record::Series;
