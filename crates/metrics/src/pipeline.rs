use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use tracing::debug;

use crate::axis;
use crate::axis::DEFAULT_TICK_COUNT;
use crate::calendar;
use crate::calendar::ReferenceTick;
use crate::dataset::Dataset;
use crate::metric::MetricCatalog;
use crate::metric::MetricSpec;
use crate::record::Series;
use crate::stats;
use crate::stats::ExtremePoint;
use crate::stats::SeriesStats;
use crate::trend;
use crate::trend::Trend;

/// The render-ready data of one dashboard chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartView {
    Ready(ChartModel),
    Empty(EmptyChart),
}

impl ChartView {
    pub fn title(&self) -> &str {
        match self {
            ChartView::Ready(chart) => &chart.title,
            ChartView::Empty(chart) => &chart.title,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            ChartView::Ready(chart) => &chart.id,
            ChartView::Empty(chart) => &chart.id,
        }
    }
}

/// Why a chart cannot be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReason {
    NoData,
    NoValidData,
    NoValidWeeks,
}

impl EmptyReason {
    pub fn message(&self) -> &'static str {
        match self {
            EmptyReason::NoData => "No hay datos disponibles",
            EmptyReason::NoValidData => "No hay valores numéricos válidos",
            EmptyReason::NoValidWeeks => "No hay semanas válidas para construir el eje",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmptyChart {
    pub id: String,
    pub title: String,
    pub reason: EmptyReason,
    pub message: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekRange {
    pub min: u32,
    pub max: u32,
}

impl WeekRange {
    /// The horizontal position of `week` as a fraction of the range.
    ///
    /// A single-week range places every week at the midpoint.
    pub fn position(&self, week: u32) -> f64 {
        if self.max == self.min {
            return 0.5;
        }

        (f64::from(week) - f64::from(self.min)) / (f64::from(self.max) - f64::from(self.min))
    }
}

/// A plotted point; a missing value is drawn as a gap in the line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub week: u32,
    pub month: &'static str,
    pub value: Option<f64>,
    /// The value label drawn next to the point; gaps have none.
    pub label: Option<String>,
}

/// Normalized horizontal positions of the extreme value markers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MarkerPositions {
    pub max: Option<f64>,
    pub min: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FormattedValues {
    pub current: Option<String>,
    pub previous: Option<String>,
    pub max: String,
    pub min: String,
    pub axis_ticks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartModel {
    pub id: String,
    pub title: String,
    pub is_score: bool,
    pub is_inverse: bool,
    pub domain: [f64; 2],
    pub axis_ticks: Vec<f64>,
    pub reference_ticks: Vec<ReferenceTick>,
    pub week_range: WeekRange,
    pub points: Vec<ChartPoint>,
    pub stats: SeriesStats,
    pub trend: Option<Trend>,
    pub markers: MarkerPositions,
    pub current_value: Option<f64>,
    pub formatted: FormattedValues,
}

/// Derives everything a chart needs from the series of its metric.
///
/// Data problems never fail: they produce an [EmptyChart] describing them.
pub fn build_chart(spec: &MetricSpec, series: &Series) -> ChartView {
    let empty = |reason: EmptyReason| {
        debug!(metric = %spec.title, ?reason, "chart has nothing to draw");

        ChartView::Empty(EmptyChart {
            id: spec.id(),
            title: spec.title.clone(),
            reason,
            message: reason.message(),
        })
    };

    if series.is_empty() {
        return empty(EmptyReason::NoData);
    }

    let Some(stats) = stats::compute_stats(series, &spec.field) else {
        return empty(EmptyReason::NoValidData);
    };

    let Some((min_week, max_week)) = series.week_range() else {
        return empty(EmptyReason::NoValidWeeks);
    };

    let week_range = WeekRange {
        min: min_week,
        max: max_week,
    };
    let domain = spec.domain();
    let axis_ticks = axis::even_ticks(domain, DEFAULT_TICK_COUNT);
    let reference_ticks = calendar::reference_ticks_in_range(min_week, max_week);
    let trend = trend::evaluate_trend(series, &spec.field, spec.is_inverse);
    let current_value = trend.map(|t| t.current);

    let position = |point: Option<ExtremePoint>| point.map(|p| week_range.position(p.week));
    let markers = MarkerPositions {
        max: position(stats.max_point),
        min: position(stats.min_point),
    };

    let points = series
        .sorted_by_week()
        .into_iter()
        .filter_map(|record| {
            record.week().map(|week| {
                let value = record.value(&spec.field);

                ChartPoint {
                    week,
                    month: calendar::month_label(week),
                    value,
                    label: value.map(|v| spec.format_value(v)),
                }
            })
        })
        .collect();

    let formatted = FormattedValues {
        current: current_value.map(|v| spec.format_value(v)),
        previous: trend.and_then(|t| t.previous).map(|v| spec.format_value(v)),
        max: spec.format_value(stats.max_value),
        min: spec.format_value(stats.min_value),
        axis_ticks: axis_ticks
            .iter()
            .map(|t| format!("{t}{}", spec.unit_suffix()))
            .collect(),
    };

    debug!(
        metric = %spec.title,
        min_week,
        max_week,
        max = stats.max_value,
        min = stats.min_value,
        direction = ?trend.and_then(|t| t.direction()),
        "chart data derived"
    );

    ChartView::Ready(ChartModel {
        id: spec.id(),
        title: spec.title.clone(),
        is_score: spec.is_score,
        is_inverse: spec.is_inverse,
        domain,
        axis_ticks,
        reference_ticks,
        week_range,
        points,
        stats,
        trend,
        markers,
        current_value,
        formatted,
    })
}

/// The charts of a catalog derived from a single dataset snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub generated_at: DateTime<Utc>,
    pub charts: Vec<ChartView>,
}

impl Dashboard {
    pub fn build(catalog: &MetricCatalog, dataset: &Dataset) -> Dashboard {
        Dashboard::build_at(catalog, dataset, Utc::now())
    }

    pub fn build_at(
        catalog: &MetricCatalog,
        dataset: &Dataset,
        generated_at: DateTime<Utc>,
    ) -> Dashboard {
        let charts = catalog
            .metrics()
            .iter()
            .map(|spec| build_chart(spec, dataset.series(spec.category)))
            .collect();

        Dashboard {
            generated_at,
            charts,
        }
    }

    pub fn ready_count(&self) -> usize {
        self.charts
            .iter()
            .filter(|c| matches!(c, ChartView::Ready(_)))
            .count()
    }
}
