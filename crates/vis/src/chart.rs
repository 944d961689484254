use kpiboard_metrics::calendar::ReferenceTick;
use kpiboard_metrics::pipeline::ChartModel;
use serde::Serialize;

const LINE_COLOR: &str = "#3b82f6";
const AXIS_COLOR: &str = "#64748b";
const LABEL_COLOR: &str = "#334155";
const GRID_COLOR: &str = "#e2e8f0";
const MAX_COLOR: &str = "#16a34a";
const MIN_COLOR: &str = "#dc2626";
const INVERSE_MAX_COLOR: &str = MIN_COLOR;
const INVERSE_MIN_COLOR: &str = MAX_COLOR;

/// A Plotly figure: the traces and the layout passed to `Plotly.newPlot`.
#[derive(Serialize, Debug)]
pub struct Figure {
    data: Vec<Trace>,
    layout: Layout,
}

impl Figure {
    pub fn new(chart: &ChartModel) -> Figure {
        Self {
            data: vec![Trace::new(chart)],
            layout: Layout::new(chart),
        }
    }
}

#[derive(Serialize, Debug)]
struct Trace {
    #[serde(rename = "type")]
    kind: TraceKind,
    mode: Mode,
    x: Vec<u32>,
    y: Vec<Option<f64>>,
    text: Vec<Option<String>>,
    #[serde(rename = "textposition")]
    text_position: Vec<TextPosition>,
    #[serde(rename = "textfont")]
    text_font: Font,
    #[serde(rename = "connectgaps")]
    connect_gaps: bool,
    line: Line,
    marker: Marker,
    #[serde(rename = "hovertemplate")]
    hover_template: String,
}

impl Trace {
    fn new(chart: &ChartModel) -> Self {
        let suffix = if chart.is_score { "" } else { "%" };

        Self {
            kind: TraceKind::Scatter,
            mode: Mode::LinesMarkersText,
            x: chart.points.iter().map(|p| p.week).collect(),
            y: chart.points.iter().map(|p| p.value).collect(),
            text: chart.points.iter().map(|p| p.label.clone()).collect(),
            text_position: (0..chart.points.len()).map(TextPosition::alternating).collect(),
            text_font: Font::label(),
            connect_gaps: false,
            line: Line {
                color: LINE_COLOR,
                width: 3,
                shape: LineShape::Spline,
            },
            marker: Marker {
                color: LINE_COLOR,
                size: 7,
            },
            hover_template: format!("Semana %{{x}}: %{{y:.1f}}{suffix}<extra></extra>"),
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "lowercase")]
enum TraceKind {
    Scatter,
}

#[derive(Serialize, Debug)]
enum Mode {
    #[serde(rename = "lines+markers+text")]
    LinesMarkersText,
}

/// Labels alternate above and below consecutive points so neighbours don't overlap.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
enum TextPosition {
    #[serde(rename = "top center")]
    TopCenter,
    #[serde(rename = "bottom center")]
    BottomCenter,
}

impl TextPosition {
    fn alternating(index: usize) -> TextPosition {
        if index % 2 == 0 {
            TextPosition::TopCenter
        } else {
            TextPosition::BottomCenter
        }
    }
}

#[derive(Serialize, Debug)]
struct Line {
    color: &'static str,
    width: u32,
    shape: LineShape,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "lowercase")]
enum LineShape {
    Spline,
}

#[derive(Serialize, Debug)]
struct Marker {
    color: &'static str,
    size: u32,
}

#[derive(Serialize, Debug)]
struct Layout {
    #[serde(rename = "xaxis")]
    x_axis: Axis,
    #[serde(rename = "yaxis")]
    y_axis: Axis,
    annotations: Vec<Annotation>,
    margin: Margin,
    #[serde(rename = "showlegend")]
    show_legend: bool,
    #[serde(rename = "autosize")]
    auto_size: bool,
    #[serde(rename = "hovermode")]
    hover_mode: HoverMode,
}

impl Layout {
    fn new(chart: &ChartModel) -> Self {
        Self {
            x_axis: Axis::weeks(chart),
            y_axis: Axis::values(chart),
            annotations: Annotation::extrema(chart),
            margin: Margin {
                t: 30,
                r: 15,
                b: 30,
                l: 45,
            },
            show_legend: false,
            auto_size: true,
            hover_mode: HoverMode::Closest,
        }
    }
}

#[derive(Serialize, Debug)]
struct Axis {
    range: [f64; 2],
    #[serde(rename = "tickmode")]
    tick_mode: TickMode,
    #[serde(rename = "tickvals")]
    tick_values: Vec<f64>,
    #[serde(rename = "ticktext")]
    tick_text: Vec<String>,
    #[serde(rename = "showgrid")]
    show_grid: bool,
    #[serde(rename = "gridcolor")]
    grid_color: &'static str,
    #[serde(rename = "zeroline")]
    zero_line: bool,
    #[serde(rename = "showline")]
    show_line: bool,
    #[serde(rename = "fixedrange")]
    fixed_range: bool,
    #[serde(rename = "tickfont")]
    tick_font: Font,
}

impl Axis {
    /// The time axis spans exactly the week range, so that the normalized
    /// marker positions line up with the plotted points.
    fn weeks(chart: &ChartModel) -> Self {
        let min = f64::from(chart.week_range.min);
        let max = f64::from(chart.week_range.max);
        let range = if min == max { [min - 1.0, max + 1.0] } else { [min, max] };

        Self {
            range,
            tick_mode: TickMode::Array,
            tick_values: chart
                .reference_ticks
                .iter()
                .map(|t: &ReferenceTick| f64::from(t.week))
                .collect(),
            tick_text: chart
                .reference_ticks
                .iter()
                .map(|t| t.label.to_owned())
                .collect(),
            show_grid: false,
            grid_color: GRID_COLOR,
            zero_line: false,
            show_line: false,
            fixed_range: true,
            tick_font: Font::axis(),
        }
    }

    fn values(chart: &ChartModel) -> Self {
        Self {
            range: chart.domain,
            tick_mode: TickMode::Array,
            tick_values: chart.axis_ticks.clone(),
            tick_text: chart.formatted.axis_ticks.clone(),
            show_grid: true,
            grid_color: GRID_COLOR,
            zero_line: false,
            show_line: false,
            fixed_range: true,
            tick_font: Font::axis(),
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "lowercase")]
enum TickMode {
    Array,
}

#[derive(Serialize, Debug)]
struct Annotation {
    #[serde(rename = "xref")]
    x_ref: &'static str,
    #[serde(rename = "yref")]
    y_ref: &'static str,
    x: f64,
    y: f64,
    text: String,
    #[serde(rename = "showarrow")]
    show_arrow: bool,
    #[serde(rename = "arrowcolor")]
    arrow_color: &'static str,
    ax: i32,
    ay: i32,
    font: Font,
}

impl Annotation {
    /// Marks the max and min values. Points without a known week are skipped.
    fn extrema(chart: &ChartModel) -> Vec<Annotation> {
        let (max_color, min_color) = if chart.is_inverse {
            (INVERSE_MAX_COLOR, INVERSE_MIN_COLOR)
        } else {
            (MAX_COLOR, MIN_COLOR)
        };

        let max = chart.markers.max.map(|x| Annotation {
            y: chart.stats.max_value,
            text: format!("Máx {}", chart.formatted.max),
            arrow_color: max_color,
            ay: -28,
            font: Font::marker(max_color),
            ..Annotation::at(x)
        });

        let min = chart.markers.min.map(|x| Annotation {
            y: chart.stats.min_value,
            text: format!("Mín {}", chart.formatted.min),
            arrow_color: min_color,
            ay: 28,
            font: Font::marker(min_color),
            ..Annotation::at(x)
        });

        // A flat series has the same point for both extrema.
        if chart.stats.max_value == chart.stats.min_value {
            return max.into_iter().collect();
        }

        max.into_iter().chain(min).collect()
    }

    fn at(x: f64) -> Annotation {
        Annotation {
            x_ref: "paper",
            y_ref: "y",
            x,
            y: 0.0,
            text: String::new(),
            show_arrow: true,
            arrow_color: AXIS_COLOR,
            ax: 0,
            ay: 0,
            font: Font::axis(),
        }
    }
}

#[derive(Serialize, Debug)]
struct Font {
    size: u32,
    color: &'static str,
}

impl Font {
    fn axis() -> Self {
        Self {
            size: 12,
            color: AXIS_COLOR,
        }
    }

    fn label() -> Self {
        Self {
            size: 11,
            color: LABEL_COLOR,
        }
    }

    fn marker(color: &'static str) -> Self {
        Self { size: 11, color }
    }
}

#[derive(Serialize, Debug)]
struct Margin {
    t: u32,
    r: u32,
    b: u32,
    l: u32,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "lowercase")]
enum HoverMode {
    Closest,
}

#[cfg(test)]
mod tests {
    use kpiboard_metrics::Category;
    use kpiboard_metrics::ChartView;
    use kpiboard_metrics::MetricSpec;
    use kpiboard_metrics::Record;
    use kpiboard_metrics::Series;
    use kpiboard_metrics::pipeline::build_chart;
    use serde_json::Value;
    use serde_json::json;

    use super::*;

    fn figure(spec: &MetricSpec, series: &Series) -> Value {
        match build_chart(spec, series) {
            ChartView::Ready(chart) => serde_json::to_value(Figure::new(&chart)).unwrap(),
            ChartView::Empty(chart) => panic!("unexpected empty chart: {:?}", chart.reason),
        }
    }

    #[test]
    fn percentage_figure() {
        let spec = MetricSpec::new("Satisfacción", Category::Percent, "v");
        let series: Series = vec![
            Record::new(Some(4)).with("v", 70.0),
            Record::new(Some(5)).with("v", "n/a"),
            Record::new(Some(6)).with("v", 90.0),
        ]
        .into_iter()
        .collect();

        let figure = figure(&spec, &series);

        assert_eq!(figure["data"][0]["type"], "scatter");
        assert_eq!(figure["data"][0]["mode"], "lines+markers+text");
        assert_eq!(figure["data"][0]["x"], json!([4, 5, 6]));
        assert_eq!(figure["data"][0]["y"], json!([70.0, null, 90.0]));
        assert_eq!(figure["layout"]["xaxis"]["range"], json!([4.0, 6.0]));
        assert_eq!(figure["layout"]["xaxis"]["tickvals"], json!([5.0]));
        assert_eq!(figure["layout"]["xaxis"]["ticktext"], json!(["Feb"]));
        assert_eq!(
            figure["layout"]["yaxis"]["ticktext"],
            json!(["0%", "25%", "50%", "75%", "100%"])
        );

        let annotations = figure["layout"]["annotations"].as_array().unwrap();
        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[0]["x"], 1.0);
        assert_eq!(annotations[0]["text"], "Máx 90.0%");
        assert_eq!(annotations[0]["xref"], "paper");
        assert_eq!(annotations[1]["x"], 0.0);
        assert_eq!(annotations[1]["text"], "Mín 70.0%");
    }

    #[test]
    fn point_labels_alternate_around_the_line() {
        let spec = MetricSpec::new("Satisfacción", Category::Percent, "v");
        let series: Series = vec![
            Record::new(Some(5)).with("v", 72.0),
            Record::new(Some(6)).with("v", 75.25),
            Record::new(Some(7)).with("v", "n/a"),
            Record::new(Some(8)).with("v", 78.0),
        ]
        .into_iter()
        .collect();

        let figure = figure(&spec, &series);
        let trace = &figure["data"][0];

        assert_eq!(trace["text"], json!(["72.0%", "75.3%", null, "78.0%"]));
        assert_eq!(
            trace["textposition"],
            json!(["top center", "bottom center", "top center", "bottom center"])
        );
    }

    #[test]
    fn score_labels_have_no_suffix() {
        let spec = MetricSpec::new("Trustpilot", Category::Scores, "v").score();
        let series: Series = vec![
            Record::new(Some(1)).with("v", 4.25),
            Record::new(Some(2)).with("v", 4.5),
        ]
        .into_iter()
        .collect();

        let figure = figure(&spec, &series);

        assert_eq!(figure["data"][0]["text"], json!(["4.3", "4.5"]));
    }

    #[test]
    fn inverse_metric_swaps_marker_colors() {
        let spec = MetricSpec::new("Devoluciones", Category::Devoluciones, "v").inverse();
        let series: Series = vec![
            Record::new(Some(1)).with("v", 3.0),
            Record::new(Some(2)).with("v", 5.0),
        ]
        .into_iter()
        .collect();

        let figure = figure(&spec, &series);
        let annotations = figure["layout"]["annotations"].as_array().unwrap();

        assert_eq!(annotations[0]["arrowcolor"], MIN_COLOR);
        assert_eq!(annotations[1]["arrowcolor"], MAX_COLOR);
    }

    #[test]
    fn single_week_figure_pads_range() {
        let spec = MetricSpec::new("Trustpilot", Category::Scores, "v").score();
        let series: Series = vec![Record::new(Some(9)).with("v", 4.5)].into_iter().collect();

        let figure = figure(&spec, &series);

        assert_eq!(figure["layout"]["xaxis"]["range"], json!([8.0, 10.0]));
        assert_eq!(figure["layout"]["annotations"].as_array().unwrap().len(), 1);
        assert_eq!(figure["layout"]["annotations"][0]["x"], 0.5);
        assert_eq!(figure["layout"]["annotations"][0]["text"], "Máx 4.5");
    }
}
