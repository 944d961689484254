use kpiboard_metrics::Category;
use kpiboard_metrics::ChartView;
use kpiboard_metrics::Dashboard;
use kpiboard_metrics::Dataset;
use kpiboard_metrics::MetricCatalog;
use kpiboard_metrics::pipeline::EmptyReason;
use kpiboard_metrics::trend::Direction;
use kpiboard_metrics::trend::Sentiment;

const GROUPED_RESPONSE: &str = r#"{
    "percent": [
        { "week": 14, "satisfaction": 83, "month": "Abr" },
        { "week": 15, "satisfaction": 80, "month": "Abr" },
        { "week": 16, "satisfaction": 78, "month": "Abr" },
        { "week": 17, "satisfaction": 75, "month": "Abr" },
        { "week": 18, "satisfaction": 73, "month": "May" },
        { "week": 19, "satisfaction": null, "month": "May" },
        { "week": 20, "satisfaction": 69, "month": "May" }
    ],
    "scores": [
        { "week": 18, "Trustpilot": 4.1 },
        { "week": 19, "Trustpilot": 4.3 },
        { "week": 20, "Trustpilot": 4.3 }
    ],
    "nps": []
}"#;

const TAGGED_RESPONSE: &str = r#"[
    { "key": "devoluciones", "week": 22, "return_percentage_over_invoicing": 4.8 },
    { "key": "devoluciones", "week": 21, "return_percentage_over_invoicing": 5.6 },
    { "key": "nps", "week": 21, "Business_School": "pending" }
]"#;

fn ready(view: &ChartView) -> &kpiboard_metrics::pipeline::ChartModel {
    match view {
        ChartView::Ready(chart) => chart,
        ChartView::Empty(chart) => panic!("{} is empty: {:?}", chart.title, chart.reason),
    }
}

fn empty_reason(view: &ChartView) -> EmptyReason {
    match view {
        ChartView::Empty(chart) => chart.reason,
        ChartView::Ready(chart) => panic!("{} is ready", chart.title),
    }
}

#[test]
fn grouped_response_builds_default_dashboard() {
    let dataset = Dataset::from_slice(GROUPED_RESPONSE.as_bytes()).unwrap();
    let dashboard = Dashboard::build(&MetricCatalog::default(), &dataset);

    assert_eq!(dashboard.charts.len(), 4);
    assert_eq!(dashboard.ready_count(), 2);

    let satisfaction = ready(&dashboard.charts[0]);
    assert_eq!(satisfaction.week_range.min, 14);
    assert_eq!(satisfaction.week_range.max, 20);
    assert_eq!(
        satisfaction
            .reference_ticks
            .iter()
            .map(|t| t.label)
            .collect::<Vec<_>>(),
        vec!["Abr", "May"]
    );
    assert_eq!(satisfaction.stats.max_value, 83.0);
    assert_eq!(satisfaction.markers.max, Some(0.0));
    assert_eq!(satisfaction.markers.min, Some(1.0));
    assert_eq!(satisfaction.formatted.current.as_deref(), Some("69.0%"));
    assert_eq!(satisfaction.formatted.previous.as_deref(), Some("73.0%"));
    assert_eq!(satisfaction.points[5].value, None);

    let trustpilot = ready(&dashboard.charts[1]);
    assert_eq!(trustpilot.trend.and_then(|t| t.direction()), Some(Direction::Flat));
    assert_eq!(trustpilot.stats.max_point.map(|p| p.week), Some(19));
    assert_eq!(trustpilot.formatted.current.as_deref(), Some("4.3"));

    assert_eq!(empty_reason(&dashboard.charts[2]), EmptyReason::NoData);
    assert_eq!(empty_reason(&dashboard.charts[3]), EmptyReason::NoData);
}

#[test]
fn tagged_response_builds_inverse_metric() {
    let dataset = Dataset::from_slice(TAGGED_RESPONSE.as_bytes()).unwrap();

    assert_eq!(dataset.series(Category::Devoluciones).len(), 2);
    assert!(dataset.series(Category::Percent).is_empty());

    let dashboard = Dashboard::build(&MetricCatalog::default(), &dataset);

    assert_eq!(empty_reason(&dashboard.charts[2]), EmptyReason::NoValidData);

    let returns = ready(&dashboard.charts[3]);
    let trend = returns.trend.unwrap();
    assert!(returns.is_inverse);
    assert_eq!(trend.direction(), Some(Direction::Down));
    assert_eq!(trend.sentiment(), Some(Sentiment::Improving));
    assert_eq!(returns.formatted.current.as_deref(), Some("4.8%"));
    assert_eq!(returns.stats.max_point.map(|p| p.index), Some(1));
}

#[test]
fn dashboard_serializes_for_rendering() {
    let dataset = Dataset::from_slice(GROUPED_RESPONSE.as_bytes()).unwrap();
    let dashboard = Dashboard::build(&MetricCatalog::default(), &dataset);

    let json = serde_json::to_value(&dashboard).unwrap();

    assert_eq!(json["charts"][0]["kind"], "ready");
    assert_eq!(json["charts"][2]["kind"], "empty");
    assert_eq!(json["charts"][2]["reason"], "no_data");
}
