use std::fs;

use kpiboard_metrics::Category;
use kpiboard_metrics::Dashboard;
use kpiboard_metrics::Dataset;
use kpiboard_metrics::MetricCatalog;
use kpiboard_metrics::Record;
use kpiboard_metrics::Series;
use kpiboard_vis::layout::VisLayout;
use tempfile::TempDir;

fn dashboard() -> Dashboard {
    let series: Series = (1..=8)
        .map(|week| Record::new(Some(week)).with("satisfaction", 60 + week))
        .collect();
    let dataset = Dataset::default().with_series(Category::Percent, series);

    Dashboard::build(&MetricCatalog::default(), &dataset)
}

#[test]
fn generate_dashboard_files() {
    let dir = TempDir::new().unwrap();

    let layout = VisLayout::init(dir.path()).unwrap();
    layout.generate_report(&dashboard()).unwrap();

    let root = dir.path().join("dashboard");
    assert_eq!(layout.root_path(), root.as_path());
    assert!(root.join("dashboard.js").is_file());
    assert!(root.join("dashboard.css").is_file());

    let html = fs::read_to_string(root.join("index.html")).unwrap();
    assert!(html.contains("Dashboard de KPIs"));
    assert!(html.contains(r#"id="chart-percent-satisfaction""#));
    assert!(html.contains("68.0%"));
    assert_eq!(html.matches("data-figure=").count(), 1);
    assert_eq!(html.matches(r#"class="empty""#).count(), 3);
}

#[test]
fn rerender_in_place() {
    let dir = TempDir::new().unwrap();

    let layout = VisLayout::init(dir.path())
        .unwrap()
        .with_title("Weekly KPIs")
        .with_refresh_secs(60);
    layout.generate_report(&dashboard()).unwrap();

    let layout = VisLayout::init(dir.path()).unwrap().with_title("Weekly KPIs");
    let empty = Dashboard::build(&MetricCatalog::default(), &Dataset::default());
    layout.generate_report(&empty).unwrap();

    let html = fs::read_to_string(layout.index_file_path()).unwrap();
    assert!(html.contains("Weekly KPIs"));
    assert!(html.contains(r#"content="900""#));
    assert_eq!(html.matches("data-figure=").count(), 0);
}
