use kpiboard_metrics::Dashboard;
use kpiboard_metrics::MetricCatalog;
use kpiboard_vis::layout::VisLayout;

use crate::cli::DashboardArgs;
use crate::cli::PathExt;
use crate::cli::RenderArgs;
use crate::error::CliError;
use crate::fetch::DataSource;
use crate::fetch::client::DashboardClient;

/// Loads the dataset, derives the charts and writes the dashboard page.
pub(crate) struct DashboardRenderer {
    source: DataSource,
    catalog: MetricCatalog,
    vis: VisLayout,
}

impl DashboardRenderer {
    pub fn new(source: DataSource, args: DashboardArgs) -> Result<Self, CliError> {
        let output_path = args.output_path.or_current_dir()?;

        let catalog = match args.metrics {
            Some(ref path) => MetricCatalog::from_file(path)?,
            None => MetricCatalog::default(),
        };

        if catalog.is_empty() {
            return Err(CliError::Config(String::from(
                "the metric catalog does not list any chart",
            )));
        }

        let mut vis = VisLayout::init(&output_path)?;
        if let Some(ref title) = args.title {
            vis = vis.with_title(title);
        }

        Ok(Self {
            source,
            catalog,
            vis,
        })
    }

    pub fn with_refresh_secs(mut self, refresh_secs: u64) -> Self {
        self.vis = self.vis.with_refresh_secs(refresh_secs);
        self
    }

    pub fn render(&self) -> Result<Dashboard, CliError> {
        let dataset = self.source.load()?;
        let dashboard = Dashboard::build(&self.catalog, &dataset);

        self.vis.generate_report(&dashboard)?;

        Ok(dashboard)
    }

    pub fn index_file_path(&self) -> &std::path::Path {
        self.vis.index_file_path()
    }
}

pub(crate) fn render(args: RenderArgs, client: &DashboardClient) -> Result<(), CliError> {
    let source = DataSource::new(args.source, client)?;
    let renderer = DashboardRenderer::new(source, args.dashboard)?;

    let dashboard = renderer.render()?;

    println!(
        "kpiboard rendered {ready} of {total} charts in: `{path}`",
        ready = dashboard.ready_count(),
        total = dashboard.charts.len(),
        path = renderer.index_file_path().display()
    );

    Ok(())
}
