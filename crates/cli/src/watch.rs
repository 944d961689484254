use std::sync::mpsc;
use std::time::Duration;

use kpiboard_metrics::Dashboard;
use tracing::error;
use tracing::info;

use crate::cli::CheckArgs;
use crate::cli::WatchArgs;
use crate::error::CliError;
use crate::fetch::DataSource;
use crate::fetch::client::DashboardClient;
use crate::poll::RefreshEvent;
use crate::poll::RefreshPoller;
use crate::poll::RemoteReloadCheck;
use crate::view::DashboardRenderer;

/// The dashboard held by a running watch session.
///
/// A reload signal discards the current dashboard before the dataset is
/// fetched again; nothing is merged across fetches.
#[derive(Debug)]
pub(crate) enum DashboardState {
    Loading,
    Ready(Dashboard),
    Failed(String),
}

impl DashboardState {
    fn load(renderer: &DashboardRenderer) -> DashboardState {
        match renderer.render() {
            Ok(dashboard) => {
                println!(
                    "kpiboard rendered {ready} of {total} charts in: `{path}`",
                    ready = dashboard.ready_count(),
                    total = dashboard.charts.len(),
                    path = renderer.index_file_path().display()
                );
                DashboardState::Ready(dashboard)
            }
            Err(err) => {
                error!(error = %err, "refreshing the dashboard failed; the last rendered page is kept");
                DashboardState::Failed(err.to_string())
            }
        }
    }

    fn describe(&self) -> String {
        match self {
            DashboardState::Loading => String::from("loading"),
            DashboardState::Ready(dashboard) => format!(
                "ready ({} of {} charts generated at {})",
                dashboard.ready_count(),
                dashboard.charts.len(),
                dashboard.generated_at.to_rfc3339()
            ),
            DashboardState::Failed(message) => format!("failed ({message})"),
        }
    }
}

pub(crate) fn watch(args: WatchArgs, client: DashboardClient) -> Result<(), CliError> {
    let interval = Duration::from_secs(args.interval_secs);
    let source = DataSource::new(args.source, &client)?;
    let renderer = DashboardRenderer::new(source, args.dashboard)?.with_refresh_secs(args.interval_secs);

    let mut state = DashboardState::load(&renderer);
    info!(state = %state.describe(), "initial render finished");

    let (events, received) = mpsc::channel();
    let check = RemoteReloadCheck::new(client, args.reload_url);
    let _poller = RefreshPoller::start(check, interval, events)?;

    println!(
        "kpiboard checks for reloads every {secs} seconds; press Ctrl+C to stop",
        secs = interval.as_secs()
    );

    for event in received {
        match event {
            RefreshEvent::Reload => {
                state = DashboardState::Loading;
                info!(state = %state.describe(), "discarding the current dashboard");

                state = DashboardState::load(&renderer);
                info!(state = %state.describe(), "reload finished");
            }
        }
    }

    Ok(())
}

pub(crate) fn check(args: CheckArgs, client: &DashboardClient) -> Result<(), CliError> {
    let reload = client.reload_requested(&args.reload_url)?;

    if reload {
        println!("reload requested by `{}`", args.reload_url);
    } else {
        println!("no reload requested by `{}`", args.reload_url);
    }

    Ok(())
}
