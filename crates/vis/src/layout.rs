//! Lays out the dashboard files on disk.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use kpiboard_metrics::Dashboard;
use tracing::info;

use crate::error::Result;
use crate::template;
use crate::template::Context;
use crate::template::TemplateEngine;

const DEFAULT_TITLE: &str = "Dashboard de KPIs";

/// The dashboard directory is structured as follows:
///
/// ./dashboard/index.html
/// ./dashboard/dashboard.js
/// ./dashboard/dashboard.css
///
/// The __index__ file is the page itself; it embeds the chart figures and
/// loads the script that draws them.
pub struct VisLayout {
    root_path: PathBuf,
    index_file_path: PathBuf,
    script_file_path: PathBuf,
    stylesheet_file_path: PathBuf,
    title: String,
    refresh_secs: u64,
}

impl VisLayout {
    const MAIN_DIR_NAME: &str = "dashboard";
    const INDEX_FILE_NAME: &str = "index.html";
    const SCRIPT_FILE_NAME: &str = "dashboard.js";
    const STYLESHEET_FILE_NAME: &str = "dashboard.css";

    /// Prepares the dashboard directory under `path`.
    ///
    /// An existing directory is reused so the dashboard can be re-rendered in place.
    pub fn init(path: &Path) -> Result<VisLayout> {
        let root_path = path.join(Self::MAIN_DIR_NAME);
        let index_file_path = root_path.join(Self::INDEX_FILE_NAME);
        let script_file_path = root_path.join(Self::SCRIPT_FILE_NAME);
        let stylesheet_file_path = root_path.join(Self::STYLESHEET_FILE_NAME);

        fs::create_dir_all(&root_path)?;

        Ok(Self {
            root_path,
            index_file_path,
            script_file_path,
            stylesheet_file_path,
            title: DEFAULT_TITLE.to_owned(),
            refresh_secs: kpiboard_metrics::refresh::REFRESH_INTERVAL.as_secs(),
        })
    }

    /// Sets the page title.
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_owned();
        self
    }

    /// Sets how often an open page reloads itself, in seconds.
    pub fn with_refresh_secs(mut self, refresh_secs: u64) -> Self {
        self.refresh_secs = refresh_secs;
        self
    }

    /// The directory holding the dashboard files.
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// The path of the dashboard page.
    pub fn index_file_path(&self) -> &Path {
        &self.index_file_path
    }

    /// Writes the dashboard page and its static assets.
    pub fn generate_report(&self, dashboard: &Dashboard) -> Result<()> {
        fs::write(&self.script_file_path, template::SCRIPT)?;
        fs::write(&self.stylesheet_file_path, template::STYLESHEET)?;

        let context = Context::new(&self.title, dashboard, self.refresh_secs)?;
        let engine = TemplateEngine::new(&self.index_file_path);
        engine.render(&context)?;

        info!(
            path = %self.index_file_path.display(),
            charts = dashboard.charts.len(),
            ready = dashboard.ready_count(),
            "dashboard rendered"
        );

        Ok(())
    }
}
