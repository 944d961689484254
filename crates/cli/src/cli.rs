use std::env;
use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use reqwest::Url;

use crate::error::CliError;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Specify the timeout in seconds of every HTTP request.
    #[arg(long, global = true, default_value_t = 30)]
    pub(crate) timeout_secs: u64,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Fetch the KPI dataset once and render the dashboard.
    Render(RenderArgs),
    /// Render the dashboard and re-render it whenever the data source
    /// signals that a reload is required.
    Watch(WatchArgs),
    /// Ask the reload endpoint once whether a reload is required.
    Check(CheckArgs),
}

#[derive(Args)]
pub(crate) struct RenderArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,

    #[command(flatten)]
    pub(crate) dashboard: DashboardArgs,
}

#[derive(Args)]
pub(crate) struct WatchArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,

    #[command(flatten)]
    pub(crate) dashboard: DashboardArgs,

    /// The endpoint answering whether the dashboard must be reloaded.
    #[arg(long, env = "KPIBOARD_RELOAD_URL", value_parser(parse_url))]
    pub(crate) reload_url: Url,

    /// Specify how often, in seconds, the reload endpoint is checked.
    #[arg(long, default_value_t = 900, value_parser = clap::value_parser!(u64).range(1..))]
    pub(crate) interval_secs: u64,
}

#[derive(Args)]
pub(crate) struct CheckArgs {
    /// The endpoint answering whether the dashboard must be reloaded.
    #[arg(long, env = "KPIBOARD_RELOAD_URL", value_parser(parse_url))]
    pub(crate) reload_url: Url,
}

/// Where the KPI dataset is read from.
#[derive(Args)]
#[group(required = true, multiple = false)]
pub(crate) struct SourceArgs {
    /// The endpoint returning the KPI dataset.
    #[arg(long, env = "KPIBOARD_DATA_URL", value_parser(parse_url))]
    pub(crate) data_url: Option<Url>,

    /// Read the KPI dataset from a local JSON file instead of the data endpoint.
    #[arg(short, long, value_parser(parse_file))]
    pub(crate) input: Option<PathBuf>,
}

#[derive(Args)]
pub(crate) struct DashboardArgs {
    /// Specify the path where the dashboard will be created.
    /// If the output path is not specified then the current working
    /// directory is used.
    #[arg(short, long, value_parser(parse_dir))]
    pub(crate) output_path: Option<PathBuf>,

    /// Specify a JSON file listing the charts of the dashboard.
    /// The built-in catalog is used when it is not specified.
    #[arg(short, long, value_parser(parse_file))]
    pub(crate) metrics: Option<PathBuf>,

    /// Specify the title of the dashboard page.
    #[arg(short, long)]
    pub(crate) title: Option<String>,
}

fn parse_url(url: &str) -> Result<Url, String> {
    let url = Url::parse(url).map_err(|e| format!("The `{url}` URL is not valid: {e}."))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(format!(
            "The `{url}` URL must use http or https, not `{scheme}`."
        )),
    }
}

fn parse_dir(path: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path);

    if !path.exists() {
        return Err(format!("The `{}` path does not exist.", path.display()));
    }

    if !path.is_dir() {
        return Err(format!(
            "The `{}` path must point to a directory.",
            path.display()
        ));
    }

    Ok(path)
}

fn parse_file(path: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path);

    if !path.is_file() {
        return Err(format!(
            "The `{}` path must point to an existing file.",
            path.display()
        ));
    }

    Ok(path)
}

pub(crate) trait PathExt {
    fn or_current_dir(self) -> Result<PathBuf, CliError>;
}

impl PathExt for Option<PathBuf> {
    fn or_current_dir(self) -> Result<PathBuf, CliError> {
        if let Some(path) = self {
            Ok(path)
        } else {
            env::current_dir().map_err(|e| CliError::Path(e.to_string()))
        }
    }
}
