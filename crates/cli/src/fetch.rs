pub(crate) mod client;
pub(crate) mod error;

use std::path::PathBuf;

use kpiboard_metrics::Dataset;
use reqwest::Url;
use tracing::info;

use crate::cli::SourceArgs;
use crate::error::CliError;
use crate::fetch::client::DashboardClient;

/// Where the dataset of every render comes from.
pub(crate) enum DataSource {
    Remote { client: DashboardClient, url: Url },
    File(PathBuf),
}

impl DataSource {
    pub fn new(args: SourceArgs, client: &DashboardClient) -> Result<DataSource, CliError> {
        match (args.data_url, args.input) {
            (_, Some(path)) => Ok(DataSource::File(path)),
            (Some(url), None) => Ok(DataSource::Remote {
                client: client.clone(),
                url,
            }),
            (None, None) => Err(CliError::Config(
                "either a data URL or an input file is required".to_owned(),
            )),
        }
    }

    pub fn load(&self) -> Result<Dataset, CliError> {
        let dataset = match self {
            DataSource::Remote { client, url } => {
                info!(%url, "fetching dataset");
                client.fetch_dataset(url)?
            }
            DataSource::File(path) => {
                info!(path = %path.display(), "reading dataset");
                Dataset::from_file(path)?
            }
        };

        Ok(dataset)
    }
}
