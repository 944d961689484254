use std::time::Duration;

use kpiboard_metrics::Dataset;
use kpiboard_metrics::refresh;
use reqwest::StatusCode;
use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::blocking::Response;
use serde::Serialize;
use tracing::debug;

use crate::fetch::error::FetchError;
use crate::fetch::error::Result;

/// Talks to the KPI data source: the dataset endpoint and the reload-check endpoint.
#[derive(Clone)]
pub(crate) struct DashboardClient {
    client: Client,
}

/// Both endpoints are called with an empty JSON object.
#[derive(Debug, Serialize)]
struct EmptyBody {}

impl DashboardClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client })
    }

    pub fn fetch_dataset(&self, url: &Url) -> Result<Dataset> {
        let response = self.post(url)?;

        match response.status() {
            status if status.is_success() => {
                let body = response.bytes()?;
                let dataset = Dataset::from_slice(&body)?;
                Ok(dataset)
            }
            status_code => Err(response_error(status_code, response)),
        }
    }

    /// Asks whether the dashboard must be reloaded.
    ///
    /// Only a successful response carrying the reload signal answers `true`.
    pub fn reload_requested(&self, url: &Url) -> Result<bool> {
        let response = self.post(url)?;

        match response.status() {
            status if status.is_success() => {
                let body = response.bytes()?;
                Ok(refresh::reload_requested(&body))
            }
            status_code => Err(response_error(status_code, response)),
        }
    }

    fn post(&self, url: &Url) -> Result<Response> {
        debug!(%url, "sending request");

        let response = self.client.post(url.clone()).json(&EmptyBody {}).send()?;
        Ok(response)
    }
}

fn response_error(status_code: StatusCode, response: Response) -> FetchError {
    let message = response.text().unwrap_or_default();

    FetchError::Response {
        status_code,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_is_an_empty_object() {
        assert_eq!(serde_json::to_string(&EmptyBody {}).unwrap(), "{}");
    }
}
