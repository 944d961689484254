use std::io;
use std::sync::mpsc;
use std::sync::mpsc::RecvTimeoutError;
use std::sync::mpsc::Sender;
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use reqwest::Url;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::fetch::client::DashboardClient;
use crate::fetch::error::Result;

/// Answers whether the dashboard must be reloaded.
pub(crate) trait ReloadCheck: Send + 'static {
    fn reload_requested(&self) -> Result<bool>;
}

/// Checks the reload endpoint of the data source.
pub(crate) struct RemoteReloadCheck {
    client: DashboardClient,
    url: Url,
}

impl RemoteReloadCheck {
    pub fn new(client: DashboardClient, url: Url) -> Self {
        Self { client, url }
    }
}

impl ReloadCheck for RemoteReloadCheck {
    fn reload_requested(&self) -> Result<bool> {
        self.client.reload_requested(&self.url)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RefreshEvent {
    /// The data source asked for a full reload of the dashboard.
    Reload,
}

/// Periodically runs a [ReloadCheck] on a background thread.
///
/// Failed checks are logged and otherwise ignored. Dropping the poller stops
/// the thread immediately, even in the middle of a wait.
pub(crate) struct RefreshPoller {
    cancel: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl RefreshPoller {
    pub fn start<C>(check: C, interval: Duration, events: Sender<RefreshEvent>) -> io::Result<Self>
    where
        C: ReloadCheck,
    {
        let (cancel, cancelled) = mpsc::channel::<()>();

        let handle = thread::Builder::new()
            .name(String::from("refresh-poller"))
            .spawn(move || {
                loop {
                    match cancelled.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }

                    match check.reload_requested() {
                        Ok(true) => {
                            info!("reload requested by the data source");

                            if events.send(RefreshEvent::Reload).is_err() {
                                break;
                            }
                        }
                        Ok(false) => debug!("no reload requested"),
                        Err(error) => warn!(%error, "reload check failed"),
                    }
                }

                debug!("refresh poller stopped");
            })?;

        info!(interval_secs = interval.as_secs(), "refresh poller started");

        Ok(Self {
            cancel: Some(cancel),
            handle: Some(handle),
        })
    }

    /// Stops polling and waits for the poller thread to finish.
    pub fn cancel(&mut self) {
        // Disconnecting the channel wakes the thread up.
        self.cancel.take();

        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("refresh poller thread panicked");
            }
        }
    }
}

impl Drop for RefreshPoller {
    fn drop(&mut self) {
        self.cancel();
    }
}
