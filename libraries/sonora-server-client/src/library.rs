//! Library metadata and scan operations.

use crate::client::{read_json, send_error};
use crate::error::Result;
use crate::types::{ScanStatus, StartScan, StartScanRequest};
use reqwest::Client;
use sonora_core::Tags;
use std::time::Duration;
use tracing::{debug, info};

/// Interval between scan status polls
pub const SCAN_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Library client for the Sonora backend.
pub struct LibraryClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> LibraryClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Get tag and artist counts for composing rules.
    pub async fn tags(&self) -> Result<Tags> {
        let url = format!("{}/tags", self.base_url);
        debug!(url = %url, "Fetching tags");

        let response = self.http.get(&url).send().await.map_err(send_error)?;
        let tags: Tags = read_json(response, "tags").await?;

        debug!(
            tags = tags.tags.len(),
            artists = tags.artists.len(),
            resolved = tags.resolved_recordings,
            "Fetched tags"
        );

        Ok(tags)
    }

    /// Start a library scan.
    ///
    /// `full` rescans everything instead of only new recordings.
    pub async fn start_scan(&self, full: bool) -> Result<StartScan> {
        let url = format!("{}/scan", self.base_url);
        debug!(url = %url, full, "Starting scan");

        let response = self
            .http
            .post(&url)
            .json(&StartScanRequest { full })
            .send()
            .await
            .map_err(send_error)?;

        let started: StartScan = read_json(response, "scan response").await?;
        info!(started = started.started, full, "Scan requested");
        Ok(started)
    }

    /// Get the current scan progress.
    pub async fn scan_status(&self) -> Result<ScanStatus> {
        let url = format!("{}/scanStatus", self.base_url);
        let response = self.http.get(&url).send().await.map_err(send_error)?;
        read_json(response, "scan status").await
    }

    /// Poll the scan status until the scan finishes.
    ///
    /// `on_progress` sees every intermediate status.
    pub async fn wait_for_scan<F>(&self, interval: Duration, mut on_progress: F) -> Result<ScanStatus>
    where
        F: FnMut(&ScanStatus),
    {
        loop {
            let status = self.scan_status().await?;
            if !status.scanning {
                info!(fetched = status.fetched, "Scan finished");
                return Ok(status);
            }
            on_progress(&status);
            tokio::time::sleep(interval).await;
        }
    }
}
