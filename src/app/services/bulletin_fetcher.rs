//! HTTP retrieval of the bulletin page
//!
//! The observatory serves the page in a legacy Turkish code page; the
//! response charset is honoured when decoding so province names survive.

use std::path::Path;
use std::time::Duration;

use reqwest::header::USER_AGENT;
use reqwest::{Client, Url};
use tracing::{debug, info};

use crate::{Error, Result};

/// Fetches the raw bulletin page
#[derive(Debug, Clone)]
pub struct BulletinFetcher {
    client: Client,
    url: Url,
}

impl BulletinFetcher {
    /// Create a fetcher with an overall request timeout
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let url = Url::parse(url)
            .map_err(|e| Error::configuration(format!("Invalid bulletin URL '{}': {}", url, e)))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::network("Failed to build HTTP client", Some(e)))?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Download the page text; any non-success status is fatal
    pub async fn fetch_text(&self) -> Result<String> {
        info!("Fetching bulletin from {}", self.url);

        let response = self
            .client
            .get(self.url.clone())
            .header(
                USER_AGENT,
                concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")),
            )
            .send()
            .await
            .map_err(|e| Error::network(format!("Request to {} failed", self.url), Some(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::network(
                format!("HTTP {} from {}", status, self.url),
                None,
            ));
        }

        let text = response
            .text()
            .await
            .map_err(|e| Error::network("Failed to read bulletin body", Some(e)))?;

        debug!("Fetched {} bytes", text.len());
        Ok(text)
    }
}

/// Read a previously saved bulletin page
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
pub fn read_bulletin_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::file_not_found(path.display().to_string()));
    }

    let bytes = std::fs::read(path)
        .map_err(|e| Error::io(format!("Failed to read bulletin file {}", path.display()), e))?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
