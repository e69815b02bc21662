use std::error::Error as _;

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::Category,
    error::{FetchError, FetchFailure},
    protocol::{decode_records, endpoint_path, endpoint_url, Records},
};
use tracing::{info, warn};

pub mod config;

pub use config::{load_settings, ConfigError, Settings};

/// Source of the three dashboard collections.
///
/// Every failure is reported as a [`FetchFailure`] naming the endpoint path;
/// implementations never retry.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self, category: Category) -> Result<Records, FetchFailure>;
}

/// Unauthenticated HTTP client for the e-commerce gateway.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    http: Client,
    api_url: String,
}

impl DashboardClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_http_client(Client::new(), api_url)
    }

    pub fn with_http_client(http: Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into();
        Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.api_url.clone())
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub async fn fetch_records(&self, category: Category) -> Result<Records, FetchFailure> {
        let endpoint = endpoint_path(category);
        let url = endpoint_url(&self.api_url, category);

        match self.fetch_from(&url, category).await {
            Ok(records) => {
                info!(%category, rows = records.len(), "fetched records");
                Ok(records)
            }
            Err(source) => {
                warn!(%category, %url, error = %source, "fetch failed");
                Err(FetchFailure::new(endpoint, source))
            }
        }
    }

    async fn fetch_from(&self, url: &str, category: Category) -> Result<Records, FetchError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| FetchError::Transport(transport_message(&err)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| FetchError::Transport(transport_message(&err)))?;
        decode_records(category, &body)
    }
}

#[async_trait]
impl CatalogSource for DashboardClient {
    async fn fetch(&self, category: Category) -> Result<Records, FetchFailure> {
        self.fetch_records(category).await
    }
}

/// reqwest's top-level message is generic ("error sending request"); the
/// innermost cause carries the useful part such as "Connection refused".
fn transport_message(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message = cause.to_string();
        source = cause.source();
    }
    message
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
