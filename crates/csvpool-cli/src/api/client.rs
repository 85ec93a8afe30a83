//! HTTP client for the Kaggle API
//!
//! Every network call goes through a bounded retry loop with linear-scaled
//! backoff. Authentication and not-found responses are not retried; they map
//! to [`CliError::Unavailable`] so the pipeline skips the dataset.

use crate::api::{endpoints, types::DatasetListing};
use crate::error::{CliError, Result};
use reqwest::{Client, Response, StatusCode};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

// ============================================================================
// API Client Constants
// ============================================================================

/// Default Kaggle API base URL.
/// Overridable via KAGGLE_API_URL (used by tests to point at a mock server).
pub const DEFAULT_API_URL: &str = "https://www.kaggle.com/api/v1";

/// Default timeout for API requests in seconds.
/// Generous because dataset archives can be large.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 300;

/// Maximum number of attempts per API operation
pub const MAX_RETRIES: u32 = 3;

/// Base delay between retry attempts (in seconds).
/// Actual delay doubles with every attempt.
pub const RETRY_DELAY_SECS: u64 = 2;

/// Kaggle API credentials
#[derive(Debug, Clone)]
pub struct KaggleCredentials {
    /// Kaggle account username
    pub username: String,

    /// Kaggle API key
    pub key: String,
}

impl KaggleCredentials {
    /// Load credentials from `KAGGLE_USERNAME` / `KAGGLE_KEY`
    pub fn from_env() -> Result<Self> {
        let username = std::env::var("KAGGLE_USERNAME").ok();
        let key = std::env::var("KAGGLE_KEY").ok();
        match (username, key) {
            (Some(username), Some(key)) if !username.is_empty() && !key.is_empty() => {
                Ok(Self { username, key })
            },
            _ => Err(CliError::MissingCredentials),
        }
    }
}

/// API client for the Kaggle dataset repository
pub struct KaggleClient {
    client: Client,
    base_url: String,
    credentials: KaggleCredentials,
}

impl KaggleClient {
    /// Create a new API client
    pub fn new(base_url: String, credentials: KaggleCredentials) -> Result<Self> {
        let timeout_secs = std::env::var("KAGGLE_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_API_TIMEOUT_SECS);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("KAGGLE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::new(base_url, KaggleCredentials::from_env()?)
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search datasets by keyword, one page at a time.
    ///
    /// An empty page means the source has no more results for the keyword.
    pub async fn list_datasets(&self, keyword: &str, page: u32) -> Result<Vec<DatasetListing>> {
        let url = endpoints::datasets_list_url(&self.base_url);
        let page = page.to_string();
        let query = [("search", keyword), ("page", page.as_str())];

        let response = self
            .get_with_retry(&url, &query, &format!("search '{}' page {}", keyword, page))
            .await?;

        Ok(response.json().await?)
    }

    /// Download a dataset archive to `dest`, returning the byte count.
    ///
    /// `source` is the `owner/slug` reference from a listing. The body is
    /// streamed to disk chunk by chunk and the transfer aborts as soon as
    /// the received byte count passes `max_bytes`; declared sizes lie, so
    /// the ceiling is enforced against the bytes that actually arrive.
    pub async fn download_dataset(&self, source: &str, dest: &Path, max_bytes: u64) -> Result<u64> {
        let (owner, slug) = source
            .split_once('/')
            .ok_or_else(|| CliError::api(format!("Invalid dataset reference: '{}'", source)))?;

        let url = endpoints::dataset_download_url(&self.base_url, owner, slug);
        let mut response = self
            .get_with_retry(&url, &[], &format!("download {}", source))
            .await?;

        let mut writer = BufWriter::new(File::create(dest)?);
        let mut downloaded = 0u64;
        while let Some(chunk) = response.chunk().await? {
            downloaded += chunk.len() as u64;
            if downloaded > max_bytes {
                return Err(CliError::SizeExceeded {
                    size_mb: downloaded.div_ceil(1024 * 1024),
                    limit_mb: max_bytes / (1024 * 1024),
                });
            }
            writer.write_all(&chunk)?;
        }
        writer.flush()?;

        Ok(downloaded)
    }

    /// GET with bounded retry and backoff.
    ///
    /// Unavailable responses (401/403/404) fail immediately; everything else
    /// retries with exponentially growing delays between attempts.
    async fn get_with_retry(
        &self,
        url: &str,
        query: &[(&str, &str)],
        operation: &str,
    ) -> Result<Response> {
        for attempt in 1..=MAX_RETRIES {
            debug!("Attempt {}/{} for {}", attempt, MAX_RETRIES, operation);

            let result = self
                .client
                .get(url)
                .query(query)
                .basic_auth(&self.credentials.username, Some(&self.credentials.key))
                .send()
                .await;

            match result {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response)
                    if matches!(
                        response.status(),
                        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND
                    ) =>
                {
                    return Err(CliError::unavailable(format!(
                        "{} returned {}",
                        operation,
                        response.status()
                    )));
                },
                Ok(response) => {
                    if attempt < MAX_RETRIES {
                        let delay = RETRY_DELAY_SECS * 2u64.pow(attempt - 1);
                        warn!(
                            "{} failed with {}. Retrying in {}s ({}/{})",
                            operation,
                            response.status(),
                            delay,
                            attempt,
                            MAX_RETRIES
                        );
                        tokio::time::sleep(Duration::from_secs(delay)).await;
                    }
                },
                Err(error) => {
                    if attempt < MAX_RETRIES {
                        let delay = RETRY_DELAY_SECS * 2u64.pow(attempt - 1);
                        warn!(
                            "{} failed: {}. Retrying in {}s ({}/{})",
                            operation, error, delay, attempt, MAX_RETRIES
                        );
                        tokio::time::sleep(Duration::from_secs(delay)).await;
                    } else {
                        return Err(error.into());
                    }
                },
            }
        }

        Err(CliError::api(format!(
            "{} failed after {} attempts",
            operation, MAX_RETRIES
        )))
    }
}
