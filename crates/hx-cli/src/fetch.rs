//! Downloads result pages from hyresult.com.

use std::time::Duration;

use thiserror::Error;

const RESULT_PATH: &str = "hyresult.com/result/";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Result page download errors.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Only hyresult.com result pages are fetched.
    #[error("invalid result URL {0}: expected https://www.hyresult.com/result/...")]
    UnsupportedUrl(String),
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The page answered with a non-success status.
    #[error("failed to fetch result page: HTTP {status}")]
    Status { status: u16 },
}

/// Checks that `url` points at a hyresult.com result page.
pub fn validate_result_url(url: &str) -> Result<(), FetchError> {
    let trimmed = url.trim();
    let is_http = trimmed.starts_with("https://") || trimmed.starts_with("http://");
    if is_http && trimmed.contains(RESULT_PATH) {
        Ok(())
    } else {
        Err(FetchError::UnsupportedUrl(trimmed.to_string()))
    }
}

/// Fetches the HTML of a result page.
pub async fn fetch_result_page(url: &str, timeout: Duration) -> Result<String, FetchError> {
    validate_result_url(url)?;

    let http = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(FetchError::ClientBuild)?;

    tracing::info!(url, "fetching result page");
    let response = http.get(url.trim()).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
        });
    }
    let body = response.text().await?;
    tracing::debug!(bytes = body.len(), "fetched result page");
    Ok(body)
}
