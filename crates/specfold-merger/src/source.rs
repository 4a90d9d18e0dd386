//! Raw document reading from file paths and HTTP URLs.

use std::time::Duration;

use crate::error::MergeError;

/// Timeout applied to a single HTTP fetch.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Read raw document bytes from a file path or an `http(s)://` URL.
///
/// Single attempt, no retries; the caller decides whether to abort.
pub fn read_locator(locator: &str) -> Result<Vec<u8>, MergeError> {
    if locator.starts_with("http://") || locator.starts_with("https://") {
        fetch_url(locator)
    } else {
        std::fs::read(locator).map_err(|source| MergeError::ReadFailed {
            locator: locator.to_string(),
            source,
        })
    }
}

fn fetch_url(locator: &str) -> Result<Vec<u8>, MergeError> {
    let fetch_failed = |detail: String| MergeError::FetchFailed {
        locator: locator.to_string(),
        detail,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| fetch_failed(e.to_string()))?;

    let response = client
        .get(locator)
        .send()
        .map_err(|e| fetch_failed(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(fetch_failed(format!("HTTP status {status}")));
    }

    let body = response.bytes().map_err(|e| fetch_failed(e.to_string()))?;
    Ok(body.to_vec())
}
