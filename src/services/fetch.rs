// src/services/fetch.rs

//! Shortage feed client.
//!
//! Issues a single GET against the configured endpoint and extracts the
//! object-shaped entries of its `results` array.

use async_trait::async_trait;
use hyper::ext::ReasonPhrase;
use reqwest::Client;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{RawRecord, SourceConfig};
use crate::services::{FetchQuery, RecordSource};
use crate::utils::http::{build_query_url, create_async_client};

/// HTTP client for the shortage feed.
pub struct ShortageClient {
    client: Client,
    base_url: String,
}

impl ShortageClient {
    /// Create a client for the configured endpoint; the request timeout and
    /// User-Agent come from the same configuration.
    pub fn new(config: &SourceConfig) -> Result<Self> {
        Ok(Self {
            client: create_async_client(config)?,
            base_url: config.base_url.clone(),
        })
    }

    /// Endpoint this client queries.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl RecordSource for ShortageClient {
    async fn fetch(&self, query: &FetchQuery) -> Result<Vec<RawRecord>> {
        let url = build_query_url(
            &self.base_url,
            query.search.as_deref(),
            query.limit,
            query.skip,
        )?;
        log::info!("Fetching shortage records from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(AppError::network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::http(status.as_u16(), reason_phrase(&response)));
        }

        let body = response.bytes().await.map_err(AppError::network)?;
        parse_results(&body)
    }
}

/// Reason phrase from the server's status line, or the canonical one for
/// the status code when the server sent the standard text.
fn reason_phrase(response: &reqwest::Response) -> String {
    response
        .extensions()
        .get::<ReasonPhrase>()
        .map(|reason| String::from_utf8_lossy(reason.as_bytes()).into_owned())
        .or_else(|| response.status().canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Extract the object entries of the top-level `results` array.
///
/// Entries that are not JSON objects are dropped.
pub fn parse_results(body: &[u8]) -> Result<Vec<RawRecord>> {
    let payload: Value = serde_json::from_slice(body)
        .map_err(|e| AppError::malformed(format!("response body is not valid JSON: {e}")))?;

    let Value::Object(mut payload) = payload else {
        return Err(AppError::malformed("response is not a JSON object"));
    };

    let items = match payload.remove("results") {
        Some(Value::Array(items)) => items,
        Some(_) => return Err(AppError::malformed("'results' is not a list")),
        None => return Err(AppError::malformed("response has no 'results' field")),
    };

    let total = items.len();
    let records: Vec<RawRecord> = items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect();

    if records.len() < total {
        log::debug!(
            "Dropped {} non-object entries from results",
            total - records.len()
        );
    }
    Ok(records)
}
