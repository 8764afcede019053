// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use url::Url;

use crate::error::{AppError, Result};
use crate::models::SourceConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &SourceConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| AppError::config(format!("failed to build HTTP client: {e}")))
}

/// Append `limit`, `skip` and optional `search` to the base URL.
///
/// Query pairs already present on the base URL are kept.
pub fn build_query_url(
    base_url: &str,
    search: Option<&str>,
    limit: u32,
    skip: u64,
) -> Result<Url> {
    let mut url = Url::parse(base_url)?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("limit", &limit.to_string());
        pairs.append_pair("skip", &skip.to_string());
        if let Some(search) = search.filter(|s| !s.is_empty()) {
            pairs.append_pair("search", search);
        }
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query_url_without_search() {
        let url =
            build_query_url("https://api.fda.gov/drug/shortages.json", None, 100, 0).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.fda.gov/drug/shortages.json?limit=100&skip=0"
        );
    }

    #[test]
    fn test_build_query_url_encodes_search() {
        let url = build_query_url(
            "https://api.fda.gov/drug/shortages.json",
            Some("status:\"Current\""),
            5,
            10,
        )
        .unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("limit".to_string(), "5".to_string()),
                ("skip".to_string(), "10".to_string()),
                ("search".to_string(), "status:\"Current\"".to_string()),
            ]
        );
    }

    #[test]
    fn test_build_query_url_ignores_empty_search() {
        let url = build_query_url("http://localhost/feed", Some(""), 1, 0).unwrap();
        assert_eq!(url.query(), Some("limit=1&skip=0"));
    }

    #[test]
    fn test_build_query_url_keeps_existing_query() {
        let url = build_query_url("http://localhost/feed?api_key=k", None, 1, 2).unwrap();
        assert_eq!(url.query(), Some("api_key=k&limit=1&skip=2"));
    }

    #[test]
    fn test_build_query_url_rejects_garbage() {
        assert!(matches!(
            build_query_url("not a url", None, 1, 0),
            Err(AppError::Url(_))
        ));
    }
}
