//! Service layer for the shortage tracker.
//!
//! - Record fetching (`ShortageClient`)
//! - Record normalization and snapshot building (`normalizer`)

mod fetch;
pub mod normalizer;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{RawRecord, SourceConfig};

pub use fetch::{ShortageClient, parse_results};
pub use normalizer::{build_snapshot, normalize};

/// Parameters of a single request window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchQuery {
    pub search: Option<String>,
    pub limit: u32,
    pub skip: u64,
}

impl From<&SourceConfig> for FetchQuery {
    fn from(config: &SourceConfig) -> Self {
        Self {
            search: config.search.clone(),
            limit: config.limit,
            skip: config.skip,
        }
    }
}

/// Trait for upstream record sources.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch one window of raw records.
    async fn fetch(&self, query: &FetchQuery) -> Result<Vec<RawRecord>>;
}
