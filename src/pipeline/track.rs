// src/pipeline/track.rs

//! Shortage tracking pipeline.

use crate::error::Result;
use crate::models::Config;
use crate::pipeline::{SnapshotDiff, calculate_diff};
use crate::services::{FetchQuery, RecordSource, build_snapshot};
use crate::storage::SnapshotStore;

/// Settings for a single tracking run.
#[derive(Debug, Clone)]
pub struct TrackOptions {
    pub query: FetchQuery,
    /// Overwrite the stored snapshot at the end of the run
    pub save: bool,
}

impl From<&Config> for TrackOptions {
    fn from(config: &Config) -> Self {
        Self {
            query: FetchQuery::from(&config.source),
            save: config.store.save,
        }
    }
}

/// Summary of a tracking run.
#[derive(Debug, Clone, Default)]
pub struct TrackOutcome {
    /// Number of object records returned by the source
    pub fetched: usize,
    pub diff: SnapshotDiff,
    /// Whether the new snapshot replaced the stored one
    pub saved: bool,
}

/// Run fetch → build → load → diff → save.
///
/// Any failure returns before the save step, leaving the stored snapshot
/// as it was.
pub async fn run_tracker(
    source: &dyn RecordSource,
    store: &dyn SnapshotStore,
    options: &TrackOptions,
) -> Result<TrackOutcome> {
    let records = source.fetch(&options.query).await?;
    let fetched = records.len();
    log::info!("Fetched {} records", fetched);

    let current = build_snapshot(records);
    if current.len() < fetched {
        log::debug!(
            "{} records collapsed onto existing keys",
            fetched - current.len()
        );
    }

    let previous = store.load().await?;
    let diff = calculate_diff(&previous, &current);

    if diff.has_changes() {
        log::info!(
            "Diff: {} added, {} removed, {} changed",
            diff.added.len(),
            diff.removed.len(),
            diff.changed.len()
        );
    } else {
        log::info!("No changes since last snapshot");
    }

    if options.save {
        store.save(&current).await?;
    } else {
        log::info!("Save disabled, {} left untouched", store.location());
    }

    Ok(TrackOutcome {
        fetched,
        diff,
        saved: options.save,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::RawRecord;
    use crate::services::parse_results;
    use crate::storage::LocalStorage;
    use async_trait::async_trait;
    use tempfile::TempDir;

    /// Source serving a canned response body.
    struct StaticSource(&'static str);

    #[async_trait]
    impl RecordSource for StaticSource {
        async fn fetch(&self, _query: &FetchQuery) -> Result<Vec<RawRecord>> {
            parse_results(self.0.as_bytes())
        }
    }

    fn options(save: bool) -> TrackOptions {
        TrackOptions {
            query: FetchQuery {
                search: None,
                limit: 100,
                skip: 0,
            },
            save,
        }
    }

    const FIRST: &str = r#"{"results": [
        {"id": "1", "drug_name": "Drug A", "status": "Current"},
        {"id": "2", "drug_name": "Drug B", "status": "Current"}
    ]}"#;

    const SECOND: &str = r#"{"results": [
        {"id": "1", "drug_name": "Drug A", "status": "Resolved"},
        {"id": "3", "drug_name": "Drug C", "status": "Current"},
        "ignored"
    ]}"#;

    #[tokio::test]
    async fn test_first_run_reports_everything_added() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStorage::new(tmp.path().join("data/snap.json"));

        let outcome = run_tracker(&StaticSource(FIRST), &store, &options(true))
            .await
            .unwrap();

        assert_eq!(outcome.fetched, 2);
        assert_eq!(outcome.diff.added.len(), 2);
        assert!(outcome.saved);
        assert_eq!(store.load().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_second_run_diffs_against_saved() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStorage::new(tmp.path().join("snap.json"));

        run_tracker(&StaticSource(FIRST), &store, &options(true))
            .await
            .unwrap();
        let outcome = run_tracker(&StaticSource(SECOND), &store, &options(true))
            .await
            .unwrap();

        assert_eq!(outcome.fetched, 2);
        let added: Vec<_> = outcome.diff.added.iter().map(|r| r.key.as_str()).collect();
        let removed: Vec<_> = outcome.diff.removed.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(added, vec!["3"]);
        assert_eq!(removed, vec!["2"]);
        assert_eq!(outcome.diff.changed[0].key, "1");
    }

    #[tokio::test]
    async fn test_no_save_leaves_store_untouched() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStorage::new(tmp.path().join("snap.json"));

        let outcome = run_tracker(&StaticSource(FIRST), &store, &options(false))
            .await
            .unwrap();

        assert!(!outcome.saved);
        assert!(!store.exists().await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_response_keeps_snapshot() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStorage::new(tmp.path().join("snap.json"));
        run_tracker(&StaticSource(FIRST), &store, &options(true))
            .await
            .unwrap();
        let before = std::fs::read(store.path()).unwrap();

        let err = run_tracker(
            &StaticSource(r#"{"results": "not a list"}"#),
            &store,
            &options(true),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::MalformedResponse(_)));
        assert_eq!(std::fs::read(store.path()).unwrap(), before);
    }

    #[tokio::test]
    async fn test_corrupt_store_aborts_before_save() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("snap.json");
        std::fs::write(&path, "\"just a string\"").unwrap();
        let store = LocalStorage::new(&path);

        let err = run_tracker(&StaticSource(FIRST), &store, &options(true))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::CorruptStore { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "\"just a string\"");
    }

    #[tokio::test]
    async fn test_empty_fetch_overwrites_snapshot() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStorage::new(tmp.path().join("snap.json"));
        run_tracker(&StaticSource(FIRST), &store, &options(true))
            .await
            .unwrap();

        let outcome = run_tracker(
            &StaticSource(r#"{"results": []}"#),
            &store,
            &options(true),
        )
        .await
        .unwrap();

        assert!(outcome.saved);
        assert_eq!(outcome.diff.removed.len(), 2);
        assert!(store.load().await.unwrap().is_empty());
    }
}
