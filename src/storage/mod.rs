//! Storage abstractions for snapshot persistence.
//!
//! A snapshot is stored as a single JSON document keyed by record identity:
//!
//! ```text
//! {
//!   "S-100": {
//!     "drug_name": "Example Drug",
//!     "key": "S-100",
//!     "last_updated": null,
//!     "raw": { ... },
//!     "reason": "Manufacturing delay",
//!     "status": "Current"
//!   }
//! }
//! ```
//!
//! Object keys are sorted at every level so unchanged snapshots produce
//! byte-identical files across runs.

pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Snapshot;

// Re-export for convenience
pub use local::LocalStorage;

/// Trait for snapshot storage backends.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load the persisted snapshot, or an empty one if none exists yet.
    async fn load(&self) -> Result<Snapshot>;

    /// Replace the persisted snapshot.
    async fn save(&self, snapshot: &Snapshot) -> Result<()>;

    /// Whether a snapshot has been persisted before.
    async fn exists(&self) -> Result<bool>;

    /// Human-readable location, for logs.
    fn location(&self) -> String;
}
