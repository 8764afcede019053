//! Diff calculation between snapshots.
//!
//! Classifies every key of the previous and current snapshots as added,
//! removed or changed. Records are compared in full, including the raw
//! upstream payload, so a change anywhere in the source record is reported
//! even when the derived display fields are identical.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{NormalizedRecord, Snapshot};

/// A record present in both snapshots with differing content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChangedRecord {
    pub key: String,
    pub before: NormalizedRecord,
    pub after: NormalizedRecord,
}

/// Difference between two snapshots, each list ordered by ascending key.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SnapshotDiff {
    /// Records whose key only exists in the current snapshot
    pub added: Vec<NormalizedRecord>,
    /// Records whose key only exists in the previous snapshot
    pub removed: Vec<NormalizedRecord>,
    /// Records present in both with differing content
    pub changed: Vec<ChangedRecord>,
}

impl SnapshotDiff {
    /// Check if there are any changes.
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty() || !self.changed.is_empty()
    }

    /// Get the total number of changes.
    pub fn change_count(&self) -> usize {
        self.added.len() + self.removed.len() + self.changed.len()
    }
}

/// Calculate the diff between previous and current snapshots.
pub fn calculate_diff(previous: &Snapshot, current: &Snapshot) -> SnapshotDiff {
    let prev_keys: BTreeSet<&str> = previous.keys().map(String::as_str).collect();
    let curr_keys: BTreeSet<&str> = current.keys().map(String::as_str).collect();

    // Added: in current but not in previous
    let added = curr_keys
        .difference(&prev_keys)
        .map(|key| current[*key].clone())
        .collect();

    // Removed: in previous but not in current
    let removed = prev_keys
        .difference(&curr_keys)
        .map(|key| previous[*key].clone())
        .collect();

    // Changed: in both but content differs
    let changed = prev_keys
        .intersection(&curr_keys)
        .filter_map(|key| {
            let before = &previous[*key];
            let after = &current[*key];
            (before != after).then(|| ChangedRecord {
                key: key.to_string(),
                before: before.clone(),
                after: after.clone(),
            })
        })
        .collect();

    SnapshotDiff {
        added,
        removed,
        changed,
    }
}
