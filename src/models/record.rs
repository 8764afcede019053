//! Shortage record data structures.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A record exactly as returned by the data source.
///
/// No fixed schema: any field may be absent, `null` or empty.
pub type RawRecord = Map<String, Value>;

/// Records keyed by identity, ordered by key.
pub type Snapshot = BTreeMap<String, NormalizedRecord>;

/// A shortage record reduced to a stable identity and display fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalizedRecord {
    /// Stable identity of the record (never empty)
    pub key: String,

    /// Display name of the drug
    #[serde(default)]
    pub drug_name: Option<String>,

    /// Shortage status, e.g. "Current" or "Resolved"
    #[serde(default)]
    pub status: Option<String>,

    /// Reason given for the shortage
    #[serde(default)]
    pub reason: Option<String>,

    /// Last update timestamp as reported upstream
    #[serde(default)]
    pub last_updated: Option<String>,

    /// The untouched upstream record
    #[serde(default)]
    pub raw: RawRecord,
}

impl NormalizedRecord {
    /// Drug name for display, `unknown` when absent.
    pub fn display_name(&self) -> &str {
        self.drug_name.as_deref().unwrap_or("unknown")
    }

    /// Status for display, `n/a` when absent.
    pub fn display_status(&self) -> &str {
        self.status.as_deref().unwrap_or("n/a")
    }
}
