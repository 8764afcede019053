// src/services/normalizer.rs

//! Record normalization.
//!
//! Upstream shortage records have no fixed schema, so every derived field is
//! read from an ordered list of candidate source fields and the first usable
//! value wins.

use serde_json::Value;

use crate::models::{NormalizedRecord, RawRecord, Snapshot};
use crate::utils::canonical_json;

/// Identity-bearing fields, highest priority first.
pub const KEY_FIELDS: &[&str] = &[
    "id",
    "shortage_id",
    "shortage_number",
    "set_id",
    "application_number",
    "product_ndc",
];

pub const DRUG_NAME_FIELDS: &[&str] = &[
    "drug_name",
    "proprietary_name",
    "generic_name",
    "product_description",
];

pub const STATUS_FIELDS: &[&str] = &[
    "status",
    "shortage_status",
    "current_status",
    "availability_status",
];

pub const REASON_FIELDS: &[&str] = &["reason", "reason_for_shortage", "shortage_reason"];

pub const LAST_UPDATED_FIELDS: &[&str] =
    &["last_updated", "revision_date", "updated_at", "created"];

/// Return the first candidate field that is present, non-null and not `""`.
///
/// Strings are returned as-is; any other JSON value is rendered as JSON text.
pub fn pick_first(record: &RawRecord, fields: &[&str]) -> Option<String> {
    fields
        .iter()
        .filter_map(|field| record.get(*field))
        .find_map(value_text)
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Derive the identity key of a record.
///
/// Falls back to the canonical (key-sorted) JSON of the whole record, so two
/// anonymous records with identical content share a key.
pub fn record_key(record: &RawRecord) -> String {
    pick_first(record, KEY_FIELDS).unwrap_or_else(|| canonical_json(record))
}

/// Normalize a raw upstream record.
pub fn normalize(record: RawRecord) -> NormalizedRecord {
    NormalizedRecord {
        key: record_key(&record),
        drug_name: pick_first(&record, DRUG_NAME_FIELDS),
        status: pick_first(&record, STATUS_FIELDS),
        reason: pick_first(&record, REASON_FIELDS),
        last_updated: pick_first(&record, LAST_UPDATED_FIELDS),
        raw: record,
    }
}

/// Fold records into a snapshot; a later record replaces an earlier one
/// with the same key.
pub fn build_snapshot(records: impl IntoIterator<Item = RawRecord>) -> Snapshot {
    let mut snapshot = Snapshot::new();
    for record in records {
        let normalized = normalize(record);
        snapshot.insert(normalized.key.clone(), normalized);
    }
    snapshot
}
