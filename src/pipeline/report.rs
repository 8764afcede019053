//! Plain-text run summary.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::NormalizedRecord;
use crate::pipeline::{ChangedRecord, SnapshotDiff};

/// Items listed per section when no limit is configured.
pub const DEFAULT_MAX_ITEMS: usize = 5;

/// Render the report stamped with the current UTC time.
pub fn format_report(fetched: usize, diff: &SnapshotDiff, max_items: usize) -> String {
    format_report_at(Utc::now(), fetched, diff, max_items)
}

/// Render the report stamped with `now`.
pub fn format_report_at(
    now: DateTime<Utc>,
    fetched: usize,
    diff: &SnapshotDiff,
    max_items: usize,
) -> String {
    let mut lines = vec![
        format!(
            "Timestamp (UTC): {}",
            now.to_rfc3339_opts(SecondsFormat::Micros, false)
        ),
        format!("Fetched records: {}", fetched),
    ];
    lines.extend(preview("Added", &diff.added, max_items));
    lines.extend(preview("Removed", &diff.removed, max_items));
    lines.extend(preview_changed(&diff.changed, max_items));
    lines.join("\n")
}

fn preview(label: &str, items: &[NormalizedRecord], max_items: usize) -> Vec<String> {
    let mut lines = vec![format!("{}: {}", label, items.len())];
    lines.extend(items.iter().take(max_items).map(|item| {
        format!(
            "  - {} [{}] status={}",
            item.display_name(),
            item.key,
            item.display_status()
        )
    }));
    lines.extend(elision(items.len(), max_items));
    lines
}

fn preview_changed(changed: &[ChangedRecord], max_items: usize) -> Vec<String> {
    let mut lines = vec![format!("Changed: {}", changed.len())];
    lines.extend(changed.iter().take(max_items).map(|item| {
        format!(
            "  - {} [{}] status {} -> {}",
            item.after.display_name(),
            item.key,
            item.before.display_status(),
            item.after.display_status()
        )
    }));
    lines.extend(elision(changed.len(), max_items));
    lines
}

fn elision(total: usize, max_items: usize) -> Option<String> {
    (total > max_items).then(|| format!("  ... and {} more", total - max_items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::calculate_diff;
    use crate::services::build_snapshot;
    use chrono::TimeZone;
    use serde_json::{Value, json};

    fn snapshot(values: Vec<Value>) -> crate::models::Snapshot {
        build_snapshot(values.into_iter().filter_map(|v| v.as_object().cloned()))
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 3, 4, 5, 6).unwrap()
    }

    #[test]
    fn test_report_layout() {
        let old = snapshot(vec![
            json!({ "id": "1", "drug_name": "Drug A", "status": "Current" }),
            json!({ "id": "2", "drug_name": "Drug B", "status": "Current" }),
        ]);
        let new = snapshot(vec![
            json!({ "id": "1", "drug_name": "Drug A", "status": "Resolved" }),
            json!({ "id": "3", "status": "Current" }),
        ]);
        let diff = calculate_diff(&old, &new);

        let report = format_report_at(fixed_time(), 2, &diff, DEFAULT_MAX_ITEMS);

        assert_eq!(
            report,
            [
                "Timestamp (UTC): 2026-02-03T04:05:06.000000+00:00",
                "Fetched records: 2",
                "Added: 1",
                "  - unknown [3] status=Current",
                "Removed: 1",
                "  - Drug B [2] status=Current",
                "Changed: 1",
                "  - Drug A [1] status Current -> Resolved",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_report_elides_overflow() {
        let new = snapshot(
            (0..8)
                .map(|i| json!({ "id": format!("k{i}"), "drug_name": format!("D{i}") }))
                .collect(),
        );
        let diff = calculate_diff(&Default::default(), &new);

        let report = format_report_at(fixed_time(), 8, &diff, 5);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[2], "Added: 8");
        assert_eq!(lines[3], "  - D0 [k0] status=n/a");
        assert_eq!(lines[7], "  - D4 [k4] status=n/a");
        assert_eq!(lines[8], "  ... and 3 more");
        assert_eq!(lines[9], "Removed: 0");
        assert_eq!(lines[10], "Changed: 0");
    }

    #[test]
    fn test_report_is_deterministic() {
        let diff = SnapshotDiff::default();
        assert_eq!(
            format_report_at(fixed_time(), 0, &diff, 5),
            format_report_at(fixed_time(), 0, &diff, 5)
        );
    }
}
