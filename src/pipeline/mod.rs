//! Pipeline stages for shortage tracking.
//!
//! - `calculate_diff`: Compare the stored snapshot with the fresh one
//! - `format_report`: Render the outcome of a run
//! - `run_tracker`: Execute the whole run

pub mod diff;
pub mod report;
pub mod track;

pub use diff::{ChangedRecord, SnapshotDiff, calculate_diff};
pub use report::{DEFAULT_MAX_ITEMS, format_report, format_report_at};
pub use track::{TrackOptions, TrackOutcome, run_tracker};
