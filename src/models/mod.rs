// src/models/mod.rs

//! Domain models for the shortage tracker.
//!
//! This module contains the data structures shared by the fetch, diff and
//! storage layers, plus the application configuration.

mod config;
mod record;

// Re-export all public types
pub use config::{Config, ReportConfig, SourceConfig, StoreConfig};
pub use record::{NormalizedRecord, RawRecord, Snapshot};
