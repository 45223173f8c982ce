//! orchaudit Core - analysis engine for orchestrator configuration snapshots
//!
//! This crate provides:
//! - Application record extraction from arbitrarily nested JSON documents
//! - Recency filtering on `versionInfo.lastConfigChangeAt`
//! - Container port collision detection
//! - Image version comparison and cross-snapshot version diff
//! - The audit pipeline and its plain-text report
//!
//! The engine performs no I/O. Callers hand it parsed `serde_json::Value`
//! trees and an explicit reference instant.

pub mod audit;
pub mod diff;
pub mod errors;
pub mod extract;
pub mod logging_facility;
pub mod model;
pub mod ports;
pub mod recency;
pub mod report;
pub mod version;

// Re-export commonly used types
pub use audit::{run_audit, AuditReport, RecentChange};
pub use diff::{diff_versions_across_snapshots, MostRecent, VersionDiffEntry};
pub use errors::{AuditError, ExError, ExErrorKind, Result};
pub use extract::extract_applications;
pub use model::{ApplicationRecord, PortMapping};
pub use ports::{detect_port_collisions, PortCollisionEntry, PortCollisionGroup};
pub use recency::filter_and_sort_by_recency;
pub use report::render_text_report;
pub use version::{compare_versions, VersionOrdering};
