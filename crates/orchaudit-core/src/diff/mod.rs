//! Cross-snapshot image version diff.
//!
//! Joins the applications of two configuration snapshots by `id` and
//! reports, for every pair whose image changed within the same
//! `registry/component`, which snapshot holds the newer version.
//!
//! ## Entry point
//!
//! ```
//! use orchaudit_core::diff::diff_versions_across_snapshots;
//! use orchaudit_core::extract::extract_applications;
//! use serde_json::json;
//!
//! let one = json!({"apps": [{"id": "a", "container": {"docker": {"image": "reg/x:1.0-20240101-01"}}}]});
//! let two = json!({"apps": [{"id": "a", "container": {"docker": {"image": "reg/x:1.1-20240101-01"}}}]});
//! let entries = diff_versions_across_snapshots(
//!     &extract_applications(&one),
//!     &extract_applications(&two),
//! )?;
//! assert_eq!(entries.len(), 1);
//! # Ok::<(), orchaudit_core::AuditError>(())
//! ```

pub mod engine;
pub mod model;

pub use engine::diff_versions_across_snapshots;
pub use model::{MostRecent, VersionDiffEntry};
