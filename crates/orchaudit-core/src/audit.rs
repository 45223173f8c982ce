//! Audit pipeline.
//!
//! Runs the analyses over already-parsed documents and bundles the results
//! into an [`AuditReport`].
//!
//! ## Logging Ownership
//!
//! This module owns lifecycle logging for the analyses:
//! - `log_op_start!` at entry of each stage
//! - `log_op_end!` on success, with the result size
//! - `log_op_error!` on failure
//!
//! The analyses themselves only use `tracing::debug!()` for skipped records.

use crate::diff::{diff_versions_across_snapshots, VersionDiffEntry};
use crate::errors::Result;
use crate::extract::extract_applications;
use crate::model::ApplicationRecord;
use crate::ports::{detect_port_collisions, PortCollisionGroup};
use crate::recency::filter_and_sort_by_recency;
use crate::{log_op_end, log_op_error, log_op_start};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// An application inside the recency window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecentChange {
    pub application: String,
    pub last_config_change_at: String,
}

impl From<&ApplicationRecord<'_>> for RecentChange {
    fn from(app: &ApplicationRecord<'_>) -> Self {
        Self {
            application: app.display_id().to_string(),
            last_config_change_at: app.last_config_change_at().unwrap_or_default().to_string(),
        }
    }
}

/// Results of one audit run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditReport {
    /// Recency window the run used, in hours
    pub window_hours: u64,
    /// Newest first
    pub recent_changes: Vec<RecentChange>,
    pub port_collisions: Vec<PortCollisionGroup>,
    /// `None` when no second snapshot was given
    pub version_diff: Option<Vec<VersionDiffEntry>>,
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

fn extract_logged(doc: &Value, snapshot: u8) -> Vec<ApplicationRecord<'_>> {
    log_op_start!("extract_applications", snapshot);
    let start = Instant::now();
    let apps = extract_applications(doc);
    log_op_end!(
        "extract_applications",
        duration_ms = elapsed_ms(start),
        snapshot,
        apps_len = apps.len()
    );
    apps
}

/// Run every analysis over one or two configuration snapshots
///
/// ## Arguments
///
/// - `primary`: the snapshot under audit
/// - `hours_window`: recency window in hours
/// - `secondary`: optional second snapshot for the version diff
/// - `now`: reference instant for the recency window, naive UTC
///
/// ## Errors
///
/// - `MissingTimestamp` / `InvalidTimestamp`: a primary record cannot be
///   placed in time
/// - `MissingImage`: a record matched across snapshots has no image
pub fn run_audit(
    primary: &Value,
    hours_window: u64,
    secondary: Option<&Value>,
    now: NaiveDateTime,
) -> Result<AuditReport> {
    let apps = extract_logged(primary, 1);

    log_op_start!("filter_and_sort_by_recency", hours_window);
    let start = Instant::now();
    let recent = filter_and_sort_by_recency(&apps, hours_window, now).map_err(|e| {
        log_op_error!(
            "filter_and_sort_by_recency",
            e.clone(),
            duration_ms = elapsed_ms(start)
        );
        e
    })?;
    log_op_end!(
        "filter_and_sort_by_recency",
        duration_ms = elapsed_ms(start),
        result_len = recent.len()
    );

    log_op_start!("detect_port_collisions", apps_len = apps.len());
    let start = Instant::now();
    let port_collisions = detect_port_collisions(&apps);
    log_op_end!(
        "detect_port_collisions",
        duration_ms = elapsed_ms(start),
        result_len = port_collisions.len()
    );

    let version_diff = match secondary {
        Some(doc) => {
            let other_apps = extract_logged(doc, 2);

            log_op_start!("diff_versions_across_snapshots");
            let start = Instant::now();
            let entries = diff_versions_across_snapshots(&apps, &other_apps).map_err(|e| {
                log_op_error!(
                    "diff_versions_across_snapshots",
                    e.clone(),
                    duration_ms = elapsed_ms(start)
                );
                e
            })?;
            log_op_end!(
                "diff_versions_across_snapshots",
                duration_ms = elapsed_ms(start),
                result_len = entries.len()
            );
            Some(entries)
        }
        None => None,
    };

    Ok(AuditReport {
        window_hours: hours_window,
        recent_changes: recent.iter().map(RecentChange::from).collect(),
        port_collisions,
        version_diff,
    })
}
