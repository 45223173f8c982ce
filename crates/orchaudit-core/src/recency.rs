//! Recent configuration changes.
//!
//! Timestamps are naive UTC in the fixed `YYYY-MM-DDTHH:MM:SS.ffffffZ`
//! layout, so ordering the raw strings is ordering the instants.

use crate::errors::{AuditError, Result};
use crate::model::ApplicationRecord;
use chrono::{Duration, NaiveDateTime};

/// Parse layout for `versionInfo.lastConfigChangeAt`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Byte length of `YYYY-MM-DDTHH:MM:SS.ffffffZ`
const TIMESTAMP_LEN: usize = 27;
const FRACTION_DOT_AT: usize = 19;

const SECONDS_PER_HOUR: i64 = 3600;
// Largest whole-second span a `Duration` can hold.
const MAX_WINDOW_SECS: i64 = i64::MAX / 1000;

fn has_fixed_layout(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == TIMESTAMP_LEN
        && bytes[FRACTION_DOT_AT] == b'.'
        && bytes[TIMESTAMP_LEN - 1] == b'Z'
}

/// Parse a `lastConfigChangeAt` value
///
/// Only the fixed-width layout is accepted: exactly six fraction digits.
/// Raw strings are compared when sorting, so any other width would misorder.
///
/// # Errors
/// * `InvalidTimestamp` - The value does not match [`TIMESTAMP_FORMAT`]
pub fn parse_change_timestamp(app_id: &str, raw: &str) -> Result<NaiveDateTime> {
    let invalid = |reason: String| AuditError::InvalidTimestamp {
        app_id: app_id.to_string(),
        value: raw.to_string(),
        reason,
    };
    if !has_fixed_layout(raw) {
        return Err(invalid(
            "expected YYYY-MM-DDTHH:MM:SS.ffffffZ".to_string(),
        ));
    }
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).map_err(|e| invalid(e.to_string()))
}

/// Keep records changed within the last `hours_window` hours, newest first
///
/// A record passes when `now - lastConfigChangeAt` is at most
/// `hours_window` hours, compared at full precision. Timestamps later than `now` always pass.
/// The result is stably sorted by the raw timestamp string, descending.
///
/// # Arguments
/// * `records` - Records to evaluate, typically straight from extraction
/// * `hours_window` - Size of the window in hours
/// * `now` - Reference instant, naive UTC
///
/// # Errors
/// * `MissingTimestamp` - Some record has no `versionInfo.lastConfigChangeAt` string
/// * `InvalidTimestamp` - Some record's timestamp does not parse
///
/// The first failing record, in input order, aborts the whole call.
pub fn filter_and_sort_by_recency<'a>(
    records: &[ApplicationRecord<'a>],
    hours_window: u64,
    now: NaiveDateTime,
) -> Result<Vec<ApplicationRecord<'a>>> {
    let window_secs = i64::try_from(hours_window)
        .map(|h| h.saturating_mul(SECONDS_PER_HOUR))
        .unwrap_or(i64::MAX)
        .min(MAX_WINDOW_SECS);
    let window = Duration::seconds(window_secs);

    let mut recent: Vec<(ApplicationRecord<'a>, &'a str)> = Vec::new();
    for app in records {
        let raw = app
            .last_config_change_at()
            .ok_or_else(|| AuditError::MissingTimestamp {
                app_id: app.display_id().to_string(),
            })?;
        let changed_at = parse_change_timestamp(app.display_id(), raw)?;
        let elapsed = now.signed_duration_since(changed_at);
        if elapsed <= window {
            recent.push((*app, raw));
        } else {
            tracing::debug!(
                app_id = app.display_id(),
                elapsed_ms = elapsed.num_milliseconds(),
                "outside window"
            );
        }
    }

    // Vec::sort_by is stable; equal timestamps keep input order.
    recent.sort_by(|(_, a), (_, b)| b.cmp(a));
    Ok(recent.into_iter().map(|(app, _)| app).collect())
}
