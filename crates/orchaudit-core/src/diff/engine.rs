//! Version diff computation.
//!
//! The entry point is [`diff_versions_across_snapshots`], which accepts the
//! extracted records of both snapshots and produces [`VersionDiffEntry`] rows.

use crate::diff::model::VersionDiffEntry;
use crate::errors::{AuditError, Result};
use crate::model::ApplicationRecord;
use crate::version::{compare_versions, split_image};
use std::collections::HashMap;

/// Index records by `id`; the first occurrence of a duplicate id wins.
fn index_by_id<'r, 'a>(
    records: &'r [ApplicationRecord<'a>],
) -> HashMap<&'a str, &'r ApplicationRecord<'a>> {
    let mut index = HashMap::with_capacity(records.len());
    for app in records {
        if let Some(id) = app.id() {
            index.entry(id).or_insert(app);
        }
    }
    index
}

fn require_image<'a>(app: &ApplicationRecord<'a>, snapshot: u8) -> Result<&'a str> {
    app.docker_image().ok_or_else(|| AuditError::MissingImage {
        app_id: app.display_id().to_string(),
        snapshot,
    })
}

/// Report image version changes between two snapshots
///
/// For each snapshot-1 record, in order, the first snapshot-2 record with
/// the same `id` is its counterpart. Pairs are skipped when there is no
/// counterpart, when both images are byte-identical, or when the text before
/// the first `:` differs (a different component, not a version change).
/// Remaining pairs get an entry carrying both image strings and the
/// comparator's verdict.
///
/// # Errors
/// * `MissingImage` - A matched record lacks `container.docker.image`
pub fn diff_versions_across_snapshots(
    file_1: &[ApplicationRecord<'_>],
    file_2: &[ApplicationRecord<'_>],
) -> Result<Vec<VersionDiffEntry>> {
    let counterparts = index_by_id(file_2);
    let mut entries = Vec::new();

    for app in file_1 {
        let Some(app_id) = app.id() else {
            continue;
        };
        let Some(other) = counterparts.get(app_id) else {
            tracing::debug!(app_id, "no counterpart in snapshot 2");
            continue;
        };

        let image_1 = require_image(app, 1)?;
        let image_2 = require_image(other, 2)?;
        if image_1 == image_2 {
            continue;
        }

        let (component_1, suffix_1) = split_image(image_1);
        let (component_2, suffix_2) = split_image(image_2);
        if component_1 != component_2 {
            tracing::debug!(app_id, component_1, component_2, "component changed, skipped");
            continue;
        }

        entries.push(VersionDiffEntry {
            application: app_id.to_string(),
            image_version_file_1: image_1.to_string(),
            image_version_file_2: image_2.to_string(),
            most_recent: compare_versions(suffix_1, suffix_2).into(),
        });
    }

    Ok(entries)
}
