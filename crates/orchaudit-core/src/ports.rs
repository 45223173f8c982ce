//! Container port collision detection.

use crate::model::ApplicationRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One application's claim on a container port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PortCollisionEntry {
    /// Application `id`
    pub application: String,
    pub host_port: i64,
    pub service_port: i64,
}

/// Every claim on one container port.
///
/// Only produced when `entries.len() > 1`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PortCollisionGroup {
    pub container_port: i64,
    /// Claims in traversal order
    pub entries: Vec<PortCollisionEntry>,
}

/// Group port mappings by container port and keep only the collisions
///
/// Records without a string `id`, or whose `container.portMappings` is
/// absent or has any malformed entry, are left out entirely; the rest of
/// the run is unaffected. A group is kept when it holds two or more entries.
///
/// # Returns
/// Groups in order of the first time their container port was seen.
pub fn detect_port_collisions(records: &[ApplicationRecord<'_>]) -> Vec<PortCollisionGroup> {
    let mut groups: Vec<PortCollisionGroup> = Vec::new();
    let mut slot_by_port: HashMap<i64, usize> = HashMap::new();

    for app in records {
        let (Some(app_id), Some(mappings)) = (app.id(), app.port_mappings()) else {
            tracing::debug!(
                app_id = app.display_id(),
                "no usable port mappings, skipped"
            );
            continue;
        };

        for mapping in mappings {
            let slot = *slot_by_port
                .entry(mapping.container_port)
                .or_insert_with(|| {
                    groups.push(PortCollisionGroup {
                        container_port: mapping.container_port,
                        entries: Vec::new(),
                    });
                    groups.len() - 1
                });
            groups[slot].entries.push(PortCollisionEntry {
                application: app_id.to_string(),
                host_port: mapping.host_port,
                service_port: mapping.service_port,
            });
        }
    }

    groups.retain(|g| g.entries.len() > 1);
    groups
}
