//! Plain-text rendering of an [`AuditReport`].

use crate::audit::AuditReport;
use crate::errors::Result;

pub const NO_RECENT_CHANGES: &str = "No applications changed within the time window.";
pub const NO_PORT_COLLISIONS: &str = "No container port collisions found.";
pub const NO_VERSION_DIFF: &str = "No image version differences found.";

/// Render the report in three sections
///
/// The version section only appears when the report carries a diff. Empty
/// sections print an explicit "no results" line. Diff rows are printed as a
/// pretty JSON array.
///
/// # Errors
/// * `Serialization` - The diff rows fail to encode as JSON
pub fn render_text_report(report: &AuditReport) -> Result<String> {
    let mut out = String::new();

    // Recency
    out.push_str(&format!(
        "== Applications changed in the last {} hour(s) ==\n",
        report.window_hours
    ));
    if report.recent_changes.is_empty() {
        out.push_str(NO_RECENT_CHANGES);
        out.push('\n');
    }
    for change in &report.recent_changes {
        out.push_str(&format!(
            "{}  {}\n",
            change.last_config_change_at, change.application
        ));
    }

    // Ports
    out.push_str("\n== Container port collisions ==\n");
    if report.port_collisions.is_empty() {
        out.push_str(NO_PORT_COLLISIONS);
        out.push('\n');
    }
    for group in &report.port_collisions {
        out.push_str(&format!(
            "containerPort {} ({} applications):\n",
            group.container_port,
            group.entries.len()
        ));
        for entry in &group.entries {
            out.push_str(&format!(
                "  - {} (hostPort {}, servicePort {})\n",
                entry.application, entry.host_port, entry.service_port
            ));
        }
    }

    // Versions
    if let Some(diff) = &report.version_diff {
        out.push_str("\n== Image version differences ==\n");
        if diff.is_empty() {
            out.push_str(NO_VERSION_DIFF);
        } else {
            out.push_str(&serde_json::to_string_pretty(diff)?);
        }
        out.push('\n');
    }

    Ok(out)
}
