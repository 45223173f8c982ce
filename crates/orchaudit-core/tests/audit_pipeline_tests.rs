//! End-to-end runs of the audit pipeline over in-memory documents.

mod common;

use common::{app_changed_at, group, now};
use orchaudit_core::audit::run_audit;
use orchaudit_core::diff::MostRecent;
use orchaudit_core::errors::AuditError;
use orchaudit_core::report::{render_text_report, NO_PORT_COLLISIONS, NO_RECENT_CHANGES};
use serde_json::{json, Value};

fn full_app(id: &str, changed_at: &str, image: &str, container_port: i64) -> Value {
    let mut app = app_changed_at(id, changed_at);
    app["container"] = json!({
        "type": "DOCKER",
        "docker": {"image": image},
        "portMappings": [{"containerPort": container_port, "hostPort": 0, "servicePort": 10000 + container_port}]
    });
    app
}

#[test]
fn test_document_without_apps_yields_empty_reports() {
    let doc = json!({"id": "/", "groups": [{"id": "/empty", "groups": []}]});

    let report = run_audit(&doc, 24, Some(&doc), now()).unwrap();

    assert!(report.recent_changes.is_empty());
    assert!(report.port_collisions.is_empty());
    assert_eq!(report.version_diff, Some(vec![]));

    let text = render_text_report(&report).unwrap();
    assert!(text.contains(NO_RECENT_CHANGES));
    assert!(text.contains(NO_PORT_COLLISIONS));
}

#[test]
fn test_single_snapshot_has_no_version_section() {
    let doc = group(vec![full_app(
        "/web",
        "2024-06-01T11:00:00.000000Z",
        "reg/web:1.0-20240601-11",
        80,
    )]);

    let report = run_audit(&doc, 24, None, now()).unwrap();

    assert_eq!(report.window_hours, 24);
    assert_eq!(report.recent_changes.len(), 1);
    assert_eq!(report.recent_changes[0].application, "/web");
    assert_eq!(
        report.recent_changes[0].last_config_change_at,
        "2024-06-01T11:00:00.000000Z"
    );
    assert!(report.version_diff.is_none());
}

#[test]
fn test_full_run_over_two_snapshots() {
    let one = group(vec![
        full_app("/web", "2024-06-01T11:00:00.000000Z", "reg/web:1.0-20240601-11", 80),
        full_app("/api", "2024-06-01T10:00:00.000000Z", "reg/api:2.3-20240601-10", 80),
        full_app("/old", "2024-01-01T00:00:00.000000Z", "reg/old:1.0-20240101-00", 9000),
    ]);
    let two = group(vec![
        full_app("/web", "2024-06-01T11:00:00.000000Z", "reg/web:1.1-20240601-11", 80),
        full_app("/api", "2024-06-01T10:00:00.000000Z", "reg/api:2.3-20240601-10", 80),
    ]);

    let report = run_audit(&one, 12, Some(&two), now()).unwrap();

    let recent: Vec<_> = report
        .recent_changes
        .iter()
        .map(|c| c.application.as_str())
        .collect();
    assert_eq!(recent, vec!["/web", "/api"]);

    assert_eq!(report.port_collisions.len(), 1);
    assert_eq!(report.port_collisions[0].container_port, 80);

    let diff = report.version_diff.expect("second snapshot supplied");
    assert_eq!(diff.len(), 1);
    assert_eq!(diff[0].application, "/web");
    assert_eq!(diff[0].most_recent, MostRecent::ImageVersionFile2);
}

#[test]
fn test_secondary_timestamps_are_not_checked() {
    let one = group(vec![full_app(
        "/web",
        "2024-06-01T11:00:00.000000Z",
        "reg/web:1.0-1-1",
        80,
    )]);
    let two = group(vec![json!({
        "id": "/web",
        "container": {"docker": {"image": "reg/web:1.1-1-1"}}
    })]);

    let report = run_audit(&one, 1, Some(&two), now()).unwrap();

    assert_eq!(report.version_diff.map(|d| d.len()), Some(1));
}

#[test]
fn test_missing_timestamp_aborts_run() {
    let doc = group(vec![json!({"id": "/no-ts"})]);

    let err = run_audit(&doc, 24, None, now()).unwrap_err();

    assert!(matches!(err, AuditError::MissingTimestamp { .. }));
}

#[test]
fn test_missing_image_aborts_run() {
    let one = group(vec![app_changed_at("/web", "2024-06-01T11:00:00.000000Z")]);
    let two = group(vec![app_changed_at("/web", "2024-06-01T11:00:00.000000Z")]);

    let err = run_audit(&one, 24, Some(&two), now()).unwrap_err();

    assert!(matches!(err, AuditError::MissingImage { snapshot: 1, .. }));
}

#[test]
fn test_report_serializes_for_machine_output() {
    let doc = group(vec![full_app(
        "/web",
        "2024-06-01T11:00:00.000000Z",
        "reg/web:1.0-1-1",
        80,
    )]);

    let report = run_audit(&doc, 2, None, now()).unwrap();
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["window_hours"], json!(2));
    assert_eq!(value["recent_changes"][0]["application"], json!("/web"));
    assert_eq!(value["port_collisions"], json!([]));
    assert_eq!(value["version_diff"], Value::Null);
}
