#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{app_changed_at, group, now};
use orchaudit_core::audit::run_audit;
use orchaudit_core::errors::{AuditError, ExError, ExErrorKind};
use orchaudit_core::logging_facility::test_capture::init_test_capture;
use orchaudit_core::{log_op_end, log_op_error, log_op_start};
use orchaudit_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use serde_json::json;

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_kind_and_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = AuditError::MissingTimestamp {
        app_id: "/web".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let error_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();

    assert_eq!(error_events.len(), 1, "Should have exactly one error event");
    assert_eq!(error_events[0].field("err_code"), Some("ERR_MISSING_FIELD"));
    assert_eq!(error_events[0].field("err_kind"), Some("MissingField"));
    assert!(error_events[0]
        .field("error")
        .is_some_and(|e| e.starts_with("[ERR_MISSING_FIELD]") && e.contains("/web")));
    assert_eq!(error_events[0].level, tracing::Level::ERROR);
}

#[test]
fn test_log_macros_with_multiple_fields() {
    let capture = init_test_capture();
    let op_name = "test_log_macros_fields_unique_4";

    log_op_start!(op_name, app_id = "/api", apps_len = 3);

    let start_event = capture
        .events_for_op(op_name)
        .into_iter()
        .next()
        .expect("Should have start event");

    assert_eq!(start_event.field("app_id"), Some("/api"));
    assert_eq!(start_event.field("apps_len"), Some("3"));
    assert!(start_event
        .component
        .as_deref()
        .is_some_and(|c| c.starts_with("logging_facility_tests")));
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_capture_assert_event_exists_fails() {
    let capture = init_test_capture();

    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_START);
}

#[test]
fn test_capture_count_events() {
    let capture = init_test_capture();
    let op1_name = "test_count_events_op1_unique_5";
    let op2_name = "test_count_events_op2_unique_5";

    log_op_start!(op1_name);
    log_op_start!(op2_name);
    log_op_end!(op1_name, duration_ms = 10);

    let start_count = capture.count_events(|e| {
        e.event.as_deref() == Some(EVENT_START)
            && (e.op.as_deref() == Some(op1_name) || e.op.as_deref() == Some(op2_name))
    });
    let end_count = capture.count_events(|e| {
        e.event.as_deref() == Some(EVENT_END)
            && (e.op.as_deref() == Some(op1_name) || e.op.as_deref() == Some(op2_name))
    });

    assert_eq!(start_count, 2);
    assert_eq!(end_count, 1);
}

#[test]
fn test_error_conversion_matches_logged_code() {
    let capture = init_test_capture();
    let op_name = "test_error_conversion_unique_6";

    let err = AuditError::MissingImage {
        app_id: "/db".to_string(),
        snapshot: 2,
    };
    log_op_error!(op_name, err.clone(), duration_ms = 5);

    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::MissingField);

    let error_event = capture
        .events_for_op(op_name)
        .into_iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("Should have error event for this test");
    assert_eq!(error_event.field("err_code"), Some(ex_err.code()));
}

// run_audit logs under fixed op names, so exactly one test in this binary
// drives the success path and one drives the failure path.

#[test]
fn test_audit_run_logs_each_stage_once() {
    let capture = init_test_capture();
    let mut web = app_changed_at("/web", "2024-06-01T11:00:00.000000Z");
    web["container"] = json!({"docker": {"image": "reg/web:1.0-20240601-11"}});
    let mut api = app_changed_at("/api", "2024-06-01T10:00:00.000000Z");
    api["container"] = json!({"docker": {"image": "reg/api:1.0-20240601-10"}});
    let primary = group(vec![web, api]);

    run_audit(&primary, 7777, Some(&primary), now()).unwrap();

    let recency = capture.events_for_op("filter_and_sort_by_recency");
    let start = recency
        .iter()
        .find(|e| e.event.as_deref() == Some(EVENT_START) && e.field("hours_window") == Some("7777"))
        .expect("recency start event");
    assert_eq!(start.field("hours_window"), Some("7777"));
    assert!(recency
        .iter()
        .any(|e| e.event.as_deref() == Some(EVENT_END) && e.field("result_len") == Some("2")));

    let extract_snapshots: Vec<_> = capture
        .events_for_op("extract_applications")
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .filter_map(|e| e.field("snapshot").map(str::to_string))
        .collect();
    assert!(extract_snapshots.contains(&"1".to_string()));
    assert!(extract_snapshots.contains(&"2".to_string()));

    capture.assert_event_exists("detect_port_collisions", EVENT_END);
    capture.assert_event_exists("diff_versions_across_snapshots", EVENT_END);
}

#[test]
fn test_audit_failure_logs_end_error() {
    let capture = init_test_capture();
    let primary = group(vec![json!({"id": "/no-timestamp-logged"})]);

    let err = run_audit(&primary, 1, None, now()).unwrap_err();
    assert!(matches!(err, AuditError::MissingTimestamp { .. }));

    let error_event = capture
        .events_for_op("filter_and_sort_by_recency")
        .into_iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("Should have error event");
    assert_eq!(error_event.field("err_code"), Some("ERR_MISSING_FIELD"));
}
