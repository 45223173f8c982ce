use chrono::NaiveDateTime;
use orchaudit_core::recency::TIMESTAMP_FORMAT;
use orchaudit_core::ApplicationRecord;
use serde_json::{json, Value};

/// Reference instant shared by the recency tests
pub const NOW: &str = "2024-06-01T12:00:00.000000Z";

/// Parse a timestamp in the orchestrator layout
#[allow(dead_code)]
pub fn at(raw: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).unwrap()
}

/// The reference instant
#[allow(dead_code)]
pub fn now() -> NaiveDateTime {
    at(NOW)
}

/// Application that last changed at `changed_at`
#[allow(dead_code)]
pub fn app_changed_at(id: &str, changed_at: &str) -> Value {
    json!({
        "id": id,
        "versionInfo": {"lastConfigChangeAt": changed_at}
    })
}

/// Application running `image`
#[allow(dead_code)]
pub fn app_with_image(id: &str, image: &str) -> Value {
    json!({
        "id": id,
        "container": {"docker": {"image": image}}
    })
}

/// Application declaring `(containerPort, hostPort, servicePort)` mappings
#[allow(dead_code)]
pub fn app_with_ports(id: &str, mappings: &[(i64, i64, i64)]) -> Value {
    let mappings: Vec<Value> = mappings
        .iter()
        .map(|(c, h, s)| json!({"containerPort": c, "hostPort": h, "servicePort": s}))
        .collect();
    json!({
        "id": id,
        "container": {"type": "DOCKER", "portMappings": mappings}
    })
}

/// Wrap records in a minimal group document
#[allow(dead_code)]
pub fn group(apps: Vec<Value>) -> Value {
    json!({"id": "/", "apps": apps, "groups": []})
}

/// Ids of records, unidentified ones as the placeholder
#[allow(dead_code)]
pub fn ids<'a>(apps: &[ApplicationRecord<'a>]) -> Vec<&'a str> {
    apps.iter().map(|a| a.display_id()).collect()
}
