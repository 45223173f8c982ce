use crate::model::ApplicationRecord;
use serde_json::Value;

/// Key whose array value holds application records
pub const APPS_KEY: &str = "apps";

/// Collect every application record in a configuration document
///
/// Walks the tree depth-first in document order. Under an object, a key
/// named exactly `"apps"` whose value is an array contributes each element
/// of that array as a record; the elements themselves are not scanned
/// further. Every other member value, including an `"apps"` that is not an
/// array, is walked recursively. Arrays are walked element by element and
/// scalars contribute nothing.
///
/// # Arguments
/// * `doc` - Parsed configuration document
///
/// # Returns
/// Records in discovery order. Arrays reachable twice are collected twice.
pub fn extract_applications(doc: &Value) -> Vec<ApplicationRecord<'_>> {
    let mut apps = Vec::new();
    collect_into(doc, &mut apps);
    apps
}

fn collect_into<'a>(value: &'a Value, apps: &mut Vec<ApplicationRecord<'a>>) {
    match value {
        Value::Object(members) => {
            for (key, member) in members {
                match member {
                    Value::Array(records) if key == APPS_KEY => {
                        apps.extend(records.iter().map(ApplicationRecord::new));
                    }
                    _ => collect_into(member, apps),
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_into(item, apps);
            }
        }
        Value::String(_) | Value::Number(_) | Value::Bool(_) | Value::Null => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids<'a>(apps: &[ApplicationRecord<'a>]) -> Vec<&'a str> {
        apps.iter().map(|a| a.display_id()).collect()
    }

    #[test]
    fn test_top_level_apps() {
        let doc = json!({"apps": [{"id": "a"}, {"id": "b"}]});
        assert_eq!(ids(&extract_applications(&doc)), vec!["a", "b"]);
    }

    #[test]
    fn test_nested_groups_in_document_order() {
        let doc = json!({
            "id": "/",
            "groups": [
                {"id": "/one", "apps": [{"id": "/one/a"}]},
                {"id": "/two", "groups": [{"apps": [{"id": "/two/x/b"}]}]}
            ],
            "apps": [{"id": "/c"}]
        });
        assert_eq!(
            ids(&extract_applications(&doc)),
            vec!["/one/a", "/two/x/b", "/c"]
        );
    }

    #[test]
    fn test_scalar_root_yields_nothing() {
        assert!(extract_applications(&json!(null)).is_empty());
        assert!(extract_applications(&json!(17)).is_empty());
        assert!(extract_applications(&json!("apps")).is_empty());
    }
}
