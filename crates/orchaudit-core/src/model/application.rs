//! Borrowed view over one application record.
//!
//! Records are never deserialised into an owned struct: orchestrator configs
//! carry many more fields than the audit needs and any of them may be absent.
//! Each accessor looks up exactly one path and reports presence as `Option`.

use serde_json::Value;

/// Placeholder used in errors and logs for records without a string `id`
pub const UNIDENTIFIED_APP: &str = "<unidentified>";

const LAST_CONFIG_CHANGE_AT: &str = "/versionInfo/lastConfigChangeAt";
const PORT_MAPPINGS: &str = "/container/portMappings";
const DOCKER_IMAGE: &str = "/container/docker/image";

/// One element of an `"apps"` array, borrowed from its document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApplicationRecord<'a> {
    value: &'a Value,
}

impl<'a> ApplicationRecord<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// The raw JSON this record views
    pub fn as_value(&self) -> &'a Value {
        self.value
    }

    /// `id`, when present and a string
    pub fn id(&self) -> Option<&'a str> {
        self.value.get("id").and_then(Value::as_str)
    }

    /// `id` or a placeholder, for error and log context
    pub fn display_id(&self) -> &'a str {
        self.id().unwrap_or(UNIDENTIFIED_APP)
    }

    /// `versionInfo.lastConfigChangeAt`, when present and a string
    pub fn last_config_change_at(&self) -> Option<&'a str> {
        self.value
            .pointer(LAST_CONFIG_CHANGE_AT)
            .and_then(Value::as_str)
    }

    /// `container.docker.image`, when present and a string
    pub fn docker_image(&self) -> Option<&'a str> {
        self.value.pointer(DOCKER_IMAGE).and_then(Value::as_str)
    }

    /// `container.portMappings`, all or nothing.
    ///
    /// Returns `None` when the path is absent, is not an array, or any entry
    /// is not a well-formed mapping. An empty array yields `Some(vec![])`.
    pub fn port_mappings(&self) -> Option<Vec<PortMapping>> {
        self.value
            .pointer(PORT_MAPPINGS)?
            .as_array()?
            .iter()
            .map(PortMapping::from_value)
            .collect()
    }
}

/// One `container.portMappings` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortMapping {
    pub container_port: i64,
    pub host_port: i64,
    pub service_port: i64,
}

impl PortMapping {
    /// Read a mapping object; every port must be a JSON integer.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            container_port: obj.get("containerPort")?.as_i64()?,
            host_port: obj.get("hostPort")?.as_i64()?,
            service_port: obj.get("servicePort")?.as_i64()?,
        })
    }
}
