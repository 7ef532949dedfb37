use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// Custom-field keys defined on the source system. The mixed casing mirrors
/// the field names as they exist in NetBox.
pub mod fields {
    pub const OWNER: &str = "owner";
    pub const BIRTHDAY: &str = "Birthday";
    pub const AGE: &str = "age";
    pub const SERVICE_CONTRACT: &str = "service_contract";
    pub const WARRANTY: &str = "warranty";
    pub const SOFTWARE: &str = "SW";
    pub const SOFTWARE_VERSION: &str = "SW_Version";
}

/// Brief reference to a related object as embedded in list payloads. Only
/// the display fields are retained; identity stays on the source system.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ObjectRef {
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// IP address references carry `address` instead of `name`.
    #[serde(default)]
    pub address: Option<String>,
}

impl ObjectRef {
    /// Canonical display name of the referenced object.
    pub fn label(&self) -> &str {
        self.display
            .as_deref()
            .or(self.name.as_deref())
            .or(self.address.as_deref())
            .unwrap_or("")
    }
}

/// Device status as a value/label pair, e.g. `{"value": "active",
/// "label": "Active"}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StatusField {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

impl StatusField {
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("")
    }
}

/// Device type reference with its nested manufacturer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DeviceTypeRef {
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<ObjectRef>,
}

impl DeviceTypeRef {
    pub fn label(&self) -> &str {
        self.display
            .as_deref()
            .or(self.model.as_deref())
            .unwrap_or("")
    }
}

/// Read-only view of one device record as returned by the source. Fetched
/// per run and never persisted locally; the only mutation path is the age
/// write-back.
#[derive(Debug, Clone, Deserialize)]
pub struct Device {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub serial: String,
    #[serde(default)]
    pub status: Option<StatusField>,
    #[serde(default)]
    pub site: Option<ObjectRef>,
    #[serde(default)]
    pub rack: Option<ObjectRef>,
    #[serde(default, alias = "device_role")]
    pub role: Option<ObjectRef>,
    #[serde(default)]
    pub device_type: Option<DeviceTypeRef>,
    #[serde(default)]
    pub platform: Option<ObjectRef>,
    #[serde(default)]
    pub primary_ip: Option<ObjectRef>,
    /// Rack-unit position, when the device is mounted.
    #[serde(default)]
    pub position: Option<f64>,
    /// Open-ended custom attribute map; values may be any scalar or null.
    #[serde(default)]
    pub custom_fields: BTreeMap<String, Value>,
}

impl Device {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Whether the status label is exactly the literal `Active`.
    pub fn is_active(&self) -> bool {
        self.status.as_ref().is_some_and(|s| s.label() == "Active")
    }

    /// Typed accessor over the custom attribute map: stringifies scalar
    /// values and treats absent or null entries as `None` rather than an
    /// error.
    pub fn custom_field(&self, key: &str) -> Option<String> {
        match self.custom_fields.get(key)? {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            Value::Null => None,
            _ => None,
        }
    }
}

/// One rack as returned by the source. A rack is a grouping key for
/// devices, not an owner of them.
#[derive(Debug, Clone, Deserialize)]
pub struct Rack {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub site: Option<ObjectRef>,
    #[serde(default)]
    pub location: Option<ObjectRef>,
    #[serde(default)]
    pub u_height: Option<u32>,
}

/// Pagination envelope used by every list endpoint.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    pub results: Vec<T>,
}
