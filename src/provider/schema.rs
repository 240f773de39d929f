//! Resource Schema - Attribute definitions loaded from JSON
//!
//! Schemas are embedded at compile time and parsed once on first access.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

/// Embedded schema JSON files (compiled into the binary)
const SCHEMA_FILES: &[&str] = &[include_str!("../schemas/project_domain.json")];

/// Value type of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    String,
    Int,
}

/// Attribute definition from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeDef {
    pub description: String,
    #[serde(rename = "type")]
    pub kind: AttributeType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub optional: bool,
    /// Set by the provider from the API response
    #[serde(default)]
    pub computed: bool,
    /// Changing this attribute destroys and recreates the resource
    #[serde(default)]
    pub force_new: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl AttributeDef {
    /// Whether `value` fits this attribute's type. Null always fits.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self.kind, value) {
            (_, Value::Null) => true,
            (AttributeType::String, Value::String(_)) => true,
            (AttributeType::Int, Value::Number(n)) => n.is_i64(),
            _ => false,
        }
    }
}

/// Resource definition from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSchema {
    pub description: String,
    pub attributes: BTreeMap<String, AttributeDef>,
}

impl ResourceSchema {
    pub fn attribute(&self, key: &str) -> Option<&AttributeDef> {
        self.attributes.get(key)
    }

    /// True if changing any of `keys` forces a replacement instead of an update
    pub fn requires_replace<'k>(&self, keys: impl IntoIterator<Item = &'k str>) -> bool {
        keys.into_iter()
            .filter_map(|key| self.attribute(key))
            .any(|attr| attr.force_new)
    }

    /// Attributes that must be present in the declared configuration
    pub fn required_keys(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .iter()
            .filter(|(_, attr)| attr.required)
            .map(|(key, _)| key.as_str())
    }
}

/// Root structure of schemas/*.json
#[derive(Debug, Clone, Default, Deserialize)]
struct SchemaConfig {
    #[serde(default)]
    resources: HashMap<String, ResourceSchema>,
}

static REGISTRY: OnceLock<SchemaConfig> = OnceLock::new();

fn get_registry() -> &'static SchemaConfig {
    REGISTRY.get_or_init(|| {
        let mut final_config = SchemaConfig::default();

        for content in SCHEMA_FILES {
            let partial: SchemaConfig = serde_json::from_str(content)
                .unwrap_or_else(|e| panic!("Failed to parse embedded schema JSON: {}", e));
            final_config.resources.extend(partial.resources);
        }

        final_config
    })
}

/// Get a resource schema by type name
pub fn get_schema(type_name: &str) -> Option<&'static ResourceSchema> {
    get_registry().resources.get(type_name)
}

/// All resource type names, sorted
pub fn get_all_resource_types() -> Vec<&'static str> {
    let mut types: Vec<_> = get_registry()
        .resources
        .keys()
        .map(|s| s.as_str())
        .collect();
    types.sort_unstable();
    types
}
