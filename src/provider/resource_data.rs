//! Declared configuration and persisted state of one resource instance
//!
//! [`ResourceData`] is the accessor the provisioning host hands to every
//! lifecycle operation. [`InMemoryResourceData`] implements it over plain
//! JSON maps and is what the CLI host and the tests use.

use super::schema::ResourceSchema;
use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Accessor over one resource instance
pub trait ResourceData {
    /// Current value of `key`, if any
    fn get(&self, key: &str) -> Option<&Value>;

    /// Whether `key` differs from the prior persisted state
    fn has_change(&self, key: &str) -> bool;

    fn set(&mut self, key: &str, value: Value) -> Result<()>;

    /// Persisted identity; empty when the resource does not exist
    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    fn get_string(&self, key: &str) -> String {
        self.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    fn get_int(&self, key: &str) -> i64 {
        self.get(key).and_then(Value::as_i64).unwrap_or_default()
    }

    /// Value of `key` only when explicitly set to a non-empty string
    fn get_ok_string(&self, key: &str) -> Option<String> {
        Some(self.get_string(key)).filter(|s| !s.is_empty())
    }

    /// Value of `key` only when explicitly set to a non-zero integer
    fn get_ok_int(&self, key: &str) -> Option<i64> {
        Some(self.get_int(key)).filter(|n| *n != 0)
    }
}

/// What the host persists between invocations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceState {
    pub id: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

/// [`ResourceData`] backed by JSON maps and validated against a schema
#[derive(Debug, Clone)]
pub struct InMemoryResourceData {
    schema: &'static ResourceSchema,
    id: String,
    prior: Map<String, Value>,
    current: Map<String, Value>,
}

impl InMemoryResourceData {
    /// Instance about to be created from a declared configuration.
    ///
    /// Unknown attributes and missing required ones are rejected; schema
    /// defaults fill in unset optional attributes.
    pub fn from_config(schema: &'static ResourceSchema, config: Map<String, Value>) -> Result<Self> {
        let mut data = Self {
            schema,
            id: String::new(),
            prior: Map::new(),
            current: Map::new(),
        };

        for (key, value) in config {
            data.set(&key, value)?;
        }

        for (key, attr) in &schema.attributes {
            if let Some(default) = &attr.default {
                data.current
                    .entry(key.clone())
                    .or_insert_with(|| default.clone());
            }
        }

        let missing: Vec<_> = schema
            .required_keys()
            .filter(|key| data.get_ok_string(key).is_none())
            .collect();
        if !missing.is_empty() {
            bail!("missing required attributes: {}", missing.join(", "));
        }

        Ok(data)
    }

    /// Existing instance, as last persisted
    pub fn from_state(schema: &'static ResourceSchema, state: ResourceState) -> Self {
        Self {
            schema,
            id: state.id,
            prior: state.attributes.clone(),
            current: state.attributes,
        }
    }

    /// Existing instance with planned changes applied on top of its state
    pub fn with_changes(
        schema: &'static ResourceSchema,
        state: ResourceState,
        changes: Map<String, Value>,
    ) -> Result<Self> {
        let mut data = Self::from_state(schema, state);
        for (key, value) in changes {
            data.set(&key, value)?;
        }
        Ok(data)
    }

    /// Keys whose current value differs from the prior state
    pub fn changed_keys(&self) -> Vec<&str> {
        self.schema
            .attributes
            .keys()
            .map(String::as_str)
            .filter(|key| self.has_change(key))
            .collect()
    }

    pub fn into_state(self) -> ResourceState {
        ResourceState {
            id: self.id,
            attributes: self.current,
        }
    }
}

static NULL: Value = Value::Null;

/// Unset, null and empty string all mean "no value"
fn normalized(value: Option<&Value>) -> &Value {
    match value {
        Some(Value::String(s)) if s.is_empty() => &NULL,
        Some(value) => value,
        None => &NULL,
    }
}

impl ResourceData for InMemoryResourceData {
    fn get(&self, key: &str) -> Option<&Value> {
        self.current.get(key).filter(|v| !v.is_null())
    }

    fn has_change(&self, key: &str) -> bool {
        normalized(self.prior.get(key)) != normalized(self.current.get(key))
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        let attr = self
            .schema
            .attribute(key)
            .ok_or_else(|| anyhow!("unknown attribute {:?}", key))?;

        if !attr.accepts(&value) {
            bail!("invalid value for {:?}: expected {:?}, got {}", key, attr.kind, value);
        }

        self.current.insert(key.to_string(), value);
        Ok(())
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::schema::get_schema;
    use serde_json::json;

    fn schema() -> &'static ResourceSchema {
        get_schema("vercel_project_domain").unwrap()
    }

    fn config(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_from_config_applies_defaults() {
        let data = InMemoryResourceData::from_config(
            schema(),
            config(json!({"project_id": "p1", "name": "a.example.com"})),
        )
        .unwrap();

        assert_eq!(data.get_string("team_id"), "");
        assert_eq!(data.get_ok_string("team_id"), None);
        assert_eq!(data.get_ok_string("name").as_deref(), Some("a.example.com"));
        assert!(data.id().is_empty());
    }

    #[test]
    fn test_from_config_rejects_missing_required() {
        let err = InMemoryResourceData::from_config(schema(), config(json!({"name": "a.example.com"})))
            .unwrap_err();
        assert_eq!(err.to_string(), "missing required attributes: project_id");
    }

    #[test]
    fn test_set_rejects_unknown_and_mistyped_attributes() {
        let mut data = InMemoryResourceData::from_state(schema(), ResourceState::default());
        assert!(data.set("nope", json!("x")).is_err());
        assert!(data.set("redirect_status_code", json!("301")).is_err());
        assert!(data.set("redirect_status_code", json!(301)).is_ok());
    }

    #[test]
    fn test_get_ok_ignores_zero_values() {
        let mut data = InMemoryResourceData::from_state(schema(), ResourceState::default());
        data.set("redirect_status_code", json!(0)).unwrap();
        data.set("redirect", json!("")).unwrap();
        assert_eq!(data.get_ok_int("redirect_status_code"), None);
        assert_eq!(data.get_ok_string("redirect"), None);
        assert_eq!(data.get_ok_string("git_branch"), None);
    }

    #[test]
    fn test_has_change_compares_against_prior_state() {
        let state = ResourceState {
            id: "p1:a.example.com".to_string(),
            attributes: config(json!({"name": "a.example.com", "redirect": "old.example.com"})),
        };
        let data = InMemoryResourceData::with_changes(
            schema(),
            state,
            config(json!({"name": "a.example.com", "redirect": "new.example.com"})),
        )
        .unwrap();

        assert!(data.has_change("redirect"));
        assert!(!data.has_change("name"));
        assert!(!data.has_change("git_branch"));
        assert_eq!(data.changed_keys(), vec!["redirect"]);
    }

    #[test]
    fn test_null_and_empty_string_are_the_same() {
        let state = ResourceState {
            id: "p1:a.example.com".to_string(),
            attributes: config(json!({"redirect": null})),
        };
        let data =
            InMemoryResourceData::with_changes(schema(), state, config(json!({"redirect": ""})))
                .unwrap();
        assert!(!data.has_change("redirect"));
        assert!(data.changed_keys().is_empty());
    }

    #[test]
    fn test_missing_and_null_are_the_same() {
        let state = ResourceState {
            id: "p1:a.example.com".to_string(),
            attributes: Map::new(),
        };
        let mut data = InMemoryResourceData::from_state(schema(), state);
        data.set("redirect", Value::Null).unwrap();
        assert!(!data.has_change("redirect"));
        assert_eq!(data.get("redirect"), None);
    }
}
