//! Operator configuration models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Entity type key whose config applies to entity types without their own entry
pub const DEFAULT_ENTITY: &str = "DEFAULT";

/// Param injected by the engine carrying the entity type being operated on
pub const ENTITY_TYPE_PARAM: &str = "entity_type";

/// Operator parameters, a JSON object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperatorParams(Map<String, Value>);

impl OperatorParams {
    /// Create empty params
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a param, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or overwrite a param
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Raw param value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Param as a string, `None` if absent or not a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Whether the param is present (including `null`)
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Whether there are no params
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy of these params carrying the entity type being operated on
    pub fn for_entity(&self, entity_type: &str) -> Self {
        let mut params = self.clone();
        params.insert(ENTITY_TYPE_PARAM, entity_type);
        params
    }

    /// Entity type injected by the engine, if any
    pub fn entity_type(&self) -> Option<&str> {
        self.get_str(ENTITY_TYPE_PARAM)
    }
}

impl From<Map<String, Value>> for OperatorParams {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Operator selection for one entity type
///
/// On the wire the operator name is the `type` key and params sit beside it:
/// `{"type": "mask", "masking_char": "*", "chars_to_mask": 4, "from_end": true}`.
/// A nested `params` object is also accepted and merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorConfig {
    /// Registered operator name
    #[serde(rename = "type")]
    pub operator_name: String,
    /// Operator-specific parameters
    #[serde(flatten)]
    pub params: OperatorParams,
}

impl OperatorConfig {
    /// Create a config for an operator with no params
    pub fn new(operator_name: impl Into<String>) -> Self {
        Self {
            operator_name: operator_name.into(),
            params: OperatorParams::new(),
        }
    }

    /// Add a param, builder style
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key, value);
        self
    }

    /// Lift entries of a nested `params` object to the top level
    ///
    /// Top-level entries win over nested ones with the same key.
    pub fn normalized(mut self) -> Self {
        if let Some(Value::Object(nested)) = self.params.0.remove("params") {
            for (key, value) in nested {
                self.params.0.entry(key).or_insert(value);
            }
        }
        self
    }
}

/// Operator configs keyed by entity type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperatorConfigs(BTreeMap<String, OperatorConfig>);

impl OperatorConfigs {
    /// Create an empty config set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a config for an entity type, builder style
    pub fn with(mut self, entity_type: impl Into<String>, config: OperatorConfig) -> Self {
        self.insert(entity_type, config);
        self
    }

    /// Insert or overwrite the config for an entity type
    pub fn insert(&mut self, entity_type: impl Into<String>, config: OperatorConfig) {
        self.0.insert(entity_type.into(), config);
    }

    /// Config for an entity type: exact match, then [`DEFAULT_ENTITY`]
    pub fn config_for(&self, entity_type: &str) -> Option<&OperatorConfig> {
        self.0
            .get(entity_type)
            .or_else(|| self.0.get(DEFAULT_ENTITY))
    }

    /// Whether an entity type has its own entry
    pub fn contains(&self, entity_type: &str) -> bool {
        self.0.contains_key(entity_type)
    }

    /// Iterate `(entity_type, config)` pairs in entity type order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &OperatorConfig)> {
        self.0.iter()
    }

    /// Number of entity types configured
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no entity type is configured
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Add entries from `defaults` for entity types not configured here
    pub fn merged_with(mut self, defaults: &OperatorConfigs) -> Self {
        for (entity_type, config) in &defaults.0 {
            self.0
                .entry(entity_type.clone())
                .or_insert_with(|| config.clone());
        }
        self
    }

    /// Set `key` on every config using one of `operators` that lacks it
    pub fn fill_missing_param(&mut self, operators: &[&str], key: &str, value: &str) {
        for config in self.0.values_mut() {
            if operators.contains(&config.operator_name.as_str()) && !config.params.contains(key) {
                config.params.insert(key, value);
            }
        }
    }

    /// Apply [`OperatorConfig::normalized`] to every entry
    pub fn normalized(self) -> Self {
        Self(
            self.0
                .into_iter()
                .map(|(entity_type, config)| (entity_type, config.normalized()))
                .collect(),
        )
    }
}

impl FromIterator<(String, OperatorConfig)> for OperatorConfigs {
    fn from_iter<I: IntoIterator<Item = (String, OperatorConfig)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_for_falls_back_to_default() {
        let configs = OperatorConfigs::new()
            .with("PERSON", OperatorConfig::new("redact"))
            .with(DEFAULT_ENTITY, OperatorConfig::new("genz"));

        assert_eq!(configs.config_for("PERSON").unwrap().operator_name, "redact");
        assert_eq!(configs.config_for("URL").unwrap().operator_name, "genz");
    }

    #[test]
    fn test_config_for_without_default() {
        let configs = OperatorConfigs::new().with("PERSON", OperatorConfig::new("redact"));
        assert!(configs.config_for("URL").is_none());
    }

    #[test]
    fn test_deserialize_flattened_params() {
        let config: OperatorConfig = serde_json::from_value(json!({
            "type": "mask",
            "masking_char": "*",
            "chars_to_mask": 4,
            "from_end": true
        }))
        .unwrap();

        assert_eq!(config.operator_name, "mask");
        assert_eq!(config.params.get_str("masking_char"), Some("*"));
        assert_eq!(config.params.get("chars_to_mask"), Some(&json!(4)));
    }

    #[test]
    fn test_normalized_merges_nested_params() {
        let config: OperatorConfig = serde_json::from_value(json!({
            "type": "replace",
            "params": {"new_value": "nested", "other": 1},
            "other": 2
        }))
        .unwrap();

        let config = config.normalized();
        assert_eq!(config.params.get_str("new_value"), Some("nested"));
        assert_eq!(config.params.get("other"), Some(&json!(2)));
        assert!(!config.params.contains("params"));
    }

    #[test]
    fn test_merged_with_keeps_request_entries() {
        let request = OperatorConfigs::new().with("PERSON", OperatorConfig::new("redact"));
        let defaults = OperatorConfigs::new()
            .with("PERSON", OperatorConfig::new("genz"))
            .with(DEFAULT_ENTITY, OperatorConfig::new("hash"));

        let merged = request.merged_with(&defaults);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.config_for("PERSON").unwrap().operator_name, "redact");
        assert_eq!(merged.config_for("IP").unwrap().operator_name, "hash");
    }

    #[test]
    fn test_fill_missing_param_only_touches_named_operators() {
        let mut configs = OperatorConfigs::new()
            .with("PERSON", OperatorConfig::new("encrypt"))
            .with(
                "PHONE_NUMBER",
                OperatorConfig::new("encrypt").with_param("key", "own-key-16-bytes"),
            )
            .with("URL", OperatorConfig::new("redact"));

        configs.fill_missing_param(&["encrypt", "decrypt"], "key", "configured-key-16");

        assert_eq!(
            configs.config_for("PERSON").unwrap().params.get_str("key"),
            Some("configured-key-16")
        );
        assert_eq!(
            configs.config_for("PHONE_NUMBER").unwrap().params.get_str("key"),
            Some("own-key-16-bytes")
        );
        assert!(!configs.config_for("URL").unwrap().params.contains("key"));
    }

    #[test]
    fn test_for_entity_injects_entity_type() {
        let params = OperatorParams::new().with("new_value", "x");
        let injected = params.for_entity("PERSON");
        assert_eq!(injected.entity_type(), Some("PERSON"));
        assert!(params.entity_type().is_none());
    }
}
