//! Request body conversion
//!
//! Turns the JSON fragments of an anonymize / deanonymize request into engine
//! types. Shape errors become [`ShroudError::InvalidRequest`].

use crate::anonymization::models::{AnonymizedEntity, EntitySpan, OperatorConfigs};
use crate::domain::{Result, ShroudError};
use serde::de::DeserializeOwned;
use serde_json::Value;

fn from_field<T: DeserializeOwned>(value: &Value, field: &str) -> Result<T> {
    serde_json::from_value(value.clone())
        .map_err(|e| ShroudError::InvalidRequest(format!("Invalid {field}: {e}")))
}

/// Operator configs keyed by entity type; absent or `null` means none
///
/// Nested `params` objects are merged into the top level.
pub fn operators_from_json(value: Option<&Value>) -> Result<OperatorConfigs> {
    match value {
        None | Some(Value::Null) => Ok(OperatorConfigs::new()),
        Some(value) => Ok(from_field::<OperatorConfigs>(value, "operators")?.normalized()),
    }
}

/// Detector spans; absent or `null` means none
pub fn analyzer_results_from_json(value: Option<&Value>) -> Result<Vec<EntitySpan>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => from_field(value, "analyzer_results"),
    }
}

/// Entities of a deanonymize request, read from its `entities` field
pub fn deanonymize_entities_from_json(content: &Value) -> Result<Vec<AnonymizedEntity>> {
    match content.get("entities") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => from_field(value, "entities"),
    }
}
