//! Replace operator

use super::{Operator, OperatorType};
use crate::anonymization::models::OperatorParams;
use crate::domain::{Result, ShroudError};
use rand::RngCore;

/// Param holding the replacement text
pub const NEW_VALUE: &str = "new_value";

/// Replaces the entity text with `new_value`, or `<ENTITY_TYPE>` when none is given
///
/// This is also the engine's fallback when neither an entity-specific nor a
/// `DEFAULT` config exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct Replace;

impl Replace {
    /// Placeholder written when no `new_value` is configured
    pub fn placeholder(entity_type: &str) -> String {
        format!("<{entity_type}>")
    }
}

impl Operator for Replace {
    fn operate(
        &self,
        _text: &str,
        params: &OperatorParams,
        _rng: &mut dyn RngCore,
    ) -> Result<String> {
        match params.get_str(NEW_VALUE) {
            Some(value) if !value.is_empty() => Ok(value.to_string()),
            _ => Ok(Self::placeholder(params.entity_type().unwrap_or("DEFAULT"))),
        }
    }

    fn validate(&self, params: &OperatorParams) -> Result<()> {
        match params.get(NEW_VALUE) {
            None | Some(serde_json::Value::Null | serde_json::Value::String(_)) => Ok(()),
            Some(_) => Err(ShroudError::InvalidParam(format!(
                "Invalid parameter value for {NEW_VALUE}."
            ))),
        }
    }

    fn name(&self) -> &'static str {
        "replace"
    }

    fn operator_type(&self) -> OperatorType {
        OperatorType::Anonymize
    }
}
