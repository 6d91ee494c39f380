//! Anonymization operators
//!
//! Operators turn one entity's text into its replacement (anonymize direction)
//! or recover the original text from a replacement (deanonymize direction).

pub mod encryption;
pub mod genz;
pub mod hash;
pub mod keep;
pub mod mask;
pub mod redact;
pub mod replace;

use crate::anonymization::models::OperatorParams;
use crate::domain::{Result, ShroudError};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub use encryption::{Decrypt, Encrypt};
pub use genz::GenZ;
pub use hash::Hash;
pub use keep::{DeanonymizeKeep, Keep};
pub use mask::Mask;
pub use redact::Redact;
pub use replace::Replace;

/// Direction an operator works in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorType {
    /// Produces a replacement from the original text
    Anonymize,
    /// Recovers the original text from a replacement
    Deanonymize,
}

impl fmt::Display for OperatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anonymize => write!(f, "anonymize"),
            Self::Deanonymize => write!(f, "deanonymize"),
        }
    }
}

/// Trait for operator implementations
///
/// Operators are registered once at startup and shared between calls, so they
/// must not keep per-call state. Randomness comes from the `rng` the engine
/// creates for each call.
pub trait Operator: Send + Sync + fmt::Debug {
    /// Transform `text` using `params`
    fn operate(&self, text: &str, params: &OperatorParams, rng: &mut dyn RngCore)
        -> Result<String>;

    /// Check `params` before any text is touched
    fn validate(&self, params: &OperatorParams) -> Result<()>;

    /// Registered name
    fn name(&self) -> &'static str;

    /// Direction this operator works in
    fn operator_type(&self) -> OperatorType;

    /// Name of the deanonymize operator that inverts this one, if any
    fn reverse_operator(&self) -> Option<&'static str> {
        None
    }

    /// Entity types with dedicated behaviour; empty means any entity type
    fn supported_entities(&self) -> Vec<&'static str> {
        Vec::new()
    }
}

/// Operator metadata returned by capability discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorInfo {
    /// Registered name
    pub name: String,
    /// Direction
    pub operator_type: OperatorType,
    /// Entity types with dedicated behaviour; empty means any
    pub supported_entities: Vec<String>,
    /// Whether a deanonymize counterpart exists
    pub reversible: bool,
}

impl OperatorInfo {
    /// Describe a registered operator
    pub fn describe(operator: &dyn Operator) -> Self {
        Self {
            name: operator.name().to_string(),
            operator_type: operator.operator_type(),
            supported_entities: operator
                .supported_entities()
                .into_iter()
                .map(str::to_string)
                .collect(),
            reversible: operator.reverse_operator().is_some(),
        }
    }
}

/// Every operator shipped with Shroud
pub fn builtin_operators() -> Vec<Arc<dyn Operator>> {
    vec![
        Arc::new(Replace),
        Arc::new(Redact),
        Arc::new(Mask),
        Arc::new(Hash),
        Arc::new(Encrypt),
        Arc::new(Keep),
        Arc::new(GenZ::new()),
        Arc::new(Decrypt),
        Arc::new(DeanonymizeKeep),
    ]
}

/// Fetch a required string param
pub(crate) fn required_str<'a>(
    params: &'a OperatorParams,
    key: &str,
    operator: &str,
) -> Result<&'a str> {
    match params.get(key) {
        None | Some(serde_json::Value::Null) => Err(ShroudError::InvalidParam(format!(
            "Expected parameter {key} for operator {operator}"
        ))),
        Some(value) => value.as_str().ok_or_else(|| {
            ShroudError::InvalidParam(format!("Invalid parameter value for {key}."))
        }),
    }
}
