//! Redact operator

use super::{Operator, OperatorType};
use crate::anonymization::models::OperatorParams;
use crate::domain::Result;
use rand::RngCore;

/// Removes the entity text entirely
#[derive(Debug, Clone, Copy, Default)]
pub struct Redact;

impl Operator for Redact {
    fn operate(
        &self,
        _text: &str,
        _params: &OperatorParams,
        _rng: &mut dyn RngCore,
    ) -> Result<String> {
        Ok(String::new())
    }

    fn validate(&self, _params: &OperatorParams) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "redact"
    }

    fn operator_type(&self) -> OperatorType {
        OperatorType::Anonymize
    }
}
