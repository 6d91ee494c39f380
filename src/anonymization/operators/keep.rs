//! Keep operators
//!
//! Leave the entity text untouched while still reporting it as an item.

use super::{Operator, OperatorType};
use crate::anonymization::models::OperatorParams;
use crate::domain::Result;
use rand::RngCore;

/// Keeps the entity text as is
#[derive(Debug, Clone, Copy, Default)]
pub struct Keep;

impl Operator for Keep {
    fn operate(
        &self,
        text: &str,
        _params: &OperatorParams,
        _rng: &mut dyn RngCore,
    ) -> Result<String> {
        Ok(text.to_string())
    }

    fn validate(&self, _params: &OperatorParams) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "keep"
    }

    fn operator_type(&self) -> OperatorType {
        OperatorType::Anonymize
    }

    fn reverse_operator(&self) -> Option<&'static str> {
        Some("keep")
    }
}

/// Deanonymize counterpart of [`Keep`]
#[derive(Debug, Clone, Copy, Default)]
pub struct DeanonymizeKeep;

impl Operator for DeanonymizeKeep {
    fn operate(
        &self,
        text: &str,
        _params: &OperatorParams,
        _rng: &mut dyn RngCore,
    ) -> Result<String> {
        Ok(text.to_string())
    }

    fn validate(&self, _params: &OperatorParams) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "keep"
    }

    fn operator_type(&self) -> OperatorType {
        OperatorType::Deanonymize
    }
}
