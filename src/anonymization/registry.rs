//! Operator registry
//!
//! Holds every operator keyed by direction and name. The registry is filled
//! once at startup, then shared read-only between calls.

use crate::anonymization::models::{OperatorConfig, OperatorConfigs};
use crate::anonymization::operators::{builtin_operators, Operator, OperatorInfo, OperatorType};
use crate::domain::{Result, ShroudError};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Operator names that would run caller-supplied code; never invocable
pub const DYNAMIC_OPERATORS: &[&str] = &["custom"];

/// Registry of anonymize and deanonymize operators
#[derive(Debug, Default)]
pub struct OperatorRegistry {
    operators: HashMap<OperatorType, BTreeMap<&'static str, Arc<dyn Operator>>>,
}

impl OperatorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in operator
    pub fn with_builtins() -> Result<Self> {
        let mut registry = Self::new();
        for operator in builtin_operators() {
            registry.register(operator)?;
        }
        Ok(registry)
    }

    /// Register an operator under its name and direction
    ///
    /// # Errors
    ///
    /// Returns [`ShroudError::DuplicateOperator`] if the name is already taken
    /// for that direction.
    pub fn register(&mut self, operator: Arc<dyn Operator>) -> Result<()> {
        let operator_type = operator.operator_type();
        let name = operator.name();
        let by_name = self.operators.entry(operator_type).or_default();

        if by_name.contains_key(name) {
            return Err(ShroudError::DuplicateOperator {
                name: name.to_string(),
                operator_type,
            });
        }

        tracing::debug!(operator = name, %operator_type, "Registered operator");
        by_name.insert(name, operator);
        Ok(())
    }

    /// Look up an operator, `None` if absent
    pub fn get(&self, name: &str, operator_type: OperatorType) -> Option<&Arc<dyn Operator>> {
        self.operators
            .get(&operator_type)
            .and_then(|by_name| by_name.get(name))
    }

    /// Look up an operator
    ///
    /// # Errors
    ///
    /// Returns [`ShroudError::UnknownOperator`] if absent.
    pub fn resolve(&self, name: &str, operator_type: OperatorType) -> Result<&Arc<dyn Operator>> {
        self.get(name, operator_type)
            .ok_or_else(|| ShroudError::UnknownOperator {
                name: name.to_string(),
                operator_type,
            })
    }

    /// Whether `name` is registered in either direction
    pub fn contains_name(&self, name: &str) -> bool {
        self.operators
            .values()
            .any(|by_name| by_name.contains_key(name))
    }

    /// Metadata for every operator of one direction, sorted by name
    pub fn list(&self, operator_type: OperatorType) -> Vec<OperatorInfo> {
        self.operators
            .get(&operator_type)
            .map(|by_name| {
                by_name
                    .values()
                    .map(|operator| OperatorInfo::describe(operator.as_ref()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Refuse configs naming operators that would execute caller-supplied code
    pub fn reject_dynamic(&self, config: &OperatorConfig) -> Result<()> {
        if DYNAMIC_OPERATORS.contains(&config.operator_name.as_str()) {
            return Err(ShroudError::UnsupportedOperator(format!(
                "Custom type operator '{}' is not supported",
                config.operator_name
            )));
        }
        Ok(())
    }

    /// Validate anonymize configs: no dynamic operators, every operator
    /// registered, every param set accepted by its operator
    pub fn validate_anonymizers(&self, configs: &OperatorConfigs) -> Result<()> {
        for (_, config) in configs.iter() {
            self.reject_dynamic(config)?;
            self.resolve(&config.operator_name, OperatorType::Anonymize)?
                .validate(&config.params)?;
        }
        Ok(())
    }

    /// Validate deanonymize configs
    ///
    /// Configs naming anonymize-only operators pass here; they fail per entity
    /// with [`ShroudError::OperatorNotReversible`] when actually selected.
    pub fn validate_deanonymizers(&self, configs: &OperatorConfigs) -> Result<()> {
        for (_, config) in configs.iter() {
            self.reject_dynamic(config)?;
            match self.get(&config.operator_name, OperatorType::Deanonymize) {
                Some(operator) => operator.validate(&config.params)?,
                None if self.contains_name(&config.operator_name) => {}
                None => {
                    return Err(ShroudError::UnknownOperator {
                        name: config.operator_name.clone(),
                        operator_type: OperatorType::Deanonymize,
                    })
                }
            }
        }
        Ok(())
    }
}
