//! Anonymizer engine
//!
//! This module provides the [`AnonymizerEngine`] that turns detected entity
//! spans into anonymized text, and recovers originals from reversible
//! replacements.
//!
//! # Architecture
//!
//! Each call runs the same pipeline:
//! - **Validation**: every operator config is checked before text is touched
//! - **Conflict resolution**: overlapping spans are reduced to a disjoint set
//! - **Operators**: each span's text goes through its configured operator
//! - **Rebuilder**: replacements are spliced in and new offsets computed
//!
//! # Examples
//!
//! ```
//! use shroud::anonymization::{AnonymizerEngine, EntitySpan, OperatorConfig, OperatorConfigs};
//!
//! # fn example() -> shroud::domain::Result<()> {
//! let engine = AnonymizerEngine::new()?;
//! let spans = vec![EntitySpan::new("PERSON", 5, 10, 0.85)];
//! let configs = OperatorConfigs::new()
//!     .with("PERSON", OperatorConfig::new("replace").with_param("new_value", "<NAME>"));
//!
//! let result = engine.anonymize("Call Emily at home", &spans, &configs)?;
//! assert_eq!(result.text, "Call <NAME> at home");
//! # Ok(())
//! # }
//! ```

use crate::anonymization::conflict::resolve_conflicts;
use crate::anonymization::models::{
    AnonymizedEntity, AnonymizerResult, DeanonymizeResult, EntitySpan, OperatorConfig,
    OperatorConfigs,
};
use crate::anonymization::operators::{Operator, OperatorInfo, OperatorType, Replace};
use crate::anonymization::rebuilder::{char_boundaries, rebuild, Replacement};
use crate::anonymization::registry::OperatorRegistry;
use crate::domain::{Result, ShroudError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::borrow::Cow;
use std::sync::Arc;

/// Anonymize / deanonymize engine
///
/// The engine holds no per-call state. It can be shared across threads
/// behind an `Arc`, or cloned cheaply since the registry is shared.
#[derive(Debug, Clone)]
pub struct AnonymizerEngine {
    registry: Arc<OperatorRegistry>,
    random_seed: Option<u64>,
}

impl AnonymizerEngine {
    /// Create an engine with every built-in operator registered
    ///
    /// # Errors
    ///
    /// Returns [`ShroudError::DuplicateOperator`] if the built-in set is
    /// inconsistent.
    pub fn new() -> Result<Self> {
        Ok(Self::with_registry(Arc::new(
            OperatorRegistry::with_builtins()?,
        )))
    }

    /// Create an engine over an existing registry
    pub fn with_registry(registry: Arc<OperatorRegistry>) -> Self {
        Self {
            registry,
            random_seed: None,
        }
    }

    /// Seed the random source of every call
    ///
    /// A seeded engine makes randomized operators such as `genz` repeat their
    /// output for identical input. `encrypt` nonces never use this source.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.random_seed = seed;
        self
    }

    /// The operator registry this engine resolves names against
    pub fn registry(&self) -> &OperatorRegistry {
        &self.registry
    }

    fn rng(&self) -> StdRng {
        match self.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Anonymize `text` at the given spans
    ///
    /// Spans are resolved to a disjoint set first. Each surviving span uses
    /// the config for its entity type, then the `DEFAULT` config, then
    /// `replace` with no params, which writes `<ENTITY_TYPE>`.
    ///
    /// # Errors
    ///
    /// Fails as a whole, leaving nothing half-applied, when a config names a
    /// dynamic or unregistered operator, when params are rejected, or when a
    /// span is out of range.
    pub fn anonymize(
        &self,
        text: &str,
        spans: &[EntitySpan],
        configs: &OperatorConfigs,
    ) -> Result<AnonymizerResult> {
        self.registry.validate_anonymizers(configs)?;

        let boundaries = char_boundaries(text);
        let resolved = resolve_conflicts(spans, boundaries.len() - 1)?;

        let fallback = OperatorConfig::new(Replace.name());
        let mut rng = self.rng();
        let mut replacements = Vec::with_capacity(resolved.len());

        for span in resolved {
            let config = configs.config_for(&span.entity_type).unwrap_or(&fallback);
            let operator = self
                .registry
                .resolve(&config.operator_name, OperatorType::Anonymize)?;

            let original = &text[boundaries[span.start]..boundaries[span.end]];
            let params = config.params.for_entity(&span.entity_type);
            let replaced = operator.operate(original, &params, &mut rng)?;

            replacements.push(Replacement {
                start: span.start,
                end: span.end,
                entity_type: span.entity_type,
                operator: operator.name().to_string(),
                text: replaced,
            });
        }

        rebuild(text, replacements)
    }

    /// Recover original text for previously anonymized entities
    ///
    /// Entities are positions in `text` (usually the items of an earlier
    /// anonymize call). Each uses the deanonymize config for its entity type,
    /// then the `DEFAULT` config, then the reverse of the operator recorded on
    /// the entity.
    ///
    /// # Errors
    ///
    /// Returns [`ShroudError::OperatorNotReversible`] for an entity produced
    /// by a one-way operator, or whose selected operator cannot deanonymize.
    /// Bad or overlapping offsets give [`ShroudError::InvalidSpan`].
    pub fn deanonymize(
        &self,
        text: &str,
        entities: &[AnonymizedEntity],
        configs: &OperatorConfigs,
    ) -> Result<DeanonymizeResult> {
        self.registry.validate_deanonymizers(configs)?;

        let boundaries = char_boundaries(text);
        let text_len = boundaries.len() - 1;

        let mut ordered: Vec<(usize, &AnonymizedEntity)> = entities.iter().enumerate().collect();
        ordered.sort_by_key(|(_, entity)| (entity.start, entity.end));

        let mut previous_end = 0;
        for (_, entity) in &ordered {
            entity.validate(text_len)?;
            if entity.start < previous_end {
                return Err(ShroudError::InvalidSpan(format!(
                    "{} entity [{}, {}) overlaps another entity",
                    entity.entity_type, entity.start, entity.end
                )));
            }
            previous_end = entity.end;
        }

        let mut rng = self.rng();
        let mut replacements = Vec::with_capacity(ordered.len());

        for (index, entity) in ordered {
            let config = self.deanonymize_config(index, entity, configs)?;
            let not_reversible = || ShroudError::OperatorNotReversible {
                index,
                entity_type: entity.entity_type.clone(),
                operator: config.operator_name.clone(),
            };
            let operator = self
                .registry
                .get(&config.operator_name, OperatorType::Deanonymize)
                .ok_or_else(not_reversible)?;

            let replaced = &text[boundaries[entity.start]..boundaries[entity.end]];
            let params = config.params.for_entity(&entity.entity_type);
            let restored = operator.operate(replaced, &params, &mut rng)?;

            replacements.push(Replacement {
                start: entity.start,
                end: entity.end,
                entity_type: entity.entity_type.clone(),
                operator: operator.name().to_string(),
                text: restored,
            });
        }

        rebuild(text, replacements)
    }

    /// Pick the deanonymize config for one entity
    fn deanonymize_config<'a>(
        &self,
        index: usize,
        entity: &AnonymizedEntity,
        configs: &'a OperatorConfigs,
    ) -> Result<Cow<'a, OperatorConfig>> {
        let recorded = self
            .registry
            .get(&entity.operator, OperatorType::Anonymize);

        if let Some(operator) = recorded {
            if operator.reverse_operator().is_none() {
                return Err(ShroudError::OperatorNotReversible {
                    index,
                    entity_type: entity.entity_type.clone(),
                    operator: entity.operator.clone(),
                });
            }
        }

        if let Some(config) = configs.config_for(&entity.entity_type) {
            return Ok(Cow::Borrowed(config));
        }

        recorded
            .and_then(|operator| operator.reverse_operator())
            .map(|reverse| Cow::Owned(OperatorConfig::new(reverse)))
            .ok_or_else(|| ShroudError::OperatorNotReversible {
                index,
                entity_type: entity.entity_type.clone(),
                operator: entity.operator.clone(),
            })
    }

    /// Metadata for every anonymize operator, sorted by name
    pub fn anonymizers(&self) -> Vec<OperatorInfo> {
        self.registry.list(OperatorType::Anonymize)
    }

    /// Metadata for every deanonymize operator, sorted by name
    pub fn deanonymizers(&self) -> Vec<OperatorInfo> {
        self.registry.list(OperatorType::Deanonymize)
    }
}
