//! Gen-Z slang operator
//!
//! Replaces each entity with a slang term drawn uniformly at random from a
//! fixed per-entity-type list. The choice is not recorded, so the operator
//! has no deanonymize counterpart.

use super::{Operator, OperatorType};
use crate::anonymization::models::{OperatorParams, DEFAULT_ENTITY};
use crate::domain::Result;
use rand::seq::SliceRandom;
use rand::RngCore;

const SLANG: &[(&str, &[&str])] = &[
    (
        "PERSON",
        &[
            "bestie", "pookie", "queen", "GOAT", "baddie", "mc", "slay", "based", "gagged",
            "snatched",
        ],
    ),
    (
        "EMAIL_ADDRESS",
        &["brainrot", "touch grass", "iykyk", "no cap", "bet"],
    ),
    (
        "PHONE_NUMBER",
        &["fr fr", "bruh", "oop—", "big yikes", "vibe check"],
    ),
    (
        "CREDIT_CARD",
        &["this ain't it", "sheesh", "mid", "L", "bro???"],
    ),
    (
        "IP_ADDRESS",
        &["skibidi", "out of pocket", "sus", "rizzless", "delulu"],
    ),
    (
        "DATE_TIME",
        &["it's giving… time?", "Gucci hour", "dead 💀", "locked in"],
    ),
    ("URL", &["slaps", "fire", "bussin'", "gas", "drip"]),
    (
        "LOCATION",
        &["Ohio", "vibe zone", "the lore", "the timeline", "the trenches"],
    ),
    (
        DEFAULT_ENTITY,
        &[
            "slay",
            "mid",
            "big yikes",
            "skibidi",
            "based",
            "gigachad",
            "oop",
            "touch grass",
            "sus",
            "W",
        ],
    ),
];

/// Replaces the entity text with Gen-Z slang
#[derive(Debug, Clone, Default)]
pub struct GenZ;

impl GenZ {
    /// Create the operator
    pub fn new() -> Self {
        Self
    }

    /// Candidate terms for an entity type, falling back to the `DEFAULT` list
    pub fn slang_for(entity_type: &str) -> &'static [&'static str] {
        SLANG
            .iter()
            .find(|(key, _)| *key == entity_type)
            .or_else(|| SLANG.iter().find(|(key, _)| *key == DEFAULT_ENTITY))
            .map(|(_, terms)| *terms)
            .unwrap_or(&[])
    }
}

impl Operator for GenZ {
    fn operate(
        &self,
        _text: &str,
        params: &OperatorParams,
        rng: &mut dyn RngCore,
    ) -> Result<String> {
        let entity_type = params.entity_type().unwrap_or(DEFAULT_ENTITY);
        Ok(Self::slang_for(entity_type)
            .choose(rng)
            .map(|term| (*term).to_string())
            .unwrap_or_default())
    }

    /// Params are optional
    fn validate(&self, _params: &OperatorParams) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "genz"
    }

    fn operator_type(&self) -> OperatorType {
        OperatorType::Anonymize
    }

    fn supported_entities(&self) -> Vec<&'static str> {
        SLANG
            .iter()
            .map(|(key, _)| *key)
            .filter(|key| *key != DEFAULT_ENTITY)
            .collect()
    }
}
