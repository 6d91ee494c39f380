//! Entity span and result data models
//!
//! Offsets are zero-based and count Unicode scalar values (`char`s), the
//! same unit callers use on the JSON wire.

use crate::domain::{Result, ShroudError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A detected entity span over the input text, produced by an external detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpan {
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
    /// Entity type label, e.g. `PERSON`
    pub entity_type: String,
    /// Detector confidence (0.0 - 1.0)
    #[serde(default)]
    pub score: f64,
}

impl EntitySpan {
    /// Create a new entity span
    pub fn new(entity_type: impl Into<String>, start: usize, end: usize, score: f64) -> Self {
        Self {
            start,
            end,
            entity_type: entity_type.into(),
            score,
        }
    }

    /// Number of characters covered by the span
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no characters
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Whether two half-open spans share at least one position
    pub fn overlaps(&self, other: &EntitySpan) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Check `0 <= start < end <= text_len`
    pub fn validate(&self, text_len: usize) -> Result<()> {
        validate_bounds(self.start, self.end, text_len, &self.entity_type)
    }

    /// Ordering used to rank overlapping spans: start ascending, then the
    /// longer span, then the higher score, then entity type.
    pub(crate) fn position_order(&self, other: &EntitySpan) -> Ordering {
        self.start
            .cmp(&other.start)
            .then_with(|| other.end.cmp(&self.end))
            .then_with(|| other.score.total_cmp(&self.score))
            .then_with(|| self.entity_type.cmp(&other.entity_type))
    }
}

pub(crate) fn validate_bounds(
    start: usize,
    end: usize,
    text_len: usize,
    entity_type: &str,
) -> Result<()> {
    if start >= end {
        return Err(ShroudError::InvalidSpan(format!(
            "{entity_type} span start {start} must be lower than end {end}"
        )));
    }
    if end > text_len {
        return Err(ShroudError::InvalidSpan(format!(
            "{entity_type} span end {end} exceeds text length {text_len}"
        )));
    }
    Ok(())
}

/// One replacement in a rebuilt text
///
/// Coordinates refer to the rebuilt text. The same shape is accepted as
/// deanonymize input, where `operator` and `text` may be omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnonymizedEntity {
    /// Start offset in the rebuilt text
    pub start: usize,
    /// End offset in the rebuilt text
    pub end: usize,
    /// Entity type label
    pub entity_type: String,
    /// Operator that produced the text at this position
    #[serde(default)]
    pub operator: String,
    /// Text written at this position
    #[serde(default)]
    pub text: String,
}

impl AnonymizedEntity {
    /// Create a new result entity
    pub fn new(
        entity_type: impl Into<String>,
        start: usize,
        end: usize,
        operator: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            start,
            end,
            entity_type: entity_type.into(),
            operator: operator.into(),
            text: text.into(),
        }
    }

    /// Check `0 <= start < end <= text_len`
    pub fn validate(&self, text_len: usize) -> Result<()> {
        validate_bounds(self.start, self.end, text_len, &self.entity_type)
    }
}

/// Output of an anonymize or deanonymize call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineResult {
    /// Rebuilt text
    pub text: String,
    /// Replacements, ascending by start offset in `text`
    pub items: Vec<AnonymizedEntity>,
}

/// Result of [`AnonymizerEngine::anonymize`](crate::anonymization::AnonymizerEngine::anonymize)
pub type AnonymizerResult = EngineResult;

/// Result of [`AnonymizerEngine::deanonymize`](crate::anonymization::AnonymizerEngine::deanonymize)
pub type DeanonymizeResult = EngineResult;

impl EngineResult {
    /// Serialize to the JSON wire shape `{text, items}`
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
