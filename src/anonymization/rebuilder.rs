//! Text rebuilder
//!
//! Applies operator output to the original text and reports where each
//! replacement landed in the rebuilt text.

use crate::anonymization::models::{AnonymizedEntity, EngineResult};
use crate::anonymization::models::entity::validate_bounds;
use crate::domain::{Result, ShroudError};

/// One span's operator output, in original-text coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    /// Start offset in the original text
    pub start: usize,
    /// End offset in the original text
    pub end: usize,
    /// Entity type label
    pub entity_type: String,
    /// Operator that produced `text`
    pub operator: String,
    /// Text to write over `[start, end)`
    pub text: String,
}

/// Byte offset of every char boundary in `text`, including the end
pub(crate) fn char_boundaries(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(byte, _)| byte)
        .chain(std::iter::once(text.len()))
        .collect()
}

/// Splice replacements into `text`
///
/// `replacements` must be ascending by start and pairwise non-overlapping.
/// Splicing runs from the last replacement to the first so the byte offsets of
/// replacements not yet applied stay valid; new coordinates are then derived
/// in a forward pass from the length change of every earlier replacement.
///
/// # Errors
///
/// Returns [`ShroudError::InvalidSpan`] if a replacement lies outside the text
/// or the list is unordered or overlapping.
pub fn rebuild(text: &str, replacements: Vec<Replacement>) -> Result<EngineResult> {
    let boundaries = char_boundaries(text);
    let char_len = boundaries.len() - 1;

    let mut previous_end = 0;
    for replacement in &replacements {
        validate_bounds(
            replacement.start,
            replacement.end,
            char_len,
            &replacement.entity_type,
        )?;
        if replacement.start < previous_end {
            return Err(ShroudError::InvalidSpan(format!(
                "{} span [{}, {}) overlaps or precedes the previous span ending at {}",
                replacement.entity_type, replacement.start, replacement.end, previous_end
            )));
        }
        previous_end = replacement.end;
    }

    let mut rebuilt = text.to_string();
    for replacement in replacements.iter().rev() {
        rebuilt.replace_range(
            boundaries[replacement.start]..boundaries[replacement.end],
            &replacement.text,
        );
    }

    let mut removed = 0;
    let mut added = 0;
    let mut items = Vec::with_capacity(replacements.len());
    for replacement in replacements {
        let new_len = replacement.text.chars().count();
        let new_start = replacement.start - removed + added;
        removed += replacement.end - replacement.start;
        added += new_len;
        items.push(AnonymizedEntity::new(
            replacement.entity_type,
            new_start,
            new_start + new_len,
            replacement.operator,
            replacement.text,
        ));
    }
    items.sort_by_key(|item| item.start);

    // len(new) == len(old) - covered + written, in chars
    debug_assert_eq!(rebuilt.chars().count(), char_len - removed + added);

    Ok(EngineResult {
        text: rebuilt,
        items,
    })
}
