//! Span conflict resolution
//!
//! Turns the detector's unordered, possibly overlapping spans into an
//! ascending, pairwise non-overlapping list.
//!
//! Resolution rules:
//!
//! 1. Spans sharing a start collapse to one: the longest, then the highest
//!    score, then the lowest entity type.
//! 2. A span nested inside another candidate waits until its container is
//!    decided. Only outermost spans take part in a round.
//! 3. Outermost spans are accepted by priority (score descending, then start
//!    ascending, then the longer span) unless they overlap an already
//!    accepted span. Partial overlaps are therefore decided by score.
//! 4. Nested spans whose container was accepted are dropped. Those whose
//!    container lost a partial overlap become candidates for the next round.
//! 5. Accepted spans come back ascending by start.
//!
//! Every dropped span overlaps an accepted one, and a container always wins
//! over the spans inside it. An input that is already ascending and
//! non-overlapping is returned as is.

use crate::anonymization::models::EntitySpan;
use crate::domain::Result;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Validate spans against the text length and resolve overlaps
///
/// # Errors
///
/// Returns [`ShroudError::InvalidSpan`](crate::domain::ShroudError::InvalidSpan)
/// if any span has `start >= end` or `end > text_len`; nothing is resolved
/// in that case.
pub fn resolve_conflicts(spans: &[EntitySpan], text_len: usize) -> Result<Vec<EntitySpan>> {
    for span in spans {
        span.validate(text_len)?;
    }

    let mut candidates: Vec<&EntitySpan> = spans.iter().collect();
    candidates.sort_by(|a, b| a.position_order(b));
    candidates.dedup_by(|later, kept| later.start == kept.start);

    let mut accepted: BTreeMap<usize, &EntitySpan> = BTreeMap::new();
    while !candidates.is_empty() {
        let (mut outermost, nested) = split_outermost(candidates);

        outermost.sort_by(|a, b| priority_order(a, b));
        for candidate in outermost {
            if !overlaps_accepted(&accepted, candidate) {
                accepted.insert(candidate.start, candidate);
            }
        }

        candidates = nested
            .into_iter()
            .filter(|span| !overlaps_accepted(&accepted, span))
            .collect();
    }

    Ok(accepted.into_values().cloned().collect())
}

/// Split position-ordered spans with distinct starts into the spans no other
/// span contains and the rest. Both halves keep position order.
fn split_outermost(candidates: Vec<&EntitySpan>) -> (Vec<&EntitySpan>, Vec<&EntitySpan>) {
    let mut outermost = Vec::new();
    let mut nested = Vec::new();
    let mut furthest_end = 0;
    for span in candidates {
        if span.end > furthest_end {
            furthest_end = span.end;
            outermost.push(span);
        } else {
            nested.push(span);
        }
    }
    (outermost, nested)
}

fn priority_order(a: &EntitySpan, b: &EntitySpan) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.position_order(b))
}

/// Accepted spans never overlap each other, so only the nearest neighbours
/// on either side of `candidate.start` need checking.
fn overlaps_accepted(accepted: &BTreeMap<usize, &EntitySpan>, candidate: &EntitySpan) -> bool {
    let before = accepted
        .range(..=candidate.start)
        .next_back()
        .is_some_and(|(_, span)| span.end > candidate.start);
    let after = accepted
        .range(candidate.start..)
        .next()
        .is_some_and(|(_, span)| span.start < candidate.end);
    before || after
}
