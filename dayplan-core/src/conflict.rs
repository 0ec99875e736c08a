//! Time-overlap conflict detection.
//!
//! Two overlap rules exist side by side and are kept separate on purpose:
//!
//! - [`OverlapRule::Touching`] is a closed-interval test used when scanning the
//!   whole collection. Events that merely touch (one ends exactly when the other
//!   starts) conflict under it.
//! - [`OverlapRule::StartCoincident`] is used when a single candidate is checked
//!   against existing events. It compares strictly inside the existing interval,
//!   and additionally flags two events that start at the same instant.
//!
//! Conflicts are derived values, recomputed from the collection on every call.

use chrono::NaiveDateTime;

use crate::event::Event;

/// A pair of events whose time intervals overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventConflict {
    pub first: Event,
    pub second: Event,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapRule {
    /// `[a.start, a.end]` and `[b.start, b.end]` intersect, endpoints included.
    Touching,
    /// The candidate's start or end lies strictly inside the existing event,
    /// the candidate strictly encloses it, or both start at the same instant.
    StartCoincident,
}

impl OverlapRule {
    /// Test `existing` against `candidate`.
    ///
    /// `Touching` is symmetric. `StartCoincident` is not: the argument order
    /// matters when one interval shares an end with the other.
    pub fn overlaps(self, existing: &Event, candidate: &Event) -> bool {
        let (e_start, e_end) = bounds(existing);
        let (c_start, c_end) = bounds(candidate);

        match self {
            OverlapRule::Touching => {
                (e_start <= c_end && e_end >= c_start) || (c_start <= e_end && c_end >= e_start)
            }
            OverlapRule::StartCoincident => {
                (c_start > e_start && c_start < e_end)
                    || (c_end > e_start && c_end < e_end)
                    || (c_start < e_start && c_end > e_end)
                    || c_start == e_start
            }
        }
    }
}

fn bounds(event: &Event) -> (NaiveDateTime, NaiveDateTime) {
    (event.start_time, event.end_time())
}

/// Scan every unordered pair `(i, j)` with `i < j` under the touching rule.
///
/// Results keep discovery order: outer index ascending, then inner index ascending.
pub fn find_all_conflicts(events: &[Event]) -> Vec<EventConflict> {
    let mut conflicts = Vec::new();

    for (i, first) in events.iter().enumerate() {
        for second in &events[i + 1..] {
            if OverlapRule::Touching.overlaps(first, second) {
                conflicts.push(EventConflict {
                    first: first.clone(),
                    second: second.clone(),
                });
            }
        }
    }

    conflicts
}

/// Check one candidate against existing events under the start-coincident rule.
///
/// Any existing event sharing the candidate's id is skipped, so an edited event
/// never conflicts with its own previous version. Each pair is `(existing, candidate)`.
pub fn find_conflicts_for(candidate: &Event, existing: &[Event]) -> Vec<EventConflict> {
    existing
        .iter()
        .filter(|event| event.id != candidate.id)
        .filter(|event| OverlapRule::StartCoincident.overlaps(event, candidate))
        .map(|event| EventConflict {
            first: event.clone(),
            second: candidate.clone(),
        })
        .collect()
}
