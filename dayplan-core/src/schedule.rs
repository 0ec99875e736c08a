//! The event collection and its operations.
//!
//! `Schedule` owns the canonical list of events. Mutations build a replacement
//! list and swap it in whole, so no reader ever sees a half-applied change.

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

use crate::conflict::{self, EventConflict};
use crate::error::{PlanError, PlanResult};
use crate::event::{Event, EventPatch};
use crate::query::{self, DueReminder, UpcomingBuckets};

/// Result of a successful `add`.
#[derive(Debug, Clone)]
pub struct Added {
    pub event: Event,
    /// Advisory only: the event was stored regardless.
    pub conflicts: Vec<EventConflict>,
}

#[derive(Debug, Clone, Default)]
pub struct Schedule {
    events: Vec<Event>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a schedule from a loaded snapshot.
    ///
    /// Records with a non-positive duration or a repeated id are dropped so the
    /// collection invariants hold from the start.
    pub fn from_events(events: Vec<Event>) -> Self {
        let mut schedule = Schedule::new();
        for event in events {
            let id = event.id.clone();
            if let Err(err) = schedule.insert(event) {
                tracing::warn!(event_id = %id, error = %err, "skipping invalid stored event");
            }
        }
        schedule
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Insert a fully formed event.
    ///
    /// Conflicts are computed against the events already stored and returned
    /// alongside the new event; they never block the insert.
    pub fn add(&mut self, event: Event) -> PlanResult<Added> {
        let conflicts = conflict::find_conflicts_for(&event, &self.events);
        self.insert(event.clone())?;

        tracing::debug!(event_id = %event.id, conflicts = conflicts.len(), "event added");
        Ok(Added { event, conflicts })
    }

    fn insert(&mut self, event: Event) -> PlanResult<()> {
        check_duration(&event)?;
        if self.get(&event.id).is_some() {
            return Err(PlanError::DuplicateId(event.id));
        }

        let mut next = self.events.clone();
        next.push(event);
        self.events = next;
        Ok(())
    }

    /// Merge `patch` into the event with `id`.
    ///
    /// Returns `Ok(false)` when no event has that id. A patch that would leave a
    /// non-positive duration, or an end past the calendar limit, is refused and
    /// nothing changes.
    pub fn update(&mut self, id: &str, patch: &EventPatch) -> PlanResult<bool> {
        if let Some(duration) = patch.duration.filter(|d| *d <= 0) {
            return Err(PlanError::InvalidDuration(duration));
        }
        let Some(current) = self.get(id) else {
            return Ok(false);
        };

        let patched = current.patched(patch);
        check_duration(&patched)?;
        Ok(self.replace_where(id, |_| patched.clone()))
    }

    /// Mark an event done (or not done). Returns false when the id is unknown.
    pub fn set_completed(&mut self, id: &str, completed: bool) -> bool {
        self.replace_where(id, |event| Event {
            is_completed: completed,
            ..event.clone()
        })
    }

    /// Remove the event with `id`. Returns false when the id is unknown.
    pub fn delete(&mut self, id: &str) -> bool {
        let next: Vec<Event> = self.events.iter().filter(|e| e.id != id).cloned().collect();
        let removed = next.len() != self.events.len();
        self.events = next;

        if removed {
            tracing::debug!(event_id = %id, "event deleted");
        }
        removed
    }

    /// Remove incomplete events that started before today.
    ///
    /// Completed past events are kept as history. Returns how many were removed;
    /// calling it again with the same `now` removes nothing.
    pub fn cleanup_past(&mut self, now: NaiveDateTime) -> usize {
        let today = query::start_of_day(now.date());

        let next: Vec<Event> = self
            .events
            .iter()
            .filter(|e| e.is_completed || e.start_time >= today)
            .cloned()
            .collect();

        let removed = self.events.len() - next.len();
        self.events = next;

        if removed > 0 {
            tracing::info!(removed, "cleaned up past events");
        }
        removed
    }

    /// Move an event to tomorrow (relative to `now`), keeping its hour and minute.
    ///
    /// This snaps to the calendar day after `now`; it is not a fixed 24h shift
    /// from the event's own date. Returns false when the id is unknown.
    pub fn reschedule_to_tomorrow(&mut self, id: &str, now: NaiveDateTime) -> bool {
        let Some(tomorrow) = query::day_offset(now.date(), 1) else {
            return false;
        };

        let Some(moved) = self.get(id).map(|event| Event {
            start_time: tomorrow_at(tomorrow, event.start_time),
            ..event.clone()
        }) else {
            return false;
        };
        if check_duration(&moved).is_err() {
            return false;
        }

        self.replace_where(id, |_| moved.clone())
    }

    fn replace_where(&mut self, id: &str, f: impl Fn(&Event) -> Event) -> bool {
        if self.get(id).is_none() {
            return false;
        }

        self.events = self
            .events
            .iter()
            .map(|e| if e.id == id { f(e) } else { e.clone() })
            .collect();
        tracing::debug!(event_id = %id, "event updated");
        true
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn all_conflicts(&self) -> Vec<EventConflict> {
        conflict::find_all_conflicts(&self.events)
    }

    pub fn conflicts_for(&self, candidate: &Event) -> Vec<EventConflict> {
        conflict::find_conflicts_for(candidate, &self.events)
    }

    pub fn events_on(&self, date: NaiveDate) -> Vec<Event> {
        query::events_on(&self.events, date)
    }

    pub fn future_events(&self, now: NaiveDateTime) -> Vec<Event> {
        query::future_events(&self.events, now)
    }

    pub fn next_upcoming(&self, now: NaiveDateTime) -> Option<Event> {
        query::next_upcoming(&self.events, now)
    }

    pub fn buckets(&self, now: NaiveDateTime) -> UpcomingBuckets {
        query::buckets(&self.events, now)
    }

    pub fn starting_within(&self, now: NaiveDateTime, lead: Duration) -> Vec<DueReminder> {
        query::starting_within(&self.events, now, lead)
    }
}

/// A stored event needs a positive duration and an end time inside the calendar.
fn check_duration(event: &Event) -> PlanResult<()> {
    if event.duration <= 0 || event.checked_end_time().is_none() {
        return Err(PlanError::InvalidDuration(event.duration));
    }
    Ok(())
}

/// `date` combined with the hour and minute of `original`. Seconds are dropped.
fn tomorrow_at(date: NaiveDate, original: NaiveDateTime) -> NaiveDateTime {
    let time = original.time();
    date.and_hms_opt(time.hour(), time.minute(), 0)
        .unwrap_or_else(|| query::start_of_day(date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventDraft;

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn event(id: &str, start: NaiveDateTime, duration: i64) -> Event {
        Event::with_id(
            id,
            EventDraft {
                title: format!("Event {id}"),
                description: None,
                location: "Office".to_string(),
                start_time: start,
                duration,
            },
        )
    }

    #[test]
    fn add_reports_conflicts_but_still_stores() {
        let mut schedule = Schedule::new();
        schedule.add(event("a", at(10, 10, 0), 60)).unwrap();

        let added = schedule.add(event("b", at(10, 10, 0), 30)).unwrap();
        assert_eq!(added.conflicts.len(), 1);
        assert_eq!(added.conflicts[0].first.id, "a");
        assert_eq!(schedule.len(), 2);
    }

    #[test]
    fn add_rejects_non_positive_duration() {
        let mut schedule = Schedule::new();
        let err = schedule.add(event("a", at(10, 10, 0), 0)).unwrap_err();
        assert!(matches!(err, PlanError::InvalidDuration(0)));
        assert!(schedule.is_empty());
    }

    #[test]
    fn add_rejects_duplicate_id() {
        let mut schedule = Schedule::new();
        schedule.add(event("a", at(10, 10, 0), 30)).unwrap();
        let err = schedule.add(event("a", at(11, 10, 0), 30)).unwrap_err();
        assert!(matches!(err, PlanError::DuplicateId(id) if id == "a"));
        assert_eq!(schedule.len(), 1);
    }

    #[test]
    fn update_unknown_id_is_a_no_op() {
        let mut schedule = Schedule::new();
        schedule.add(event("a", at(10, 10, 0), 30)).unwrap();

        let patch = EventPatch {
            title: Some("Renamed".to_string()),
            ..Default::default()
        };
        assert!(!schedule.update("missing", &patch).unwrap());
        assert_eq!(schedule.get("a").unwrap().title, "Event a");
    }

    #[test]
    fn update_refuses_bad_duration() {
        let mut schedule = Schedule::new();
        schedule.add(event("a", at(10, 10, 0), 30)).unwrap();

        let patch = EventPatch {
            duration: Some(-5),
            ..Default::default()
        };
        assert!(schedule.update("a", &patch).is_err());
        assert_eq!(schedule.get("a").unwrap().duration, 30);
    }

    #[test]
    fn add_rejects_duration_past_calendar_end() {
        let mut schedule = Schedule::new();
        schedule.add(event("a", at(10, 10, 0), 60)).unwrap();

        let err = schedule.add(event("b", at(10, 10, 0), 200_000_000_000)).unwrap_err();
        assert!(matches!(err, PlanError::InvalidDuration(200_000_000_000)));
        assert!(schedule.add(event("c", at(10, 10, 0), i64::MAX)).is_err());

        assert_eq!(schedule.len(), 1);
        assert!(schedule.all_conflicts().is_empty());
    }

    #[test]
    fn update_refuses_duration_past_calendar_end() {
        let mut schedule = Schedule::new();
        schedule.add(event("a", at(10, 10, 0), 30)).unwrap();

        let patch = EventPatch {
            duration: Some(i64::MAX),
            ..Default::default()
        };
        assert!(matches!(
            schedule.update("a", &patch),
            Err(PlanError::InvalidDuration(i64::MAX))
        ));
        assert_eq!(schedule.get("a").unwrap().duration, 30);
    }

    #[test]
    fn update_merges_fields() {
        let mut schedule = Schedule::new();
        schedule.add(event("a", at(10, 10, 0), 30)).unwrap();

        let patch = EventPatch {
            location: Some("Cafe".to_string()),
            duration: Some(90),
            ..Default::default()
        };
        assert!(schedule.update("a", &patch).unwrap());

        let updated = schedule.get("a").unwrap();
        assert_eq!(updated.location, "Cafe");
        assert_eq!(updated.duration, 90);
        assert_eq!(updated.start_time, at(10, 10, 0));
    }

    #[test]
    fn delete_removes_only_matching_event() {
        let mut schedule = Schedule::new();
        schedule.add(event("a", at(10, 10, 0), 30)).unwrap();
        schedule.add(event("b", at(10, 12, 0), 30)).unwrap();

        assert!(schedule.delete("a"));
        assert!(!schedule.delete("a"));
        assert_eq!(schedule.len(), 1);
        assert!(schedule.get("b").is_some());
    }

    #[test]
    fn cleanup_removes_incomplete_events_before_today() {
        let now = at(10, 23, 50);
        let mut schedule = Schedule::new();
        schedule.add(event("c", at(9, 9, 0), 30)).unwrap();
        schedule.add(event("done", at(8, 9, 0), 30)).unwrap();
        schedule.add(event("today", at(10, 0, 0), 30)).unwrap();
        schedule.set_completed("done", true);

        assert_eq!(schedule.cleanup_past(now), 1);
        assert!(schedule.get("c").is_none());
        assert!(schedule.get("done").is_some());
        assert!(schedule.get("today").is_some());

        assert_eq!(schedule.cleanup_past(now), 0);
    }

    #[test]
    fn reschedule_snaps_to_day_after_now() {
        let mut schedule = Schedule::new();
        schedule.add(event("e", at(5, 23, 0), 60)).unwrap();

        assert!(schedule.reschedule_to_tomorrow("e", at(10, 0, 5)));
        assert_eq!(schedule.get("e").unwrap().start_time, at(11, 23, 0));
    }

    #[test]
    fn reschedule_unknown_id_is_a_no_op() {
        let mut schedule = Schedule::new();
        schedule.add(event("e", at(5, 23, 0), 60)).unwrap();

        assert!(!schedule.reschedule_to_tomorrow("missing", at(10, 0, 5)));
        assert_eq!(schedule.get("e").unwrap().start_time, at(5, 23, 0));
    }

    #[test]
    fn from_events_drops_invalid_records() {
        let schedule = Schedule::from_events(vec![
            event("a", at(10, 10, 0), 30),
            event("a", at(11, 10, 0), 30),
            event("b", at(10, 10, 0), -1),
            event("c", at(10, 12, 0), 200_000_000_000),
            event("d", at(10, 12, 0), i64::MAX),
        ]);
        assert_eq!(schedule.len(), 1);
        assert!(schedule.all_conflicts().is_empty());
        assert_eq!(schedule.get("a").unwrap().start_time, at(10, 10, 0));
    }
}
