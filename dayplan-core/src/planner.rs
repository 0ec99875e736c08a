//! The service layer front-ends talk to.
//!
//! A `Planner` owns the schedule together with its collaborators: it persists
//! the whole collection after each change, turns engine results into notices,
//! and drives the periodic reminder / day-rollover work from `tick`.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::conflict::EventConflict;
use crate::error::PlanResult;
use crate::event::{Event, EventPatch};
use crate::notify::{Notice, Notifier};
use crate::query::UpcomingBuckets;
use crate::schedule::{Added, Schedule};
use crate::stats::ProfileStats;
use crate::store::EventStore;

/// Default reminder lead time, in minutes.
pub const DEFAULT_REMINDER_LEAD_MINUTES: i64 = 15;

pub struct Planner<S: EventStore, N: Notifier> {
    schedule: Schedule,
    store: S,
    notifier: N,
    reminder_lead: Duration,
    last_day: NaiveDate,
    /// `(id, start)` pairs already announced, so each start is reminded once
    reminded: HashSet<(String, NaiveDateTime)>,
}

impl<S: EventStore, N: Notifier> Planner<S, N> {
    /// Load the saved collection and clear out stale events.
    pub fn open(store: S, notifier: N, now: NaiveDateTime) -> Self {
        let schedule = Schedule::from_events(store.load());
        tracing::debug!(events = schedule.len(), "schedule loaded");

        let mut planner = Planner {
            schedule,
            store,
            notifier,
            reminder_lead: Duration::minutes(DEFAULT_REMINDER_LEAD_MINUTES),
            last_day: now.date(),
            reminded: HashSet::new(),
        };
        planner.cleanup(now);
        planner
    }

    pub fn with_reminder_lead(mut self, lead: Duration) -> Self {
        self.reminder_lead = lead;
        self
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn events(&self) -> &[Event] {
        self.schedule.events()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // =========================================================================
    // Mutations (each one persists)
    // =========================================================================

    pub fn add(&mut self, event: Event) -> PlanResult<Added> {
        let added = self.schedule.add(event)?;

        if !added.conflicts.is_empty() {
            self.notifier.notify(Notice::Conflicts(added.conflicts.clone()));
        }
        self.persist();
        Ok(added)
    }

    pub fn update(&mut self, id: &str, patch: &EventPatch) -> PlanResult<bool> {
        let changed = self.schedule.update(id, patch)?;
        if changed {
            self.persist();
        }
        Ok(changed)
    }

    pub fn set_completed(&mut self, id: &str, completed: bool) -> bool {
        self.persist_if(|schedule| schedule.set_completed(id, completed))
    }

    pub fn delete(&mut self, id: &str) -> bool {
        self.persist_if(|schedule| schedule.delete(id))
    }

    pub fn reschedule_to_tomorrow(&mut self, id: &str, now: NaiveDateTime) -> bool {
        self.persist_if(|schedule| schedule.reschedule_to_tomorrow(id, now))
    }

    /// Remove stale events and announce how many went.
    pub fn cleanup(&mut self, now: NaiveDateTime) -> usize {
        let removed = self.schedule.cleanup_past(now);
        if removed > 0 {
            self.notifier.notify(Notice::PastEventsRemoved(removed));
            self.persist();
        }
        removed
    }

    /// One periodic step: fire due reminders, and clean up after a day rollover.
    pub fn tick(&mut self, now: NaiveDateTime) {
        if now.date() != self.last_day {
            tracing::debug!(from = %self.last_day, to = %now.date(), "day boundary crossed");
            self.last_day = now.date();
            self.cleanup(now);
        }

        for due in self.schedule.starting_within(now, self.reminder_lead) {
            let key = (due.event.id.clone(), due.event.start_time);
            if self.reminded.insert(key) {
                self.notifier.notify(Notice::StartingSoon {
                    event: due.event,
                    minutes: due.minutes,
                });
            }
        }

        // Forget reminders for events that are gone or already started
        let live: HashSet<(String, NaiveDateTime)> = self
            .schedule
            .future_events(now)
            .into_iter()
            .map(|e| (e.id, e.start_time))
            .collect();
        self.reminded.retain(|key| live.contains(key));
    }

    fn persist_if(&mut self, f: impl FnOnce(&mut Schedule) -> bool) -> bool {
        let changed = f(&mut self.schedule);
        if changed {
            self.persist();
        }
        changed
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(self.schedule.events()) {
            tracing::error!(error = %err, "failed to save events");
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn events_on(&self, date: NaiveDate) -> Vec<Event> {
        self.schedule.events_on(date)
    }

    pub fn future_events(&self, now: NaiveDateTime) -> Vec<Event> {
        self.schedule.future_events(now)
    }

    pub fn next_upcoming(&self, now: NaiveDateTime) -> Option<Event> {
        self.schedule.next_upcoming(now)
    }

    pub fn buckets(&self, now: NaiveDateTime) -> UpcomingBuckets {
        self.schedule.buckets(now)
    }

    pub fn all_conflicts(&self) -> Vec<EventConflict> {
        self.schedule.all_conflicts()
    }

    pub fn stats(&self, now: NaiveDateTime) -> ProfileStats {
        ProfileStats::compute(self.schedule.events(), now)
    }
}
