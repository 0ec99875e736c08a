//! Date and range queries over an event collection.
//!
//! Every query takes `now` (or a date) explicitly and reads nothing from the
//! system clock. Results are sorted by start time; storage order only matters
//! as the tie-break between equal start times.

use chrono::{Days, Duration, NaiveDate, NaiveDateTime};

use crate::event::Event;

/// Upcoming events split into three disjoint day ranges.
///
/// Together the buckets cover every event starting tomorrow or later.
/// Events starting today or earlier are in none of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpcomingBuckets {
    pub tomorrow: Vec<Event>,
    pub day_after: Vec<Event>,
    pub later: Vec<Event>,
}

impl UpcomingBuckets {
    pub fn is_empty(&self) -> bool {
        self.tomorrow.is_empty() && self.day_after.is_empty() && self.later.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tomorrow.len() + self.day_after.len() + self.later.len()
    }
}

/// An incomplete event about to start, with minutes left rounded to the nearest minute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueReminder {
    pub event: Event,
    pub minutes: i64,
}

/// Stable chronological sort. Equal start times keep their relative order.
pub fn sort_chronological(mut events: Vec<Event>) -> Vec<Event> {
    events.sort_by_key(|e| e.start_time);
    events
}

/// Midnight at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(chrono::NaiveTime::MIN)
}

/// `date` shifted forward by `days`, or `None` past the end of the calendar.
pub fn day_offset(date: NaiveDate, days: u64) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(days))
}

/// Events starting on the same local calendar day as `date`, whatever the time of day.
pub fn events_on(events: &[Event], date: NaiveDate) -> Vec<Event> {
    sort_chronological(
        events
            .iter()
            .filter(|e| e.start_date() == date)
            .cloned()
            .collect(),
    )
}

/// Events starting strictly after `now`.
pub fn future_events(events: &[Event], now: NaiveDateTime) -> Vec<Event> {
    sort_chronological(
        events
            .iter()
            .filter(|e| e.start_time > now)
            .cloned()
            .collect(),
    )
}

/// The earliest incomplete event starting strictly after `now`.
///
/// On equal start times the event stored first wins.
pub fn next_upcoming(events: &[Event], now: NaiveDateTime) -> Option<Event> {
    events
        .iter()
        .filter(|e| e.start_time > now && !e.is_completed)
        .fold(None::<&Event>, |best, e| match best {
            Some(b) if b.start_time <= e.start_time => Some(b),
            _ => Some(e),
        })
        .cloned()
}

/// Split events starting tomorrow or later into tomorrow / day after / later.
pub fn buckets(events: &[Event], now: NaiveDateTime) -> UpcomingBuckets {
    let today = now.date();
    let (Some(tomorrow), Some(day_after)) = (day_offset(today, 1), day_offset(today, 2)) else {
        return UpcomingBuckets::default();
    };

    let mut result = UpcomingBuckets::default();

    for event in events {
        let date = event.start_date();
        if date == tomorrow {
            result.tomorrow.push(event.clone());
        } else if date == day_after {
            result.day_after.push(event.clone());
        } else if date > day_after {
            result.later.push(event.clone());
        }
    }

    result.tomorrow = sort_chronological(result.tomorrow);
    result.day_after = sort_chronological(result.day_after);
    result.later = sort_chronological(result.later);
    result
}

/// Incomplete events starting after `now` and no more than `lead` ahead of it.
pub fn starting_within(events: &[Event], now: NaiveDateTime, lead: Duration) -> Vec<DueReminder> {
    sort_chronological(
        events
            .iter()
            .filter(|e| !e.is_completed && e.start_time > now && e.start_time - now <= lead)
            .cloned()
            .collect(),
    )
    .into_iter()
    .map(|event| {
        let millis = (event.start_time - now).num_milliseconds();
        let minutes = (millis + 30_000) / 60_000;
        DueReminder { event, minutes }
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn event(id: &str, start: NaiveDateTime) -> Event {
        Event {
            id: id.to_string(),
            title: id.to_string(),
            description: None,
            location: "Home".to_string(),
            start_time: start,
            duration: 60,
            is_completed: false,
        }
    }

    fn ids(events: &[Event]) -> Vec<&str> {
        events.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn events_on_matches_calendar_day_not_rolling_window() {
        let events = vec![
            event("late", at(10, 23, 59)),
            event("early", at(10, 0, 0)),
            event("next", at(11, 0, 0)),
            event("prev", at(9, 23, 59)),
        ];

        let on = events_on(&events, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert_eq!(ids(&on), vec!["early", "late"]);
    }

    #[test]
    fn future_events_are_strictly_after_now() {
        let now = at(10, 12, 0);
        let events = vec![
            event("now", now),
            event("later", at(10, 12, 1)),
            event("past", at(10, 11, 59)),
        ];
        assert_eq!(ids(&future_events(&events, now)), vec!["later"]);
    }

    #[test]
    fn next_upcoming_skips_completed_and_current() {
        let now = at(10, 12, 0);
        let mut done = event("done", at(10, 12, 30));
        done.is_completed = true;
        let events = vec![
            event("at-now", now),
            done,
            event("b", at(10, 15, 0)),
            event("a", at(10, 14, 0)),
        ];

        assert_eq!(next_upcoming(&events, now).map(|e| e.id), Some("a".to_string()));
    }

    #[test]
    fn next_upcoming_tie_prefers_stored_first() {
        let now = at(10, 8, 0);
        let events = vec![event("first", at(10, 9, 0)), event("second", at(10, 9, 0))];
        assert_eq!(next_upcoming(&events, now).map(|e| e.id), Some("first".to_string()));
    }

    #[test]
    fn next_upcoming_none_when_nothing_ahead() {
        let now = at(10, 8, 0);
        assert_eq!(next_upcoming(&[event("past", at(9, 8, 0))], now), None);
        assert_eq!(next_upcoming(&[], now), None);
    }

    #[test]
    fn late_tomorrow_event_lands_in_tomorrow_bucket() {
        let now = at(10, 8, 0);
        let split = buckets(&[event("d", at(11, 23, 0))], now);
        assert_eq!(ids(&split.tomorrow), vec!["d"]);
        assert!(split.day_after.is_empty());
        assert!(split.later.is_empty());
    }

    #[test]
    fn buckets_are_disjoint_and_cover_tomorrow_onward() {
        let now = at(10, 23, 59);
        let events = vec![
            event("today", at(10, 23, 59)),
            event("yesterday", at(9, 10, 0)),
            event("tomorrow-midnight", at(11, 0, 0)),
            event("tomorrow-late", at(11, 23, 59)),
            event("day-after", at(12, 0, 0)),
            event("later", at(13, 0, 0)),
            event("much-later", at(30, 9, 0)),
        ];

        let split = buckets(&events, now);
        assert_eq!(ids(&split.tomorrow), vec!["tomorrow-midnight", "tomorrow-late"]);
        assert_eq!(ids(&split.day_after), vec!["day-after"]);
        assert_eq!(ids(&split.later), vec!["later", "much-later"]);

        let from_tomorrow = events
            .iter()
            .filter(|e| e.start_time >= start_of_day(at(11, 0, 0).date()))
            .count();
        assert_eq!(split.len(), from_tomorrow);
    }

    #[test]
    fn starting_within_reports_rounded_minutes() {
        let now = at(10, 9, 0) + Duration::seconds(20);
        let mut done = event("done", at(10, 9, 5));
        done.is_completed = true;
        let events = vec![
            event("soon", at(10, 9, 10)),
            event("edge", at(10, 9, 15)),
            event("too-far", at(10, 9, 16)),
            event("started", at(10, 9, 0)),
            done,
        ];

        let due = starting_within(&events, now, Duration::minutes(15));
        let got: Vec<(&str, i64)> = due.iter().map(|r| (r.event.id.as_str(), r.minutes)).collect();
        assert_eq!(got, vec![("soon", 10), ("edge", 15)]);
    }
}
