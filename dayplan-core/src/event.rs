//! Event types.
//!
//! An `Event` is a single scheduled activity on the local wall clock.
//! Its end time is never stored; it is always `start_time + duration`.

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A scheduled event.
///
/// Serialized with camelCase keys so that snapshots stay a flat list of
/// `{id, title, description?, location, startTime, duration, isCompleted}` records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub location: String,
    pub start_time: NaiveDateTime,
    /// Length in minutes
    pub duration: i64,
    #[serde(default)]
    pub is_completed: bool,
}

/// Everything needed to create an event except its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    pub start_time: NaiveDateTime,
    pub duration: i64,
}

/// Fields to merge into an existing event. `None` leaves a field untouched.
///
/// `description` is doubly optional so a patch can clear it with `Some(None)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub location: Option<String>,
    pub start_time: Option<NaiveDateTime>,
    pub duration: Option<i64>,
    pub is_completed: Option<bool>,
}

impl Event {
    /// Build an event from a draft, minting a fresh UUID v4 id.
    pub fn from_draft(draft: EventDraft) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), draft)
    }

    pub fn with_id(id: impl Into<String>, draft: EventDraft) -> Self {
        Event {
            id: id.into(),
            title: draft.title,
            description: draft.description,
            location: draft.location,
            start_time: draft.start_time,
            duration: draft.duration,
            is_completed: false,
        }
    }

    /// Start plus duration, clamped to the calendar limits.
    ///
    /// Events held by a `Schedule` always have a representable end, so the
    /// clamp only matters for events built outside of one.
    pub fn end_time(&self) -> NaiveDateTime {
        self.checked_end_time().unwrap_or(if self.duration < 0 {
            NaiveDateTime::MIN
        } else {
            NaiveDateTime::MAX
        })
    }

    /// Start plus duration, or `None` when the end falls outside the calendar.
    pub fn checked_end_time(&self) -> Option<NaiveDateTime> {
        self.start_time
            .checked_add_signed(Duration::try_minutes(self.duration)?)
    }

    /// Local calendar day the event starts on.
    pub fn start_date(&self) -> NaiveDate {
        self.start_time.date()
    }

    /// Return a copy of this event with the patch merged in. The id never changes.
    pub fn patched(&self, patch: &EventPatch) -> Event {
        Event {
            id: self.id.clone(),
            title: patch.title.clone().unwrap_or_else(|| self.title.clone()),
            description: patch
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
            location: patch.location.clone().unwrap_or_else(|| self.location.clone()),
            start_time: patch.start_time.unwrap_or(self.start_time),
            duration: patch.duration.unwrap_or(self.duration),
            is_completed: patch.is_completed.unwrap_or(self.is_completed),
        }
    }
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        *self == EventPatch::default()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn draft() -> EventDraft {
        EventDraft {
            title: "Standup".to_string(),
            description: Some("Daily sync".to_string()),
            location: "Room 4".to_string(),
            start_time: at(2024, 1, 10, 23, 30),
            duration: 45,
        }
    }

    #[test]
    fn end_time_crosses_midnight() {
        let event = Event::with_id("e1", draft());
        assert_eq!(event.end_time(), at(2024, 1, 11, 0, 15));
        assert_eq!(event.start_date(), NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
    }

    #[test]
    fn huge_duration_has_no_end_and_clamps() {
        let mut event = Event::with_id("e1", draft());
        event.duration = 200_000_000_000;
        assert_eq!(event.checked_end_time(), None);
        assert_eq!(event.end_time(), NaiveDateTime::MAX);

        event.duration = i64::MAX;
        assert_eq!(event.checked_end_time(), None);
        assert_eq!(event.end_time(), NaiveDateTime::MAX);
    }

    #[test]
    fn from_draft_mints_distinct_ids() {
        let a = Event::from_draft(draft());
        let b = Event::from_draft(draft());
        assert_ne!(a.id, b.id);
        assert!(!a.is_completed);
    }

    #[test]
    fn patch_merges_only_given_fields() {
        let event = Event::with_id("e1", draft());
        let patch = EventPatch {
            title: Some("Retro".to_string()),
            description: Some(None),
            ..Default::default()
        };

        let patched = event.patched(&patch);
        assert_eq!(patched.id, "e1");
        assert_eq!(patched.title, "Retro");
        assert_eq!(patched.description, None);
        assert_eq!(patched.location, "Room 4");
        assert_eq!(patched.duration, 45);
    }

    #[test]
    fn serializes_with_camel_case_keys_and_omits_missing_description() {
        let mut event = Event::with_id("e1", draft());
        event.description = None;

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["startTime"], "2024-01-10T23:30:00");
        assert_eq!(json["isCompleted"], false);
        assert!(json.get("description").is_none());
    }

    #[test]
    fn deserializes_without_optional_fields() {
        let json = r#"{"id":"x","title":"T","location":"L","startTime":"2024-01-10T10:00:00","duration":30}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.description, None);
        assert!(!event.is_completed);
        assert_eq!(event.start_time, at(2024, 1, 10, 10, 0));
    }
}
