//! Event form input and its validation.
//!
//! The engine trusts its callers to hand it well-formed events. This is the
//! layer that makes raw user input well-formed first.

use chrono::{NaiveDate, NaiveTime};

use crate::error::{FieldError, PlanError, PlanResult};
use crate::event::EventDraft;

/// Default length for a new event, in minutes.
pub const DEFAULT_DURATION: i64 = 60;

/// Raw values as a user typed them.
#[derive(Debug, Clone)]
pub struct EventForm {
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: NaiveDate,
    /// `H:MM` or `HH:MM`, 24-hour clock
    pub time: String,
    pub duration: i64,
}

impl EventForm {
    /// Check every field and build a draft, or report all failing fields at once.
    pub fn validate(&self) -> PlanResult<EventDraft> {
        let mut errors = Vec::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.push(FieldError::new("title", "Title is required"));
        }

        let location = self.location.trim();
        if location.is_empty() {
            errors.push(FieldError::new("location", "Location is required"));
        }

        let time = parse_time(&self.time);
        if time.is_none() {
            errors.push(FieldError::new("time", "Valid time format is required (HH:MM)"));
        }

        if self.duration < 1 {
            errors.push(FieldError::new("duration", "Duration is required"));
        }

        match time {
            Some(time) if errors.is_empty() => {
                let description = self.description.trim();
                Ok(EventDraft {
                    title: title.to_string(),
                    description: (!description.is_empty()).then(|| description.to_string()),
                    location: location.to_string(),
                    start_time: self.date.and_time(time),
                    duration: self.duration,
                })
            }
            _ => Err(PlanError::Validation(errors)),
        }
    }
}

/// Parse a 24-hour `H:MM` / `HH:MM` time. Hours 0-23, minutes exactly two digits.
pub fn parse_time(input: &str) -> Option<NaiveTime> {
    let (hours, minutes) = input.trim().split_once(':')?;

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(hours) || hours.len() > 2 || !all_digits(minutes) || minutes.len() != 2 {
        return None;
    }

    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }

    NaiveTime::from_hms_opt(hours, minutes, 0)
}
