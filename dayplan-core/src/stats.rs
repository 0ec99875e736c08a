//! Summary counts for the profile view.

use chrono::NaiveDateTime;

use crate::event::Event;
use crate::query;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub next: Option<Event>,
}

impl ProfileStats {
    pub fn compute(events: &[Event], now: NaiveDateTime) -> Self {
        let completed = events.iter().filter(|e| e.is_completed).count();

        ProfileStats {
            total: events.len(),
            completed,
            pending: events.len() - completed,
            next: query::next_upcoming(events, now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn counts_completed_and_pending() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let event = |id: &str, done: bool| Event {
            id: id.to_string(),
            title: id.to_string(),
            description: None,
            location: "Gym".to_string(),
            start_time: start,
            duration: 30,
            is_completed: done,
        };

        let events = vec![event("a", true), event("b", false), event("c", false)];
        let now = start - chrono::Duration::hours(1);
        let stats = ProfileStats::compute(&events, now);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.next.map(|e| e.id), Some("b".to_string()));
    }
}
