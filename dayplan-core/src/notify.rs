//! Advisory notifications.
//!
//! The planner hands notices to a [`Notifier`] and moves on. Nothing waits for
//! a notice to be shown or acknowledged.

use crate::conflict::EventConflict;
use crate::event::Event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A newly added event overlaps existing ones.
    Conflicts(Vec<EventConflict>),
    /// An incomplete event starts within the reminder lead time.
    StartingSoon { event: Event, minutes: i64 },
    /// Cleanup removed this many past, incomplete events.
    PastEventsRemoved(usize),
}

pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// Writes notices to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        match notice {
            Notice::Conflicts(conflicts) => {
                for c in &conflicts {
                    tracing::warn!(
                        first = %c.first.id,
                        second = %c.second.id,
                        "time conflict: '{}' overlaps '{}'",
                        c.first.title,
                        c.second.title
                    );
                }
            }
            Notice::StartingSoon { event, minutes } => {
                tracing::info!(event_id = %event.id, minutes, "upcoming: {} at {}", event.title, event.location);
            }
            Notice::PastEventsRemoved(count) => {
                tracing::info!(count, "past events have been removed");
            }
        }
    }
}
