//! Terminal rendering for dayplan types.
//!
//! Extension traits that add colored output to dayplan-core types using owo_colors.

use chrono::NaiveDateTime;
use dayplan_core::notify::{Notice, Notifier};
use dayplan_core::{Event, EventConflict};
use owo_colors::OwoColorize;

/// Length of the id prefix shown in listings
pub const SHORT_ID_LEN: usize = 8;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    fn render(&self) -> String {
        let time = self.start_time.format("%H:%M").to_string();
        let mut line = format!(
            "{} {} {} {}",
            time.bold(),
            self.title,
            format!("@ {}", self.location).dimmed(),
            format!("({} min)", self.duration).dimmed()
        );

        if self.is_completed {
            line.push_str(&format!(" {}", "done".green()));
        }
        line.push_str(&format!(" {}", short_id(&self.id).dimmed()));
        line
    }
}

impl Render for EventConflict {
    fn render(&self) -> String {
        let headline = format!("{} conflicts with {}", self.first.title, self.second.title);
        format!(
            "{}\n     {}: {} ({} min)\n     {}: {} ({} min)",
            headline.red(),
            self.first.title.bold(),
            self.first.start_time.format("%b %-d, %Y %H:%M"),
            self.first.duration,
            self.second.title.bold(),
            self.second.start_time.format("%b %-d, %Y %H:%M"),
            self.second.duration
        )
    }
}

/// An event line, with a "past" badge once it has started.
pub fn render_event_at(event: &Event, now: NaiveDateTime) -> String {
    if event.start_time < now {
        format!("{} {}", event.render().dimmed(), "past".yellow())
    } else {
        event.render()
    }
}

pub fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID_LEN).unwrap_or(id)
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

/// Prints notices to stderr as they arrive.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        match notice {
            Notice::Conflicts(conflicts) => {
                eprintln!("{}", "Time conflict detected!".yellow().bold());
                eprintln!("  This event overlaps with existing events:");
                for conflict in &conflicts {
                    eprintln!(
                        "  {} {}",
                        "-".yellow(),
                        conflict.first.render()
                    );
                }
            }
            Notice::StartingSoon { event, minutes } => {
                eprintln!(
                    "{} {} in {} {}",
                    "Upcoming:".cyan().bold(),
                    event.title,
                    minutes,
                    pluralize("minute", minutes.unsigned_abs() as usize)
                );
                eprintln!("  {}", format!("At {}", event.location).dimmed());
            }
            Notice::PastEventsRemoved(count) => {
                eprintln!(
                    "{}",
                    format!("{} past {} removed", count, pluralize("event", count)).dimmed()
                );
            }
        }
    }
}
