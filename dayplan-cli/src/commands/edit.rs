use anyhow::{Context, Result};
use chrono::NaiveDate;
use dayplan_core::EventPatch;
use dayplan_core::form::parse_time;
use owo_colors::OwoColorize;

use super::resolve_id;
use crate::CliPlanner;
use crate::render::Render;

/// Field changes requested on the command line.
pub struct Edit {
    pub title: Option<String>,
    pub location: Option<String>,
    pub description: Option<Option<String>>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub duration: Option<i64>,
}

pub fn run(planner: &mut CliPlanner, id: &str, edit: Edit) -> Result<()> {
    let id = resolve_id(planner, id)?;
    let current = planner
        .schedule()
        .get(&id)
        .cloned()
        .with_context(|| format!("No event with id '{}'", id))?;

    // A new date keeps the old time of day and vice versa
    let start_time = match (edit.date, edit.time.as_deref()) {
        (None, None) => None,
        (date, time) => {
            let time = match time {
                Some(t) => parse_time(t)
                    .with_context(|| format!("Invalid time '{}'. Expected HH:MM", t))?,
                None => current.start_time.time(),
            };
            Some(date.unwrap_or(current.start_date()).and_time(time))
        }
    };

    if edit.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        anyhow::bail!("Title cannot be empty");
    }
    if edit.location.as_deref().is_some_and(|l| l.trim().is_empty()) {
        anyhow::bail!("Location cannot be empty");
    }

    let patch = EventPatch {
        title: edit.title,
        description: edit.description,
        location: edit.location,
        start_time,
        duration: edit.duration,
        is_completed: None,
    };

    if patch.is_empty() {
        println!("{}", "Nothing to change".dimmed());
        return Ok(());
    }

    planner.update(&id, &patch)?;

    if let Some(updated) = planner.schedule().get(&id).cloned() {
        let conflicts = planner.schedule().conflicts_for(&updated);
        println!("{} {}", "  Updated:".green(), updated.render());
        for conflict in &conflicts {
            println!("  {} overlaps {}", "!".yellow(), conflict.first.render());
        }
    }

    Ok(())
}
