use anyhow::Result;
use chrono::NaiveDateTime;
use owo_colors::OwoColorize;

use super::resolve_id;
use crate::CliPlanner;
use crate::render::{Render, pluralize};

pub fn set_completed(planner: &mut CliPlanner, id: &str, completed: bool) -> Result<()> {
    let id = resolve_id(planner, id)?;
    planner.set_completed(&id, completed);

    if let Some(event) = planner.schedule().get(&id) {
        let label = if completed { "  Done:" } else { "  Reopened:" };
        println!("{} {}", label.green(), event.render());
    }
    Ok(())
}

pub fn remove(planner: &mut CliPlanner, id: &str) -> Result<()> {
    let id = resolve_id(planner, id)?;
    let title = planner.schedule().get(&id).map(|e| e.title.clone());

    if planner.delete(&id) {
        println!("{}", format!("  Removed: {}", title.unwrap_or(id)).red());
    }
    Ok(())
}

pub fn tomorrow(planner: &mut CliPlanner, id: &str, now: NaiveDateTime) -> Result<()> {
    let id = resolve_id(planner, id)?;
    planner.reschedule_to_tomorrow(&id, now);

    if let Some(event) = planner.schedule().get(&id) {
        println!(
            "{} {} {}",
            "  Moved:".green(),
            event.start_time.format("%a %b %-d").to_string().dimmed(),
            event.render()
        );
    }
    Ok(())
}

pub fn cleanup(planner: &mut CliPlanner, now: NaiveDateTime) -> Result<()> {
    // Opening the planner already cleans up, so this usually reports nothing new
    let removed = planner.cleanup(now);
    if removed == 0 {
        println!("{}", "No past events to remove".dimmed());
    } else {
        println!(
            "{}",
            format!("Removed {} past {}", removed, pluralize("event", removed)).green()
        );
    }
    Ok(())
}
