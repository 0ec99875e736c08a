use anyhow::Result;
use chrono::NaiveDate;
use dayplan_core::Event;
use dayplan_core::form::EventForm;
use owo_colors::OwoColorize;

use crate::CliPlanner;
use crate::render::short_id;

pub fn run(
    planner: &mut CliPlanner,
    title: String,
    location: String,
    date: NaiveDate,
    time: String,
    duration: i64,
    description: Option<String>,
) -> Result<()> {
    let form = EventForm {
        title,
        description: description.unwrap_or_default(),
        location,
        date,
        time,
        duration,
    };

    let draft = form.validate()?;
    let added = planner.add(Event::from_draft(draft))?;

    println!(
        "{} {}",
        format!(
            "  Created: {} on {}",
            added.event.title,
            added.event.start_time.format("%a %b %-d at %H:%M")
        )
        .green(),
        short_id(&added.event.id).dimmed()
    );

    Ok(())
}
