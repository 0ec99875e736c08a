use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use owo_colors::OwoColorize;

use crate::CliPlanner;
use crate::render::{pluralize, render_event_at};

pub fn run(planner: &CliPlanner, date: NaiveDate, now: NaiveDateTime) -> Result<()> {
    let events = planner.events_on(date);

    println!("{}", date.format("%A, %B %-d").to_string().bold());

    if events.is_empty() {
        println!("  {}", "No events scheduled".dimmed());
        return Ok(());
    }

    println!(
        "  {}",
        format!("{} {} scheduled", events.len(), pluralize("event", events.len())).dimmed()
    );

    let mut current_hour: Option<String> = None;
    for event in &events {
        let hour = event.start_time.format("%H:00").to_string();
        if current_hour.as_ref() != Some(&hour) {
            println!("  {}", hour.cyan());
            current_hour = Some(hour);
        }
        println!("    {}", render_event_at(event, now));
    }

    Ok(())
}
