use anyhow::Result;
use chrono::NaiveDateTime;
use dayplan_core::Event;
use dayplan_core::query::day_offset;
use owo_colors::OwoColorize;

use crate::CliPlanner;
use crate::render::Render;

pub fn run(planner: &CliPlanner, now: NaiveDateTime) -> Result<()> {
    let buckets = planner.buckets(now);

    if buckets.is_empty() {
        println!("{}", "No upcoming events".dimmed());
        return Ok(());
    }

    let label = |days: u64| {
        day_offset(now.date(), days)
            .map(|d| d.format("%A, %B %-d").to_string())
            .unwrap_or_default()
    };

    print_section(&format!("Tomorrow: {}", label(1)), &buckets.tomorrow);
    print_section(&label(2), &buckets.day_after);
    print_section("Later", &buckets.later);

    Ok(())
}

fn print_section(title: &str, events: &[Event]) {
    println!("{}", title.bold());
    if events.is_empty() {
        println!("  {}", "Nothing planned".dimmed());
    }

    for event in events {
        println!("  {} {}", event.start_time.format("%a %b %-d").to_string().dimmed(), event.render());
    }
    println!();
}

pub fn next(planner: &CliPlanner, now: NaiveDateTime) -> Result<()> {
    match planner.next_upcoming(now) {
        Some(event) => {
            let wait = event.start_time - now;
            let hours = wait.num_hours();
            let minutes = wait.num_minutes() % 60;

            println!("{}", "Next up".bold());
            println!("  {} {}", event.start_time.format("%a %b %-d").to_string().dimmed(), event.render());
            println!("  {}", format!("starts in {}h {:02}m", hours, minutes).dimmed());
            if let Some(description) = &event.description {
                println!("  {}", description);
            }
        }
        None => println!("{}", "No upcoming events".dimmed()),
    }

    Ok(())
}
