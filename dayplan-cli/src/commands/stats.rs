use anyhow::Result;
use chrono::NaiveDateTime;
use owo_colors::OwoColorize;

use crate::CliPlanner;
use crate::render::Render;

pub fn run(planner: &CliPlanner, now: NaiveDateTime) -> Result<()> {
    let stats = planner.stats(now);

    println!("{}", "Statistics".bold());
    println!("  Total scheduled: {}", stats.total);
    println!("  Completed:       {}", stats.completed.to_string().green());
    println!("  Pending:         {}", stats.pending.to_string().yellow());

    println!();
    println!("{}", "Closest event".bold());
    match stats.next {
        Some(event) => println!(
            "  {} {}",
            event.start_time.format("%a %b %-d").to_string().dimmed(),
            event.render()
        ),
        None => println!("  {}", "No upcoming events".dimmed()),
    }

    Ok(())
}
