use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use owo_colors::OwoColorize;

use crate::CliPlanner;

const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Width of one day cell, e.g. " 12·3 "
const CELL_WIDTH: usize = 6;

pub fn run(planner: &CliPlanner, first: NaiveDate, today: NaiveDate) -> Result<()> {
    println!("{}", first.format("%B %Y").to_string().bold());

    let header: Vec<String> = WEEKDAY_LABELS
        .iter()
        .map(|d| format!("{:^width$}", d, width = CELL_WIDTH))
        .collect();
    println!("{}", header.join("").dimmed());

    let mut line = " ".repeat(CELL_WIDTH * first.weekday().num_days_from_sunday() as usize);

    for day in first.iter_days().take_while(|d| d.month() == first.month()) {
        let count = planner.events_on(day).len();
        let cell = if count > 0 {
            format!("{:>3}·{:<2}", day.day(), count)
        } else {
            format!("{:>3}   ", day.day())
        };

        let cell = if day == today {
            cell.reversed().to_string()
        } else if count > 0 {
            cell.cyan().to_string()
        } else {
            cell
        };
        line.push_str(&cell);

        if day.weekday().num_days_from_sunday() == 6 {
            println!("{}", line);
            line.clear();
        }
    }

    if !line.is_empty() {
        println!("{}", line);
    }

    Ok(())
}
