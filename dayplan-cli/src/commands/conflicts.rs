use anyhow::Result;
use owo_colors::OwoColorize;

use crate::CliPlanner;
use crate::render::{Render, pluralize};

pub fn run(planner: &CliPlanner) -> Result<()> {
    let conflicts = planner.all_conflicts();

    // No conflicts, nothing to show
    if conflicts.is_empty() {
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "Schedule conflicts detected ({} {})",
            conflicts.len(),
            pluralize("pair", conflicts.len())
        )
        .red()
        .bold()
    );

    for conflict in &conflicts {
        println!("  {} {}", "!".red(), conflict.render());
    }

    Ok(())
}
