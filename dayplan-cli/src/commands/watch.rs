use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use dayplan_core::clock::{Clock, SystemClock};
use dayplan_core::config::PlanConfig;
use dayplan_core::ticker::Ticker;
use owo_colors::OwoColorize;

use crate::CliPlanner;

/// Tick the planner on a timer until Ctrl-C.
pub async fn run(planner: CliPlanner, config: &PlanConfig) -> Result<()> {
    let planner = Arc::new(Mutex::new(planner));

    let tick = {
        let planner = Arc::clone(&planner);
        move || match planner.lock() {
            Ok(mut planner) => planner.tick(SystemClock.now()),
            Err(_) => tracing::error!("planner lock poisoned, skipping tick"),
        }
    };

    // Check once right away, then on every period
    tick();
    let handle = Ticker::spawn(config.tick_period(), tick);

    println!(
        "{}",
        format!(
            "Watching for upcoming events every {}s. Press Ctrl-C to stop.",
            config.tick_seconds
        )
        .dimmed()
    );

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;

    handle.stop().await;
    println!("{}", "Stopped".dimmed());
    Ok(())
}
