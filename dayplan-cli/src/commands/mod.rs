pub mod add;
pub mod conflicts;
pub mod edit;
pub mod lifecycle;
pub mod list;
pub mod month;
pub mod stats;
pub mod upcoming;
pub mod watch;

use anyhow::Result;

use crate::CliPlanner;

/// Resolve a full event id from an exact id or a unique prefix.
pub fn resolve_id(planner: &CliPlanner, input: &str) -> Result<String> {
    if planner.schedule().get(input).is_some() {
        return Ok(input.to_string());
    }

    let matches: Vec<&str> = planner
        .events()
        .iter()
        .map(|e| e.id.as_str())
        .filter(|id| id.starts_with(input))
        .collect();

    match matches.as_slice() {
        [id] => Ok(id.to_string()),
        [] => anyhow::bail!("No event with id '{}'", input),
        _ => anyhow::bail!(
            "Id '{}' is ambiguous, it matches {} events",
            input,
            matches.len()
        ),
    }
}
