//! Global dayplan configuration.

use std::path::{Path, PathBuf};

use chrono::Duration;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, PlanResult};
use crate::planner::DEFAULT_REMINDER_LEAD_MINUTES;

static DEFAULT_TICK_SECONDS: u64 = 60;

fn default_data_file() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("dayplan").join("events.json"))
        .unwrap_or_else(|| PathBuf::from("~/.dayplan/events.json"))
}

fn default_reminder_lead_minutes() -> i64 {
    DEFAULT_REMINDER_LEAD_MINUTES
}

fn default_tick_seconds() -> u64 {
    DEFAULT_TICK_SECONDS
}

/// Configuration at ~/.config/dayplan/config.toml
///
/// Every key can be overridden from the environment with a `DAYPLAN_` prefix,
/// e.g. `DAYPLAN_DATA_FILE=/tmp/events.json`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlanConfig {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// How far ahead of an event's start a reminder fires.
    #[serde(default = "default_reminder_lead_minutes")]
    pub reminder_lead_minutes: i64,

    /// Seconds between watch ticks.
    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: u64,
}

impl Default for PlanConfig {
    fn default() -> Self {
        PlanConfig {
            data_file: default_data_file(),
            reminder_lead_minutes: DEFAULT_REMINDER_LEAD_MINUTES,
            tick_seconds: DEFAULT_TICK_SECONDS,
        }
    }
}

impl PlanConfig {
    pub fn config_path() -> PlanResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| PlanError::Config("Could not determine config directory".into()))?
            .join("dayplan");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented template on first run.
    pub fn load() -> PlanResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (missing file is fine) layered under `DAYPLAN_*` variables.
    pub fn load_from(path: &Path) -> PlanResult<Self> {
        let config: PlanConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("DAYPLAN").try_parsing(true))
            .build()
            .map_err(|e| PlanError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| PlanError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> PlanResult<()> {
        if self.reminder_lead_minutes <= 0
            || Duration::try_minutes(self.reminder_lead_minutes).is_none()
        {
            return Err(PlanError::Config(format!(
                "reminder_lead_minutes must be a positive number of minutes, got {}",
                self.reminder_lead_minutes
            )));
        }
        if self.tick_seconds == 0 {
            return Err(PlanError::Config("tick_seconds must be positive".into()));
        }
        Ok(())
    }

    /// The data file with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_file.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    pub fn reminder_lead(&self) -> Duration {
        Duration::minutes(self.reminder_lead_minutes)
    }

    pub fn tick_period(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.tick_seconds)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> PlanResult<()> {
        let contents = format!(
            "\
# dayplan configuration

# Where your events are saved:
# data_file = \"{}\"

# Minutes before an event starts to remind you:
# reminder_lead_minutes = {}

# Seconds between checks while `dayplan watch` runs:
# tick_seconds = {}
",
            default_data_file().display(),
            DEFAULT_REMINDER_LEAD_MINUTES,
            DEFAULT_TICK_SECONDS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PlanError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| PlanError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
