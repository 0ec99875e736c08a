//! Persistence for the event collection.
//!
//! The whole collection is the unit of persistence: it is loaded once and
//! rewritten in full after every change.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{PlanError, PlanResult};
use crate::event::Event;

pub trait EventStore {
    /// Load the saved collection. Absent or unreadable state yields an empty list.
    fn load(&self) -> Vec<Event>;

    /// Replace the saved collection with `events`.
    fn save(&self, events: &[Event]) -> PlanResult<()>;
}

/// Stores events as a pretty-printed JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> PlanResult<Vec<Event>> {
        let content = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| PlanError::Serialization(e.to_string()))
    }
}

impl EventStore for JsonFileStore {
    fn load(&self) -> Vec<Event> {
        if !self.path.exists() {
            return Vec::new();
        }

        match self.read() {
            Ok(events) => events,
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "could not read saved events, starting empty"
                );
                Vec::new()
            }
        }
    }

    fn save(&self, events: &[Event]) -> PlanResult<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let content = serde_json::to_string_pretty(events)
            .map_err(|e| PlanError::Serialization(e.to_string()))?;

        // Write to a sibling temp file, then rename over the old snapshot
        let mut temp = self.path.clone().into_os_string();
        temp.push(".tmp");
        let temp = PathBuf::from(temp);

        std::fs::write(&temp, content)?;
        if let Err(e) = std::fs::rename(&temp, &self.path) {
            let _ = std::fs::remove_file(&temp);
            return Err(e.into());
        }
        Ok(())
    }
}

/// Keeps the snapshot in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    events: Mutex<Vec<Event>>,
}

impl MemoryStore {
    pub fn new(events: Vec<Event>) -> Self {
        MemoryStore {
            events: Mutex::new(events),
        }
    }

    pub fn snapshot(&self) -> Vec<Event> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl EventStore for MemoryStore {
    fn load(&self) -> Vec<Event> {
        self.snapshot()
    }

    fn save(&self, events: &[Event]) -> PlanResult<()> {
        let mut saved = self
            .events
            .lock()
            .map_err(|_| PlanError::Serialization("memory store lock poisoned".into()))?;
        *saved = events.to_vec();
        Ok(())
    }
}
