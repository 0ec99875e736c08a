//! Core of the dayplan ecosystem.
//!
//! This crate holds the event scheduling engine and the collaborators around it:
//! - `schedule` owns the event collection (add/update/delete, cleanup, reschedule)
//! - `conflict` and `query` are the pure conflict and date-range logic
//! - `planner` wires the engine to a store, a notifier and the periodic tick
//!
//! Nothing here reads the system clock implicitly: every time-relative call
//! takes `now` as an argument.

pub mod clock;
pub mod config;
pub mod conflict;
pub mod error;
pub mod event;
pub mod form;
pub mod notify;
pub mod planner;
pub mod query;
pub mod schedule;
pub mod stats;
pub mod store;
pub mod ticker;

pub use conflict::{EventConflict, OverlapRule};
pub use error::{PlanError, PlanResult};
pub use event::{Event, EventDraft, EventPatch};
pub use planner::Planner;
pub use schedule::Schedule;
