// src/dag/mod.rs

//! Task graph and scheduling engine.
//!
//! - [`task`] holds raw records and resolved nodes.
//! - [`graph`] is the arena that resolves prerequisite indices once.
//! - [`run_state`] is the per-run scratch (followers, ready counts, timings).
//! - [`scheduler`] runs the topological sort and the critical-path schedule.
//! - [`schedule`] defines the result types of those runs.
//! - [`verify`] checks an order against the prerequisite edges.

pub mod graph;
pub mod run_state;
pub mod schedule;
pub mod scheduler;
pub mod task;
pub mod verify;

pub use graph::TaskGraph;
pub use run_state::Timing;
pub use schedule::{Schedule, SortOutcome};
pub use scheduler::Scheduler;
pub use task::{Task, TaskId, TaskRecord};
pub use verify::{Verification, verify_order};
