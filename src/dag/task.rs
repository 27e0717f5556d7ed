// src/dag/task.rs

//! Raw task records (loader output) and resolved graph nodes.

use std::fmt;

/// Position of a task in the loaded collection.
///
/// This is also how prerequisite lists address other tasks, so a `TaskId` is
/// only meaningful together with the [`TaskGraph`](crate::dag::TaskGraph) it
/// came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub usize);

impl TaskId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A task as handed over by a loader, before prerequisite resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    /// Declared index; expected to equal the record's position.
    pub index: usize,
    /// Abstract time units; the engine imposes no real-world unit.
    pub duration: u64,
    pub name: String,
    /// Raw prerequisite indices into the same collection.
    pub prerequisites: Vec<usize>,
}

impl TaskRecord {
    pub fn new(
        index: usize,
        duration: u64,
        name: impl Into<String>,
        prerequisites: Vec<usize>,
    ) -> Self {
        Self {
            index,
            duration,
            name: name.into(),
            prerequisites,
        }
    }
}

/// A resolved node in the task graph.
///
/// Only persistent attributes live here. Follower edges, ready counts,
/// timings and critical flags are per-run state, see `RunState` in
/// `dag::run_state`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub duration: u64,
    /// Direct prerequisites, resolved once at load time.
    pub prerequisites: Vec<TaskId>,
}

impl Task {
    /// The stable integer identity (input position).
    pub fn index(&self) -> usize {
        self.id.0
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
