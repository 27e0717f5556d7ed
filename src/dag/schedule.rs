// src/dag/schedule.rs

//! Result types handed back by a [`Scheduler`](crate::dag::Scheduler) run.
//!
//! Both types borrow the graph they were computed from, so a renderer can
//! resolve names, durations and prerequisite links without going back to the
//! scheduler.

use crate::dag::graph::TaskGraph;
use crate::dag::run_state::Timing;
use crate::dag::task::{Task, TaskId};
use crate::dag::verify::{Verification, verify_order};
use crate::errors::{PertError, Result};

/// Output of a plain topological sort.
#[derive(Debug, Clone)]
pub struct SortOutcome<'g> {
    graph: &'g TaskGraph,
    order: Vec<TaskId>,
}

impl<'g> SortOutcome<'g> {
    pub(crate) fn new(graph: &'g TaskGraph, order: Vec<TaskId>) -> Self {
        Self { graph, order }
    }

    pub fn graph(&self) -> &'g TaskGraph {
        self.graph
    }

    /// Task ids in sorted order.
    pub fn order(&self) -> &[TaskId] {
        &self.order
    }

    /// Tasks in sorted order.
    pub fn tasks(&self) -> impl Iterator<Item = &'g Task> + '_ {
        let graph = self.graph;
        self.order.iter().map(move |&id| graph.task(id))
    }

    /// Number of tasks placed by the run.
    pub fn produced(&self) -> usize {
        self.order.len()
    }

    /// Number of tasks in the graph.
    pub fn expected(&self) -> usize {
        self.graph.len()
    }

    /// `true` if every task was placed.
    pub fn is_complete(&self) -> bool {
        self.produced() == self.expected()
    }

    /// Tasks the run could not place (cycle members and everything
    /// downstream of them), in input order.
    pub fn missing(&self) -> Vec<TaskId> {
        missing_ids(self.graph, &self.order)
    }

    pub fn verify(&self) -> Verification {
        verify_order(self.graph, &self.order)
    }

    /// Turn a short result into [`PertError::IncompleteOrder`].
    pub fn into_complete(self) -> Result<Vec<TaskId>> {
        if self.is_complete() {
            Ok(self.order)
        } else {
            Err(incomplete(self.graph, self.order.len()))
        }
    }
}

/// Output of a levelled critical-path run.
#[derive(Debug, Clone)]
pub struct Schedule<'g> {
    graph: &'g TaskGraph,
    levels: Vec<Vec<TaskId>>,
    order: Vec<TaskId>,
    timing: Vec<Option<Timing>>,
    critical: Vec<bool>,
    terminal: Option<TaskId>,
}

impl<'g> Schedule<'g> {
    pub(crate) fn new(
        graph: &'g TaskGraph,
        levels: Vec<Vec<TaskId>>,
        order: Vec<TaskId>,
        timing: Vec<Option<Timing>>,
        critical: Vec<bool>,
        terminal: Option<TaskId>,
    ) -> Self {
        Self {
            graph,
            levels,
            order,
            timing,
            critical,
            terminal,
        }
    }

    pub fn graph(&self) -> &'g TaskGraph {
        self.graph
    }

    /// Columns of tasks that became ready in the same wave.
    pub fn levels(&self) -> &[Vec<TaskId>] {
        &self.levels
    }

    /// Level-by-level concatenation of [`levels`](Self::levels).
    pub fn order(&self) -> &[TaskId] {
        &self.order
    }

    /// `None` for tasks the run never reached.
    pub fn timing(&self, id: TaskId) -> Option<Timing> {
        self.timing.get(id.0).copied().flatten()
    }

    pub fn start_time(&self, id: TaskId) -> Option<u64> {
        self.timing(id).map(|t| t.start)
    }

    pub fn end_time(&self, id: TaskId) -> Option<u64> {
        self.timing(id).map(|t| t.end)
    }

    pub fn is_critical(&self, id: TaskId) -> bool {
        self.critical.get(id.0).copied().unwrap_or(false)
    }

    /// Critical tasks in input order.
    pub fn critical_tasks(&self) -> Vec<TaskId> {
        self.graph.ids().filter(|&id| self.is_critical(id)).collect()
    }

    /// The task the critical path ends at: latest finisher of the final
    /// level, first found on ties.
    pub fn terminal(&self) -> Option<TaskId> {
        self.terminal
    }

    /// Latest end time over all scheduled tasks.
    pub fn makespan(&self) -> u64 {
        self.timing.iter().flatten().map(|t| t.end).max().unwrap_or(0)
    }

    /// `true` if `prerequisite` is a direct prerequisite of `task` and hands
    /// over with zero slack (`task` starts exactly when it ends).
    pub fn is_critical_dependent_on(&self, task: TaskId, prerequisite: TaskId) -> bool {
        if !self.graph.prerequisites_of(task).contains(&prerequisite) {
            return false;
        }
        match (self.timing(task), self.timing(prerequisite)) {
            (Some(t), Some(p)) => t.start == p.end,
            _ => false,
        }
    }

    pub fn produced(&self) -> usize {
        self.order.len()
    }

    pub fn expected(&self) -> usize {
        self.graph.len()
    }

    pub fn is_complete(&self) -> bool {
        self.produced() == self.expected()
    }

    pub fn missing(&self) -> Vec<TaskId> {
        missing_ids(self.graph, &self.order)
    }

    pub fn verify(&self) -> Verification {
        verify_order(self.graph, &self.order)
    }

    /// Error out with [`PertError::IncompleteOrder`] if the run stopped
    /// short.
    pub fn ensure_complete(&self) -> Result<()> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(incomplete(self.graph, self.order.len()))
        }
    }
}

fn missing_ids(graph: &TaskGraph, order: &[TaskId]) -> Vec<TaskId> {
    let mut placed = vec![false; graph.len()];
    for id in order {
        if let Some(slot) = placed.get_mut(id.0) {
            *slot = true;
        }
    }
    graph.ids().filter(|id| !placed[id.0]).collect()
}

fn incomplete(graph: &TaskGraph, produced: usize) -> PertError {
    PertError::IncompleteOrder {
        produced,
        expected: graph.len(),
        cycle: graph.cycle_members().into_iter().map(TaskId::index).collect(),
    }
}
