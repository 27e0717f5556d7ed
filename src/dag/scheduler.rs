// src/dag/scheduler.rs

use std::collections::VecDeque;

use tracing::{debug, info, warn};

use crate::dag::graph::TaskGraph;
use crate::dag::run_state::{RunState, Timing};
use crate::dag::schedule::{Schedule, SortOutcome};
use crate::dag::task::{TaskId, TaskRecord};
use crate::dag::verify::{Verification, verify_order};
use crate::errors::Result;

/// Scheduler holds the immutable task graph and runs passes over it.
///
/// Every pass builds its own [`RunState`], so:
/// - nothing from a previous run leaks into the next one
/// - passes only need `&self` and may run side by side on a shared graph
#[derive(Debug, Clone)]
pub struct Scheduler {
    graph: TaskGraph,
}

impl Scheduler {
    pub fn new(graph: TaskGraph) -> Self {
        Self { graph }
    }

    /// Resolve `records` and wrap the resulting graph.
    pub fn from_records(records: Vec<TaskRecord>) -> Result<Self> {
        Ok(Self::new(TaskGraph::from_records(records)?))
    }

    pub fn graph(&self) -> &TaskGraph {
        &self.graph
    }

    /// Kahn's algorithm with a FIFO ready queue.
    ///
    /// Tasks that become ready together keep their relative input order.
    /// Tasks on a cycle (and everything behind them) never become ready and
    /// are left out; compare [`SortOutcome::produced`] with
    /// [`SortOutcome::expected`] to detect that.
    pub fn topological_order(&self) -> SortOutcome<'_> {
        let mut state = RunState::for_graph(&self.graph);
        let mut ready: VecDeque<TaskId> = self
            .graph
            .ids()
            .filter(|id| state.ready_count[id.0] == 0)
            .collect();

        debug!(roots = ready.len(), "topological sort: seeded ready queue");

        let mut order = Vec::with_capacity(self.graph.len());
        while let Some(id) = ready.pop_front() {
            order.push(id);
            ready.extend(state.release_followers(id));
        }

        let outcome = SortOutcome::new(&self.graph, order);
        self.log_run_summary("topological sort", outcome.produced());
        outcome
    }

    /// Levelled sort plus forward timing and critical-path marking.
    ///
    /// Each level holds the tasks that were ready when the previous level
    /// finished draining, so every prerequisite of a task has its timing
    /// fixed by the time the task is dequeued.
    pub fn build_schedule(&self) -> Schedule<'_> {
        let mut state = RunState::for_graph(&self.graph);
        let mut current: VecDeque<TaskId> = self
            .graph
            .ids()
            .filter(|id| state.ready_count[id.0] == 0)
            .collect();

        let mut levels: Vec<Vec<TaskId>> = Vec::new();
        let mut order = Vec::with_capacity(self.graph.len());

        while !current.is_empty() {
            let mut level = Vec::with_capacity(current.len());
            let mut next = VecDeque::new();

            while let Some(id) = current.pop_front() {
                let timing = self.forward_timing(&state, id);
                state.timing[id.0] = Some(timing);
                level.push(id);
                next.extend(state.release_followers(id));
            }

            debug!(
                level = levels.len(),
                tasks = level.len(),
                "schedule: level complete"
            );
            order.extend_from_slice(&level);
            levels.push(level);
            current = next;
        }

        let terminal = levels
            .last()
            .and_then(|last| latest_finisher(&state, last));
        if let Some(terminal) = terminal {
            self.mark_critical(&mut state, terminal);
        }

        let critical_count = state.critical.iter().filter(|&&c| c).count();
        info!(
            levels = levels.len(),
            critical = critical_count,
            terminal = ?terminal.map(TaskId::index),
            "schedule: critical path marked"
        );
        self.log_run_summary("schedule", order.len());

        Schedule::new(
            &self.graph,
            levels,
            order,
            state.timing,
            state.critical,
            terminal,
        )
    }

    /// Check an arbitrary ordering against this scheduler's graph.
    pub fn verify(&self, order: &[TaskId]) -> Verification {
        verify_order(&self.graph, order)
    }

    /// `start = max(end of prerequisites)` (0 without any), `end = start +
    /// duration`.
    fn forward_timing(&self, state: &RunState, id: TaskId) -> Timing {
        let task = self.graph.task(id);
        let start = task
            .prerequisites
            .iter()
            .filter_map(|pre| state.timing[pre.0])
            .map(|t| t.end)
            .max()
            .unwrap_or(0);

        Timing {
            start,
            end: start.saturating_add(task.duration),
        }
    }

    /// Walk back from `terminal` over zero-slack prerequisite edges.
    ///
    /// A task can be reached through several critical followers; the flag
    /// doubles as the visited set.
    fn mark_critical(&self, state: &mut RunState, terminal: TaskId) {
        let mut work = vec![terminal];

        while let Some(id) = work.pop() {
            if state.critical[id.0] {
                continue;
            }
            state.critical[id.0] = true;

            let Some(timing) = state.timing[id.0] else {
                continue;
            };
            for &pre in self.graph.prerequisites_of(id) {
                let zero_slack = state.timing[pre.0].is_some_and(|p| p.end == timing.start);
                if zero_slack && !state.critical[pre.0] {
                    work.push(pre);
                }
            }
        }
    }

    fn log_run_summary(&self, pass: &str, produced: usize) {
        let expected = self.graph.len();
        if produced < expected {
            warn!(
                pass,
                produced,
                expected,
                "run placed fewer tasks than loaded; dependency cycle or unreachable tasks"
            );
        } else {
            debug!(pass, produced, "run placed every task");
        }
    }
}

/// Task with the greatest end time in `level`; the first one wins ties.
fn latest_finisher(state: &RunState, level: &[TaskId]) -> Option<TaskId> {
    let mut best: Option<(TaskId, u64)> = None;
    for &id in level {
        let end = state.timing[id.0].map_or(0, |t| t.end);
        match best {
            Some((_, best_end)) if end <= best_end => {}
            _ => best = Some((id, end)),
        }
    }
    best.map(|(id, _)| id)
}
