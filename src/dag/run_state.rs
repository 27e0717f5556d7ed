// src/dag/run_state.rs

//! Per-run scratch state for the ordering and scheduling passes.

use crate::dag::graph::TaskGraph;
use crate::dag::task::TaskId;

/// Earliest start/end of a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timing {
    pub start: u64,
    pub end: u64,
}

/// Scratch state owned by exactly one run.
///
/// Follower edges and ready counts are pass-scoped, so they are rebuilt
/// from the graph's prerequisite lists every time a run starts instead of
/// being stored on the tasks.
#[derive(Debug, Clone, Default)]
pub(crate) struct RunState {
    pub followers: Vec<Vec<TaskId>>,
    pub ready_count: Vec<usize>,
    pub timing: Vec<Option<Timing>>,
    pub critical: Vec<bool>,
}

impl RunState {
    /// Fresh state for a run over `graph`.
    pub fn for_graph(graph: &TaskGraph) -> Self {
        let mut state = Self::default();
        state.reset_for(graph);
        state
    }

    /// Rebuild followers, set every ready count to the number of
    /// prerequisites, and clear timings and critical flags.
    ///
    /// Idempotent: calling it twice leaves the same state as calling it once.
    pub fn reset_for(&mut self, graph: &TaskGraph) {
        self.followers = graph.followers();
        self.ready_count = graph.tasks().map(|t| t.prerequisites.len()).collect();
        self.timing = vec![None; graph.len()];
        self.critical = vec![false; graph.len()];
    }

    /// Decrement the ready count of every follower of `id`; return the
    /// followers that just became ready, in follower order.
    pub fn release_followers(&mut self, id: TaskId) -> Vec<TaskId> {
        let mut ready = Vec::new();
        for &follower in &self.followers[id.0] {
            // One decrement per edge; counts were seeded with the edge count.
            let count = &mut self.ready_count[follower.0];
            *count -= 1;
            if *count == 0 {
                ready.push(follower);
            }
        }
        ready
    }
}
