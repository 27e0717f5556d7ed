// src/dag/verify.rs

//! Check that an ordering respects every prerequisite edge.

use std::fmt;

use tracing::debug;

use crate::dag::graph::TaskGraph;
use crate::dag::task::TaskId;

/// Result of [`verify_order`].
///
/// `ok` alone does not say the sort was complete: a run over a cyclic graph
/// can produce a short but consistent order. Compare `produced` with
/// `expected`, or use [`Verification::is_full_success`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verification {
    pub ok: bool,
    pub produced: usize,
    pub expected: usize,
}

impl Verification {
    pub fn is_complete(&self) -> bool {
        self.produced == self.expected
    }

    /// Consistent and covering every task.
    pub fn is_full_success(&self) -> bool {
        self.ok && self.is_complete()
    }
}

impl fmt::Display for Verification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.ok { "Successfully" } else { "Wrongly" };
        write!(
            f,
            "{verdict} sorted {} out of {} tasks.",
            self.produced, self.expected
        )
    }
}

/// Verify that every task in `order` comes strictly after all of its
/// prerequisites.
///
/// A prerequisite missing from `order` fails the check, as does an id that
/// is not part of `graph`. When a task appears more than once, its first
/// position counts.
pub fn verify_order(graph: &TaskGraph, order: &[TaskId]) -> Verification {
    let mut position: Vec<Option<usize>> = vec![None; graph.len()];
    for (pos, id) in order.iter().enumerate() {
        match position.get_mut(id.0) {
            Some(slot) if slot.is_none() => *slot = Some(pos),
            Some(_) => {}
            None => {
                debug!(task = %id, "order names a task outside the graph");
                return Verification {
                    ok: false,
                    produced: order.len(),
                    expected: graph.len(),
                };
            }
        }
    }

    let ok = order.iter().all(|&id| {
        let Some(mine) = position[id.0] else {
            return false;
        };
        graph.prerequisites_of(id).iter().all(|pre| {
            let satisfied = matches!(position[pre.0], Some(theirs) if theirs < mine);
            if !satisfied {
                debug!(task = %id, prerequisite = %pre, "prerequisite not placed before task");
            }
            satisfied
        })
    });

    Verification {
        ok,
        produced: order.len(),
        expected: graph.len(),
    }
}
