// src/dag/graph.rs

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, warn};

use crate::dag::task::{Task, TaskId, TaskRecord};
use crate::errors::{PertError, Result};

/// Arena of resolved tasks addressed by [`TaskId`].
///
/// The graph only stores persistent attributes and prerequisite edges. It is
/// never mutated by a scheduling run, so one graph can back any number of
/// runs (including concurrent read-only ones).
#[derive(Debug, Clone, Default)]
pub struct TaskGraph {
    tasks: Vec<Task>,
}

impl TaskGraph {
    /// Resolve raw records into a graph.
    ///
    /// Every prerequisite index is resolved exactly once. An index with no
    /// matching record fails with [`PertError::OutOfRange`]. Acyclicity and
    /// "prerequisites come first" are assumed but not checked.
    pub fn from_records(records: Vec<TaskRecord>) -> Result<Self> {
        let len = records.len();
        let mut tasks = Vec::with_capacity(len);

        for (position, record) in records.into_iter().enumerate() {
            if record.index != position {
                warn!(
                    declared = record.index,
                    position,
                    name = %record.name,
                    "task index does not match its position; addressing by position"
                );
            }

            let prerequisites = record
                .prerequisites
                .iter()
                .map(|&pre| {
                    if pre < len {
                        Ok(TaskId(pre))
                    } else {
                        Err(PertError::OutOfRange {
                            task: position,
                            prerequisite: pre,
                            len,
                        })
                    }
                })
                .collect::<Result<Vec<_>>>()?;

            tasks.push(Task {
                id: TaskId(position),
                name: record.name,
                duration: record.duration,
                prerequisites,
            });
        }

        debug!(tasks = tasks.len(), "resolved task graph");
        Ok(Self { tasks })
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Look up a task by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not come from this graph.
    pub fn task(&self, id: TaskId) -> &Task {
        &self.tasks[id.0]
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(id.0)
    }

    /// All tasks in input order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.tasks.iter().map(|t| t.id)
    }

    pub fn prerequisites_of(&self, id: TaskId) -> &[TaskId] {
        self.tasks
            .get(id.0)
            .map(|t| t.prerequisites.as_slice())
            .unwrap_or(&[])
    }

    /// Tasks without prerequisites, in input order.
    pub fn roots(&self) -> Vec<TaskId> {
        self.tasks
            .iter()
            .filter(|t| t.prerequisites.is_empty())
            .map(|t| t.id)
            .collect()
    }

    /// Inverse edges: for every task, the tasks that list it as a
    /// prerequisite.
    ///
    /// Each follower list is in input order of the dependent tasks, which is
    /// what makes the FIFO tie-break of the sorter stable. A task listing the
    /// same prerequisite twice shows up twice.
    pub fn followers(&self) -> Vec<Vec<TaskId>> {
        let mut followers = vec![Vec::new(); self.tasks.len()];
        for task in &self.tasks {
            for pre in &task.prerequisites {
                followers[pre.0].push(task.id);
            }
        }
        followers
    }

    /// Tasks that sit on a dependency cycle, in input order.
    ///
    /// This is a diagnostic for incomplete runs; the sorter itself never
    /// calls it.
    pub fn cycle_members(&self) -> Vec<TaskId> {
        let mut graph: DiGraph<TaskId, ()> = DiGraph::with_capacity(self.len(), 0);
        let nodes: Vec<NodeIndex> = self.tasks.iter().map(|t| graph.add_node(t.id)).collect();

        // Edge direction: prerequisite -> dependent.
        for task in &self.tasks {
            for pre in &task.prerequisites {
                graph.add_edge(nodes[pre.0], nodes[task.id.0], ());
            }
        }

        let mut members: Vec<TaskId> = tarjan_scc(&graph)
            .into_iter()
            .filter(|scc| {
                scc.len() > 1 || scc.iter().any(|&n| graph.contains_edge(n, n))
            })
            .flatten()
            .map(|n| graph[n])
            .collect();

        members.sort();
        members
    }
}
