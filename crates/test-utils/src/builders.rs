use pertdag::dag::{Scheduler, TaskGraph, TaskId, TaskRecord};

/// Builder for a task collection to simplify test setup.
///
/// Tasks get consecutive indices in the order they are added, and the
/// returned index can be used in later `after` lists.
pub struct GraphBuilder {
    records: Vec<TaskRecord>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Add a task and return its id.
    pub fn task(&mut self, name: &str, duration: u64, after: &[TaskId]) -> TaskId {
        let index = self.records.len();
        self.records.push(
            TaskRecordBuilder::new(index, name)
                .duration(duration)
                .after_all(after.iter().map(|id| id.index()))
                .build(),
        );
        TaskId(index)
    }

    pub fn build_graph(self) -> TaskGraph {
        TaskGraph::from_records(self.records).expect("Failed to build valid graph from builder")
    }

    pub fn build(self) -> Scheduler {
        Scheduler::new(self.build_graph())
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `TaskRecord`.
pub struct TaskRecordBuilder {
    record: TaskRecord,
}

impl TaskRecordBuilder {
    pub fn new(index: usize, name: &str) -> Self {
        Self {
            record: TaskRecord {
                index,
                duration: 1,
                name: name.to_string(),
                prerequisites: vec![],
            },
        }
    }

    pub fn duration(mut self, duration: u64) -> Self {
        self.record.duration = duration;
        self
    }

    pub fn after(mut self, index: usize) -> Self {
        self.record.prerequisites.push(index);
        self
    }

    pub fn after_all(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.record.prerequisites.extend(indices);
        self
    }

    pub fn build(self) -> TaskRecord {
        self.record
    }
}

/// Records for `n` tasks where task `i` may only depend on tasks `0..i`.
///
/// `raw_deps[i]` holds arbitrary numbers that are folded into range, which is
/// how the property tests generate acyclic graphs.
pub fn acyclic_records(raw_deps: &[Vec<usize>]) -> Vec<TaskRecord> {
    raw_deps
        .iter()
        .enumerate()
        .map(|(i, potential)| {
            let mut deps: Vec<usize> = if i == 0 {
                Vec::new()
            } else {
                potential.iter().map(|d| d % i).collect()
            };
            deps.sort_unstable();
            deps.dedup();
            TaskRecordBuilder::new(i, &format!("task_{i}"))
                .duration((i as u64 % 4) + 1)
                .after_all(deps)
                .build()
        })
        .collect()
}
