// src/report.rs

//! Plain-text output for the CLI.
//!
//! Everything here only reads engine results; writers are generic so tests
//! can capture the output in a `Vec<u8>`.

use std::io::{self, Write};

use crate::dag::{Schedule, SortOutcome, TaskGraph, TaskId, Verification};

/// Print the sorted order followed by the verification message.
pub fn write_sort_report<W: Write>(out: &mut W, outcome: &SortOutcome<'_>) -> io::Result<()> {
    writeln!(out, "sorted ({} of {}):", outcome.produced(), outcome.expected())?;
    for task in outcome.tasks() {
        writeln!(out, "  {:>4}  {}", task.index(), task.name)?;
    }
    write_missing(out, outcome.graph(), &outcome.missing())?;
    writeln!(out)?;
    writeln!(out, "{}", outcome.verify())
}

/// Print levels, per-task timings and the critical path.
///
/// Critical tasks are flagged with `*`. The critical path is printed one
/// level per group, separated by `|`.
pub fn write_schedule_report<W: Write>(
    out: &mut W,
    schedule: &Schedule<'_>,
    show_levels: bool,
) -> io::Result<()> {
    let graph = schedule.graph();

    if show_levels {
        writeln!(out, "levels ({}):", schedule.levels().len())?;
        for (n, level) in schedule.levels().iter().enumerate() {
            let names: Vec<&str> = level.iter().map(|&id| graph.task(id).name.as_str()).collect();
            writeln!(out, "  L{n}: {}", names.join(", "))?;
        }
        writeln!(out)?;
    }

    writeln!(out, "tasks:")?;
    for &id in schedule.order() {
        let task = graph.task(id);
        let marker = if schedule.is_critical(id) { '*' } else { ' ' };
        let timing = schedule.timing(id).unwrap_or_default();
        writeln!(
            out,
            "  {marker} {:>4}  {:<20} start {:>5}  end {:>5}  duration {:>4}",
            task.index(),
            task.name,
            timing.start,
            timing.end,
            task.duration,
        )?;
    }
    write_missing(out, graph, &schedule.missing())?;
    writeln!(out)?;

    // Tasks in one group are parallel zero-slack branches, not a chain.
    let path: Vec<String> = schedule
        .levels()
        .iter()
        .map(|level| {
            level
                .iter()
                .filter(|&&id| schedule.is_critical(id))
                .map(|&id| graph.task(id).name.as_str())
                .collect::<Vec<_>>()
        })
        .filter(|names| !names.is_empty())
        .map(|names| names.join(", "))
        .collect();
    writeln!(out, "critical path: {}", path.join(" | "))?;
    writeln!(out, "makespan: {}", schedule.makespan())
}

/// Print the outcome of checking a caller-supplied order.
pub fn write_verification<W: Write>(
    out: &mut W,
    graph: &TaskGraph,
    order: &[TaskId],
    verification: &Verification,
) -> io::Result<()> {
    let names: Vec<String> = order
        .iter()
        .map(|&id| match graph.get(id) {
            Some(task) => task.name.clone(),
            None => format!("?{}", id.index()),
        })
        .collect();
    writeln!(out, "order: {}", names.join(", "))?;
    writeln!(out, "{verification}")
}

fn write_missing<W: Write>(out: &mut W, graph: &TaskGraph, missing: &[TaskId]) -> io::Result<()> {
    if missing.is_empty() {
        return Ok(());
    }
    let names: Vec<&str> = missing.iter().map(|&id| graph.task(id).name.as_str()).collect();
    writeln!(out, "  not placed: {}", names.join(", "))
}
