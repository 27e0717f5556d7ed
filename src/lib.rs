// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod loader;
pub mod logging;
pub mod report;

use std::io::Write;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::cli::{CliArgs, Mode};
use crate::config::{ConfigFile, load_or_default};
use crate::dag::{Scheduler, TaskId};
use crate::errors::PertError;
use crate::loader::PoLoader;

/// High-level entry point used by `main.rs`; prints to stdout.
pub fn run(args: CliArgs) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with_output(args, &mut out)
}

/// Same as [`run`], with the report written to `out`.
///
/// This wires together:
/// - config loading
/// - `.po` loading and graph resolution
/// - the requested scheduler pass
/// - the text report
pub fn run_with_output<W: Write>(args: CliArgs, out: &mut W) -> Result<()> {
    let cfg = load_or_default(args.config.as_deref())?;
    let strict = args.strict || cfg.report.strict;
    debug!(?cfg, strict, "configuration loaded");

    let scheduler = PoLoader::new(&cfg.loader)
        .load_scheduler(&args.file)
        .with_context(|| format!("loading {}", args.file.display()))?;
    info!(
        tasks = scheduler.graph().len(),
        file = %args.file.display(),
        "task graph loaded"
    );

    match args.mode {
        Mode::Sort => run_sort(&scheduler, strict, out),
        Mode::Schedule => run_schedule(&scheduler, &cfg, strict, out),
        Mode::Verify => run_verify(&scheduler, args.order.as_deref(), strict, out),
    }
}

fn run_sort<W: Write>(scheduler: &Scheduler, strict: bool, out: &mut W) -> Result<()> {
    let outcome = scheduler.topological_order();
    report::write_sort_report(out, &outcome)?;

    if strict {
        outcome.into_complete()?;
    }
    Ok(())
}

fn run_schedule<W: Write>(
    scheduler: &Scheduler,
    cfg: &ConfigFile,
    strict: bool,
    out: &mut W,
) -> Result<()> {
    let schedule = scheduler.build_schedule();
    report::write_schedule_report(out, &schedule, cfg.report.show_levels)?;

    if strict {
        schedule.ensure_complete()?;
    }
    Ok(())
}

fn run_verify<W: Write>(
    scheduler: &Scheduler,
    order: Option<&[usize]>,
    strict: bool,
    out: &mut W,
) -> Result<()> {
    let order: Vec<TaskId> = match order {
        Some(indices) => indices.iter().copied().map(TaskId).collect(),
        None => {
            warn!("no --order given; verifying a fresh topological sort");
            scheduler.topological_order().order().to_vec()
        }
    };

    let verification = scheduler.verify(&order);
    report::write_verification(out, scheduler.graph(), &order, &verification)?;

    if !verification.ok {
        anyhow::bail!("order violates prerequisites: {verification}");
    }
    if strict && !verification.is_complete() {
        return Err(PertError::IncompleteOrder {
            produced: verification.produced,
            expected: verification.expected,
            cycle: scheduler
                .graph()
                .cycle_members()
                .into_iter()
                .map(TaskId::index)
                .collect(),
        }
        .into());
    }
    Ok(())
}
