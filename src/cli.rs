// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `pertdag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pertdag",
    version,
    about = "Sort partially ordered tasks and compute their critical path.",
    long_about = None
)]
pub struct CliArgs {
    /// What to compute.
    #[arg(value_enum)]
    pub mode: Mode,

    /// Task list in `.po` format.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Path to the config file (TOML).
    ///
    /// Default: `pertdag.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Order to check in `verify` mode, as comma-separated task indices.
    ///
    /// Without it, `verify` checks the order produced by a fresh sort.
    #[arg(long, value_name = "INDICES", value_delimiter = ',')]
    pub order: Option<Vec<usize>>,

    /// Fail when the order misses tasks (overrides `[report].strict`).
    #[arg(long)]
    pub strict: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PERTDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Pass to run over the loaded tasks.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Topological order plus verification message.
    Sort,
    /// Levels, earliest start/end times and the critical path.
    Schedule,
    /// Check an order against the prerequisites.
    Verify,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
