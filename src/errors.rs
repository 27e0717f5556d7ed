// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PertError {
    /// A prerequisite index does not name any task in the collection.
    #[error(
        "task {task} references prerequisite {prerequisite}, but only {len} tasks are loaded"
    )]
    OutOfRange {
        task: usize,
        prerequisite: usize,
        len: usize,
    },

    /// A run placed fewer tasks than were loaded.
    ///
    /// The engine never raises this on its own; callers opt in through
    /// `SortOutcome::into_complete` or `Schedule::ensure_complete`.
    #[error("incomplete order: placed {produced} of {expected} tasks (cycle through tasks {cycle:?})")]
    IncompleteOrder {
        produced: usize,
        expected: usize,
        cycle: Vec<usize>,
    },

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, PertError>;
