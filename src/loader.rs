// src/loader.rs

//! Reader for `.po` ("partially ordered") task lists.
//!
//! One task per line, in either of two shapes:
//!
//! ```text
//! 0,Design,""
//! 1,Build,"0"
//! 2,4,Test,"0, 1"
//! ```
//!
//! The three-field form is `index,name,"prerequisites"`; the four-field form
//! adds a duration after the index. Tasks without a duration get
//! `[loader].default_duration`.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::config::LoaderSection;
use crate::dag::{Scheduler, TaskGraph, TaskRecord};
use crate::errors::{PertError, Result};

/// Splits a line into everything before the quoted prerequisite list and the
/// list itself.
static LINE_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?P<head>.*?)\s*,\s*"(?P<list>[^"]*)"$"#)
        .expect("line shape regex is valid")
});

/// `.po` parser configured from the `[loader]` section.
#[derive(Debug, Clone)]
pub struct PoLoader {
    default_duration: u64,
    /// `None` when the configured prefix is blank: no line is a comment.
    comment_prefix: Option<String>,
}

impl PoLoader {
    pub fn new(cfg: &LoaderSection) -> Self {
        Self {
            default_duration: cfg.default_duration,
            comment_prefix: Some(cfg.comment_prefix.trim())
                .filter(|prefix| !prefix.is_empty())
                .map(str::to_string),
        }
    }

    /// Parse every task line of `input`.
    ///
    /// Blank and comment lines are skipped silently. Lines that do not end in
    /// a quoted prerequisite list are skipped with a warning. Lines with the
    /// right shape but a bad number fail the whole parse.
    pub fn parse_str(&self, input: &str) -> Result<Vec<TaskRecord>> {
        let mut records = Vec::new();

        for (idx, raw) in input.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();

            if line.is_empty() || self.is_comment(line) {
                continue;
            }

            match self.parse_line(line, line_no)? {
                Some(record) => records.push(record),
                None => {
                    warn!(line = line_no, content = %line, "skipping line that is not a task");
                }
            }
        }

        debug!(tasks = records.len(), "parsed .po input");
        Ok(records)
    }

    /// Read and parse a `.po` file.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Vec<TaskRecord>> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        debug!(path = %path.display(), "loading .po file");
        self.parse_str(&contents)
    }

    /// Read a `.po` file and resolve it into a graph.
    pub fn load_graph(&self, path: impl AsRef<Path>) -> Result<TaskGraph> {
        TaskGraph::from_records(self.load_file(path)?)
    }

    /// Read a `.po` file and wrap the resolved graph in a [`Scheduler`].
    pub fn load_scheduler(&self, path: impl AsRef<Path>) -> Result<Scheduler> {
        Ok(Scheduler::new(self.load_graph(path)?))
    }

    fn is_comment(&self, line: &str) -> bool {
        self.comment_prefix
            .as_deref()
            .is_some_and(|prefix| line.starts_with(prefix))
    }

    fn parse_line(&self, line: &str, line_no: usize) -> Result<Option<TaskRecord>> {
        let Some(caps) = LINE_SHAPE.captures(line) else {
            return Ok(None);
        };

        let Some((index, rest)) = caps["head"].split_once(',') else {
            return Err(PertError::Parse {
                line: line_no,
                message: "missing task name".to_string(),
            });
        };
        let index: usize = parse_number(index.trim(), "index", line_no)?;

        // `duration,name` when the first remaining field is numeric and
        // something follows it; otherwise all of it is the name.
        let (duration, name) = match rest.split_once(',') {
            Some((first, name)) => match first.trim().parse::<u64>() {
                Ok(duration) => (duration, name.trim()),
                Err(_) => (self.default_duration, rest.trim()),
            },
            None => (self.default_duration, rest.trim()),
        };

        if name.is_empty() {
            return Err(PertError::Parse {
                line: line_no,
                message: "empty task name".to_string(),
            });
        }

        let prerequisites = caps["list"]
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| parse_number(s, "prerequisite", line_no))
            .collect::<Result<Vec<usize>>>()?;

        Ok(Some(TaskRecord {
            index,
            duration,
            name: name.to_string(),
            prerequisites,
        }))
    }
}

impl Default for PoLoader {
    fn default() -> Self {
        Self::new(&LoaderSection::default())
    }
}

/// Parse `.po` text with the given loader settings.
pub fn parse_po_str(input: &str, cfg: &LoaderSection) -> Result<Vec<TaskRecord>> {
    PoLoader::new(cfg).parse_str(input)
}

/// Read and parse a `.po` file with the given loader settings.
pub fn load_po_file(path: impl AsRef<Path>, cfg: &LoaderSection) -> Result<Vec<TaskRecord>> {
    PoLoader::new(cfg).load_file(path)
}

fn parse_number<T: std::str::FromStr>(field: &str, what: &str, line_no: usize) -> Result<T> {
    field.parse::<T>().map_err(|_| PertError::Parse {
        line: line_no,
        message: format!("invalid {what} {field:?}"),
    })
}
