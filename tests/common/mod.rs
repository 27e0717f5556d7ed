#![allow(dead_code)]

use std::error::Error;
use std::path::PathBuf;

pub use pertdag_test_utils::builders::{GraphBuilder, TaskRecordBuilder};
pub use pertdag_test_utils::init_tracing;

pub type TestResult = Result<(), Box<dyn Error>>;

/// Path of a file under `demos/`.
pub fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("demos")
        .join(name)
}
