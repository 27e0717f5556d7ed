// src/config/model.rs

use serde::Deserialize;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [loader]
/// default_duration = 1
/// comment_prefix = "#"
///
/// [report]
/// strict = false
/// show_levels = true
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    /// `.po` parsing behaviour from `[loader]`.
    #[serde(default)]
    pub loader: LoaderSection,

    /// Output behaviour from `[report]`.
    #[serde(default)]
    pub report: ReportSection,
}

/// Validated configuration.
///
/// Only obtainable through `TryFrom<RawConfigFile>` (see `validate.rs`) or
/// [`ConfigFile::default`].
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub loader: LoaderSection,
    pub report: ReportSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(loader: LoaderSection, report: ReportSection) -> Self {
        Self { loader, report }
    }
}

/// `[loader]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct LoaderSection {
    /// Duration given to tasks written in the three-field form
    /// `index,name,"p1,p2"`, which carries no duration of its own.
    #[serde(default = "default_duration")]
    pub default_duration: u64,

    /// Lines starting with this prefix (after trimming) are ignored.
    #[serde(default = "default_comment_prefix")]
    pub comment_prefix: String,
}

fn default_duration() -> u64 {
    1
}

fn default_comment_prefix() -> String {
    "#".to_string()
}

impl Default for LoaderSection {
    fn default() -> Self {
        Self {
            default_duration: default_duration(),
            comment_prefix: default_comment_prefix(),
        }
    }
}

/// `[report]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportSection {
    /// Treat an order that misses tasks as an error instead of a warning.
    #[serde(default)]
    pub strict: bool,

    /// Print the level grouping in `schedule` mode.
    #[serde(default = "default_show_levels")]
    pub show_levels: bool,
}

fn default_show_levels() -> bool {
    true
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            strict: false,
            show_levels: default_show_levels(),
        }
    }
}
