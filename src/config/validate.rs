// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{PertError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = PertError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.loader, raw.report))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_comment_prefix(cfg)?;
    Ok(())
}

fn validate_comment_prefix(cfg: &RawConfigFile) -> Result<()> {
    let prefix = cfg.loader.comment_prefix.trim();

    if prefix.is_empty() {
        return Err(PertError::ConfigError(
            "[loader].comment_prefix must not be empty".to_string(),
        ));
    }

    // A task line always starts with its index, so a numeric prefix would
    // swallow real tasks.
    if prefix.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(PertError::ConfigError(format!(
            "[loader].comment_prefix must not start with a digit (got {prefix:?})"
        )));
    }

    Ok(())
}
