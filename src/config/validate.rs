// src/config/validate.rs

use std::collections::BTreeMap;

use crate::config::model::{ConfigFile, DurationModel, RawConfigFile};
use crate::errors::{Result, StepdagError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = StepdagError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_simulation(&raw)?;
        let overrides = validate_overrides(&raw)?;
        let duration = DurationModel {
            base: raw.duration.base,
            letter_offset: raw.duration.letter_offset,
            overrides,
        };
        Ok(ConfigFile::new_unchecked(raw.simulation.workers, duration))
    }
}

fn validate_simulation(cfg: &RawConfigFile) -> Result<()> {
    if cfg.simulation.workers == 0 {
        return Err(StepdagError::invalid_config(
            "[simulation].workers must be >= 1 (got 0)",
        ));
    }
    Ok(())
}

fn validate_overrides(cfg: &RawConfigFile) -> Result<BTreeMap<char, u64>> {
    let mut overrides = BTreeMap::new();
    for (key, &value) in cfg.duration.overrides.iter() {
        let mut chars = key.chars();
        let step = match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphanumeric() => c,
            _ => {
                return Err(StepdagError::invalid_config(format!(
                    "[duration.overrides] key '{key}' is not a single ASCII letter or digit"
                )));
            }
        };
        if value == 0 {
            return Err(StepdagError::invalid_config(format!(
                "[duration.overrides].{key} must be >= 1 (got 0)"
            )));
        }
        overrides.insert(step, value);
    }
    Ok(overrides)
}

/// Apply command line overrides on top of a validated config.
pub fn apply_overrides(
    mut cfg: ConfigFile,
    workers: Option<usize>,
    base_duration: Option<u64>,
) -> Result<ConfigFile> {
    if let Some(workers) = workers {
        if workers == 0 {
            return Err(StepdagError::invalid_config("--workers must be >= 1 (got 0)"));
        }
        cfg.workers = workers;
    }
    if let Some(base) = base_duration {
        cfg.duration.base = base;
    }
    Ok(cfg)
}
