// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [simulation]
/// workers = 5
///
/// [duration]
/// base = 60
/// letter_offset = true
///
/// [duration.overrides]
/// Q = 10
/// ```
///
/// Every section is optional.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub simulation: SimulationSection,

    #[serde(default)]
    pub duration: DurationSection,
}

/// `[simulation]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationSection {
    /// Number of concurrent worker slots.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_workers() -> usize {
    1
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            workers: default_workers(),
        }
    }
}

/// `[duration]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct DurationSection {
    /// Added to every step's duration.
    #[serde(default)]
    pub base: u64,

    /// If true, letters add their alphabet position (A = 1 … Z = 26).
    #[serde(default = "default_letter_offset")]
    pub letter_offset: bool,

    /// Fixed durations for individual steps, keyed by step id.
    #[serde(default)]
    pub overrides: BTreeMap<String, u64>,
}

fn default_letter_offset() -> bool {
    true
}

impl Default for DurationSection {
    fn default() -> Self {
        Self {
            base: 0,
            letter_offset: default_letter_offset(),
            overrides: BTreeMap::new(),
        }
    }
}

/// Validated configuration.
///
/// Only constructible through `TryFrom<RawConfigFile>` (see
/// `config::validate`) or [`ConfigFile::default`].
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub workers: usize,
    pub duration: DurationModel,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(workers: usize, duration: DurationModel) -> Self {
        Self { workers, duration }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(default_workers(), DurationModel::default())
    }
}

/// Per-step duration rule derived from `[duration]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationModel {
    pub base: u64,
    pub letter_offset: bool,
    pub overrides: BTreeMap<char, u64>,
}

impl Default for DurationModel {
    fn default() -> Self {
        Self {
            base: 0,
            letter_offset: default_letter_offset(),
            overrides: BTreeMap::new(),
        }
    }
}

impl DurationModel {
    /// Duration of `step`: its override if any, else `base` plus the letter
    /// offset. May be 0; the simulation rejects that when the step starts.
    pub fn duration_of(&self, step: &char) -> u64 {
        if let Some(&fixed) = self.overrides.get(step) {
            return fixed;
        }
        let offset = if self.letter_offset {
            letter_index(*step)
        } else {
            0
        };
        self.base.saturating_add(offset)
    }
}

/// 1-based alphabet position of an ASCII letter; digits and other ids count as 1.
fn letter_index(c: char) -> u64 {
    if c.is_ascii_alphabetic() {
        u64::from(c.to_ascii_uppercase() as u8 - b'A' + 1)
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_offsets_follow_the_alphabet() {
        let model = DurationModel {
            base: 60,
            ..DurationModel::default()
        };
        assert_eq!(model.duration_of(&'A'), 61);
        assert_eq!(model.duration_of(&'z'), 86);
        assert_eq!(model.duration_of(&'7'), 61);
    }

    #[test]
    fn overrides_win() {
        let mut model = DurationModel::default();
        model.overrides.insert('C', 9);
        assert_eq!(model.duration_of(&'C'), 9);
        assert_eq!(model.duration_of(&'D'), 4);
    }

    #[test]
    fn offset_can_be_disabled() {
        let model = DurationModel {
            base: 2,
            letter_offset: false,
            overrides: BTreeMap::new(),
        };
        assert_eq!(model.duration_of(&'Z'), 2);
    }

    #[test]
    fn digit_steps_get_a_positive_default_duration() {
        let model = DurationModel::default();
        assert_eq!(model.duration_of(&'0'), 1);
        assert_eq!(model.duration_of(&'9'), 1);
    }
}
