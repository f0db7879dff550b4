// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StepdagError {
    #[error("Malformed edge on line {line}: {reason} (in {text:?})")]
    MalformedEdge {
        line: usize,
        text: String,
        reason: String,
    },

    #[error("Cycle detected in task graph: locked tasks {locked:?}, cycle {cycle:?}")]
    CycleDetected {
        /// Every task that never became ready.
        locked: Vec<String>,
        /// One concrete cycle among the locked tasks, in edge order.
        cycle: Vec<String>,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StepdagError {
    /// Shorthand used by every validation site.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        StepdagError::InvalidConfiguration(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, StepdagError>;
