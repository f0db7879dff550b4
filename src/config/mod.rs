// src/config/mod.rs

//! Simulation configuration.
//!
//! - [`model`] is the TOML-backed data model.
//! - [`loader`] reads a config file from disk.
//! - [`validate`] turns a raw file into a checked [`ConfigFile`].

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, load_or_default};
pub use model::{ConfigFile, DurationModel, DurationSection, RawConfigFile, SimulationSection};
pub use validate::apply_overrides;
