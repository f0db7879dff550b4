// src/input/mod.rs

//! Instruction text parsing.
//!
//! Turns lines like `Step C must be finished before step A can begin.` into
//! [`crate::types::Edge`]s over single-character step ids. The scheduling
//! core never sees raw text.

pub mod parse;

pub use parse::{load_edges, parse_edges, parse_line};
