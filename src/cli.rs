// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::types::OutputMode;

/// Command-line arguments for `stepdag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "stepdag",
    version,
    about = "Order dependent steps and simulate them on a pool of workers.",
    long_about = None
)]
pub struct CliArgs {
    /// Instruction file, one `Step X must be finished before step Y can begin.` per line.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Path to the config file (TOML).
    ///
    /// Default: `Stepdag.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of workers; overrides `[simulation].workers`.
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Base step duration; overrides `[duration].base`.
    #[arg(long, value_name = "N")]
    pub base_duration: Option<u64>,

    /// Which results to print.
    #[arg(long, value_enum, default_value_t = OutputMode::Both)]
    pub mode: OutputMode,

    /// Print a per-second worker table after the simulation.
    #[arg(long)]
    pub timeline: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `STEPDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the graph, but don't schedule anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
