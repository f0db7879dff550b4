// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod input;
pub mod logging;
pub mod types;

use std::fmt::Write as _;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{ConfigFile, apply_overrides, load_or_default};
use crate::dag::{TaskGraph, check_acyclic};
use crate::engine::{sequential_order, simulate};
use crate::input::load_edges;

/// High-level entry point used by `main.rs`.
///
/// Prints what [`render`] produces to stdout.
pub fn run(args: CliArgs) -> Result<()> {
    let output = render(&args)?;
    print!("{output}");
    Ok(())
}

/// Do everything `run` does, returning the text instead of printing it.
///
/// This wires together:
/// - instruction parsing
/// - config loading + CLI overrides
/// - the sequential scheduler and/or the worker simulation
pub fn render(args: &CliArgs) -> Result<String> {
    let edges = load_edges(&args.input)?;
    let graph: TaskGraph<char> = TaskGraph::build(edges);

    let cfg = load_or_default(args.config.as_deref())?;
    let cfg = apply_overrides(cfg, args.workers, args.base_duration)?;

    info!(
        steps = graph.len(),
        edges = graph.edge_count(),
        workers = cfg.workers,
        "loaded step graph"
    );

    if args.dry_run {
        return dry_run_text(args, &graph, &cfg);
    }

    let mut out = String::new();

    if args.mode.wants_order() {
        let order: String = sequential_order(&graph)?.into_iter().collect();
        writeln!(out, "order: {order}")?;
    }

    if args.mode.wants_time() || args.timeline {
        let report = simulate(&graph, cfg.workers, |step| cfg.duration.duration_of(step))?;
        if args.mode.wants_time() {
            writeln!(out, "time: {}", report.total_time)?;
        }
        if args.timeline {
            out.push_str(&report.render_timeline()?);
        }
    }

    Ok(out)
}

/// Dry-run output: configuration, steps, prerequisites and durations.
fn dry_run_text(args: &CliArgs, graph: &TaskGraph<char>, cfg: &ConfigFile) -> Result<String> {
    let mut out = String::new();

    writeln!(out, "stepdag dry-run")?;
    writeln!(out, "  input = {}", args.input.display())?;
    writeln!(out, "  simulation.workers = {}", cfg.workers)?;
    writeln!(out, "  duration.base = {}", cfg.duration.base)?;
    writeln!(out, "  duration.letter_offset = {}", cfg.duration.letter_offset)?;
    if !cfg.duration.overrides.is_empty() {
        writeln!(out, "  duration.overrides = {:?}", cfg.duration.overrides)?;
    }
    writeln!(out)?;

    writeln!(out, "steps ({}):", graph.len())?;
    for step in graph.all_task_ids() {
        writeln!(out, "  - {step}")?;
        let after: Vec<&char> = graph.prerequisites_of(step).collect();
        if !after.is_empty() {
            writeln!(out, "      after: {after:?}")?;
        }
        writeln!(out, "      duration: {}", cfg.duration.duration_of(step))?;
    }
    writeln!(out)?;

    writeln!(out, "roots: {:?}", graph.roots())?;
    writeln!(out, "edges: {}", graph.edge_count())?;
    match check_acyclic(graph) {
        Ok(()) => writeln!(out, "acyclic: yes")?,
        Err(e) => writeln!(out, "acyclic: no ({e})")?,
    }

    debug!("dry-run complete (no scheduling)");
    Ok(out)
}
