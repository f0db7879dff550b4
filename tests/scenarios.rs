use std::error::Error;

use stepdag::dag::TaskGraph;
use stepdag::engine::{sequential_order, simulate, total_time};
use stepdag::input::parse_edges;
use stepdag_test_utils::builders::{GraphBuilder, letter_duration};
use stepdag_test_utils::fixtures::{SAMPLE_INSTRUCTIONS, sample_graph};
use stepdag_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

fn order_string(graph: &TaskGraph<char>) -> Result<String, Box<dyn Error>> {
    Ok(sequential_order(graph)?.into_iter().collect())
}

#[test]
fn sample_instructions_order_is_cabdfe() -> TestResult {
    init_tracing();

    let graph = TaskGraph::build(parse_edges(SAMPLE_INSTRUCTIONS)?);
    assert_eq!(order_string(&graph)?, "CABDFE");
    Ok(())
}

#[test]
fn sample_on_two_workers_takes_fifteen() -> TestResult {
    init_tracing();

    let report = simulate(&sample_graph(), 2, letter_duration(0))?;
    assert_eq!(report.total_time, 15);
    assert_eq!(report.render_completion_order(), "CABFDE");

    let e = report.span_of(&'E').ok_or("E never ran")?;
    assert_eq!((e.start, e.finish), (10, 15));
    Ok(())
}

#[test]
fn sample_timeline_matches_worked_example() -> TestResult {
    let report = simulate(&sample_graph(), 2, letter_duration(0))?;
    let table = report.render_timeline()?;
    let rows: Vec<Vec<&str>> = table
        .lines()
        .skip(1)
        .map(|l| l.split_whitespace().collect())
        .collect();

    assert_eq!(rows.len(), 16);
    assert_eq!(rows[0], vec!["0", "C", "."]);
    assert_eq!(rows[3], vec!["3", "A", "F", "C"]);
    assert_eq!(rows[9], vec!["9", "D", ".", "CABF"]);
    assert_eq!(rows[15], vec!["15", ".", ".", "CABFDE"]);
    Ok(())
}

#[test]
fn isolated_single_step() -> TestResult {
    let graph = GraphBuilder::new().task('X').build();
    assert_eq!(order_string(&graph)?, "X");

    for workers in 1..=4 {
        assert_eq!(total_time(&graph, workers, |_: &char| 5)?, 5);
    }
    Ok(())
}

#[test]
fn single_worker_unit_time_matches_sequential_order() -> TestResult {
    let graph = sample_graph();
    let report = simulate(&graph, 1, |_: &char| 1)?;

    assert_eq!(report.start_order(), sequential_order(&graph)?);
    assert_eq!(report.total_time, graph.len() as u64);
    Ok(())
}

#[test]
fn single_worker_time_is_sum_of_durations() -> TestResult {
    let graph = sample_graph();
    let report = simulate(&graph, 1, letter_duration(0))?;

    assert_eq!(report.total_time, 1 + 2 + 3 + 4 + 5 + 6);
    assert_eq!(report.render_order(), "CABDFE");
    Ok(())
}

#[test]
fn more_workers_never_slow_the_sample_down() -> TestResult {
    let graph = sample_graph();
    let times: Vec<u64> = (1..=6)
        .map(|w| total_time(&graph, w, letter_duration(0)))
        .collect::<Result<_, _>>()?;

    assert_eq!(times, vec![21, 15, 14, 14, 14, 14]);
    assert!(times.windows(2).all(|w| w[1] <= w[0]));
    Ok(())
}

#[test]
fn independent_steps_spread_across_workers() -> TestResult {
    let graph = GraphBuilder::new().task('X').task('Y').task('Z').build();

    assert_eq!(total_time(&graph, 1, letter_duration(0))?, 24 + 25 + 26);
    assert_eq!(total_time(&graph, 2, letter_duration(0))?, 24 + 26);
    assert_eq!(total_time(&graph, 3, letter_duration(0))?, 26);
    Ok(())
}

#[test]
fn forest_components_interleave_by_id() -> TestResult {
    let graph = GraphBuilder::new().chain("BDF").chain("ACE").build();
    assert_eq!(order_string(&graph)?, "ABCDEF");
    Ok(())
}

#[test]
fn simultaneous_completions_unlock_before_assignment() -> TestResult {
    // A and B both finish at 2; C needs both and must start at 2, not later.
    let graph = GraphBuilder::new().edge('A', 'C').edge('B', 'C').build();
    let report = simulate(&graph, 2, |_: &char| 2)?;

    let c = report.span_of(&'C').ok_or("C never ran")?;
    assert_eq!(c.start, 2);
    assert_eq!(report.total_time, 4);
    assert_eq!(report.completion_order, vec!['A', 'B', 'C']);
    Ok(())
}

#[test]
fn graph_can_be_scheduled_repeatedly() -> TestResult {
    let graph = sample_graph();
    assert_eq!(order_string(&graph)?, "CABDFE");
    assert_eq!(order_string(&graph)?, "CABDFE");
    assert_eq!(total_time(&graph, 2, letter_duration(0))?, 15);
    Ok(())
}
