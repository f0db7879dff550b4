// src/engine/report.rs

//! Result of a finished simulation, plus text renderings for the CLI.

use std::fmt::Write as _;

use crate::errors::{Result, StepdagError};
use crate::types::TaskId;

/// Largest `total_time` that [`SimulationReport::render_timeline`] will lay out.
pub const TIMELINE_ROW_LIMIT: u64 = 10_000;

/// One executed task: which worker ran it and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSpan<T> {
    pub task: T,
    pub worker: usize,
    pub start: u64,
    pub finish: u64,
}

/// Everything a drained simulation produced.
#[derive(Debug, Clone)]
pub struct SimulationReport<T> {
    /// Time of the last completion (not one tick past it).
    pub total_time: u64,
    /// Number of worker slots used.
    pub workers: usize,
    /// Tasks in the order they finished; simultaneous finishes ascending.
    pub completion_order: Vec<T>,
    /// Spans in the order tasks started.
    pub spans: Vec<TaskSpan<T>>,
}

impl<T: TaskId> SimulationReport<T> {
    pub fn task_count(&self) -> usize {
        self.spans.len()
    }

    /// Tasks in the order they were started.
    pub fn start_order(&self) -> Vec<T> {
        self.spans.iter().map(|s| s.task.clone()).collect()
    }

    pub fn span_of(&self, task: &T) -> Option<&TaskSpan<T>> {
        self.spans.iter().find(|s| &s.task == task)
    }

    /// Start order concatenated, e.g. `"CABDFE"`.
    pub fn render_order(&self) -> String {
        concat(self.spans.iter().map(|s| &s.task))
    }

    pub fn render_completion_order(&self) -> String {
        concat(self.completion_order.iter())
    }

    /// Per-second table of what every worker is doing.
    ///
    /// ```text
    /// Second  Worker 1  Worker 2  Done
    /// 0       C         .
    /// 3       A         F         C
    /// ```
    ///
    /// `Done` lists tasks finished at or before the start of that second; the
    /// last row is `total_time`, where every task is done.
    ///
    /// Runs longer than [`TIMELINE_ROW_LIMIT`] seconds are refused with
    /// `InvalidConfiguration`.
    pub fn render_timeline(&self) -> Result<String> {
        if self.total_time > TIMELINE_ROW_LIMIT {
            return Err(StepdagError::invalid_config(format!(
                "timeline would span {} seconds; the limit is {TIMELINE_ROW_LIMIT}",
                self.total_time
            )));
        }

        let mut header = vec!["Second".to_string()];
        header.extend((1..=self.workers).map(|w| format!("Worker {w}")));
        header.push("Done".to_string());

        let mut rows: Vec<Vec<String>> = Vec::new();
        for second in 0..=self.total_time {
            let mut row = vec![second.to_string()];
            for worker in 0..self.workers {
                let cell = self
                    .spans
                    .iter()
                    .find(|s| s.worker == worker && s.start <= second && second < s.finish)
                    .map(|s| s.task.to_string())
                    .unwrap_or_else(|| ".".to_string());
                row.push(cell);
            }
            let done = self
                .completion_order
                .iter()
                .filter(|t| self.span_of(t).is_some_and(|s| s.finish <= second));
            row.push(concat(done));
            rows.push(row);
        }

        let widths: Vec<usize> = (0..header.len())
            .map(|col| {
                rows.iter()
                    .map(|r| r[col].len())
                    .chain(std::iter::once(header[col].len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        for row in std::iter::once(&header).chain(rows.iter()) {
            let mut line = String::new();
            for (cell, &width) in row.iter().zip(&widths) {
                let _ = write!(line, "{cell:<width$}  ");
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
        Ok(out)
    }
}

fn concat<'a, T: TaskId + 'a>(tasks: impl Iterator<Item = &'a T>) -> String {
    tasks.map(|t| t.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_worker_report() -> SimulationReport<char> {
        SimulationReport {
            total_time: 4,
            workers: 2,
            completion_order: vec!['A', 'B', 'C'],
            spans: vec![
                span('A', 0, 0, 1),
                span('B', 1, 0, 2),
                span('C', 0, 2, 4),
            ],
        }
    }

    fn span(task: char, worker: usize, start: u64, finish: u64) -> TaskSpan<char> {
        TaskSpan {
            task,
            worker,
            start,
            finish,
        }
    }

    #[test]
    fn renders_orders() {
        let report = two_worker_report();
        assert_eq!(report.render_order(), "ABC");
        assert_eq!(report.render_completion_order(), "ABC");
        assert_eq!(report.task_count(), 3);
        assert_eq!(report.span_of(&'C').map(|s| s.start), Some(2));
    }

    #[test]
    fn timeline_marks_idle_workers_and_done_tasks() {
        let table = two_worker_report().render_timeline().unwrap();
        let lines: Vec<Vec<&str>> = table
            .lines()
            .map(|l| l.split_whitespace().collect())
            .collect();

        assert_eq!(lines[0], vec!["Second", "Worker", "1", "Worker", "2", "Done"]);
        assert_eq!(lines[1], vec!["0", "A", "B"]);
        assert_eq!(lines[2], vec!["1", ".", "B", "A"]);
        assert_eq!(lines[3], vec!["2", "C", ".", "AB"]);
        assert_eq!(lines.last().cloned(), Some(vec!["4", ".", ".", "ABC"]));
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn overlong_timeline_is_refused() {
        let report = SimulationReport {
            total_time: TIMELINE_ROW_LIMIT + 1,
            workers: 1,
            completion_order: vec!['Q'],
            spans: vec![span('Q', 0, 0, TIMELINE_ROW_LIMIT + 1)],
        };

        match report.render_timeline() {
            Err(StepdagError::InvalidConfiguration(msg)) => assert!(msg.contains("limit")),
            other => panic!("expected InvalidConfiguration, got {other:?}"),
        }
    }
}
