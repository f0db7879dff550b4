// src/input/parse.rs

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::errors::{Result, StepdagError};
use crate::types::Edge;

/// `Step C must be finished before step A can begin.`
static INSTRUCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Step\s+(\S+)\s+must\s+be\s+finished\s+before\s+step\s+(\S+)\s+can\s+begin\.?$")
        .expect("instruction pattern is valid")
});

/// Parse one instruction line. `line_no` is 1-based and only used for error
/// reporting.
///
/// Blank lines yield `Ok(None)`.
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<Edge<char>>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let caps = INSTRUCTION.captures(trimmed).ok_or_else(|| {
        malformed(
            line_no,
            line,
            "expected `Step X must be finished before step Y can begin.`",
        )
    })?;

    let prerequisite = task_id(line_no, line, &caps[1])?;
    let dependent = task_id(line_no, line, &caps[2])?;

    Ok(Some(Edge::new(prerequisite, dependent)))
}

/// Parse a whole instruction text, one edge per non-blank line.
pub fn parse_edges(text: &str) -> Result<Vec<Edge<char>>> {
    let mut edges = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if let Some(edge) = parse_line(idx + 1, line)? {
            edges.push(edge);
        }
    }
    debug!(edges = edges.len(), "parsed instructions");
    Ok(edges)
}

/// Read and parse an instruction file.
pub fn load_edges(path: impl AsRef<Path>) -> Result<Vec<Edge<char>>> {
    let contents = fs::read_to_string(path.as_ref())?;
    parse_edges(&contents)
}

/// A task id is exactly one ASCII letter or digit.
fn task_id(line_no: usize, line: &str, token: &str) -> Result<char> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphanumeric() => Ok(c),
        _ => Err(malformed(
            line_no,
            line,
            &format!("step id '{token}' is not a single ASCII letter or digit"),
        )),
    }
}

fn malformed(line_no: usize, line: &str, reason: &str) -> StepdagError {
    StepdagError::MalformedEdge {
        line: line_no,
        text: line.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_prerequisite_and_dependent() {
        let edge = parse_line(1, "Step C must be finished before step A can begin.").unwrap();
        assert_eq!(edge, Some(Edge::new('C', 'A')));
    }

    #[test]
    fn tolerates_whitespace_and_missing_period() {
        let edge = parse_line(1, "  Step Q must be finished before step 7 can begin  ").unwrap();
        assert_eq!(edge, Some(Edge::new('Q', '7')));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let text = "\nStep A must be finished before step B can begin.\n\n";
        assert_eq!(parse_edges(text).unwrap(), vec![Edge::new('A', 'B')]);
    }

    #[test]
    fn unrecognised_line_reports_its_number() {
        let text = "Step A must be finished before step B can begin.\nStep B then C";
        match parse_edges(text) {
            Err(StepdagError::MalformedEdge { line, text, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(text, "Step B then C");
            }
            other => panic!("expected MalformedEdge, got {other:?}"),
        }
    }

    #[test]
    fn multi_character_ids_are_rejected() {
        let result = parse_line(3, "Step AB must be finished before step C can begin.");
        match result {
            Err(StepdagError::MalformedEdge { line, reason, .. }) => {
                assert_eq!(line, 3);
                assert!(reason.contains("'AB'"));
            }
            other => panic!("expected MalformedEdge, got {other:?}"),
        }
    }
}
