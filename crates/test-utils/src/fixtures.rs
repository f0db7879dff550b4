use std::io::Write;

use stepdag::dag::TaskGraph;
use stepdag::types::Edge;
use tempfile::NamedTempFile;

/// The seven-step sample: `C` first, `E` last.
pub const SAMPLE_INSTRUCTIONS: &str = "\
Step C must be finished before step A can begin.
Step C must be finished before step F can begin.
Step A must be finished before step B can begin.
Step A must be finished before step D can begin.
Step B must be finished before step E can begin.
Step D must be finished before step E can begin.
Step F must be finished before step E can begin.
";

pub fn sample_edges() -> Vec<Edge<char>> {
    [
        ('C', 'A'),
        ('C', 'F'),
        ('A', 'B'),
        ('A', 'D'),
        ('B', 'E'),
        ('D', 'E'),
        ('F', 'E'),
    ]
    .into_iter()
    .map(Edge::from)
    .collect()
}

pub fn sample_graph() -> TaskGraph<char> {
    TaskGraph::build(sample_edges())
}

/// Write `contents` to a fresh temporary file that lives as long as the
/// returned handle.
pub fn temp_file(contents: &str) -> anyhow::Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}
