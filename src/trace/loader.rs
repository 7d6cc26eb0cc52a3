//! Single-pass trace file loading and aggregation.

use anyhow::Context;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::line_parser::{match_movement, match_position};
use super::types::{MovementTimes, NodePositions, TraceLine};

/// Buffer size for reading trace files (8KB).
const BUFFER_SIZE: usize = 8 * 1024;

/// Everything extracted from one pass over a trace file.
#[derive(Debug, Default)]
pub struct TraceOutcome {
    pub positions: NodePositions,
    pub movements: MovementTimes,
    pub stats: TraceStats,
}

/// Line counters for debug reporting.
#[derive(Debug, Default, Clone, Copy)]
pub struct TraceStats {
    pub position_lines: usize,
    pub movement_lines: usize,
    pub ignored_lines: usize,
}

/// Read a trace file to completion and aggregate per-node data.
///
/// Both matchers are tried independently on every line, so a line could in
/// principle contribute to both mappings. Unmatched lines are skipped
/// without complaint; truncated or partially foreign files degrade to
/// partial results. Failing to open the file is the only fatal error.
pub fn load_trace(path: &Path) -> anyhow::Result<TraceOutcome> {
    let file = File::open(path)
        .with_context(|| format!("could not open trace file '{}'", path.display()))?;
    let reader = BufReader::with_capacity(BUFFER_SIZE, file);

    let mut outcome = TraceOutcome::default();
    for line in reader.lines() {
        let line = line.with_context(|| format!("read error in '{}'", path.display()))?;
        let mut matched = false;

        if let Some(TraceLine::PositionUpdate { node, axis, value }) = match_position(&line) {
            outcome.positions.apply(node, axis, value);
            outcome.stats.position_lines += 1;
            matched = true;
        }
        if let Some(TraceLine::MovementEvent { node, time }) = match_movement(&line) {
            outcome.movements.record(node, time);
            outcome.stats.movement_lines += 1;
            matched = true;
        }
        if !matched {
            outcome.stats.ignored_lines += 1;
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::types::Position;
    use std::path::PathBuf;

    struct TempTrace(PathBuf);

    impl TempTrace {
        fn write(name: &str, contents: &str) -> Self {
            let path =
                std::env::temp_dir().join(format!("ghost-trace-{}-{}.tcl", name, std::process::id()));
            std::fs::write(&path, contents).unwrap();
            Self(path)
        }
    }

    impl Drop for TempTrace {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }

    #[test]
    fn aggregates_positions_and_movements() {
        let trace = TempTrace::write(
            "sample",
            "# generated by sumo\n\
             $node_(0) set X_ 10.0\n\
             $node_(0) set Y_ 20.0\n\
             $node_(0) set Z_ 0.0\n\
             $node_(1) set X_ 30.0\n\
             $ns_ at 12.0 \"$node_(1) setdest 40.0 50.0 5.0\"\n\
             $ns_ at 3.5 \"$node_(1) setdest 60.0 70.0 5.0\"\n\
             $ns_ at 8.0 \"$node_(2) setdest 80.0 90.0 5.0\"\n",
        );

        let outcome = load_trace(&trace.0).unwrap();

        assert_eq!(outcome.positions.len(), 2);
        assert_eq!(outcome.positions.get(0), Some(Position { x: 10.0, y: 20.0 }));
        assert_eq!(outcome.positions.get(1), Some(Position { x: 30.0, y: 0.0 }));
        // Movement-only nodes are never synthesized into the position map.
        assert_eq!(outcome.positions.get(2), None);

        assert_eq!(outcome.movements.entry_time(1), 3.5);
        assert_eq!(outcome.movements.entry_time(0), 0.0);
        assert_eq!(outcome.movements.total_simulation_time(), 12.0);

        assert_eq!(outcome.stats.position_lines, 4);
        assert_eq!(outcome.stats.movement_lines, 3);
        assert_eq!(outcome.stats.ignored_lines, 1);
    }

    #[test]
    fn empty_file_yields_empty_mappings() {
        let trace = TempTrace::write("empty", "");
        let outcome = load_trace(&trace.0).unwrap();
        assert!(outcome.positions.is_empty());
        assert_eq!(outcome.movements.moving_node_count(), 0);
    }

    #[test]
    fn missing_file_reports_the_path() {
        let path = Path::new("definitely/not/here.tcl");
        let err = load_trace(path).unwrap_err();
        assert!(err.to_string().contains("definitely/not/here.tcl"));
    }
}
