//! Console report over aggregated trace data.

use std::io::{self, Write};

use super::density::LocationCounts;
use crate::trace::{MovementTimes, NodePositions};

/// Write the spawn-point density report.
///
/// Prints the node count, a fixed-width table of every location shared by
/// more than one node, and a movement summary when the trace scheduled any
/// movement. Singleton locations are expected for isolated nodes and are
/// omitted from the table.
pub fn write_density_report(
    out: &mut impl Write,
    positions: &NodePositions,
    counts: &LocationCounts,
    movements: &MovementTimes,
) -> io::Result<()> {
    writeln!(out, "Analyzing {} nodes...", positions.len())?;
    writeln!(out)?;
    writeln!(out, "--- SPAWN POINT DENSITY ANALYSIS ---")?;
    writeln!(out, "{:<25} | {:<15}", "Location (X, Y)", "Count (Nodes Stacked)")?;
    writeln!(out, "{}", "-".repeat(45))?;
    for (location, count) in counts.stacked() {
        writeln!(
            out,
            "{:<25} | {:<15} <--- Potential Jammer!",
            location.to_string(),
            count
        )?;
    }

    if movements.moving_node_count() > 0 {
        writeln!(out)?;
        writeln!(
            out,
            "Nodes referenced by movement commands: {}",
            movements.moving_node_count()
        )?;
        writeln!(
            out,
            "Total simulation time: {:.1} s",
            movements.total_simulation_time()
        )?;
    }

    Ok(())
}
