use env_logger::Builder;
use log::{LevelFilter, debug, info};
use std::path::Path;

use crate::analysis::LocationCounts;

mod analysis;
mod config;
mod plot;
mod trace;

fn main() -> anyhow::Result<()> {
    // Logging setup
    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter(Some("ghost_node_analyzer"), LevelFilter::Debug)
        .init();

    info!("Starting up");

    let run_config = config::RunConfig::from_args(std::env::args().skip(1));
    debug!("Analyzing trace file: {}", run_config.trace_path.display());

    let outcome = trace::load_trace(&run_config.trace_path)?;
    debug!(
        "Matched {} position lines and {} movement lines ({} lines ignored)",
        outcome.stats.position_lines, outcome.stats.movement_lines, outcome.stats.ignored_lines
    );

    let counts = LocationCounts::from_positions(&outcome.positions);

    let stdout = std::io::stdout();
    analysis::write_density_report(&mut stdout.lock(), &outcome.positions, &counts, &outcome.movements)?;

    plot::render_scatter(Path::new(plot::OUTPUT_FILENAME), &outcome.positions, &outcome.movements)?;
    println!("\nGraph saved to: {}", plot::OUTPUT_FILENAME);

    // Save happens first, so a viewer failure still leaves the image on disk.
    plot::open_viewer(plot::OUTPUT_FILENAME)?;

    Ok(())
}
