//! NS2 mobility-trace parsing.
//!
//! Recognizes exactly two line shapes from the NS2/TCL mobility format:
//! initial-position assignments and scheduled `setdest` movement commands.
//! Every other line is skipped without complaint, so arbitrary TCL content
//! degrades to partial results rather than errors.

pub mod line_parser;
pub mod loader;
pub mod types;

pub use loader::{TraceOutcome, TraceStats, load_trace};
pub use types::{Axis, MovementTimes, NodePositions, Position, TraceLine};
