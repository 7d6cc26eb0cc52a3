//! Match individual trace lines against the two recognized NS2 shapes.
//!
//! Supported line formats:
//! - Position: `$node_(<id>) set <AXIS>_ <value>` with AXIS one of X, Y, Z
//! - Movement: `$ns_ at <time> "$node_(<id>) setdest ...`
//!
//! Both matchers scan the whole line for their anchor token, so leading TCL
//! or trailing content does not prevent a match. Tokens are separated by at
//! least one whitespace character. Numeric fields are runs of digits and
//! dots; a run that does not parse as a float rejects the candidate match.

use super::types::{Axis, TraceLine};

/// Per-node variable reference, e.g. `$node_(12)`.
const NODE_REF: &str = "$node_(";

/// Simulator object reference that prefixes scheduled events.
const SIM_REF: &str = "$ns_";

/// Match a per-node initial position assignment.
///
/// ```text
/// $node_(3) set X_ 2803.57
/// $node_(3) set Y_ 2855.16
/// $node_(3) set Z_ 0.00
/// ```
///
/// # Returns
///
/// `Some(TraceLine::PositionUpdate)` when the line contains a position
/// assignment, `None` otherwise. Z-axis assignments are matched and reported
/// so the caller can register the node, even though no coordinate is stored.
pub fn match_position(line: &str) -> Option<TraceLine> {
    let mut search_from = 0;
    while let Some(found) = line[search_from..].find(NODE_REF) {
        let start = search_from + found;
        search_from = start + 1;

        let rest = &line[start + NODE_REF.len()..];
        let Some((node, rest)) = take_integer(rest) else { continue };
        let Some(rest) = rest.strip_prefix(')') else { continue };
        let Some(rest) = skip_whitespace(rest) else { continue };
        let Some(rest) = rest.strip_prefix("set") else { continue };
        let Some(rest) = skip_whitespace(rest) else { continue };
        let axis = match rest.as_bytes().first() {
            Some(b'X') => Axis::X,
            Some(b'Y') => Axis::Y,
            Some(b'Z') => Axis::Z,
            _ => continue,
        };
        let Some(rest) = rest[1..].strip_prefix('_') else { continue };
        let Some(rest) = skip_whitespace(rest) else { continue };
        let Some((value, _)) = take_number(rest) else { continue };

        return Some(TraceLine::PositionUpdate { node, axis, value });
    }
    None
}

/// Match a scheduled movement command.
///
/// ```text
/// $ns_ at 15.0 "$node_(3) setdest 2803.57 2855.16 0.00"
/// ```
///
/// # Returns
///
/// `Some(TraceLine::MovementEvent)` with the scheduled time and node id,
/// `None` for any other line.
pub fn match_movement(line: &str) -> Option<TraceLine> {
    let mut search_from = 0;
    while let Some(found) = line[search_from..].find(SIM_REF) {
        let start = search_from + found;
        search_from = start + 1;

        let rest = &line[start + SIM_REF.len()..];
        let Some(rest) = skip_whitespace(rest) else { continue };
        let Some(rest) = rest.strip_prefix("at") else { continue };
        let Some(rest) = skip_whitespace(rest) else { continue };
        let Some((time, rest)) = take_number(rest) else { continue };
        let Some(rest) = skip_whitespace(rest) else { continue };
        let Some(rest) = rest.strip_prefix('"') else { continue };
        let Some(rest) = rest.strip_prefix(NODE_REF) else { continue };
        let Some((node, rest)) = take_integer(rest) else { continue };
        let Some(rest) = rest.strip_prefix(')') else { continue };
        let Some(rest) = skip_whitespace(rest) else { continue };
        if !rest.starts_with("setdest") {
            continue;
        }

        return Some(TraceLine::MovementEvent { node, time });
    }
    None
}

/// Consume a leading run of ASCII digits as a node id.
fn take_integer(input: &str) -> Option<(u32, &str)> {
    let end = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    if end == 0 {
        return None;
    }
    input[..end].parse().ok().map(|id| (id, &input[end..]))
}

/// Consume a leading run of digits and dots as a float.
///
/// Runs that are not valid floats (`1.2.3`, `.`) reject the match.
fn take_number(input: &str) -> Option<(f64, &str)> {
    let end = input
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(input.len());
    if end == 0 {
        return None;
    }
    input[..end].parse().ok().map(|value| (value, &input[end..]))
}

/// Consume at least one whitespace character.
fn skip_whitespace(input: &str) -> Option<&str> {
    let trimmed = input.trim_start();
    if trimmed.len() == input.len() {
        None
    } else {
        Some(trimmed)
    }
}
