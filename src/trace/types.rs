//! Data structures built from a mobility trace.

use std::collections::HashMap;

/// Coordinate axis referenced by a position line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    /// Matched syntactically but never stored; NS2 traces here are 2D.
    Z,
}

/// Initial 2D position of a node, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Structured result of matching one trace line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TraceLine {
    /// `$node_(<id>) set <AXIS>_ <value>` - one axis of one node's initial position.
    PositionUpdate { node: u32, axis: Axis, value: f64 },
    /// `$ns_ at <time> "$node_(<id>) setdest ...` - a scheduled movement command.
    MovementEvent { node: u32, time: f64 },
}

/// Per-node initial positions, iterable in first-mention order.
#[derive(Debug, Default)]
pub struct NodePositions {
    order: Vec<u32>,
    map: HashMap<u32, Position>,
}

impl NodePositions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one position update.
    ///
    /// Creates the node entry at (0.0, 0.0) on first mention, then overwrites
    /// the matched axis. Later lines win over earlier ones for the same axis.
    /// Z-axis updates still create the entry but store nothing.
    pub fn apply(&mut self, node: u32, axis: Axis, value: f64) {
        let position = self.map.entry(node).or_insert_with(|| {
            self.order.push(node);
            Position::default()
        });
        match axis {
            Axis::X => position.x = value,
            Axis::Y => position.y = value,
            Axis::Z => {}
        }
    }

    pub fn get(&self, node: u32) -> Option<Position> {
        self.map.get(&node).copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate nodes in the order they were first mentioned in the trace.
    pub fn iter(&self) -> impl Iterator<Item = (u32, Position)> + '_ {
        self.order.iter().map(|id| (*id, self.map[id]))
    }
}

/// Movement timestamps per node: earliest (entry) and latest (exit), plus
/// the largest timestamp seen anywhere in the trace.
#[derive(Debug, Default)]
pub struct MovementTimes {
    entry: HashMap<u32, f64>,
    exit: HashMap<u32, f64>,
    max_time: f64,
}

impl MovementTimes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one movement command referencing `node` at `time`.
    pub fn record(&mut self, node: u32, time: f64) {
        self.entry
            .entry(node)
            .and_modify(|t| *t = t.min(time))
            .or_insert(time);
        self.exit
            .entry(node)
            .and_modify(|t| *t = t.max(time))
            .or_insert(time);
        if time > self.max_time {
            self.max_time = time;
        }
    }

    /// Earliest movement time for a node, 0.0 if the node never moved.
    pub fn entry_time(&self, node: u32) -> f64 {
        self.entry.get(&node).copied().unwrap_or(0.0)
    }

    /// Latest movement time for a node, falling back to the trace-wide
    /// maximum when the node never moved.
    pub fn exit_time(&self, node: u32) -> f64 {
        self.exit.get(&node).copied().unwrap_or(self.max_time)
    }

    /// Number of distinct nodes referenced by movement lines.
    pub fn moving_node_count(&self) -> usize {
        self.entry.len()
    }

    /// Largest timestamp seen in any movement line.
    pub fn total_simulation_time(&self) -> f64 {
        self.max_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_position_line_wins_per_axis() {
        let mut positions = NodePositions::new();
        positions.apply(3, Axis::X, 10.0);
        positions.apply(3, Axis::X, 42.5);
        assert_eq!(positions.get(3), Some(Position { x: 42.5, y: 0.0 }));
    }

    #[test]
    fn unset_axis_defaults_to_zero() {
        let mut positions = NodePositions::new();
        positions.apply(7, Axis::Y, 120.25);
        assert_eq!(positions.get(7), Some(Position { x: 0.0, y: 120.25 }));
    }

    #[test]
    fn z_axis_creates_entry_but_stores_nothing() {
        let mut positions = NodePositions::new();
        positions.apply(9, Axis::Z, 55.0);
        assert_eq!(positions.get(9), Some(Position { x: 0.0, y: 0.0 }));
        assert_eq!(positions.len(), 1);
    }

    #[test]
    fn iteration_follows_first_mention_order() {
        let mut positions = NodePositions::new();
        positions.apply(5, Axis::X, 1.0);
        positions.apply(2, Axis::X, 2.0);
        positions.apply(5, Axis::Y, 3.0);
        positions.apply(8, Axis::X, 4.0);

        let ids: Vec<u32> = positions.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![5, 2, 8]);
    }

    #[test]
    fn entry_time_is_minimum_of_all_movements() {
        let mut movements = MovementTimes::new();
        for time in [12.0, 3.5, 8.0] {
            movements.record(5, time);
        }
        assert_eq!(movements.entry_time(5), 3.5);
    }

    #[test]
    fn exit_time_is_maximum_of_all_movements() {
        let mut movements = MovementTimes::new();
        for time in [12.0, 3.5, 8.0] {
            movements.record(5, time);
        }
        assert_eq!(movements.exit_time(5), 12.0);
    }

    #[test]
    fn node_without_movements_defaults_to_zero_entry() {
        let movements = MovementTimes::new();
        assert_eq!(movements.entry_time(42), 0.0);
    }

    #[test]
    fn exit_time_for_unknown_node_is_trace_maximum() {
        let mut movements = MovementTimes::new();
        movements.record(1, 90.0);
        movements.record(2, 873.4);
        assert_eq!(movements.exit_time(42), 873.4);
        assert_eq!(movements.total_simulation_time(), 873.4);
        assert_eq!(movements.moving_node_count(), 2);
    }
}
