//! Spawn-point density buckets.
//!
//! Nodes whose positions round to the same tenth of a meter share a bucket.
//! A bucket holding more than one node marks a spawn-point stack, which can
//! act as an unintended signal jammer in the simulated radio environment.

use std::collections::HashMap;
use std::fmt;

use crate::trace::NodePositions;

/// A position rounded to one decimal place, stored in tenths of a meter so
/// the key is hashable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocationKey {
    x_tenths: i64,
    y_tenths: i64,
}

impl LocationKey {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x_tenths: (x * 10.0).round() as i64,
            y_tenths: (y * 10.0).round() as i64,
        }
    }
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.1}, {:.1})",
            self.x_tenths as f64 / 10.0,
            self.y_tenths as f64 / 10.0
        )
    }
}

/// Node count per rounded location, iterable in first-seen bucket order.
#[derive(Debug, Default)]
pub struct LocationCounts {
    order: Vec<LocationKey>,
    counts: HashMap<LocationKey, u32>,
}

impl LocationCounts {
    /// Bucket every node in `positions` by its rounded location.
    pub fn from_positions(positions: &NodePositions) -> Self {
        let mut result = Self::default();
        for (_, position) in positions.iter() {
            let key = LocationKey::new(position.x, position.y);
            result
                .counts
                .entry(key)
                .and_modify(|count| *count += 1)
                .or_insert_with(|| {
                    result.order.push(key);
                    1
                });
        }
        result
    }

    pub fn get(&self, key: LocationKey) -> u32 {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    /// Buckets shared by more than one node, in first-seen order.
    pub fn stacked(&self) -> impl Iterator<Item = (LocationKey, u32)> + '_ {
        self.order.iter().filter_map(|key| {
            let count = self.counts[key];
            (count > 1).then_some((*key, count))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::Axis;

    #[test]
    fn near_coincident_nodes_share_a_bucket() {
        let mut positions = NodePositions::new();
        positions.apply(0, Axis::X, 10.04);
        positions.apply(0, Axis::Y, 20.0);
        positions.apply(1, Axis::X, 9.96);
        positions.apply(1, Axis::Y, 20.0);
        positions.apply(2, Axis::X, 50.0);
        positions.apply(2, Axis::Y, 50.0);

        let counts = LocationCounts::from_positions(&positions);

        assert_eq!(counts.get(LocationKey::new(10.0, 20.0)), 2);
        assert_eq!(counts.get(LocationKey::new(50.0, 50.0)), 1);

        let stacked: Vec<(LocationKey, u32)> = counts.stacked().collect();
        assert_eq!(stacked, vec![(LocationKey::new(10.0, 20.0), 2)]);
    }

    #[test]
    fn isolated_nodes_produce_no_stacked_buckets() {
        let mut positions = NodePositions::new();
        positions.apply(0, Axis::X, 50.0);
        positions.apply(0, Axis::Y, 50.0);

        let counts = LocationCounts::from_positions(&positions);
        assert_eq!(counts.stacked().count(), 0);
    }

    #[test]
    fn key_display_uses_one_decimal_place() {
        assert_eq!(LocationKey::new(10.04, 20.0).to_string(), "(10.0, 20.0)");
        assert_eq!(LocationKey::new(0.0, 0.0).to_string(), "(0.0, 0.0)");
    }
}
