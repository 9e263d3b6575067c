use std::{collections::HashMap, fmt::Display};

use serde::{Serialize, Serializer};

/// Which terminus a trip departs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Goiás towards the Federal District, endpoint one to endpoint two.
    Outbound,
    /// Federal District back to Goiás.
    Return,
}

impl Direction {
    pub const fn label(&self) -> &'static str {
        match self {
            Direction::Outbound => "GO-DF",
            Direction::Return => "DF-GO",
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Direction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Alternates each route's trips between the two directions, in the order they are seen.
///
/// One assigner belongs to one run; counters are never shared between runs.
#[derive(Debug, Default, Clone)]
pub struct DirectionAssigner {
    occurrences: HashMap<String, u32>,
}

impl DirectionAssigner {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn next_direction(&mut self, route_code: &str) -> Direction {
        let count = self.occurrences.entry(route_code.to_string()).or_default();
        *count += 1;
        if *count % 2 == 1 {
            Direction::Outbound
        } else {
            Direction::Return
        }
    }

    pub fn occurrences(&self, route_code: &str) -> u32 {
        self.occurrences.get(route_code).copied().unwrap_or_default()
    }
}
