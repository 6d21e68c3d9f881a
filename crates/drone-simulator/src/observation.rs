//! Obstacle observations captured while traversing.

use drone_domain::Position;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single captured observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub position: Position,
    pub description: String,
}

/// Observations keyed by the obstacle cell they were taken at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservationLog {
    entries: BTreeMap<Position, String>,
}

impl ObservationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture an image at `position`. Revisiting overwrites with the same text.
    pub fn capture(&mut self, position: Position) {
        self.entries.insert(position, describe(position));
    }

    pub fn get(&self, position: &Position) -> Option<&str> {
        self.entries.get(position).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Observations in ascending position order.
    pub fn to_vec(&self) -> Vec<Observation> {
        self.entries
            .iter()
            .map(|(&position, description)| Observation {
                position,
                description: description.clone(),
            })
            .collect()
    }
}

fn describe(position: Position) -> String {
    format!("Captured image at obstacle position {position}")
}
