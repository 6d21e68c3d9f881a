//! Append-only record of every position the drone has occupied.

use drone_domain::Position;

/// Visited positions in visitation order, seeded with the start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelLog {
    positions: Vec<Position>,
}

impl TravelLog {
    pub fn seed(start: Position) -> Self {
        Self {
            positions: vec![start],
        }
    }

    pub fn append(&mut self, position: Position) {
        self.positions.push(position);
    }

    pub fn as_slice(&self) -> &[Position] {
        &self.positions
    }

    pub fn to_vec(&self) -> Vec<Position> {
        self.positions.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.positions.iter()
    }

    /// Most recently visited position.
    pub fn last(&self) -> Position {
        // Seeding guarantees at least one entry.
        self.positions[self.positions.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false; the log holds at least the seed.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
