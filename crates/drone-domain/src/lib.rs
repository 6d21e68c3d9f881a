//! # Drone Grid Planner - Domain Model
//!
//! Lattice value objects shared by the planner and the traversal simulator:
//! positions on the 3D grid, the implicit 6-connected grid graph, and the
//! obstacle index used to filter it.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// VALUE OBJECTS
// =============================================================================

/// Lattice cell on the 3D grid.
///
/// Ordering is lexicographic on `(x, y, z)`, which the planner relies on for
/// deterministic tie-breaking between equal-cost frontier entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Altitude component.
    #[must_use]
    pub const fn altitude(&self) -> i32 {
        self.z
    }

    /// Manhattan (L1) distance to another position.
    #[must_use]
    pub const fn manhattan_distance(&self, other: &Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) + self.z.abs_diff(other.z)
    }
}

impl From<(i32, i32, i32)> for Position {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl FromStr for Position {
    type Err = DomainError;

    /// Parses `"x,y,z"`, tolerating whitespace and surrounding parentheses.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let parts = trimmed
            .split(',')
            .map(|part| part.trim().parse::<i32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| DomainError::MalformedPosition(s.to_string()))?;

        match parts.as_slice() {
            [x, y, z] => Ok(Self::new(*x, *y, *z)),
            _ => Err(DomainError::MalformedPosition(s.to_string())),
        }
    }
}

// =============================================================================
// GRID GRAPH
// =============================================================================

/// Axis-aligned unit moves, in the order neighbors are enumerated.
const AXIS_MOVES: [(i32, i32, i32); 6] = [
    (-1, 0, 0),
    (1, 0, 0),
    (0, -1, 0),
    (0, 1, 0),
    (0, 0, -1),
    (0, 0, 1),
];

/// Implicit 6-connected graph over `[0, size)^3`.
///
/// Nothing is materialized; neighbors are computed on demand. Deserializes
/// from a bare size and goes through the same check as [`GridGraph::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct GridGraph {
    size: i32,
}

impl GridGraph {
    /// Create a graph for a cube of `size` cells per axis.
    pub fn new(size: i32) -> Result<Self, DomainError> {
        if size <= 0 {
            return Err(DomainError::InvalidGridSize { size });
        }
        Ok(Self { size })
    }

    #[must_use]
    pub const fn size(&self) -> i32 {
        self.size
    }

    /// Total number of lattice cells, saturating at `u64::MAX`.
    #[must_use]
    pub fn cell_count(&self) -> u64 {
        u64::from(self.size.unsigned_abs()).saturating_pow(3)
    }

    /// Whether every component lies in `[0, size)`.
    #[must_use]
    pub const fn contains(&self, position: &Position) -> bool {
        self.axis_in_bounds(position.x)
            && self.axis_in_bounds(position.y)
            && self.axis_in_bounds(position.z)
    }

    const fn axis_in_bounds(&self, value: i32) -> bool {
        value >= 0 && value < self.size
    }

    /// Reject a position outside the grid. `role` names it in the error.
    pub fn validate(&self, role: &'static str, position: Position) -> Result<(), DomainError> {
        if self.contains(&position) {
            Ok(())
        } else {
            Err(DomainError::OutOfBounds {
                role,
                position,
                grid_size: self.size,
            })
        }
    }

    /// In-bounds axis-aligned neighbors. Never includes `position` itself.
    #[must_use]
    pub fn neighbors(&self, position: Position) -> Vec<Position> {
        AXIS_MOVES
            .iter()
            .map(|(dx, dy, dz)| Position::new(position.x + dx, position.y + dy, position.z + dz))
            .filter(|candidate| self.contains(candidate))
            .collect()
    }

    /// Edge cost between two positions: their Manhattan distance.
    #[must_use]
    pub const fn cost(&self, from: &Position, to: &Position) -> u32 {
        from.manhattan_distance(to)
    }
}

impl TryFrom<i32> for GridGraph {
    type Error = DomainError;

    fn try_from(size: i32) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl From<GridGraph> for i32 {
    fn from(graph: GridGraph) -> Self {
        graph.size
    }
}

// =============================================================================
// OBSTACLE INDEX
// =============================================================================

/// Read-only spatial lookup of blocked cells, nested as x -> y -> {z}.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObstacleIndex {
    cells: HashMap<i32, HashMap<i32, HashSet<i32>>>,
    len: usize,
}

impl ObstacleIndex {
    /// Build the index. Duplicate entries collapse.
    pub fn build<I>(obstacles: I) -> Self
    where
        I: IntoIterator<Item = Position>,
    {
        let mut cells: HashMap<i32, HashMap<i32, HashSet<i32>>> = HashMap::new();
        let mut len = 0;

        for obstacle in obstacles {
            let inserted = cells
                .entry(obstacle.x)
                .or_default()
                .entry(obstacle.y)
                .or_default()
                .insert(obstacle.z);
            if inserted {
                len += 1;
            }
        }

        Self { cells, len }
    }

    #[must_use]
    pub fn contains(&self, position: &Position) -> bool {
        self.cells
            .get(&position.x)
            .and_then(|by_y| by_y.get(&position.y))
            .is_some_and(|zs| zs.contains(&position.z))
    }

    /// Number of distinct obstacle cells.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All obstacle cells in ascending order.
    #[must_use]
    pub fn positions(&self) -> Vec<Position> {
        let mut positions: Vec<Position> = self
            .cells
            .iter()
            .flat_map(|(&x, by_y)| {
                by_y.iter()
                    .flat_map(move |(&y, zs)| zs.iter().map(move |&z| Position::new(x, y, z)))
            })
            .collect();
        positions.sort_unstable();
        positions
    }
}

impl FromIterator<Position> for ObstacleIndex {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        Self::build(iter)
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid grid size: {size} (must be positive)")]
    InvalidGridSize { size: i32 },

    #[error("Invalid {role} position {position}: outside grid of size {grid_size}")]
    OutOfBounds {
        role: &'static str,
        position: Position,
        grid_size: i32,
    },

    #[error("Malformed position: {0:?} (expected \"x,y,z\")")]
    MalformedPosition(String),
}

impl DomainError {
    /// Whether this error rejects a planning parameter.
    #[must_use]
    pub const fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidGridSize { .. } | Self::OutOfBounds { .. })
    }
}
