//! Shortest-path planning over the 6-connected grid graph.
//!
//! Uniform-cost search without decrease-key: improved frontier entries are
//! pushed again and stale ones are skipped when popped.

use drone_domain::{DomainError, GridGraph, ObstacleIndex, Position};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use tracing::{debug, warn};

/// Minimum-cost route from start to target, both inclusive.
///
/// Empty when the target cannot be reached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedPath {
    waypoints: Vec<Position>,
    cost: u32,
}

impl PlannedPath {
    #[must_use]
    pub fn waypoints(&self) -> &[Position] {
        &self.waypoints
    }

    #[must_use]
    pub fn into_waypoints(self) -> Vec<Position> {
        self.waypoints
    }

    /// Accumulated edge cost of the route.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Number of moves needed to follow the route.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.waypoints.len().saturating_sub(1)
    }

    #[must_use]
    pub fn start(&self) -> Option<Position> {
        self.waypoints.first().copied()
    }

    #[must_use]
    pub fn target(&self) -> Option<Position> {
        self.waypoints.last().copied()
    }
}

/// Dijkstra planner over a grid graph filtered by an obstacle index.
#[derive(Debug, Clone, Copy)]
pub struct PathPlanner<'a> {
    graph: &'a GridGraph,
    obstacles: &'a ObstacleIndex,
}

impl<'a> PathPlanner<'a> {
    pub const fn new(graph: &'a GridGraph, obstacles: &'a ObstacleIndex) -> Self {
        Self { graph, obstacles }
    }

    /// Plan a route from `start` to `target`.
    ///
    /// Obstacles only block cells being expanded into, so a start that
    /// coincides with an obstacle is still accepted. Equal-cost entries pop in
    /// ascending [`Position`] order, which makes the chosen route deterministic.
    pub fn plan(&self, start: Position, target: Position) -> Result<PlannedPath, DomainError> {
        self.graph.validate("start", start)?;
        self.graph.validate("target", target)?;

        let mut best: HashMap<Position, u32> = HashMap::from([(start, 0)]);
        let mut previous: HashMap<Position, Position> = HashMap::new();
        let mut frontier = BinaryHeap::from([Reverse((0_u32, start))]);
        let mut expanded = 0_usize;

        while let Some(Reverse((cost, position))) = frontier.pop() {
            if position == target {
                let path = reconstruct_path(&previous, target, cost);
                debug!(
                    %start,
                    %target,
                    cost,
                    waypoints = path.len(),
                    expanded,
                    "Path planned"
                );
                return Ok(path);
            }

            if best.get(&position).is_some_and(|&known| cost > known) {
                continue;
            }
            expanded += 1;

            for neighbor in self.graph.neighbors(position) {
                if self.obstacles.contains(&neighbor) {
                    continue;
                }
                let new_cost = cost + self.graph.cost(&position, &neighbor);
                if best.get(&neighbor).is_none_or(|&known| new_cost < known) {
                    best.insert(neighbor, new_cost);
                    previous.insert(neighbor, position);
                    frontier.push(Reverse((new_cost, neighbor)));
                }
            }
        }

        warn!(%start, %target, expanded, "Target unreachable");
        Ok(PlannedPath::default())
    }
}

/// Plan a route on a fresh grid of `grid_size` with the given obstacles.
pub fn plan(
    grid_size: i32,
    start: Position,
    target: Position,
    obstacles: &[Position],
) -> Result<PlannedPath, DomainError> {
    let graph = GridGraph::new(grid_size)?;
    let index = ObstacleIndex::build(obstacles.iter().copied());
    PathPlanner::new(&graph, &index).plan(start, target)
}

/// Walk predecessor links back from `target`; the start has none.
fn reconstruct_path(
    previous: &HashMap<Position, Position>,
    target: Position,
    cost: u32,
) -> PlannedPath {
    let mut waypoints = vec![target];
    let mut current = target;
    while let Some(&prev) = previous.get(&current) {
        waypoints.push(prev);
        current = prev;
    }
    waypoints.reverse();
    PlannedPath { waypoints, cost }
}
