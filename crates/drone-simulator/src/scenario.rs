//! Random obstacle fields for generated scenarios.

use drone_domain::{GridGraph, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;

/// Scatter `count` distinct obstacles over `graph`, never on `exclude`.
///
/// The same seed always yields the same field. The count is capped at the
/// number of cells left free after exclusions.
pub fn random_obstacles(
    graph: &GridGraph,
    count: usize,
    seed: u64,
    exclude: &[Position],
) -> Vec<Position> {
    let excluded: BTreeSet<Position> = exclude
        .iter()
        .copied()
        .filter(|p| graph.contains(p))
        .collect();
    let free = usize::try_from(graph.cell_count())
        .unwrap_or(usize::MAX)
        .saturating_sub(excluded.len());
    let count = count.min(free);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut chosen = BTreeSet::new();
    let mut obstacles = Vec::with_capacity(count);

    while obstacles.len() < count {
        let candidate = Position::new(
            rng.gen_range(0..graph.size()),
            rng.gen_range(0..graph.size()),
            rng.gen_range(0..graph.size()),
        );
        if excluded.contains(&candidate) || !chosen.insert(candidate) {
            continue;
        }
        obstacles.push(candidate);
    }

    obstacles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_field() {
        let graph = GridGraph::new(6).unwrap();
        let a = random_obstacles(&graph, 20, 7, &[]);
        let b = random_obstacles(&graph, 20, 7, &[]);
        assert_eq!(a, b);
        assert_eq!(a.len(), 20);
    }

    #[test]
    fn test_obstacles_are_distinct_and_avoid_exclusions() {
        let graph = GridGraph::new(3).unwrap();
        let start = Position::new(0, 0, 0);
        let target = Position::new(2, 2, 2);
        let obstacles = random_obstacles(&graph, 20, 42, &[start, target]);

        let distinct: BTreeSet<_> = obstacles.iter().copied().collect();
        assert_eq!(distinct.len(), obstacles.len());
        assert!(!distinct.contains(&start));
        assert!(!distinct.contains(&target));
        assert!(obstacles.iter().all(|p| graph.contains(p)));
    }

    #[test]
    fn test_count_is_capped_by_free_cells() {
        let graph = GridGraph::new(2).unwrap();
        let obstacles = random_obstacles(&graph, 100, 1, &[Position::new(0, 0, 0)]);
        assert_eq!(obstacles.len(), 7);
    }

    #[test]
    fn test_huge_grid_does_not_overflow_free_cell_count() {
        let graph = GridGraph::new(3_000_000).unwrap();
        let obstacles = random_obstacles(&graph, 1, 0, &[]);
        assert_eq!(obstacles.len(), 1);
        assert!(graph.contains(&obstacles[0]));
    }
}
