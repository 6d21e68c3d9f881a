//! Mission setup: validated parameters in, planned route out.

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::planner::{PathPlanner, PlannedPath};
use crate::traversal::TraversalSimulator;
use drone_domain::{GridGraph, ObstacleIndex, Position};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Input parameters for a mission, as produced by an input layer or a
/// scenario file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionParams {
    pub grid_size: i32,
    pub start: Position,
    pub target: Position,
    #[serde(default)]
    pub obstacles: Vec<Position>,
}

impl MissionParams {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a scenario from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

/// A planned mission: grid, obstacle index, endpoints and route.
#[derive(Debug, Clone)]
pub struct Mission {
    graph: GridGraph,
    obstacles: Arc<ObstacleIndex>,
    start: Position,
    target: Position,
    path: PlannedPath,
}

impl Mission {
    /// Build the grid and obstacle index, then plan once.
    pub fn plan(params: &MissionParams) -> Result<Self> {
        let graph = GridGraph::new(params.grid_size)?;
        let obstacles = Arc::new(ObstacleIndex::build(params.obstacles.iter().copied()));
        let path = PathPlanner::new(&graph, &obstacles).plan(params.start, params.target)?;

        info!(
            grid_size = graph.size(),
            obstacles = obstacles.len(),
            waypoints = path.len(),
            "Mission planned: {} -> {}",
            params.start,
            params.target
        );

        Ok(Self {
            graph,
            obstacles,
            start: params.start,
            target: params.target,
            path,
        })
    }

    pub const fn graph(&self) -> &GridGraph {
        &self.graph
    }

    /// Shared read-only obstacle index.
    pub fn obstacles(&self) -> Arc<ObstacleIndex> {
        Arc::clone(&self.obstacles)
    }

    pub const fn start(&self) -> Position {
        self.start
    }

    pub const fn target(&self) -> Position {
        self.target
    }

    pub const fn path(&self) -> &PlannedPath {
        &self.path
    }

    /// Whether a route to the target exists.
    pub fn is_reachable(&self) -> bool {
        !self.path.is_empty()
    }

    /// Obstacle cells with their grid neighbors, in ascending order.
    pub fn obstacle_graph(&self) -> Vec<(Position, Vec<Position>)> {
        self.obstacles
            .positions()
            .into_iter()
            .map(|obstacle| (obstacle, self.graph.neighbors(obstacle)))
            .collect()
    }

    /// Create a simulator that follows this mission's route.
    pub fn simulator(&self, config: &SimulationConfig) -> Result<TraversalSimulator> {
        config.validate()?;
        Ok(TraversalSimulator::new(
            self.start,
            self.target,
            self.path.waypoints().to_vec(),
            self.obstacles(),
            config,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimulatorError;
    use drone_domain::DomainError;
    use std::io::Write;

    fn params(obstacles: Vec<Position>) -> MissionParams {
        MissionParams {
            grid_size: 3,
            start: Position::new(0, 0, 0),
            target: Position::new(2, 0, 0),
            obstacles,
        }
    }

    #[test]
    fn test_plan_mission() {
        let mission = Mission::plan(&params(vec![])).unwrap();
        assert!(mission.is_reachable());
        assert_eq!(mission.path().len(), 3);
        assert_eq!(mission.graph().size(), 3);
        assert!(mission.obstacles().is_empty());
    }

    #[test]
    fn test_invalid_parameters_surface_before_search() {
        let mut bad = params(vec![]);
        bad.grid_size = -1;
        assert!(matches!(
            Mission::plan(&bad),
            Err(SimulatorError::Domain(DomainError::InvalidGridSize { size: -1 }))
        ));

        let mut bad = params(vec![]);
        bad.target = Position::new(0, 3, 0);
        let err = Mission::plan(&bad).unwrap_err();
        assert!(matches!(err, SimulatorError::Domain(ref e) if e.is_invalid_parameter()));
    }

    #[test]
    fn test_obstacle_graph_lists_neighbors() {
        let mission = Mission::plan(&params(vec![
            Position::new(1, 1, 1),
            Position::new(0, 0, 2),
        ]))
        .unwrap();

        let graph = mission.obstacle_graph();
        assert_eq!(graph.len(), 2);
        assert_eq!(graph[0].0, Position::new(0, 0, 2));
        assert_eq!(graph[0].1.len(), 3);
        assert_eq!(graph[1].0, Position::new(1, 1, 1));
        assert_eq!(graph[1].1.len(), 6);
    }

    #[test]
    fn test_simulator_rejects_bad_config() {
        let mission = Mission::plan(&params(vec![])).unwrap();
        let config = SimulationConfig {
            initial_battery: -5.0,
            battery_cost_per_step: 0.2,
        };
        assert!(matches!(
            mission.simulator(&config),
            Err(SimulatorError::Config(_))
        ));
    }

    #[test]
    fn test_params_from_json() {
        let json = r#"{
            "grid_size": 4,
            "start": {"x": 0, "y": 0, "z": 0},
            "target": {"x": 3, "y": 3, "z": 3},
            "obstacles": [{"x": 1, "y": 0, "z": 0}]
        }"#;
        let params = MissionParams::from_json_str(json).unwrap();
        assert_eq!(params.grid_size, 4);
        assert_eq!(params.target, Position::new(3, 3, 3));
        assert_eq!(params.obstacles, vec![Position::new(1, 0, 0)]);

        let no_obstacles = r#"{"grid_size": 2, "start": {"x": 0, "y": 0, "z": 0}, "target": {"x": 1, "y": 0, "z": 0}}"#;
        assert!(MissionParams::from_json_str(no_obstacles).unwrap().obstacles.is_empty());

        assert!(matches!(
            MissionParams::from_json_str("{not json"),
            Err(SimulatorError::Json(_))
        ));
    }

    #[test]
    fn test_params_from_file() {
        let expected = params(vec![Position::new(1, 1, 0)]);
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&expected).unwrap().as_bytes())
            .unwrap();

        let loaded = MissionParams::from_json_file(file.path()).unwrap();
        assert_eq!(loaded, expected);

        assert!(matches!(
            MissionParams::from_json_file("/nonexistent/scenario.json"),
            Err(SimulatorError::Io(_))
        ));
    }
}
