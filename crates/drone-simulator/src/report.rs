//! Report generation for a finished traversal.

use crate::error::Result;
use crate::mission::Mission;
use crate::observation::Observation;
use crate::traversal::{Outcome, TraversalSimulator};
use drone_domain::Position;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Obstacle cell with its grid neighbors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleNode {
    pub obstacle: Position,
    pub neighbors: Vec<Position>,
}

/// Everything a presentation layer may render about a mission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub mission_id: Uuid,
    pub generated_at: String,
    pub grid_size: i32,
    pub start: Position,
    pub target: Position,
    pub outcome: Option<Outcome>,
    pub planned_path: Vec<Position>,
    pub distance_traveled: u32,
    pub battery_level: f64,
    pub elapsed_steps: u32,
    pub speed: f64,
    pub altitude_history: Vec<i32>,
    pub observations: Vec<Observation>,
    pub travel_log: Vec<Position>,
    pub obstacle_graph: Vec<ObstacleNode>,
}

impl SimulationReport {
    /// Capture the current state of `simulator` running `mission`.
    pub fn build(mission: &Mission, simulator: &TraversalSimulator) -> Self {
        let telemetry = simulator.telemetry();

        Self {
            mission_id: Uuid::new_v4(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            grid_size: mission.graph().size(),
            start: mission.start(),
            target: mission.target(),
            outcome: simulator.status(),
            planned_path: mission.path().waypoints().to_vec(),
            distance_traveled: telemetry.distance_traveled(),
            battery_level: telemetry.battery_level(),
            elapsed_steps: telemetry.elapsed_steps(),
            speed: telemetry.speed(),
            altitude_history: telemetry.altitude_history().to_vec(),
            observations: simulator.observations().to_vec(),
            travel_log: simulator.travel_log().to_vec(),
            obstacle_graph: mission
                .obstacle_graph()
                .into_iter()
                .map(|(obstacle, neighbors)| ObstacleNode {
                    obstacle,
                    neighbors,
                })
                .collect(),
        }
    }

    /// Generate report as JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Generate a plain-text report.
    pub fn to_text(&self) -> String {
        let outcome = self.outcome.map_or("IN PROGRESS", |o| o.as_str());

        let mut text = String::new();
        text.push_str(&format!("Mission {}\n", self.mission_id));
        text.push_str(&format!(
            "Grid: {0}x{0}x{0} | {1} -> {2} | Outcome: {3}\n",
            self.grid_size, self.start, self.target, outcome
        ));
        text.push_str(&format!("Distance Traveled: {} units\n", self.distance_traveled));
        text.push_str(&format!("Battery Level: {:.1}%\n", self.battery_level));
        text.push_str(&format!("Time taken: {} steps\n", self.elapsed_steps));
        text.push_str(&format!("Drone speed: {:.2} units/step\n", self.speed));

        text.push_str("\nAltitude Variations:\n");
        for (index, altitude) in self.altitude_history.iter().enumerate() {
            text.push_str(&format!("Index {index}: {altitude} units\n"));
        }

        text.push_str("\nPath Graph:\n");
        if self.obstacle_graph.is_empty() {
            text.push_str("No path graph found.\n");
        }
        for node in &self.obstacle_graph {
            let neighbors: Vec<String> = node.neighbors.iter().map(ToString::to_string).collect();
            text.push_str(&format!("Node {}: [{}]\n", node.obstacle, neighbors.join(", ")));
        }

        if !self.observations.is_empty() {
            text.push_str("\nObservations:\n");
            for observation in &self.observations {
                text.push_str(&format!("{}\n", observation.description));
            }
        }

        text.push_str("\nPath Followed:\n");
        for position in &self.travel_log {
            text.push_str(&format!("{position}\n"));
        }

        text
    }
}
