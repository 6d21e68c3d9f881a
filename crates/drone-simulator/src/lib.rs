//! # Drone Simulator
//!
//! Shortest-path planning and stepwise traversal for a drone on a 3D grid.
//!
//! ## Features
//!
//! - Dijkstra planning over a 6-connected lattice with obstacle filtering
//! - Stepwise traversal with distance, battery, speed and altitude telemetry
//! - Obstacle observations and an append-only travel log
//! - JSON and text reports, seeded random obstacle scenarios

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod mission;
pub mod observation;
pub mod planner;
pub mod report;
pub mod scenario;
pub mod telemetry;
pub mod travel_log;
pub mod traversal;

pub use config::{Config, SimulationConfig};
pub use error::SimulatorError;
pub use mission::{Mission, MissionParams};
pub use planner::{PathPlanner, PlannedPath, plan};
pub use report::SimulationReport;
pub use traversal::{Outcome, StepOutcome, TraversalSimulator};
