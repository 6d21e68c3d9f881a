//! Drone Grid Simulator CLI
//!
//! Plans a route through a 3D obstacle grid, flies it step by step and
//! prints the resulting report.

use anyhow::Result;
use clap::Parser;
use drone_domain::{GridGraph, Position};
use drone_simulator::scenario::random_obstacles;
use drone_simulator::{
    Config, Mission, MissionParams, SimulationConfig, SimulationReport, SimulatorError,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "drone-simulator")]
#[command(about = "Plan and simulate a drone flight through a 3D obstacle grid")]
struct Args {
    /// Cells per axis
    #[arg(short, long)]
    grid_size: Option<i32>,

    /// Start position as x,y,z
    #[arg(short, long)]
    start: Option<Position>,

    /// Target position as x,y,z
    #[arg(short, long)]
    target: Option<Position>,

    /// Obstacle position as x,y,z (repeatable)
    #[arg(short = 'o', long = "obstacle")]
    obstacles: Vec<Position>,

    /// Load grid, endpoints and obstacles from a JSON scenario file
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Scatter this many extra random obstacles
    #[arg(long, default_value = "0")]
    random_obstacles: usize,

    /// Seed for random obstacles
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Initial battery charge
    #[arg(long)]
    battery: Option<f64>,

    /// Battery drained per step
    #[arg(long)]
    battery_cost: Option<f64>,

    /// Delay between steps in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn mission_params(&self) -> Result<MissionParams, SimulatorError> {
        let mut params = match &self.scenario {
            Some(path) => MissionParams::from_json_file(path)?,
            None => MissionParams {
                grid_size: self.grid_size.ok_or_else(|| missing("--grid-size"))?,
                start: self.start.ok_or_else(|| missing("--start"))?,
                target: self.target.ok_or_else(|| missing("--target"))?,
                obstacles: Vec::new(),
            },
        };
        params.obstacles.extend(self.obstacles.iter().copied());

        if self.random_obstacles > 0 {
            let graph = GridGraph::new(params.grid_size)?;
            let mut exclude = vec![params.start, params.target];
            exclude.extend(params.obstacles.iter().copied());
            params.obstacles.extend(random_obstacles(
                &graph,
                self.random_obstacles,
                self.seed,
                &exclude,
            ));
        }

        Ok(params)
    }

    fn simulation_config(&self, base: SimulationConfig) -> SimulationConfig {
        SimulationConfig {
            initial_battery: self.battery.unwrap_or(base.initial_battery),
            battery_cost_per_step: self.battery_cost.unwrap_or(base.battery_cost_per_step),
        }
    }
}

fn missing(flag: &str) -> SimulatorError {
    SimulatorError::Scenario(format!("{flag} is required unless --scenario is given"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("drone_simulator={}", config.log_level).parse()?),
        )
        .init();

    let args = Args::parse();
    let params = args.mission_params()?;
    let simulation = args.simulation_config(config.simulation);
    let tick_ms = args.tick_ms.unwrap_or(config.tick_ms);

    info!(
        "Planning flight on {0}x{0}x{0} grid: {1} -> {2} ({3} obstacles)",
        params.grid_size,
        params.start,
        params.target,
        params.obstacles.len()
    );

    let mission = Mission::plan(&params)?;
    if !mission.is_reachable() {
        warn!("No route to target; the drone will not move");
    }

    let mut simulator = mission.simulator(&simulation)?;
    simulator
        .simulate_paced(Duration::from_millis(tick_ms))
        .await;

    let report = SimulationReport::build(&mission, &simulator);
    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.to_text());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["drone-simulator"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_random_obstacles_avoid_given_obstacles() {
        // 8 cells: start, target and one given obstacle leave 5 free.
        let args = args(&[
            "-g", "2", "-s", "0,0,0", "-t", "1,1,1", "-o", "1,0,0",
            "--random-obstacles", "5", "--seed", "3",
        ]);
        let params = args.mission_params().unwrap();

        let distinct: BTreeSet<Position> = params.obstacles.iter().copied().collect();
        assert_eq!(params.obstacles.len(), 6);
        assert_eq!(distinct.len(), 6);
        assert!(!distinct.contains(&params.start));
        assert!(!distinct.contains(&params.target));
    }

    #[test]
    fn test_endpoints_required_without_scenario() {
        let args = args(&["-g", "3", "-s", "0,0,0"]);
        assert!(matches!(
            args.mission_params(),
            Err(SimulatorError::Scenario(_))
        ));
    }

    #[test]
    fn test_flags_override_simulation_config() {
        let args = args(&["--battery", "10", "--battery-cost", "1"]);
        let config = args.simulation_config(SimulationConfig::default());
        assert!((config.initial_battery - 10.0).abs() < f64::EPSILON);
        assert!((config.battery_cost_per_step - 1.0).abs() < f64::EPSILON);
    }
}
