//! Stepwise traversal of a planned route.

use crate::config::SimulationConfig;
use crate::observation::ObservationLog;
use crate::telemetry::{Telemetry, TelemetrySnapshot};
use crate::travel_log::TravelLog;
use drone_domain::{ObstacleIndex, Position};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// How a traversal ended. None of these are failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    /// Reached the target.
    Arrived,
    /// Battery ran out first.
    Depleted,
    /// Route exhausted short of the target.
    Stalled,
}

impl Outcome {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Arrived => "ARRIVED",
            Self::Depleted => "DEPLETED",
            Self::Stalled => "STALLED",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a single call to [`TraversalSimulator::step`].
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Moved(TelemetrySnapshot),
    Finished(Outcome),
}

/// Drone traversal simulator.
pub struct TraversalSimulator {
    position: Position,
    target: Position,
    remaining: VecDeque<Position>,
    obstacles: Arc<ObstacleIndex>,
    telemetry: Telemetry,
    observations: ObservationLog,
    travel_log: TravelLog,
}

impl TraversalSimulator {
    /// Create a simulator at `start` that will follow `path`.
    ///
    /// A leading waypoint equal to `start` is dropped since the drone is
    /// already there.
    pub fn new(
        start: Position,
        target: Position,
        path: Vec<Position>,
        obstacles: Arc<ObstacleIndex>,
        config: &SimulationConfig,
    ) -> Self {
        let mut remaining = VecDeque::from(path);
        if remaining.front() == Some(&start) {
            remaining.pop_front();
        }

        Self {
            position: start,
            target,
            remaining,
            obstacles,
            telemetry: Telemetry::new(start, config),
            observations: ObservationLog::new(),
            travel_log: TravelLog::seed(start),
        }
    }

    /// Terminal state, if the traversal cannot advance any further.
    pub fn status(&self) -> Option<Outcome> {
        if self.position == self.target {
            Some(Outcome::Arrived)
        } else if self.telemetry.is_depleted() {
            Some(Outcome::Depleted)
        } else if self.remaining.is_empty() {
            Some(Outcome::Stalled)
        } else {
            None
        }
    }

    /// Advance one waypoint.
    pub fn step(&mut self) -> StepOutcome {
        if let Some(outcome) = self.status() {
            return StepOutcome::Finished(outcome);
        }
        let Some(next) = self.remaining.pop_front() else {
            return StepOutcome::Finished(Outcome::Stalled);
        };

        let distance = self.position.manhattan_distance(&next);
        self.position = next;
        self.telemetry.record_step(distance, next.altitude());

        if self.obstacles.contains(&next) {
            self.observations.capture(next);
            debug!(position = %next, "Obstacle observed");
        }
        self.travel_log.append(next);

        let snapshot = self.telemetry.snapshot(next);
        debug!(
            step = snapshot.step,
            position = %next,
            battery = snapshot.battery_level,
            "Step"
        );
        StepOutcome::Moved(snapshot)
    }

    /// Step until a terminal state is reached.
    pub fn simulate(&mut self) -> Outcome {
        self.simulate_with(|_| {})
    }

    /// Step until a terminal state is reached, calling `on_tick` after every
    /// move. Pacing, if any, belongs to the callback.
    pub fn simulate_with<F>(&mut self, mut on_tick: F) -> Outcome
    where
        F: FnMut(&TelemetrySnapshot),
    {
        loop {
            match self.step() {
                StepOutcome::Moved(snapshot) => on_tick(&snapshot),
                StepOutcome::Finished(outcome) => {
                    self.log_outcome(outcome);
                    return outcome;
                }
            }
        }
    }

    /// Step until a terminal state is reached, sleeping `tick` between moves.
    pub async fn simulate_paced(&mut self, tick: Duration) -> Outcome {
        loop {
            match self.step() {
                StepOutcome::Moved(snapshot) => {
                    info!(
                        "Step {} | {} | Distance: {} | Battery: {:.1}% | Speed: {:.2}",
                        snapshot.step,
                        snapshot.position,
                        snapshot.distance_traveled,
                        snapshot.battery_level,
                        snapshot.speed
                    );
                    if !tick.is_zero() {
                        tokio::time::sleep(tick).await;
                    }
                }
                StepOutcome::Finished(outcome) => {
                    self.log_outcome(outcome);
                    return outcome;
                }
            }
        }
    }

    fn log_outcome(&self, outcome: Outcome) {
        match outcome {
            Outcome::Stalled => warn!(
                position = %self.position,
                target = %self.target,
                steps = self.telemetry.elapsed_steps(),
                "Traversal stalled"
            ),
            _ => info!(
                %outcome,
                position = %self.position,
                steps = self.telemetry.elapsed_steps(),
                battery = self.telemetry.battery_level(),
                "Traversal finished"
            ),
        }
    }

    pub const fn position(&self) -> Position {
        self.position
    }

    pub const fn target(&self) -> Position {
        self.target
    }

    /// Planned waypoints not yet visited.
    pub fn remaining_waypoints(&self) -> impl Iterator<Item = &Position> {
        self.remaining.iter()
    }

    pub const fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    pub const fn observations(&self) -> &ObservationLog {
        &self.observations
    }

    pub const fn travel_log(&self) -> &TravelLog {
        &self.travel_log
    }
}
