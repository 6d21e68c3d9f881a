//! Derived flight telemetry for a traversal.

use crate::config::SimulationConfig;
use drone_domain::Position;
use serde::{Deserialize, Serialize};

/// Telemetry snapshot handed to tick observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub step: u32,
    pub position: Position,
    pub distance_traveled: u32,
    pub battery_level: f64,
    pub speed: f64,
}

/// Running telemetry for a single drone.
///
/// Battery is derived from the step count rather than decremented in place,
/// so repeated reads never accumulate floating-point drift.
#[derive(Debug, Clone, PartialEq)]
pub struct Telemetry {
    distance_traveled: u32,
    elapsed_steps: u32,
    initial_battery: f64,
    battery_cost_per_step: f64,
    speed: f64,
    altitude_history: Vec<i32>,
}

impl Telemetry {
    /// Start tracking from `start`, seeding the altitude history.
    pub fn new(start: Position, config: &SimulationConfig) -> Self {
        Self {
            distance_traveled: 0,
            elapsed_steps: 0,
            initial_battery: config.initial_battery,
            battery_cost_per_step: config.battery_cost_per_step,
            speed: 0.0,
            altitude_history: vec![start.altitude()],
        }
    }

    /// Account for one completed move of `distance` units ending at `altitude`.
    pub fn record_step(&mut self, distance: u32, altitude: i32) {
        self.distance_traveled += distance;
        self.elapsed_steps += 1;
        self.altitude_history.push(altitude);
        self.speed = f64::from(self.distance_traveled) / f64::from(self.elapsed_steps);
    }

    pub const fn distance_traveled(&self) -> u32 {
        self.distance_traveled
    }

    pub const fn elapsed_steps(&self) -> u32 {
        self.elapsed_steps
    }

    /// Remaining charge: initial charge minus the per-step cost of every step.
    pub fn battery_level(&self) -> f64 {
        self.initial_battery - self.battery_cost_per_step * f64::from(self.elapsed_steps)
    }

    pub fn is_depleted(&self) -> bool {
        self.battery_level() <= 0.0
    }

    /// Average distance per step so far; zero before the first step.
    pub const fn speed(&self) -> f64 {
        self.speed
    }

    pub fn altitude_history(&self) -> &[i32] {
        &self.altitude_history
    }

    pub fn snapshot(&self, position: Position) -> TelemetrySnapshot {
        TelemetrySnapshot {
            step: self.elapsed_steps,
            position,
            distance_traveled: self.distance_traveled,
            battery_level: self.battery_level(),
            speed: self.speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_telemetry() {
        let telemetry = Telemetry::new(Position::new(0, 0, 2), &SimulationConfig::default());
        assert_eq!(telemetry.elapsed_steps(), 0);
        assert_eq!(telemetry.distance_traveled(), 0);
        assert!((telemetry.battery_level() - 100.0).abs() < 1e-9);
        assert!(telemetry.speed().abs() < f64::EPSILON);
        assert_eq!(telemetry.altitude_history(), &[2]);
    }

    #[test]
    fn test_record_step_updates_everything() {
        let mut telemetry = Telemetry::new(Position::new(0, 0, 0), &SimulationConfig::default());
        telemetry.record_step(1, 1);
        telemetry.record_step(3, 2);

        assert_eq!(telemetry.distance_traveled(), 4);
        assert_eq!(telemetry.elapsed_steps(), 2);
        assert!((telemetry.speed() - 2.0).abs() < 1e-9);
        assert!((telemetry.battery_level() - 99.6).abs() < 1e-9);
        assert_eq!(telemetry.altitude_history(), &[0, 1, 2]);
    }

    #[test]
    fn test_battery_does_not_drift() {
        let mut telemetry = Telemetry::new(Position::new(0, 0, 0), &SimulationConfig::default());
        for steps in 1..=500_u32 {
            telemetry.record_step(1, 0);
            let expected = 100.0 - 0.2 * f64::from(steps);
            assert!((telemetry.battery_level() - expected).abs() < 1e-9);
        }
        assert!(telemetry.is_depleted());
    }

    #[test]
    fn test_snapshot() {
        let mut telemetry = Telemetry::new(Position::new(0, 0, 0), &SimulationConfig::default());
        telemetry.record_step(1, 0);
        let snapshot = telemetry.snapshot(Position::new(1, 0, 0));
        assert_eq!(snapshot.step, 1);
        assert_eq!(snapshot.position, Position::new(1, 0, 0));
        assert_eq!(snapshot.distance_traveled, 1);
        assert!((snapshot.speed - 1.0).abs() < 1e-9);
    }
}
