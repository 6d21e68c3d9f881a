//! # Simulator Configuration
//!
//! Environment-based configuration for the traversal simulator. Command-line
//! flags override anything read here.

use crate::error::{Result, SimulatorError};
use serde::{Deserialize, Serialize};
use std::env;

/// Battery charge at mission start.
pub const DEFAULT_INITIAL_BATTERY: f64 = 100.0;

/// Battery units drained by every step.
pub const DEFAULT_BATTERY_COST: f64 = 0.2;

/// Process configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Battery model
    pub simulation: SimulationConfig,

    /// Delay between rendered steps, in milliseconds (0 = no pacing)
    pub tick_ms: u64,

    /// Logging level
    pub log_level: String,
}

/// Battery model for a single traversal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub initial_battery: f64,
    pub battery_cost_per_step: f64,
}

impl SimulationConfig {
    /// Reject values that would break the non-increasing battery invariant.
    pub fn validate(&self) -> Result<()> {
        if !self.initial_battery.is_finite() || self.initial_battery <= 0.0 {
            return Err(SimulatorError::Config(format!(
                "initial battery must be a positive number, got {}",
                self.initial_battery
            )));
        }
        if !self.battery_cost_per_step.is_finite() || self.battery_cost_per_step < 0.0 {
            return Err(SimulatorError::Config(format!(
                "battery cost per step must be non-negative, got {}",
                self.battery_cost_per_step
            )));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_battery: DEFAULT_INITIAL_BATTERY,
            battery_cost_per_step: DEFAULT_BATTERY_COST,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            simulation: SimulationConfig {
                initial_battery: lookup("DRONE_INITIAL_BATTERY")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_INITIAL_BATTERY),
                battery_cost_per_step: lookup("DRONE_BATTERY_COST")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_BATTERY_COST),
            },

            tick_ms: lookup("DRONE_TICK_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),

            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.simulation, SimulationConfig::default());
        assert_eq!(config.tick_ms, 0);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_overrides_from_lookup() {
        let config = Config::from_lookup(lookup_from(&[
            ("DRONE_INITIAL_BATTERY", "50"),
            ("DRONE_BATTERY_COST", "0.5"),
            ("DRONE_TICK_MS", "250"),
            ("LOG_LEVEL", "debug"),
        ]));
        assert!((config.simulation.initial_battery - 50.0).abs() < f64::EPSILON);
        assert!((config.simulation.battery_cost_per_step - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.tick_ms, 250);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("DRONE_INITIAL_BATTERY", "full"),
            ("DRONE_TICK_MS", "-1"),
        ]));
        assert!((config.simulation.initial_battery - DEFAULT_INITIAL_BATTERY).abs() < f64::EPSILON);
        assert_eq!(config.tick_ms, 0);
    }

    #[test]
    fn test_validate() {
        assert!(SimulationConfig::default().validate().is_ok());

        let drained = SimulationConfig {
            initial_battery: 0.0,
            ..SimulationConfig::default()
        };
        assert!(matches!(drained.validate(), Err(SimulatorError::Config(_))));

        let charging = SimulationConfig {
            battery_cost_per_step: -0.1,
            ..SimulationConfig::default()
        };
        assert!(charging.validate().is_err());

        let nan = SimulationConfig {
            initial_battery: f64::NAN,
            ..SimulationConfig::default()
        };
        assert!(nan.validate().is_err());
    }
}
