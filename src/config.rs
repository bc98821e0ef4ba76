//! Application configuration loaded from environment variables.
//!
//! Everything has a sensible default so a bare `cargo run` works; invalid
//! values fail at startup rather than being silently replaced.

use std::env;
use std::str::FromStr;

use crate::geo::UnitSystem;
use crate::services::{ChronologyPolicy, SpeedAggregation};

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Unit system for distances, elevations, and speeds
    pub units: UnitSystem,
    /// How per-segment speeds aggregate into the summary
    pub aggregation: SpeedAggregation,
    /// Whether unsorted waypoint uploads are rejected or re-sorted
    pub chronology: ChronologyPolicy,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            units: UnitSystem::Imperial,
            aggregation: SpeedAggregation::MeanMax,
            chronology: ChronologyPolicy::RequireSorted,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            units: parse_var("UNITS", UnitSystem::Imperial)?,
            aggregation: parse_var("SPEED_AGGREGATION", SpeedAggregation::MeanMax)?,
            chronology: parse_var("CHRONOLOGY_POLICY", ChronologyPolicy::RequireSorted)?,
        })
    }

    /// Calculator configuration for the service deployment.
    ///
    /// The plausibility filter stays off here: uploads are device exports,
    /// and the filter belongs to the raw-GPX converter pipeline.
    pub fn calculator_config(&self) -> crate::services::CalculatorConfig {
        crate::services::CalculatorConfig {
            units: self.units,
            aggregation: self.aggregation,
            chronology: self.chronology,
            filter: None,
        }
    }
}

/// Parse an optional environment variable, defaulting when unset and
/// failing loudly when set to an unrecognized value.
fn parse_var<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr<Err = String>,
{
    match env::var(name) {
        Ok(raw) => raw.parse().map_err(|reason| ConfigError::Invalid {
            name,
            reason,
        }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {reason}")]
    Invalid {
        name: &'static str,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.units, UnitSystem::Imperial);
        assert_eq!(config.aggregation, SpeedAggregation::MeanMax);
        assert_eq!(config.chronology, ChronologyPolicy::RequireSorted);
    }

    // Single test because the process environment is shared across threads.
    #[test]
    fn test_config_from_env() {
        env::set_var("UNITS", "metric");
        env::set_var("SPEED_AGGREGATION", "percentile95");
        env::set_var("CHRONOLOGY_POLICY", "resort");

        let config = Config::from_env().expect("Config should load");
        assert_eq!(config.units, UnitSystem::Metric);
        assert_eq!(config.aggregation, SpeedAggregation::Percentile95);
        assert_eq!(config.chronology, ChronologyPolicy::Resort);

        env::set_var("UNITS", "cubits");
        assert!(Config::from_env().is_err());

        env::remove_var("UNITS");
        env::remove_var("SPEED_AGGREGATION");
        env::remove_var("CHRONOLOGY_POLICY");
    }
}
