// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Great-circle distance and unit-system handling.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unit system for distances, elevations, and speeds.
///
/// All engine math is unit-agnostic; this enum picks the Earth radius for
/// the Haversine formula and the elevation conversion from GPX meters, so
/// every output of one deployment is in a single consistent system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Miles, feet, miles per hour.
    #[default]
    Imperial,
    /// Kilometers, meters, kilometers per hour.
    Metric,
}

impl UnitSystem {
    /// Mean Earth radius in the system's distance unit.
    pub fn earth_radius(self) -> f64 {
        match self {
            UnitSystem::Imperial => 3959.87433,
            UnitSystem::Metric => 6371.0088,
        }
    }

    /// Convert a GPX elevation (always meters) into the system's elevation unit.
    pub fn elevation_from_meters(self, meters: f64) -> f64 {
        match self {
            UnitSystem::Imperial => meters * 3.28084,
            UnitSystem::Metric => meters,
        }
    }

    pub fn distance_label(self) -> &'static str {
        match self {
            UnitSystem::Imperial => "mi",
            UnitSystem::Metric => "km",
        }
    }

    pub fn elevation_label(self) -> &'static str {
        match self {
            UnitSystem::Imperial => "ft",
            UnitSystem::Metric => "m",
        }
    }

    pub fn speed_label(self) -> &'static str {
        match self {
            UnitSystem::Imperial => "mph",
            UnitSystem::Metric => "km/h",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Imperial => write!(f, "imperial"),
            UnitSystem::Metric => write!(f, "metric"),
        }
    }
}

impl FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "imperial" => Ok(UnitSystem::Imperial),
            "metric" => Ok(UnitSystem::Metric),
            other => Err(format!(
                "unknown unit system '{other}' (expected 'imperial' or 'metric')"
            )),
        }
    }
}

/// Great-circle distance between two coordinates using the Haversine formula.
///
/// Inputs are raw degree values; range validation is the caller's concern.
/// The central angle uses the atan2 form for numerical stability near
/// antipodal points. Identical coordinates return 0.
pub fn haversine_distance(units: UnitSystem, lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    units.earth_radius() * c
}
