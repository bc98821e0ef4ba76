// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Waypoint model: one timestamped GPS sample.

use serde::{Deserialize, Serialize};

/// A single GPS sample belonging to a ride.
///
/// Created by the ingress boundary (request body or file parser) and
/// consumed immutably by the summary calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Degrees, -90 to 90
    pub latitude: f64,
    /// Degrees, -180 to 180
    pub longitude: f64,
    /// Elevation in the deployment's unit (feet for imperial)
    pub elevation: f64,
    /// ISO-8601 timestamp, at least 1-second resolution
    pub timestamp: String,
}
