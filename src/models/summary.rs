// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Derived ride summary metrics.

use serde::{Deserialize, Serialize};

/// Computed metrics for one ride.
///
/// Produced once by the summary calculator and never mutated. Numeric
/// fields are already rounded for presentation (distance 2 dp, elevation
/// gain 1 dp, speeds 1 dp).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideSummary {
    /// Sum of consecutive great-circle segment distances
    pub total_distance: f64,
    /// Sum of positive consecutive elevation deltas only
    pub total_elevation_gain: f64,
    pub average_speed: f64,
    pub max_speed: f64,
    /// `HH:MM:SS`, hours may exceed 24
    pub elapsed_time: String,
}
