// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ride model for upload requests and storage.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::{RideSummary, Waypoint};
use crate::time_utils::parse_timestamp;

/// An uploaded ride: metadata plus its waypoint sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ride {
    pub name: String,
    /// ISO-8601
    pub start_time: String,
    /// ISO-8601, must not precede `start_time`
    pub end_time: String,
    /// Declared count, must equal `waypoints.len()`
    pub number_waypoints: usize,
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
}

impl Ride {
    /// Check ride-level invariants: declared waypoint count matches the
    /// actual list, both ride timestamps parse, and the time range is not
    /// inverted. Waypoint-level validation belongs to the calculator.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.waypoints.len() != self.number_waypoints {
            return Err(ValidationError::CountMismatch {
                declared: self.number_waypoints,
                actual: self.waypoints.len(),
            });
        }

        let start = parse_timestamp(&self.start_time).map_err(|e| {
            ValidationError::InvalidTimestamp {
                raw: self.start_time.clone(),
                reason: e.to_string(),
            }
        })?;
        let end =
            parse_timestamp(&self.end_time).map_err(|e| ValidationError::InvalidTimestamp {
                raw: self.end_time.clone(),
                reason: e.to_string(),
            })?;

        if end < start {
            return Err(ValidationError::EndBeforeStart {
                start: self.start_time.clone(),
                end: self.end_time.clone(),
            });
        }

        Ok(())
    }
}

/// A stored ride with its computed summary attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideWithSummary {
    #[serde(flatten)]
    pub ride: Ride,
    pub summary: RideSummary,
}
