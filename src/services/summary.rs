// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ride summary calculation engine.
//!
//! Turns an irregularly-sampled waypoint sequence into ride statistics:
//! 1. Validate coordinates and timestamps (fail-fast)
//! 2. Establish chronological order per the configured policy
//! 3. Walk consecutive pairs accumulating distance, elevation gain, and
//!    per-segment speed samples
//! 4. Aggregate speeds per the configured mode and round for presentation
//!
//! The calculator is a pure function of its input plus configuration; the
//! only state (the plausibility filter's last accepted speed) is scoped to
//! a single invocation.

use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::error::{CoordinateField, ValidationError};
use crate::geo::{haversine_distance, UnitSystem};
use crate::models::{RideSummary, Waypoint};
use crate::time_utils::{format_elapsed, parse_timestamp};

/// Segments spanning less than this produce no speed sample.
/// Timestamps have 1-second resolution; anything shorter divides by noise.
const MIN_SEGMENT_SECONDS: f64 = 1.0;

/// How per-segment speeds fold into the summary's average and max.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeedAggregation {
    /// Average = arithmetic mean of recorded segment speeds; max = literal
    /// maximum. An empty speed list is replaced by a single synthetic 0.
    #[default]
    MeanMax,
    /// Average = total distance / elapsed hours (ride-level); max = the
    /// sorted speed list at index `floor(0.95 * N)`, a spike-resistant
    /// proxy for the true maximum.
    Percentile95,
}

impl FromStr for SpeedAggregation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mean_max" => Ok(SpeedAggregation::MeanMax),
            "percentile95" => Ok(SpeedAggregation::Percentile95),
            other => Err(format!(
                "unknown speed aggregation '{other}' (expected 'mean_max' or 'percentile95')"
            )),
        }
    }
}

/// What to do when waypoints do not arrive in chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChronologyPolicy {
    /// Reject unsorted input with `ValidationError::NonChronological`.
    #[default]
    RequireSorted,
    /// Sort defensively by timestamp (stable, so equal timestamps keep
    /// their input order).
    Resort,
}

impl FromStr for ChronologyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "require_sorted" => Ok(ChronologyPolicy::RequireSorted),
            "resort" => Ok(ChronologyPolicy::Resort),
            other => Err(format!(
                "unknown chronology policy '{other}' (expected 'require_sorted' or 'resort')"
            )),
        }
    }
}

/// Thresholds for the speed plausibility filter.
#[derive(Debug, Clone)]
pub struct SpeedFilterConfig {
    /// Ceiling on any single reading, units/hour
    pub max_reasonable_speed: f64,
    /// Largest allowed jump from the last accepted reading, units/hour
    pub max_acceleration: f64,
}

impl Default for SpeedFilterConfig {
    fn default() -> Self {
        Self {
            max_reasonable_speed: 45.0,
            max_acceleration: 10.0,
        }
    }
}

/// Stateful outlier filter for per-segment speeds.
///
/// A single GPS glitch reports an implausible jump; rejecting it keeps the
/// max-speed statistic honest. The reference speed only advances on
/// accepted readings, so one spike cannot drag the baseline with it.
#[derive(Debug, Clone)]
pub struct SpeedFilter {
    config: SpeedFilterConfig,
    last_valid_speed: f64,
}

impl SpeedFilter {
    pub fn new(config: SpeedFilterConfig) -> Self {
        Self {
            config,
            last_valid_speed: 0.0,
        }
    }

    /// Classify a candidate speed. Accepted speeds become the new reference.
    pub fn accept(&mut self, speed: f64) -> bool {
        if speed < 0.0 || speed > self.config.max_reasonable_speed {
            return false;
        }
        if (speed - self.last_valid_speed).abs() > self.config.max_acceleration {
            return false;
        }
        self.last_valid_speed = speed;
        true
    }
}

/// Sum of strictly positive consecutive elevation deltas.
///
/// Descent is never banked against later ascent. Empty or single-element
/// input yields 0.
pub fn elevation_gain(elevations: &[f64]) -> f64 {
    elevations
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|delta| *delta > 0.0)
        .sum()
}

/// Instantaneous speed for one segment, or `None` when the time delta is
/// below the 1-second resolution floor (non-positive deltas included).
///
/// A skipped sample never discards distance; callers accumulate distance
/// independently.
pub fn segment_speed(distance: f64, start: DateTime<Utc>, end: DateTime<Utc>) -> Option<f64> {
    let seconds = (end - start).num_milliseconds() as f64 / 1000.0;
    if seconds < MIN_SEGMENT_SECONDS {
        return None;
    }
    Some(distance / (seconds / 3600.0))
}

/// The 95th-percentile speed: sort ascending, pick index `floor(0.95 * N)`.
///
/// A direct index pick, not interpolated; for small N this equals the true
/// maximum, for larger N it sits just below it, suppressing single-sample
/// spikes. Returns `None` for an empty list.
pub fn percentile_95(speeds: &[f64]) -> Option<f64> {
    if speeds.is_empty() {
        return None;
    }
    let mut sorted = speeds.to_vec();
    sorted.sort_by(f64::total_cmp);
    let idx = ((sorted.len() as f64) * 0.95).floor() as usize;
    Some(sorted[idx.min(sorted.len() - 1)])
}

/// Round half away from zero to a fixed number of decimal places.
/// Presentation-only; applied once at the end, never during accumulation.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Calculator configuration, fixed per deployment.
#[derive(Debug, Clone, Default)]
pub struct CalculatorConfig {
    pub units: UnitSystem,
    pub aggregation: SpeedAggregation,
    pub chronology: ChronologyPolicy,
    /// Plausibility filter for speed samples; `None` records every sample.
    pub filter: Option<SpeedFilterConfig>,
}

/// The ride summary calculator.
///
/// Stateless across invocations and safe to call concurrently; each
/// `calculate` is an independent linear pass over its input.
#[derive(Debug, Clone, Default)]
pub struct SummaryCalculator {
    config: CalculatorConfig,
}

impl SummaryCalculator {
    pub fn new(config: CalculatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Compute the summary for a waypoint sequence.
    pub fn calculate(&self, waypoints: &[Waypoint]) -> Result<RideSummary, ValidationError> {
        if waypoints.is_empty() {
            return Err(ValidationError::EmptyInput);
        }

        for waypoint in waypoints {
            validate_coordinates(waypoint)?;
        }

        let mut times = Vec::with_capacity(waypoints.len());
        for waypoint in waypoints {
            let time = parse_timestamp(&waypoint.timestamp).map_err(|e| {
                ValidationError::InvalidTimestamp {
                    raw: waypoint.timestamp.clone(),
                    reason: e.to_string(),
                }
            })?;
            times.push(time);
        }

        // Establish the chronological processing order without touching the
        // caller's (immutable) waypoint list.
        let mut order: Vec<usize> = (0..waypoints.len()).collect();
        match self.config.chronology {
            ChronologyPolicy::RequireSorted => {
                if times.windows(2).any(|w| w[1] < w[0]) {
                    return Err(ValidationError::NonChronological);
                }
            }
            ChronologyPolicy::Resort => order.sort_by_key(|&i| times[i]),
        }

        let elapsed_seconds = (times[order[order.len() - 1]] - times[order[0]]).num_seconds();
        let elapsed_time = format_elapsed(elapsed_seconds);

        // A lone waypoint has no segments; everything but elapsed time is 0.
        if waypoints.len() == 1 {
            return Ok(RideSummary {
                total_distance: 0.0,
                total_elevation_gain: 0.0,
                average_speed: 0.0,
                max_speed: 0.0,
                elapsed_time,
            });
        }

        let mut total_distance = 0.0;
        let mut total_elevation_gain = 0.0;
        let mut speeds: Vec<f64> = Vec::new();
        let mut filter = self.config.filter.clone().map(SpeedFilter::new);

        for pair in order.windows(2) {
            let prev = &waypoints[pair[0]];
            let curr = &waypoints[pair[1]];

            let distance = haversine_distance(
                self.config.units,
                prev.latitude,
                prev.longitude,
                curr.latitude,
                curr.longitude,
            );
            total_distance += distance;

            let climb = curr.elevation - prev.elevation;
            if climb > 0.0 {
                total_elevation_gain += climb;
            }

            if let Some(speed) = segment_speed(distance, times[pair[0]], times[pair[1]]) {
                let keep = match filter.as_mut() {
                    Some(f) => f.accept(speed),
                    None => true,
                };
                if keep {
                    speeds.push(speed);
                }
            }
        }

        let (average_speed, max_speed) = match self.config.aggregation {
            SpeedAggregation::MeanMax => {
                if speeds.is_empty() {
                    // All waypoints within one second: keep mean/max defined.
                    speeds.push(0.0);
                }
                let mean = speeds.iter().sum::<f64>() / speeds.len() as f64;
                let max = speeds.iter().copied().fold(0.0_f64, f64::max);
                (mean, max)
            }
            SpeedAggregation::Percentile95 => {
                let elapsed_hours = elapsed_seconds as f64 / 3600.0;
                let average = if elapsed_hours > 0.0 {
                    total_distance / elapsed_hours
                } else {
                    0.0
                };
                (average, percentile_95(&speeds).unwrap_or(0.0))
            }
        };

        Ok(RideSummary {
            total_distance: round_to(total_distance, 2),
            total_elevation_gain: round_to(total_elevation_gain, 1),
            average_speed: round_to(average_speed, 1),
            max_speed: round_to(max_speed, 1),
            elapsed_time,
        })
    }
}

fn validate_coordinates(waypoint: &Waypoint) -> Result<(), ValidationError> {
    if !(-90.0..=90.0).contains(&waypoint.latitude) {
        return Err(ValidationError::InvalidCoordinate {
            field: CoordinateField::Latitude,
            value: waypoint.latitude,
        });
    }
    if !(-180.0..=180.0).contains(&waypoint.longitude) {
        return Err(ValidationError::InvalidCoordinate {
            field: CoordinateField::Longitude,
            value: waypoint.longitude,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elevation_gain_counts_only_ascents() {
        // 100 -> 90 contributes nothing; 90 -> 110 contributes 20
        assert_eq!(elevation_gain(&[100.0, 90.0, 110.0]), 20.0);
    }

    #[test]
    fn test_elevation_gain_degenerate_inputs() {
        assert_eq!(elevation_gain(&[]), 0.0);
        assert_eq!(elevation_gain(&[500.0]), 0.0);
        assert_eq!(elevation_gain(&[500.0, 500.0]), 0.0);
    }

    #[test]
    fn test_speed_filter_rejects_ceiling_and_jumps() {
        let mut filter = SpeedFilter::new(SpeedFilterConfig::default());
        assert!(filter.accept(8.0));
        assert!(filter.accept(12.0));
        // GPS glitch: 100 units/h between normal readings
        assert!(!filter.accept(100.0));
        // Reference speed was retained, so a normal reading still passes
        assert!(filter.accept(10.0));
        assert!(!filter.accept(-1.0));
    }

    #[test]
    fn test_speed_filter_initial_reference_is_zero() {
        let mut filter = SpeedFilter::new(SpeedFilterConfig::default());
        // First reading must be within max_acceleration of 0
        assert!(!filter.accept(25.0));
        assert!(filter.accept(9.0));
    }

    #[test]
    fn test_segment_speed_resolution_floor() {
        let t0 = parse_timestamp("2024-03-15T10:00:00Z").unwrap();
        let t1 = parse_timestamp("2024-03-15T10:00:01Z").unwrap();
        // Zero and negative deltas produce no sample
        assert_eq!(segment_speed(1.0, t0, t0), None);
        assert_eq!(segment_speed(1.0, t1, t0), None);
        // Exactly one second is kept: 1 unit over 1/3600 h
        assert_eq!(segment_speed(1.0, t0, t1), Some(3600.0));
    }

    #[test]
    fn test_percentile_95_small_lists_pick_max() {
        let speeds: Vec<f64> = (1..=10).map(f64::from).collect();
        assert_eq!(percentile_95(&speeds), Some(10.0));
    }

    #[test]
    fn test_percentile_95_suppresses_spike() {
        // 21 samples: floor(21 * 0.95) = 19, the second largest
        let speeds: Vec<f64> = (1..=21).map(f64::from).collect();
        assert_eq!(percentile_95(&speeds), Some(20.0));
    }

    #[test]
    fn test_percentile_95_empty() {
        assert_eq!(percentile_95(&[]), None);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(2.666, 1), 2.7);
        assert_eq!(round_to(8.288, 2), 8.29);
        assert_eq!(round_to(0.0, 1), 0.0);
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!(
            "percentile95".parse::<SpeedAggregation>().unwrap(),
            SpeedAggregation::Percentile95
        );
        assert!("p95".parse::<SpeedAggregation>().is_err());
        assert_eq!(
            "resort".parse::<ChronologyPolicy>().unwrap(),
            ChronologyPolicy::Resort
        );
        assert!("sorted".parse::<ChronologyPolicy>().is_err());
    }
}
