// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GPX track to ride-document conversion.
//!
//! The batch pipeline: stream every track point through the normalizer,
//! accumulate distance per consecutive pair and elevation gain per segment,
//! collect plausibility-filtered speed samples across the whole file, then
//! finalize ride-level statistics in percentile mode.

use std::fs;
use std::io::BufReader;
use std::path::Path;

use chrono::{DateTime, Utc};
use gpx::Gpx;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::geo::{haversine_distance, UnitSystem};
use crate::services::summary::{
    elevation_gain, percentile_95, segment_speed, SpeedFilter, SpeedFilterConfig,
};
use crate::time_utils::{format_elapsed, format_utc_rfc3339, parse_timestamp};

/// One normalized point in the output document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub lat: f64,
    pub lon: f64,
    /// Converted to the configured elevation unit; 0 when the source point
    /// carried no elevation
    pub elevation: f64,
    /// RFC3339, absent when the source point carried no time
    pub timestamp: Option<String>,
}

/// The converter's output document.
///
/// Speed and elapsed fields are null when the track has no positive
/// duration to derive them from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RideDocument {
    pub name: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub number_waypoints: usize,
    pub total_distance: f64,
    pub total_elevation_gain: f64,
    pub average_speed: Option<f64>,
    pub max_speed: Option<f64>,
    pub elapsed_time: Option<String>,
    pub waypoints: Vec<TrackPoint>,
}

/// Errors from GPX conversion.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Failed to read {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Invalid GPX file: {0}")]
    Parse(String),

    #[error("Failed to serialize ride document: {0}")]
    Serialize(String),

    #[error("Failed to write {path}: {reason}")]
    Write { path: String, reason: String },
}

/// Convert a parsed GPX structure into a ride document.
///
/// Distance bridges every consecutive pair within a segment; segments are
/// independent (no distance or elevation delta across segment boundaries).
/// The speed plausibility filter carries its reference across segments so
/// a segment break does not reset outlier rejection.
pub fn convert_gpx(gpx: &Gpx, units: UnitSystem) -> RideDocument {
    let mut doc = RideDocument::default();
    let mut speeds: Vec<f64> = Vec::new();
    let mut filter = SpeedFilter::new(SpeedFilterConfig::default());

    let total_points: usize = gpx
        .tracks
        .iter()
        .flat_map(|t| &t.segments)
        .map(|s| s.points.len())
        .sum();
    let mut processed = 0usize;

    for track in &gpx.tracks {
        if let Some(name) = &track.name {
            doc.name = Some(name.clone());
        }

        for segment in &track.segments {
            let mut prev: Option<(f64, f64, Option<DateTime<Utc>>)> = None;
            let mut segment_elevations: Vec<f64> = Vec::new();

            for point in &segment.points {
                let lat = point.point().y();
                let lon = point.point().x();
                let time = point.time.and_then(to_utc);

                if let Some((prev_lat, prev_lon, prev_time)) = prev {
                    let distance = haversine_distance(units, prev_lat, prev_lon, lat, lon);
                    doc.total_distance += distance;

                    if let (Some(start), Some(end)) = (prev_time, time) {
                        if let Some(speed) = segment_speed(distance, start, end) {
                            if filter.accept(speed) {
                                speeds.push(speed);
                            }
                        }
                    }
                }

                if let Some(meters) = point.elevation {
                    segment_elevations.push(units.elevation_from_meters(meters));
                }

                doc.waypoints.push(TrackPoint {
                    lat,
                    lon,
                    elevation: point
                        .elevation
                        .map(|m| units.elevation_from_meters(m))
                        .unwrap_or(0.0),
                    timestamp: time.map(format_utc_rfc3339),
                });

                prev = Some((lat, lon, time));
                processed += 1;
                if total_points > 1000 && processed % 1000 == 0 {
                    tracing::debug!(processed, total_points, "Processing track points");
                }
            }

            doc.total_elevation_gain += elevation_gain(&segment_elevations);
        }
    }

    finalize_stats(&mut doc, &speeds);
    doc
}

/// Convert a GPX file on disk and write the JSON document next to it.
pub fn convert_file(
    input: &Path,
    output: &Path,
    units: UnitSystem,
) -> Result<RideDocument, ConvertError> {
    let file = fs::File::open(input).map_err(|e| ConvertError::Read {
        path: input.display().to_string(),
        reason: e.to_string(),
    })?;
    let gpx = gpx::read(BufReader::new(file)).map_err(|e| ConvertError::Parse(e.to_string()))?;

    let doc = convert_gpx(&gpx, units);

    let json =
        serde_json::to_string_pretty(&doc).map_err(|e| ConvertError::Serialize(e.to_string()))?;
    fs::write(output, json).map_err(|e| ConvertError::Write {
        path: output.display().to_string(),
        reason: e.to_string(),
    })?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        waypoints = doc.number_waypoints,
        "Converted GPX file"
    );
    Ok(doc)
}

/// Fill in the ride-level statistics once all points are streamed.
fn finalize_stats(doc: &mut RideDocument, speeds: &[f64]) {
    doc.number_waypoints = doc.waypoints.len();
    let (Some(first), Some(last)) = (doc.waypoints.first(), doc.waypoints.last()) else {
        return;
    };
    doc.start_time = first.timestamp.clone();
    doc.end_time = last.timestamp.clone();

    let (Some(start_raw), Some(end_raw)) = (&doc.start_time, &doc.end_time) else {
        return;
    };
    let (Ok(start), Ok(end)) = (parse_timestamp(start_raw), parse_timestamp(end_raw)) else {
        return;
    };

    let elapsed_seconds = (end - start).num_seconds();
    let elapsed_hours = elapsed_seconds as f64 / 3600.0;
    if elapsed_hours > 0.0 {
        doc.average_speed = Some(doc.total_distance / elapsed_hours);
        doc.max_speed = percentile_95(speeds);
        doc.elapsed_time = Some(format_elapsed(elapsed_seconds));
    }
}

fn to_utc(time: gpx::Time) -> Option<DateTime<Utc>> {
    let odt: OffsetDateTime = time.into();
    DateTime::from_timestamp(odt.unix_timestamp(), odt.nanosecond())
}
