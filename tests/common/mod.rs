// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use std::sync::Arc;

use ridelog::config::Config;
use ridelog::routes::create_router;
use ridelog::services::{RideService, SummaryCalculator};
use ridelog::store::MemoryRideStore;
use ridelog::AppState;
use serde_json::{json, Value};

/// Create a test app with a fresh in-memory store and default config.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_config(Config::default())
}

#[allow(dead_code)]
pub fn create_test_app_with_config(config: Config) -> (axum::Router, Arc<AppState>) {
    let store = Arc::new(MemoryRideStore::new());
    let calculator = SummaryCalculator::new(config.calculator_config());
    let rides = RideService::new(calculator, store);

    let state = Arc::new(AppState { config, rides });

    (create_router(state.clone()), state)
}

/// A valid two-waypoint upload body: ~0.55 mi in 5 minutes, 10 ft of climb.
#[allow(dead_code)]
pub fn test_ride_body() -> Value {
    json!({
        "name": "Test Ride",
        "start_time": "2024-03-15T10:00:00Z",
        "end_time": "2024-03-15T10:05:00Z",
        "number_waypoints": 2,
        "waypoints": [
            {
                "latitude": 37.774929,
                "longitude": -122.419416,
                "elevation": 100.0,
                "timestamp": "2024-03-15T10:00:00Z"
            },
            {
                "latitude": 37.775929,
                "longitude": -122.429416,
                "elevation": 110.0,
                "timestamp": "2024-03-15T10:05:00Z"
            }
        ]
    })
}
