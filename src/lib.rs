// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ridelog: ride metrics from GPS track data.
//!
//! This crate turns noisy, irregularly-sampled GPS waypoint sequences into
//! ride statistics (distance, elevation gain, speeds, elapsed time). Two
//! entry points share the engine: a GPX to JSON converter CLI and an HTTP
//! API that stores uploaded rides with computed summaries.

pub mod config;
pub mod convert;
pub mod error;
pub mod geo;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod time_utils;

use config::Config;
use services::RideService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub rides: RideService,
}
