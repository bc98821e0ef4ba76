// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ridelog API Server
//!
//! Stores uploaded rides and computes their summary metrics (distance,
//! elevation gain, speeds, elapsed time) from waypoint data.

use std::sync::Arc;

use ridelog::{
    config::Config,
    services::{RideService, SummaryCalculator},
    store::MemoryRideStore,
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(
        port = config.port,
        units = %config.units,
        "Starting Ridelog API"
    );

    // In-memory ride store; ids are sequential and never reused
    let store = Arc::new(MemoryRideStore::new());
    let calculator = SummaryCalculator::new(config.calculator_config());
    let rides = RideService::new(calculator, store);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        rides,
    });

    // Build router
    let app = ridelog::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ridelog=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
