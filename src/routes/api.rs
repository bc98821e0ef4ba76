// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ride API routes.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Ride, RideWithSummary};
use crate::AppState;

/// Ride API routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/rides/upload", post(upload_ride))
        .route("/api/rides", get(list_rides))
        .route(
            "/api/rides/{id}",
            get(get_ride).put(update_ride).delete(delete_ride),
        )
}

/// A stored ride paired with its assigned id.
#[derive(Serialize)]
pub struct RideResponse {
    pub ride: RideWithSummary,
    pub id: u64,
}

/// Editable ride fields; waypoints are immutable after upload.
#[derive(Deserialize)]
pub struct RideUpdateRequest {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
}

/// Upload a new ride: validate, compute its summary, store it.
async fn upload_ride(
    State(state): State<Arc<AppState>>,
    Json(ride): Json<Ride>,
) -> Result<Json<RideResponse>> {
    let (id, stored) = state.rides.upload(ride)?;
    Ok(Json(RideResponse { ride: stored, id }))
}

/// List all stored rides, ordered by id.
async fn list_rides(State(state): State<Arc<AppState>>) -> Json<Vec<RideResponse>> {
    let rides = state
        .rides
        .list()
        .into_iter()
        .map(|(id, ride)| RideResponse { ride, id })
        .collect();
    Json(rides)
}

/// Get a specific ride.
async fn get_ride(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<RideWithSummary>> {
    Ok(Json(state.rides.get(id)?))
}

/// Update a ride's name and time range.
async fn update_ride(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(update): Json<RideUpdateRequest>,
) -> Result<Json<RideWithSummary>> {
    let updated = state
        .rides
        .update(id, update.name, update.start_time, update.end_time)?;
    Ok(Json(updated))
}

/// Delete a ride. The id is never reassigned.
async fn delete_ride(State(state): State<Arc<AppState>>, Path(id): Path<u64>) -> Result<StatusCode> {
    state.rides.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
