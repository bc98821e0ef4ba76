// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ride upload and retrieval service.
//!
//! Handles the core workflow:
//! 1. Validate the uploaded ride record
//! 2. Compute its summary with the calculator
//! 3. Store the ride + summary in the repository
//! 4. Serve lookups, updates, and deletions by id

use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{Ride, RideWithSummary};
use crate::services::SummaryCalculator;
use crate::store::RideRepository;

/// Service for storing rides with computed summaries.
#[derive(Clone)]
pub struct RideService {
    calculator: SummaryCalculator,
    store: Arc<dyn RideRepository>,
}

impl RideService {
    pub fn new(calculator: SummaryCalculator, store: Arc<dyn RideRepository>) -> Self {
        Self { calculator, store }
    }

    /// Validate an uploaded ride, compute its summary, and store it.
    /// Returns the assigned id and the stored record.
    pub fn upload(&self, ride: Ride) -> Result<(u64, RideWithSummary)> {
        ride.validate()?;
        let summary = self.calculator.calculate(&ride.waypoints)?;
        let stored = RideWithSummary { ride, summary };
        let id = self.store.insert(stored.clone());

        tracing::info!(
            id,
            waypoints = stored.ride.number_waypoints,
            distance = stored.summary.total_distance,
            "Stored ride"
        );
        Ok((id, stored))
    }

    pub fn get(&self, id: u64) -> Result<RideWithSummary> {
        self.store
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("Ride {id} not found")))
    }

    pub fn list(&self) -> Vec<(u64, RideWithSummary)> {
        self.store.list()
    }

    /// Update a ride's editable fields; waypoints and summary are preserved.
    pub fn update(
        &self,
        id: u64,
        name: String,
        start_time: String,
        end_time: String,
    ) -> Result<RideWithSummary> {
        let mut stored = self.get(id)?;
        stored.ride.name = name;
        stored.ride.start_time = start_time;
        stored.ride.end_time = end_time;
        stored.ride.validate()?;

        if !self.store.update(id, stored.clone()) {
            // Deleted between get and update; surface the same 404.
            return Err(AppError::NotFound(format!("Ride {id} not found")));
        }
        tracing::info!(id, "Updated ride");
        Ok(stored)
    }

    pub fn delete(&self, id: u64) -> Result<()> {
        if !self.store.delete(id) {
            return Err(AppError::NotFound(format!("Ride {id} not found")));
        }
        tracing::info!(id, "Deleted ride");
        Ok(())
    }
}
