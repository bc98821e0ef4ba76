// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ride storage layer.

pub mod memory;

pub use memory::MemoryRideStore;

use crate::models::RideWithSummary;

/// Storage capability for rides keyed by integer id.
///
/// Keeps the calculator and service logic decoupled from how rides are
/// persisted; the in-memory implementation is the only one today.
pub trait RideRepository: Send + Sync {
    /// Store a new ride and return its assigned id. Ids are sequential
    /// starting at 1 and are never reused after deletion.
    fn insert(&self, ride: RideWithSummary) -> u64;

    fn get(&self, id: u64) -> Option<RideWithSummary>;

    /// All stored rides, ordered by id.
    fn list(&self) -> Vec<(u64, RideWithSummary)>;

    /// Replace an existing ride. Returns false when the id is unknown.
    fn update(&self, id: u64, ride: RideWithSummary) -> bool;

    /// Returns false when the id is unknown.
    fn delete(&self, id: u64) -> bool;
}
