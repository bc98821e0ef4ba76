// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory ride store.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use crate::models::RideWithSummary;
use crate::store::RideRepository;

/// Concurrent in-memory ride store with monotonically increasing ids.
#[derive(Default)]
pub struct MemoryRideStore {
    rides: DashMap<u64, RideWithSummary>,
    next_id: AtomicU64,
}

impl MemoryRideStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RideRepository for MemoryRideStore {
    fn insert(&self, ride: RideWithSummary) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.rides.insert(id, ride);
        id
    }

    fn get(&self, id: u64) -> Option<RideWithSummary> {
        self.rides.get(&id).map(|entry| entry.value().clone())
    }

    fn list(&self) -> Vec<(u64, RideWithSummary)> {
        let mut rides: Vec<_> = self
            .rides
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        rides.sort_by_key(|(id, _)| *id);
        rides
    }

    fn update(&self, id: u64, ride: RideWithSummary) -> bool {
        match self.rides.get_mut(&id) {
            Some(mut entry) => {
                *entry = ride;
                true
            }
            None => false,
        }
    }

    fn delete(&self, id: u64) -> bool {
        self.rides.remove(&id).is_some()
    }
}
