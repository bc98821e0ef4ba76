// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod ride;
pub mod summary;
pub mod waypoint;

pub use ride::{Ride, RideWithSummary};
pub use summary::RideSummary;
pub use waypoint::Waypoint;
